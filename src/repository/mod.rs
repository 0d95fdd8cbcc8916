pub mod plan_repository;
