//! Shared fixtures for the `#[cfg(test)]` modules: an in-memory database,
//! seeded users, app state and tokens.

use std::{str::FromStr, sync::Arc};

use actix_web::web::Data;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::{
    config::Config,
    models::Principal,
    utils::{
        auth::issue_token,
        mailer::{Mailer, MemoryMailer},
    },
    AppState,
};

/// In-memory SQLite with migrations applied.
///
/// One connection only: every new connection to `sqlite::memory:` would be
/// a separate, empty database.
pub async fn setup_test_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid in-memory database url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}

/// Insert a user whose password is `GoodPass1`; returns the new id.
pub async fn seed_user(pool: &SqlitePool, email: &str, verified: bool) -> i64 {
    // minimum bcrypt cost keeps the suite fast
    let hash = bcrypt::hash("GoodPass1", 4).expect("Failed to hash password");
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (email, password_hash, is_verified, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?4)
        "#,
    )
    .bind(email)
    .bind(hash)
    .bind(verified)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to seed user")
    .last_insert_rowid()
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: "test-secret".to_string(),
        token_ttl_minutes: 60,
        admin_email: "coach@example.com".to_string(),
        admin_password: "CoachPass1".to_string(),
        public_base_url: "http://localhost:5000".to_string(),
        frontend_url: "http://localhost:3000".to_string(),
    }
}

pub fn test_state(pool: SqlitePool) -> Data<AppState> {
    test_state_with_mailer(pool, Arc::new(MemoryMailer::default()))
}

pub fn test_state_with_mailer(pool: SqlitePool, mailer: Arc<dyn Mailer>) -> Data<AppState> {
    Data::new(AppState {
        db: pool,
        config: test_config(),
        mailer,
    })
}

pub fn admin_token(state: &AppState) -> String {
    issue_token(Principal::Admin, &state.config.jwt_secret, 60).expect("Failed to issue token")
}

pub fn user_token(state: &AppState, user_id: i64) -> String {
    issue_token(Principal::User { id: user_id }, &state.config.jwt_secret, 60)
        .expect("Failed to issue token")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn setup_db_creates_schema() {
        let pool = setup_test_db().await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('users', 'plan_days', 'exercises', 'messages')",
        )
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");
        assert_eq!(tables.len(), 4);

        teardown_test_db(pool).await;
    }

    #[actix_web::test]
    async fn foreign_keys_are_enforced() {
        let pool = setup_test_db().await;

        let res = sqlx::query(
            "INSERT INTO plan_days (user_id, day_number, created_at, updated_at) VALUES (999, 1, ?1, ?1)",
        )
        .bind(Utc::now())
        .execute(&pool)
        .await;
        assert!(res.is_err());

        teardown_test_db(pool).await;
    }

    #[actix_web::test]
    async fn message_must_involve_the_coach_exactly_once() {
        let pool = setup_test_db().await;
        let a = seed_user(&pool, "a@example.com", true).await;
        let b = seed_user(&pool, "b@example.com", true).await;

        for (sender, receiver) in [(Some(a), Some(b)), (None, None)] {
            let res = sqlx::query(
                "INSERT INTO messages (sender_id, receiver_id, body, created_at) VALUES (?1, ?2, 'x', ?3)",
            )
            .bind(sender)
            .bind(receiver)
            .bind(Utc::now())
            .execute(&pool)
            .await;
            assert!(res.is_err());
        }

        teardown_test_db(pool).await;
    }
}
