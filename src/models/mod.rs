mod user;
pub use user::{User, UserProfile};

mod claims;
pub use claims::{Claims, Principal};

pub mod plan;
pub use plan::{Exercise, PlanDay, SavePlanRequest};

pub mod message;
pub use message::{Message, MessageRow};
