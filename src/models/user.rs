use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ______________________________________ User ______________________________________
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub age: Option<i64>,
    pub occupation: Option<String>,
    pub exercise_frequency: Option<String>,
    pub sex: Option<String>,
    pub medical_conditions: Option<String>,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub subscription_plan: Option<String>,
    pub subscription_price: Option<String>,
    pub training_category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ______________________________________ Public view ______________________________________
/// What leaves the server: no credential hash, no verification token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub age: Option<i64>,
    pub occupation: Option<String>,
    pub exercise_frequency: Option<String>,
    pub sex: Option<String>,
    pub medical_conditions: Option<String>,
    pub is_verified: bool,
    pub subscription_plan: Option<String>,
    pub subscription_price: Option<String>,
    pub training_category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            email: user.email,
            height: user.height,
            weight: user.weight,
            age: user.age,
            occupation: user.occupation,
            exercise_frequency: user.exercise_frequency,
            sex: user.sex,
            medical_conditions: user.medical_conditions,
            is_verified: user.is_verified,
            subscription_plan: user.subscription_plan,
            subscription_price: user.subscription_price,
            training_category: user.training_category,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
