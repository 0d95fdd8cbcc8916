use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Principal;

#[derive(Debug, Clone, FromRow)]
pub struct MessageRow {
    pub id: i64,
    pub sender_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub sender_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: i64,
    pub sender: Principal,
    pub receiver: Principal,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    /// "Admin" for the coach, otherwise the sender's email.
    pub sender_email: String,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        let sender = Principal::from_user_id(row.sender_id);
        let sender_email = match sender {
            Principal::Admin => "Admin".to_string(),
            Principal::User { .. } => row.sender_email.unwrap_or_default(),
        };

        Message {
            id: row.id,
            sender,
            receiver: Principal::from_user_id(row.receiver_id),
            message: row.body,
            is_read: row.is_read,
            created_at: row.created_at,
            sender_email,
        }
    }
}
