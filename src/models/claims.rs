use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Who is calling, or who is on either end of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Principal {
    Admin,
    User { id: i64 },
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Admin)
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }

    /// The caller's own user id; the coach has no user row.
    pub fn require_user(&self) -> Result<i64, ApiError> {
        match self {
            Principal::User { id } => Ok(*id),
            Principal::Admin => Err(ApiError::Forbidden(
                "This endpoint is for registered users".to_string(),
            )),
        }
    }

    /// Column value for a message participant, NULL standing for the coach.
    pub fn as_user_id(&self) -> Option<i64> {
        match self {
            Principal::User { id } => Some(*id),
            Principal::Admin => None,
        }
    }

    pub fn from_user_id(id: Option<i64>) -> Self {
        match id {
            Some(id) => Principal::User { id },
            None => Principal::Admin,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub principal: Principal,
    pub exp: usize,
}
