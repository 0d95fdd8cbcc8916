use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Claims, Principal},
};

const BCRYPT_COST: u32 = 10;

pub fn test_password(password: &str) -> Option<&'static str> {
    if password.len() < 8 {
        Some("Password must be at least 8 characters long")
    } else if !password.chars().any(|c| c.is_uppercase()) {
        Some("Password must include at least one uppercase letter")
    } else if !password.chars().any(|c| c.is_lowercase()) {
        Some("Password must include at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_numeric()) {
        Some("Password must include at least one number")
    } else {
        None
    }
}

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|e| ApiError::Internal(format!("Hash failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    bcrypt::verify(password, hash)
        .map_err(|e| ApiError::Internal(format!("Password verification error: {}", e)))
}

pub fn issue_token(principal: Principal, secret: &str, ttl_minutes: i64) -> Result<String, ApiError> {
    let exp = Utc::now() + ChronoDuration::minutes(ttl_minutes);
    let claims = Claims { principal, exp: exp.timestamp() as usize };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| ApiError::Internal(format!("Token creation failed: {}", e)))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Principal, ApiError> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims.principal)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
}

/// One-time token mailed to new users.
pub fn new_verification_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_rules() {
        assert!(test_password("short1A").is_some());
        assert!(test_password("alllowercase1").is_some());
        assert!(test_password("ALLUPPERCASE1").is_some());
        assert!(test_password("NoDigitsHere").is_some());
        assert!(test_password("GoodPass1").is_none());
    }

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("GoodPass1").unwrap();
        assert!(verify_password("GoodPass1", &hash).unwrap());
        assert!(!verify_password("WrongPass1", &hash).unwrap());
    }

    #[test]
    fn token_carries_principal() {
        let token = issue_token(Principal::User { id: 7 }, "secret", 5).unwrap();
        assert_eq!(decode_token(&token, "secret").unwrap(), Principal::User { id: 7 });

        let admin = issue_token(Principal::Admin, "secret", 5).unwrap();
        assert_eq!(decode_token(&admin, "secret").unwrap(), Principal::Admin);
    }

    #[test]
    fn token_rejected_with_wrong_secret_or_expired() {
        let token = issue_token(Principal::Admin, "secret", 5).unwrap();
        assert!(matches!(decode_token(&token, "other"), Err(ApiError::Unauthorized(_))));

        // well past the default 60s leeway
        let expired = issue_token(Principal::Admin, "secret", -10).unwrap();
        assert!(decode_token(&expired, "secret").is_err());
    }

    #[test]
    fn verification_tokens_are_unique_hex() {
        let a = new_verification_token();
        let b = new_verification_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
