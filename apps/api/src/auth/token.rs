use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Session tokens expire after seven days.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: i64,
}

/// Issues a signed session token for the given account.
pub fn issue(secret: &str, account_id: Uuid) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp();
    encode_with_expiry(secret, account_id, exp)
}

fn encode_with_expiry(secret: &str, account_id: Uuid, exp: i64) -> Result<String, AppError> {
    let claims = Claims {
        sub: account_id,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("token encoding failed: {e}")))
}

/// Resolves a token back to the owning account id.
/// Any decode failure (bad signature, expired, malformed) is `Unauthenticated`.
pub fn verify(secret: &str, token: &str) -> Result<Uuid, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthenticated)?;
    Ok(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_then_verify_round_trip() {
        let account_id = Uuid::new_v4();
        let token = issue(SECRET, account_id).unwrap();
        assert_eq!(verify(SECRET, &token).unwrap(), account_id);
    }

    #[test]
    fn test_wrong_secret_is_unauthenticated() {
        let token = issue(SECRET, Uuid::new_v4()).unwrap();
        assert!(matches!(
            verify("other-secret", &token),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        // Well past the default decode leeway.
        let exp = (Utc::now() - Duration::days(2)).timestamp();
        let token = encode_with_expiry(SECRET, Uuid::new_v4(), exp).unwrap();
        assert!(matches!(
            verify(SECRET, &token),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_garbage_token_is_unauthenticated() {
        assert!(matches!(
            verify(SECRET, "not.a.token"),
            Err(AppError::Unauthenticated)
        ));
    }
}
