use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::Claims;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or_default()
}

/// Issues the token that carries a session after a successful login.
pub fn generate_session_token(
    username: &str,
    secret: &str,
    ttl: usize,
) -> Result<(String, Claims), Error> {
    let iat = now();
    let claims = Claims {
        sub: username.to_string(),
        iat,
        exp: iat + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, claims))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let (token, claims) = generate_session_token("admin", "s3cret", 60).unwrap();

        let decoded = verify_token(&token, "s3cret").unwrap();
        assert_eq!(decoded.sub, "admin");
        assert_eq!(decoded.jti, claims.jti);
        assert_eq!(decoded.exp, claims.iat + 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let (token, _) = generate_session_token("admin", "s3cret", 60).unwrap();
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("not-a-token", "s3cret").is_err());
    }
}
