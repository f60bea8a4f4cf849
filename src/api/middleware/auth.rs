//! Bearer token authentication middleware.
//!
//! Identity is delegated to an external provider; this service only
//! verifies that the presented token was signed by it. A token has the form
//! `{owner_id}.{signature}` where signature is the hex HMAC-SHA256 of the
//! owner id under the shared signing secret.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::{error::AppError, state::AppState};

type HmacSha256 = Hmac<Sha256>;

/// Authenticated caller identity, inserted into request extensions by
/// [`layer`].
#[derive(Debug, Clone)]
pub struct Identity {
    pub owner_id: String,
}

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, the token is
/// malformed, or the signature does not verify.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let identity = verify_token(&token, &st.auth_signing_secret)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Verifies a `{owner_id}.{signature}` token and returns the identity.
pub fn verify_token(token: &str, secret: &str) -> Result<Identity, AppError> {
    let unauthorized = || {
        AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Token is malformed or has an invalid signature" }),
        )
    };

    let (owner_id, signature) = token.rsplit_once('.').ok_or_else(unauthorized)?;
    if owner_id.is_empty() {
        return Err(unauthorized());
    }

    let signature = hex::decode(signature).map_err(|_| unauthorized())?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::internal("Invalid signing secret", json!({})))?;
    mac.update(owner_id.as_bytes());
    mac.verify_slice(&signature).map_err(|_| unauthorized())?;

    Ok(Identity {
        owner_id: owner_id.to_string(),
    })
}

/// Signs an owner id into a bearer token. Used by tests and provisioning
/// tooling; the production issuer lives in the identity provider.
pub fn sign_token(owner_id: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(owner_id.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("{owner_id}.{signature}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_round_trip() {
        let token = sign_token("user-1", "secret");
        let identity = verify_token(&token, "secret").unwrap();
        assert_eq!(identity.owner_id, "user-1");
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = sign_token("user-1", "secret");
        assert!(matches!(
            verify_token(&token, "other").unwrap_err(),
            AppError::Unauthorized { .. }
        ));
    }

    #[test]
    fn test_rejects_tampered_owner() {
        let token = sign_token("user-1", "secret");
        let tampered = token.replacen("user-1", "user-2", 1);
        assert!(verify_token(&tampered, "secret").is_err());
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(verify_token("no-separator", "secret").is_err());
        assert!(verify_token(".deadbeef", "secret").is_err());
        assert!(verify_token("user-1.zzzz", "secret").is_err());
    }

    #[test]
    fn test_owner_id_may_contain_dots() {
        // rsplit_once keeps everything before the final dot as the id.
        let token = sign_token("user.one", "secret");
        let identity = verify_token(&token, "secret").unwrap();
        assert_eq!(identity.owner_id, "user.one");
    }
}
