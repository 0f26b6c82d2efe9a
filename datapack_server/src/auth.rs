//! Customer access tokens.
//!
//! Tokens are `base64url(claims_json).base64url(hmac_sha256(claims_json))`, signed with the server's
//! `DPG_AUTH_SECRET`. The claims carry the user id, phone number and an expiry timestamp, so route handlers can
//! identify the caller without a database round trip.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use base64::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{config::AuthConfig, errors::AuthError, errors::ServerError};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: i64,
    pub phone: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenIssuer {
    config: AuthConfig,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self { config: config.clone() }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.config.token_secret.reveal().as_bytes())
            .expect("HMAC accepts any key length")
    }

    /// Issue a new access token for the given user. Callers must have verified the user's credentials first.
    pub fn issue_token(&self, user_id: i64, phone: &str) -> Result<String, AuthError> {
        let claims =
            AccessClaims { user_id, phone: phone.to_string(), expires_at: Utc::now() + self.config.token_validity };
        let payload =
            serde_json::to_vec(&claims).map_err(|e| AuthError::ValidationError(format!("{e}")))?;
        let mut mac = self.mac();
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();
        Ok(format!(
            "{}.{}",
            base64::encode_config(&payload, URL_SAFE_NO_PAD),
            base64::encode_config(signature, URL_SAFE_NO_PAD)
        ))
    }

    /// Check the signature and expiry of a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let (payload_b64, sig_b64) = token
            .split_once('.')
            .ok_or_else(|| AuthError::PoorlyFormattedToken("missing signature separator".to_string()))?;
        let payload = base64::decode_config(payload_b64, URL_SAFE_NO_PAD)
            .map_err(|e| AuthError::PoorlyFormattedToken(format!("{e}")))?;
        let signature = base64::decode_config(sig_b64, URL_SAFE_NO_PAD)
            .map_err(|e| AuthError::PoorlyFormattedToken(format!("{e}")))?;
        let mut mac = self.mac();
        mac.update(&payload);
        mac.verify_slice(&signature).map_err(|e| AuthError::ValidationError(format!("{e}")))?;
        let claims: AccessClaims =
            serde_json::from_slice(&payload).map_err(|e| AuthError::PoorlyFormattedToken(format!("{e}")))?;
        if claims.expires_at < Utc::now() {
            return Err(AuthError::ExpiredToken);
        }
        debug!("🔑️ Access token validated for user {} ({})", claims.user_id, claims.phone);
        Ok(claims)
    }
}

/// Extractor for routes that require a logged-in customer. Reads the `Authorization: Bearer <token>` header and
/// validates it against the server's [`TokenIssuer`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub phone: String,
}

impl From<AccessClaims> for AuthenticatedUser {
    fn from(claims: AccessClaims) -> Self {
        Self { id: claims.user_id, phone: claims.phone }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, ServerError> {
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ServerError::InitializeError("TokenIssuer is not configured".to_string()))?;
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::PoorlyFormattedToken("missing Authorization header".to_string()))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::PoorlyFormattedToken("expected a Bearer token".to_string()))?;
    let claims = issuer.validate_token(token)?;
    Ok(claims.into())
}

#[cfg(test)]
mod test {
    use chrono::Duration;
    use dpg_common::Secret;

    use super::*;

    fn issuer(validity: Duration) -> TokenIssuer {
        let config = AuthConfig { token_secret: Secret::new("test-secret".to_string()), token_validity: validity };
        TokenIssuer::new(&config)
    }

    #[test]
    fn round_trip() {
        let issuer = issuer(Duration::hours(1));
        let token = issuer.issue_token(42, "76123456").unwrap();
        let claims = issuer.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.phone, "76123456");
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let issuer = issuer(Duration::hours(1));
        let token = issuer.issue_token(42, "76123456").unwrap();
        let mut tampered = token.clone();
        tampered.replace_range(0..2, "zz");
        assert!(matches!(issuer.validate_token(&tampered), Err(AuthError::ValidationError(_))));
        assert!(matches!(issuer.validate_token("not-a-token"), Err(AuthError::PoorlyFormattedToken(_))));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let issuer = issuer(Duration::hours(-1));
        let token = issuer.issue_token(42, "76123456").unwrap();
        assert!(matches!(issuer.validate_token(&token), Err(AuthError::ExpiredToken)));
    }
}
