use crate::errors::{ApiError, CarnetError};
use crate::settings::Auth;
use crate::store::Store;
use josekit::jws::{JwsHeader, HS256};
use josekit::jwt;
use josekit::jwt::JwtPayload;
use rand::RngCore;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Claim carrying the subject's user id.
pub const SUBJECT_CLAIM: &str = "userId";

/// Shortest HS256 key josekit accepts.
pub const MIN_SECRET_LEN: usize = 32;

/// Issues and verifies HS256 bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<Vec<u8>>,
    ttl: Option<Duration>,
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Option<Duration>) -> Result<Self, CarnetError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(CarnetError::WeakSecret { len: secret.len() });
        }
        Ok(Self {
            secret: Arc::new(secret),
            ttl,
        })
    }

    /// Service with a random secret. Its tokens die with the process.
    pub fn ephemeral(ttl: Option<Duration>) -> Self {
        Self {
            secret: Arc::new(random_secret()),
            ttl,
        }
    }

    /// A configured secret shorter than [`MIN_SECRET_LEN`] is rejected here,
    /// before any request can reach the signer.
    pub fn from_settings(cfg: &Auth) -> Result<Self, CarnetError> {
        match &cfg.secret {
            Some(secret) => Self::new(secret.as_bytes(), cfg.token_ttl()),
            None => {
                tracing::warn!("No auth.secret configured, tokens are only valid for this process");
                Ok(Self::ephemeral(cfg.token_ttl()))
            }
        }
    }

    /// Sign a token for `subject` without checking that the user exists.
    pub fn sign(&self, subject: &str) -> Result<String, CarnetError> {
        let now = SystemTime::now();
        let mut payload = JwtPayload::new();
        payload.set_subject(subject);
        payload.set_claim(SUBJECT_CLAIM, Some(Value::String(subject.to_string())))?;
        payload.set_issued_at(&now);
        if let Some(ttl) = self.ttl {
            payload.set_expires_at(&(now + ttl));
        }

        let signer = HS256.signer_from_bytes(self.secret.as_slice())?;
        let mut header = JwsHeader::new();
        header.set_token_type("JWT");
        let token = jwt::encode_with_signer(&payload, &header, &signer)?;
        Ok(token)
    }

    /// Issue a token for an existing user.
    pub fn issue(&self, store: &Store, subject_id: &str) -> Result<String, ApiError> {
        if store.users.find_by_id(subject_id).is_none() {
            return Err(ApiError::not_found("User", subject_id));
        }
        let token = self
            .sign(subject_id)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        tracing::debug!(subject = subject_id, "Issued auth token");
        Ok(token)
    }

    /// Verify a bearer token and return the subject id it carries.
    pub fn verify(&self, token: Option<&str>) -> Result<String, ApiError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthenticated("missing bearer token".to_string()))?;

        let verifier = HS256
            .verifier_from_bytes(self.secret.as_slice())
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let (payload, _header) = jwt::decode_with_verifier(token, &verifier)
            .map_err(|_| ApiError::Unauthenticated("invalid token".to_string()))?;

        if let Some(expires_at) = payload.expires_at() {
            if expires_at <= SystemTime::now() {
                return Err(ApiError::Unauthenticated("token expired".to_string()));
            }
        }

        payload
            .claim(SUBJECT_CLAIM)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::Unauthenticated("token carries no subject".to_string()))
    }
}

fn random_secret() -> Vec<u8> {
    let mut bytes = vec![0u8; MIN_SECRET_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}
