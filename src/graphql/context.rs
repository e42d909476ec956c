use async_graphql::Context;

use crate::authz::Subject;
use crate::bearer::BearerToken;
use crate::errors::ApiError;
use crate::settings::TokenIssuance;
use crate::store::{SharedStore, Store};
use crate::token::TokenService;

pub fn shared_store<'a>(ctx: &Context<'a>) -> Result<&'a SharedStore, ApiError> {
    ctx.data::<SharedStore>()
        .map_err(|_| ApiError::Internal("Store not available".to_string()))
}

pub fn token_service<'a>(ctx: &Context<'a>) -> Result<&'a TokenService, ApiError> {
    ctx.data::<TokenService>()
        .map_err(|_| ApiError::Internal("Token service not available".to_string()))
}

pub fn issuance(ctx: &Context<'_>) -> TokenIssuance {
    ctx.data_opt::<TokenIssuance>().copied().unwrap_or_default()
}

/// Verify the request's bearer token and load its subject from `store`.
///
/// A valid token whose user has since been deleted is rejected.
pub fn authenticate(ctx: &Context<'_>, store: &Store) -> Result<Subject, ApiError> {
    let tokens = token_service(ctx)?;
    let bearer = ctx.data_opt::<BearerToken>().and_then(BearerToken::token);

    let subject_id = tokens.verify(bearer).map_err(|e| {
        tracing::warn!(error = %e, "Authentication failed");
        e
    })?;

    let user = store.users.find_by_id(&subject_id).ok_or_else(|| {
        tracing::warn!(subject = %subject_id, "Token subject no longer exists");
        ApiError::Unauthenticated("token subject no longer exists".to_string())
    })?;

    Ok(Subject::from_user(user))
}
