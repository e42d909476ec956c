use axum::http::HeaderMap;

/// Bearer token presented by the caller, if any. Attached to every GraphQL
/// request as context data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BearerToken(Option<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    /// Read the `Authorization` header. The `Bearer ` prefix is optional;
    /// a bare token is accepted as well.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|value| {
                value
                    .strip_prefix("Bearer ")
                    .or_else(|| value.strip_prefix("bearer "))
                    .unwrap_or(value)
                    .trim()
            })
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self(token)
    }

    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}
