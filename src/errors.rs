use async_graphql::ErrorExtensions;
use miette::Diagnostic;
use thiserror::Error;

/// Service-level failures: startup, configuration, seeding and token signing.
#[derive(Debug, Error, Diagnostic)]
pub enum CarnetError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(carnet::io))]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    #[diagnostic(code(carnet::config))]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(carnet::serde))]
    Serde(#[from] serde_json::Error),

    #[error("JOSE error: {0}")]
    #[diagnostic(code(carnet::jose))]
    Jose(String),

    #[error("auth.secret is {len} bytes, HS256 needs at least 32")]
    #[diagnostic(
        code(carnet::weak_secret),
        help("Set auth.secret (or CARNET__AUTH__SECRET) to a random value of 32 bytes or more, e.g. `openssl rand -base64 32`")
    )]
    WeakSecret { len: usize },

    #[error("Invalid seed data: {0}")]
    #[diagnostic(
        code(carnet::seed),
        help("Ids must be unique per collection and every author/proprietaire must name an existing user")
    )]
    InvalidSeed(String),

    #[error("{0}")]
    #[diagnostic(code(carnet::other))]
    Other(String),
}

impl From<josekit::JoseError> for CarnetError {
    fn from(value: josekit::JoseError) -> Self {
        CarnetError::Jose(value.to_string())
    }
}

/// Request-level failures surfaced in the GraphQL `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ApiError {
    #[error("Authentication required: {0}")]
    #[diagnostic(code(carnet::unauthenticated))]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    #[diagnostic(code(carnet::forbidden))]
    Forbidden(String),

    #[error("{0}")]
    #[diagnostic(code(carnet::not_found))]
    NotFound(String),

    #[error("Bad request: {0}")]
    #[diagnostic(code(carnet::bad_request))]
    BadRequest(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(carnet::internal))]
    Internal(String),
}

impl ApiError {
    pub fn not_found(kind: &str, id: &str) -> Self {
        ApiError::NotFound(format!("{kind} with id {id} not found"))
    }

    /// Value of `extensions.code` in the GraphQL error.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| ext.set("code", code))
    }
}
