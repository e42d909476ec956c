use async_graphql::{Request, Response};
use carnet::bearer::BearerToken;
use carnet::graphql::{build_schema, CarnetSchema};
use carnet::seed;
use carnet::settings::TokenIssuance;
use carnet::store::{SharedStore, Store};
use carnet::token::TokenService;

pub const TEST_SECRET: &str = "integration-test-secret-32-bytes-min";

/// In-process schema over its own store
pub struct TestApp {
    pub schema: CarnetSchema,
    pub store: SharedStore,
    pub tokens: TokenService,
}

impl TestApp {
    /// Schema over the built-in fixtures with open token issuance
    pub fn new() -> Self {
        Self::with_store(seed::fixtures())
    }

    pub fn with_store(store: Store) -> Self {
        Self::with_options(store, TokenIssuance::Open)
    }

    pub fn with_options(store: Store, issuance: TokenIssuance) -> Self {
        let store = store.into_shared();
        let tokens = TokenService::new(TEST_SECRET, None).expect("Test secret is long enough");
        let schema = build_schema(store.clone(), tokens.clone(), issuance);
        Self {
            schema,
            store,
            tokens,
        }
    }

    /// Sign a token directly, bypassing `generateAuthToken`
    pub fn token_for(&self, user_id: &str) -> String {
        self.tokens.sign(user_id).expect("Failed to sign test token")
    }

    pub async fn execute(&self, query: &str, token: Option<&str>) -> Response {
        let bearer = token.map(BearerToken::new).unwrap_or_default();
        self.schema.execute(Request::new(query).data(bearer)).await
    }

    /// Execute as the given user
    pub async fn execute_as(&self, user_id: &str, query: &str) -> Response {
        let token = self.token_for(user_id);
        self.execute(query, Some(&token)).await
    }
}

/// `extensions.code` of the first error, if any
pub fn error_code(response: &Response) -> Option<String> {
    let error = response.errors.first()?;
    match error.extensions.as_ref()?.get("code")? {
        async_graphql::Value::String(code) => Some(code.clone()),
        _ => None,
    }
}

/// Response data as JSON
pub fn data(response: &Response) -> serde_json::Value {
    response
        .data
        .clone()
        .into_json()
        .expect("Failed to convert response data")
}
