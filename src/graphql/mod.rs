//! GraphQL schema and its HTTP handlers.

pub mod context;
pub mod objects;
pub mod resolvers;

use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::bearer::BearerToken;
use crate::settings::TokenIssuance;
use crate::store::SharedStore;
use crate::token::TokenService;

pub use resolvers::{MutationRoot, QueryRoot};

pub type CarnetSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the store, token service and issuance policy as
/// shared context data.
pub fn build_schema(
    store: SharedStore,
    tokens: TokenService,
    issuance: TokenIssuance,
) -> CarnetSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(tokens)
        .data(issuance)
        .finish()
}

/// GraphQL handler for both GET (query string) and POST requests
async fn graphql_handler(
    State(schema): State<CarnetSchema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let bearer = BearerToken::from_headers(&headers);
    schema.execute(req.into_inner().data(bearer)).await.into()
}

/// GraphiQL IDE handler
async fn graphiql() -> impl IntoResponse {
    axum::response::Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}

/// Routes for the GraphQL endpoint, plus GraphiQL when enabled
pub fn router(schema: CarnetSchema, enable_graphiql: bool) -> Router {
    let router = Router::new()
        .route("/graphql", get(graphql_handler).post(graphql_handler))
        .with_state(schema);

    if enable_graphiql {
        router.route("/graphiql", get(graphiql))
    } else {
        router
    }
}
