//! Carnet - GraphQL API over users, posts and projets
//!
//! In-memory collections behind a bearer-token gate with ownership and
//! role rules. All modules are public so integration tests can drive them.

pub mod authz;
pub mod bearer;
pub mod entities;
pub mod errors;
pub mod graphql;
pub mod operations;
pub mod seed;
pub mod settings;
pub mod store;
pub mod token;
pub mod web;
