//! Ownership and role rules applied by the resolvers.
//!
//! Every operation composes at most one predicate from [`rules`]; a failed
//! predicate becomes [`ApiError::Forbidden`] through [`ensure`].

pub mod rules;

use crate::entities::{Statut, User};
use crate::errors::ApiError;

pub use rules::{is_admin, is_author_of, is_owner_of, is_self};

/// The authenticated caller of a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    pub id: String,
    pub statut: Statut,
}

impl Subject {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            statut: user.statut,
        }
    }
}

/// Turn a failed rule into `Forbidden`, logging the denial.
pub fn ensure(allowed: bool, subject: &Subject, action: &str) -> Result<(), ApiError> {
    if allowed {
        Ok(())
    } else {
        tracing::warn!(subject = %subject.id, action, "Authorization denied");
        Err(ApiError::Forbidden(format!("not allowed to {action}")))
    }
}
