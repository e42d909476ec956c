use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Patch, Record};
use crate::errors::ApiError;

/// Role of a user. No other value can be stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statut {
    Admin,
    User,
}

impl Statut {
    pub fn as_str(&self) -> &'static str {
        match self {
            Statut::Admin => "admin",
            Statut::User => "user",
        }
    }
}

impl fmt::Display for Statut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statut {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Statut::Admin),
            "user" => Ok(Statut::User),
            other => Err(ApiError::BadRequest(format!(
                "statut must be either `admin` or `user`, got `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub statut: Statut,
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Patch<User> for UserPatch {
    fn apply(self, target: &mut User) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(email) = self.email {
            target.email = email;
        }
    }
}
