pub mod post;
pub mod project;
pub mod user;

pub use post::{Post, PostPatch};
pub use project::{Project, ProjectPatch};
pub use user::{Statut, User, UserPatch};

/// A record kept in a [`crate::store::Collection`], addressed by its string id.
pub trait Record {
    fn id(&self) -> &str;
}

/// A set of optional field overwrites for a record of type `T`.
pub trait Patch<T> {
    /// Overwrite every field present in the patch; absent fields are left untouched.
    fn apply(self, target: &mut T);
}
