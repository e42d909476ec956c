//! One function per schema field.
//!
//! Callers authenticate first and pass the resulting [`Subject`]. Each
//! operation then validates its arguments, looks up its target, applies its
//! authorization rule and performs at most one store mutation, in that order.

use crate::authz::{self, ensure, Subject};
use crate::entities::{Post, PostPatch, Project, ProjectPatch, Statut, User, UserPatch};
use crate::errors::ApiError;
use crate::settings::TokenIssuance;
use crate::store::Store;
use crate::token::TokenService;

/// Reject empty or blank ids and names. Free-text fields are stored as given.
pub fn required<'a>(name: &str, value: &'a str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::BadRequest(format!("`{name}` must not be empty")))
    } else {
        Ok(value)
    }
}

pub fn user(store: &Store, id: &str) -> Result<User, ApiError> {
    let id = required("id", id)?;
    store
        .users
        .find_by_id(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("User", id))
}

pub fn users(store: &Store) -> Vec<User> {
    store.users.find_all().to_vec()
}

pub fn users_by_name(store: &Store, name: &str) -> Result<Vec<User>, ApiError> {
    let name = required("name", name)?;
    Ok(store.users_by_name(name))
}

pub fn post(store: &Store, id: &str) -> Result<Post, ApiError> {
    let id = required("id", id)?;
    store
        .posts
        .find_by_id(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Post", id))
}

pub fn posts(store: &Store) -> Vec<Post> {
    store.posts.find_all().to_vec()
}

pub fn project(store: &Store, id: &str) -> Result<Project, ApiError> {
    let id = required("id", id)?;
    store
        .projects
        .find_by_id(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Projet", id))
}

/// Listing every project is reserved to admins.
pub fn projects(store: &Store, subject: &Subject) -> Result<Vec<Project>, ApiError> {
    ensure(authz::is_admin(subject.statut), subject, "list projets")?;
    Ok(store.projects.find_all().to_vec())
}

pub fn add_post(
    store: &mut Store,
    subject: &Subject,
    title: &str,
    content: &str,
    author_id: &str,
) -> Result<Post, ApiError> {
    let author_id = required("authorId", author_id)?;
    ensure(
        authz::is_self(&subject.id, author_id),
        subject,
        "create a post for another user",
    )?;

    let post = store.create_post(title.to_string(), content.to_string(), author_id.to_string());
    tracing::info!(post_id = %post.id, author = %author_id, "Post created");
    Ok(post)
}

pub fn add_user(
    store: &mut Store,
    subject: &Subject,
    name: &str,
    email: &str,
    statut: &str,
) -> Result<User, ApiError> {
    let name = required("name", name)?;
    let statut = required("statut", statut)?;
    ensure(authz::is_admin(subject.statut), subject, "create users")?;
    let statut: Statut = statut.parse()?;

    let user = store.create_user(name.to_string(), email.to_string(), statut);
    tracing::info!(user_id = %user.id, %statut, created_by = %subject.id, "User created");
    Ok(user)
}

pub fn add_project(
    store: &mut Store,
    subject: &Subject,
    title: &str,
    content: &str,
    proprietaire_id: &str,
) -> Result<Project, ApiError> {
    let proprietaire_id = required("proprietaireId", proprietaire_id)?;
    ensure(
        authz::is_self(&subject.id, proprietaire_id),
        subject,
        "create a projet for another user",
    )?;

    let project =
        store.create_project(title.to_string(), content.to_string(), proprietaire_id.to_string());
    tracing::info!(projet_id = %project.id, proprietaire = %proprietaire_id, "Projet created");
    Ok(project)
}

pub fn update_user(
    store: &mut Store,
    subject: &Subject,
    id: &str,
    patch: UserPatch,
) -> Result<User, ApiError> {
    let id = required("id", id)?;
    if store.users.find_by_id(id).is_none() {
        return Err(ApiError::not_found("User", id));
    }
    ensure(authz::is_self(&subject.id, id), subject, "update this user")?;

    let user = store
        .users
        .update(id, patch)
        .ok_or_else(|| ApiError::not_found("User", id))?;
    tracing::info!(user_id = %id, "User updated");
    Ok(user)
}

pub fn update_post(
    store: &mut Store,
    subject: &Subject,
    id: &str,
    patch: PostPatch,
) -> Result<Post, ApiError> {
    let id = required("id", id)?;
    let post = store
        .posts
        .find_by_id(id)
        .ok_or_else(|| ApiError::not_found("Post", id))?;
    ensure(authz::is_author_of(&subject.id, post), subject, "update this post")?;

    let post = store
        .posts
        .update(id, patch)
        .ok_or_else(|| ApiError::not_found("Post", id))?;
    tracing::info!(post_id = %id, "Post updated");
    Ok(post)
}

pub fn update_project(
    store: &mut Store,
    subject: &Subject,
    id: &str,
    patch: ProjectPatch,
) -> Result<Project, ApiError> {
    let id = required("id", id)?;
    let project = store
        .projects
        .find_by_id(id)
        .ok_or_else(|| ApiError::not_found("Projet", id))?;
    ensure(authz::is_owner_of(&subject.id, project), subject, "update this projet")?;

    let project = store
        .projects
        .update(id, patch)
        .ok_or_else(|| ApiError::not_found("Projet", id))?;
    tracing::info!(projet_id = %id, "Projet updated");
    Ok(project)
}

/// Deleting a user clears, but keeps, the posts and projects it owned.
pub fn delete_user(store: &mut Store, subject: &Subject, id: &str) -> Result<User, ApiError> {
    let id = required("id", id)?;
    if store.users.find_by_id(id).is_none() {
        return Err(ApiError::not_found("User", id));
    }
    ensure(authz::is_self(&subject.id, id), subject, "delete this user")?;

    let user = store
        .delete_user(id)
        .ok_or_else(|| ApiError::not_found("User", id))?;
    tracing::info!(user_id = %id, "User deleted");
    Ok(user)
}

pub fn delete_post(store: &mut Store, subject: &Subject, id: &str) -> Result<Post, ApiError> {
    let id = required("id", id)?;
    let post = store
        .posts
        .find_by_id(id)
        .ok_or_else(|| ApiError::not_found("Post", id))?;
    ensure(authz::is_author_of(&subject.id, post), subject, "delete this post")?;

    let post = store
        .posts
        .delete(id)
        .ok_or_else(|| ApiError::not_found("Post", id))?;
    tracing::info!(post_id = %id, "Post deleted");
    Ok(post)
}

pub fn delete_project(store: &mut Store, subject: &Subject, id: &str) -> Result<Project, ApiError> {
    let id = required("id", id)?;
    let project = store
        .projects
        .find_by_id(id)
        .ok_or_else(|| ApiError::not_found("Projet", id))?;
    ensure(authz::is_owner_of(&subject.id, project), subject, "delete this projet")?;

    let project = store
        .projects
        .delete(id)
        .ok_or_else(|| ApiError::not_found("Projet", id))?;
    tracing::info!(projet_id = %id, "Projet deleted");
    Ok(project)
}

/// Mint a token for `user_id` under the configured issuance policy.
///
/// `caller` is only consulted for [`TokenIssuance::SelfOrAdmin`]; it is the
/// result of authenticating the request's own bearer token.
pub fn generate_auth_token(
    store: &Store,
    tokens: &TokenService,
    issuance: TokenIssuance,
    caller: Option<&Subject>,
    user_id: &str,
) -> Result<String, ApiError> {
    let user_id = required("userId", user_id)?;

    if issuance == TokenIssuance::SelfOrAdmin {
        let caller = caller.ok_or_else(|| {
            ApiError::Unauthenticated("a bearer token is required to mint tokens".to_string())
        })?;
        if store.users.find_by_id(user_id).is_none() {
            return Err(ApiError::not_found("User", user_id));
        }
        ensure(
            authz::is_self(&caller.id, user_id) || authz::is_admin(caller.statut),
            caller,
            "mint a token for another user",
        )?;
    }

    tokens.issue(store, user_id)
}
