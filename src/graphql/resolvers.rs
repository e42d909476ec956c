use async_graphql::*;

use super::context::{authenticate, issuance, shared_store, token_service};
use super::objects::{AuthToken, PostObject, ProjetObject, UserObject};
use crate::entities::{PostPatch, ProjectPatch, UserPatch};
use crate::operations;
use crate::settings::TokenIssuance;

/// Read-only fields. All of them require a valid bearer token.
#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<UserObject> {
        let store = shared_store(ctx).extend()?.read().await;
        authenticate(ctx, &store).extend()?;
        operations::user(&store, &id).map(UserObject).extend()
    }

    /// Users whose name contains `name`, ignoring case
    async fn users_by_name(&self, ctx: &Context<'_>, name: String) -> Result<Vec<UserObject>> {
        let store = shared_store(ctx).extend()?.read().await;
        authenticate(ctx, &store).extend()?;
        let users = operations::users_by_name(&store, &name).extend()?;
        Ok(users.into_iter().map(UserObject).collect())
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let store = shared_store(ctx).extend()?.read().await;
        authenticate(ctx, &store).extend()?;
        Ok(operations::users(&store).into_iter().map(UserObject).collect())
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<PostObject> {
        let store = shared_store(ctx).extend()?.read().await;
        authenticate(ctx, &store).extend()?;
        operations::post(&store, &id).map(PostObject).extend()
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let store = shared_store(ctx).extend()?.read().await;
        authenticate(ctx, &store).extend()?;
        Ok(operations::posts(&store).into_iter().map(PostObject).collect())
    }

    async fn projet(&self, ctx: &Context<'_>, id: ID) -> Result<ProjetObject> {
        let store = shared_store(ctx).extend()?.read().await;
        authenticate(ctx, &store).extend()?;
        operations::project(&store, &id).map(ProjetObject).extend()
    }

    /// Every projet; admins only
    async fn projets(&self, ctx: &Context<'_>) -> Result<Vec<ProjetObject>> {
        let store = shared_store(ctx).extend()?.read().await;
        let subject = authenticate(ctx, &store).extend()?;
        let projects = operations::projects(&store, &subject).extend()?;
        Ok(projects.into_iter().map(ProjetObject).collect())
    }
}

/// Mutations. Each one holds the store's write lock from authentication to
/// the end of its change.
#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Mint a bearer token for an existing user
    async fn generate_auth_token(&self, ctx: &Context<'_>, user_id: ID) -> Result<AuthToken> {
        let store = shared_store(ctx).extend()?.read().await;
        let tokens = token_service(ctx).extend()?;
        let issuance = issuance(ctx);

        let caller = match issuance {
            TokenIssuance::Open => None,
            TokenIssuance::SelfOrAdmin => Some(authenticate(ctx, &store).extend()?),
        };

        let token =
            operations::generate_auth_token(&store, tokens, issuance, caller.as_ref(), &user_id)
                .extend()?;
        Ok(AuthToken { token })
    }

    async fn add_post(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
        author_id: ID,
    ) -> Result<PostObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::add_post(&mut store, &subject, &title, &content, &author_id)
            .map(PostObject)
            .extend()
    }

    /// Create a user; admins only. `statut` must be `admin` or `user`.
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        statut: String,
    ) -> Result<UserObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::add_user(&mut store, &subject, &name, &email, &statut)
            .map(UserObject)
            .extend()
    }

    async fn add_projet(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
        proprietaire_id: ID,
    ) -> Result<ProjetObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::add_project(&mut store, &subject, &title, &content, &proprietaire_id)
            .map(ProjetObject)
            .extend()
    }

    /// Only the supplied fields are overwritten
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<UserObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::update_user(&mut store, &subject, &id, UserPatch { name, email })
            .map(UserObject)
            .extend()
    }

    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<PostObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::update_post(&mut store, &subject, &id, PostPatch { title, content })
            .map(PostObject)
            .extend()
    }

    async fn update_projet(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<ProjetObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::update_project(&mut store, &subject, &id, ProjectPatch { title, content })
            .map(ProjetObject)
            .extend()
    }

    /// Posts and projets of the deleted user are kept without an owner
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<UserObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::delete_user(&mut store, &subject, &id)
            .map(UserObject)
            .extend()
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<PostObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::delete_post(&mut store, &subject, &id)
            .map(PostObject)
            .extend()
    }

    async fn delete_projet(&self, ctx: &Context<'_>, id: ID) -> Result<ProjetObject> {
        let mut store = shared_store(ctx).extend()?.write().await;
        let subject = authenticate(ctx, &store).extend()?;
        operations::delete_project(&mut store, &subject, &id)
            .map(ProjetObject)
            .extend()
    }
}
