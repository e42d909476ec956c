use async_graphql::{Context, Object, Result, ResultExt, SimpleObject, ID};

use super::context::shared_store;
use crate::entities::{Post, Project, User};

/// Wrapper exposing a [`User`] as the GraphQL `User` type.
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    /// `admin` or `user`
    async fn statut(&self) -> &str {
        self.0.statut.as_str()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    /// Posts whose author is this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let store = shared_store(ctx).extend()?.read().await;
        Ok(store
            .posts_by_author(&self.0.id)
            .into_iter()
            .map(PostObject)
            .collect())
    }

    /// Projets whose proprietaire is this user
    async fn projets(&self, ctx: &Context<'_>) -> Result<Vec<ProjetObject>> {
        let store = shared_store(ctx).extend()?.read().await;
        Ok(store
            .projects_by_owner(&self.0.id)
            .into_iter()
            .map(ProjetObject)
            .collect())
    }
}

pub struct PostObject(pub Post);

#[Object(name = "Post")]
impl PostObject {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    /// Null once the author has been deleted
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let Some(author_id) = &self.0.author else {
            return Ok(None);
        };
        let store = shared_store(ctx).extend()?.read().await;
        Ok(store.users.find_by_id(author_id).cloned().map(UserObject))
    }
}

pub struct ProjetObject(pub Project);

#[Object(name = "Projet")]
impl ProjetObject {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    /// Null once the proprietaire has been deleted
    async fn proprietaire(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let Some(owner_id) = &self.0.proprietaire else {
            return Ok(None);
        };
        let store = shared_store(ctx).extend()?.read().await;
        Ok(store.users.find_by_id(owner_id).cloned().map(UserObject))
    }
}

#[derive(SimpleObject)]
pub struct AuthToken {
    pub token: String,
}
