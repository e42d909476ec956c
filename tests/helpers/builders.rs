use carnet::entities::{Post, Project, Statut, User};
use carnet::store::Store;

/// Builder for creating test users
pub struct UserBuilder {
    name: String,
    email: Option<String>,
    statut: Statut,
}

impl UserBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            email: None,
            statut: Statut::User,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn admin(mut self) -> Self {
        self.statut = Statut::Admin;
        self
    }

    pub fn create(self, store: &mut Store) -> User {
        let email = self
            .email
            .unwrap_or_else(|| format!("{}@example.com", self.name.to_lowercase()));
        store.create_user(self.name, email, self.statut)
    }
}

/// Builder for creating test posts
pub struct PostBuilder {
    author_id: String,
    title: String,
    content: String,
}

impl PostBuilder {
    pub fn new(author_id: &str) -> Self {
        Self {
            author_id: author_id.to_string(),
            title: "Test post".to_string(),
            content: "Test content".to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn create(self, store: &mut Store) -> Post {
        store.create_post(self.title, self.content, self.author_id)
    }
}

/// Builder for creating test projets
pub struct ProjetBuilder {
    proprietaire_id: String,
    title: String,
    content: String,
}

impl ProjetBuilder {
    pub fn new(proprietaire_id: &str) -> Self {
        Self {
            proprietaire_id: proprietaire_id.to_string(),
            title: "Test projet".to_string(),
            content: "Test content".to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn create(self, store: &mut Store) -> Project {
        store.create_project(self.title, self.content, self.proprietaire_id)
    }
}
