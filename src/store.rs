use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entities::{Patch, Post, Project, Record, Statut, User};
use crate::errors::CarnetError;

/// Store shared between request handlers. Mutations hold the write lock for
/// their whole lookup-check-modify sequence.
pub type SharedStore = Arc<RwLock<Store>>;

/// Ordered in-memory collection with id-based access.
///
/// Ids handed out by [`Collection::next_id`] come from a counter that only
/// grows, so an id is never reused after a deletion.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    // Wider than the u64 ids it is seeded from, so `max + 1` cannot overflow
    next_id: u128,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Record + Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from existing records, keeping their ids.
    /// The counter starts after the highest numeric id seen.
    pub fn from_records(kind: &str, records: Vec<T>) -> Result<Self, CarnetError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id().to_string()) {
                return Err(CarnetError::InvalidSeed(format!(
                    "duplicate {kind} id `{}`",
                    record.id()
                )));
            }
        }

        let next_id = records
            .iter()
            .filter_map(|r| r.id().parse::<u64>().ok())
            .max()
            .map_or(0, |max| u128::from(max) + 1);

        Ok(Self {
            items: records,
            next_id,
        })
    }

    /// Reserve the next id.
    pub fn next_id(&mut self) -> String {
        let mut candidate = self.next_id;
        // Seeded non-numeric ids can never collide, numeric ones are skipped past.
        while self.find_by_id(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        self.next_id = candidate + 1;
        candidate.to_string()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn find_all(&self) -> &[T] {
        &self.items
    }

    pub fn insert(&mut self, record: T) -> T {
        self.items.push(record.clone());
        record
    }

    pub fn update<P: Patch<T>>(&mut self, id: &str, patch: P) -> Option<T> {
        let record = self.items.iter_mut().find(|r| r.id() == id)?;
        patch.apply(record);
        Some(record.clone())
    }

    pub fn delete(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|r| r.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The three entity collections of the service.
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub users: Collection<User>,
    pub posts: Collection<Post>,
    pub projects: Collection<Project>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a store from pre-existing records, checking that ids are
    /// unique and that every owner reference names a known user.
    pub fn from_records(
        users: Vec<User>,
        posts: Vec<Post>,
        projects: Vec<Project>,
    ) -> Result<Self, CarnetError> {
        let users = Collection::from_records("user", users)?;

        for post in &posts {
            if let Some(author) = &post.author {
                if users.find_by_id(author).is_none() {
                    return Err(CarnetError::InvalidSeed(format!(
                        "post `{}` references unknown author `{author}`",
                        post.id
                    )));
                }
            }
        }
        for project in &projects {
            if let Some(owner) = &project.proprietaire {
                if users.find_by_id(owner).is_none() {
                    return Err(CarnetError::InvalidSeed(format!(
                        "projet `{}` references unknown proprietaire `{owner}`",
                        project.id
                    )));
                }
            }
        }

        Ok(Self {
            users,
            posts: Collection::from_records("post", posts)?,
            projects: Collection::from_records("projet", projects)?,
        })
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Users whose name contains `needle`, ignoring case.
    pub fn users_by_name(&self, needle: &str) -> Vec<User> {
        let needle = needle.to_lowercase();
        self.users
            .find_all()
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn posts_by_author(&self, user_id: &str) -> Vec<Post> {
        self.posts
            .find_all()
            .iter()
            .filter(|p| p.author.as_deref() == Some(user_id))
            .cloned()
            .collect()
    }

    pub fn projects_by_owner(&self, user_id: &str) -> Vec<Project> {
        self.projects
            .find_all()
            .iter()
            .filter(|p| p.proprietaire.as_deref() == Some(user_id))
            .cloned()
            .collect()
    }

    pub fn create_user(&mut self, name: String, email: String, statut: Statut) -> User {
        let id = self.users.next_id();
        self.users.insert(User {
            id,
            name,
            email,
            statut,
        })
    }

    pub fn create_post(&mut self, title: String, content: String, author: String) -> Post {
        let id = self.posts.next_id();
        self.posts.insert(Post {
            id,
            title,
            content,
            author: Some(author),
        })
    }

    pub fn create_project(&mut self, title: String, content: String, owner: String) -> Project {
        let id = self.projects.next_id();
        self.projects.insert(Project {
            id,
            title,
            content,
            proprietaire: Some(owner),
        })
    }

    /// Remove a user and clear the author/proprietaire references pointing
    /// at it. Posts and projects themselves are kept.
    pub fn delete_user(&mut self, id: &str) -> Option<User> {
        let user = self.users.delete(id)?;

        for post in self.posts.iter_mut() {
            if post.author.as_deref() == Some(id) {
                post.author = None;
            }
        }
        for project in self.projects.iter_mut() {
            if project.proprietaire.as_deref() == Some(id) {
                project.proprietaire = None;
            }
        }

        Some(user)
    }
}
