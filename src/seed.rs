use crate::entities::{Post, Project, Statut, User};
use crate::errors::CarnetError;
use crate::store::Store;
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root structure of a seed file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub projets: Vec<Project>,
}

impl SeedFile {
    pub fn into_store(self) -> Result<Store, CarnetError> {
        Store::from_records(self.users, self.posts, self.projets)
    }
}

/// Build the initial store, from `path` when given, otherwise from the
/// built-in fixtures.
pub fn initial_store(path: Option<&Path>) -> Result<Store> {
    let store = match path {
        Some(path) => load(path)?,
        None => {
            tracing::info!("No seed file configured, using built-in fixtures");
            fixtures()
        }
    };
    tracing::info!(
        users = store.users.len(),
        posts = store.posts.len(),
        projets = store.projects.len(),
        "Store seeded"
    );
    Ok(store)
}

/// Load a store from a JSON seed file
pub fn load(path: &Path) -> Result<Store> {
    tracing::info!("Loading seed data from {}", path.display());

    let content = fs::read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette::miette!("Failed to read seed file at '{}': {}", path.display(), e))?;

    let seed: SeedFile = serde_json::from_str(&content)
        .into_diagnostic()
        .map_err(|e| {
            miette::miette!(
                "Failed to parse seed file: {}\n\nExpected format:\n{{\n  \"users\": [{{ \"id\": \"0\", \"name\": \"Alice\", \"email\": \"alice@example.com\", \"statut\": \"user\" }}],\n  \"posts\": [{{ \"id\": \"0\", \"title\": \"Post 1\", \"content\": \"...\", \"author\": \"0\" }}],\n  \"projets\": [{{ \"id\": \"0\", \"title\": \"Projet 1\", \"content\": \"...\", \"proprietaire\": \"0\" }}]\n}}",
                e
            )
        })?;

    Ok(seed.into_store()?)
}

/// Built-in fixture data.
pub fn fixtures() -> Store {
    let user = |id: &str, statut, name: &str, email: &str| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        statut,
    };
    let post = |id: &str, title: &str, content: &str, author: &str| Post {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        author: Some(author.to_string()),
    };
    let project = |id: &str, title: &str, content: &str, owner: &str| Project {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        proprietaire: Some(owner.to_string()),
    };

    let seed = SeedFile {
        users: vec![
            user("0", Statut::User, "Alice", "alice@example.com"),
            user("1", Statut::User, "Bob", "bob@example.com"),
            user("2", Statut::Admin, "Tom", "tom.schmidt@ynov.com"),
        ],
        posts: vec![
            post("0", "Post 1", "contenu post 1", "0"),
            post("1", "Post 2", "contenu post 2", "2"),
            post("2", "Post 3", "contenu post 3", "0"),
        ],
        projets: vec![
            project("0", "Projet 1", "Projet exemple 1", "1"),
            project("1", "Projet 2", "Projet exemple 2", "1"),
            project("2", "Projet 3", "Projet exemple 3", "2"),
        ],
    };

    Store::from_records(seed.users, seed.posts, seed.projets)
        .unwrap_or_else(|e| unreachable!("built-in fixtures are consistent: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fixtures() {
        let store = fixtures();
        assert_eq!(store.users.len(), 3);
        assert_eq!(store.posts.len(), 3);
        assert_eq!(store.projects.len(), 3);
        assert_eq!(store.users.find_by_id("2").unwrap().statut, Statut::Admin);
    }

    #[test]
    fn test_load_seed_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("seed.json");
        fs::write(
            &path,
            r#"{
  "users": [
    { "id": "10", "name": "Ada", "email": "ada@example.com", "statut": "admin" }
  ],
  "posts": [
    { "id": "0", "title": "Hello", "content": "World", "author": "10" },
    { "id": "1", "title": "Orphan", "content": "No author" }
  ]
}"#,
        )
        .expect("Failed to write seed file");

        let mut store = load(&path).expect("Failed to load seed file");
        assert_eq!(store.users.len(), 1);
        assert_eq!(store.posts.find_by_id("1").unwrap().author, None);
        assert!(store.projects.is_empty());

        // Counter continues after the highest seeded id
        let created = store.create_user("Bea".to_string(), "bea@example.com".to_string(), Statut::User);
        assert_eq!(created.id, "11");
    }

    #[test]
    fn test_load_rejects_unknown_statut() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("seed.json");
        fs::write(
            &path,
            r#"{ "users": [{ "id": "0", "name": "Eve", "email": "eve@example.com", "statut": "root" }] }"#,
        )
        .expect("Failed to write seed file");

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_dangling_reference() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("seed.json");
        fs::write(
            &path,
            r#"{ "projets": [{ "id": "0", "title": "t", "content": "c", "proprietaire": "3" }] }"#,
        )
        .expect("Failed to write seed file");

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        assert!(load(&temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_initial_store_defaults_to_fixtures() {
        let store = initial_store(None).expect("fixtures load");
        assert_eq!(store.users.len(), 3);
    }
}
