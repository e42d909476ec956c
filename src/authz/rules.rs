use crate::entities::{Post, Project, Statut};

pub fn is_self(subject_id: &str, target_user_id: &str) -> bool {
    subject_id == target_user_id
}

pub fn is_admin(subject_role: Statut) -> bool {
    subject_role == Statut::Admin
}

/// A post without an author is nobody's.
pub fn is_author_of(subject_id: &str, post: &Post) -> bool {
    post.author.as_deref() == Some(subject_id)
}

/// A project without a proprietaire is nobody's.
pub fn is_owner_of(subject_id: &str, project: &Project) -> bool {
    project.proprietaire.as_deref() == Some(subject_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(author: Option<&str>) -> Post {
        Post {
            id: "1".to_string(),
            title: "Post 2".to_string(),
            content: "contenu post 2".to_string(),
            author: author.map(str::to_string),
        }
    }

    fn project(owner: Option<&str>) -> Project {
        Project {
            id: "0".to_string(),
            title: "Projet 1".to_string(),
            content: "Projet exemple 1".to_string(),
            proprietaire: owner.map(str::to_string),
        }
    }

    #[test]
    fn test_is_self() {
        assert!(is_self("2", "2"));
        assert!(!is_self("2", "20"));
    }

    #[test]
    fn test_is_admin() {
        assert!(is_admin(Statut::Admin));
        assert!(!is_admin(Statut::User));
    }

    #[test]
    fn test_is_author_of() {
        assert!(is_author_of("2", &post(Some("2"))));
        assert!(!is_author_of("0", &post(Some("2"))));
        assert!(!is_author_of("2", &post(None)));
        assert!(!is_author_of("", &post(None)));
    }

    #[test]
    fn test_is_owner_of() {
        assert!(is_owner_of("1", &project(Some("1"))));
        assert!(!is_owner_of("2", &project(Some("1"))));
        assert!(!is_owner_of("1", &project(None)));
    }
}
