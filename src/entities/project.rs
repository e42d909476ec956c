use serde::{Deserialize, Serialize};

use super::{Patch, Record};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Id of the owning user; cleared when that user is deleted.
    #[serde(default)]
    pub proprietaire: Option<String>,
}

impl Record for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Patch<Project> for ProjectPatch {
    fn apply(self, target: &mut Project) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(content) = self.content {
            target.content = content;
        }
    }
}
