use serde::{Deserialize, Serialize};

use super::{Patch, Record};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Id of the authoring user; cleared when that user is deleted.
    #[serde(default)]
    pub author: Option<String>,
}

impl Record for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Patch<Post> for PostPatch {
    fn apply(self, target: &mut Post) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(content) = self.content {
            target.content = content;
        }
    }
}
