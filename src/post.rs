//! Post entity as exchanged with the remote post service.

use serde::{Deserialize, Serialize};

/// Content of a post without its server-assigned id.
///
/// This is the payload of a create request. The store never inspects
/// these fields; they are carried through to views unchanged. Fields the
/// server sends beyond the known ones are kept in `extra` and sent back on
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub published: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PostBody {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Attach a server-assigned id.
    pub fn with_id(self, id: impl Into<String>) -> Post {
        Post {
            id: id.into(),
            body: self,
        }
    }
}

/// A post known to the server. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(flatten)]
    pub body: PostBody,
}

impl Post {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        PostBody::titled(title).with_id(id)
    }

    pub fn title(&self) -> &str {
        &self.body.title
    }
}
