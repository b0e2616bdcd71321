//! News post records.

use serde::{Deserialize, Serialize};

use crate::id::PostId;

/// A stored news item.
///
/// Field names on the wire match what the bundled web client reads
/// (`ID`, `Title`, `Content`, `PubTime`, `Link`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Post {
    #[serde(rename = "ID")]
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Publication time, Unix epoch seconds.
    pub pub_time: i64,
    /// Link to the original article.
    pub link: String,
}

/// A post produced by the ingester, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub pub_time: i64,
    pub link: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        pub_time: i64,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            pub_time,
            link: link.into(),
        }
    }

    /// Attach the identifier assigned by storage.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            pub_time: self.pub_time,
            link: self.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_client_field_names() {
        let post = NewPost::new("Rust 2024", "body", 1_700_000_000, "https://example.com/a")
            .into_post(PostId::new(7));

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ID": 7,
                "Title": "Rust 2024",
                "Content": "body",
                "PubTime": 1_700_000_000i64,
                "Link": "https://example.com/a",
            })
        );
    }
}
