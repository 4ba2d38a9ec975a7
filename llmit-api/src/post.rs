use bolero::generator::TypeGenerator;
use std::fmt;

use crate::Time;

pub const POSTS_PER_PAGE: u32 = 10;

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,
    pub group: String,
    pub title: String,
    pub content: String,
    pub author: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub upvotes: i64,

    #[serde(default)]
    pub downvotes: i64,

    #[serde(default)]
    pub is_ai_generated: bool,

    #[serde(default)]
    pub timestamp: Option<Time>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    Top,
    New,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Top => "top",
            Sort::New => "new",
        }
    }
}

/// Query string of the post listing endpoint
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PostsQuery {
    pub group: String,
    pub sort: Sort,
    pub page: u32,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_wire_names() {
        assert_eq!(serde_json::to_string(&Sort::Top).unwrap(), r#""top""#);
        assert_eq!(Sort::New.as_str(), "new");
    }

    #[test]
    fn post_without_image() {
        let p: Post = serde_json::from_str(
            r#"{"id": 3, "group": "rust", "title": "t", "content": "c",
                "image_url": null, "author": "Anonymous", "upvotes": 1}"#,
        )
        .unwrap();
        assert_eq!(p.id, PostId(3));
        assert_eq!(p.image_url, None);
        assert_eq!(p.downvotes, 0);
    }
}
