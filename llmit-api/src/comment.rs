use bolero::generator::TypeGenerator;
use std::fmt;

use crate::{Error, PostId, Time};

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
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A comment as returned by the server, along with all its replies
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentNode {
    pub id: CommentId,

    /// Post at the root of the thread, whatever the depth of this comment
    pub post_id: PostId,

    /// Username, only ever used for display and profile links
    pub author: String,

    /// Raw text, to be escaped before display
    pub content: String,

    /// None for comments made directly on the post
    pub parent_comment_id: Option<CommentId>,

    /// Replies, in server order
    #[serde(default)]
    pub children: Vec<CommentNode>,

    #[serde(default)]
    pub upvotes: i64,

    #[serde(default)]
    pub downvotes: i64,

    #[serde(default)]
    pub is_ai_generated: bool,

    #[serde(default)]
    pub timestamp: Option<Time>,
}

impl CommentNode {
    pub fn new(id: CommentId, post_id: PostId, parent: Option<CommentId>) -> CommentNode {
        CommentNode {
            id,
            post_id,
            author: String::new(),
            content: String::new(),
            parent_comment_id: parent,
            children: Vec::new(),
            upvotes: 0,
            downvotes: 0,
            is_ai_generated: false,
            timestamp: None,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_comment_id.is_none()
    }
}

/// Body of a comment creation request
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub post_id: PostId,
    pub content: String,
    pub parent_comment_id: Option<CommentId>,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.content)?;
        if self.content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(())
    }
}
