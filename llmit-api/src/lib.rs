use async_trait::async_trait;

mod comment;
pub use comment::{CommentId, CommentNode, NewComment};

mod error;
pub use error::Error;

mod post;
pub use post::{Post, PostId, PostsQuery, Sort, POSTS_PER_PAGE};

mod user;
pub use user::UserSummary;

/// Timestamps as emitted by the server, ISO-8601 without any timezone
pub type Time = chrono::NaiveDateTime;

pub const FRONTPAGE: &str = "frontpage";

/// Answer to every state-changing request
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ServerMessage {
    pub message: String,
}

pub fn comments_path(post: PostId) -> String {
    format!("/api/posts/{}/comments", post.0)
}

pub const CREATE_COMMENT_PATH: &str = "/api/comments";

pub fn profile_path(username: &str) -> String {
    format!("/user/{}", urlencoding::encode(username))
}

pub const POSTS_PATH: &str = "/api/posts";

pub const USER_SEARCH_PATH: &str = "/api/users/search";

/// Everything the comment core needs from the server
///
/// Futures are not `Send`, so that the browser's `reqwest` can implement
/// this trait.
#[async_trait(?Send)]
pub trait Backend {
    async fn fetch_comments(&self, post: PostId) -> Result<Vec<CommentNode>, Error>;
    async fn create_comment(&self, comment: &NewComment) -> Result<ServerMessage, Error>;
}

pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(String::from(s)));
    }
    Ok(())
}
