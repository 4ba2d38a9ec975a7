mod action;
pub use action::{Effect, ThreadAction};

pub mod render;
pub use render::{AuthorLink, DisplayNode};

mod reply;
pub use reply::{ReplyForm, ReplyForms, ReplyTarget};

mod session;
pub use session::Session;

mod thread;
pub use thread::{CommentsState, Notice, NoticeLevel, PostThread, Threads};

mod tree;
pub use tree::CommentTreeExt;

mod view;
pub use view::{user_search_query, UserSearch, ViewState};

pub mod api {
    pub use llmit_api::*;
}
