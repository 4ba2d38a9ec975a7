use crate::{
    api::{NewComment, PostId},
    ReplyTarget,
};

/// Everything a user can do on a comment thread
///
/// Display nodes only ever describe these, a single dispatcher
/// (`Threads::apply`) executes them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ThreadAction {
    LoadComments(PostId),
    ToggleReply(ReplyTarget),
    EditDraft(ReplyTarget, String),
    SubmitReply(ReplyTarget),
    OpenProfile(String),
}

/// Side effect requested by the dispatcher, to be run by whoever owns the
/// network
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    FetchComments(PostId),
    CreateComment(ReplyTarget, NewComment),
    Navigate(String),
}
