use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    api::{self, CommentNode, Error, NewComment, PostId, ServerMessage},
    render, CommentTreeExt, DisplayNode, Effect, ReplyForms, ReplyTarget, ThreadAction,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommentsState {
    /// "Load comments" was never clicked
    Unloaded,
    Empty,
    Loaded(Arc<Vec<CommentNode>>),
    Failed(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: String) -> Notice {
        Notice {
            level: NoticeLevel::Info,
            text,
        }
    }

    pub fn error(text: String) -> Notice {
        Notice {
            level: NoticeLevel::Error,
            text,
        }
    }
}

/// Everything the client knows about the comments of one post
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostThread {
    pub post: PostId,
    pub comments: CommentsState,
    pub loading: bool,
    pub forms: ReplyForms,
    pub notice: Option<Notice>,
}

impl PostThread {
    pub fn new(post: PostId) -> PostThread {
        PostThread {
            post,
            comments: CommentsState::Unloaded,
            loading: false,
            forms: ReplyForms::new(),
            notice: None,
        }
    }

    pub fn render(&self) -> Vec<DisplayNode> {
        match &self.comments {
            CommentsState::Loaded(c) => render::render_thread(c, &self.forms),
            _ => Vec::new(),
        }
    }

    pub fn post_reply_target(&self) -> ReplyTarget {
        ReplyTarget::Post(self.post)
    }
}

/// Comment threads of all the posts currently on screen
///
/// Each post is independent from the others. At most one comment load is in
/// flight per post.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Threads {
    threads: HashMap<PostId, PostThread>,
    in_flight: HashSet<PostId>,

    /// Posts that need a new load as soon as the current one completes
    reload_queued: HashSet<PostId>,
}

impl Threads {
    pub fn new() -> Threads {
        Threads::default()
    }

    pub fn get(&self, post: PostId) -> Option<&PostThread> {
        self.threads.get(&post)
    }

    /// The thread for `post`, or a pristine one if it was never touched
    pub fn thread(&self, post: PostId) -> PostThread {
        self.threads
            .get(&post)
            .cloned()
            .unwrap_or_else(|| PostThread::new(post))
    }

    fn thread_mut(&mut self, post: PostId) -> &mut PostThread {
        self.threads
            .entry(post)
            .or_insert_with(|| PostThread::new(post))
    }

    pub fn is_loading(&self, post: PostId) -> bool {
        self.in_flight.contains(&post)
    }

    pub fn loading_posts(&self) -> impl Iterator<Item = &PostId> {
        self.in_flight.iter()
    }

    /// Keep only the threads of `posts`, eg. after navigating to another page
    ///
    /// Loads still in flight for the dropped posts will be ignored on
    /// completion.
    pub fn retain_posts(&mut self, posts: &[PostId]) {
        self.threads.retain(|p, _| posts.contains(p));
        self.in_flight.retain(|p| posts.contains(p));
        self.reload_queued.retain(|p| posts.contains(p));
    }

    /// Returns false if a load is already in flight for this post, in which
    /// case nothing should be fetched
    pub fn begin_load(&mut self, post: PostId) -> bool {
        if !self.in_flight.insert(post) {
            tracing::debug!(%post, "ignoring comment load request, one is already in flight");
            return false;
        }
        self.thread_mut(post).loading = true;
        true
    }

    /// Like `begin_load`, but if a load is already in flight another one will
    /// be requested once it completes, as it may predate recent changes
    pub fn request_reload(&mut self, post: PostId) -> bool {
        if self.begin_load(post) {
            return true;
        }
        self.reload_queued.insert(post);
        false
    }

    /// Record the result of a comment load
    ///
    /// Returns true if another load was queued meanwhile and has just been
    /// started, in which case the caller must fetch again.
    pub fn finish_load(&mut self, post: PostId, res: Result<Vec<CommentNode>, Error>) -> bool {
        if !self.in_flight.remove(&post) {
            tracing::debug!(%post, "dropping comments for a post no longer displayed");
            return false;
        }
        let thread = self.thread_mut(post);
        thread.loading = false;
        match res {
            Ok(mut comments) => {
                comments.link_parents();
                if let Err(err) = comments.check_links(post) {
                    tracing::warn!(%post, ?err, "server sent an inconsistent comment tree");
                }
                tracing::debug!(%post, num = comments.count_comments(), "loaded comments");
                thread.forms.reset_comment_forms();
                thread.comments = match comments.is_empty() {
                    true => CommentsState::Empty,
                    false => CommentsState::Loaded(Arc::new(comments)),
                };
            }
            Err(err) => {
                tracing::error!(%post, %err, "failed loading comments");
                thread.comments = CommentsState::Failed(err.to_string());
            }
        }
        if self.reload_queued.remove(&post) {
            return self.begin_load(post);
        }
        false
    }

    /// Forget about every load and submission in flight, for when their
    /// answers will never be delivered
    ///
    /// Drafts are kept, so that the user can submit them again.
    pub fn abandon_pending(&mut self) {
        self.in_flight.clear();
        self.reload_queued.clear();
        for t in self.threads.values_mut() {
            t.loading = false;
            t.forms.abandon_submissions();
        }
    }

    pub fn toggle_reply(&mut self, target: ReplyTarget) -> bool {
        self.thread_mut(target.post()).forms.toggle(target)
    }

    pub fn set_draft(&mut self, target: ReplyTarget, draft: String) {
        self.thread_mut(target.post()).forms.set_draft(target, draft)
    }

    /// Validate the form's draft and mark it as being submitted
    ///
    /// Returns Ok(None) if a submission is already in flight for this form.
    /// On a validation error the draft is kept and the error is displayed on
    /// the form.
    pub fn begin_submit(&mut self, target: ReplyTarget) -> Result<Option<NewComment>, Error> {
        let form = self.thread_mut(target.post()).forms.form_mut(target);
        if form.submitting {
            return Ok(None);
        }
        let comment = target.new_comment(form.draft.clone());
        if let Err(err) = comment.validate() {
            form.error = Some(err.to_string());
            return Err(err);
        }
        form.error = None;
        form.submitting = true;
        Ok(Some(comment))
    }

    /// Record the server's answer to a submission
    ///
    /// Returns true if the post's comments must now be fetched again. The new
    /// comment is never added locally: the reload is the only way it shows up.
    pub fn finish_submit(&mut self, target: ReplyTarget, res: Result<ServerMessage, Error>) -> bool {
        let post = target.post();
        let thread = self.thread_mut(post);
        let form = thread.forms.form_mut(target);
        form.submitting = false;
        match res {
            Ok(msg) => {
                tracing::debug!(?target, "comment submitted");
                form.draft.clear();
                form.visible = false;
                form.error = None;
                thread.notice = Some(Notice::info(msg.message));
                self.request_reload(post)
            }
            Err(err) => {
                tracing::error!(?target, %err, "failed submitting comment");
                form.visible = true;
                form.error = Some(err.to_string());
                thread.notice = Some(Notice::error(format!("Failed to submit comment: {err}")));
                false
            }
        }
    }

    pub fn dismiss_notice(&mut self, post: PostId) {
        if let Some(t) = self.threads.get_mut(&post) {
            t.notice = None;
        }
    }

    /// Run a user action, returning the side effect it requires, if any
    pub fn apply(&mut self, action: ThreadAction) -> Option<Effect> {
        match action {
            ThreadAction::LoadComments(post) => {
                self.begin_load(post).then(|| Effect::FetchComments(post))
            }
            ThreadAction::ToggleReply(target) => {
                self.toggle_reply(target);
                None
            }
            ThreadAction::EditDraft(target, draft) => {
                self.set_draft(target, draft);
                None
            }
            ThreadAction::SubmitReply(target) => match self.begin_submit(target) {
                Ok(Some(comment)) => Some(Effect::CreateComment(target, comment)),
                Ok(None) => None,
                Err(err) => {
                    tracing::info!(?target, %err, "refusing to submit comment");
                    None
                }
            },
            ThreadAction::OpenProfile(username) => {
                Some(Effect::Navigate(api::profile_path(&username)))
            }
        }
    }
}
