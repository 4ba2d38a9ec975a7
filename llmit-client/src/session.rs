use crate::{
    api::{Backend, Error, PostId, ServerMessage},
    Effect, PostThread, ReplyTarget, ThreadAction, Threads,
};

/// Drives `Threads` against a backend, one action at a time
///
/// The browser client runs the same steps from its component loop instead,
/// this is for callers that can simply await.
pub struct Session<B> {
    backend: B,
    threads: Threads,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: B) -> Session<B> {
        Session {
            backend,
            threads: Threads::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn threads(&self) -> &Threads {
        &self.threads
    }

    pub fn thread(&self, post: PostId) -> PostThread {
        self.threads.thread(post)
    }

    // Holding &mut self across every await, nothing can still be in flight
    // when a call starts: whatever looks so belongs to a dropped future
    fn forget_dropped_calls(&mut self) {
        self.threads.abandon_pending();
    }

    /// Fetch the comments of `post`, replacing whatever was known about them
    pub async fn load_comments(&mut self, post: PostId) -> PostThread {
        self.forget_dropped_calls();
        if self.threads.begin_load(post) {
            self.fetch_until_settled(post).await;
        }
        self.threads.thread(post)
    }

    async fn fetch_until_settled(&mut self, post: PostId) {
        loop {
            let res = self.backend.fetch_comments(post).await;
            if !self.threads.finish_load(post, res) {
                return;
            }
        }
    }

    /// Submit `content` as a reply to `target`, then reload the whole thread
    /// on success
    pub async fn reply(
        &mut self,
        target: ReplyTarget,
        content: String,
    ) -> Result<ServerMessage, Error> {
        self.forget_dropped_calls();
        self.threads.set_draft(target, content);
        let comment = self
            .threads
            .begin_submit(target)?
            .ok_or(Error::AlreadySubmitting)?;
        let res = self.backend.create_comment(&comment).await;
        if self.threads.finish_submit(target, res.clone()) {
            self.fetch_until_settled(target.post()).await;
        }
        res
    }

    /// Run a user action along with any network operation it requires
    ///
    /// Returns the URL to navigate to, if the action asked for one.
    pub async fn dispatch(&mut self, action: ThreadAction) -> Option<String> {
        self.forget_dropped_calls();
        match self.threads.apply(action)? {
            Effect::FetchComments(post) => {
                self.fetch_until_settled(post).await;
                None
            }
            Effect::CreateComment(target, comment) => {
                let res = self.backend.create_comment(&comment).await;
                if self.threads.finish_submit(target, res) {
                    self.fetch_until_settled(target.post()).await;
                }
                None
            }
            Effect::Navigate(url) => Some(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::CommentId, CommentTreeExt, CommentsState, NoticeLevel};
    use futures::{executor::block_on, FutureExt};
    use llmit_mock_server::{MockServer, Request};

    const POST: PostId = PostId(42);

    fn server() -> MockServer {
        let server = MockServer::new();
        let a = server.add_comment(POST, None, "alice", "a");
        server.add_comment(POST, Some(a), "bob", "b");
        server
    }

    fn on(comment: i64) -> ReplyTarget {
        ReplyTarget::Comment {
            post: POST,
            comment: CommentId(comment),
        }
    }

    #[test]
    fn load_renders_nested_comments() {
        let mut session = Session::new(server());
        let thread = block_on(session.load_comments(POST));
        let rendered = thread.render();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].content, "a");
        assert_eq!(rendered[0].children[0].content, "b");
        assert_eq!(rendered[0].children[0].indent_px, 20);
        assert_eq!(
            session.backend().requests(),
            vec![Request::FetchComments(POST)]
        );
    }

    #[test]
    fn reply_reloads_exactly_once() {
        let mut session = Session::new(server());
        block_on(session.load_comments(POST));
        session.backend().clear_requests();

        let msg = block_on(session.reply(on(2), String::from("reply"))).unwrap();
        assert_eq!(msg.message, "Comment submitted successfully");
        assert_eq!(
            session.backend().requests(),
            vec![
                Request::CreateComment(on(2).new_comment(String::from("reply"))),
                Request::FetchComments(POST),
            ]
        );
        let thread = session.thread(POST);
        match &thread.comments {
            CommentsState::Loaded(c) => {
                assert_eq!(c.count_comments(), 3);
                let new = c.find(CommentId(3)).unwrap();
                assert_eq!(new.parent_comment_id, Some(CommentId(2)));
                c.check_links(POST).unwrap();
            }
            s => panic!("unexpected state {s:?}"),
        }
        assert_eq!(thread.notice.map(|n| n.level), Some(NoticeLevel::Info));
    }

    #[test]
    fn every_load_refetches() {
        let mut session = Session::new(server());
        block_on(session.load_comments(POST));
        block_on(session.load_comments(POST));
        block_on(session.dispatch(ThreadAction::LoadComments(POST)));
        assert_eq!(session.backend().requests().len(), 3);
    }

    #[test]
    fn failed_reply_keeps_draft() {
        let mut session = Session::new(server());
        block_on(session.load_comments(POST));
        session.backend().clear_requests();
        session.backend().fail_next(Error::Transport(String::from("network down")));

        let res = block_on(session.reply(on(1), String::from("lost?")));
        assert_eq!(res, Err(Error::Transport(String::from("network down"))));
        assert_eq!(session.backend().requests().len(), 1);
        let form = session.thread(POST).forms.form(&on(1));
        assert_eq!(form.draft, "lost?");
        assert!(form.visible);
        assert!(form.error.is_some());
    }

    #[test]
    fn empty_reply_never_reaches_server() {
        let mut session = Session::new(server());
        let res = block_on(session.reply(ReplyTarget::Post(POST), String::from("")));
        assert_eq!(res, Err(Error::EmptyContent));
        assert!(session.backend().requests().is_empty());
    }

    #[test]
    fn dispatch_handles_profile_and_toggle() {
        let mut session = Session::new(server());
        assert_eq!(
            block_on(session.dispatch(ThreadAction::OpenProfile(String::from("bob")))),
            Some(String::from("/user/bob"))
        );
        assert_eq!(block_on(session.dispatch(ThreadAction::ToggleReply(on(1)))), None);
        assert!(session.thread(POST).forms.is_visible(&on(1)));
        assert!(session.backend().requests().is_empty());
    }

    #[test]
    fn failed_load_is_reported_inline() {
        let mut session = Session::new(server());
        session.backend().fail_next(Error::TimedOut);
        let thread = block_on(session.load_comments(POST));
        assert_eq!(thread.comments, CommentsState::Failed(Error::TimedOut.to_string()));
        assert!(!thread.loading);

        let thread = block_on(session.load_comments(PostId(1)));
        assert_eq!(thread.comments, CommentsState::Empty);
    }

    #[test]
    fn dropped_reply_does_not_block_the_next_one() {
        let mut session = Session::new(server());
        block_on(session.load_comments(POST));
        session.backend().stall_next();
        assert!(session
            .reply(on(2), String::from("first"))
            .now_or_never()
            .is_none());
        assert!(session.thread(POST).forms.form(&on(2)).submitting);

        let msg = block_on(session.reply(on(2), String::from("second"))).unwrap();
        assert_eq!(msg.message, "Comment submitted successfully");
        match &session.thread(POST).comments {
            CommentsState::Loaded(c) => {
                assert_eq!(c.count_comments(), 3);
                assert_eq!(c.find(CommentId(3)).unwrap().content, "second");
            }
            s => panic!("unexpected state {s:?}"),
        }
    }

    #[test]
    fn dropped_load_does_not_block_the_next_one() {
        let mut session = Session::new(server());
        session.backend().stall_next();
        assert!(session.load_comments(POST).now_or_never().is_none());
        assert!(session.threads().is_loading(POST));

        let thread = block_on(session.load_comments(POST));
        assert!(!thread.loading);
        assert!(matches!(thread.comments, CommentsState::Loaded(_)));
    }
}
