use std::{cell::RefCell, collections::VecDeque};

use async_trait::async_trait;
use llmit_api::{Backend, CommentId, CommentNode, Error, NewComment, PostId, ServerMessage};

/// In-memory stand-in for the forum server
///
/// Comments are stored flat, in creation order, and assembled into trees on
/// every fetch, like the real server does. Every request is recorded so that
/// tests can check what went over the wire.
pub struct MockServer(RefCell<State>);

struct State {
    current_user: String,
    comments: Vec<CommentNode>,
    requests: Vec<Request>,
    failures: VecDeque<Error>,
    stall_next: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    FetchComments(PostId),
    CreateComment(NewComment),
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer::as_user("tester")
    }

    /// A server on which comment submissions are authored by `user`
    pub fn as_user(user: &str) -> MockServer {
        MockServer(RefCell::new(State {
            current_user: String::from(user),
            comments: Vec::new(),
            requests: Vec::new(),
            failures: VecDeque::new(),
            stall_next: false,
        }))
    }

    /// Directly store a comment, without going through a request
    pub fn add_comment(
        &self,
        post: PostId,
        parent: Option<CommentId>,
        author: &str,
        content: &str,
    ) -> CommentId {
        let mut state = self.0.borrow_mut();
        state.insert(post, parent, author.to_string(), content.to_string())
    }

    /// Make the next request, whatever it is, fail with `err`
    pub fn fail_next(&self, err: Error) {
        self.0.borrow_mut().failures.push_back(err);
    }

    /// Make the next request never get an answer, nor reach the server
    pub fn stall_next(&self) {
        self.0.borrow_mut().stall_next = true;
    }

    async fn stall_if_asked(&self) {
        let stall = std::mem::take(&mut self.0.borrow_mut().stall_next);
        if stall {
            tracing::debug!("mock server stalling request");
            std::future::pending::<()>().await;
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.0.borrow().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.0.borrow_mut().requests.clear();
    }

    pub fn num_comments(&self) -> usize {
        self.0.borrow().comments.len()
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

impl State {
    fn record(&mut self, req: Request) -> Result<(), Error> {
        tracing::debug!(?req, "mock server got request");
        self.requests.push(req);
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn insert(
        &mut self,
        post: PostId,
        parent: Option<CommentId>,
        author: String,
        content: String,
    ) -> CommentId {
        let id = CommentId(self.comments.len() as i64 + 1);
        let mut c = CommentNode::new(id, post, parent);
        c.author = author;
        c.content = content;
        self.comments.push(c);
        id
    }

    fn tree_for(&self, post: PostId) -> Vec<CommentNode> {
        let of_post = self
            .comments
            .iter()
            .filter(|c| c.post_id == post)
            .collect::<Vec<_>>();
        build_children(&of_post, None)
    }
}

fn build_children(comments: &[&CommentNode], parent: Option<CommentId>) -> Vec<CommentNode> {
    comments
        .iter()
        .filter(|c| c.parent_comment_id == parent)
        .map(|c| CommentNode {
            children: build_children(comments, Some(c.id)),
            ..(*c).clone()
        })
        .collect()
}

#[async_trait(?Send)]
impl Backend for MockServer {
    async fn fetch_comments(&self, post: PostId) -> Result<Vec<CommentNode>, Error> {
        self.stall_if_asked().await;
        let mut state = self.0.borrow_mut();
        state.record(Request::FetchComments(post))?;
        Ok(state.tree_for(post))
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<ServerMessage, Error> {
        self.stall_if_asked().await;
        let mut state = self.0.borrow_mut();
        state.record(Request::CreateComment(comment.clone()))?;
        let author = state.current_user.clone();
        state.insert(
            comment.post_id,
            comment.parent_comment_id,
            author,
            comment.content.clone(),
        );
        Ok(ServerMessage {
            message: String::from("Comment submitted successfully"),
        })
    }
}
