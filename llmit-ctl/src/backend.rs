use std::time::Duration;

use async_trait::async_trait;
use llmit_client::api::{
    self, Backend, CommentNode, Error, NewComment, Post, PostId, PostsQuery, ServerMessage,
    UserSummary,
};

/// The forum server, reached over HTTP from the command line
pub struct HttpBackend {
    host: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(host: &str, timeout: Duration) -> anyhow::Result<HttpBackend> {
        Ok(HttpBackend {
            host: String::from(host.trim_end_matches('/')),
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    async fn send<R>(&self, req: reqwest::RequestBuilder) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let resp = req.send().await.map_err(transport)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(transport)?;
        tracing::debug!(%status, len = body.len(), "received response");
        if !status.is_success() {
            return Err(Error::from_response(status, &body));
        }
        serde_json::from_slice(&body).map_err(|e| Error::Parse(e.to_string()))
    }

    pub async fn fetch_posts(&self, query: &PostsQuery) -> Result<Vec<Post>, Error> {
        self.send(self.client.get(self.url(api::POSTS_PATH)).query(query))
            .await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, Error> {
        let req = self
            .client
            .get(self.url(api::USER_SEARCH_PATH))
            .query(&[("query", query)]);
        self.send(req).await
    }
}

fn transport(err: reqwest::Error) -> Error {
    match err.is_timeout() {
        true => Error::TimedOut,
        false => Error::Transport(err.to_string()),
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn fetch_comments(&self, post: PostId) -> Result<Vec<CommentNode>, Error> {
        self.send(self.client.get(self.url(&api::comments_path(post))))
            .await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<ServerMessage, Error> {
        let req = self
            .client
            .post(self.url(api::CREATE_COMMENT_PATH))
            .json(comment);
        self.send(req).await
    }
}
