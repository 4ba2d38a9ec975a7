use std::{future::Future, time::Duration};

use async_trait::async_trait;
use futures::{pin_mut, select, FutureExt};
use llmit_client::api::{
    self, Backend, CommentNode, Error, NewComment, Post, PostId, PostsQuery, ServerMessage,
    UserSummary,
};

use crate::Config;

/// The forum server, reached over HTTP from the browser
#[derive(Clone, Debug, PartialEq)]
pub struct HttpBackend {
    config: Config,
}

impl HttpBackend {
    pub fn new(config: Config) -> HttpBackend {
        HttpBackend { config }
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}

// reqwest cannot time out requests on wasm, so race them against a timer
async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    let fut = fut.fuse();
    let delay = wasm_timer::Delay::new(timeout).fuse();
    pin_mut!(fut, delay);
    select! {
        res = fut => res,
        _ = delay => Err(Error::TimedOut),
    }
}

async fn read_json<R>(resp: reqwest::Response) -> Result<R, Error>
where
    R: for<'de> serde::Deserialize<'de>,
{
    let status = resp.status();
    let body = resp.bytes().await.map_err(transport)?;
    if !status.is_success() {
        return Err(Error::from_response(status, &body));
    }
    serde_json::from_slice(&body).map_err(|e| Error::Parse(e.to_string()))
}

async fn get<R, Q>(config: &Config, path: &str, query: Option<&Q>) -> Result<R, Error>
where
    R: for<'de> serde::Deserialize<'de>,
    Q: serde::Serialize + ?Sized,
{
    let mut req = crate::CLIENT.get(config.url(path));
    if let Some(query) = query {
        req = req.query(query);
    }
    with_timeout(config.timeout, async move {
        read_json(req.send().await.map_err(transport)?).await
    })
    .await
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn fetch_comments(&self, post: PostId) -> Result<Vec<CommentNode>, Error> {
        get::<_, ()>(&self.config, &api::comments_path(post), None).await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<ServerMessage, Error> {
        let req = crate::CLIENT
            .post(self.config.url(api::CREATE_COMMENT_PATH))
            .json(comment);
        with_timeout(self.config.timeout, async move {
            read_json(req.send().await.map_err(transport)?).await
        })
        .await
    }
}

pub async fn fetch_posts(config: &Config, query: &PostsQuery) -> Result<Vec<Post>, Error> {
    get(config, api::POSTS_PATH, Some(query)).await
}

pub async fn search_users(config: &Config, query: &str) -> Result<Vec<UserSummary>, Error> {
    get(config, api::USER_SEARCH_PATH, Some(&[("query", query)])).await
}
