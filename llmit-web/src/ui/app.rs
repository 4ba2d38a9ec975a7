use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};
use llmit_client::{
    api::{Backend, CommentNode, Error, Post, PostId, ServerMessage},
    Effect, ReplyTarget, ThreadAction, Threads, ViewState,
};
use yew::prelude::*;

use crate::{api, ui, util, Config};

const KEY_NIGHT_MODE: &str = "night-mode";

#[derive(Clone, PartialEq, Properties)]
pub struct AppProps {
    pub config: Config,
}

pub enum AppMsg {
    Navigate(ViewState),
    ReceivedPosts(ViewState, Result<Vec<Post>, Error>),

    Thread(ThreadAction),
    ReceivedComments(PostId, Result<Vec<CommentNode>, Error>),
    CommentSubmitted(ReplyTarget, Result<ServerMessage, Error>),
    DismissNotice(PostId),

    ToggleNightMode,
}

#[derive(Clone, PartialEq)]
enum PostsState {
    Loading,
    Loaded(Rc<Vec<Post>>),
    Failed(String),
}

pub struct App {
    backend: Rc<api::HttpBackend>,
    view: ViewState,
    posts: PostsState,
    threads: Threads,
    night_mode: bool,
}

impl App {
    fn fetch_posts(&self, ctx: &Context<Self>) {
        let config = ctx.props().config.clone();
        let view = self.view.clone();
        tracing::debug!(?view, "fetching posts");
        ctx.link().send_future(async move {
            let res = api::fetch_posts(&config, &view.posts_query()).await;
            AppMsg::ReceivedPosts(view, res)
        });
    }

    fn run_effect(&self, ctx: &Context<Self>, effect: Effect) {
        let backend = self.backend.clone();
        match effect {
            Effect::FetchComments(post) => ctx.link().send_future(async move {
                AppMsg::ReceivedComments(post, backend.fetch_comments(post).await)
            }),
            Effect::CreateComment(target, comment) => ctx.link().send_future(async move {
                AppMsg::CommentSubmitted(target, backend.create_comment(&comment).await)
            }),
            Effect::Navigate(url) => util::navigate_to(&url),
        }
    }
}

impl Component for App {
    type Message = AppMsg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let night_mode = LocalStorage::get(KEY_NIGHT_MODE).unwrap_or(false);
        util::apply_night_mode(night_mode);

        let this = App {
            backend: Rc::new(api::HttpBackend::new(ctx.props().config.clone())),
            view: ViewState::default(),
            posts: PostsState::Loading,
            threads: Threads::new(),
            night_mode,
        };
        this.fetch_posts(ctx);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Navigate(view) => {
                self.view = view;
                self.posts = PostsState::Loading;
                self.fetch_posts(ctx);
            }
            AppMsg::ReceivedPosts(view, res) => {
                if view != self.view {
                    tracing::debug!(?view, "dropping posts for a view no longer displayed");
                    return false;
                }
                match res {
                    Ok(posts) => {
                        tracing::debug!(num = posts.len(), "received posts");
                        let ids = posts.iter().map(|p| p.id).collect::<Vec<_>>();
                        self.threads.retain_posts(&ids);
                        self.posts = PostsState::Loaded(Rc::new(posts));
                    }
                    Err(err) => {
                        tracing::error!(%err, "failed loading posts");
                        self.threads.retain_posts(&[]);
                        self.posts = PostsState::Failed(err.to_string());
                    }
                }
            }
            AppMsg::Thread(action) => {
                tracing::trace!(?action, "thread action");
                if let Some(effect) = self.threads.apply(action) {
                    self.run_effect(ctx, effect);
                }
            }
            AppMsg::ReceivedComments(post, res) => {
                if self.threads.finish_load(post, res) {
                    self.run_effect(ctx, Effect::FetchComments(post));
                }
            }
            AppMsg::CommentSubmitted(target, res) => {
                if self.threads.finish_submit(target, res) {
                    self.run_effect(ctx, Effect::FetchComments(target.post()));
                }
            }
            AppMsg::DismissNotice(post) => self.threads.dismiss_notice(post),
            AppMsg::ToggleNightMode => {
                self.night_mode = !self.night_mode;
                if let Err(err) = LocalStorage::set(KEY_NIGHT_MODE, self.night_mode) {
                    tracing::warn!(?err, "failed saving theme to local storage");
                }
                util::apply_night_mode(self.night_mode);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_action = ctx.link().callback(AppMsg::Thread);
        let on_dismiss = ctx.link().callback(AppMsg::DismissNotice);
        let on_select_group = {
            let view = self.view.clone();
            ctx.link()
                .callback(move |group| AppMsg::Navigate(view.clone().select_group(group)))
        };
        let (content, received) = match &self.posts {
            PostsState::Loading => (html! { <p>{ "Loading posts..." }</p> }, 0),
            PostsState::Failed(err) => (
                html! {
                    <p class="error">{ format!("Error loading posts: {err}") }</p>
                },
                0,
            ),
            PostsState::Loaded(posts) if posts.is_empty() => (
                html! { <p>{ "No posts available for this group." }</p> },
                0,
            ),
            PostsState::Loaded(posts) => (
                html! {
                    <div id="post-list">
                        { for posts.iter().map(|p| html! {
                            <ui::PostCard
                                key={ p.id.to_string() }
                                post={ p.clone() }
                                thread={ self.threads.thread(p.id) }
                                on_action={ on_action.clone() }
                                on_dismiss={ on_dismiss.clone() }
                                on_select_group={ on_select_group.clone() }
                            />
                        }) }
                    </div>
                },
                posts.len(),
            ),
        };

        html! {
            <div class="container">
                <header class="d-flex align-items-center">
                    <ui::UserSearch config={ ctx.props().config.clone() } />
                    <ui::ThemeToggle
                        night_mode={ self.night_mode }
                        on_toggle={ ctx.link().callback(|_| AppMsg::ToggleNightMode) }
                    />
                </header>
                <ui::ViewControls
                    view={ self.view.clone() }
                    { received }
                    on_navigate={ ctx.link().callback(AppMsg::Navigate) }
                />
                { content }
            </div>
        }
    }
}
