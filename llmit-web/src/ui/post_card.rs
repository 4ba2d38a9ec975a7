use std::rc::Rc;

use llmit_client::{
    api::{Post, PostId},
    CommentsState, PostThread, ThreadAction,
};
use yew::prelude::*;

use crate::{ui, util};

#[derive(Clone, PartialEq, Properties)]
pub struct PostCardProps {
    pub post: Post,
    pub thread: PostThread,
    pub on_action: Callback<ThreadAction>,
    pub on_dismiss: Callback<PostId>,
    pub on_select_group: Callback<String>,
}

#[function_component(PostCard)]
pub fn post_card(p: &PostCardProps) -> Html {
    let post = &p.post;
    let post_id = post.id;
    let author = post.author.clone();
    let group = post.group.clone();

    let comments = match &p.thread.comments {
        CommentsState::Unloaded => html! {},
        CommentsState::Empty => html! { <p class="no-comments">{ "No comments yet." }</p> },
        CommentsState::Failed(err) => html! {
            <p class="error">{ format!("Error loading comments: {err}") }</p>
        },
        CommentsState::Loaded(_) => html! {
            <ui::CommentThread
                nodes={ Rc::new(p.thread.render()) }
                on_action={ p.on_action.clone() }
            />
        },
    };
    let notice = p.thread.notice.clone().map(|notice| {
        html! {
            <ui::NoticeBanner { notice } on_dismiss={ p.on_dismiss.reform(move |_| post_id) } />
        }
    });
    let reply_target = p.thread.post_reply_target();

    html! {
        <div class="post">
            <div class="post-header">
                <span class="title">{ &post.title }</span>
                <span class="group">
                    { "in " }
                    <a
                        href="#"
                        class="group-link"
                        onclick={ p.on_select_group.reform(move |e: MouseEvent| {
                            e.prevent_default();
                            group.clone()
                        }) }
                    >
                        { &post.group }
                    </a>
                </span>
                <span class="author">
                    { "by " }
                    <a
                        href="#"
                        class="user-profile-link"
                        onclick={ p.on_action.reform(move |e: MouseEvent| {
                            e.prevent_default();
                            ThreadAction::OpenProfile(author.clone())
                        }) }
                    >
                        { &post.author }
                    </a>
                </span>
                if let Some(t) = &post.timestamp {
                    <span class="timestamp">{ util::format_time(t) }</span>
                }
            </div>
            <div class="post-body">
                if let Some(url) = &post.image_url {
                    <img src={ url.clone() } alt="Post Image" class="post-image" />
                }
                <p>{ &post.content }</p>
            </div>
            <div class="post-meta">
                <span>{ format!("Upvotes: {}", post.upvotes) }</span>
                <span>{ format!("Downvotes: {}", post.downvotes) }</span>
            </div>
            <button
                class="load-comments-btn"
                disabled={ p.thread.loading }
                onclick={ p.on_action.reform(move |_| ThreadAction::LoadComments(post_id)) }
            >
                { if p.thread.loading { "Loading..." } else { "Load Comments" } }
            </button>
            <button
                class="reply-post-btn"
                onclick={ p.on_action.reform(move |_| ThreadAction::ToggleReply(reply_target)) }
            >
                { "Reply to Post" }
            </button>
            { for notice }
            <div class="comments" id={ format!("comments-{post_id}") }>
                { comments }
            </div>
            <ui::ReplyForm
                target={ reply_target }
                form={ p.thread.forms.form(&reply_target) }
                on_action={ p.on_action.clone() }
            />
        </div>
    }
}
