use std::rc::Rc;

use llmit_client::{DisplayNode, ThreadAction};
use yew::prelude::*;

use crate::{ui, util};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentThreadProps {
    pub nodes: Rc<Vec<DisplayNode>>,
    pub on_action: Callback<ThreadAction>,
}

#[function_component(CommentThread)]
pub fn comment_thread(p: &CommentThreadProps) -> Html {
    html! {
        { for p.nodes.iter().map(|n| html! {
            <CommentView
                key={ n.comment.to_string() }
                node={ n.clone() }
                on_action={ p.on_action.clone() }
            />
        }) }
    }
}

#[derive(Clone, PartialEq, Properties)]
pub struct CommentViewProps {
    pub node: DisplayNode,
    pub on_action: Callback<ThreadAction>,
}

/// One comment and, nested inside it, all of its replies
#[function_component(CommentView)]
pub fn comment_view(p: &CommentViewProps) -> Html {
    let n = &p.node;
    let open_profile = {
        let action = n.open_profile();
        p.on_action.reform(move |e: MouseEvent| {
            e.prevent_default();
            action.clone()
        })
    };
    let toggle_reply = {
        let action = n.toggle_reply();
        p.on_action.reform(move |_| action.clone())
    };

    html! {
        <div class="comment" style={ format!("margin-left: {}px;", n.indent_px) }>
            <p>{ &n.content }</p>
            <p class="comment-author">
                { "by " }
                <a href={ n.author.href.clone() } class="user-profile-link" onclick={ open_profile }>
                    { &n.author.username }
                </a>
                if n.is_ai_generated {
                    <span class="badge ai-badge">{ "AI" }</span>
                }
                if let Some(t) = &n.timestamp {
                    <span class="timestamp">{ util::format_time(t) }</span>
                }
                <span class="votes">{ format!("+{} / -{}", n.upvotes, n.downvotes) }</span>
            </p>
            <button class="reply-comment-btn" onclick={ toggle_reply }>{ "Reply" }</button>
            <ui::ReplyForm
                target={ n.reply_target }
                form={ n.reply_form.clone() }
                on_action={ p.on_action.clone() }
            />
            { for n.children.iter().map(|c| html! {
                <CommentView
                    key={ c.comment.to_string() }
                    node={ c.clone() }
                    on_action={ p.on_action.clone() }
                />
            }) }
        </div>
    }
}
