use std::fmt::Write;

use crate::{
    api::{self, CommentId, CommentNode, PostId, Time},
    ReplyForm, ReplyForms, ReplyTarget, ThreadAction,
};

/// Horizontal offset added by each nesting level
pub const INDENT_UNIT_PX: usize = 20;

pub fn indent_px(depth: usize) -> usize {
    depth * INDENT_UNIT_PX
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorLink {
    pub username: String,
    pub href: String,
}

impl AuthorLink {
    pub fn new(username: &str) -> AuthorLink {
        AuthorLink {
            username: String::from(username),
            href: api::profile_path(username),
        }
    }
}

/// A comment ready to be displayed
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayNode {
    pub comment: CommentId,
    pub post: PostId,
    pub depth: usize,
    pub indent_px: usize,
    pub content: String,
    pub author: AuthorLink,
    pub upvotes: i64,
    pub downvotes: i64,
    pub is_ai_generated: bool,
    pub timestamp: Option<Time>,
    pub reply_target: ReplyTarget,
    pub reply_form: ReplyForm,
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    pub fn toggle_reply(&self) -> ThreadAction {
        ThreadAction::ToggleReply(self.reply_target)
    }

    pub fn edit_draft(&self, draft: String) -> ThreadAction {
        ThreadAction::EditDraft(self.reply_target, draft)
    }

    pub fn submit_reply(&self) -> ThreadAction {
        ThreadAction::SubmitReply(self.reply_target)
    }

    pub fn open_profile(&self) -> ThreadAction {
        ThreadAction::OpenProfile(self.author.username.clone())
    }
}

/// Turn a thread into display nodes, taking reply form states from `forms`
pub fn render_thread(comments: &[CommentNode], forms: &ReplyForms) -> Vec<DisplayNode> {
    render_at(comments, 0, forms)
}

pub fn render_at(comments: &[CommentNode], depth: usize, forms: &ReplyForms) -> Vec<DisplayNode> {
    comments
        .iter()
        .map(|c| {
            let reply_target = ReplyTarget::Comment {
                post: c.post_id,
                comment: c.id,
            };
            DisplayNode {
                comment: c.id,
                post: c.post_id,
                depth,
                indent_px: indent_px(depth),
                content: c.content.clone(),
                author: AuthorLink::new(&c.author),
                upvotes: c.upvotes,
                downvotes: c.downvotes,
                is_ai_generated: c.is_ai_generated,
                timestamp: c.timestamp,
                reply_target,
                reply_form: forms.form(&reply_target),
                children: render_at(&c.children, depth + 1, forms),
            }
        })
        .collect()
}

/// Static HTML for a rendered thread, every piece of user text escaped
pub fn to_html(nodes: &[DisplayNode]) -> String {
    let mut out = String::new();
    for n in nodes {
        write_node(&mut out, n);
    }
    out
}

fn write_node(out: &mut String, n: &DisplayNode) {
    use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

    let display = match n.reply_form.visible {
        true => "block",
        false => "none",
    };
    // Writing to a String cannot fail
    let _ = write!(
        out,
        concat!(
            r#"<div class="comment" style="margin-left: {indent}px;">"#,
            r#"<p>{content}</p>"#,
            r#"<p class="comment-author">by <a href="{href}" class="user-profile-link" data-username="{user_attr}">{user}</a></p>"#,
            r#"<button class="reply-comment-btn" data-comment-id="{id}">Reply</button>"#,
            r#"<div class="reply-form-container" id="reply-form-{id}" style="display: {display};">"#,
            r#"<textarea class="reply-content" placeholder="Write your reply...">{draft}</textarea>"#,
            r#"<button class="submit-reply-btn" data-comment-id="{id}" data-post-id="{post}">Submit Reply</button>"#,
            r#"</div>"#,
        ),
        indent = n.indent_px,
        content = text(&n.content),
        href = attr(&n.author.href),
        user_attr = attr(&n.author.username),
        user = text(&n.author.username),
        id = n.comment,
        display = display,
        draft = text(&n.reply_form.draft),
        post = n.post,
    );
    for c in &n.children {
        write_node(out, c);
    }
    out.push_str("</div>");
}
