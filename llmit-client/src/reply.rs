use std::collections::HashMap;

use crate::api::{CommentId, NewComment, PostId};

/// What a reply form answers to
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReplyTarget {
    Post(PostId),
    Comment { post: PostId, comment: CommentId },
}

impl ReplyTarget {
    pub fn post(&self) -> PostId {
        match self {
            ReplyTarget::Post(p) => *p,
            ReplyTarget::Comment { post, .. } => *post,
        }
    }

    pub fn parent(&self) -> Option<CommentId> {
        match self {
            ReplyTarget::Post(_) => None,
            ReplyTarget::Comment { comment, .. } => Some(*comment),
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, ReplyTarget::Comment { .. })
    }

    pub fn new_comment(&self, content: String) -> NewComment {
        NewComment {
            post_id: self.post(),
            content,
            parent_comment_id: self.parent(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReplyForm {
    pub visible: bool,
    pub draft: String,
    pub submitting: bool,

    /// Last submission failure, cleared on the next attempt
    pub error: Option<String>,
}

/// State of all the reply forms of a thread
///
/// Forms are independent of each other: opening one never closes another.
/// A form that was never touched is hidden with an empty draft.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReplyForms(HashMap<ReplyTarget, ReplyForm>);

impl ReplyForms {
    pub fn new() -> ReplyForms {
        ReplyForms(HashMap::new())
    }

    pub fn get(&self, target: &ReplyTarget) -> Option<&ReplyForm> {
        self.0.get(target)
    }

    pub fn form(&self, target: &ReplyTarget) -> ReplyForm {
        self.0.get(target).cloned().unwrap_or_default()
    }

    pub fn form_mut(&mut self, target: ReplyTarget) -> &mut ReplyForm {
        self.0.entry(target).or_default()
    }

    pub fn is_visible(&self, target: &ReplyTarget) -> bool {
        self.0.get(target).map(|f| f.visible).unwrap_or(false)
    }

    /// Returns whether the form is now visible
    pub fn toggle(&mut self, target: ReplyTarget) -> bool {
        let form = self.form_mut(target);
        form.visible = !form.visible;
        form.visible
    }

    pub fn set_draft(&mut self, target: ReplyTarget, draft: String) {
        self.form_mut(target).draft = draft;
    }

    pub fn visible_targets(&self) -> impl Iterator<Item = &ReplyTarget> {
        self.0.iter().filter(|(_, f)| f.visible).map(|(t, _)| t)
    }

    /// Forget the forms attached to comments, as the comments they were
    /// attached to just got rebuilt
    ///
    /// Forms with a submission in flight are kept as is, so that a failure
    /// can still give the user their draft back.
    pub fn reset_comment_forms(&mut self) {
        self.0.retain(|t, f| !t.is_comment() || f.submitting);
    }

    /// Mark every submission as over, for when their answers will never come
    pub fn abandon_submissions(&mut self) {
        for f in self.0.values_mut() {
            f.submitting = false;
        }
    }
}
