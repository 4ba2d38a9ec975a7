use llmit_client::{ReplyTarget, ThreadAction};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ReplyFormProps {
    pub target: ReplyTarget,
    pub form: llmit_client::ReplyForm,
    pub on_action: Callback<ThreadAction>,
}

#[function_component(ReplyForm)]
pub fn reply_form(p: &ReplyFormProps) -> Html {
    let target = p.target;
    let on_input = p.on_action.reform(move |e: InputEvent| {
        let elt: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
        ThreadAction::EditDraft(target, elt.value())
    });
    let on_submit = p.on_action.reform(move |e: SubmitEvent| {
        e.prevent_default();
        ThreadAction::SubmitReply(target)
    });
    let (class, placeholder) = match target {
        ReplyTarget::Post(_) => ("reply-form", "Write your reply..."),
        ReplyTarget::Comment { .. } => ("reply-comment-form", "Write your reply to this comment..."),
    };

    html! {
        <form
            class={ class }
            style={ (!p.form.visible).then(|| "display: none;") }
            onsubmit={ on_submit }
        >
            <textarea
                class="reply-content"
                { placeholder }
                value={ p.form.draft.clone() }
                oninput={ on_input }
                disabled={ p.form.submitting }
            />
            <button type="submit" disabled={ p.form.submitting }>
                { if p.form.submitting { "Submitting..." } else { "Submit Reply" } }
            </button>
            if let Some(err) = &p.form.error {
                <p class="error">{ err }</p>
            }
        </form>
    }
}
