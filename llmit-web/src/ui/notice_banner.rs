use llmit_client::{Notice, NoticeLevel};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct NoticeBannerProps {
    pub notice: Notice,
    pub on_dismiss: Callback<()>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(p: &NoticeBannerProps) -> Html {
    let level = match p.notice.level {
        NoticeLevel::Info => "notice-info",
        NoticeLevel::Error => "notice-error",
    };

    html! {
        <div
            class={ classes!("notice", level, "d-flex", "align-items-center") }
            role={ if p.notice.level == NoticeLevel::Error { "alert" } else { "status" } }
        >
            <div class="flex-fill m-2">{ &p.notice.text }</div>
            <button
                type="button"
                class="btn-close m-2"
                title="Dismiss"
                onclick={ p.on_dismiss.reform(|_| ()) }
            >
            </button>
        </div>
    }
}
