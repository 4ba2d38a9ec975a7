use llmit_client::{api::Sort, ViewState};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ViewControlsProps {
    pub view: ViewState,
    /// Number of posts on the current page, to know whether a next one exists
    pub received: usize,
    pub on_navigate: Callback<ViewState>,
}

#[function_component(ViewControls)]
pub fn view_controls(p: &ViewControlsProps) -> Html {
    let navigate = |f: fn(ViewState) -> ViewState| {
        let view = p.view.clone();
        p.on_navigate.reform(move |_: MouseEvent| f(view.clone()))
    };
    let sort_items = [Sort::Top, Sort::New].into_iter().map(|sort| {
        let is_active = (p.view.sort == sort).then(|| "active");
        let view = p.view.clone();
        let on_click = p.on_navigate.reform(move |_| view.clone().set_sort(sort));
        html! {
            <li class="nav-item">
                <button type="button" class={ classes!("nav-link", is_active) } onclick={ on_click }>
                    { match sort {
                        Sort::Top => "Top",
                        Sort::New => "New",
                    } }
                </button>
            </li>
        }
    });

    html! {
        <div class="view-controls d-flex align-items-center">
            if !p.view.is_frontpage() {
                <button type="button" id="back-btn" class="btn" onclick={ navigate(ViewState::back_to_frontpage) }>
                    { "Back to frontpage" }
                </button>
            }
            <h2 id="group-title" class="flex-fill">{ &p.view.group }</h2>
            <ul class="nav">
                { for sort_items }
            </ul>
            <div class="pagination">
                <button
                    type="button"
                    id="prev-page"
                    class="btn"
                    disabled={ !p.view.has_previous_page() }
                    onclick={ navigate(ViewState::previous_page) }
                >
                    { "Previous" }
                </button>
                <span class="page-number">{ format!("Page {}", p.view.page) }</span>
                <button
                    type="button"
                    id="next-page"
                    class="btn"
                    disabled={ !p.view.has_next_page(p.received) }
                    onclick={ navigate(ViewState::next_page) }
                >
                    { "Next" }
                </button>
            </div>
        </div>
    }
}
