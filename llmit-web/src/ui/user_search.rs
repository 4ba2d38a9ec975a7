use llmit_client::{api, UserSearch as SearchState};
use yew::prelude::*;

use crate::{util, Config};

#[derive(Clone, PartialEq, Properties)]
pub struct UserSearchProps {
    pub config: Config,
}

#[function_component(UserSearch)]
pub fn user_search(p: &UserSearchProps) -> Html {
    let search = use_mut_ref(SearchState::new);
    let rerender = use_force_update();
    let on_input = {
        let config = p.config.clone();
        let search = search.clone();
        let rerender = rerender.clone();
        Callback::from(move |e: InputEvent| {
            let elt: web_sys::HtmlInputElement = e.target_unchecked_into();
            let query = search.borrow_mut().input(&elt.value());
            let query = match query {
                Some(q) => q,
                None => {
                    rerender.force_update();
                    return;
                }
            };
            let config = config.clone();
            let search = search.clone();
            let rerender = rerender.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let res = crate::api::search_users(&config, &query).await;
                if search.borrow_mut().finish(&query, res) {
                    rerender.force_update();
                }
            });
        })
    };
    let state = search.borrow();
    let result_items = state
        .results()
        .iter()
        .map(|u| {
            let href = api::profile_path(&u.username);
            let on_click = {
                let href = href.clone();
                Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    util::navigate_to(&href);
                })
            };
            html! {
                <li class="search-result p-2">
                    <a class="user-profile-link" { href } onclick={ on_click }>
                        { &u.username }
                    </a>
                </li>
            }
        })
        .collect::<Html>();
    let is_shown = (!state.results().is_empty()).then(|| "search-results-shown");

    html! {
        <div class="flex-fill">
            <div class="search-bar m-3">
                <input
                    type="text"
                    id="user-search"
                    class="w-100 h-100 px-3"
                    placeholder="Search users"
                    aria-label="Search users"
                    oninput={ on_input }
                />
                <ul class={ classes!("search-results", is_shown) }>
                    { result_items }
                </ul>
            </div>
        </div>
    }
}
