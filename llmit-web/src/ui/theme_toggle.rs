use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ThemeToggleProps {
    pub night_mode: bool,
    pub on_toggle: Callback<()>,
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(p: &ThemeToggleProps) -> Html {
    let (icon, title) = match p.night_mode {
        true => ("bi-sun-fill", "Switch to day mode"),
        false => ("bi-moon-fill", "Switch to night mode"),
    };
    html! {
        <button
            type="button"
            id="night-mode-toggle"
            class={ classes!("btn", "btn-light", "btn-circle", "m-3", "bi-btn", icon, "fs-6") }
            { title }
            aria-pressed={ if p.night_mode { "true" } else { "false" } }
            onclick={ p.on_toggle.reform(|_| ()) }
        >
        </button>
    }
}
