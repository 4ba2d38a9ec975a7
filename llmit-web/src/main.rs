use std::time::Duration;

use gloo_storage::{LocalStorage, Storage};

mod api;
mod ui;
mod util;

/// Local storage key overriding the API host, for when the client is not
/// served by the forum server itself
const KEY_API_HOST: &str = "api-host";

// If the server does not answer within REQUEST_TIMEOUT, give up on the request
const REQUEST_TIMEOUT_SECS: u64 = 15;

lazy_static::lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: String,
    pub timeout: Duration,
}

impl Config {
    fn load() -> Config {
        let host = match LocalStorage::get::<String>(KEY_API_HOST) {
            Ok(host) => {
                tracing::info!(%host, "using api host override from local storage");
                host
            }
            Err(_) => util::page_origin(),
        };
        Config {
            host: String::from(host.trim_end_matches('/')),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<ui::App>::with_props(ui::AppProps {
        config: Config::load(),
    })
    .render();
}
