use std::str::FromStr;

use chrono::TimeZone;
use llmit_client::api::Time;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = "
    export function get_timezone() {
        return Intl.DateTimeFormat().resolvedOptions().timeZone;
    }
")]
extern "C" {
    fn get_timezone() -> String;
}

lazy_static::lazy_static! {
    static ref LOCAL_TZ: chrono_tz::Tz = {
        chrono_tz::Tz::from_str(&get_timezone()).unwrap_or_else(|_| {
            tracing::warn!("host js timezone is not in chrono-tz database, falling back to UTC");
            chrono_tz::UTC
        })
    };
}

pub fn local_tz() -> chrono_tz::Tz {
    *LOCAL_TZ
}

/// Server timestamps are UTC without any timezone marker
pub fn format_time(t: &Time) -> String {
    chrono::Utc
        .from_utc_datetime(t)
        .with_timezone(&local_tz())
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Leave the client for another page, eg. a user profile
pub fn navigate_to(path: &str) {
    let res = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))
        .and_then(|w| w.location().set_href(path));
    if let Err(err) = res {
        tracing::error!(?err, path, "failed navigating");
    }
}

pub fn apply_night_mode(enabled: bool) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    let body = match body {
        Some(b) => b,
        None => {
            tracing::warn!("no document body to apply the theme to");
            return;
        }
    };
    if let Err(err) = body.class_list().toggle_with_force("night-mode", enabled) {
        tracing::error!(?err, "failed applying theme");
    }
}
