pub mod layout;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

use crate::layout::tabs::init_tabs;
use crate::shared::config::{load_config, log_level};
use crate::shared::dom;
use crate::shared::field_visibility::init_field_visibility;

/// Wires both controllers to the server-rendered form. They share nothing
/// but the page: each one reads and writes the DOM on its own.
#[wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();

    // The configuration block is part of the page, read it once parsed.
    dom::on_dom_ready(|| {
        let loaded = load_config();
        let config = loaded.clone().unwrap_or_default();

        // initializes logging using the `log` crate
        _ = console_log::init_with_level(log_level(&config));
        if let Err(err) = loaded {
            log::warn!("{}; using defaults", err);
        }

        init_field_visibility(&config);
        init_tabs(&config);
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
