//! Tabbed navigation for the device form.
//!
//! Contents:
//! - `controller` - active tab state, markers, `tabshown` and history
//! - `strip` - Leptos-rendered tab links
//!
//! The server renders one long form; the overview fieldset and each inline
//! group become a tab panel, and `#<group id>` in the URL selects the tab.

pub mod controller;
pub mod strip;

pub use controller::TabController;
pub use strip::TabStrip;

use contracts::shared::dom_contract::ControllerConfig;
use contracts::shared::tabs::{HistoryMode, TabDefinition, TabSet};

use crate::shared::dom;

/// Builds the tabs and binds navigation. Returns `None` on creation pages,
/// where the record has no groups yet and the form stays as rendered.
pub fn init_tabs(config: &ControllerConfig) -> Option<TabController> {
    let contract = &config.dom;
    if dom::exists(&contract.creation_marker_selector) {
        log::info!("creation page, tabs disabled");
        return None;
    }

    let mut tabs = TabSet::new();

    if let Some(overview) = dom::query(&contract.overview_selector) {
        dom::add_class(&overview, &contract.content_class);
        overview.set_id(&contract.overview_id);
        tabs.push(TabDefinition::new(
            &contract.overview_id,
            &contract.overview_label,
        ));
    }

    for group in dom::query_all(&contract.group_selector) {
        let heading = dom::query_all_in(&group, &contract.group_heading_selector)
            .into_iter()
            .filter_map(|h| h.text_content())
            .collect::<Vec<_>>()
            .join(" ");
        let Some(tab) = TabDefinition::from_group(&group.id(), &heading) else {
            continue;
        };
        dom::add_class(&group, &contract.content_class);
        tabs.push(tab);
    }

    log::debug!("{} tabs", tabs.len());
    let controller = TabController::new(tabs, contract.clone());

    strip::render_strip(&contract.tab_strip_selector, controller);
    for placeholder in dom::query_all(&contract.tabs_loading_selector) {
        dom::set_visible(&placeholder, false);
    }

    // Back/forward: the URL is already right, only the markers follow.
    dom::listen_window("hashchange", move |_| {
        if let Some(fragment) = dom::location_hash() {
            controller.activate(&fragment, HistoryMode::Skip);
        }
    });

    let overlay_selector = contract.loading_overlay_selector.clone();
    let fade_ms = contract.overlay_fade_ms;
    dom::on_load(move || {
        let fragment = dom::location_hash();
        if let Some(tab) = controller.initial_tab(fragment.as_deref()) {
            controller.activate(&tab.id, HistoryMode::Skip);
        }
        if let Some(overlay) = dom::query(&overlay_selector) {
            dom::fade_out(&overlay, fade_ms);
        }
    });

    Some(controller)
}
