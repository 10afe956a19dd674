use contracts::shared::tabs::{fragment_to_id, HistoryMode, TabDefinition, TabSet};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::controller::TabController;
use crate::shared::dom;

/// Links appended to the tab strip, one `<li>` per tab.
#[component]
pub fn TabStrip(tabs: Vec<TabDefinition>, controller: TabController) -> impl IntoView {
    let link_class = controller.link_class();

    tabs.into_iter()
        .map(|tab| {
            let href = tab.href();
            let target = tab.id;
            let label = tab.label;
            view! {
                <li>
                    <a
                        class=link_class.clone()
                        href=href
                        on:click=move |ev| {
                            ev.prevent_default();
                            controller.activate(&target, HistoryMode::Push);
                        }
                    >
                        {label}
                    </a>
                </li>
            }
        })
        .collect_view()
}

/// Fills the strip with links for every tab the server did not render,
/// and wires the links it did render.
pub fn render_strip(strip_selector: &str, controller: TabController) {
    let Some(strip) = dom::query(strip_selector) else {
        log::debug!("no tab strip `{}`", strip_selector);
        return;
    };

    let existing = dom::query_all_in(&strip, "a[href]");
    let existing_hrefs: Vec<String> = existing
        .iter()
        .filter_map(|link| link.get_attribute("href"))
        .collect();

    for link in existing {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        dom::listen(&link, "click", move |ev| {
            ev.prevent_default();
            controller.activate(&href, HistoryMode::Push);
        });
    }

    let missing = missing_tabs(&controller.tabs(), &existing_hrefs);
    if missing.is_empty() {
        return;
    }
    let Ok(strip) = strip.dyn_into::<HtmlElement>() else {
        return;
    };
    log::debug!("rendering {} tab links", missing.len());
    leptos::mount::mount_to(strip, move || {
        view! { <TabStrip tabs=missing controller=controller /> }
    })
    .forget();
}

/// Tabs without a link among `hrefs`, in tab order.
pub fn missing_tabs(tabs: &TabSet, hrefs: &[String]) -> Vec<TabDefinition> {
    let linked: Vec<String> = hrefs.iter().filter_map(|h| fragment_to_id(h)).collect();
    tabs.iter()
        .filter(|tab| !linked.contains(&tab.id))
        .cloned()
        .collect()
}
