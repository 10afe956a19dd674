use contracts::shared::dom_contract::{DomContract, TAB_SHOWN_EVENT};
use contracts::shared::tabs::{plan_markers, ActiveTab, HistoryMode, TabDefinition, TabSet};
use leptos::prelude::*;

use crate::shared::dom;

/// Owns the tab set and the single active tab of the device form.
///
/// `Copy` so it can be captured by every click handler; state lives in
/// Leptos stored values.
#[derive(Clone, Copy)]
pub struct TabController {
    tabs: StoredValue<TabSet>,
    active: StoredValue<ActiveTab>,
    contract: StoredValue<DomContract>,
}

impl TabController {
    pub fn new(tabs: TabSet, contract: DomContract) -> Self {
        Self {
            tabs: StoredValue::new(tabs),
            active: StoredValue::new(ActiveTab::default()),
            contract: StoredValue::new(contract),
        }
    }

    pub fn tabs(&self) -> TabSet {
        self.tabs.get_value()
    }

    pub fn link_class(&self) -> String {
        self.contract.with_value(|c| c.tab_link_class.clone())
    }

    /// Tab to open when the page finishes loading.
    pub fn initial_tab(&self, fragment: Option<&str>) -> Option<TabDefinition> {
        self.tabs
            .with_value(|tabs| tabs.resolve_initial(fragment).cloned())
    }

    /// Marks `id` as the current tab and panel, notifies listeners, and
    /// records the fragment in history when `mode` asks for it.
    ///
    /// Unknown ids are ignored. Returns whether a tab was activated.
    pub fn activate(&self, id: &str, mode: HistoryMode) -> bool {
        let current_fragment = dom::location_hash();
        let tabs = self.tabs.get_value();
        let mut active = self.active.get_value();
        let Some(activation) = active.activate(&tabs, id, mode, current_fragment.as_deref())
        else {
            log::debug!("no tab for `{}`", id);
            return false;
        };
        self.active.set_value(active);

        log::debug!(
            "activate tab `{}` (push history: {})",
            activation.tab_id,
            activation.push_history
        );

        self.contract.with_value(|contract| {
            self.apply_markers(contract, &activation.tab_id);
        });

        match serde_wasm_bindgen::to_value(&activation.tab_shown()) {
            Ok(detail) => dom::dispatch_custom(TAB_SHOWN_EVENT, &detail),
            Err(err) => log::warn!("cannot encode {} payload: {}", TAB_SHOWN_EVENT, err),
        }

        if activation.push_history {
            dom::push_fragment(&activation.fragment);
        }
        true
    }

    fn apply_markers(&self, contract: &DomContract, tab_id: &str) {
        let current = &contract.current_class;
        let links = dom::query_all(&contract.tab_link_selector);
        let panels = dom::query_all(&format!(".{}", contract.content_class));

        let hrefs: Vec<Option<String>> = links.iter().map(|l| l.get_attribute("href")).collect();
        let ids: Vec<String> = panels.iter().map(|p| p.id()).collect();
        let plan = plan_markers(&hrefs, &ids, tab_id);

        for (element, marked) in links
            .iter()
            .zip(plan.links)
            .chain(panels.iter().zip(plan.panels))
        {
            if marked {
                dom::add_class(element, current);
            } else {
                dom::remove_class(element, current);
            }
        }
    }
}
