//! Tab model for the device form: which groups are tabs, which one is active,
//! and how the active tab maps to the URL fragment.

use crate::shared::dom_contract::TAB_SHOWN_EVENT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDefinition {
    pub id: String,
    pub label: String,
    pub content_selector: String,
}

impl TabDefinition {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            content_selector: format!("#{}", id),
        }
    }

    /// Tab for an inline group. Groups without an id cannot be targeted by a
    /// link or a fragment, so they are not tabs.
    pub fn from_group(id: &str, heading: &str) -> Option<Self> {
        if id.trim().is_empty() {
            return None;
        }
        Some(Self::new(id, &tab_label(heading, id)))
    }

    /// Link target as rendered in the strip, e.g. `#config-group`.
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

/// Tabs in document order. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabSet {
    tabs: Vec<TabDefinition>,
}

impl TabSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tab. A repeated id keeps the first definition.
    pub fn push(&mut self, tab: TabDefinition) -> bool {
        if self.contains(&tab.id) {
            return false;
        }
        self.tabs.push(tab);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tabs.iter().any(|t| t.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&TabDefinition> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn first(&self) -> Option<&TabDefinition> {
        self.tabs.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabDefinition> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Tab to open on page load: the one named by the fragment if it exists,
    /// the first tab otherwise.
    pub fn resolve_initial(&self, fragment: Option<&str>) -> Option<&TabDefinition> {
        fragment
            .and_then(fragment_to_id)
            .and_then(|id| self.get(&id))
            .or_else(|| self.first())
    }
}

/// Whether an activation records a new browser history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// User clicked a tab link.
    Push,
    /// Driven by navigation (back/forward, initial load): the URL is already right.
    Skip,
}

/// Result of a successful activation, for the rendering layer to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub tab_id: String,
    /// URL fragment to push, `#` included.
    pub fragment: String,
    pub push_history: bool,
}

impl Activation {
    pub fn tab_shown(&self) -> TabShown {
        TabShown::new(&self.tab_id)
    }
}

/// Currently active tab. At most one at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveTab {
    current: Option<String>,
}

impl ActiveTab {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Makes `id` (with or without a leading `#`) the active tab.
    ///
    /// Unknown ids leave the state untouched and return `None`. A history
    /// push is requested only when the URL does not already name the tab,
    /// so repeating the same activation never stacks history entries.
    pub fn activate(
        &mut self,
        tabs: &TabSet,
        id: &str,
        mode: HistoryMode,
        current_fragment: Option<&str>,
    ) -> Option<Activation> {
        let id = fragment_to_id(id)?;
        let tab = tabs.get(&id)?;

        let already_in_url = current_fragment
            .and_then(fragment_to_id)
            .is_some_and(|current| current == tab.id);

        self.current = Some(tab.id.clone());
        Some(Activation {
            tab_id: tab.id.clone(),
            fragment: id_to_fragment(&tab.id),
            push_history: mode == HistoryMode::Push && !already_in_url,
        })
    }
}

/// Payload of the `tabshown` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabShown {
    #[serde(rename = "type")]
    pub kind: String,
    /// Link target form (`#config-group`), same as the tab's `href`.
    #[serde(rename = "tabId")]
    pub tab_id: String,
}

impl TabShown {
    pub fn new(id: &str) -> Self {
        Self {
            kind: TAB_SHOWN_EVENT.to_string(),
            tab_id: format!("#{}", id),
        }
    }
}

/// Which tab links and panels carry the current marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerPlan {
    pub links: Vec<bool>,
    pub panels: Vec<bool>,
}

/// Marks the first link whose `href` targets `tab_id` and the first panel
/// with that id; everything else is cleared. Never more than one of each.
pub fn plan_markers(link_hrefs: &[Option<String>], panel_ids: &[String], tab_id: &str) -> MarkerPlan {
    let link = link_hrefs.iter().position(|href| {
        href.as_deref()
            .and_then(fragment_to_id)
            .is_some_and(|target| target == tab_id)
    });
    let panel = panel_ids.iter().position(|id| id == tab_id);
    MarkerPlan {
        links: (0..link_hrefs.len()).map(|i| Some(i) == link).collect(),
        panels: (0..panel_ids.len()).map(|i| Some(i) == panel).collect(),
    }
}

/// `"#config%2Dgroup"` → `Some("config-group")`; empty fragments → `None`.
pub fn fragment_to_id(fragment: &str) -> Option<String> {
    let raw = fragment.trim().trim_start_matches('#');
    if raw.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    Some(decoded)
}

pub fn id_to_fragment(id: &str) -> String {
    format!("#{}", urlencoding::encode(id))
}

/// Tab label from a group heading; headings often carry template whitespace.
pub fn tab_label(heading: &str, fallback_id: &str) -> String {
    let label = heading.split_whitespace().collect::<Vec<_>>().join(" ");
    if label.is_empty() {
        fallback_id.to_string()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device_tabs() -> TabSet {
        let mut tabs = TabSet::new();
        tabs.push(TabDefinition::new("overview-group", "Overview"));
        tabs.push(TabDefinition::new("config-group", "Configuration"));
        tabs.push(TabDefinition::new("templates-group", "Templates"));
        tabs
    }

    #[test]
    fn duplicate_ids_keep_first_definition() {
        let mut tabs = device_tabs();
        assert!(!tabs.push(TabDefinition::new("config-group", "Other")));
        assert_eq!(tabs.len(), 3);
        assert_eq!(tabs.get("config-group").unwrap().label, "Configuration");
    }

    #[test]
    fn definition_targets() {
        let tab = TabDefinition::new("config-group", "Configuration");
        assert_eq!(tab.href(), "#config-group");
        assert_eq!(tab.content_selector, "#config-group");
    }

    #[test]
    fn initial_tab_without_fragment_is_first() {
        let tabs = device_tabs();
        assert_eq!(tabs.resolve_initial(None).unwrap().id, "overview-group");
        assert_eq!(tabs.resolve_initial(Some("")).unwrap().id, "overview-group");
        assert_eq!(tabs.resolve_initial(Some("#")).unwrap().id, "overview-group");
    }

    #[test]
    fn initial_tab_follows_fragment() {
        let tabs = device_tabs();
        assert_eq!(
            tabs.resolve_initial(Some("#templates-group")).unwrap().id,
            "templates-group"
        );
        assert_eq!(
            tabs.resolve_initial(Some("#missing")).unwrap().id,
            "overview-group"
        );
    }

    #[test]
    fn initial_tab_on_empty_set() {
        assert!(TabSet::new().resolve_initial(Some("#config-group")).is_none());
    }

    #[test]
    fn any_activation_sequence_leaves_one_current() {
        let tabs = device_tabs();
        let mut active = ActiveTab::default();
        for id in ["config-group", "#templates-group", "missing", "overview-group", "config-group"] {
            active.activate(&tabs, id, HistoryMode::Push, None);
            assert!(active.current().is_some());
        }
        assert_eq!(active.current(), Some("config-group"));
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let tabs = device_tabs();
        let mut active = ActiveTab::default();
        active.activate(&tabs, "config-group", HistoryMode::Push, None);
        assert_eq!(active.activate(&tabs, "#nope", HistoryMode::Push, None), None);
        assert_eq!(active.activate(&tabs, "", HistoryMode::Push, None), None);
        assert_eq!(active.current(), Some("config-group"));
    }

    #[test]
    fn activation_fragment_names_the_tab() {
        let tabs = device_tabs();
        let mut active = ActiveTab::default();
        let activation = active
            .activate(&tabs, "#templates-group", HistoryMode::Push, Some("#overview-group"))
            .unwrap();
        assert_eq!(activation.fragment, "#templates-group");
        assert_eq!(fragment_to_id(&activation.fragment).as_deref(), Some("templates-group"));
        assert!(activation.push_history);
    }

    #[test]
    fn repeated_activation_does_not_push_twice() {
        let tabs = device_tabs();
        let mut active = ActiveTab::default();
        let first = active
            .activate(&tabs, "config-group", HistoryMode::Push, None)
            .unwrap();
        assert!(first.push_history);
        let again = active
            .activate(&tabs, "config-group", HistoryMode::Push, Some(&first.fragment))
            .unwrap();
        assert!(!again.push_history);
        assert_eq!(first.tab_id, again.tab_id);
    }

    #[test]
    fn navigation_never_pushes() {
        let tabs = device_tabs();
        let mut active = ActiveTab::default();
        let activation = active
            .activate(&tabs, "#config-group", HistoryMode::Skip, Some("#overview-group"))
            .unwrap();
        assert!(!activation.push_history);
    }

    #[test]
    fn fragments_are_percent_decoded() {
        assert_eq!(fragment_to_id("#vpn%20group").as_deref(), Some("vpn group"));
        assert_eq!(id_to_fragment("vpn group"), "#vpn%20group");
        assert_eq!(fragment_to_id("config-group").as_deref(), Some("config-group"));
        assert_eq!(fragment_to_id("  "), None);
    }

    #[test]
    fn tab_shown_payload_shape() {
        let payload = serde_json::to_value(TabShown::new("config-group")).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({"type": "tabshown", "tabId": "#config-group"})
        );
    }

    #[test]
    fn labels_collapse_whitespace() {
        assert_eq!(tab_label("\n   Device\n  templates ", "x"), "Device templates");
        assert_eq!(tab_label("   ", "templates-group"), "templates-group");
    }

    fn current(marks: &[bool]) -> Vec<usize> {
        marks
            .iter()
            .enumerate()
            .filter(|(_, m)| **m)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn one_link_marked_among_duplicate_and_encoded_targets() {
        let hrefs = vec![
            Some("#overview-group".to_string()),
            Some("#config-group".to_string()),
            Some("#config-group".to_string()),
            Some("#vpn%20group".to_string()),
            None,
        ];
        let panels = vec![
            "overview-group".to_string(),
            "config-group".to_string(),
            "vpn group".to_string(),
        ];

        let plan = plan_markers(&hrefs, &panels, "config-group");
        assert_eq!(current(&plan.links), vec![1]);
        assert_eq!(current(&plan.panels), vec![1]);

        let plan = plan_markers(&hrefs, &panels, "vpn group");
        assert_eq!(current(&plan.links), vec![3]);
        assert_eq!(current(&plan.panels), vec![2]);
    }

    #[test]
    fn marker_plan_clears_everything_for_missing_targets() {
        let hrefs = vec![Some("#overview-group".to_string())];
        let panels = vec!["overview-group".to_string()];
        let plan = plan_markers(&hrefs, &panels, "templates-group");
        assert!(current(&plan.links).is_empty());
        assert!(current(&plan.panels).is_empty());
        assert_eq!(plan.links.len(), 1);
        assert_eq!(plan.panels.len(), 1);
    }

    #[test]
    fn page_load_without_fragment_marks_overview() {
        let tabs = device_tabs();
        let hrefs: Vec<Option<String>> = tabs.iter().map(|t| Some(t.href())).collect();
        let panels: Vec<String> = tabs.iter().map(|t| t.id.clone()).collect();

        let mut active = ActiveTab::default();
        let initial = tabs.resolve_initial(None).unwrap();
        let activation = active
            .activate(&tabs, &initial.id, HistoryMode::Skip, None)
            .unwrap();
        assert!(!activation.push_history);

        let plan = plan_markers(&hrefs, &panels, &activation.tab_id);
        assert_eq!(current(&plan.links), vec![0]);
        assert_eq!(current(&plan.panels), vec![0]);
        assert_eq!(panels[0], "overview-group");
    }

    #[test]
    fn groups_without_id_are_not_tabs() {
        assert!(TabDefinition::from_group("", "Templates").is_none());
        assert!(TabDefinition::from_group("  ", "Templates").is_none());

        let tab = TabDefinition::from_group("templates-group", "\n  Templates ").unwrap();
        assert_eq!(tab.label, "Templates");
        assert_eq!(tab.id, "templates-group");
        assert_eq!(
            TabDefinition::from_group("vpn-group", "").unwrap().label,
            "vpn-group"
        );
    }
}
