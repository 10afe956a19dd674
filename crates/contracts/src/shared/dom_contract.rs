//! DOM naming contract shared with the server-rendered admin templates.
//!
//! The controllers never own markup: they find it by the selectors below.
//! Every value has a default matching the stock templates and can be
//! overridden per page from a JSON configuration block.

use crate::shared::field_visibility::{ModeProfile, ModeProfileId, RuleVariant};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Id of the `<script type="application/json">` block carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "netconfig-admin-config";

/// Name of the custom event broadcast on every tab activation.
pub const TAB_SHOWN_EVENT: &str = "tabshown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomContract {
    // ── Tabs ─────────────────────────────────────────────────────────────
    /// Leading, non-repeated section of the form.
    pub overview_selector: String,
    /// Id assigned to the overview section when it becomes a tab panel.
    pub overview_id: String,
    pub overview_label: String,
    /// Repeated / inline field-groups, one tab each.
    pub group_selector: String,
    /// Heading inside a group, relative to the group element.
    pub group_heading_selector: String,
    /// The `<ul>` receiving the tab links.
    pub tab_strip_selector: String,
    pub tab_link_selector: String,
    pub tab_link_class: String,
    pub tabs_loading_selector: String,
    pub loading_overlay_selector: String,
    pub overlay_fade_ms: u32,
    /// Present only on "add" pages, where tabs are skipped entirely.
    pub creation_marker_selector: String,
    pub content_class: String,
    pub current_class: String,

    // ── Field visibility ────────────────────────────────────────────────
    pub field_row_selector: String,
    pub field_class_prefix: String,
    pub editor_wrapper_selector: String,
    /// Present only when editing an existing record.
    pub delete_link_selector: String,
}

impl Default for DomContract {
    fn default() -> Self {
        Self {
            overview_selector: "#device_form > div > fieldset.module.aligned".to_string(),
            overview_id: "overview-group".to_string(),
            overview_label: "Overview".to_string(),
            group_selector: "#device_form > div > div.inline-group".to_string(),
            group_heading_selector:
                ":scope > fieldset.module > h2, :scope > .tabular > fieldset.module > h2"
                    .to_string(),
            tab_strip_selector: "#tabs-container ul".to_string(),
            tab_link_selector: "ul.tabs a".to_string(),
            tab_link_class: "button".to_string(),
            tabs_loading_selector: ".tabs-loading".to_string(),
            loading_overlay_selector: "#loading-overlay".to_string(),
            overlay_fade_ms: 400,
            creation_marker_selector: ".add-device".to_string(),
            content_class: "tab-content".to_string(),
            current_class: "current".to_string(),
            field_row_selector: ".form-row".to_string(),
            field_class_prefix: "field-".to_string(),
            editor_wrapper_selector: ".jsoneditor-wrapper".to_string(),
            delete_link_selector: ".deletelink".to_string(),
        }
    }
}

impl DomContract {
    /// Selector of the row holding a logical field, e.g. `.field-flag`.
    pub fn field_row(&self, field: &str) -> String {
        format!(".{}{}", self.field_class_prefix, field)
    }

    /// Selector of the `<select>` driving a mode profile.
    pub fn mode_selector(&self, field: &str) -> String {
        format!("{} select", self.field_row(field))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub dom: DomContract,
    /// Mode profiles probed on the page, in order.
    pub profiles: Vec<ModeProfileId>,
    pub rule_variant: RuleVariant,
    pub log_level: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dom: DomContract::default(),
            profiles: vec![ModeProfileId::Template, ModeProfileId::TemplateOperation],
            rule_variant: RuleVariant::default(),
            log_level: "debug".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Parses a configuration block. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).context("invalid admin controller configuration")
    }

    /// First listed profile whose selector field is on the page. A form has
    /// a single mode selector; binding more would let each hide the other's rows.
    pub fn active_profile<F>(&self, has_selector: F) -> Option<ModeProfile>
    where
        F: Fn(&str) -> bool,
    {
        self.profiles
            .iter()
            .map(|id| ModeProfile::new(*id, self.rule_variant))
            .find(|profile| has_selector(profile.selector_field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_gives_defaults() {
        assert_eq!(ControllerConfig::from_json("  ").unwrap(), ControllerConfig::default());
        assert_eq!(ControllerConfig::from_json("{}").unwrap(), ControllerConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = ControllerConfig::from_json(
            r##"{"dom": {"overview_selector": "#template_form > div > fieldset"}, "rule_variant": "base"}"##,
        )
        .unwrap();
        assert_eq!(config.dom.overview_selector, "#template_form > div > fieldset");
        assert_eq!(config.dom.current_class, "current");
        assert_eq!(config.rule_variant, RuleVariant::Base);
        assert_eq!(config.profiles.len(), 2);
    }

    #[test]
    fn malformed_block_is_an_error() {
        let err = ControllerConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("configuration"));
    }

    #[test]
    fn field_selectors() {
        let dom = DomContract::default();
        assert_eq!(dom.field_row("flag"), ".field-flag");
        assert_eq!(dom.mode_selector("operation_type"), ".field-operation_type select");
    }

    #[test]
    fn only_the_first_present_profile_is_active() {
        let config = ControllerConfig::default();
        let both = config.active_profile(|_| true).unwrap();
        assert_eq!(both.id, ModeProfileId::Template);

        let operation = config
            .active_profile(|field| field == "operation_type")
            .unwrap();
        assert_eq!(operation.id, ModeProfileId::TemplateOperation);

        assert!(config.active_profile(|_| false).is_none());
    }

    #[test]
    fn profile_order_follows_configuration() {
        let config = ControllerConfig::from_json(
            r#"{"profiles": ["template_operation", "template"], "rule_variant": "base"}"#,
        )
        .unwrap();
        let profile = config.active_profile(|_| true).unwrap();
        assert_eq!(profile.id, ModeProfileId::TemplateOperation);
    }
}
