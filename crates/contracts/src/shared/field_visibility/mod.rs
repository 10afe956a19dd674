//! Mode-driven field visibility.
//!
//! A mode selector (`flag`, `operation_type`, ...) decides which form rows
//! are shown. The decision is a pure function of the selected value and the
//! rows present on the page; the `frontend` crate only applies the plan.

pub mod rules;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeProfileId {
    /// Template form, driven by `flag`.
    Template,
    /// Template form variant driven by `operation_type`.
    TemplateOperation,
}

/// The template form shipped with two exclusion tables that differ only in
/// the `subscribe` field. Both are kept; pages pick one through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleVariant {
    Base,
    #[default]
    WithSubscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Everything is shown except the listed fields.
    ShowAllExcept(&'static [&'static str]),
    /// Only the listed fields are shown.
    OnlyShow(&'static [&'static str]),
}

impl Baseline {
    /// A row is never split: it is shown or hidden as a whole, based on any
    /// of the fields it carries.
    pub fn shows<S: AsRef<str>>(&self, names: &[S]) -> bool {
        match self {
            Baseline::ShowAllExcept(excluded) => {
                !names.iter().any(|n| excluded.contains(&n.as_ref()))
            }
            Baseline::OnlyShow(included) => names.iter().any(|n| included.contains(&n.as_ref())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeVisibilityRule {
    pub mode: &'static str,
    pub baseline: Baseline,
    /// Whether the structured-data editor accepts input in this mode.
    pub editor_visible: bool,
}

const NO_FIELDS: &[&str] = &[];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProfile {
    pub id: ModeProfileId,
    /// Logical name of the selector row, e.g. `flag` for `.field-flag select`.
    pub selector_field: &'static str,
    /// Rows hidden together with the selector when the mode is fixed.
    pub locked_hidden: &'static [&'static str],
    rules: &'static [ModeVisibilityRule],
    fields: &'static [&'static str],
    extra_fields: &'static [&'static str],
}

impl ModeProfile {
    pub fn new(id: ModeProfileId, variant: RuleVariant) -> Self {
        match id {
            ModeProfileId::Template => {
                let (table, extra_fields) = match variant {
                    RuleVariant::Base => (rules::TEMPLATE_BASE, NO_FIELDS),
                    RuleVariant::WithSubscription => (
                        rules::TEMPLATE_WITH_SUBSCRIPTION,
                        rules::TEMPLATE_SUBSCRIPTION_FIELDS,
                    ),
                };
                Self {
                    id,
                    selector_field: "flag",
                    locked_hidden: &["url"],
                    rules: table,
                    fields: rules::TEMPLATE_FIELDS,
                    extra_fields,
                }
            }
            ModeProfileId::TemplateOperation => Self {
                id,
                selector_field: "operation_type",
                locked_hidden: &["url"],
                rules: rules::TEMPLATE_OPERATION,
                fields: rules::TEMPLATE_OPERATION_FIELDS,
                extra_fields: NO_FIELDS,
            },
        }
    }

    pub fn rule_for(&self, mode: &str) -> Option<&'static ModeVisibilityRule> {
        self.rules.iter().find(|r| r.mode == mode)
    }

    pub fn modes(&self) -> impl Iterator<Item = &'static str> {
        self.rules.iter().map(|r| r.mode)
    }

    pub fn known_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().chain(self.extra_fields.iter()).copied()
    }

    /// Plan for the rows on the page. An unrecognised mode leaves every row
    /// as rendered and keeps the editor available.
    pub fn plan(&self, mode: &str, groups: &[FieldGroup]) -> VisibilityPlan {
        match self.rule_for(mode) {
            Some(rule) => compute_visibility(rule, self.selector_field, groups),
            None => VisibilityPlan {
                editor_visible: Some(true),
                ..VisibilityPlan::default()
            },
        }
    }

    /// Plan for a record whose mode can no longer change: the selector and
    /// its dependents disappear, everything else stays as rendered.
    pub fn locked_plan(&self, groups: &[FieldGroup]) -> VisibilityPlan {
        let hidden = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| {
                g.contains(self.selector_field)
                    || self.locked_hidden.iter().any(|f| g.contains(f))
            })
            .map(|(i, _)| i)
            .collect();
        VisibilityPlan {
            hidden,
            ..VisibilityPlan::default()
        }
    }

    /// Fields of this form left visible in `mode`, selector included.
    pub fn visible_fields(&self, mode: &str) -> Option<BTreeSet<&'static str>> {
        let rule = self.rule_for(mode)?;
        Some(
            self.known_fields()
                .filter(|f| *f == self.selector_field || rule.baseline.shows(&[*f]))
                .collect(),
        )
    }
}

/// One form row, identified by the logical fields it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldGroup {
    pub names: Vec<String>,
}

impl FieldGroup {
    pub fn from_classes(class_attr: &str, prefix: &str) -> Self {
        Self {
            names: field_names(class_attr, prefix),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// `"form-row errors field-name field-type"` → `["name", "type"]`.
pub fn field_names(class_attr: &str, prefix: &str) -> Vec<String> {
    class_attr
        .split_whitespace()
        .filter_map(|class| class.strip_prefix(prefix))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Row indices to show and hide. Rows in neither set are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityPlan {
    pub visible: BTreeSet<usize>,
    pub hidden: BTreeSet<usize>,
    /// `None` leaves the editor as rendered.
    pub editor_visible: Option<bool>,
}

/// Applies a mode rule to the rows of a form. The selector's own row always
/// stays visible so the user can switch back.
pub fn compute_visibility(
    rule: &ModeVisibilityRule,
    selector_field: &str,
    groups: &[FieldGroup],
) -> VisibilityPlan {
    let mut plan = VisibilityPlan {
        editor_visible: Some(rule.editor_visible),
        ..VisibilityPlan::default()
    };
    for (i, group) in groups.iter().enumerate() {
        if group.contains(selector_field) || rule.baseline.shows(&group.names) {
            plan.visible.insert(i);
        } else {
            plan.hidden.insert(i);
        }
    }
    plan
}
