//! Rule tables for every mode selector the admin forms carry.

use super::{Baseline, ModeVisibilityRule};

/// Template form, without the subscription fields.
pub const TEMPLATE_BASE: &[ModeVisibilityRule] = &[
    ModeVisibilityRule {
        mode: "private",
        baseline: Baseline::ShowAllExcept(&[
            "url",
            "variable",
            "description",
            "notes",
            "config",
            "key",
        ]),
        editor_visible: true,
    },
    ModeVisibilityRule {
        mode: "public",
        baseline: Baseline::ShowAllExcept(&["url", "config", "key"]),
        editor_visible: true,
    },
    ModeVisibilityRule {
        mode: "shared_secret",
        baseline: Baseline::ShowAllExcept(&["url", "config"]),
        editor_visible: true,
    },
    ModeVisibilityRule {
        mode: "import",
        baseline: Baseline::OnlyShow(IMPORT_FIELDS),
        editor_visible: false,
    },
];

/// Template form where shared templates expose `subscribe`.
pub const TEMPLATE_WITH_SUBSCRIPTION: &[ModeVisibilityRule] = &[
    ModeVisibilityRule {
        mode: "private",
        baseline: Baseline::ShowAllExcept(&[
            "url",
            "variable",
            "description",
            "notes",
            "config",
            "key",
            "subscribe",
        ]),
        editor_visible: true,
    },
    ModeVisibilityRule {
        mode: "public",
        baseline: Baseline::ShowAllExcept(&["url", "config", "key", "subscribe"]),
        editor_visible: true,
    },
    ModeVisibilityRule {
        mode: "shared_secret",
        baseline: Baseline::ShowAllExcept(&["url", "config", "subscribe"]),
        editor_visible: true,
    },
    ModeVisibilityRule {
        mode: "import",
        baseline: Baseline::OnlyShow(IMPORT_FIELDS),
        editor_visible: false,
    },
];

const IMPORT_FIELDS: &[&str] = &[
    "name",
    "type",
    "backend",
    "vpn",
    "auto_cert",
    "tags",
    "config",
    "description",
    "notes",
    "key",
    "variable",
];

/// Operation-type selector: `-` until the user picks what to do. No operation
/// takes free-form structured input yet, so the editor stays hidden.
pub const TEMPLATE_OPERATION: &[ModeVisibilityRule] = &[
    ModeVisibilityRule {
        mode: "-",
        baseline: Baseline::OnlyShow(&["name"]),
        editor_visible: false,
    },
    ModeVisibilityRule {
        mode: "new",
        baseline: Baseline::ShowAllExcept(&["url", "key"]),
        editor_visible: false,
    },
    ModeVisibilityRule {
        mode: "import",
        baseline: Baseline::OnlyShow(&["name", "url", "key"]),
        editor_visible: false,
    },
];

pub const TEMPLATE_FIELDS: &[&str] = &[
    "name",
    "type",
    "backend",
    "vpn",
    "auto_cert",
    "tags",
    "default",
    "flag",
    "url",
    "key",
    "description",
    "notes",
    "variable",
    "config",
];

pub const TEMPLATE_SUBSCRIPTION_FIELDS: &[&str] = &["subscribe"];

pub const TEMPLATE_OPERATION_FIELDS: &[&str] = &[
    "operation_type",
    "name",
    "type",
    "backend",
    "config",
    "url",
    "key",
];
