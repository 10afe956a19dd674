//! Shows the form rows that make sense for the selected mode.
//!
//! The mode is read from the `<select>` on every change and never cached;
//! rows are re-read from the page too, so inline rows added later follow.

use contracts::shared::dom_contract::{ControllerConfig, DomContract};
use contracts::shared::field_visibility::{FieldGroup, ModeProfile, VisibilityPlan};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlSelectElement};

use super::dom;

/// Binds the form's mode selector, the first configured profile present.
pub fn init_field_visibility(config: &ControllerConfig) {
    let Some(profile) =
        config.active_profile(|field| dom::exists(&config.dom.mode_selector(field)))
    else {
        return;
    };
    let Some(select) = dom::query(&config.dom.mode_selector(profile.selector_field))
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    else {
        return;
    };
    bind_profile(profile, select, config.dom.clone());
}

fn bind_profile(profile: ModeProfile, select: HtmlSelectElement, contract: DomContract) {
    // An existing record keeps its mode: the form stays static.
    if dom::exists(&contract.delete_link_selector) {
        log::info!(
            "`{}` is fixed for this record, hiding the selector",
            profile.selector_field
        );
        let (rows, groups) = read_rows(&contract);
        apply_plan(&contract, &rows, &profile.locked_plan(&groups));
        return;
    }

    // Eager first pass, before the user sees every field at once.
    apply_mode(&profile, &contract, &select.value());

    let target = select.clone();
    dom::listen(&target, "change", move |_| {
        apply_mode(&profile, &contract, &select.value());
    });
}

fn apply_mode(profile: &ModeProfile, contract: &DomContract, mode: &str) {
    let (rows, groups) = read_rows(contract);
    let plan = profile.plan(mode, &groups);
    log::debug!(
        "{} = `{}`: {} visible, {} hidden, editor {:?}",
        profile.selector_field,
        mode,
        plan.visible.len(),
        plan.hidden.len(),
        plan.editor_visible
    );
    apply_plan(contract, &rows, &plan);
}

fn read_rows(contract: &DomContract) -> (Vec<Element>, Vec<FieldGroup>) {
    let rows = dom::query_all(&contract.field_row_selector);
    let groups = rows
        .iter()
        .map(|row| FieldGroup::from_classes(&row.class_name(), &contract.field_class_prefix))
        .collect();
    (rows, groups)
}

fn apply_plan(contract: &DomContract, rows: &[Element], plan: &VisibilityPlan) {
    for (i, row) in rows.iter().enumerate() {
        if plan.visible.contains(&i) {
            dom::set_visible(row, true);
        } else if plan.hidden.contains(&i) {
            dom::set_visible(row, false);
        }
    }
    if let Some(visible) = plan.editor_visible {
        for editor in dom::query_all(&contract.editor_wrapper_selector) {
            dom::set_visible(&editor, visible);
        }
    }
}
