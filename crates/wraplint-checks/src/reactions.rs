//! Reaction windows: event references and move-unit discipline.

use std::collections::BTreeSet;

use serde_json::Value;
use wraplint_core::{LintCode, LintItem, RuleTable};

use crate::document::{entry_label, has_field, str_field, DayDocument};

pub fn check_reactions(
    day: &DayDocument<'_>,
    rules: &RuleTable,
    event_ids: &BTreeSet<&str>,
    out: &mut Vec<LintItem>,
) {
    for (i, window) in day.section("reaction_windows").iter().enumerate() {
        let path = format!("reaction_windows[{i}]");
        check_event_ref(window, &path, "reaction window", event_ids, out);
        check_move_unit(window, i, &path, rules, out);
    }
}

/// Shared with evidence items: `event_id` must name a declared event.
pub(crate) fn check_event_ref(
    entry: &Value,
    path: &str,
    what: &str,
    event_ids: &BTreeSet<&str>,
    out: &mut Vec<LintItem>,
) {
    match str_field(entry, "event_id") {
        Some(id) if event_ids.contains(id) => {}
        Some(id) => out.push(LintItem::new(
            LintCode::DanglingEventRef,
            format!("{path}.event_id"),
            format!("{what} references unknown event_id '{id}'"),
        )),
        None => out.push(LintItem::new(
            LintCode::DanglingEventRef,
            format!("{path}.event_id"),
            format!("{what} has no event_id"),
        )),
    }
}

/// Volatility instruments move in points, everything else in percent.
fn check_move_unit(
    window: &Value,
    index: usize,
    path: &str,
    rules: &RuleTable,
    out: &mut Vec<LintItem>,
) {
    let instrument = entry_label(window, index);
    let has_pct = has_field(window, "move_pct");
    let has_pts = has_field(window, "move_pts");
    let message = if rules.is_volatility(&instrument) {
        (has_pct || !has_pts).then(|| {
            format!(
                "{instrument} is a volatility instrument; its move must be move_pts, not move_pct"
            )
        })
    } else {
        (has_pts || !has_pct).then(|| {
            format!("{instrument} move must be move_pct; move_pts is reserved for volatility")
        })
    };
    if let Some(message) = message {
        out.push(LintItem::new(LintCode::ReactionUnitDiscipline, path, message));
    }
}
