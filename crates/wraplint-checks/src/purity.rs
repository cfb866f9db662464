//! Forbidden-vocabulary scan over a single text field.

use wraplint_core::{LintCode, LintItem, RuleTable};

/// Scan `text` and report one finding for the field listing every distinct hit.
pub fn check_text(rules: &RuleTable, path: &str, text: &str, out: &mut Vec<LintItem>) {
    let hits = rules.scan_forbidden(text);
    if hits.is_empty() {
        return;
    }
    let listed = hits
        .iter()
        .map(|h| format!("'{}' ({})", h.token.trim(), h.family))
        .collect::<Vec<_>>()
        .join(", ");
    out.push(LintItem::new(
        LintCode::ForbiddenToken,
        path,
        format!("forbidden vocabulary: {listed}"),
    ));
}
