//! Market outcome consistency and unit discipline.
//!
//! Index entries are checked for OHLC bracketing and for return arithmetic
//! against the previous close. Rates, volatility and breadth entries are
//! checked for the unit conventions the rule table encodes.

use serde_json::Value;
use wraplint_core::{LintCode, LintItem, RuleTable};

use crate::document::{entry_label, has_field, num_field, str_field, DayDocument};
use crate::purity;

/// Absorbs binary rounding at the exact tolerance boundary.
const FLOAT_SLACK: f64 = 1e-9;

pub fn check_outcomes(day: &DayDocument<'_>, rules: &RuleTable, out: &mut Vec<LintItem>) {
    for (i, entry) in day.outcomes("indices").iter().enumerate() {
        let path = format!("market_outcomes.indices[{i}]");
        check_bracket(entry, i, &path, out);
        check_return(entry, i, &path, rules.return_tolerance_pct, out);
    }
    for (i, entry) in day.outcomes("rates_fx_commodities").iter().enumerate() {
        let path = format!("market_outcomes.rates_fx_commodities[{i}]");
        check_rate_units(entry, i, &path, rules, out);
    }
    for (i, entry) in day.outcomes("volatility").iter().enumerate() {
        let path = format!("market_outcomes.volatility[{i}]");
        check_volatility_change(entry, i, &path, rules, out);
    }
    if let Some(breadth) = day.market_outcomes().and_then(|m| m.get("breadth")) {
        check_breadth(breadth, out);
    }
    if let Some(headline) = day
        .market_outcomes()
        .and_then(|m| m.get("headline_neutral"))
        .and_then(Value::as_str)
    {
        purity::check_text(rules, "market_outcomes.headline_neutral", headline, out);
    }
}

/// `low < high` and `low <= close <= high`, when both bounds are present.
fn check_bracket(entry: &Value, index: usize, path: &str, out: &mut Vec<LintItem>) {
    let (Some(low), Some(high)) = (num_field(entry, "low"), num_field(entry, "high")) else {
        return;
    };
    let symbol = entry_label(entry, index);
    if low >= high {
        out.push(LintItem::new(
            LintCode::IndexBracket,
            path,
            format!("{symbol} low {low} is not below high {high}"),
        ));
    }
    if let Some(close) = num_field(entry, "close") {
        if close < low || close > high {
            out.push(LintItem::new(
                LintCode::IndexBracket,
                format!("{path}.close"),
                format!("{symbol} close {close} is outside [{low}, {high}]"),
            ));
        }
    }
}

/// Recompute `(close - prev_close) / prev_close * 100` and compare.
fn check_return(entry: &Value, index: usize, path: &str, tolerance: f64, out: &mut Vec<LintItem>) {
    let (Some(close), Some(prev), Some(stated)) = (
        num_field(entry, "close"),
        num_field(entry, "prev_close"),
        num_field(entry, "return_pct"),
    ) else {
        return;
    };
    let symbol = entry_label(entry, index);
    if prev == 0.0 {
        out.push(LintItem::new(
            LintCode::ReturnMismatch,
            format!("{path}.prev_close"),
            format!("{symbol} prev_close is zero; return_pct cannot be recomputed"),
        ));
        return;
    }
    let recomputed = (close - prev) / prev * 100.0;
    if (recomputed - stated).abs() > tolerance + FLOAT_SLACK {
        out.push(LintItem::new(
            LintCode::ReturnMismatch,
            format!("{path}.return_pct"),
            format!(
                "{symbol} return_pct {stated} differs from recomputed {recomputed:.4} \
                 by more than {tolerance}"
            ),
        ));
    }
}

fn check_rate_units(
    entry: &Value,
    index: usize,
    path: &str,
    rules: &RuleTable,
    out: &mut Vec<LintItem>,
) {
    let symbol = entry_label(entry, index);
    let unit = str_field(entry, "unit");
    match unit {
        Some(u) if rules.is_known_unit(u) => {}
        Some(u) => out.push(LintItem::new(
            LintCode::UnknownUnit,
            format!("{path}.unit"),
            format!("{symbol} unit '{u}' is not one of {}", rules.units.join(", ")),
        )),
        None => out.push(LintItem::new(
            LintCode::UnknownUnit,
            format!("{path}.unit"),
            format!("{symbol} has no unit"),
        )),
    }

    if unit != Some("pct") {
        return;
    }
    let problem = match (has_field(entry, "change_pct"), has_field(entry, "change_bps")) {
        (true, _) => Some("expresses its change as change_pct"),
        (false, false) => Some("has no change_bps"),
        (false, true) => None,
    };
    if let Some(problem) = problem {
        out.push(LintItem::new(
            LintCode::RateChangeUnit,
            path,
            format!(
                "{symbol} is quoted in pct and {problem}; \
                 pct-unit changes must be in basis points"
            ),
        ));
    }
}

fn check_volatility_change(
    entry: &Value,
    index: usize,
    path: &str,
    rules: &RuleTable,
    out: &mut Vec<LintItem>,
) {
    let symbol = entry_label(entry, index);
    if !rules.is_volatility(&symbol) {
        return;
    }
    let generic = ["change", "change_pct"]
        .into_iter()
        .find(|k| has_field(entry, k));
    if let Some(field) = generic {
        if !has_field(entry, "change_pts") {
            out.push(LintItem::new(
                LintCode::VolatilityChangeField,
                format!("{path}.{field}"),
                format!("{symbol} change must be given as change_pts, not {field}"),
            ));
        }
    }
}

fn check_breadth(breadth: &Value, out: &mut Vec<LintItem>) {
    for key in ["advancers", "decliners"] {
        let Some(value) = breadth.get(key).filter(|v| !v.is_null()) else {
            continue;
        };
        if value.as_u64().is_none() {
            out.push(LintItem::new(
                LintCode::BreadthRange,
                format!("market_outcomes.breadth.{key}"),
                format!("{key} {value} is not a non-negative integer count"),
            ));
        }
    }
    if let Some(value) = breadth.get("pct_above_200dma").filter(|v| !v.is_null()) {
        let in_range = value.as_f64().is_some_and(|p| (0.0..=100.0).contains(&p));
        if !in_range {
            out.push(LintItem::new(
                LintCode::BreadthRange,
                "market_outcomes.breadth.pct_above_200dma",
                format!("pct_above_200dma {value} is outside [0, 100]"),
            ));
        }
    }
}
