//! Governance block checks: required keys, timestamp format and order,
//! calendar date, and the derived document key.

use serde_json::Value;
use wraplint_core::{is_zulu_timestamp, parse_calendar_date, LintCode, LintItem};

use crate::document::DayDocument;

/// Keys every governance block must carry.
pub const REQUIRED_KEYS: &[&str] = &[
    "date",
    "region",
    "market_session",
    "published_ts",
    "asof_ts",
    "doc_version",
    "pipeline_version",
    "doc_id",
    "doc_key",
];

/// Canonical document key for a region and date.
pub fn expected_doc_key(region: &str, date: &str) -> String {
    format!("market_wrap/{}/{}", region.to_ascii_lowercase(), date)
}

pub fn check_governance(day: &DayDocument<'_>, out: &mut Vec<LintItem>) {
    let Some(gov) = day.governance() else {
        out.push(LintItem::new(
            LintCode::GovMissingKey,
            "governance",
            "governance block is missing or not an object",
        ));
        return;
    };

    for key in REQUIRED_KEYS {
        if gov.get(*key).map_or(true, Value::is_null) {
            out.push(LintItem::new(
                LintCode::GovMissingKey,
                format!("governance.{key}"),
                format!("required governance key '{key}' is missing"),
            ));
        }
    }

    if let Some(date) = gov.get("date").filter(|v| !v.is_null()) {
        let valid = date
            .as_str()
            .is_some_and(|s| parse_calendar_date(s).is_ok());
        if !valid {
            out.push(LintItem::new(
                LintCode::GovDateFormat,
                "governance.date",
                format!("date {date} is not a YYYY-MM-DD calendar date"),
            ));
        }
    }

    let published = zulu_field(gov.get("published_ts"), "governance.published_ts", out);
    let asof = zulu_field(gov.get("asof_ts"), "governance.asof_ts", out);
    if let (Some(published), Some(asof)) = (published, asof) {
        // Zulu strings of fixed width order the same lexicographically and chronologically.
        if asof > published {
            out.push(LintItem::new(
                LintCode::GovTimestampOrder,
                "governance.asof_ts",
                format!("asof_ts {asof} is later than published_ts {published}"),
            ));
        }
    }

    let region = gov.get("region").and_then(Value::as_str);
    let date = gov.get("date").and_then(Value::as_str);
    let doc_key = gov.get("doc_key").and_then(Value::as_str);
    if let (Some(region), Some(date), Some(doc_key)) = (region, date, doc_key) {
        let expected = expected_doc_key(region, date);
        if doc_key != expected {
            out.push(LintItem::new(
                LintCode::GovDocKey,
                "governance.doc_key",
                format!("doc_key '{doc_key}' does not match expected '{expected}'"),
            ));
        }
    }
}

/// Returns the timestamp string when it is well formed; reports it otherwise.
/// Absent values are left to the required-key check.
fn zulu_field<'a>(
    value: Option<&'a Value>,
    path: &str,
    out: &mut Vec<LintItem>,
) -> Option<&'a str> {
    let value = value.filter(|v| !v.is_null())?;
    match value.as_str() {
        Some(s) if is_zulu_timestamp(s) => Some(s),
        _ => {
            out.push(LintItem::new(
                LintCode::GovTimestampFormat,
                path,
                format!("{value} is not a YYYY-MM-DDTHH:MM:SSZ timestamp"),
            ));
            None
        }
    }
}
