//! Event identity, fact purity, and session consistency.
//!
//! A declared `market_session` is compared with the session inferred from
//! the event's `published_ts` through the region's exchange calendar. A
//! region with no calendar gets a single soft finding and the session
//! comparison is skipped.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use wraplint_core::{parse_zulu, LintCode, LintItem, MarketSession, RuleTable, SessionCalendar};

use crate::document::{str_field, DayDocument};
use crate::purity;

/// Check every event and return the set of declared event ids.
pub fn check_events<'a>(
    day: &DayDocument<'a>,
    rules: &RuleTable,
    out: &mut Vec<LintItem>,
) -> BTreeSet<&'a str> {
    let events = day.section("events");
    let calendar = resolve_calendar(day, rules, !events.is_empty(), out);

    let mut first_seen: BTreeMap<&'a str, usize> = BTreeMap::new();
    for (i, event) in events.iter().enumerate() {
        let path = format!("events[{i}]");

        match str_field(event, "event_id").filter(|id| !id.is_empty()) {
            None => out.push(LintItem::new(
                LintCode::EventMissingId,
                format!("{path}.event_id"),
                "event has no event_id",
            )),
            Some(id) => {
                if let Some(first) = first_seen.get(id) {
                    out.push(LintItem::new(
                        LintCode::EventDuplicateId,
                        format!("{path}.event_id"),
                        format!("event_id '{id}' is already used by events[{first}]"),
                    ));
                } else {
                    first_seen.insert(id, i);
                }
            }
        }

        if let Some(facts) = event.get("facts").and_then(Value::as_array) {
            for (j, fact) in facts.iter().enumerate() {
                if let Some(text) = fact.as_str() {
                    purity::check_text(rules, &format!("{path}.facts[{j}]"), text, out);
                }
            }
        }

        check_session(event, &path, calendar, out);
    }

    first_seen.into_keys().collect()
}

fn resolve_calendar<'r>(
    day: &DayDocument<'_>,
    rules: &'r RuleTable,
    needed: bool,
    out: &mut Vec<LintItem>,
) -> Option<&'r SessionCalendar> {
    let region = day.region()?;
    let calendar = rules.calendar_for(region);
    if calendar.is_none() && needed {
        out.push(LintItem::new(
            LintCode::SessionNoCalendar,
            "governance.region",
            format!("no session calendar for region '{region}'; event sessions not checked"),
        ));
    }
    calendar
}

fn check_session(
    event: &Value,
    path: &str,
    calendar: Option<&SessionCalendar>,
    out: &mut Vec<LintItem>,
) {
    let Some(raw_ts) = event.get("published_ts").filter(|v| !v.is_null()) else {
        return;
    };
    let Some(published) = raw_ts.as_str().and_then(|s| parse_zulu(s).ok()) else {
        out.push(LintItem::new(
            LintCode::EventTimestampFormat,
            format!("{path}.published_ts"),
            format!("{raw_ts} is not a YYYY-MM-DDTHH:MM:SSZ timestamp"),
        ));
        return;
    };
    let (Some(calendar), Some(declared)) = (calendar, str_field(event, "market_session")) else {
        return;
    };

    let inferred = calendar.classify(published);
    let local = calendar.local_time(published).format("%H:%M");
    match declared.parse::<MarketSession>() {
        Ok(session) if session == inferred => {}
        Ok(session) => out.push(LintItem::new(
            LintCode::SessionMismatch,
            format!("{path}.market_session"),
            format!(
                "declared '{session}' but published_ts is {local} {} local time ({inferred})",
                calendar.region
            ),
        )),
        Err(_) => out.push(LintItem::new(
            LintCode::SessionMismatch,
            format!("{path}.market_session"),
            format!("declared session '{declared}' is not one of pre, regular, post"),
        )),
    }
}
