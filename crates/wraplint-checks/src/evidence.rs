//! Evidence items: references, identity, excerpt shape and purity.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use wraplint_core::{is_zulu_timestamp, LintCode, LintItem, RuleTable};

use crate::document::{str_field, DayDocument};
use crate::purity;
use crate::reactions::check_event_ref;

pub fn check_evidence(
    day: &DayDocument<'_>,
    rules: &RuleTable,
    event_ids: &BTreeSet<&str>,
    out: &mut Vec<LintItem>,
) {
    let mut doc_ids: BTreeMap<&str, usize> = BTreeMap::new();
    let mut chunk_ids: BTreeMap<&str, usize> = BTreeMap::new();

    for (i, item) in day.section("evidence_items").iter().enumerate() {
        let path = format!("evidence_items[{i}]");
        check_event_ref(item, &path, "evidence item", event_ids, out);
        check_unique(
            item,
            i,
            &path,
            "doc_id",
            LintCode::EvidenceDuplicateDocId,
            &mut doc_ids,
            out,
        );
        check_unique(
            item,
            i,
            &path,
            "chunk_id",
            LintCode::EvidenceDuplicateChunkId,
            &mut chunk_ids,
            out,
        );

        if let Some(ts) = item.get("published_ts").filter(|v| !v.is_null()) {
            if !ts.as_str().is_some_and(is_zulu_timestamp) {
                out.push(LintItem::new(
                    LintCode::EvidenceTimestampFormat,
                    format!("{path}.published_ts"),
                    format!("{ts} is not a YYYY-MM-DDTHH:MM:SSZ timestamp"),
                ));
            }
        }

        if let Some(excerpt) = str_field(item, "excerpt") {
            check_excerpt(rules, &format!("{path}.excerpt"), excerpt, out);
        }
    }
}

fn check_unique<'a>(
    item: &'a Value,
    index: usize,
    path: &str,
    key: &str,
    code: LintCode,
    seen: &mut BTreeMap<&'a str, usize>,
    out: &mut Vec<LintItem>,
) {
    let Some(id) = str_field(item, key) else {
        return;
    };
    if let Some(first) = seen.get(id) {
        out.push(LintItem::new(
            code,
            format!("{path}.{key}"),
            format!("{key} '{id}' is already used by evidence_items[{first}]"),
        ));
    } else {
        seen.insert(id, index);
    }
}

fn check_excerpt(rules: &RuleTable, path: &str, excerpt: &str, out: &mut Vec<LintItem>) {
    let chars = excerpt.chars().count();
    if chars > rules.excerpt_max_chars {
        out.push(LintItem::new(
            LintCode::EvidenceExcerptTooLong,
            path,
            format!(
                "excerpt is {chars} characters; the limit is {}",
                rules.excerpt_max_chars
            ),
        ));
    }
    purity::check_text(rules, path, excerpt, out);
    if !rules.is_fact_styled(excerpt) {
        out.push(LintItem::new(
            LintCode::EvidenceNotFactStyled,
            path,
            "excerpt carries no figure and no factual verb",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(items: Value) -> Vec<LintItem> {
        let doc = json!({ "evidence_items": items });
        let ids: BTreeSet<&str> = ["E1"].into_iter().collect();
        let mut out = Vec::new();
        check_evidence(&DayDocument::new(&doc), &RuleTable::baseline(), &ids, &mut out);
        out
    }

    fn item(doc_id: &str, chunk_id: &str, excerpt: &str) -> Value {
        json!({
            "event_id": "E1",
            "doc_id": doc_id,
            "chunk_id": chunk_id,
            "source": "BLS",
            "published_ts": "2026-01-15T13:30:00Z",
            "excerpt": excerpt
        })
    }

    #[test]
    fn clean_items_pass() {
        let items = run(json!([
            item("d1", "c1", "The CPI rose 0.3% in December."),
            item("d2", "c2", "The Treasury announced the auction sizes.")
        ]));
        assert!(items.is_empty(), "{items:?}");
    }

    #[test]
    fn excerpt_with_two_forbidden_tokens() {
        let items = run(json!([item(
            "d1",
            "c1",
            "Fed officials said rates are likely to fall due to inflation"
        )]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, LintCode::ForbiddenToken);
        let hits = RuleTable::baseline()
            .scan_forbidden("Fed officials said rates are likely to fall due to inflation");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn duplicate_ids() {
        let items = run(json!([
            item("d1", "c1", "Sales rose 2%."),
            item("d1", "c2", "Sales rose 2%."),
            item("d2", "c1", "Sales rose 2%.")
        ]));
        let codes: Vec<LintCode> = items.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![LintCode::EvidenceDuplicateDocId, LintCode::EvidenceDuplicateChunkId]
        );
    }

    #[test]
    fn long_excerpt() {
        let long = format!("Output rose {}", "x".repeat(300));
        let items = run(json!([item("d1", "c1", &long)]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, LintCode::EvidenceExcerptTooLong);
    }

    #[test]
    fn not_fact_styled_is_soft() {
        let items = run(json!([item("d1", "c1", "A quiet session for markets.")]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, LintCode::EvidenceNotFactStyled);
        assert!(!items[0].is_hard());
    }

    #[test]
    fn dangling_and_bad_timestamp() {
        let mut bad = item("d1", "c1", "Claims fell 5k.");
        bad["event_id"] = json!("E404");
        bad["published_ts"] = json!("2026-01-15");
        let items = run(json!([bad]));
        let codes: Vec<LintCode> = items.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![LintCode::DanglingEventRef, LintCode::EvidenceTimestampFormat]
        );
    }
}
