use wraplint_core::{LintCode, LintItem};

use crate::document::{entry_label, num_field, DayDocument};

/// Gainers must have strictly positive returns, decliners strictly negative.
pub fn check_movers(day: &DayDocument<'_>, out: &mut Vec<LintItem>) {
    let lists: [(&str, fn(f64) -> bool, &str); 2] = [
        ("top_gainers", |r| r > 0.0, "positive"),
        ("top_decliners", |r| r < 0.0, "negative"),
    ];
    for (list, sign_ok, expected) in lists {
        for (i, mover) in day.movers(list).iter().enumerate() {
            let Some(ret) = num_field(mover, "return_pct") else {
                continue;
            };
            if !sign_ok(ret) {
                out.push(LintItem::new(
                    LintCode::MoverSign,
                    format!("movers.{list}[{i}].return_pct"),
                    format!(
                        "{} is listed in {list} with return_pct {ret}; \
                         expected strictly {expected}",
                        entry_label(mover, i)
                    ),
                ));
            }
        }
    }
}
