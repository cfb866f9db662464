use serde_json::Value;
use wraplint_core::{LintCode, LintItem};

/// Report every string scalar, at any depth, that contains a line break.
pub fn check_newlines(root: &Value, out: &mut Vec<LintItem>) {
    walk(root, &mut String::new(), out);
}

fn walk(value: &Value, path: &mut String, out: &mut Vec<LintItem>) {
    match value {
        Value::String(s) if s.contains(['\n', '\r']) => {
            let at = if path.is_empty() { "$" } else { path.as_str() };
            out.push(LintItem::new(
                LintCode::EmbeddedNewline,
                at,
                "string value contains an embedded line break",
            ));
        }
        Value::Object(map) => {
            for (key, child) in map {
                let mark = path.len();
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
                walk(child, path, out);
                path.truncate(mark);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                let mark = path.len();
                path.push_str(&format!("[{i}]"));
                walk(child, path, out);
                path.truncate(mark);
            }
        }
        _ => {}
    }
}
