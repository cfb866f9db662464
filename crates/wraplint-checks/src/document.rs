//! Read-only, missing-key-tolerant view over a parsed day document.
//!
//! Field checks run even when the schema check failed, so every accessor
//! here degrades to `None` or an empty slice instead of failing.

use serde_json::{Map, Value};

/// Borrowed view of one day document.
#[derive(Debug, Clone, Copy)]
pub struct DayDocument<'a> {
    root: &'a Value,
}

impl<'a> DayDocument<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn governance(&self) -> Option<&'a Map<String, Value>> {
        self.root.get("governance").and_then(Value::as_object)
    }

    pub fn date(&self) -> Option<&'a str> {
        self.governance()
            .and_then(|g| g.get("date"))
            .and_then(Value::as_str)
    }

    pub fn region(&self) -> Option<&'a str> {
        self.governance()
            .and_then(|g| g.get("region"))
            .and_then(Value::as_str)
    }

    pub fn market_outcomes(&self) -> Option<&'a Value> {
        self.root.get("market_outcomes")
    }

    /// A top-level array section (`events`, `reaction_windows`, ...).
    pub fn section(&self, key: &str) -> &'a [Value] {
        as_slice(self.root.get(key))
    }

    /// An array under `market_outcomes` (`indices`, `volatility`, ...).
    pub fn outcomes(&self, key: &str) -> &'a [Value] {
        as_slice(self.market_outcomes().and_then(|m| m.get(key)))
    }

    /// An array under `movers` (`top_gainers`, `top_decliners`).
    pub fn movers(&self, key: &str) -> &'a [Value] {
        as_slice(self.root.get("movers").and_then(|m| m.get(key)))
    }
}

fn as_slice(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

pub fn num_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

/// Present and not `null`.
pub fn has_field(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(|v| !v.is_null())
}

/// Human label for an array entry: its `symbol`/`instrument`, or `#index`.
pub fn entry_label(value: &Value, index: usize) -> String {
    str_field(value, "symbol")
        .or_else(|| str_field(value, "instrument"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{index}"))
}
