//! snake_case → camelCase key normalization for JSON payloads.
//!
//! The Simplecast API speaks snake_case; node fields are camelCase. Every
//! payload passes through [`camel_case_keys`] before it becomes a node.
//!
//! Rules for a single key (see [`to_camel_case`]):
//! - a run of underscores between word characters is dropped and the next
//!   character is uppercased (`feed_url` → `feedUrl`, `a__b` → `aB`)
//! - leading and trailing underscores are kept (`_links` stays `_links`)
//! - nothing else is touched, so `feedUrl` and `PascalCase` are no-ops
//!
//! Because the output never contains an inner underscore, normalizing twice
//! is the same as normalizing once.

use serde_json::{Map, Value};

/// Rewrite a single snake_case key to camelCase.
pub fn to_camel_case(key: &str) -> String {
    let core_start = key.len() - key.trim_start_matches('_').len();
    let core_end = key.trim_end_matches('_').len();

    // Only underscores (or empty)
    if core_end <= core_start {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..core_start]);

    let mut upper_next = false;
    for c in key[core_start..core_end].chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out.push_str(&key[core_end..]);
    out
}

/// Recursively camelCase every object key in `value`.
///
/// Arrays are walked in order, scalars pass through unchanged. When two keys
/// collapse to the same camelCase form the later one wins.
pub fn camel_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(camel_case_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(camel_case_keys).collect()),
        scalar => scalar,
    }
}

/// [`camel_case_keys`] for a map that is already known to be an object.
pub fn camel_case_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (to_camel_case(&key), camel_case_keys(value)))
        .collect()
}
