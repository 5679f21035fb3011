//! Helpers over `serde_json::Value` trees.

use serde_json::Value;

/// Returns whether a value counts as "truthy".
///
/// `null`, `false`, zero, the empty string, and empty sequences or mappings
/// are falsy. Everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Finds a nested value by a dotted path (`a.b.c`).
///
/// Mapping segments are matched by key. Sequence segments are matched by
/// numeric index. An empty path returns the value itself.
pub fn find_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
