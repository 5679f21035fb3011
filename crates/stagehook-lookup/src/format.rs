//! Post-processing of handler results driven by `load`, `get`, and
//! `transform` arguments.
//!
//! Steps run in this order:
//! 1. `load=json|yaml` parses a string result.
//! 2. `get=<dotted.path>` selects a nested value from a mapping.
//! 3. `"none"`/`"null"` strings become `null` unless `transform=str`.
//! 4. `transform=bool|str` converts the final value.

use serde::Serialize;
use serde_json::Value;
use stagehook_core::types::find_path;

use crate::error::LookupError;
use crate::handler::LookupArgs;

/// Applies the formatting arguments to a handler result.
pub fn format_results(value: Value, args: &LookupArgs) -> Result<Value, LookupError> {
    let mut value = match args.get("load") {
        Some(parser) => load(value, parser)?,
        None => value,
    };

    if let Some(path) = args.get("get") {
        value = match &value {
            Value::Object(_) => find_path(&value, path).cloned().unwrap_or(Value::Null),
            other => {
                return Err(LookupError::format(format!(
                    "value must be a mapping to use \"get\"; got {}",
                    type_name(other)
                )));
            }
        };
    }

    let transform = args.get("transform");
    let null_string = matches!(
        &value,
        Value::String(s) if matches!(s.to_lowercase().as_str(), "none" | "null")
    );
    if null_string && transform != Some("str") {
        value = Value::Null;
    }

    match transform {
        Some("bool") => to_bool(value).map(Value::Bool),
        Some("str") => {
            let delimiter = args.get("delimiter").unwrap_or(",");
            let indent = match args.get("indent") {
                Some(raw) => raw.parse::<usize>().map_err(|_| {
                    LookupError::format(format!("indent must be an integer; got '{raw}'"))
                })?,
                None => 0,
            };
            to_string(value, delimiter, indent).map(Value::String)
        }
        Some(other) => Err(LookupError::format(format!(
            "unknown transform '{other}'; expected bool or str"
        ))),
        None => Ok(value),
    }
}

fn load(value: Value, parser: &str) -> Result<Value, LookupError> {
    let Value::String(raw) = value else {
        return Err(LookupError::format(format!(
            "value of type {} must be a string to use load={parser}",
            type_name(&value)
        )));
    };

    match parser {
        "json" => serde_json::from_str(&raw)
            .map_err(|e| LookupError::format(format!("invalid JSON: {e}"))),
        "yaml" => serde_yaml::from_str(&raw)
            .map_err(|e| LookupError::format(format!("invalid YAML: {e}"))),
        other => Err(LookupError::format(format!(
            "unknown parser '{other}'; expected json or yaml"
        ))),
    }
}

fn to_bool(value: Value) -> Result<bool, LookupError> {
    match value {
        Value::Bool(b) => Ok(b),
        Value::String(s) => match s.to_lowercase().as_str() {
            "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
            "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
            _ => Err(LookupError::format(format!("invalid truth value '{s}'"))),
        },
        other => Err(LookupError::format(format!(
            "value must be a string or bool to use transform=bool; got {}",
            type_name(&other)
        ))),
    }
}

fn to_string(value: Value, delimiter: &str, indent: usize) -> Result<String, LookupError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Bool(true) => Ok(r#""True""#.to_string()),
        Value::Bool(false) => Ok(r#""False""#.to_string()),
        Value::Null => Ok("None".to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(delimiter)),
        map @ Value::Object(_) => {
            // Rendered JSON is encoded a second time so it can be embedded
            // as an escaped string.
            let rendered = render_json(&map, indent)?;
            serde_json::to_string(&rendered)
                .map_err(|e| LookupError::format(format!("unable to encode mapping: {e}")))
        }
    }
}

/// Renders one entry per line; `indent=0` keeps the line breaks without
/// leading spaces.
fn render_json(value: &Value, indent: usize) -> Result<String, LookupError> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| LookupError::format(format!("unable to encode mapping: {e}")))?;
    String::from_utf8(buf).map_err(|e| LookupError::format(format!("invalid UTF-8: {e}")))
}

/// JSON type name used in error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(raw: &str) -> LookupArgs {
        LookupArgs::parse(raw).expect("args")
    }

    #[test]
    fn test_no_args_passthrough() {
        let value = json!({"a": 1});
        assert_eq!(
            format_results(value.clone(), &LookupArgs::default()).expect("format"),
            value
        );
    }

    #[test]
    fn test_load_json_then_get() {
        let value = json!(r#"{"outer": {"inner": "x"}}"#);
        let result = format_results(value, &args("load=json, get=outer.inner")).expect("format");
        assert_eq!(result, json!("x"));
    }

    #[test]
    fn test_load_yaml() {
        let value = json!("name: site\nport: 80\n");
        let result = format_results(value, &args("load=yaml, get=port")).expect("format");
        assert_eq!(result, json!(80));
    }

    #[test]
    fn test_get_on_non_mapping_fails() {
        assert!(format_results(json!("plain"), &args("get=a")).is_err());
    }

    #[test]
    fn test_null_strings() {
        assert_eq!(
            format_results(json!("None"), &LookupArgs::default()).expect("format"),
            Value::Null
        );
        assert_eq!(
            format_results(json!("null"), &args("transform=str")).expect("format"),
            json!("null")
        );
    }

    #[test]
    fn test_transform_bool() {
        assert_eq!(
            format_results(json!("Yes"), &args("transform=bool")).expect("format"),
            json!(true)
        );
        assert_eq!(
            format_results(json!("off"), &args("transform=bool")).expect("format"),
            json!(false)
        );
        assert!(format_results(json!("maybe"), &args("transform=bool")).is_err());
        assert!(format_results(json!(3), &args("transform=bool")).is_err());
    }

    #[test]
    fn test_transform_str_list_with_delimiter() {
        let value = json!(["sg-1", "sg-2", 3]);
        let result = format_results(value, &args("transform=str, delimiter=;")).expect("format");
        assert_eq!(result, json!("sg-1;sg-2;3"));
    }

    #[test]
    fn test_transform_str_mapping_is_double_encoded() {
        let result = format_results(json!({"a": 1}), &args("transform=str")).expect("format");
        assert_eq!(result, json!(r#""{\n\"a\": 1\n}""#));
    }

    #[test]
    fn test_transform_str_mapping_with_indent() {
        let result =
            format_results(json!({"a": 1}), &args("transform=str, indent=2")).expect("format");
        assert_eq!(result, json!(r#""{\n  \"a\": 1\n}""#));
    }

    #[test]
    fn test_transform_str_bool_is_quoted() {
        let result = format_results(json!(true), &args("transform=str")).expect("format");
        assert_eq!(result, json!(r#""True""#));
        let result = format_results(json!(false), &args("transform=str")).expect("format");
        assert_eq!(result, json!(r#""False""#));
    }
}
