use serde_json::Value;

/// Tokens the remote API uses for "no data", compared case-insensitively.
pub const UNKNOWN_SENTINELS: [&str; 2] = ["unknown", "none"];

/// Returns `true` when a scalar carries no displayable data.
///
/// Absent, empty, and the sentinel tokens (`unknown`, `none` in any case) are unknown.
/// Everything else is present, including `"0"` and whitespace-padded text.
#[must_use]
pub fn is_unknown_value(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return true;
    };
    value.is_empty()
        || UNKNOWN_SENTINELS
            .iter()
            .any(|sentinel| value.eq_ignore_ascii_case(sentinel))
}

/// JSON flavour of [`is_unknown_value`]: `null` is unknown, strings are checked against the
/// sentinels, numbers and booleans are present. Arrays and objects are not scalars and count
/// as unknown so they never reach a field renderer.
#[must_use]
pub fn is_unknown_json(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => is_unknown_value(Some(s)),
        Some(Value::Number(_) | Value::Bool(_)) => false,
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentinels_and_empty_are_unknown() {
        for raw in ["", "unknown", "Unknown", "UNKNOWN", "none", "NONE", "None"] {
            assert!(is_unknown_value(Some(raw)), "{raw:?} should be unknown");
        }
        assert!(is_unknown_value(None));
    }

    #[test]
    fn real_values_are_present() {
        for raw in ["0", "172", "n/a", "unknownish", " none", "Luke Skywalker"] {
            assert!(!is_unknown_value(Some(raw)), "{raw:?} should be present");
        }
    }

    #[test]
    fn json_scalars_follow_string_rules() {
        assert!(is_unknown_json(None));
        assert!(is_unknown_json(Some(&Value::Null)));
        assert!(is_unknown_json(Some(&json!("none"))));
        assert!(is_unknown_json(Some(&json!(["film"]))));
        assert!(!is_unknown_json(Some(&json!(0))));
        assert!(!is_unknown_json(Some(&json!(false))));
        assert!(!is_unknown_json(Some(&json!("80"))));
    }
}
