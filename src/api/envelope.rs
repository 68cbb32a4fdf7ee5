//! Normalizes the backend's inconsistent response shapes into one contract.
//!
//! A response succeeds when its status is 2xx and its body is not an object
//! carrying `"success": false`. Bodies without a `success` flag are successes.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::prelude::*;

pub fn interpret(
    operation: &str,
    status: StatusCode,
    body: &[u8],
) -> Result<Value, human_errors::Error> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => value,
            Err(err) if status.is_success() => {
                error!(error = %err, "The backend returned a body which is not valid JSON while trying to {operation}.");
                return Err(human_errors::user(
                    format!("The backend returned a response we could not understand while trying to {operation}."),
                    &[
                        "Check that the configured API address points at the media platform backend.",
                        "Try again later, as the server may be temporarily unavailable.",
                    ],
                ));
            }
            Err(_) => Value::Null,
        }
    };

    if !status.is_success() {
        return Err(failure(operation, Some(status), &value));
    }

    if value.get("success") == Some(&Value::Bool(false)) {
        return Err(failure(operation, None, &value));
    }

    Ok(value)
}

fn failure(operation: &str, status: Option<StatusCode>, value: &Value) -> human_errors::Error {
    let message = ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty());

    let description = match (message, status) {
        (Some(message), _) => format!("The backend could not {operation}: {message}"),
        (None, Some(status)) => format!("The backend could not {operation} (HTTP {status})."),
        (None, None) => format!("The backend could not {operation}."),
    };

    match status {
        Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => human_errors::user(
            description,
            &[
                "Sign in again, your session token may have expired.",
                "Make sure that your account has permission to perform this action.",
            ],
        ),
        _ => human_errors::user(
            description,
            &["Check the details you provided and try again."],
        ),
    }
}

/// Unwraps a single record from `{success, data}`, `{data}` or a bare record.
pub fn record<T: DeserializeOwned>(operation: &str, value: Value) -> Result<T, human_errors::Error> {
    serde_json::from_value(unwrap_data(value)).wrap_err_as_user(
        format!("The backend returned a record we could not understand while trying to {operation}."),
        &["Check that the configured API address points at the media platform backend."],
    )
}

/// Like [`record`], for endpoints which may answer with a bare acknowledgement instead.
pub fn optional_record<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(unwrap_data(value)).ok()
}

/// Unwraps a collection from a bare array, `{data: [...]}` or `{<key>: [...]}`.
pub fn collection<T: DeserializeOwned>(
    operation: &str,
    key: &str,
    value: Value,
) -> Result<Vec<T>, human_errors::Error> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        value => find_collection(value, key),
    };

    let items = items.ok_or_else(|| {
        human_errors::user(
            format!("The backend did not return a list while trying to {operation}."),
            &["Check that the configured API address points at the media platform backend."],
        )
    })?;

    serde_json::from_value(items).wrap_err_as_user(
        format!("The backend returned records we could not understand while trying to {operation}."),
        &["Check that the configured API address points at the media platform backend."],
    )
}

fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

fn find_collection(value: Value, key: &str) -> Option<Value> {
    match value {
        Value::Array(_) => Some(value),
        Value::Object(mut map) => {
            if let Some(found) = map.remove("data").and_then(|data| find_collection(data, key)) {
                return Some(found);
            }

            map.remove(key).filter(Value::is_array)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Thing {
        name: String,
    }

    #[rstest]
    #[case(StatusCode::OK, r#"{"success": true, "data": {}}"#)]
    #[case(StatusCode::OK, r#"{"_id": "1", "title": "no flag"}"#)]
    #[case(StatusCode::CREATED, r#"[]"#)]
    #[case(StatusCode::NO_CONTENT, "")]
    fn successes(#[case] status: StatusCode, #[case] body: &str) {
        assert!(interpret("do things", status, body.as_bytes()).is_ok());
    }

    #[test]
    fn success_false_is_a_failure_with_the_server_message() {
        let err = interpret(
            "delete the banner",
            StatusCode::OK,
            br#"{"success": false, "message": "Banner is in use"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Banner is in use"));
    }

    #[test]
    fn non_2xx_is_a_failure_with_fallback_message() {
        let err = interpret("list users", StatusCode::INTERNAL_SERVER_ERROR, b"oops").unwrap_err();
        assert!(err.to_string().contains("could not list users"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn error_field_is_used_as_message() {
        let err = interpret("get the user", StatusCode::NOT_FOUND, br#"{"error": "No such user"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("No such user"));
    }

    #[test]
    fn malformed_success_body_is_a_failure() {
        assert!(interpret("list users", StatusCode::OK, b"<html>").is_err());
    }

    #[rstest]
    #[case(json!({ "success": true, "data": { "name": "a" } }))]
    #[case(json!({ "data": { "name": "a" } }))]
    #[case(json!({ "name": "a" }))]
    fn record_shapes_normalize(#[case] value: Value) {
        let thing: Thing = record("get the thing", value).unwrap();
        assert_eq!(thing, Thing { name: "a".into() });
    }

    #[rstest]
    #[case(json!([{ "name": "a" }]))]
    #[case(json!({ "success": true, "data": [{ "name": "a" }] }))]
    #[case(json!({ "success": true, "things": [{ "name": "a" }] }))]
    #[case(json!({ "data": { "things": [{ "name": "a" }] } }))]
    fn collection_shapes_normalize(#[case] value: Value) {
        let things: Vec<Thing> = collection("list things", "things", value).unwrap();
        assert_eq!(things, vec![Thing { name: "a".into() }]);
    }

    #[test]
    fn collection_without_a_list_is_an_error() {
        let result: Result<Vec<Thing>, _> =
            collection("list things", "things", json!({ "success": true }));
        assert!(result.is_err());
    }

    #[test]
    fn optional_record_tolerates_acknowledgements() {
        assert_eq!(optional_record::<Thing>(json!({ "success": true })), None);
        assert_eq!(
            optional_record::<Thing>(json!({ "success": true, "data": { "name": "b" } })),
            Some(Thing { name: "b".into() })
        );
    }
}
