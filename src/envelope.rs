//! Normalization of decoded response bodies.
//!
//! The rules look only at the shape of the decoded value, never at which
//! operation produced it. Which rule applies to which operation is recorded
//! on its [`Operation`](crate::catalog::Operation) descriptor.

use crate::{Error, Result};
use serde_json::Value;

/// Returns `true` for `null`, `[]` and `{}`.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Strips a redundant outer layer: an object with exactly one key becomes
/// that key's value, an array with exactly one element becomes the element.
/// Anything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use dadata::envelope::unwrap_single;
/// use serde_json::json;
///
/// assert_eq!(unwrap_single(json!({"balance": 12.5})), json!(12.5));
/// assert_eq!(unwrap_single(json!({"a": 1, "b": 2})), json!({"a": 1, "b": 2}));
/// ```
pub fn unwrap_single(value: Value) -> Value {
    match value {
        Value::Object(map) if map.len() == 1 => match map.into_iter().next() {
            Some((_, inner)) => inner,
            None => Value::Null,
        },
        Value::Array(mut items) if items.len() == 1 => items.pop().unwrap_or(Value::Null),
        other => other,
    }
}

/// Rejects empty bodies, then applies [`unwrap_single`].
///
/// # Errors
///
/// Returns [`Error::EmptyResult`] if `value` is `null`, `[]` or `{}`.
pub fn unwrap_clean(value: Value) -> Result<Value> {
    if is_empty(&value) {
        return Err(Error::EmptyResult);
    }
    Ok(unwrap_single(value))
}

/// Extracts the `suggestions` array: its sole element if it has exactly one,
/// the whole array otherwise.
///
/// # Errors
///
/// Returns [`Error::EmptyResult`] if `suggestions` is absent, not an array,
/// empty, or its first element is empty.
///
/// # Examples
///
/// ```
/// use dadata::envelope::unwrap_suggestions;
/// use serde_json::json;
///
/// let one = unwrap_suggestions(json!({"suggestions": [{"x": 1}]})).unwrap();
/// assert_eq!(one, json!({"x": 1}));
///
/// let many = unwrap_suggestions(json!({"suggestions": [{"x": 1}, {"x": 2}]})).unwrap();
/// assert_eq!(many, json!([{"x": 1}, {"x": 2}]));
/// ```
pub fn unwrap_suggestions(value: Value) -> Result<Value> {
    let mut items = match value {
        Value::Object(mut map) => match map.remove("suggestions") {
            Some(Value::Array(items)) => items,
            _ => return Err(Error::EmptyResult),
        },
        _ => return Err(Error::EmptyResult),
    };

    if items.first().map_or(true, is_empty) {
        return Err(Error::EmptyResult);
    }
    if items.len() == 1 {
        Ok(items.swap_remove(0))
    } else {
        Ok(Value::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_key_object_is_unwrapped() {
        assert_eq!(
            unwrap_single(json!({"foo": {"bar": 1}})),
            json!({"bar": 1})
        );
    }

    #[test]
    fn multi_key_object_passes_through() {
        let value = json!({"a": 1, "b": 2});
        assert_eq!(unwrap_single(value.clone()), value);
    }

    #[test]
    fn single_element_array_is_unwrapped() {
        assert_eq!(
            unwrap_single(json!([{"source": "Moscow"}])),
            json!({"source": "Moscow"})
        );
        let two = json!([{"source": "a"}, {"source": "b"}]);
        assert_eq!(unwrap_single(two.clone()), two);
    }

    #[test]
    fn unwrap_is_one_level_deep() {
        assert_eq!(unwrap_single(json!({"a": {"b": 1}})), json!({"b": 1}));
        assert_eq!(unwrap_single(json!(5)), json!(5));
    }

    #[test]
    fn clean_rejects_every_empty_shape() {
        for empty in [json!(null), json!([]), json!({})] {
            assert!(matches!(unwrap_clean(empty), Err(Error::EmptyResult)));
        }
        assert_eq!(unwrap_clean(json!({"balance": 0})).unwrap(), json!(0));
    }

    #[test]
    fn suggestions_unwrap() {
        assert_eq!(
            unwrap_suggestions(json!({"suggestions": [{"x": 1}]})).unwrap(),
            json!({"x": 1})
        );
        assert_eq!(
            unwrap_suggestions(json!({"suggestions": [{"x": 1}, {"x": 2}]})).unwrap(),
            json!([{"x": 1}, {"x": 2}])
        );
    }

    #[test]
    fn missing_or_empty_suggestions_are_empty_results() {
        for body in [
            json!({}),
            json!({"suggestions": []}),
            json!({"suggestions": null}),
            json!({"suggestions": [{}]}),
            json!([{"x": 1}]),
        ] {
            assert!(
                matches!(unwrap_suggestions(body.clone()), Err(Error::EmptyResult)),
                "{} should be empty",
                body
            );
        }
    }
}
