// crates/query/src/eval.rs

use serde_json::Value as Json;

use crate::ast::{FilterExpression, OperatorKind, Predicate, Value};

/// Top-level field lookup. Field names are flat; no dotted paths.
fn field_value<'a>(doc: &'a Json, field: &str) -> Option<&'a Json> {
    doc.as_object()?.get(field)
}

fn values_equal(actual: &Json, expected: &Value) -> bool {
    match (actual, expected) {
        // 250 and 250.0 are the same number
        (Json::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(av), Some(bv)) => av == bv,
            _ => a == b,
        },
        (Json::String(a), Value::Text(b)) => a == b,
        _ => false,
    }
}

fn ordering(actual: &Json, expected: &Value) -> Option<std::cmp::Ordering> {
    match (actual, expected) {
        (Json::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Json::String(a), Value::Text(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

/// Evaluate one predicate against an optional field value.
fn eval_predicate(predicate: &Predicate, actual: Option<&Json>) -> bool {
    use std::cmp::Ordering::*;
    use OperatorKind::*;

    let expected = &predicate.value;
    match predicate.operator {
        Equals => actual.is_some_and(|a| values_equal(a, expected)),

        // a missing field is "not equal"
        NotEquals => !actual.is_some_and(|a| values_equal(a, expected)),

        GreaterThan => matches!(actual.and_then(|a| ordering(a, expected)), Some(Greater)),
        GreaterOrEqual => matches!(
            actual.and_then(|a| ordering(a, expected)),
            Some(Greater | Equal)
        ),
        LessThan => matches!(actual.and_then(|a| ordering(a, expected)), Some(Less)),
        LessOrEqual => matches!(
            actual.and_then(|a| ordering(a, expected)),
            Some(Less | Equal)
        ),
    }
}

/// Whether `doc` satisfies every predicate of `filter`.
pub fn matches(filter: &FilterExpression, doc: &Json) -> bool {
    filter
        .iter()
        .all(|p| eval_predicate(p, field_value(doc, &p.field)))
}

/// The documents of `docs` that satisfy `filter`, in their original order.
pub fn filter_documents<'a>(filter: &FilterExpression, docs: &'a [Json]) -> Vec<&'a Json> {
    docs.iter().filter(|doc| matches(filter, doc)).collect()
}
