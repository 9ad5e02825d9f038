use query::{compile, segment, ErrorKind, FilterExpression, OperatorKind, Value};
use serde_json::{json, Value as Json};

fn only(expr: &FilterExpression) -> (&str, OperatorKind, &Value) {
    assert_eq!(expr.len(), 1, "expected a single predicate: {expr:?}");
    let p = &expr.predicates()[0];
    (p.field.as_str(), p.operator, &p.value)
}

// === Compiler ===

#[test]
fn compiling_twice_gives_the_same_expression() {
    let q = r#"title:"The Great Gatsby" pages<250 author!:"John Steinbeck""#;
    assert_eq!(compile(q).unwrap(), compile(q).unwrap());
}

#[test]
fn greater_or_equal_is_one_operator() {
    let expr = compile("pages>=464").unwrap();
    assert_eq!(
        only(&expr),
        ("pages", OperatorKind::GreaterOrEqual, &Value::from(464))
    );
}

#[test]
fn quoted_phrase_is_one_predicate() {
    let expr = compile(r#"title:"The Great Gatsby""#).unwrap();
    assert_eq!(
        only(&expr),
        ("title", OperatorKind::Equals, &Value::from("The Great Gatsby"))
    );
}

#[test]
fn predicates_are_conjoined_in_input_order() {
    let expr = compile(r#"title:"The Great Gatsby" pages<250"#).unwrap();
    let preds = expr.predicates();
    assert_eq!(preds.len(), 2);
    assert_eq!(preds[0].field, "title");
    assert_eq!(preds[1].field, "pages");
    assert_eq!(preds[1].operator, OperatorKind::LessThan);
    assert_eq!(preds[1].value, Value::from(250));

    assert_eq!(
        expr.to_native(),
        json!({ "$and": [{ "title": "The Great Gatsby" }, { "pages": { "$lt": 250 } }] })
    );
}

#[test]
fn negation_applies_to_one_predicate() {
    let expr = compile(r#"author!:"John Steinbeck""#).unwrap();
    assert_eq!(
        only(&expr),
        ("author", OperatorKind::NotEquals, &Value::from("John Steinbeck"))
    );
}

#[test]
fn numeric_and_text_classification() {
    let expr = compile("pages:288").unwrap();
    assert_eq!(only(&expr).2, &Value::from(288));

    let expr = compile("title:Slaughterhouse-Five").unwrap();
    assert_eq!(only(&expr).2, &Value::from("Slaughterhouse-Five"));
}

#[test]
fn blank_queries_are_rejected() {
    assert_eq!(compile("").unwrap_err().kind(), ErrorKind::EmptyQueryExpression);
    assert_eq!(compile("   ").unwrap_err().kind(), ErrorKind::EmptyQueryExpression);
}

#[test]
fn group_without_operator_is_rejected() {
    assert_eq!(
        compile("pages").unwrap_err().kind(),
        ErrorKind::MalformedQuerySyntax
    );
}

// === Segmenter ===

#[test]
fn segments_reparse_to_the_original_objects() {
    let parts = segment(r#"[{"a":1},{"a":2},{"a":3}]"#).unwrap();
    assert_eq!(parts.len(), 3);
    for (i, part) in parts.iter().enumerate() {
        let parsed: Json = serde_json::from_str(part).unwrap();
        assert_eq!(parsed, json!({ "a": i + 1 }));
    }
}

#[test]
fn nested_object_is_one_segment() {
    let parts = segment(r#"[{"a":{"b":1}},{"c":2}]"#).unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], r#"{"a":{"b":1}}"#);
}

#[test]
fn empty_array_is_not_an_error() {
    assert!(segment("[]").unwrap().is_empty());
}

#[test]
fn unbalanced_input_is_rejected() {
    assert_eq!(
        segment(r#"[{"a":1}"#).unwrap_err().kind(),
        ErrorKind::InvalidArraySyntax
    );
}

// === End to end ===

#[test]
fn segmented_documents_can_be_filtered() {
    let body = r#"[
        { "title": "The Great Gatsby", "pages": 180 },
        { "title": "East of Eden", "pages": 601 },
        { "title": "Cannery Row", "pages": 208 }
    ]"#;
    let docs: Vec<Json> = segment(body)
        .unwrap()
        .into_iter()
        .map(|s| serde_json::from_str(s).unwrap())
        .collect();

    let filter = compile("pages<250 title!:\"Cannery Row\"").unwrap();
    let hits = query::filter_documents(&filter, &docs);
    assert_eq!(hits, [&docs[0]]);
}
