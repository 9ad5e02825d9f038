use serde::Serialize;
use serde_json::Number;
use std::fmt;

/// Comparison operators understood by the search syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorKind {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}

impl OperatorKind {
    /// Longest-first, so a two-character operator is never split by its
    /// single-character prefix.
    pub const MATCH_ORDER: [OperatorKind; 6] = [
        OperatorKind::GreaterOrEqual,
        OperatorKind::LessOrEqual,
        OperatorKind::NotEquals,
        OperatorKind::GreaterThan,
        OperatorKind::LessThan,
        OperatorKind::Equals,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Equals => ":",
            OperatorKind::NotEquals => "!:",
            OperatorKind::GreaterThan => ">",
            OperatorKind::GreaterOrEqual => ">=",
            OperatorKind::LessThan => "<",
            OperatorKind::LessOrEqual => "<=",
        }
    }

    /// Document-store operator name, `None` for plain equality.
    pub fn native(self) -> Option<&'static str> {
        match self {
            OperatorKind::Equals => None,
            OperatorKind::NotEquals => Some("$ne"),
            OperatorKind::GreaterThan => Some("$gt"),
            OperatorKind::GreaterOrEqual => Some("$gte"),
            OperatorKind::LessThan => Some("$lt"),
            OperatorKind::LessOrEqual => Some("$lte"),
        }
    }

    /// Characters that may never appear inside a field name.
    pub fn is_operator_char(c: char) -> bool {
        matches!(c, ':' | '!' | '>' | '<' | '=')
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Typed right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(Number),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            Value::Text(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// A single `<field> <op> <value>` comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predicate {
    pub field: String,
    pub operator: OperatorKind,
    pub value: Value,
}

/// Implicit conjunction of predicates, kept in input order.
///
/// Never empty: the only constructor that can fail is [`FilterExpression::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterExpression {
    predicates: Vec<Predicate>,
}

impl FilterExpression {
    /// Returns `None` when `predicates` is empty.
    pub fn new(predicates: Vec<Predicate>) -> Option<Self> {
        if predicates.is_empty() {
            None
        } else {
            Some(Self { predicates })
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.predicates.iter()
    }
}

impl<'a> IntoIterator for &'a FilterExpression {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Canonical text rendering
// ─────────────────────────────────────────────────────────────────────────────

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write_number(f, n),
            // Quote anything the lexer would otherwise split or reclassify.
            Value::Text(s) if needs_quotes(s) => write!(f, "\"{s}\""),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Plain decimal, never exponent notation; floats always carry a `.` so they
/// do not reparse as integers.
fn write_number(f: &mut fmt::Formatter<'_>, n: &Number) -> fmt::Result {
    match n.as_f64() {
        Some(x) if n.is_f64() => {
            let plain = x.to_string();
            if plain.contains('.') {
                f.write_str(&plain)
            } else {
                write!(f, "{plain}.0")
            }
        }
        _ => write!(f, "{n}"),
    }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty() || s.chars().any(char::is_whitespace) || crate::predicate::is_numeric_literal(s)
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator, self.value)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    fn pred(field: &str, operator: OperatorKind, value: Value) -> Predicate {
        Predicate {
            field: field.to_string(),
            operator,
            value,
        }
    }

    #[test]
    fn match_order_tries_two_char_operators_first() {
        let order = OperatorKind::MATCH_ORDER;
        let pos = |op| order.iter().position(|o| *o == op).unwrap();
        assert!(pos(OperatorKind::GreaterOrEqual) < pos(OperatorKind::GreaterThan));
        assert!(pos(OperatorKind::LessOrEqual) < pos(OperatorKind::LessThan));
        assert!(pos(OperatorKind::NotEquals) < pos(OperatorKind::Equals));
    }

    #[test]
    fn empty_expression_is_refused() {
        assert!(FilterExpression::new(vec![]).is_none());

        let one = FilterExpression::new(vec![pred("a", OperatorKind::Equals, Value::from(1))])
            .unwrap();
        assert!(!one.is_empty());
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn floats_display_without_exponents() {
        let float = |x: f64| Value::Number(Number::from_f64(x).unwrap());
        assert_eq!(float(0.0000001).to_string(), "0.0000001");
        assert_eq!(float(1e20).to_string(), "100000000000000000000.0");
        assert_eq!(float(10.0).to_string(), "10.0");
        assert_eq!(float(-2.5).to_string(), "-2.5");
        assert_eq!(Value::from(-42).to_string(), "-42");
    }

    #[test]
    fn value_serializes_untagged() {
        assert_eq!(to_value(Value::from(288)).unwrap(), json!(288));
        assert_eq!(to_value(Value::from("Dune")).unwrap(), json!("Dune"));
    }

    #[test]
    fn display_quotes_when_needed() {
        let expr = FilterExpression::new(vec![
            pred("title", OperatorKind::Equals, Value::from("The Great Gatsby")),
            pred("pages", OperatorKind::LessThan, Value::from(250)),
            pred("isbn", OperatorKind::NotEquals, Value::from("0451")),
            pred("series", OperatorKind::Equals, Value::from("")),
            pred("slug", OperatorKind::GreaterOrEqual, Value::from("a-b")),
        ])
        .unwrap();

        assert_eq!(
            expr.to_string(),
            r#"title:"The Great Gatsby" pages<250 isbn!:"0451" series:"" slug>=a-b"#
        );
    }
}
