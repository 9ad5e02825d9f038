use regex::Regex;
use serde_json::Number;
use std::sync::LazyLock;
use tracing::trace;

use crate::ast::{Predicate, Value};
use crate::lexer::Token;

/// Optionally signed base-10 integer or decimal. No exponents, no `inf`/`NaN`.
static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("numeric literal regex")
});

pub fn is_numeric_literal(raw: &str) -> bool {
    NUMERIC_LITERAL.is_match(raw)
}

/// Classify a raw value. Quoted values are always text.
pub fn classify(raw: &str, was_quoted: bool) -> Value {
    if was_quoted || !is_numeric_literal(raw) {
        return Value::Text(raw.to_string());
    }

    parse_number(raw)
        .map(Value::Number)
        .unwrap_or_else(|| Value::Text(raw.to_string()))
}

fn parse_number(raw: &str) -> Option<Number> {
    let is_integral = !raw.contains('.');
    if is_integral {
        if let Ok(n) = raw.parse::<i64>() {
            return Some(Number::from(n));
        }
    }
    // Non-integral or out of i64 range; a digit string long enough to
    // overflow f64 stays text.
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Turn a lexed token into a typed predicate.
pub fn build(token: Token) -> Predicate {
    let value = classify(&token.raw_value, token.was_quoted);
    trace!(field = %token.field, operator = ?token.operator, ?value, "built predicate");
    Predicate {
        field: token.field,
        operator: token.operator,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::OperatorKind;

    fn token(raw: &str, was_quoted: bool) -> Token {
        Token {
            field: "f".to_string(),
            operator: OperatorKind::Equals,
            raw_value: raw.to_string(),
            was_quoted,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // numeric literal recognition
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn numeric_literals_accepted() {
        for raw in ["0", "288", "-12", "+7", "3.14", "-0.5", "10.", ".25"] {
            assert!(is_numeric_literal(raw), "{raw} should be numeric");
        }
    }

    #[test]
    fn non_numeric_literals_rejected() {
        for raw in [
            "",
            "+",
            "-",
            ".",
            "1e5",
            "inf",
            "NaN",
            "0x1F",
            "1,000",
            "12abc",
            "Slaughterhouse-Five",
            "1.2.3",
            " 1",
        ] {
            assert!(!is_numeric_literal(raw), "{raw} should not be numeric");
        }
    }

    // ─────────────────────────────────────────────────────────────
    // classification
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn integers_stay_integers() {
        let v = classify("288", false);
        assert_eq!(v, Value::from(288));
        assert!(v.as_number().unwrap().is_i64());
    }

    #[test]
    fn decimals_become_floats() {
        let v = classify("-2.5", false);
        assert_eq!(v.as_number().and_then(Number::as_f64), Some(-2.5));
    }

    #[test]
    fn integers_beyond_i64_fall_back_to_float() {
        let v = classify("99999999999999999999", false);
        let n = v.as_number().expect("number");
        assert!(n.is_f64());
    }

    #[test]
    fn quoted_numerics_are_text() {
        assert_eq!(classify("288", true), Value::from("288"));
    }

    #[test]
    fn hyphenated_words_are_text() {
        assert_eq!(
            classify("Slaughterhouse-Five", false),
            Value::from("Slaughterhouse-Five")
        );
    }

    #[test]
    fn build_keeps_field_and_operator() {
        let mut t = token("464", false);
        t.field = "pages".to_string();
        t.operator = OperatorKind::GreaterOrEqual;

        let p = build(t);
        assert_eq!(p.field, "pages");
        assert_eq!(p.operator, OperatorKind::GreaterOrEqual);
        assert_eq!(p.value, Value::from(464));
    }

    #[test]
    fn build_does_not_check_operator_value_compatibility() {
        let mut t = token("five", false);
        t.operator = OperatorKind::GreaterThan;
        assert_eq!(build(t).value, Value::from("five"));
    }
}
