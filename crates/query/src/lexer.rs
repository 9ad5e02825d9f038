// crates/query/src/lexer.rs

use tracing::{debug, instrument};

use crate::ast::OperatorKind;
use crate::error::{QueryError, Result};

/// One `field<op>value` group of a search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub field: String,
    pub operator: OperatorKind,
    pub raw_value: String,
    pub was_quoted: bool,
}

/// Split a search string into tokens.
///
/// Groups are separated by whitespace; a `"..."` span is never split even if it
/// contains whitespace. Quotes cannot be escaped.
#[instrument(skip_all, fields(len = input.len()))]
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let groups = split_groups(input)?;
    let tokens = groups
        .into_iter()
        .map(lex_group)
        .collect::<Result<Vec<_>>>()?;

    debug!(count = tokens.len(), "tokenized search string");
    Ok(tokens)
}

/// Quote-aware whitespace splitting.
fn split_groups(input: &str) -> Result<Vec<&str>> {
    let mut groups = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_quotes = false;

    for (i, c) in input.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        }

        if c.is_whitespace() && !in_quotes {
            if let Some(s) = start.take() {
                groups.push(&input[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        let group = &input[s..];
        if in_quotes {
            return Err(QueryError::malformed(group, "unterminated quote"));
        }
        groups.push(group);
    }

    Ok(groups)
}

/// Leftmost operator in `group`, longest match at each position.
fn find_operator(group: &str) -> Option<(usize, OperatorKind)> {
    group.char_indices().find_map(|(i, _)| {
        let rest = &group[i..];
        OperatorKind::MATCH_ORDER
            .iter()
            .find(|op| rest.starts_with(op.symbol()))
            .map(|op| (i, *op))
    })
}

fn lex_group(group: &str) -> Result<Token> {
    let (at, operator) =
        find_operator(group).ok_or_else(|| QueryError::malformed(group, "no operator"))?;

    let field = &group[..at];
    let raw = &group[at + operator.symbol().len()..];

    if field.is_empty() {
        return Err(QueryError::malformed(group, "empty field"));
    }
    if field
        .chars()
        .any(|c| OperatorKind::is_operator_char(c) || c == '"')
    {
        return Err(QueryError::malformed(group, "invalid character in field"));
    }
    if raw.is_empty() {
        return Err(QueryError::malformed(group, "empty value"));
    }

    let (raw_value, was_quoted) = match raw.strip_prefix('"') {
        Some(rest) => {
            let inner = rest
                .strip_suffix('"')
                .ok_or_else(|| QueryError::malformed(group, "unterminated quote"))?;
            if inner.contains('"') {
                return Err(QueryError::malformed(group, "unexpected quote in value"));
            }
            (inner, true)
        }
        None if raw.contains('"') => {
            return Err(QueryError::malformed(group, "unexpected quote in value"));
        }
        None => (raw, false),
    };

    Ok(Token {
        field: field.to_string(),
        operator,
        raw_value: raw_value.to_string(),
        was_quoted,
    })
}
