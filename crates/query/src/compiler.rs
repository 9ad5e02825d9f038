use tracing::{debug, instrument};

use crate::ast::FilterExpression;
use crate::error::{QueryError, Result};
use crate::lexer::tokenize;
use crate::predicate::build;

/// Compile a search string into a conjunction of predicates.
///
/// ```
/// use query::{compile, OperatorKind, Value};
///
/// let expr = compile(r#"title:"The Great Gatsby" pages<250"#).unwrap();
/// assert_eq!(expr.len(), 2);
/// assert_eq!(expr.predicates()[1].operator, OperatorKind::LessThan);
/// assert_eq!(expr.predicates()[1].value, Value::from(250));
/// ```
#[instrument(skip_all, fields(len = input.len()))]
pub fn compile(input: &str) -> Result<FilterExpression> {
    if input.trim().is_empty() {
        return Err(QueryError::EmptyQueryExpression);
    }

    let predicates = tokenize(input)?.into_iter().map(build).collect();
    let expr = FilterExpression::new(predicates).ok_or(QueryError::EmptyQueryExpression)?;

    debug!(predicates = expr.len(), "compiled search expression");
    Ok(expr)
}
