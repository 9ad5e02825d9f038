use thiserror::Error;

/// Coarse classification of a [`QueryError`], for callers that map failures
/// onto user-facing responses without inspecting the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyQueryExpression,
    MalformedQuerySyntax,
    InvalidArraySyntax,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("empty query expression")]
    EmptyQueryExpression,

    #[error("malformed query syntax in `{group}`: {reason}")]
    MalformedQuerySyntax { group: String, reason: String },

    #[error("invalid array syntax: {0}")]
    InvalidArraySyntax(String),
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::EmptyQueryExpression => ErrorKind::EmptyQueryExpression,
            QueryError::MalformedQuerySyntax { .. } => ErrorKind::MalformedQuerySyntax,
            QueryError::InvalidArraySyntax(_) => ErrorKind::InvalidArraySyntax,
        }
    }

    #[inline]
    pub fn malformed(group: impl Into<String>, reason: impl Into<String>) -> Self {
        QueryError::MalformedQuerySyntax {
            group: group.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn invalid_array(msg: impl Into<String>) -> Self {
        QueryError::InvalidArraySyntax(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
