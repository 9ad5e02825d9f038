//! Text-to-filter search compiler and relaxed object-array segmenter.
//!
//! `title:"The Great Gatsby" pages<250` compiles to a [`FilterExpression`],
//! an ordered conjunction of typed predicates that renders to a document-store
//! filter with [`FilterExpression::to_native`]. [`segment`] splits a bracketed
//! list of loosely formatted object literals into one string per object.

pub mod ast;
pub mod compiler;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod native;
pub mod predicate;
pub mod segment;

pub use ast::{FilterExpression, OperatorKind, Predicate, Value};
pub use compiler::compile;
pub use error::{ErrorKind, QueryError, Result};
pub use eval::{filter_documents, matches};
pub use lexer::{tokenize, Token};
pub use segment::{segment, segment_with, SegmentOptions};
