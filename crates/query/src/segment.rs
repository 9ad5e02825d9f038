// crates/query/src/segment.rs

use tracing::{debug, instrument, trace};

use crate::error::{QueryError, Result};

/// Knobs for [`segment_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Suspend brace counting inside `"..."` and `'...'` string literals.
    ///
    /// With this off, a `{` or `}` inside a string value corrupts the depth
    /// count, the same as plain brace counting. With it on, an apostrophe that
    /// is not a string delimiter (e.g. inside a `/it's/` regex literal) opens a
    /// string that never closes.
    pub quote_aware: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self { quote_aware: true }
    }
}

/// Split `[ {...}, {...} ]` into its top-level object literals, in order,
/// with default options.
///
/// Each segment is a verbatim `{...}` span; nothing inside it is parsed, so
/// relaxed dialects (regex literals, unquoted keys, type wrappers) pass through.
pub fn segment(input: &str) -> Result<Vec<&str>> {
    segment_with(input, SegmentOptions::default())
}

#[instrument(skip(input), fields(len = input.len()))]
pub fn segment_with(input: &str, opts: SegmentOptions) -> Result<Vec<&str>> {
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| QueryError::invalid_array("input must start with `[` and end with `]`"))?;

    let Some(first) = inner.find('{') else {
        debug!("no objects in array");
        return Ok(Vec::new());
    };

    let body = &inner[first..];
    let mut segments = Vec::new();
    let mut scanner = Scanner::new(opts.quote_aware);
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        if scanner.in_string(c) {
            continue;
        }
        match c {
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    QueryError::invalid_array(format!("unbalanced `}}` at offset {}", first + i + 1))
                })?;
                if depth == 0 {
                    let object = body[start..=i].trim_matches(|c: char| c == ',' || c.is_whitespace());
                    trace!(index = segments.len(), len = object.len(), "segmented object");
                    segments.push(object);
                }
            }
            _ => {}
        }
    }

    if scanner.quote.is_some() {
        return Err(QueryError::invalid_array("unterminated string literal"));
    }
    if depth != 0 {
        return Err(QueryError::invalid_array(format!(
            "unbalanced braces: {depth} object(s) left open"
        )));
    }

    debug!(count = segments.len(), "segmented object array");
    Ok(segments)
}

/// String-literal state for the brace scanner.
struct Scanner {
    enabled: bool,
    quote: Option<char>,
    escaped: bool,
}

impl Scanner {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            quote: None,
            escaped: false,
        }
    }

    /// Feed one character; `true` when it belongs to a string literal
    /// (including the quotes themselves) and must not be brace-counted.
    fn in_string(&mut self, c: char) -> bool {
        if !self.enabled {
            return false;
        }
        match self.quote {
            Some(q) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == q {
                    self.quote = None;
                }
                true
            }
            None if c == '"' || c == '\'' => {
                self.quote = Some(c);
                true
            }
            None => false,
        }
    }
}
