//! Route path pattern checks.
//!
//! Paths use axum's syntax: literal segments, `:name` parameters, and a
//! trailing `*name` catch-all. Patterns axum would refuse, or that would
//! overlap an already bound pattern, are rejected here so registration
//! returns an error instead of panicking inside the router.

use crate::error::RouteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
    CatchAll(&'a str),
}

fn segments(path: &str) -> impl Iterator<Item = Segment<'_>> {
    path[1..].split('/').map(|s| {
        if let Some(name) = s.strip_prefix(':') {
            Segment::Param(name)
        } else if let Some(name) = s.strip_prefix('*') {
            Segment::CatchAll(name)
        } else {
            Segment::Literal(s)
        }
    })
}

/// Check that `path` is a pattern axum accepts.
pub(crate) fn validate(path: &str) -> Result<(), RouteError> {
    let invalid = |reason| RouteError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if path.contains(['{', '}']) {
        return Err(invalid("braces are not allowed"));
    }

    let parts: Vec<Segment<'_>> = segments(path).collect();
    let last = parts.len() - 1;
    for (i, segment) in parts.iter().enumerate() {
        match *segment {
            Segment::Literal("") if i != last => {
                return Err(invalid("must not contain empty segments"));
            }
            Segment::Literal(s) if s.contains(['*', ':']) => {
                return Err(invalid("parameters must span a whole segment"));
            }
            Segment::Param(name) | Segment::CatchAll(name)
                if name.is_empty() || name.contains(['*', ':']) =>
            {
                return Err(invalid("parameter names must be non-empty and plain"));
            }
            Segment::CatchAll(_) if i != last => {
                return Err(invalid("catch-all must be the last segment"));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Whether two distinct valid patterns would collide in the router.
///
/// Identical paths never conflict; they are merged per method.
pub(crate) fn conflicts(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }

    for pair in segments(a).zip(segments(b)) {
        match pair {
            (Segment::Literal(x), Segment::Literal(y)) if x == y => continue,
            (Segment::Param(x), Segment::Param(y)) if x == y => continue,
            (Segment::Literal(_), Segment::Literal(_)) => return false,
            (Segment::Literal(_), Segment::Param(_)) | (Segment::Param(_), Segment::Literal(_)) => {
                return false
            }
            _ => return true,
        }
    }

    false
}
