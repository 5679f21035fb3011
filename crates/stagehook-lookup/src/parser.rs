//! Parser for `${name query}` lookup expressions.
//!
//! A string parses into an [`Expr`] tree. Lookups nest: in
//! `${hook_data ${var key}.name}` the inner `var` lookup is resolved first and
//! its value becomes part of the outer query. Text that is not part of a
//! complete `${...}` pair stays literal.

use std::fmt;

use crate::error::LookupError;

const OPENER: &str = "${";
const CLOSER: char = '}';

/// A parsed lookup expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Literal text.
    Literal(String),
    /// A single lookup.
    Lookup {
        /// Handler name.
        name: String,
        /// Query passed to the handler, resolved first.
        query: Box<Expr>,
    },
    /// Several parts joined into one string.
    Concat(Vec<Expr>),
}

impl Expr {
    /// Parses a string into an expression tree.
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        let mut frames: Vec<Vec<Expr>> = vec![Vec::new()];
        let mut rest = input;

        while let Some(c) = rest.chars().next() {
            if rest.starts_with(OPENER) {
                frames.push(Vec::new());
                rest = &rest[OPENER.len()..];
                continue;
            }

            if c == CLOSER && frames.len() > 1 {
                let parts = frames.pop().unwrap_or_default();
                let lookup = build_lookup(parts, input)?;
                if let Some(parent) = frames.last_mut() {
                    parent.push(lookup);
                }
            } else if let Some(current) = frames.last_mut() {
                push_text(current, c);
            }
            rest = &rest[c.len_utf8()..];
        }

        // Unclosed openers fall back to literal text.
        while frames.len() > 1 {
            let parts = frames.pop().unwrap_or_default();
            if let Some(parent) = frames.last_mut() {
                push_str(parent, OPENER);
                for part in parts {
                    match part {
                        Expr::Literal(text) => push_str(parent, &text),
                        other => parent.push(other),
                    }
                }
            }
        }

        Ok(simplify(frames.pop().unwrap_or_default()))
    }

    /// Returns whether the expression contains no lookups.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{text}"),
            Self::Lookup { name, query } => write!(f, "${{{name} {query}}}"),
            Self::Concat(parts) => parts.iter().try_for_each(|part| write!(f, "{part}")),
        }
    }
}

fn push_text(parts: &mut Vec<Expr>, c: char) {
    match parts.last_mut() {
        Some(Expr::Literal(text)) => text.push(c),
        _ => parts.push(Expr::Literal(c.to_string())),
    }
}

fn push_str(parts: &mut Vec<Expr>, s: &str) {
    match parts.last_mut() {
        Some(Expr::Literal(text)) => text.push_str(s),
        _ => parts.push(Expr::Literal(s.to_string())),
    }
}

/// Splits the contents of a `${...}` pair into name and query.
///
/// The name runs up to the first whitespace; the whitespace run is dropped
/// and everything after it is the query.
fn build_lookup(parts: Vec<Expr>, input: &str) -> Result<Expr, LookupError> {
    let invalid = |reason: &str| LookupError::InvalidSyntax {
        expression: input.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = parts.into_iter();
    let head = match parts.next() {
        Some(Expr::Literal(text)) => text,
        Some(_) => return Err(invalid("lookup name must be literal text")),
        None => return Err(invalid("empty lookup")),
    };

    let (name, query_head) = match head.find(char::is_whitespace) {
        Some(idx) => {
            let (name, tail) = head.split_at(idx);
            (name.to_string(), tail.trim_start().to_string())
        }
        None => {
            if parts.len() > 0 {
                return Err(invalid("lookup name must be followed by whitespace"));
            }
            (head, String::new())
        }
    };

    if name.is_empty() {
        return Err(invalid("lookup name is empty"));
    }

    let mut query = Vec::new();
    if !query_head.is_empty() {
        query.push(Expr::Literal(query_head));
    }
    query.extend(parts);

    Ok(Expr::Lookup {
        name,
        query: Box::new(simplify(query)),
    })
}

fn simplify(parts: Vec<Expr>) -> Expr {
    let mut parts: Vec<Expr> = parts
        .into_iter()
        .filter(|part| !matches!(part, Expr::Literal(text) if text.is_empty()))
        .collect();

    match parts.len() {
        0 => Expr::Literal(String::new()),
        1 => parts.remove(0),
        _ => Expr::Concat(parts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Expr {
        Expr::Literal(s.to_string())
    }

    fn lookup(name: &str, query: Expr) -> Expr {
        Expr::Lookup {
            name: name.to_string(),
            query: Box::new(query),
        }
    }

    #[test]
    fn test_plain_text_is_literal() {
        assert_eq!(Expr::parse("just text").expect("parse"), lit("just text"));
        assert_eq!(Expr::parse("").expect("parse"), lit(""));
    }

    #[test]
    fn test_single_lookup() {
        let expr = Expr::parse("${default env_var::default_value}").expect("parse");
        assert_eq!(expr, lookup("default", lit("env_var::default_value")));
    }

    #[test]
    fn test_query_keeps_inner_whitespace() {
        let expr = Expr::parse("${default name::a b  c}").expect("parse");
        assert_eq!(expr, lookup("default", lit("name::a b  c")));
    }

    #[test]
    fn test_lookup_without_query() {
        let expr = Expr::parse("${envvar}").expect("parse");
        assert_eq!(expr, lookup("envvar", lit("")));
    }

    #[test]
    fn test_concatenation() {
        let expr = Expr::parse("prefix-${var name}-suffix").expect("parse");
        assert_eq!(
            expr,
            Expr::Concat(vec![
                lit("prefix-"),
                lookup("var", lit("name")),
                lit("-suffix"),
            ])
        );
    }

    #[test]
    fn test_nested_lookup() {
        let expr = Expr::parse("${hook_data ${var key}.name}").expect("parse");
        assert_eq!(
            expr,
            lookup(
                "hook_data",
                Expr::Concat(vec![lookup("var", lit("key")), lit(".name")])
            )
        );
    }

    #[test]
    fn test_unclosed_opener_is_literal() {
        assert_eq!(Expr::parse("cost ${5").expect("parse"), lit("cost ${5"));
        assert_eq!(Expr::parse("a } b").expect("parse"), lit("a } b"));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Expr::parse("${ name}").is_err());
        assert!(Expr::parse("${}").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let input = "x-${var a}-${default b::c}";
        assert_eq!(Expr::parse(input).expect("parse").to_string(), input);
    }
}
