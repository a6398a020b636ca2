//! Parser for the composed-label notation produced by `Node::operation`.
//!
//! ```text
//! node := "Leaf" | "Branch" "(" [ node ( "+" node )* ] ")"
//! ```
//! Whitespace around tokens is ignored. Branches nest at most
//! [`MAX_DEPTH`] deep.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::multispace0;
use nom::combinator::{all_consuming, map};
use nom::error::{Error, ErrorKind, ParseError};
use nom::multi::separated_list0;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, BRANCH_LABEL, LEAF_LABEL, SEPARATOR};

/// Deepest branch nesting accepted in an expression.
pub const MAX_DEPTH: usize = 256;

/// A combinator that takes a parser `inner` and produces a parser that also consumes both leading and
/// trailing whitespace, returning the output of `inner`.
fn ws<'a, F, O, E: ParseError<&'a str>>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Parser<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

fn leaf(input: &str) -> IResult<&str, Node> {
    map(ws(tag(LEAF_LABEL)), |_| Node::leaf())(input)
}

/// `depth` counts the branches enclosing this one, itself included.
fn branch(input: &str, depth: usize) -> IResult<&str, Node> {
    let (rest, _) = ws(tag(BRANCH_LABEL))(input)?;
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    map(
        delimited(
            ws(tag("(")),
            separated_list0(ws(tag(SEPARATOR)), |i| node(i, depth + 1)),
            ws(tag(")")),
        ),
        |children: Vec<Node>| Node::branch(children),
    )(rest)
}

fn node(input: &str, depth: usize) -> IResult<&str, Node> {
    alt((|i| branch(i, depth), leaf))(input)
}

/// Parses a whole expression into a node.
#[instrument(level = "debug")]
pub fn parse_node(input: &str) -> DomainResult<Node> {
    match all_consuming(|i| node(i, 1))(input) {
        Ok((_, parsed)) => Ok(parsed),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let position = input.len() - e.input.len();
            debug!("parse failed at {}: {:?}", position, e.code);
            let message = match e.code {
                ErrorKind::TooLarge => format!("nesting too deep (max {})", MAX_DEPTH),
                _ => format!("unexpected input {:?}", truncate(e.input)),
            };
            Err(DomainError::Parse { position, message })
        }
        Err(nom::Err::Incomplete(_)) => Err(DomainError::Parse {
            position: input.len(),
            message: "incomplete input".to_string(),
        }),
    }
}

fn truncate(s: &str) -> &str {
    match s.char_indices().nth(16) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Leaf")]
    #[case("Branch()")]
    #[case("Branch(Leaf)")]
    #[case("Branch(Branch(Leaf+Leaf)+Branch(Leaf))")]
    #[case("Branch(Leaf+Branch(Branch()+Leaf)+Leaf)")]
    fn given_operation_output_when_parsing_then_round_trips(#[case] expr: &str) {
        let node = parse_node(expr).unwrap();
        assert_eq!(node.operation(), expr);
    }

    #[test]
    fn given_whitespace_when_parsing_then_ignored() {
        let node = parse_node("  Branch ( Leaf + Leaf )\n").unwrap();
        assert_eq!(node.operation(), "Branch(Leaf+Leaf)");
    }

    #[rstest]
    #[case("")]
    #[case("Leef")]
    #[case("Branch(Leaf+)")]
    #[case("Branch(Leaf")]
    #[case("Leaf Leaf")]
    fn given_malformed_input_when_parsing_then_parse_error(#[case] expr: &str) {
        assert!(matches!(parse_node(expr), Err(DomainError::Parse { .. })));
    }

    fn nested(depth: usize) -> String {
        "Branch(".repeat(depth) + &")".repeat(depth)
    }

    #[test]
    fn given_max_depth_expression_when_parsing_then_accepted() {
        let expr = nested(MAX_DEPTH);
        let node = parse_node(&expr).unwrap();
        assert_eq!(node.operation(), expr);
    }

    #[rstest]
    #[case::one_past_limit(MAX_DEPTH + 1)]
    #[case::far_past_limit(200_000)]
    fn given_over_deep_expression_when_parsing_then_nesting_error(#[case] depth: usize) {
        let err = parse_node(&nested(depth)).unwrap_err();
        assert_eq!(
            err,
            DomainError::Parse {
                position: MAX_DEPTH * "Branch(".len(),
                message: format!("nesting too deep (max {})", MAX_DEPTH),
            }
        );
    }

    #[test]
    fn given_trailing_garbage_when_parsing_then_reports_offset() {
        let err = parse_node("Branch(Leaf)x").unwrap_err();
        assert_eq!(
            err,
            DomainError::Parse {
                position: 12,
                message: "unexpected input \"x\"".to_string()
            }
        );
    }
}
