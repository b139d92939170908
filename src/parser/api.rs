use pest::error::LineColLocation;
use pest_consume::{match_nodes, Error, Parser};

use super::ast::NamePath;
use crate::runner::ds::error::ClassError;

type ParseResult<T> = std::result::Result<T, Error<Rule>>;
type Node<'i> = pest_consume::Node<'i, Rule, ()>;

#[derive(Parser)]
#[grammar = "parser/name_grammar.pest"] // relative to src
pub struct NameParser;

#[pest_consume::parser]
impl NameParser {
    fn segment(input: Node) -> ParseResult<String> {
        Ok(input.as_str().to_string())
    }

    fn name_path(input: Node) -> ParseResult<Vec<String>> {
        Ok(match_nodes!(input.into_children();
            [segment(segments)..] => segments.collect(),
        ))
    }
}

impl NameParser {
    /// Splits a dotted class name into its segments.
    ///
    /// Every segment must be an identifier (`[A-Za-z_$][A-Za-z0-9_$]*`); empty
    /// names and empty segments (`"A..B"`, `".A"`) are rejected.
    pub fn parse_name(name: &str) -> Result<NamePath, ClassError> {
        let segments = NameParser::parse(Rule::name_path, name)
            .and_then(|nodes| nodes.single())
            .and_then(NameParser::name_path)
            .map_err(|e| to_invalid_name(name, e))?;
        Ok(NamePath::new(segments))
    }
}

fn to_invalid_name(name: &str, error: Error<Rule>) -> ClassError {
    let column = match error.line_col {
        LineColLocation::Pos((_, col)) => col,
        LineColLocation::Span((_, col), _) => col,
    };
    ClassError::InvalidName(format!(
        "'{}' at column {}: {}",
        name,
        column,
        error.variant.message()
    ))
}
