//! Error-recovering parser for a small brace-and-statement scripting language.
//!
//! Every call builds a fresh [`SyntaxTree`](reknit_syntax::SyntaxTree); there
//! is no incremental reparsing.

use reknit_syntax::{Parse, ParseFailure, SourceParser};

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

/// Maximum nesting of blocks and expressions before parsing gives up.
pub const MAX_DEPTH: usize = 256;

pub fn parse(text: &str) -> Result<Parse, ParseFailure> {
    if u32::try_from(text.len()).is_err() {
        return Err(ParseFailure::TooLarge { len: text.len() });
    }

    let mut parser = parser::Parser::new(text);
    grammar::source_file(&mut parser);
    parser.finish()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptParser;

impl SourceParser for ScriptParser {
    fn parse(&self, text: &str) -> Result<Parse, ParseFailure> {
        parse(text)
    }
}
