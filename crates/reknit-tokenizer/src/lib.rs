mod cursor;

use cursor::{Cursor, EOF_CHAR};
pub use reknit_syntax::SyntaxKind;
use reknit_syntax::SyntaxKind::*;
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    const EOF: Self = Self { kind: EOF, range: TextRange::empty(TextSize::new(0)) };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: &'static str,
    pub range: TextRange,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    current: Token,
    comments: Vec<TextRange>,
    errors: Vec<LexError>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Token::EOF,
            comments: Vec::new(),
            errors: Vec::new(),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Comments skipped as trivia so far.
    pub fn take_comments(&mut self) -> Vec<TextRange> {
        std::mem::take(&mut self.comments)
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn text(&self) -> &'a str {
        &self.text[self.range()]
    }

    /// Returns the current token and lexes the next one.
    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let next = self.token();
        std::mem::replace(&mut self.current, next)
    }

    fn trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n');
                    self.comments.push(self.range());
                }
                '/' if self.cursor.second() == '*' && !self.at_doc_comment() => {
                    self.block_comment();
                    self.comments.push(self.range());
                }
                c if c.is_whitespace() => self.cursor.advance_while(char::is_whitespace),
                _ => break,
            }
            self.cursor.reset_pos_within_token();
        }
    }

    /// `/**` starts a doc comment, except for the empty block comment `/**/`.
    fn at_doc_comment(&self) -> bool {
        self.cursor.peek() == '/'
            && self.cursor.second() == '*'
            && self.cursor.third() == '*'
            && self.text[usize::from(self.offset())..].get(3..4) != Some("/")
    }

    fn block_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        loop {
            match self.cursor.advance() {
                '*' if self.cursor.peek() == '/' => {
                    self.cursor.advance();
                    return;
                }
                EOF_CHAR if self.cursor.is_eof() => {
                    self.errors.push(LexError { message: "unterminated comment", range: self.range() });
                    return;
                }
                _ => {}
            }
        }
    }

    fn token(&mut self) -> Token {
        if self.cursor.is_eof() {
            return Token { kind: EOF, range: TextRange::empty(self.offset()) };
        }

        let kind = if self.at_doc_comment() {
            self.block_comment();
            DOC_COMMENT
        } else {
            match self.cursor.advance() {
                '(' => LEFT_PAREN,
                ')' => RIGHT_PAREN,
                '[' => LEFT_BRACKET,
                ']' => RIGHT_BRACKET,
                '{' => LEFT_BRACE,
                '}' => RIGHT_BRACE,
                ';' => SEMICOLON,
                ',' => COMMA,
                ':' => COLON,
                '.' => DOT,
                '0'..='9' => {
                    self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_' || c == '.');
                    NUMERIC_LITERAL
                }
                quote @ ('"' | '\'' | '`') => self.string(quote),
                'A'..='Z' | 'a'..='z' | '_' | '$' => {
                    self.cursor.advance_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
                    SyntaxKind::from_keyword(self.text()).unwrap_or(IDENTIFIER)
                }
                first_char if is_operator(first_char) => {
                    self.cursor.advance_while(is_operator);
                    if self.text() == "=" { EQ } else { BINARY_OPERATOR }
                }
                _ => UNKNOWN,
            }
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        Token { kind, range }
    }

    /// Single and double quoted strings end at the line; backtick strings may
    /// span lines.
    fn string(&mut self, quote: char) -> SyntaxKind {
        loop {
            match self.cursor.peek() {
                '\\' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '\n' if quote != '`' => break,
                c if c == quote => {
                    self.cursor.advance();
                    return STRING_LITERAL;
                }
                _ if self.cursor.is_eof() => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }

        self.errors.push(LexError { message: "unterminated string literal", range: self.range() });
        STRING_LITERAL
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '=' | '-' | '+' | '*' | '/' | '%' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '?')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<(SyntaxKind, &str)> {
        let mut tokenizer = Tokenizer::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token();
            if token.kind == EOF {
                break;
            }
            tokens.push((token.kind, &text[token.range]));
        }
        tokens
    }

    #[test]
    fn punctuation_and_keywords() {
        assert_eq!(
            lex("import { a as b } from 'm';"),
            vec![
                (IMPORT_KW, "import"),
                (LEFT_BRACE, "{"),
                (IDENTIFIER, "a"),
                (AS_KW, "as"),
                (IDENTIFIER, "b"),
                (RIGHT_BRACE, "}"),
                (FROM_KW, "from"),
                (STRING_LITERAL, "'m'"),
                (SEMICOLON, ";"),
            ]
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            lex("x = y == z + 1"),
            vec![
                (IDENTIFIER, "x"),
                (EQ, "="),
                (IDENTIFIER, "y"),
                (BINARY_OPERATOR, "=="),
                (IDENTIFIER, "z"),
                (BINARY_OPERATOR, "+"),
                (NUMERIC_LITERAL, "1"),
            ]
        );
    }

    #[test]
    fn comments_are_trivia_but_doc_comments_are_tokens() {
        let text = "// line\n/* block */ /** doc */ f";
        let mut tokenizer = Tokenizer::new(text);
        let doc = tokenizer.next_token();
        assert_eq!((doc.kind, &text[doc.range]), (DOC_COMMENT, "/** doc */"));
        let name = tokenizer.next_token();
        assert_eq!((name.kind, &text[name.range]), (IDENTIFIER, "f"));

        let comments: Vec<&str> =
            tokenizer.take_comments().into_iter().map(|range| &text[range]).collect();
        assert_eq!(comments, ["// line", "/* block */"]);
    }

    #[test]
    fn empty_block_comment_is_trivia() {
        assert_eq!(lex("/**/ a"), vec![(IDENTIFIER, "a")]);
    }

    #[test]
    fn template_strings_span_lines() {
        assert_eq!(lex("`a\nb` c"), vec![(STRING_LITERAL, "`a\nb`"), (IDENTIFIER, "c")]);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let mut tokenizer = Tokenizer::new("'abc\nd");
        let token = tokenizer.next_token();
        assert_eq!(token.kind, STRING_LITERAL);
        let errors = tokenizer.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unterminated string literal");
    }

    #[test]
    fn eof_sits_at_the_end() {
        let mut tokenizer = Tokenizer::new("a  ");
        tokenizer.next_token();
        let eof = tokenizer.next_token();
        assert_eq!(eof.kind, EOF);
        assert_eq!(eof.range, TextRange::empty(TextSize::new(3)));
    }
}
