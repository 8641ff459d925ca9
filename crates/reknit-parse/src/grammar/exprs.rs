use reknit_syntax::SyntaxKind::*;
use reknit_syntax::SyntaxSet;

use super::comma_list;
use crate::parser::{CompletedMarker, Parser};

pub(crate) const EXPR_FIRST: SyntaxSet = SyntaxSet::new([
    IDENTIFIER,
    NUMERIC_LITERAL,
    STRING_LITERAL,
    LEFT_PAREN,
    LEFT_BRACE,
    LEFT_BRACKET,
    BINARY_OPERATOR,
]);

/// Tokens an expression never consumes while recovering.
const EXPR_RECOVERY: SyntaxSet =
    SyntaxSet::new([RIGHT_PAREN, RIGHT_BRACKET, RIGHT_BRACE, SEMICOLON, COMMA, EOF]);

const PROPERTY_FIRST: SyntaxSet = SyntaxSet::new([IDENTIFIER]);

pub(crate) fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.enter() {
        p.error_and_bump("expression nested too deeply");
        return None;
    }

    let result = binary_expr(p);
    p.leave();
    result
}

fn binary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = prefix_expr(p)?;

    while p.at(BINARY_OPERATOR) || p.at(EQ) {
        let m = lhs.precede(p);
        p.advance();
        expr(p);
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

fn prefix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.at(BINARY_OPERATOR) {
        return postfix_expr(p);
    }

    let m = p.start();
    p.advance();
    prefix_expr(p);
    Some(m.complete(p, BINARY_EXPR))
}

fn postfix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = primary_expr(p)?;

    loop {
        lhs = match p.peek_kind() {
            LEFT_PAREN => {
                let m = lhs.precede(p);
                p.advance();
                comma_list(p, RIGHT_PAREN, &EXPR_FIRST, |p| expr(p).is_some());
                p.expect(RIGHT_PAREN, "expected ')'");
                m.complete(p, CALL_EXPR)
            }
            DOT => {
                let m = lhs.precede(p);
                p.advance();
                p.expect(IDENTIFIER, "expected property name");
                m.complete(p, MEMBER_EXPR)
            }
            _ => return Some(lhs),
        };
    }
}

fn primary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.peek_kind() {
        IDENTIFIER | NUMERIC_LITERAL | STRING_LITERAL => {
            let m = p.start();
            p.advance();
            Some(m.leaf())
        }
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            expr(p);
            p.expect(RIGHT_PAREN, "expected ')'");
            Some(m.complete(p, PAREN_EXPR))
        }
        LEFT_BRACE => {
            let m = p.start();
            p.advance();
            comma_list(p, RIGHT_BRACE, &PROPERTY_FIRST, property);
            p.expect(RIGHT_BRACE, "expected '}'");
            Some(m.complete(p, OBJECT_LIT))
        }
        LEFT_BRACKET => {
            let m = p.start();
            p.advance();
            comma_list(p, RIGHT_BRACKET, &EXPR_FIRST, |p| expr(p).is_some());
            p.expect(RIGHT_BRACKET, "expected ']'");
            Some(m.complete(p, ARRAY_LIT))
        }
        kind if EXPR_RECOVERY.contains(kind) => {
            p.error("expected expression");
            None
        }
        _ => {
            p.error_and_bump("expected expression");
            None
        }
    }
}

fn property(p: &mut Parser<'_>) -> bool {
    let m = p.start();
    p.advance();
    if p.eat(COLON) {
        expr(p);
        m.complete(p, PROPERTY_ASSIGNMENT);
    } else {
        m.complete(p, SHORTHAND_PROPERTY);
    }
    true
}
