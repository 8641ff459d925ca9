use reknit_syntax::SyntaxKind::{self, *};
use reknit_syntax::SyntaxSet;

use super::{comma_list, exprs, name, stmts};
use crate::parser::Parser;

const SPECIFIER_FIRST: SyntaxSet = SyntaxSet::new([IDENTIFIER]);

pub(crate) fn import_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    named_specifiers(p, NAMED_IMPORTS, IMPORT_SPECIFIER);
    p.expect(FROM_KW, "expected 'from'");
    p.expect(STRING_LITERAL, "expected a module specifier");
    p.expect(SEMICOLON, "expected ';'");
    m.complete(p, IMPORT_DECL);
}

pub(crate) fn export_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    named_specifiers(p, NAMED_EXPORTS, EXPORT_SPECIFIER);
    p.expect(SEMICOLON, "expected ';'");
    m.complete(p, EXPORT_DECL);
}

fn named_specifiers(p: &mut Parser<'_>, kind: SyntaxKind, specifier: SyntaxKind) {
    if !p.at(LEFT_BRACE) {
        p.error("expected '{'");
        return;
    }

    let m = p.start();
    p.advance();
    comma_list(p, RIGHT_BRACE, &SPECIFIER_FIRST, |p| {
        let m = p.start();
        p.advance();
        if p.eat(AS_KW) {
            name(p);
        }
        m.complete(p, specifier);
        true
    });
    p.expect(RIGHT_BRACE, "expected '}'");
    m.complete(p, kind);
}

/// Declarations may be preceded by doc comments, which become their first
/// children.
pub(crate) fn declaration(p: &mut Parser<'_>) {
    let m = p.start();
    while p.eat(DOC_COMMENT) {}

    let kind = match p.peek_kind() {
        FUNCTION_KW => {
            p.advance();
            name(p);
            params(p);
            stmts::block(p);
            FUNCTION_DECL
        }
        NAMESPACE_KW => {
            p.advance();
            name(p);
            stmts::block(p);
            NAMESPACE_DECL
        }
        LET_KW | CONST_KW => {
            p.advance();
            name(p);
            if p.eat(EQ) {
                exprs::expr(p);
            }
            p.expect(SEMICOLON, "expected ';'");
            VARIABLE_STMT
        }
        _ => {
            p.error("expected a declaration after a doc comment");
            ERROR
        }
    };

    m.complete(p, kind);
}

fn params(p: &mut Parser<'_>) {
    if !p.eat(LEFT_PAREN) {
        p.error("expected function parameters");
        return;
    }

    comma_list(p, RIGHT_PAREN, &SPECIFIER_FIRST, |p| {
        let m = p.start();
        p.advance();
        m.complete(p, PARAMETER);
        true
    });
    p.expect(RIGHT_PAREN, "expected ')'");
}
