use reknit_syntax::SyntaxKind::*;

use super::{exprs, items};
use crate::parser::Parser;

pub(crate) fn stmt(p: &mut Parser<'_>) {
    if !p.enter() {
        p.error_and_bump("statement nested too deeply");
        return;
    }

    match p.peek_kind() {
        IMPORT_KW => items::import_decl(p),
        EXPORT_KW => items::export_decl(p),
        DOC_COMMENT | FUNCTION_KW | NAMESPACE_KW | LET_KW | CONST_KW => items::declaration(p),
        LEFT_BRACE => block(p),
        IF_KW => if_stmt(p),
        RETURN_KW => return_stmt(p),
        SEMICOLON => {
            let m = p.start();
            p.advance();
            m.complete(p, EMPTY_STMT);
        }
        kind if exprs::EXPR_FIRST.contains(kind) => expr_stmt(p),
        _ => p.error_and_bump("expected a statement"),
    }

    p.leave();
}

pub(crate) fn block(p: &mut Parser<'_>) {
    if !p.at(LEFT_BRACE) {
        p.error("expected a block");
        return;
    }

    let m = p.start();
    p.advance();
    p.start_list();

    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        stmt(p);
    }

    p.finish_list();
    p.expect(RIGHT_BRACE, "expected '}'");
    m.complete(p, BLOCK);
}

fn if_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    p.expect(LEFT_PAREN, "expected '('");
    exprs::expr(p);
    p.expect(RIGHT_PAREN, "expected ')'");
    stmt(p);
    if p.eat(ELSE_KW) {
        stmt(p);
    }
    m.complete(p, IF_STMT);
}

fn return_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    if !p.at(SEMICOLON) && !p.at(RIGHT_BRACE) && !p.at(EOF) {
        exprs::expr(p);
    }
    p.expect(SEMICOLON, "expected ';'");
    m.complete(p, RETURN_STMT);
}

fn expr_stmt(p: &mut Parser<'_>) {
    let Some(lhs) = exprs::expr(p) else {
        return;
    };
    let m = lhs.precede(p);
    p.expect(SEMICOLON, "expected ';'");
    m.complete(p, EXPR_STMT);
}
