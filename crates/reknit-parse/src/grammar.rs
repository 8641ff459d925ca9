use reknit_syntax::SyntaxKind::{self, *};
use reknit_syntax::SyntaxSet;

use crate::parser::Parser;

mod exprs;
mod items;
mod stmts;

pub(crate) fn source_file(p: &mut Parser<'_>) {
    let m = p.start();
    p.start_list();

    while !p.at(EOF) {
        stmts::stmt(p);
    }

    p.finish_list();
    p.finish_file();
    m.complete(p, SOURCE_FILE);
}

pub(crate) fn name(p: &mut Parser<'_>) {
    p.expect(IDENTIFIER, "expected identifier");
}

/// Parses `item (, item)* ,?` into a `SYNTAX_LIST` that keeps the commas.
/// The caller owns the surrounding brackets.
pub(crate) fn comma_list(
    p: &mut Parser<'_>,
    ket: SyntaxKind,
    first_set: &SyntaxSet,
    mut item: impl FnMut(&mut Parser<'_>) -> bool,
) {
    p.start_list();

    while !p.at(ket) && !p.at(EOF) {
        if p.at(COMMA) {
            p.error_and_bump("unexpected ','");
            continue;
        }

        if !first_set.contains(p.peek_kind()) || !item(p) {
            break;
        }

        if !p.eat(COMMA) {
            if first_set.contains(p.peek_kind()) {
                p.error("expected ','");
            } else {
                break;
            }
        }
    }

    p.finish_list();
}
