use expect_test::expect;
use reknit_syntax::SyntaxKind::{self, *};
use reknit_syntax::{ParseFailure, SyntaxNode, TextRange, TextSize};

use crate::parse;

fn kinds(node: SyntaxNode<'_>) -> Vec<SyntaxKind> {
    node.children().map(SyntaxNode::kind).collect()
}

fn statements(text: &str) -> Vec<SyntaxKind> {
    let parse = parse(text).unwrap();
    kinds(parse.tree().root().child(0).unwrap())
}

#[test]
fn block_of_calls() {
    let parse = parse("{ a(); b(); }").unwrap();
    assert!(parse.diagnostics().is_empty());

    expect![[r#"
        SOURCE_FILE@0..13
          SYNTAX_LIST@0..13
            BLOCK@0..13
              LEFT_BRACE@0..1 "{"
              SYNTAX_LIST@2..11
                EXPR_STMT@2..6
                  CALL_EXPR@2..5
                    IDENTIFIER@2..3 "a"
                    LEFT_PAREN@3..4 "("
                    SYNTAX_LIST@4..4
                    RIGHT_PAREN@4..5 ")"
                  SEMICOLON@5..6 ";"
                EXPR_STMT@7..11
                  CALL_EXPR@7..10
                    IDENTIFIER@7..8 "b"
                    LEFT_PAREN@8..9 "("
                    SYNTAX_LIST@9..9
                    RIGHT_PAREN@9..10 ")"
                  SEMICOLON@10..11 ";"
              RIGHT_BRACE@12..13 "}"
          EOF@13..13 ""
    "#]]
    .assert_eq(&parse.tree().debug_dump());
}

#[test]
fn object_literal_properties() {
    let parse = parse("let o = { a, b: 1 };").unwrap();
    assert!(parse.diagnostics().is_empty());

    expect![[r#"
        SOURCE_FILE@0..20
          SYNTAX_LIST@0..20
            VARIABLE_STMT@0..20
              LET_KW@0..3 "let"
              IDENTIFIER@4..5 "o"
              EQ@6..7 "="
              OBJECT_LIT@8..19
                LEFT_BRACE@8..9 "{"
                SYNTAX_LIST@10..17
                  SHORTHAND_PROPERTY@10..11
                    IDENTIFIER@10..11 "a"
                  COMMA@11..12 ","
                  PROPERTY_ASSIGNMENT@13..17
                    IDENTIFIER@13..14 "b"
                    COLON@14..15 ":"
                    NUMERIC_LITERAL@16..17 "1"
                RIGHT_BRACE@18..19 "}"
              SEMICOLON@19..20 ";"
          EOF@20..20 ""
    "#]]
    .assert_eq(&parse.tree().debug_dump());
}

#[test]
fn stray_closing_parens_become_error_statements() {
    let parse = parse("{ ))) a(); }").unwrap();

    let block = parse.tree().root().child(0).and_then(|list| list.child(0)).unwrap();
    let list = block.child_syntax_list().unwrap();
    assert_eq!(kinds(list), [ERROR, ERROR, ERROR, EXPR_STMT]);

    let diagnostics = parse
        .diagnostics()
        .iter()
        .map(|diagnostic| (diagnostic.message().to_owned(), diagnostic.range()))
        .collect::<Vec<_>>();
    let at = |start: u32| TextRange::at(TextSize::new(start), TextSize::new(1));
    assert_eq!(
        diagnostics,
        [
            ("expected a statement".to_owned(), at(2)),
            ("expected a statement".to_owned(), at(3)),
            ("expected a statement".to_owned(), at(4)),
        ]
    );
}

#[test]
fn missing_semicolon_is_reported() {
    let parse = parse("a() b();").unwrap();
    assert_eq!(kinds(parse.tree().root().child(0).unwrap()), [EXPR_STMT, EXPR_STMT]);
    assert_eq!(parse.diagnostics().len(), 1);
    assert_eq!(parse.diagnostics()[0].message(), "expected ';'");
}

#[test]
fn import_and_export_specifiers() {
    let parse = parse("import { a as b, c } from 'm';\nexport { c };").unwrap();
    assert!(parse.diagnostics().is_empty());

    let list = parse.tree().root().child(0).unwrap();
    assert_eq!(kinds(list), [IMPORT_DECL, EXPORT_DECL]);

    let import = list.child(0).unwrap();
    assert_eq!(kinds(import), [IMPORT_KW, NAMED_IMPORTS, FROM_KW, STRING_LITERAL, SEMICOLON]);

    let specifiers = import.child(1).and_then(|named| named.child_syntax_list()).unwrap();
    assert_eq!(kinds(specifiers), [IMPORT_SPECIFIER, COMMA, IMPORT_SPECIFIER]);
    assert_eq!(kinds(specifiers.child(0).unwrap()), [IDENTIFIER, AS_KW, IDENTIFIER]);
    assert_eq!(kinds(specifiers.child(2).unwrap()), [IDENTIFIER]);
}

#[test]
fn function_with_doc_comment() {
    let parse = parse("/** Adds. */\nfunction add(x, y) { return x + y; }").unwrap();
    assert!(parse.diagnostics().is_empty());

    let function = parse.tree().root().child(0).and_then(|list| list.child(0)).unwrap();
    assert_eq!(
        kinds(function),
        [DOC_COMMENT, FUNCTION_KW, IDENTIFIER, LEFT_PAREN, SYNTAX_LIST, RIGHT_PAREN, BLOCK]
    );
    assert_eq!(function.child(0).map(|doc| doc.text()), Some("/** Adds. */"));
    assert_eq!(kinds(function.child(4).unwrap()), [PARAMETER, COMMA, PARAMETER]);

    let body = function.child(6).and_then(|block| block.child_syntax_list()).unwrap();
    let ret = body.child(0).unwrap();
    assert_eq!(kinds(ret), [RETURN_KW, BINARY_EXPR, SEMICOLON]);
}

#[test]
fn namespaces_and_control_flow() {
    assert_eq!(
        statements("namespace n { if (a) { b(); } else c(); }; x.y(1, 'z');"),
        [NAMESPACE_DECL, EMPTY_STMT, EXPR_STMT]
    );
}

#[test]
fn trailing_comma_is_kept_in_list() {
    let parse = parse("f(a, b,);").unwrap();
    assert!(parse.diagnostics().is_empty());

    let call = parse.tree().root().child(0).and_then(|list| list.child(0)).and_then(|s| s.child(0));
    let args = call.and_then(|call| call.child_syntax_list()).unwrap();
    assert_eq!(kinds(args), [IDENTIFIER, COMMA, IDENTIFIER, COMMA]);
}

#[test]
fn comments_are_trivia() {
    let parse = parse("// one\na; /* two */ b;").unwrap();
    assert_eq!(statements("// one\na; /* two */ b;"), [EXPR_STMT, EXPR_STMT]);
    assert_eq!(
        parse.tree().comments(),
        [
            TextRange::new(TextSize::new(0), TextSize::new(6)),
            TextRange::new(TextSize::new(10), TextSize::new(19)),
        ]
    );

    let second = parse.tree().root().child(0).and_then(|list| list.child(1)).unwrap();
    assert_eq!(second.full_start(), TextSize::new(9));
    assert_eq!(second.start(), TextSize::new(20));
}

#[test]
fn deep_nesting_is_rejected() {
    let text = format!("{}a{};", "(".repeat(300), ")".repeat(300));
    assert!(matches!(parse(&text), Err(ParseFailure::TooDeep { limit: 256 })));
}
