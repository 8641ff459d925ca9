use std::cell::RefCell;
use std::rc::Rc;

use reknit_parse::ScriptParser;
use reknit_project::{InvalidReconciliation, Node, Project};
use reknit_syntax::SourceParser as _;
use reknit_syntax::SyntaxKind::*;
use reknit_syntax::SyntaxNode;

use super::*;
use crate::Reconciler;

fn project(text: &str) -> (Project, Node) {
    let mut project = Project::new(ScriptParser);
    let file = project.add_source_file("main.rk", text).unwrap();
    (project, file)
}

/// Wraps the node reached from the root by following child indices.
fn wrap(project: &mut Project, file: Node, path: &[usize]) -> Node {
    let mut node = project.tree(file).unwrap().root();
    for &index in path {
        node = node.child(index).unwrap();
    }
    let id = node.id();
    project.get_or_create(file, id).unwrap()
}

/// Pairs the file with a parse of `text` using `handler` at the root and
/// commits the result.
fn reconcile(
    project: &mut Project,
    file: Node,
    text: &str,
    handler: &mut dyn NodeHandler,
) -> Result<(), InvalidReconciliation> {
    let parse = ScriptParser.parse(text).unwrap();
    let tx = {
        let mut cx = Reconciler::new(project, file, parse.tree()).unwrap();
        let (old, new) = (cx.old_root(), cx.new_root());
        handler.handle_node(&mut cx, old, new)?;
        cx.finish()
    };
    project.commit(parse, tx)
}

fn finder(project: &Project, parent: Node, inner: impl NodeHandler + 'static) -> ParentFinder {
    ParentFinder::new(Box::new(inner), project.syntax(parent).unwrap())
}

#[test]
fn straight_replacement_follows_whitespace_changes() {
    let (mut project, file) = project("a; b();");
    let first = wrap(&mut project, file, &[0, 0]);
    let call = wrap(&mut project, file, &[0, 1, 0]);

    reconcile(&mut project, file, "a;\n\nb( );", &mut StraightReplacement).unwrap();

    assert_eq!(project.text(first).unwrap(), "a;");
    assert_eq!(project.text(call).unwrap(), "b( )");
    assert_eq!(project.kind(call), CALL_EXPR);
}

#[test]
fn straight_replacement_rejects_kind_changes() {
    let (mut project, file) = project("a;");
    let statement = wrap(&mut project, file, &[0, 0]);

    let error = reconcile(&mut project, file, "{ }", &mut StraightReplacement).unwrap_err();

    assert!(matches!(error, InvalidReconciliation::KindMismatch { old: EXPR_STMT, new: BLOCK, .. }));
    assert_eq!(project.full_text(file).unwrap(), "a;");
    assert_eq!(project.text(statement).unwrap(), "a;");
}

#[test]
fn straight_replacement_ignores_unwrapped_subtrees() {
    let (mut project, file) = project("a; f(x);");
    let first = wrap(&mut project, file, &[0, 0]);

    reconcile(&mut project, file, "a; f(x, y, z);", &mut StraightReplacement).unwrap();

    assert_eq!(project.text(first).unwrap(), "a;");
}

#[test]
fn default_parent_removes_first_statement() {
    let (mut project, file) = project("{ a(); b(); }");
    let list = wrap(&mut project, file, &[0, 0, 1]);
    let a = wrap(&mut project, file, &[0, 0, 1, 0]);
    let b = wrap(&mut project, file, &[0, 0, 1, 1]);

    let mut handler = finder(&project, list, DefaultParent::new(0, -1));
    reconcile(&mut project, file, "{ b(); }", &mut handler).unwrap();

    assert!(project.was_forgotten(a));
    assert_eq!(project.text(b).unwrap(), "b();");
    assert_eq!(project.statements(file).unwrap().len(), 1);
    assert_eq!(project.children(list).unwrap(), [b]);
}

#[test]
fn default_parent_skips_inserted_children() {
    let (mut project, file) = project("a; c;");
    let list = wrap(&mut project, file, &[0]);
    let a = wrap(&mut project, file, &[0, 0]);
    let c = wrap(&mut project, file, &[0, 1]);

    let mut handler = finder(&project, list, DefaultParent::new(1, 1));
    reconcile(&mut project, file, "a; b; c;", &mut handler).unwrap();

    assert_eq!(project.text(a).unwrap(), "a;");
    assert_eq!(project.text(c).unwrap(), "c;");
    assert_eq!(project.child_index(c).unwrap(), 2);
}

#[test]
fn default_parent_forgets_replaced_nodes() {
    let (mut project, file) = project("a; b; c;");
    let list = wrap(&mut project, file, &[0]);
    let b = wrap(&mut project, file, &[0, 1]);
    let c = wrap(&mut project, file, &[0, 2]);

    let inner = DefaultParent::new(1, 1).with_replacing(vec![b]);
    let mut handler = finder(&project, list, inner);
    reconcile(&mut project, file, "a; x; c;", &mut handler).unwrap();

    assert!(project.was_forgotten(b));
    assert_eq!(project.text(c).unwrap(), "c;");
}

#[test]
fn default_parent_reports_leftover_children() {
    let (mut project, file) = project("a; b;");
    let list = wrap(&mut project, file, &[0]);
    wrap(&mut project, file, &[0, 1]);

    let mut handler = finder(&project, list, DefaultParent::new(0, 1));
    let error = reconcile(&mut project, file, "x; y; a; b;", &mut handler).unwrap_err();

    assert_eq!(error, InvalidReconciliation::LeftoverNewChildren { kind: SYNTAX_LIST, count: 1 });
}

#[test]
fn forget_changed_never_fails() {
    let (mut project, file) = project("a; b(); c;");
    let statement = wrap(&mut project, file, &[0, 1]);
    let call = wrap(&mut project, file, &[0, 1, 0]);
    let last = wrap(&mut project, file, &[0, 2]);

    reconcile(&mut project, file, "a; b;", &mut ForgetChanged).unwrap();

    assert!(project.was_forgotten(call));
    assert!(project.was_forgotten(last));
    assert_eq!(project.text(statement).unwrap(), "b;");
}

#[test]
fn try_or_forget_falls_back_to_forgetting() {
    let (mut project, file) = project("a; b;");
    let a = wrap(&mut project, file, &[0, 0]);
    let b = wrap(&mut project, file, &[0, 1]);

    let mut handler = TryOrForget::new(Box::new(StraightReplacement));
    reconcile(&mut project, file, "a;", &mut handler).unwrap();

    assert!(project.was_forgotten(a));
    assert!(project.was_forgotten(b));
    assert!(!project.was_forgotten(file));
    assert_eq!(project.full_text(file).unwrap(), "a;");
}

#[test]
fn try_or_forget_requires_a_source_file() {
    let (project, file) = project("a;");
    let parse = ScriptParser.parse("a;").unwrap();
    let mut cx = Reconciler::new(&project, file, parse.tree()).unwrap();
    let (old, new) = (cx.old_root().child(0).unwrap(), cx.new_root().child(0).unwrap());

    let mut handler = TryOrForget::new(Box::new(StraightReplacement));
    let error = handler.handle_node(&mut cx, old, new).unwrap_err();

    assert_eq!(error, InvalidReconciliation::NotASourceFile { kind: SYNTAX_LIST });
    drop(cx);
    assert_eq!(project.wrapper_count(file).unwrap(), 1);
}

#[test]
fn child_order_moves_item_and_keeps_commas() {
    let (mut project, file) = project("f(a, b, c);");
    let args = wrap(&mut project, file, &[0, 0, 0, 2]);
    let a = wrap(&mut project, file, &[0, 0, 0, 2, 0]);
    let comma = wrap(&mut project, file, &[0, 0, 0, 2, 1]);
    let c = wrap(&mut project, file, &[0, 0, 0, 2, 4]);

    let mut handler = finder(&project, args, ChangeChildOrder::new(2, 0));
    reconcile(&mut project, file, "f(c, a, b);", &mut handler).unwrap();

    assert_eq!(project.text(a).unwrap(), "a");
    assert_eq!(project.child_index(a).unwrap(), 2);
    assert_eq!(project.child_index(c).unwrap(), 0);
    assert_eq!(project.child_index(comma).unwrap(), 1);
}

#[test]
fn unwrap_promotes_block_statements() {
    let (mut project, file) = project("{ a(); b(); }");
    let root_list = wrap(&mut project, file, &[0]);
    let block = wrap(&mut project, file, &[0, 0]);
    let inner = wrap(&mut project, file, &[0, 0, 1]);
    let a = wrap(&mut project, file, &[0, 0, 1, 0]);
    let b = wrap(&mut project, file, &[0, 0, 1, 1]);

    let mut handler = finder(&project, root_list, Unwrap::new(0));
    reconcile(&mut project, file, "a();\nb();", &mut handler).unwrap();

    assert!(project.was_forgotten(block));
    assert!(project.was_forgotten(inner));
    assert_eq!(project.statements(file).unwrap(), [a, b]);
    assert_eq!(project.text(b).unwrap(), "b();");
}

/// Straight replacement that records the text of every pair it is given.
struct Recording(Rc<RefCell<Vec<(String, String)>>>);

impl NodeHandler for Recording {
    fn handle_node<'a>(
        &mut self,
        cx: &mut Reconciler<'a>,
        old: SyntaxNode<'a>,
        new: SyntaxNode<'a>,
    ) -> Result<(), InvalidReconciliation> {
        self.0.borrow_mut().push((old.text().to_owned(), new.text().to_owned()));
        straight_replace(self, cx, old, new)
    }
}

#[test]
fn parent_finder_tells_nested_members_apart_by_depth() {
    let (mut project, file) = project("a.b.c.d;");
    let outer = wrap(&mut project, file, &[0, 0, 0, 0]);
    let target = wrap(&mut project, file, &[0, 0, 0, 0, 0]);
    let c = wrap(&mut project, file, &[0, 0, 0, 0, 2]);
    assert_eq!(project.text(outer).unwrap(), "a.b.c");
    assert_eq!(project.text(target).unwrap(), "a.b");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut handler = finder(&project, target, Recording(Rc::clone(&seen)));
    reconcile(&mut project, file, "a.bb.c.d;", &mut handler).unwrap();

    assert_eq!(*seen.borrow(), [("a.b".to_owned(), "a.bb".to_owned())]);
    assert!(!project.was_forgotten(c));
    assert_eq!(project.text(c).unwrap(), "c");
    assert_eq!(project.text(outer).unwrap(), "a.bb.c");
    assert_eq!(project.text(target).unwrap(), "a.bb");
}

#[test]
fn rename_turns_shorthand_into_assignment() {
    let (mut project, file) = project("let o = { a };");
    let shorthand = wrap(&mut project, file, &[0, 0, 3, 1, 0]);
    let name = wrap(&mut project, file, &[0, 0, 3, 1, 0, 0]);

    reconcile(&mut project, file, "let o = { a: b };", &mut Rename).unwrap();

    assert!(project.was_forgotten(shorthand));
    assert_eq!(project.text(name).unwrap(), "b");
    let parent = project.parent(name).unwrap().unwrap();
    assert_eq!(project.kind(parent), PROPERTY_ASSIGNMENT);
}

#[test]
fn rename_adds_alias_to_specifiers() {
    let (mut project, file) = project("import { a } from \"m\";\nexport { a };");
    let import = wrap(&mut project, file, &[0, 0, 1, 1, 0]);
    let imported = wrap(&mut project, file, &[0, 0, 1, 1, 0, 0]);
    let export = wrap(&mut project, file, &[0, 1, 1, 1, 0]);
    let exported = wrap(&mut project, file, &[0, 1, 1, 1, 0, 0]);

    reconcile(&mut project, file, "import { a as b } from \"m\";\nexport { b as a };", &mut Rename).unwrap();

    assert_eq!(project.text(import).unwrap(), "a as b");
    assert_eq!(project.text(imported).unwrap(), "b");
    assert_eq!(project.text(export).unwrap(), "b as a");
    assert_eq!(project.text(exported).unwrap(), "b");
}

#[test]
fn range_parent_reuses_matching_replacements() {
    let (mut project, file) = project("a; b; c;");
    let list = wrap(&mut project, file, &[0]);
    let b = wrap(&mut project, file, &[0, 1]);
    let c = wrap(&mut project, file, &[0, 2]);

    let inner = RangeParent::new(3.into(), 5.into()).with_replacing_length(Some(2.into()));
    let mut handler = finder(&project, list, inner);
    reconcile(&mut project, file, "a; x; c;", &mut handler).unwrap();

    assert_eq!(project.text(b).unwrap(), "x;");
    assert_eq!(project.text(c).unwrap(), "c;");
}

#[test]
fn range_parent_skips_inserted_text() {
    let (mut project, file) = project("a; c;");
    let list = wrap(&mut project, file, &[0]);
    let c = wrap(&mut project, file, &[0, 1]);

    let mut handler = finder(&project, list, RangeParent::new(3.into(), 6.into()));
    reconcile(&mut project, file, "a; b; c;", &mut handler).unwrap();

    assert_eq!(project.text(c).unwrap(), "c;");
    assert_eq!(project.child_index(c).unwrap(), 2);
}

#[test]
fn range_descends_into_edited_token() {
    let (mut project, file) = project("f(a);");
    let call = wrap(&mut project, file, &[0, 0, 0]);
    let arg = wrap(&mut project, file, &[0, 0, 0, 2, 0]);

    let mut handler = Range::new(3.into(), 4.into(), 0.into());
    reconcile(&mut project, file, "f(ab);", &mut handler).unwrap();

    assert_eq!(project.text(arg).unwrap(), "ab");
    assert_eq!(project.text(call).unwrap(), "f(ab)");
}

#[test]
fn range_forgets_replaced_children() {
    let (mut project, file) = project("a; b; c;");
    let b = wrap(&mut project, file, &[0, 1]);
    let c = wrap(&mut project, file, &[0, 2]);

    let mut handler = Range::new(3.into(), 3.into(), 3.into());
    reconcile(&mut project, file, "a; c;", &mut handler).unwrap();

    assert!(project.was_forgotten(b));
    assert_eq!(project.text(c).unwrap(), "c;");
}

#[test]
fn default_parent_inserts_before_first_child() {
    let (mut project, file) = project("a; b;");
    let list = wrap(&mut project, file, &[0]);
    let b = wrap(&mut project, file, &[0, 1]);

    let mut handler = finder(&project, list, DefaultParent::new(0, 1));
    reconcile(&mut project, file, "x; a; b;", &mut handler).unwrap();

    assert_eq!(project.text(b).unwrap(), "b;");
    assert_eq!(project.child_index(b).unwrap(), 2);
}
