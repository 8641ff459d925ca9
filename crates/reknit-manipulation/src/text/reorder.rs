use reknit_syntax::SyntaxKind::{COMMA, FUNCTION_DECL, NAMESPACE_DECL};
use reknit_syntax::{SyntaxNode, TextRange, TextSize};

use super::{TextEditError, TextManipulator, indentation_at, splice, text_for_error};

/// What goes between two siblings that end up next to each other because of
/// a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingFormatting {
    /// Keep the text that was at that position before the move.
    Preserve,
    Space,
    Newline,
    Blankline,
}

/// Blank lines around bodied declarations, line breaks between everything
/// else.
pub fn statement_formatting(previous: SyntaxNode<'_>, next: SyntaxNode<'_>) -> SiblingFormatting {
    let bodied = |node: SyntaxNode<'_>| matches!(node.kind(), FUNCTION_DECL | NAMESPACE_DECL);
    if bodied(previous) || bodied(next) { SiblingFormatting::Blankline } else { SiblingFormatting::Newline }
}

/// Start of `item` including the comments on the lines above it.
pub(crate) fn lead_start(item: SyntaxNode<'_>) -> TextSize {
    let text = item.tree().text();
    let full_start = item.full_start();
    item.tree()
        .comments()
        .iter()
        .filter(|comment| full_start <= comment.start() && comment.end() <= item.start())
        .find(|comment| text[TextRange::new(full_start, comment.start())].contains('\n'))
        .map_or(item.start(), |comment| comment.start())
}

/// End of `item` including a comment that follows it on the same line.
pub(crate) fn trail_end(item: SyntaxNode<'_>) -> TextSize {
    let text = item.tree().text();
    item.tree()
        .comments()
        .iter()
        .find(|comment| {
            comment.start() >= item.end()
                && text[TextRange::new(item.end(), comment.start())].trim_matches([' ', '\t']).is_empty()
        })
        .map_or(item.end(), |comment| comment.end())
}

/// Moves one item of a list to another index.
///
/// Item texts travel with their leading comments. Separators stay where
/// they are, except the ones next to the moved item and the one closing the
/// hole it left, which follow the formatting policy.
#[derive(Debug, Clone)]
pub struct ChangeChildOrder {
    range: TextRange,
    replacement: String,
    moved_start: TextSize,
    moved_len: TextSize,
}

impl ChangeChildOrder {
    /// `from` and `to` count items, not commas.
    pub fn new(
        list: SyntaxNode<'_>,
        from: usize,
        to: usize,
        newline: &str,
        formatting: &dyn Fn(SyntaxNode<'_>, SyntaxNode<'_>) -> SiblingFormatting,
    ) -> Result<Self, TextEditError> {
        let text = list.tree().text();
        let items = list.children().filter(|child| child.kind() != COMMA).collect::<Vec<_>>();
        if from >= items.len() || to >= items.len() {
            return Err(TextEditError::ReorderOutOfBounds { from, to, len: items.len() });
        }
        let comma = if items.len() < list.child_ids().len() { "," } else { "" };

        let spans =
            items.iter().map(|&item| TextRange::new(lead_start(item), trail_end(item))).collect::<Vec<_>>();
        let gaps =
            spans.windows(2).map(|pair| &text[TextRange::new(pair[0].end(), pair[1].start())]).collect::<Vec<_>>();
        let indent = indentation_at(text, spans[0].start().into());

        let mut order = (0..items.len()).collect::<Vec<_>>();
        let moved = order.remove(from);
        order.insert(to, moved);

        let mut touched = vec![to.checked_sub(1), Some(to)];
        touched.push(if from < to { from.checked_sub(1) } else { Some(from) });

        let mut replacement = String::new();
        let mut moved_start = TextSize::new(0);
        for (position, &index) in order.iter().enumerate() {
            if position > 0 {
                let gap = position - 1;
                let separator = if touched.contains(&Some(gap)) {
                    formatting(items[order[gap]], items[index])
                } else {
                    SiblingFormatting::Preserve
                };
                match separator {
                    SiblingFormatting::Preserve => replacement.push_str(gaps[gap]),
                    SiblingFormatting::Space => {
                        replacement.push_str(comma);
                        replacement.push(' ');
                    }
                    SiblingFormatting::Newline => {
                        replacement.push_str(comma);
                        replacement.push_str(newline);
                        replacement.push_str(indent);
                    }
                    SiblingFormatting::Blankline => {
                        replacement.push_str(comma);
                        replacement.push_str(newline);
                        replacement.push_str(newline);
                        replacement.push_str(indent);
                    }
                }
            }
            if index == moved {
                moved_start = TextSize::of(replacement.as_str());
            }
            replacement.push_str(&text[spans[index]]);
        }

        let range = TextRange::new(spans[0].start(), spans[spans.len() - 1].end());
        Ok(Self { range, replacement, moved_start: range.start() + moved_start, moved_len: spans[moved].len() })
    }
}

impl TextManipulator for ChangeChildOrder {
    fn new_text(&self, old: &str) -> Result<String, TextEditError> {
        splice(old, self.range, &self.replacement)
    }

    fn error_snippet(&self, new_text: &str) -> String {
        text_for_error(new_text, self.moved_start, self.moved_len)
    }
}

#[cfg(test)]
mod tests {
    use reknit_parse::parse;
    use reknit_syntax::Parse;

    use super::*;

    fn list<'a>(parse: &'a Parse, path: &[usize]) -> SyntaxNode<'a> {
        let mut list = parse.tree().root();
        for &index in path {
            list = list.child(index).unwrap();
        }
        list
    }

    fn reorder(
        text: &str,
        path: &[usize],
        from: usize,
        to: usize,
        formatting: &dyn Fn(SyntaxNode<'_>, SyntaxNode<'_>) -> SiblingFormatting,
    ) -> String {
        let parse = parse(text).unwrap();
        let list = list(&parse, path);
        ChangeChildOrder::new(list, from, to, "\n", formatting).unwrap().new_text(text).unwrap()
    }

    fn preserve(_: SyntaxNode<'_>, _: SyntaxNode<'_>) -> SiblingFormatting {
        SiblingFormatting::Preserve
    }

    const ARGS: &[usize] = &[0, 0, 0, 2];

    #[test]
    fn moves_statements_with_their_comments() {
        let text = "{\n    a(); // after a\n    // about b\n    b();\n    c();\n}";
        let moved = reorder(text, &[0, 0, 1], 1, 0, &statement_formatting);
        assert_eq!(moved, "{\n    // about b\n    b();\n    a(); // after a\n    c();\n}");
    }

    #[test]
    fn round_trip_restores_text() {
        let text = "{\n    a();\n    b();\n    c();\n}";
        let moved = reorder(text, &[0, 0, 1], 0, 2, &statement_formatting);
        assert_eq!(moved, "{\n    b();\n    c();\n    a();\n}");
        assert_eq!(reorder(&moved, &[0, 0, 1], 2, 0, &statement_formatting), text);
    }

    #[test]
    fn comma_lists_keep_separators_in_place() {
        assert_eq!(reorder("f(a, b, c);", ARGS, 0, 2, &preserve), "f(b, c, a);");
        let space = |_: SyntaxNode<'_>, _: SyntaxNode<'_>| SiblingFormatting::Space;
        assert_eq!(reorder("f(a,b,  c);", ARGS, 2, 0, &space), "f(c, a,  b);");
    }

    #[test]
    fn bodied_declarations_get_blank_lines() {
        let text = "a();\nfunction f() {}";
        assert_eq!(reorder(text, &[0], 1, 0, &statement_formatting), "function f() {}\n\na();");
    }

    #[test]
    fn rejects_out_of_range_moves() {
        let parse = parse("f(a);").unwrap();
        let error = ChangeChildOrder::new(list(&parse, ARGS), 0, 1, "\n", &preserve).unwrap_err();
        assert_eq!(error, TextEditError::ReorderOutOfBounds { from: 0, to: 1, len: 1 });
    }
}
