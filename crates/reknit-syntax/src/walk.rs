use crate::SyntaxNode;

/// What a visitor wants to happen after it has seen a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Descend into the node's children.
    Continue,
    /// Do not descend, but keep visiting siblings.
    SkipChildren,
    /// Stop visiting the node's siblings and resume after its parent.
    Up,
    /// End the walk.
    Stop,
}

impl<'a> SyntaxNode<'a> {
    /// Visits the descendants of this node in preorder.
    ///
    /// Returns [`WalkControl::Stop`] when the visitor stopped the walk and
    /// [`WalkControl::Continue`] otherwise.
    pub fn walk(self, visitor: &mut impl FnMut(SyntaxNode<'a>) -> WalkControl) -> WalkControl {
        for child in self.children() {
            match visitor(child) {
                WalkControl::Continue => {
                    if child.walk(visitor) == WalkControl::Stop {
                        return WalkControl::Stop;
                    }
                }
                WalkControl::SkipChildren => {}
                WalkControl::Up => return WalkControl::Continue,
                WalkControl::Stop => return WalkControl::Stop,
            }
        }
        WalkControl::Continue
    }

    /// All descendants in preorder, not including `self`.
    pub fn descendants(self) -> Vec<SyntaxNode<'a>> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            out.push(node);
            WalkControl::Continue
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::SyntaxKind::*;
    use crate::{Builder, SyntaxTree, TextRange, TextSize, WalkControl};

    /// `(a)(b)` as two calls in one list.
    fn tree() -> SyntaxTree {
        let at = |start: u32| TextRange::at(TextSize::new(start), TextSize::new(1));
        let mut builder = Builder::new("(a)(b)");
        builder.start_node(SOURCE_FILE);
        builder.start_list();
        for start in [0, 3] {
            builder.start_node(PAREN_EXPR);
            builder.token(LEFT_PAREN, at(start));
            builder.token(IDENTIFIER, at(start + 1));
            builder.token(RIGHT_PAREN, at(start + 2));
            builder.finish_node();
        }
        builder.finish_list();
        builder.token(EOF, TextRange::empty(TextSize::new(6)));
        builder.finish_node();
        builder.finish()
    }

    fn visit(tree: &SyntaxTree, mut control: impl FnMut(&str) -> WalkControl) -> String {
        let mut seen = Vec::new();
        tree.root().walk(&mut |node| {
            let label = if node.is_token() { node.text().to_owned() } else { format!("{:?}", node.kind()) };
            let result = control(&label);
            seen.push(label);
            result
        });
        seen.join(" ")
    }

    #[test]
    fn continue_visits_everything() {
        let tree = tree();
        assert_eq!(
            visit(&tree, |_| WalkControl::Continue),
            "SYNTAX_LIST PAREN_EXPR ( a ) PAREN_EXPR ( b ) "
        );
        assert_eq!(tree.root().descendants().len(), 10);
    }

    #[test]
    fn skip_children() {
        let tree = tree();
        let seen = visit(&tree, |label| {
            if label == "PAREN_EXPR" { WalkControl::SkipChildren } else { WalkControl::Continue }
        });
        assert_eq!(seen, "SYNTAX_LIST PAREN_EXPR PAREN_EXPR ");
    }

    #[test]
    fn up_leaves_the_parent() {
        let tree = tree();
        let seen = visit(&tree, |label| if label == "a" { WalkControl::Up } else { WalkControl::Continue });
        assert_eq!(seen, "SYNTAX_LIST PAREN_EXPR ( a PAREN_EXPR ( b ) ");
    }

    #[test]
    fn stop_ends_the_walk() {
        let tree = tree();
        let seen = visit(&tree, |label| if label == "a" { WalkControl::Stop } else { WalkControl::Continue });
        assert_eq!(seen, "SYNTAX_LIST PAREN_EXPR ( a");
    }
}
