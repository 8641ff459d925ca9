//! Closed dispatch from syntax kinds to wrapper classes.
//!
//! Every wrapper gets its class and capability set from [`descriptor`] once,
//! at creation. Both stay fixed for the wrapper's lifetime, which is why a
//! rebind across kinds is rejected.

use bitflags::bitflags;
use reknit_syntax::SyntaxKind::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    SourceFile,
    SyntaxList,
    Block,
    ImportDeclaration,
    NamedImports,
    ImportSpecifier,
    ExportDeclaration,
    NamedExports,
    ExportSpecifier,
    FunctionDeclaration,
    Parameter,
    NamespaceDeclaration,
    VariableStatement,
    IfStatement,
    ReturnStatement,
    ExpressionStatement,
    EmptyStatement,
    CallExpression,
    MemberExpression,
    BinaryExpression,
    ParenthesizedExpression,
    ObjectLiteral,
    PropertyAssignment,
    ShorthandPropertyAssignment,
    ArrayLiteral,
    Identifier,
    Literal,
    DocComment,
    Token,
    Error,
}

bitflags! {
    /// What a wrapper class can do, checked instead of matching on classes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Has a name identifier.
        const NAMED = 1 << 0;
        /// Owns a list of statements, directly or through its body.
        const STATEMENTED = 1 << 1;
        /// Has a `BLOCK` body child.
        const BODIED = 1 << 2;
        /// Can be replaced by the statements of its body.
        const UNWRAPPABLE = 1 << 3;
        /// Can carry leading doc comments.
        const DOCUMENTABLE = 1 << 4;
        const INITIALIZED = 1 << 5;
        /// Owns a comma separated list.
        const COMMA_LIST = 1 << 6;
        const STATEMENT = 1 << 7;
        const EXPRESSION = 1 << 8;
        const LITERAL = 1 << 9;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub class: NodeClass,
    pub capabilities: Capabilities,
}

impl Descriptor {
    const fn new(class: NodeClass, capabilities: Capabilities) -> Self {
        Self { class, capabilities }
    }
}

pub fn descriptor(kind: SyntaxKind) -> Descriptor {
    use Capabilities as C;
    use NodeClass as N;

    let declaration = C::NAMED | C::STATEMENT | C::DOCUMENTABLE;
    let comma_expr = C::COMMA_LIST | C::EXPRESSION;

    match kind {
        SOURCE_FILE => Descriptor::new(N::SourceFile, C::STATEMENTED),
        SYNTAX_LIST => Descriptor::new(N::SyntaxList, C::empty()),
        BLOCK => Descriptor::new(N::Block, C::STATEMENTED | C::STATEMENT | C::UNWRAPPABLE),
        IMPORT_DECL => Descriptor::new(N::ImportDeclaration, C::STATEMENT),
        NAMED_IMPORTS => Descriptor::new(N::NamedImports, C::COMMA_LIST),
        IMPORT_SPECIFIER => Descriptor::new(N::ImportSpecifier, C::NAMED),
        EXPORT_DECL => Descriptor::new(N::ExportDeclaration, C::STATEMENT),
        NAMED_EXPORTS => Descriptor::new(N::NamedExports, C::COMMA_LIST),
        EXPORT_SPECIFIER => Descriptor::new(N::ExportSpecifier, C::NAMED),
        FUNCTION_DECL => Descriptor::new(
            N::FunctionDeclaration,
            declaration | C::STATEMENTED | C::BODIED | C::UNWRAPPABLE | C::COMMA_LIST,
        ),
        PARAMETER => Descriptor::new(N::Parameter, C::NAMED),
        NAMESPACE_DECL => Descriptor::new(
            N::NamespaceDeclaration,
            declaration | C::STATEMENTED | C::BODIED | C::UNWRAPPABLE,
        ),
        VARIABLE_STMT => Descriptor::new(N::VariableStatement, declaration | C::INITIALIZED),
        IF_STMT => Descriptor::new(N::IfStatement, C::STATEMENT),
        RETURN_STMT => Descriptor::new(N::ReturnStatement, C::STATEMENT),
        EXPR_STMT => Descriptor::new(N::ExpressionStatement, C::STATEMENT),
        EMPTY_STMT => Descriptor::new(N::EmptyStatement, C::STATEMENT),
        CALL_EXPR => Descriptor::new(N::CallExpression, comma_expr),
        MEMBER_EXPR => Descriptor::new(N::MemberExpression, C::NAMED | C::EXPRESSION),
        BINARY_EXPR => Descriptor::new(N::BinaryExpression, C::EXPRESSION),
        PAREN_EXPR => Descriptor::new(N::ParenthesizedExpression, C::EXPRESSION),
        OBJECT_LIT => Descriptor::new(N::ObjectLiteral, comma_expr),
        PROPERTY_ASSIGNMENT => {
            Descriptor::new(N::PropertyAssignment, C::NAMED | C::INITIALIZED)
        }
        SHORTHAND_PROPERTY => Descriptor::new(N::ShorthandPropertyAssignment, C::NAMED),
        ARRAY_LIT => Descriptor::new(N::ArrayLiteral, comma_expr),
        IDENTIFIER => Descriptor::new(N::Identifier, C::EXPRESSION),
        NUMERIC_LITERAL | STRING_LITERAL => {
            Descriptor::new(N::Literal, C::EXPRESSION | C::LITERAL)
        }
        DOC_COMMENT => Descriptor::new(N::DocComment, C::empty()),
        ERROR => Descriptor::new(N::Error, C::empty()),
        _ => Descriptor::new(N::Token, C::empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_are_named_and_documentable() {
        for kind in [FUNCTION_DECL, NAMESPACE_DECL, VARIABLE_STMT] {
            let descriptor = descriptor(kind);
            assert!(descriptor.capabilities.contains(Capabilities::NAMED | Capabilities::DOCUMENTABLE));
        }
        assert!(!descriptor(EXPR_STMT).capabilities.contains(Capabilities::NAMED));
    }

    #[test]
    fn punctuation_falls_back_to_token() {
        assert_eq!(descriptor(COMMA).class, NodeClass::Token);
        assert_eq!(descriptor(RETURN_KW).class, NodeClass::Token);
        assert_eq!(descriptor(STRING_LITERAL).class, NodeClass::Literal);
    }
}
