#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    SEMICOLON,
    COMMA,
    COLON,
    DOT,
    EQ,
    BINARY_OPERATOR,

    IMPORT_KW,
    EXPORT_KW,
    FROM_KW,
    AS_KW,
    FUNCTION_KW,
    NAMESPACE_KW,
    LET_KW,
    CONST_KW,
    IF_KW,
    ELSE_KW,
    RETURN_KW,

    IDENTIFIER,
    NUMERIC_LITERAL,
    STRING_LITERAL,
    DOC_COMMENT,

    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    UNKNOWN,
    EOF,

    SOURCE_FILE,
    SYNTAX_LIST,
    IMPORT_DECL,
    NAMED_IMPORTS,
    IMPORT_SPECIFIER,
    EXPORT_DECL,
    NAMED_EXPORTS,
    EXPORT_SPECIFIER,
    FUNCTION_DECL,
    PARAMETER,
    NAMESPACE_DECL,
    VARIABLE_STMT,
    BLOCK,
    IF_STMT,
    RETURN_STMT,
    EXPR_STMT,
    EMPTY_STMT,
    CALL_EXPR,
    MEMBER_EXPR,
    BINARY_EXPR,
    PAREN_EXPR,
    OBJECT_LIT,
    PROPERTY_ASSIGNMENT,
    SHORTHAND_PROPERTY,
    ARRAY_LIT,
    ERROR,
    TOMBSTONE,
}

impl SyntaxKind {
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Tokens are the leaves of a tree; everything after `EOF` is a node.
    pub const fn is_token(self) -> bool {
        self as u16 <= Self::EOF as u16
    }

    pub const fn is_keyword(self) -> bool {
        self as u16 >= Self::IMPORT_KW as u16 && self as u16 <= Self::RETURN_KW as u16
    }

    pub const fn is_list(self) -> bool {
        matches!(self, Self::SYNTAX_LIST)
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "import" => Self::IMPORT_KW,
            "export" => Self::EXPORT_KW,
            "from" => Self::FROM_KW,
            "as" => Self::AS_KW,
            "function" => Self::FUNCTION_KW,
            "namespace" => Self::NAMESPACE_KW,
            "let" => Self::LET_KW,
            "const" => Self::CONST_KW,
            "if" => Self::IF_KW,
            "else" => Self::ELSE_KW,
            "return" => Self::RETURN_KW,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SyntaxKind;

    #[test]
    fn token_and_node_partition() {
        assert!(SyntaxKind::EOF.is_token());
        assert!(SyntaxKind::IDENTIFIER.is_token());
        assert!(!SyntaxKind::SOURCE_FILE.is_token());
        assert!(!SyntaxKind::SYNTAX_LIST.is_token());
        assert!(SyntaxKind::AS_KW.is_keyword());
        assert!(!SyntaxKind::IDENTIFIER.is_keyword());
        assert_eq!(SyntaxKind::from_keyword("namespace"), Some(SyntaxKind::NAMESPACE_KW));
        assert_eq!(SyntaxKind::from_keyword("namespaces"), None);
    }
}
