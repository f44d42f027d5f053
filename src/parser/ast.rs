//! Abstract Syntax Tree types for the springbox layout DSL

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric + underscore, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - every top-level statement is laid out as its own tree
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub statements: Vec<Spanned<Statement>>,
}

/// A single element of a box tree
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Leaf item: `box a [width: 10]`, `spring`, `strut [width: 20]`
    Item(ItemDecl),
    /// Layout container: `row { ... }`, `col { ... }`
    Layout(LayoutDecl),
}

impl Statement {
    /// The declared name, if any
    pub fn name(&self) -> Option<&Spanned<Identifier>> {
        match self {
            Statement::Item(i) => i.name.as_ref(),
            Statement::Layout(l) => l.name.as_ref(),
        }
    }

    /// The modifier block (empty when none was written)
    pub fn modifiers(&self) -> &[Spanned<Modifier>] {
        match self {
            Statement::Item(i) => &i.modifiers,
            Statement::Layout(l) => &l.modifiers,
        }
    }
}

/// Leaf item declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDecl {
    pub item_type: Spanned<ItemType>,
    pub name: Option<Spanned<Identifier>>,
    pub modifiers: Vec<Spanned<Modifier>>,
}

/// Leaf item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    /// Ordinary sized element
    Box,
    /// Zero-natural filler that absorbs excess space
    Spring,
    /// Fixed-size filler
    Strut,
}

/// Layout container declaration
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDecl {
    pub layout_type: Spanned<LayoutType>,
    pub name: Option<Spanned<Identifier>>,
    pub children: Vec<Spanned<Statement>>,
    pub modifiers: Vec<Spanned<Modifier>>,
}

/// Layout arrangement strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutType {
    /// Children stacked left to right
    Row,
    /// Children stacked top to bottom
    Column,
}

/// `key: value` pair inside a modifier block
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub key: Spanned<ModifierKey>,
    pub value: Spanned<ModifierValue>,
}

/// Modifier keys understood by the tree builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierKey {
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    Justify,
    Custom(String),
}

impl ModifierKey {
    pub fn from_ident(ident: &str) -> Self {
        match ident {
            "width" => Self::Width,
            "height" => Self::Height,
            "min_width" => Self::MinWidth,
            "max_width" => Self::MaxWidth,
            "min_height" => Self::MinHeight,
            "max_height" => Self::MaxHeight,
            "justify" => Self::Justify,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Modifier values
#[derive(Debug, Clone, PartialEq)]
pub enum ModifierValue {
    Number(f64),
    /// Bare word such as `center` or `unbounded`
    Keyword(String),
    String(String),
}

impl ModifierValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ModifierValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            ModifierValue::Keyword(k) => Some(k.as_str()),
            _ => None,
        }
    }
}
