//! The typed document tree consumed by the converter.
//!
//! The tree is produced once by the parser, read once by [`Converter`], and
//! then discarded. Ordering of `children` is significant everywhere.
//!
//! [`Converter`]: crate::Converter

/// A parsed Markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            root: Element::with_children(ElementKind::Root, children),
        }
    }
}

/// One node of the document tree: a kind plus ordered children.
///
/// Leaf kinds (Text, CodeBlock, CodeSpan, Comment, Abbreviation, symbols)
/// carry their payload in the kind and have no children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: ElementKind, children: Vec<Element>) -> Self {
        Self { kind, children }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(value.into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Root,
    /// A blank separator line between blocks.
    Blank,
    Text(String),
    TypographicSym(TypographicSym),
    SmartQuote(SmartQuote),
    /// `raw_text` is the flattened heading text, used verbatim as the macro
    /// argument. Levels 3 and up render identically.
    Header {
        level: u8,
        raw_text: String,
    },
    HorizontalRule,
    UnorderedList,
    OrderedList,
    ListItem,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Abbreviation(String),
    Blockquote,
    CodeBlock(String),
    Comment(String),
    Paragraph,
    Emphasis,
    Strong,
    CodeSpan(String),
    Link {
        href: String,
    },
}

/// Typographic symbols recognized in text runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypographicSym {
    Ndash,
    Mdash,
    Hellip,
    Laquo,
    LaquoSpace,
    Raquo,
    RaquoSpace,
}

impl TypographicSym {
    /// The roff rendering of the symbol.
    pub fn roff(self) -> &'static str {
        match self {
            TypographicSym::Ndash => "\\-\\-",
            TypographicSym::Mdash => "\\[em]",
            TypographicSym::Hellip => "\\.\\.\\.",
            TypographicSym::Laquo | TypographicSym::LaquoSpace => "\\[Fo]",
            TypographicSym::Raquo | TypographicSym::RaquoSpace => "\\[Fc]",
        }
    }
}

/// Curly quotes produced by smart punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartQuote {
    Lsquo,
    Rsquo,
    Ldquo,
    Rdquo,
}

impl SmartQuote {
    /// The roff rendering of the quote.
    pub fn roff(self) -> &'static str {
        match self {
            SmartQuote::Lsquo => "\\[oq]",
            SmartQuote::Rsquo => "\\[cq]",
            SmartQuote::Ldquo => "\\[lq]",
            SmartQuote::Rdquo => "\\[rq]",
        }
    }
}
