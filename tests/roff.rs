//! Byte-level conversion properties checked against hand-built trees.

use mdroff::{Converter, Document, Element, ElementKind, escape};

fn convert(children: Vec<Element>) -> String {
    let roff = Converter::new().convert(&Document::new(children));
    // Drop the two-line generator comment.
    let mut pieces = roff.splitn(3, '\n');
    pieces.next();
    pieces.next();
    pieces.next().unwrap_or_default().to_string()
}

fn paragraph(text: &str) -> Element {
    Element::with_children(ElementKind::Paragraph, vec![Element::text(text)])
}

fn item(text: &str) -> Element {
    Element::with_children(ElementKind::ListItem, vec![paragraph(text)])
}

#[test]
fn subsection_levels_collapse() {
    let heading = |level| {
        Element::new(ElementKind::Header {
            level,
            raw_text: "DETAILS".to_string(),
        })
    };
    let three = convert(vec![heading(3)]);
    let four = convert(vec![heading(4)]);
    let six = convert(vec![heading(6)]);
    assert_eq!(three, four);
    assert_eq!(three, six);
    assert_eq!(three, ".SS DETAILS\n");
    assert_ne!(convert(vec![heading(1)]), convert(vec![heading(2)]));
    assert_ne!(convert(vec![heading(2)]), three);
}

#[test]
fn ordered_lists_allocate_registers_in_document_order() {
    let ol = |text: &str| {
        Element::with_children(ElementKind::OrderedList, vec![item(text)])
    };
    let roff = convert(vec![ol("foo"), ol("bar")]);
    assert_eq!(
        roff,
        ".nr step1 0 1\n.RS\n.IP \\n+[step1]\nfoo\n.RE\n\
         .nr step2 0 1\n.RS\n.IP \\n+[step2]\nbar\n.RE\n"
    );
}

#[test]
fn unknown_definition_list_children_reset_both_run_indices() {
    let term = |text: &str| {
        Element::with_children(ElementKind::DefinitionTerm, vec![Element::text(text)])
    };
    let description = |text: &str| {
        Element::with_children(ElementKind::DefinitionDescription, vec![paragraph(text)])
    };
    let dl = Element::with_children(
        ElementKind::DefinitionList,
        vec![
            term("foo"),
            term("bar"),
            description("one"),
            Element::new(ElementKind::Blank),
            term("baz"),
            description("two"),
        ],
    );
    assert_eq!(
        convert(vec![dl]),
        ".TP\nfoo\n.TQ\nbar\none\n.LP\n.TP\nbaz\ntwo\n"
    );
}

#[test]
fn nested_blockquotes_nest_indentation() {
    let inner = Element::with_children(ElementKind::Blockquote, vec![paragraph("deep")]);
    let outer = Element::with_children(ElementKind::Blockquote, vec![inner]);
    assert_eq!(convert(vec![outer]), ".RS\n.RS\n.PP\ndeep\n.RE\n.RE\n");
}

#[test]
fn list_items_ignore_non_paragraph_children() {
    let li = Element::with_children(
        ElementKind::ListItem,
        vec![
            paragraph("kept"),
            Element::new(ElementKind::CodeBlock("dropped\n".to_string())),
        ],
    );
    let ul = Element::with_children(ElementKind::UnorderedList, vec![li]);
    assert_eq!(convert(vec![ul]), ".RS\n.IP \\(bu 2\nkept\n.RE\n");
}

#[test]
fn escape_handles_every_bracket_character() {
    assert_eq!(escape("[x]{y}"), "\\[lB]x\\[rB]\\[lC]y\\[rC]");
}

#[test]
fn paragraph_text_is_escaped() {
    let roff = convert(vec![paragraph("a - b . c \\ d")]);
    assert_eq!(roff, ".PP\na \\- b \\. c \\e d\n");
}
