//! Markdown parsing into the document tree.
//!
//! A stack of open frames tracks the CommonMark event stream. Block
//! containers buffer pending inline content so tight list items and
//! definition descriptions still come out with Paragraph children.

use pulldown_cmark::{Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd};

use crate::document::{Document, Element, ElementKind, SmartQuote, TypographicSym};
use crate::{MdroffError, Result};

pub fn parse_markdown(markdown: &str) -> Result<Document> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_DEFINITION_LIST);
    let parser = Parser::new_ext(markdown, options);
    parse_events(parser)
}

#[derive(Debug, Default)]
struct BlockFrame {
    blocks: Vec<Element>,
    pending_inlines: Vec<Element>,
}

impl BlockFrame {
    fn push_inline(&mut self, inline: Element) {
        self.pending_inlines.push(inline);
    }

    fn flush_pending(&mut self) {
        if !self.pending_inlines.is_empty() {
            let inlines = std::mem::take(&mut self.pending_inlines);
            self.blocks
                .push(Element::with_children(ElementKind::Paragraph, inlines));
        }
    }

    fn push_block(&mut self, block: Element) {
        self.flush_pending();
        self.blocks.push(block);
    }

    fn finish(mut self) -> Vec<Element> {
        self.flush_pending();
        self.blocks
    }
}

#[derive(Debug)]
enum Frame {
    Document(BlockFrame),
    BlockQuote(BlockFrame),
    ListItem(BlockFrame),
    Definition(BlockFrame),
    List {
        ordered: bool,
        items: Vec<Element>,
    },
    DefinitionList {
        children: Vec<Element>,
    },
    DefinitionTerm {
        inlines: Vec<Element>,
    },
    Paragraph {
        inlines: Vec<Element>,
    },
    Heading {
        level: u8,
        inlines: Vec<Element>,
        raw_text: String,
    },
    Emphasis {
        inlines: Vec<Element>,
    },
    Strong {
        inlines: Vec<Element>,
    },
    Link {
        href: String,
        inlines: Vec<Element>,
    },
    Image {
        inlines: Vec<Element>,
    },
    CodeBlock {
        text: String,
    },
    HtmlBlock {
        text: String,
    },
}

fn parse_events<'a, I>(events: I) -> Result<Document>
where
    I: IntoIterator<Item = Event<'a>>,
{
    let mut stack = vec![Frame::Document(BlockFrame::default())];
    for event in events {
        match event {
            Event::Start(tag) => handle_start(tag, &mut stack)?,
            Event::End(tag_end) => handle_end(tag_end, &mut stack)?,
            Event::Text(text) => {
                if let Some(Frame::CodeBlock { text: buffer }) = stack.last_mut() {
                    buffer.push_str(&text);
                } else if let Some(Frame::HtmlBlock { text: buffer }) = stack.last_mut() {
                    buffer.push_str(&text);
                } else {
                    if let Some(Frame::Heading { raw_text, .. }) = stack.last_mut() {
                        raw_text.push_str(&unsmart(&text));
                    }
                    for inline in split_text(&text) {
                        push_inline(&mut stack, inline)?;
                    }
                }
            }
            Event::Code(text) => {
                if let Some(Frame::Heading { raw_text, .. }) = stack.last_mut() {
                    raw_text.push_str(&text);
                }
                push_inline(&mut stack, Element::new(ElementKind::CodeSpan(text.into_string())))?;
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                if let Some(Frame::HtmlBlock { text: buffer }) = stack.last_mut() {
                    buffer.push_str(&html);
                } else if let Some(value) = html_comment(&html) {
                    push_inline(&mut stack, Element::new(ElementKind::Comment(value)))?;
                }
                // Other raw HTML has no roff rendering and is dropped.
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(Frame::Heading { raw_text, .. }) = stack.last_mut() {
                    raw_text.push(' ');
                }
                push_inline(&mut stack, Element::text("\n"))?;
            }
            Event::FootnoteReference(label) => {
                push_inline(&mut stack, Element::text(label.into_string()))?;
            }
            Event::Rule => {
                flush_pending_block_container(&mut stack);
                push_block(&mut stack, Element::new(ElementKind::HorizontalRule))?;
            }
            _ => {
                // Task list markers and math cannot occur with the chosen
                // option set.
            }
        }
    }
    finish_stack(stack)
}

fn finish_stack(mut stack: Vec<Frame>) -> Result<Document> {
    if stack.len() != 1 {
        return Err(MdroffError::Markdown(
            "unbalanced markdown structure".to_string(),
        ));
    }

    match stack.pop() {
        Some(Frame::Document(frame)) => Ok(Document::new(frame.finish())),
        _ => Err(MdroffError::Markdown(
            "unexpected parser state at end of document".to_string(),
        )),
    }
}

fn handle_start(tag: Tag<'_>, stack: &mut Vec<Frame>) -> Result<()> {
    match tag {
        Tag::Paragraph => {
            flush_pending_block_container(stack);
            stack.push(Frame::Paragraph { inlines: Vec::new() });
        }
        Tag::Heading { level, .. } => {
            flush_pending_block_container(stack);
            stack.push(Frame::Heading {
                level: heading_level_to_u8(level),
                inlines: Vec::new(),
                raw_text: String::new(),
            });
        }
        Tag::List(start) => {
            flush_pending_block_container(stack);
            stack.push(Frame::List {
                ordered: start.is_some(),
                items: Vec::new(),
            });
        }
        Tag::Item => {
            stack.push(Frame::ListItem(BlockFrame::default()));
        }
        Tag::CodeBlock(_) => {
            flush_pending_block_container(stack);
            stack.push(Frame::CodeBlock { text: String::new() });
        }
        Tag::BlockQuote(_) => {
            flush_pending_block_container(stack);
            stack.push(Frame::BlockQuote(BlockFrame::default()));
        }
        Tag::HtmlBlock => {
            flush_pending_block_container(stack);
            stack.push(Frame::HtmlBlock { text: String::new() });
        }
        Tag::DefinitionList => {
            flush_pending_block_container(stack);
            stack.push(Frame::DefinitionList { children: Vec::new() });
        }
        Tag::DefinitionListTitle => {
            stack.push(Frame::DefinitionTerm { inlines: Vec::new() });
        }
        Tag::DefinitionListDefinition => {
            stack.push(Frame::Definition(BlockFrame::default()));
        }
        Tag::Emphasis => {
            stack.push(Frame::Emphasis { inlines: Vec::new() });
        }
        Tag::Strong => {
            stack.push(Frame::Strong { inlines: Vec::new() });
        }
        Tag::Link {
            link_type,
            dest_url,
            ..
        } => {
            let mut href = dest_url.into_string();
            // Email autolink destinations arrive without a scheme.
            if link_type == LinkType::Email && !href.starts_with("mailto:") {
                href.insert_str(0, "mailto:");
            }
            stack.push(Frame::Link {
                href,
                inlines: Vec::new(),
            });
        }
        Tag::Image { .. } => {
            stack.push(Frame::Image { inlines: Vec::new() });
        }
        Tag::Table(_) | Tag::TableHead | Tag::TableRow | Tag::TableCell => {
            return Err(MdroffError::Markdown(
                "tables are not supported".to_string(),
            ));
        }
        _ => {
            return Err(MdroffError::Markdown(
                "unsupported markdown construct encountered".to_string(),
            ));
        }
    }
    Ok(())
}

fn handle_end(tag_end: TagEnd, stack: &mut Vec<Frame>) -> Result<()> {
    match tag_end {
        TagEnd::Paragraph => {
            let inlines = match stack.pop() {
                Some(Frame::Paragraph { inlines }) => inlines,
                _ => return Err(MdroffError::Markdown("paragraph mismatch".to_string())),
            };
            push_block(
                stack,
                Element::with_children(ElementKind::Paragraph, inlines),
            )?;
        }
        TagEnd::Heading(_) => {
            let (level, inlines, raw_text) = match stack.pop() {
                Some(Frame::Heading {
                    level,
                    inlines,
                    raw_text,
                }) => (level, inlines, raw_text),
                _ => return Err(MdroffError::Markdown("heading mismatch".to_string())),
            };
            push_block(
                stack,
                Element::with_children(ElementKind::Header { level, raw_text }, inlines),
            )?;
        }
        TagEnd::List(_) => {
            let (ordered, items) = match stack.pop() {
                Some(Frame::List { ordered, items }) => (ordered, items),
                _ => return Err(MdroffError::Markdown("list mismatch".to_string())),
            };
            let kind = if ordered {
                ElementKind::OrderedList
            } else {
                ElementKind::UnorderedList
            };
            push_block(stack, Element::with_children(kind, items))?;
        }
        TagEnd::Item => {
            let blocks = match stack.pop() {
                Some(Frame::ListItem(frame)) => frame.finish(),
                _ => return Err(MdroffError::Markdown("list item mismatch".to_string())),
            };
            let item = Element::with_children(ElementKind::ListItem, blocks);
            match stack.last_mut() {
                Some(Frame::List { items, .. }) => items.push(item),
                _ => {
                    return Err(MdroffError::Markdown(
                        "list item parent mismatch".to_string(),
                    ));
                }
            }
        }
        TagEnd::DefinitionList => {
            let children = match stack.pop() {
                Some(Frame::DefinitionList { children }) => children,
                _ => {
                    return Err(MdroffError::Markdown(
                        "definition list mismatch".to_string(),
                    ));
                }
            };
            push_block(
                stack,
                Element::with_children(ElementKind::DefinitionList, children),
            )?;
        }
        TagEnd::DefinitionListTitle => {
            let inlines = match stack.pop() {
                Some(Frame::DefinitionTerm { inlines }) => inlines,
                _ => {
                    return Err(MdroffError::Markdown(
                        "definition term mismatch".to_string(),
                    ));
                }
            };
            let term = Element::with_children(ElementKind::DefinitionTerm, inlines);
            match stack.last_mut() {
                Some(Frame::DefinitionList { children }) => children.push(term),
                _ => {
                    return Err(MdroffError::Markdown(
                        "definition term parent mismatch".to_string(),
                    ));
                }
            }
        }
        TagEnd::DefinitionListDefinition => {
            let blocks = match stack.pop() {
                Some(Frame::Definition(frame)) => frame.finish(),
                _ => {
                    return Err(MdroffError::Markdown(
                        "definition description mismatch".to_string(),
                    ));
                }
            };
            let description =
                Element::with_children(ElementKind::DefinitionDescription, blocks);
            match stack.last_mut() {
                Some(Frame::DefinitionList { children }) => children.push(description),
                _ => {
                    return Err(MdroffError::Markdown(
                        "definition description parent mismatch".to_string(),
                    ));
                }
            }
        }
        TagEnd::Emphasis => {
            let inlines = match stack.pop() {
                Some(Frame::Emphasis { inlines }) => inlines,
                _ => return Err(MdroffError::Markdown("emphasis mismatch".to_string())),
            };
            push_inline(
                stack,
                Element::with_children(ElementKind::Emphasis, inlines),
            )?;
        }
        TagEnd::Strong => {
            let inlines = match stack.pop() {
                Some(Frame::Strong { inlines }) => inlines,
                _ => return Err(MdroffError::Markdown("strong mismatch".to_string())),
            };
            push_inline(stack, Element::with_children(ElementKind::Strong, inlines))?;
        }
        TagEnd::Link => {
            let (href, inlines) = match stack.pop() {
                Some(Frame::Link { href, inlines }) => (href, inlines),
                _ => return Err(MdroffError::Markdown("link mismatch".to_string())),
            };
            push_inline(
                stack,
                Element::with_children(ElementKind::Link { href }, inlines),
            )?;
        }
        TagEnd::Image => {
            let inlines = match stack.pop() {
                Some(Frame::Image { inlines }) => inlines,
                _ => return Err(MdroffError::Markdown("image mismatch".to_string())),
            };
            // Images render as their alt text.
            push_inline(stack, Element::text(inline_text(&inlines)))?;
        }
        TagEnd::CodeBlock => {
            let text = match stack.pop() {
                Some(Frame::CodeBlock { text }) => text,
                _ => return Err(MdroffError::Markdown("code block mismatch".to_string())),
            };
            push_block(stack, Element::new(ElementKind::CodeBlock(text)))?;
        }
        TagEnd::HtmlBlock => {
            let text = match stack.pop() {
                Some(Frame::HtmlBlock { text }) => text,
                _ => return Err(MdroffError::Markdown("html block mismatch".to_string())),
            };
            if let Some(value) = html_comment(&text) {
                push_block(stack, Element::new(ElementKind::Comment(value)))?;
            }
        }
        TagEnd::BlockQuote(_) => {
            let blocks = match stack.pop() {
                Some(Frame::BlockQuote(frame)) => frame.finish(),
                _ => return Err(MdroffError::Markdown("blockquote mismatch".to_string())),
            };
            push_block(
                stack,
                Element::with_children(ElementKind::Blockquote, blocks),
            )?;
        }
        _ => {
            return Err(MdroffError::Markdown(
                "unsupported markdown construct encountered".to_string(),
            ));
        }
    }
    Ok(())
}

fn push_inline(stack: &mut Vec<Frame>, inline: Element) -> Result<()> {
    match stack.last_mut() {
        Some(Frame::Paragraph { inlines })
        | Some(Frame::Heading { inlines, .. })
        | Some(Frame::Emphasis { inlines })
        | Some(Frame::Strong { inlines })
        | Some(Frame::Link { inlines, .. })
        | Some(Frame::Image { inlines })
        | Some(Frame::DefinitionTerm { inlines }) => {
            inlines.push(inline);
        }
        Some(Frame::Document(frame))
        | Some(Frame::BlockQuote(frame))
        | Some(Frame::ListItem(frame))
        | Some(Frame::Definition(frame)) => {
            frame.push_inline(inline);
        }
        Some(Frame::List { .. }) | Some(Frame::DefinitionList { .. }) => {
            return Err(MdroffError::Markdown(
                "inline content found directly inside list".to_string(),
            ));
        }
        Some(Frame::CodeBlock { .. }) | Some(Frame::HtmlBlock { .. }) => {
            return Err(MdroffError::Markdown(
                "inline content found inside code/html block".to_string(),
            ));
        }
        None => {
            return Err(MdroffError::Markdown(
                "inline content found without container".to_string(),
            ));
        }
    }
    Ok(())
}

fn push_block(stack: &mut Vec<Frame>, block: Element) -> Result<()> {
    match stack.last_mut() {
        Some(Frame::Document(frame))
        | Some(Frame::BlockQuote(frame))
        | Some(Frame::ListItem(frame))
        | Some(Frame::Definition(frame)) => {
            frame.push_block(block);
            Ok(())
        }
        Some(Frame::List { .. }) | Some(Frame::DefinitionList { .. }) => {
            Err(MdroffError::Markdown(
                "block found directly inside list".to_string(),
            ))
        }
        _ => Err(MdroffError::Markdown(
            "block found without container".to_string(),
        )),
    }
}

fn flush_pending_block_container(stack: &mut Vec<Frame>) {
    if let Some(Frame::Document(frame))
    | Some(Frame::BlockQuote(frame))
    | Some(Frame::ListItem(frame))
    | Some(Frame::Definition(frame)) = stack.last_mut()
    {
        frame.flush_pending();
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Reverts smart punctuation; heading raw text becomes a macro argument
/// line where curly quotes would break `.TH` argument grouping.
fn unsmart(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '“' | '”' => out.push('"'),
            '‘' | '’' => out.push('\''),
            '–' => out.push_str("--"),
            '—' => out.push_str("---"),
            '…' => out.push_str("..."),
            _ => out.push(ch),
        }
    }
    out
}

/// Splits a text run so smart punctuation comes out as symbol nodes.
fn split_text(text: &str) -> Vec<Element> {
    let mut out = Vec::new();
    let mut buffer = String::new();
    for ch in text.chars() {
        let symbol = match ch {
            '–' => Some(ElementKind::TypographicSym(TypographicSym::Ndash)),
            '—' => Some(ElementKind::TypographicSym(TypographicSym::Mdash)),
            '…' => Some(ElementKind::TypographicSym(TypographicSym::Hellip)),
            '«' => Some(ElementKind::TypographicSym(TypographicSym::Laquo)),
            '»' => Some(ElementKind::TypographicSym(TypographicSym::Raquo)),
            '‘' => Some(ElementKind::SmartQuote(SmartQuote::Lsquo)),
            '’' => Some(ElementKind::SmartQuote(SmartQuote::Rsquo)),
            '“' => Some(ElementKind::SmartQuote(SmartQuote::Ldquo)),
            '”' => Some(ElementKind::SmartQuote(SmartQuote::Rdquo)),
            _ => None,
        };
        match symbol {
            Some(kind) => {
                if !buffer.is_empty() {
                    out.push(Element::text(std::mem::take(&mut buffer)));
                }
                out.push(Element::new(kind));
            }
            None => buffer.push(ch),
        }
    }
    if !buffer.is_empty() {
        out.push(Element::text(buffer));
    }
    out
}

/// Extracts the body of an HTML comment, or `None` for other raw HTML.
fn html_comment(html: &str) -> Option<String> {
    let trimmed = html.trim();
    let inner = trimmed.strip_prefix("<!--")?.strip_suffix("-->")?;
    Some(inner.trim().to_string())
}

fn inline_text(elements: &[Element]) -> String {
    let mut out = String::new();
    for element in elements {
        match &element.kind {
            ElementKind::Text(text) | ElementKind::CodeSpan(text) => out.push_str(text),
            ElementKind::TypographicSym(sym) => out.push(match sym {
                TypographicSym::Ndash => '–',
                TypographicSym::Mdash => '—',
                TypographicSym::Hellip => '…',
                TypographicSym::Laquo | TypographicSym::LaquoSpace => '«',
                TypographicSym::Raquo | TypographicSym::RaquoSpace => '»',
            }),
            ElementKind::SmartQuote(quote) => out.push(match quote {
                SmartQuote::Lsquo => '‘',
                SmartQuote::Rsquo => '’',
                SmartQuote::Ldquo => '“',
                SmartQuote::Rdquo => '”',
            }),
            _ => out.push_str(&inline_text(&element.children)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(markdown: &str) -> Document {
        parse_markdown(markdown).expect("parse markdown")
    }

    fn kinds(children: &[Element]) -> Vec<&ElementKind> {
        children.iter().map(|child| &child.kind).collect()
    }

    #[test]
    fn heading_carries_level_and_raw_text() {
        let doc = parse("# mdroff 1 manual\n");
        match &doc.root.children[0].kind {
            ElementKind::Header { level, raw_text } => {
                assert_eq!(*level, 1);
                assert_eq!(raw_text, "mdroff 1 manual");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn heading_raw_text_keeps_straight_quotes() {
        let doc = parse("# mdroff 1 \"January 2026\" mdroff\n");
        match &doc.root.children[0].kind {
            ElementKind::Header { raw_text, .. } => {
                assert_eq!(raw_text, "mdroff 1 \"January 2026\" mdroff");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn tight_list_items_get_paragraph_children() {
        let doc = parse("* foo\n* bar\n");
        let list = &doc.root.children[0];
        assert_eq!(list.kind, ElementKind::UnorderedList);
        assert_eq!(list.children.len(), 2);
        for item in &list.children {
            assert_eq!(item.kind, ElementKind::ListItem);
            assert_eq!(item.children.len(), 1);
            assert_eq!(item.children[0].kind, ElementKind::Paragraph);
        }
    }

    #[test]
    fn ordered_lists_are_distinguished() {
        let doc = parse("1. foo\n2. bar\n");
        assert_eq!(doc.root.children[0].kind, ElementKind::OrderedList);
    }

    #[test]
    fn definition_list_alternates_terms_and_descriptions() {
        let doc = parse("foo bar\n: baz qux\n");
        let dl = &doc.root.children[0];
        assert_eq!(dl.kind, ElementKind::DefinitionList);
        assert_eq!(
            kinds(&dl.children),
            vec![
                &ElementKind::DefinitionTerm,
                &ElementKind::DefinitionDescription,
            ]
        );
        let dd = &dl.children[1];
        assert_eq!(dd.children[0].kind, ElementKind::Paragraph);
    }

    #[test]
    fn blockquote_wraps_block_children() {
        let doc = parse("> quoted\n");
        let quote = &doc.root.children[0];
        assert_eq!(quote.kind, ElementKind::Blockquote);
        assert_eq!(quote.children[0].kind, ElementKind::Paragraph);
    }

    #[test]
    fn fenced_code_block_keeps_raw_text() {
        let doc = parse("```\nfoo --bar\n```\n");
        assert_eq!(
            doc.root.children[0].kind,
            ElementKind::CodeBlock("foo --bar\n".to_string())
        );
    }

    #[test]
    fn thematic_break_becomes_horizontal_rule() {
        let doc = parse("foo\n\n---\n\nbar\n");
        assert_eq!(doc.root.children[1].kind, ElementKind::HorizontalRule);
    }

    #[test]
    fn html_comment_becomes_comment_node() {
        let doc = parse("<!-- build: manual -->\n");
        assert_eq!(
            doc.root.children[0].kind,
            ElementKind::Comment("build: manual".to_string())
        );
    }

    #[test]
    fn non_comment_html_is_dropped() {
        let doc = parse("<div>ignored</div>\n");
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn smart_punctuation_becomes_symbol_nodes() {
        let doc = parse("foo -- bar --- baz\n");
        let p = &doc.root.children[0];
        assert!(p.children.iter().any(|child| {
            child.kind == ElementKind::TypographicSym(TypographicSym::Ndash)
        }));
        assert!(p.children.iter().any(|child| {
            child.kind == ElementKind::TypographicSym(TypographicSym::Mdash)
        }));
    }

    #[test]
    fn quotes_become_smart_quote_nodes() {
        let doc = parse("\"foo\" and 'bar'\n");
        let p = &doc.root.children[0];
        let expected = [
            ElementKind::SmartQuote(SmartQuote::Ldquo),
            ElementKind::SmartQuote(SmartQuote::Rdquo),
            ElementKind::SmartQuote(SmartQuote::Lsquo),
            ElementKind::SmartQuote(SmartQuote::Rsquo),
        ];
        for kind in expected {
            assert!(
                p.children.iter().any(|child| child.kind == kind),
                "missing {kind:?}"
            );
        }
    }

    #[test]
    fn image_is_replaced_by_alt_text() {
        let doc = parse("![Alt Text](https://example.com/image.png)\n");
        let p = &doc.root.children[0];
        assert_eq!(p.children[0].kind, ElementKind::Text("Alt Text".to_string()));
    }

    #[test]
    fn link_keeps_href_and_inline_text() {
        let doc = parse("[example](https://example.com)\n");
        let p = &doc.root.children[0];
        match &p.children[0].kind {
            ElementKind::Link { href } => assert_eq!(href, "https://example.com"),
            other => panic!("unexpected kind: {other:?}"),
        }
        assert_eq!(
            p.children[0].children[0].kind,
            ElementKind::Text("example".to_string())
        );
    }

    #[test]
    fn email_autolink_gets_a_mailto_scheme() {
        let doc = parse("<bob@example.com>\n");
        let p = &doc.root.children[0];
        match &p.children[0].kind {
            ElementKind::Link { href } => assert_eq!(href, "mailto:bob@example.com"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn soft_breaks_become_newline_text() {
        let doc = parse("line one\nline two\n");
        let p = &doc.root.children[0];
        assert!(p
            .children
            .iter()
            .any(|child| child.kind == ElementKind::Text("\n".to_string())));
    }
}
