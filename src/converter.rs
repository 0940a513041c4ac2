//! The tree-to-roff transducer.
//!
//! Walks the document tree depth-first and emits `man(7)` macros. Element
//! kinds without a handler produce no output instead of failing the whole
//! conversion.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::{Document, Element, ElementKind};
use crate::glyphs::escape;

// `man:page(section)` or `man:page.section` link targets.
static MAN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)(?:\((\d[a-z]?)\)|\.(\d[a-z]?))$").expect("man link pattern")
});

// Relative links to sibling man page sources, e.g. `mdroff.1.md`.
static MAN_PAGE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)\.(\d[a-z]?)\.md$").expect("man page file pattern")
});

/// Converts a parsed document tree into roff man page source.
///
/// Holds the ordered-list register counter, so one instance converts one
/// document; independent instances are freely parallelizable.
#[derive(Debug, Default)]
pub struct Converter {
    ol_index: usize,
}

impl Converter {
    pub fn new() -> Self {
        Self { ol_index: 0 }
    }

    /// Converts the document, prepending the generator comment header.
    pub fn convert(&mut self, document: &Document) -> String {
        let mut roff = header();
        roff.push_str(&self.convert_children_of(&document.root));
        roff
    }

    /// Routes an element to its kind's handler. `None` means the kind has no
    /// handler and contributes nothing to the parent's output.
    fn convert_element(&mut self, element: &Element) -> Option<String> {
        match &element.kind {
            ElementKind::Root => Some(self.convert_children_of(element)),
            ElementKind::Blank => Some(".LP\n".to_string()),
            ElementKind::Text(value) => Some(escape(value)),
            ElementKind::TypographicSym(sym) => Some(sym.roff().to_string()),
            ElementKind::SmartQuote(quote) => Some(quote.roff().to_string()),
            ElementKind::Header { level, raw_text } => Some(convert_header(*level, raw_text)),
            ElementKind::HorizontalRule => None,
            ElementKind::UnorderedList => Some(self.convert_ul(element)),
            ElementKind::OrderedList => Some(self.convert_ol(element)),
            ElementKind::ListItem => None,
            ElementKind::DefinitionList => Some(self.convert_dl(element)),
            ElementKind::DefinitionTerm => Some(self.convert_dt(element, 0)),
            ElementKind::DefinitionDescription => Some(self.convert_dd(element, 0)),
            ElementKind::Abbreviation(value) => Some(escape(value)),
            ElementKind::Blockquote => Some(self.convert_blockquote(element)),
            ElementKind::CodeBlock(value) => Some(convert_codeblock(value)),
            ElementKind::Comment(value) => Some(convert_comment(value)),
            ElementKind::Paragraph => Some(self.convert_p(element)),
            ElementKind::Emphasis => Some(self.convert_em(element)),
            ElementKind::Strong => Some(self.convert_strong(element)),
            ElementKind::CodeSpan(value) => Some(format!("\\fB{value}\\fR")),
            ElementKind::Link { href } => Some(self.convert_link(element, href)),
        }
    }

    fn convert_ul(&mut self, ul: &Element) -> String {
        let mut contents = String::new();
        for li in &ul.children {
            if li.kind == ElementKind::ListItem {
                contents.push_str(&self.convert_ul_li(li));
            }
        }
        format!(".RS\n{}\n.RE\n", chomp(&contents))
    }

    fn convert_ul_li(&mut self, li: &Element) -> String {
        let mut roff = String::new();
        for (index, child) in li.children.iter().enumerate() {
            if child.kind == ElementKind::Paragraph {
                let contents = self.convert_text_elements(&child.children);
                let marker = if index == 0 {
                    ".IP \\(bu 2"
                } else {
                    ".IP \\( 2"
                };
                roff.push_str(&format!("{marker}\n{}\n", chomp(&contents)));
            }
        }
        roff
    }

    fn convert_ol(&mut self, ol: &Element) -> String {
        self.ol_index += 1;
        let register = self.ol_index;

        let mut contents = String::new();
        for li in &ol.children {
            if li.kind == ElementKind::ListItem {
                contents.push_str(&self.convert_ol_li(li, register));
            }
        }
        format!(
            ".nr step{register} 0 1\n.RS\n{}\n.RE\n",
            chomp(&contents)
        )
    }

    fn convert_ol_li(&mut self, li: &Element, register: usize) -> String {
        let mut roff = String::new();
        for (index, child) in li.children.iter().enumerate() {
            if child.kind == ElementKind::Paragraph {
                let contents = self.convert_text_elements(&child.children);
                if index == 0 {
                    roff.push_str(&format!(
                        ".IP \\n+[step{register}]\n{}\n",
                        chomp(&contents)
                    ));
                } else {
                    roff.push_str(&format!(".IP \\n\n{}\n", chomp(&contents)));
                }
            }
        }
        roff
    }

    // Terms and descriptions carry independent run indices; each resets when
    // the opposite kind appears.
    fn convert_dl(&mut self, dl: &Element) -> String {
        let mut roff = String::new();
        let mut dt_index = 0;
        let mut dd_index = 0;

        for element in &dl.children {
            match &element.kind {
                ElementKind::DefinitionTerm => {
                    roff.push_str(&self.convert_dt(element, dt_index));
                    dt_index += 1;
                    dd_index = 0;
                }
                ElementKind::DefinitionDescription => {
                    roff.push_str(&self.convert_dd(element, dd_index));
                    dd_index += 1;
                    dt_index = 0;
                }
                _ => {
                    if let Some(contents) = self.convert_element(element) {
                        roff.push_str(&contents);
                    }
                    dt_index = 0;
                    dd_index = 0;
                }
            }
        }
        roff
    }

    fn convert_dt(&mut self, dt: &Element, index: usize) -> String {
        let text = self.convert_text_elements(&dt.children);
        if index == 0 {
            format!(".TP\n{}\n", chomp(&text))
        } else {
            format!(".TQ\n{}\n", chomp(&text))
        }
    }

    fn convert_dd(&mut self, dd: &Element, index: usize) -> String {
        let mut roff = String::new();
        for (child_index, child) in dd.children.iter().enumerate() {
            if index == 0 && child_index == 0 && child.kind == ElementKind::Paragraph {
                // The first paragraph flows directly under the .TP term.
                let contents = self.convert_text_elements(&child.children);
                roff.push_str(&format!("{}\n", chomp(&contents)));
            } else if let Some(contents) = self.convert_element(child) {
                roff.push_str(&format!(".RS\n{}\n.RE\n", chomp(&contents)));
            }
        }
        roff
    }

    fn convert_blockquote(&mut self, blockquote: &Element) -> String {
        let contents = self.convert_children_of(blockquote);
        format!(".RS\n{}\n.RE\n", chomp(&contents))
    }

    fn convert_p(&mut self, p: &Element) -> String {
        let contents = self.convert_text_elements(&p.children);
        format!(".PP\n{}\n", chomp(&contents))
    }

    fn convert_em(&mut self, em: &Element) -> String {
        format!("\\fI{}\\fP", self.convert_text_elements(&em.children))
    }

    fn convert_strong(&mut self, strong: &Element) -> String {
        format!("\\fB{}\\fP", self.convert_text_elements(&strong.children))
    }

    fn convert_link(&mut self, link: &Element, href: &str) -> String {
        let escaped_href = escape(href);
        let text = self.convert_text_elements(&link.children);

        if let Some(email) = escaped_href.strip_prefix("mailto:") {
            if text == email {
                // Bare autolink; don't duplicate the address.
                format!(".MT {email}\n.ME\n")
            } else {
                format!("{}\n.MT {email}\n.ME\n", chomp(&text))
            }
        } else if let Some(remainder) = href.strip_prefix("man:") {
            match MAN_LINK.captures(remainder) {
                Some(caps) => {
                    let page = &caps[1];
                    let section = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                    format!(".BR {} ({section})\n", escape(page))
                }
                // An unparsable remainder is a bare page reference, not an
                // error.
                None => format!(".BR {}\n", escape(remainder)),
            }
        } else if let Some(caps) = MAN_PAGE_FILE.captures(href) {
            // Cross-reference to a sibling man page source file.
            format!(".BR {} ({})\n", escape(&caps[1]), &caps[2])
        } else {
            format!("{}\n.UR {escaped_href}\n.UE\n", chomp(&text))
        }
    }

    /// Concatenates the converted block children of an element.
    fn convert_children_of(&mut self, element: &Element) -> String {
        let mut roff = String::new();
        for child in &element.children {
            if let Some(contents) = self.convert_element(child) {
                roff.push_str(&contents);
            }
        }
        roff
    }

    /// Joins converted inline children, keeping macro request lines isolated.
    fn convert_text_elements(&mut self, elements: &[Element]) -> String {
        let mut roff = String::new();
        for element in elements {
            if let Some(contents) = self.convert_element(element) {
                if contents.starts_with('.') && !roff.is_empty() && !roff.ends_with('\n') {
                    // roff macros must start their own line.
                    roff.push('\n');
                    roff.push_str(&contents);
                } else if contents.starts_with(' ') && roff.ends_with('\n') {
                    roff.push_str(contents.trim_start());
                } else {
                    roff.push_str(&contents);
                }
            }
        }
        roff
    }
}

fn convert_header(level: u8, raw_text: &str) -> String {
    match level {
        1 => format!(".TH {raw_text}\n"),
        2 => format!(".SH {raw_text}\n"),
        _ => format!(".SS {raw_text}\n"),
    }
}

fn convert_codeblock(value: &str) -> String {
    let contents = escape(value);
    format!(".PP\n.EX\n{}\n.EE\n", contents.trim_end_matches('\n'))
}

fn convert_comment(value: &str) -> String {
    let mut roff = String::new();
    for line in value.lines() {
        roff.push_str(&format!(".\\\" {line}\n"));
    }
    roff
}

fn header() -> String {
    format!(
        ".\\\" Generated by mdroff {}\n.\\\" {}#readme\n",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_HOMEPAGE"),
    )
}

fn chomp(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}
