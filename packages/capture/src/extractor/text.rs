//! Rendered-text approximation for element subtrees.
//!
//! Block-level elements and `<br>` become line breaks, runs of source
//! whitespace collapse to one space, `<pre>` keeps its formatting. Citation
//! pills rely on the line structure this produces.

use scraper::{ElementRef, Node};

/// Tags whose boundaries start a new line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "pre", "section", "table", "tr", "ul",
];

/// Tags whose content never renders as text.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "button"];

/// Text of `element` as a reader would see it, one rendered line per line.
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect(element, false, &mut raw);

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect(element: ElementRef<'_>, in_pre: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if in_pre {
                    out.push_str(text);
                } else {
                    push_collapsed(text, out);
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let is_block = BLOCK_TAGS.contains(&name);
                if is_block {
                    out.push('\n');
                }
                collect(child_el, in_pre || name == "pre", out);
                if is_block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn push_collapsed(text: &str, out: &mut String) {
    let mut last_was_space = out.ends_with(' ');
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
}
