//! Text extraction from HTML detail fragments.
//!
//! The detail pages are tag soup, so extraction goes through CSS selectors
//! and a recursive text-rendering pass. The rendering rules determine
//! whitespace fidelity in free-text fields and must hold exactly:
//!
//! - `<br>` becomes a literal newline instead of being dropped;
//! - multiple matched elements are joined with a blank line;
//! - text following a matched element (its tail) is excluded, while text
//!   following its descendants is included. A document-order walk over the
//!   matched subtree gives exactly that: descendant tails are text nodes
//!   inside the subtree, the element's own tail is not.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};

/// Render the text content of one element, with `<br>` as a newline.
#[must_use]
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    append_node_text(*element, &mut out);
    out
}

fn append_node_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(&text.text),
        Node::Element(element) => {
            if element.name() == "br" {
                out.push('\n');
            }
            for child in node.children() {
                append_node_text(child, out);
            }
        }
        _ => {}
    }
}

/// Render every element matching `selector`, joined with a blank line.
#[must_use]
pub fn select_text(html: &Html, selector: &Selector) -> String {
    html.select(selector)
        .map(rendered_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}
