//! Flattening of a paragraph element into the node kinds the term parser reads.
//!
//! The DOM walk happens once, here. Everything downstream is a linear scan
//! over a `Vec<ContentNode>`.
use scraper::{ElementRef, Node};

const EMPHASIS_TAGS: [&str; 2] = ["b", "strong"];

/// One direct child of a paragraph, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// A bare text node.
    Text(String),
    /// A `<b>`/`<strong>` element and the first text fragment inside it.
    ///
    /// Only the first fragment is kept: `<b>Harry <i>Kane</i></b>` yields
    /// `Some("Harry ")`. `None` when the element holds no text at all.
    Emphasis(Option<String>),
    /// Anything else; the payload names the tag or node kind for logging.
    Other(String),
}

pub(crate) fn is_emphasis(tag: &str) -> bool {
    EMPHASIS_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Direct children of `paragraph` in document order.
pub fn content_nodes(paragraph: ElementRef<'_>) -> Vec<ContentNode> {
    paragraph
        .children()
        .map(|child| match child.value() {
            Node::Text(text) => ContentNode::Text(text.to_string()),
            Node::Element(el) if is_emphasis(el.name()) => ContentNode::Emphasis(
                ElementRef::wrap(child)
                    .and_then(|em| em.text().next())
                    .map(str::to_string),
            ),
            Node::Element(el) => ContentNode::Other(el.name().to_string()),
            Node::Comment(_) => ContentNode::Other("#comment".to_string()),
            _ => ContentNode::Other("#node".to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn nodes_of(fragment: &str) -> Vec<ContentNode> {
        let html = Html::parse_fragment(fragment);
        let p = Selector::parse("p").unwrap();
        content_nodes(html.select(&p).next().expect("fixture has a <p>"))
    }

    #[test]
    fn classifies_children_in_document_order() {
        let nodes = nodes_of("<p>A<b>B</b><!-- note --><span>C</span><strong>D</strong></p>");
        assert_eq!(
            nodes,
            vec![
                ContentNode::Text("A".into()),
                ContentNode::Emphasis(Some("B".into())),
                ContentNode::Other("#comment".into()),
                ContentNode::Other("span".into()),
                ContentNode::Emphasis(Some("D".into())),
            ]
        );
    }

    #[test]
    fn emphasis_keeps_only_its_first_fragment() {
        let nodes = nodes_of("<p><b>Harry <i>Kane</i> again</b></p>");
        assert_eq!(nodes, vec![ContentNode::Emphasis(Some("Harry ".into()))]);
    }

    #[test]
    fn emphasis_reaches_a_lone_nested_fragment() {
        let nodes = nodes_of("<p><b><i>Kane</i></b></p>");
        assert_eq!(nodes, vec![ContentNode::Emphasis(Some("Kane".into()))]);
    }

    #[test]
    fn empty_emphasis_has_no_text() {
        assert_eq!(nodes_of("<p><b></b></p>"), vec![ContentNode::Emphasis(None)]);
    }

    #[test]
    fn empty_paragraph_has_no_nodes() {
        assert!(nodes_of("<p></p>").is_empty());
    }

    #[test]
    fn emphasis_tags_are_matched_case_insensitively() {
        assert!(is_emphasis("B"));
        assert!(is_emphasis("strong"));
        assert!(!is_emphasis("em"));
    }
}
