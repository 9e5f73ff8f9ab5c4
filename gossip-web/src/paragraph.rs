//! Bold/plain run decomposition of a paragraph, and its renderer.
//!
//! Terms may be single words or phrases: "Manchester United", "Everton", or
//! "is about to join". A paragraph is the ordered sequence of those terms,
//! each tagged bold or plain. Concatenating the run texts gives back the
//! paragraph's visible text, minus any node that was neither.
use scraper::ElementRef;
use tracing::debug;

use crate::WebError;
use crate::nodes::{ContentNode, content_nodes};
use crate::source::{Source, extract_source};

/// Marker wrapped around bold runs by [`Decomposition::render`].
pub const BOLD_MARKER: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Bold,
    Plain,
}

/// A contiguous span of paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    Bold(String),
    Plain(String),
}

impl Run {
    pub fn text(&self) -> &str {
        match self {
            Run::Bold(text) | Run::Plain(text) => text,
        }
    }

    pub fn kind(&self) -> RunKind {
        match self {
            Run::Bold(_) => RunKind::Bold,
            Run::Plain(_) => RunKind::Plain,
        }
    }
}

/// The runs of one paragraph, in reading order.
///
/// Adjacent runs of the same kind are never merged. An empty decomposition is
/// a valid parse result; callers check [`Decomposition::is_empty`] before
/// rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    runs: Vec<Run>,
}

impl Decomposition {
    /// Linear scan over flattened paragraph children.
    ///
    /// Text becomes a plain run, emphasis a bold run. Any other node, and
    /// emphasis without text, is skipped and the scan carries on.
    ///
    /// ```
    /// use gossip_web::{ContentNode, Decomposition, Run};
    ///
    /// let nodes = [
    ///     ContentNode::Text("A".into()),
    ///     ContentNode::Other("span".into()),
    ///     ContentNode::Emphasis(Some("B".into())),
    /// ];
    /// let d = Decomposition::from_nodes(&nodes);
    /// assert_eq!(d.runs(), &[Run::Plain("A".into()), Run::Bold("B".into())]);
    /// ```
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a ContentNode>) -> Self {
        let runs = nodes
            .into_iter()
            .filter_map(|node| match node {
                ContentNode::Text(text) => Some(Run::Plain(text.clone())),
                ContentNode::Emphasis(Some(text)) => Some(Run::Bold(text.clone())),
                ContentNode::Emphasis(None) => {
                    debug!("paragraph.skip.empty_emphasis");
                    None
                }
                ContentNode::Other(kind) => {
                    debug!(%kind, "paragraph.skip.unclassified");
                    None
                }
            })
            .collect();
        Self { runs }
    }

    pub fn from_element(paragraph: ElementRef<'_>) -> Self {
        Self::from_nodes(&content_nodes(paragraph))
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Join the runs back into one line, optionally wrapping bold runs in `*`.
    pub fn render(&self, emphasize_bold: bool) -> Result<String, WebError> {
        self.render_with_marker(emphasize_bold.then_some(BOLD_MARKER))
    }

    /// Like [`Self::render`] with a caller-chosen marker; `None` renders plain.
    pub fn render_with_marker(&self, marker: Option<&str>) -> Result<String, WebError> {
        if self.is_empty() {
            return Err(WebError::EmptyParagraph);
        }

        let extra = marker.map_or(0, |m| 2 * m.len() * self.runs.len());
        let text_len: usize = self.runs.iter().map(|r| r.text().len()).sum();
        let mut out = String::with_capacity(text_len + extra);
        for run in &self.runs {
            match (run, marker) {
                (Run::Bold(text), Some(m)) => {
                    out.push_str(m);
                    out.push_str(text);
                    out.push_str(m);
                }
                _ => out.push_str(run.text()),
            }
        }
        Ok(out)
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A parsed paragraph: its runs and where the story came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub decomposition: Decomposition,
    pub source: Source,
}

impl Paragraph {
    /// Decompose a `<p>` element and extract its citation.
    ///
    /// Fails on the first missing anchor or link; an empty decomposition is
    /// not a failure.
    pub fn parse(paragraph: ElementRef<'_>) -> Result<Self, WebError> {
        let decomposition = Decomposition::from_element(paragraph);
        let source = extract_source(paragraph)?;
        Ok(Self {
            decomposition,
            source,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.decomposition.is_empty()
    }

    pub fn render(&self, emphasize_bold: bool) -> Result<String, WebError> {
        self.decomposition.render(emphasize_bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn with_paragraph<T>(fragment: &str, f: impl FnOnce(ElementRef<'_>) -> T) -> T {
        let html = Html::parse_fragment(fragment);
        let p = Selector::parse("p").unwrap();
        f(html.select(&p).next().expect("fixture has a <p>"))
    }

    fn decompose(fragment: &str) -> Decomposition {
        with_paragraph(fragment, Decomposition::from_element)
    }

    #[test]
    fn preserves_reading_order() {
        let d = decompose("<p>A<b>B</b>C</p>");
        assert_eq!(
            d.runs(),
            &[
                Run::Plain("A".into()),
                Run::Bold("B".into()),
                Run::Plain("C".into())
            ]
        );
        assert_eq!(d.render(true).unwrap(), "A*B*C");
        assert_eq!(d.render(false).unwrap(), "ABC");
    }

    #[test]
    fn unclassified_nodes_are_skipped_without_error() {
        let d = decompose("<p>A<span>ignored</span>B</p>");
        assert_eq!(d.runs(), &[Run::Plain("A".into()), Run::Plain("B".into())]);
    }

    #[test]
    fn unclassified_first_node_does_not_stop_the_scan() {
        let d = decompose(r#"<p><a href="x">(Sun)</a> Arsenal eye <b>Zaha</b></p>"#);
        assert_eq!(
            d.runs(),
            &[Run::Plain(" Arsenal eye ".into()), Run::Bold("Zaha".into())]
        );
    }

    #[test]
    fn adjacent_runs_of_one_kind_stay_separate() {
        let d = decompose("<p><b>Paul</b><b>Pogba</b></p>");
        assert_eq!(d.len(), 2);
        assert!(d.iter().all(|r| r.kind() == RunKind::Bold));
        assert_eq!(d.render(true).unwrap(), "*Paul**Pogba*");
    }

    #[test]
    fn plain_round_trip_reproduces_text_and_emphasis_content() {
        let fragment = "<p>Manchester United <strong>want</strong> to sign <b>Jadon Sancho</b> for £100m.</p>";
        let d = decompose(fragment);
        assert_eq!(
            d.render(false).unwrap(),
            "Manchester United want to sign Jadon Sancho for £100m."
        );
        assert_eq!(
            d.render(true).unwrap(),
            "Manchester United *want* to sign *Jadon Sancho* for £100m."
        );
    }

    #[test]
    fn empty_paragraph_is_falsy_and_refuses_to_render() {
        let d = decompose("<p><span>only decoration</span></p>");
        assert!(d.is_empty());
        assert_eq!(d.render(true), Err(WebError::EmptyParagraph));
        assert_eq!(Decomposition::default().render(false), Err(WebError::EmptyParagraph));
    }

    #[test]
    fn custom_marker_wraps_only_bold_runs() {
        let d = decompose("<p>A<b>B</b>C</p>");
        assert_eq!(d.render_with_marker(Some("__")).unwrap(), "A__B__C");
        assert_eq!(d.render_with_marker(None).unwrap(), "ABC");
    }

    #[test]
    fn paragraph_parse_needs_a_source() {
        let err = with_paragraph("<p>No citation <b>here</b></p>", Paragraph::parse);
        assert_eq!(err, Err(WebError::MissingAnchor));

        let parsed = with_paragraph(
            r#"<p><b>Chelsea</b> lead the race. <a href="https://example.com/a">(Sun)</a></p>"#,
            Paragraph::parse,
        )
        .unwrap();
        assert_eq!(parsed.render(true).unwrap(), "*Chelsea* lead the race. ");
        assert_eq!(parsed.source.outlet.as_deref(), Some("Sun"));
        assert!(!parsed.is_empty());
    }
}
