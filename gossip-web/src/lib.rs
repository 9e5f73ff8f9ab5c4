//! Story extraction for the football gossip page.
//!
//! - [`nodes`]: flattens a paragraph element into [`ContentNode`]s
//! - [`paragraph`]: the bold/plain [`Run`] decomposition and its renderer
//! - [`source`]: the citation attached to each paragraph
//! - [`story`]: locating the story container and digesting its paragraphs
//!
//! ```
//! use gossip_web::GossipPage;
//!
//! let page = GossipPage::parse(
//!     r#"<div id="story-body"><p>Spurs want <b>Jack Grealish</b>. <a href="https://example.com/x">(Mirror)</a></p></div>"#,
//! );
//! let digest = page.digest("story-body").unwrap();
//! let first = &digest.paragraphs[0];
//! assert_eq!(first.render(true).unwrap(), "Spurs want *Jack Grealish*. ");
//! assert_eq!(first.source.outlet.as_deref(), Some("Mirror"));
//! ```

pub mod nodes;
pub mod paragraph;
pub mod source;
pub mod story;

pub use nodes::{ContentNode, content_nodes};
pub use paragraph::{BOLD_MARKER, Decomposition, Paragraph, Run, RunKind};
pub use source::{Source, extract_source};
pub use story::{GossipPage, StoryDigest};

use scraper::Selector;

/// Errors raised while turning page markup into a digest.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum WebError {
    /// The paragraph carries no `<a>` element to cite.
    #[error("paragraph has no source anchor")]
    MissingAnchor,

    /// The citing anchor has no `href`.
    #[error("source anchor has no href attribute")]
    MissingLink,

    /// Rendering was asked for a paragraph with no runs.
    #[error("cannot render an empty paragraph")]
    EmptyParagraph,

    /// No `div` with the configured id exists on the page.
    #[error("story container #{0} not found")]
    StoryNotFound(String),

    #[error("invalid selector: {0}")]
    Selector(String),
}

pub(crate) fn selector(css: &str) -> Result<Selector, WebError> {
    Selector::parse(css).map_err(|e| WebError::Selector(format!("{css}: {e:?}")))
}
