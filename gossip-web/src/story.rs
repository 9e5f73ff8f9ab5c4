//! Locating the story container on a gossip page and digesting it.
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use crate::paragraph::{Decomposition, Paragraph};
use crate::source::extract_source;
use crate::{WebError, selector};

/// A parsed gossip page.
pub struct GossipPage {
    document: Html,
}

/// The usable paragraphs of one story, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryDigest {
    pub paragraphs: Vec<Paragraph>,
    /// Paragraphs with text but no usable citation.
    pub skipped: usize,
}

impl GossipPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// First `div` whose `id` is `container_id`.
    pub fn story_container(&self, container_id: &str) -> Result<ElementRef<'_>, WebError> {
        let divs = selector("div")?;
        self.document
            .select(&divs)
            .find(|div| div.value().id() == Some(container_id))
            .ok_or_else(|| WebError::StoryNotFound(container_id.to_string()))
    }

    /// Every `<p>` inside the story container, in document order.
    pub fn paragraphs(&self, container_id: &str) -> Result<Vec<ElementRef<'_>>, WebError> {
        let container = self.story_container(container_id)?;
        let paragraphs = selector("p")?;
        Ok(container.select(&paragraphs).collect())
    }

    /// Outer HTML of the story container.
    pub fn story_html(&self, container_id: &str) -> Result<String, WebError> {
        Ok(self.story_container(container_id)?.html())
    }

    /// Parse every paragraph of the story.
    ///
    /// Paragraphs without runs are dropped silently. Paragraphs whose
    /// citation is missing are dropped with a warning and counted in
    /// [`StoryDigest::skipped`].
    pub fn digest(&self, container_id: &str) -> Result<StoryDigest, WebError> {
        let mut digest = StoryDigest::default();

        for (index, element) in self.paragraphs(container_id)?.into_iter().enumerate() {
            let decomposition = Decomposition::from_element(element);
            if decomposition.is_empty() {
                debug!(index, "story.paragraph.empty");
                continue;
            }

            match extract_source(element) {
                Ok(source) => digest.paragraphs.push(Paragraph {
                    decomposition,
                    source,
                }),
                Err(error) => {
                    warn!(index, %error, "story.paragraph.unsourced");
                    digest.skipped += 1;
                }
            }
        }

        debug!(
            paragraphs = digest.paragraphs.len(),
            skipped = digest.skipped,
            "story.digest"
        );
        Ok(digest)
    }
}
