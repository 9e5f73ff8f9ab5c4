use scraper::ElementRef;

use crate::{WebError, selector};

/// Where a gossip item was reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Publication name, when the anchor carries one as direct text.
    pub outlet: Option<String>,
    pub link: String,
}

/// Citation of a paragraph, taken from its first `<a>` at any depth.
///
/// The outlet is the anchor's first direct text child with parentheses
/// stripped from both ends. Anchors usually wrap an `<i>` as well, which is
/// why the anchor's whole text is not used.
///
/// ```
/// use gossip_web::{GossipPage, extract_source};
///
/// let page = GossipPage::parse(
///     r#"<div id="story-body"><p><a href="http://x/y">(Outlet Name)</a> rest</p></div>"#,
/// );
/// let paragraphs = page.paragraphs("story-body").unwrap();
/// let source = extract_source(paragraphs[0]).unwrap();
/// assert_eq!(source.outlet.as_deref(), Some("Outlet Name"));
/// assert_eq!(source.link, "http://x/y");
/// ```
pub fn extract_source(paragraph: ElementRef<'_>) -> Result<Source, WebError> {
    let anchors = selector("a")?;
    let anchor = paragraph
        .select(&anchors)
        .next()
        .ok_or(WebError::MissingAnchor)?;

    let link = anchor
        .value()
        .attr("href")
        .ok_or(WebError::MissingLink)?
        .to_string();

    let outlet = anchor.children().find_map(|child| {
        child
            .value()
            .as_text()
            .map(|text| text.trim_matches(&['(', ')'][..]).to_string())
    });

    Ok(Source { outlet, link })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn source_of(fragment: &str) -> Result<Source, WebError> {
        let html = Html::parse_fragment(fragment);
        let p = Selector::parse("p").unwrap();
        extract_source(html.select(&p).next().expect("fixture has a <p>"))
    }

    #[test]
    fn strips_parentheses_from_outlet() {
        let source = source_of(r#"<p><a href="http://x/y">(Outlet Name)</a> rest</p>"#).unwrap();
        assert_eq!(
            source,
            Source {
                outlet: Some("Outlet Name".into()),
                link: "http://x/y".into(),
            }
        );
    }

    #[test]
    fn outlet_skips_nested_markup() {
        let source = source_of(
            r#"<p>Text <a href="https://example.com/story"><i>via</i>(Daily Star Sunday)</a></p>"#,
        )
        .unwrap();
        assert_eq!(source.outlet.as_deref(), Some("Daily Star Sunday"));
    }

    #[test]
    fn outlet_is_absent_without_direct_text() {
        let source = source_of(r#"<p>Text <a href="https://example.com/s"><i>Times</i></a></p>"#)
            .unwrap();
        assert_eq!(source.outlet, None);
        assert_eq!(source.link, "https://example.com/s");
    }

    #[test]
    fn first_anchor_at_any_depth_wins() {
        let source = source_of(
            r#"<p><span><a href="https://first.example">(First)</a></span><a href="https://second.example">(Second)</a></p>"#,
        )
        .unwrap();
        assert_eq!(source.link, "https://first.example");
    }

    #[test]
    fn missing_anchor_and_link_are_errors() {
        assert_eq!(source_of("<p>No anchor</p>"), Err(WebError::MissingAnchor));
        assert_eq!(
            source_of("<p><a name=\"top\">(Sun)</a></p>"),
            Err(WebError::MissingLink)
        );
    }
}
