use chrono::{Datelike, NaiveDate};
use gossip_common::{GossipError, Result, TimeOfDay};
use gossip_store::RawStore;
use gossip_web::{GossipPage, Source};
use tracing::info;

use crate::fetch::{PageFetcher, fetch_ok_page};

/// Where the displayed HTML came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    Stored(TimeOfDay),
    Live,
}

#[derive(Debug, Clone)]
pub struct ResolvedPage {
    pub html: String,
    pub origin: PageOrigin,
}

/// Build the requested calendar date, filling gaps from `today`.
pub fn requested_date(
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    today: NaiveDate,
) -> Result<NaiveDate> {
    let (y, m, d) = (
        year.unwrap_or(today.year()),
        month.unwrap_or(today.month()),
        day.unwrap_or(today.day()),
    );
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| GossipError::InvalidDate(format!("{y}-{m}-{d}")))
}

/// Pick the page to show for `date`.
///
/// An explicit bucket must exist on disk. Without one, the latest stored
/// bucket wins; a live fetch is only attempted when nothing is stored and
/// `date` is `today`.
pub async fn resolve_page(
    store: &RawStore,
    fetcher: &dyn PageFetcher,
    date: NaiveDate,
    tod: Option<TimeOfDay>,
    today: NaiveDate,
) -> Result<ResolvedPage> {
    if let Some(tod) = tod {
        let html = store
            .load_raw(date, tod)
            .await?
            .ok_or(GossipError::NotFound {
                date,
                tod: Some(tod),
            })?;
        return Ok(ResolvedPage {
            html,
            origin: PageOrigin::Stored(tod),
        });
    }

    if let Some(latest) = store.latest_available(date).await? {
        if let Some(html) = store.load_raw(date, latest).await? {
            return Ok(ResolvedPage {
                html,
                origin: PageOrigin::Stored(latest),
            });
        }
    }

    if date == today {
        info!(%date, "gossip.resolve.live_fallback");
        let page = fetch_ok_page(fetcher).await?;
        return Ok(ResolvedPage {
            html: page.body,
            origin: PageOrigin::Live,
        });
    }

    Err(GossipError::NotFound { date, tod: None })
}

/// One printable entry per sourced paragraph: the text, then its citation.
pub fn render_digest(html: &str, container_id: &str, emphasize_bold: bool) -> Result<Vec<String>> {
    let page = GossipPage::parse(html);
    let digest = page
        .digest(container_id)
        .map_err(|e| GossipError::Parse(e.to_string()))?;

    digest
        .paragraphs
        .iter()
        .map(|paragraph| {
            let text = paragraph
                .render(emphasize_bold)
                .map_err(|e| GossipError::Parse(e.to_string()))?;
            Ok(format!("{}\n    {}", text.trim(), citation(&paragraph.source)))
        })
        .collect()
}

fn citation(source: &Source) -> String {
    match source.outlet.as_deref().map(str::trim) {
        Some(outlet) if !outlet.is_empty() => format!("{outlet}: {}", source.link),
        _ => source.link.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_date_parts_come_from_today() {
        let today = day(2026, 10, 16);
        assert_eq!(requested_date(None, None, None, today).unwrap(), today);
        assert_eq!(
            requested_date(Some(2018), Some(7), None, today).unwrap(),
            day(2018, 7, 16)
        );
        assert_eq!(
            requested_date(None, None, Some(1), today).unwrap(),
            day(2026, 10, 1)
        );
    }

    #[test]
    fn impossible_dates_are_rejected() {
        let err = requested_date(Some(2019), Some(2), Some(30), day(2026, 10, 16)).unwrap_err();
        assert!(matches!(err, GossipError::InvalidDate(ref s) if s == "2019-2-30"));
    }

    #[test]
    fn digest_lines_carry_text_and_citation() {
        let html = r#"<div id="story-body">
            <p>Intro without a source</p>
            <p><b>Arsenal</b> want <b>Wilfried Zaha</b>. <a href="https://example.com/a">(Sun)</a></p>
            <p>Spurs are watching. <a href="https://example.com/b"><i>link</i></a></p>
        </div>"#;

        let lines = render_digest(html, "story-body", true).unwrap();
        assert_eq!(
            lines,
            vec![
                "*Arsenal* want *Wilfried Zaha*.\n    Sun: https://example.com/a".to_string(),
                "Spurs are watching.\n    https://example.com/b".to_string(),
            ]
        );

        let plain = render_digest(html, "story-body", false).unwrap();
        assert!(plain[0].starts_with("Arsenal want Wilfried Zaha."));
    }

    #[test]
    fn missing_story_container_is_a_parse_error() {
        let err = render_digest("<p>nothing</p>", "story-body", true).unwrap_err();
        assert!(matches!(err, GossipError::Parse(_)));
    }
}
