use gossip_web::{GossipPage, Run, WebError};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Football gossip</title></head>
<body>
  <div id="nav"><p>Home <a href="/sport">(Sport)</a></p></div>
  <div id="story-body" class="story-body">
    <p class="introduction">Monday's gossip column</p>
    <p><b>Manchester United</b> are ready to bid £80m for <b>Harry Maguire</b>. <a href="https://example.com/sun"><i>Read more: </i>(Sun)</a></p>
    <p></p>
    <p>Chelsea <!-- editor note --> remain <strong>interested</strong> in <span class="hidden">Ignored</span>Wilfried Zaha. <a href="https://example.com/mirror">(Mirror)</a></p>
    <p><b>Everton</b> are about to join the race. <a name="anchor-without-link">(Times)</a></p>
  </div>
</body>
</html>"#;

#[test]
fn digest_keeps_sourced_paragraphs_in_order() {
    let page = GossipPage::parse(PAGE);
    let digest = page.digest("story-body").expect("story present");

    assert_eq!(digest.paragraphs.len(), 2);
    // The introduction has no anchor and the last anchor has no href.
    assert_eq!(digest.skipped, 2);

    let first = &digest.paragraphs[0];
    assert_eq!(
        first.render(true).unwrap(),
        "*Manchester United* are ready to bid £80m for *Harry Maguire*. "
    );
    assert_eq!(first.source.outlet.as_deref(), Some("Sun"));
    assert_eq!(first.source.link, "https://example.com/sun");

    let second = &digest.paragraphs[1];
    assert_eq!(
        second.decomposition.runs(),
        &[
            Run::Plain("Chelsea ".into()),
            Run::Plain(" remain ".into()),
            Run::Bold("interested".into()),
            Run::Plain(" in ".into()),
            Run::Plain("Wilfried Zaha. ".into()),
        ]
    );
    assert_eq!(
        second.render(false).unwrap(),
        "Chelsea  remain interested in Wilfried Zaha. "
    );
    assert_eq!(second.source.outlet.as_deref(), Some("Mirror"));
}

#[test]
fn paragraphs_outside_the_container_are_ignored() {
    let page = GossipPage::parse(PAGE);
    let paragraphs = page.paragraphs("story-body").unwrap();
    assert_eq!(paragraphs.len(), 5);
    assert!(
        paragraphs
            .iter()
            .all(|p| !p.text().collect::<String>().contains("Home"))
    );
}

#[test]
fn unknown_container_fails_the_digest() {
    let page = GossipPage::parse(PAGE);
    assert_eq!(
        page.digest("missing").err(),
        Some(WebError::StoryNotFound("missing".into()))
    );
}
