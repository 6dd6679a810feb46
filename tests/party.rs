use svg_party::party::{AnimationKind, PaintMode, Party, PartyConfig, PartyError, Pollable, PollableState};
use svg_party::svg::Document;

const CHART: &str = r#"<svg width="120" height="40">
  <g id="chart">
    <rect x="0" width="10" height="40"></rect>
    <rect x="20" width="10" height="40"></rect>
  </g>
  <g id="legend">
    <circle r="4"></circle>
  </g>
</svg>"#;

#[test]
fn declarative_party_round_trip() {
    let mut document = Document::parse(CHART).expect("failed to parse");
    let rects = document.select_all("#chart rect").unwrap();
    let party = Party::with_defaults(&mut document, &rects).expect("party failed");
    party.apply(&mut document, &rects).expect("apply failed");

    let circles = document.select_all("#legend circle").unwrap();
    party.apply_with_mode(&mut document, &circles, PaintMode::Stroke).expect("apply failed");

    let markup = document.to_markup();
    let mut reparsed = Document::parse(&markup).expect("failed to reparse");
    assert_eq!(reparsed.select_all("defs > #party > stop").unwrap().size(), 10);
    assert_eq!(reparsed.select_all("stop > animate").unwrap().size(), 10);
    assert_eq!(reparsed.select_all("rect").unwrap().size(), 2);
    for rect in reparsed.select_all("rect").unwrap().nodes() {
        assert_eq!(reparsed.attr(*rect, "fill"), Some("url(#party)"));
    }
    let circle = reparsed.select("circle").unwrap().node().unwrap();
    assert_eq!(reparsed.attr(circle, "stroke"), Some("url(#party)"));

    let first_animate = reparsed.select("animate").unwrap().node().unwrap();
    assert_eq!(
        reparsed.attr(first_animate, "values"),
        Some("#FD8E8D; #FDD58E; #8CFD8E; #8CFFFE; #8DB6FB; #D690FC; #FD90FD; #FD6EF4; #FC6FB6; #FD6A6B; #FD8E8D")
    );
    assert_eq!(reparsed.attr(first_animate, "dur"), Some("0.5s"));

    // A party built on the reparsed document finds the existing gradient
    let rects = reparsed.select_all("rect").unwrap();
    Party::with_defaults(&mut reparsed, &rects).expect("party failed");
    assert_eq!(reparsed.select_all("linearGradient").unwrap().size(), 1);
}

#[test]
fn frame_driven_party() {
    let mut document = Document::parse(CHART).expect("failed to parse");
    let rects = document.select_all("rect").unwrap();
    let config = PartyConfig::from_yaml("speed: 1000\nanimation: frames\ngradient: ['#f00', '#0f0']").unwrap();
    assert_eq!(config.animation, AnimationKind::Frames);

    let party = Party::new(&mut document, &rects, config).expect("party failed");
    party.apply(&mut document, &rects).expect("apply failed");
    assert!(party.animates().is_empty());

    let mut animator = party.animator();
    let first_stop = party.stops().node().unwrap();
    assert_eq!(animator.frame(&mut document, 1000.0), PollableState::Unmodified);
    assert_eq!(document.attr(first_stop, "style"), Some("stop-color: #FF0000"));
    assert_eq!(animator.frame(&mut document, 1500.0), PollableState::Modified);
    assert_eq!(document.attr(first_stop, "style"), Some("stop-color: #00FF00"));
}

#[test]
fn empty_group_keeps_its_siblings() {
    let mut document = Document::parse(r#"<svg><g></g><rect x="1"></rect></svg>"#).expect("failed to parse");
    let rect = document.select("rect").unwrap();
    let party = Party::with_defaults(&mut document, &rect).expect("party failed");
    party.apply(&mut document, &rect).expect("apply failed");

    let reparsed = Document::parse(&document.to_markup()).expect("failed to reparse");
    let root = reparsed.root().unwrap();
    let tags: Vec<_> = reparsed.children(root).iter().filter_map(|c| reparsed.tag_name(*c)).collect();
    assert_eq!(tags, vec!["g", "rect", "defs"]);
    let group = reparsed.select("g").unwrap().node().unwrap();
    assert!(reparsed.children(group).is_empty());
    let rect = reparsed.select("rect").unwrap().node().unwrap();
    assert_eq!(reparsed.attr(rect, "fill"), Some("url(#party)"));
}

#[test]
fn selection_from_another_document() {
    let mut document = Document::parse(CHART).expect("failed to parse");
    let other = Document::parse(CHART).expect("failed to parse");
    let foreign = other.select_all("rect").unwrap();

    let result = Party::with_defaults(&mut document, &foreign);
    assert!(matches!(result, Err(PartyError::ForeignSelection)));
    assert!(document.select_all("defs").unwrap().is_empty());
}

#[test]
fn gradient_in_nested_defs_is_reused() {
    let markup = r#"<svg><g><defs><linearGradient id="party"><stop offset="0%"></stop></linearGradient></defs><rect></rect></g></svg>"#;
    let mut document = Document::parse(markup).expect("failed to parse");
    let rect = document.select_all("rect").unwrap();
    let party = Party::with_defaults(&mut document, &rect).expect("party failed");

    assert_eq!(party.stops().size(), 1);
    assert_eq!(document.select_all("#party").unwrap().size(), 1);
    assert_eq!(document.select_all("defs").unwrap().size(), 1);
}
