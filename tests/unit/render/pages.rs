use super::*;
use crate::animation::directive::{AnimationDirective, AnimationKind};

#[test]
fn pages_follow_presentation_order() {
    let mut deck = Deck::default();
    let second = deck.add_section();
    deck.update_content(second, "## second").unwrap();
    deck.move_section(1, 0).unwrap();

    let pages = render_deck(&deck, &Viewer::default(), &RenderOpts::thumbnail());
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].section, second);
    assert_eq!(pages[0].index, 0);
    assert!(pages[0].html.contains("<h2>second</h2>"));
    assert!(pages.iter().all(RenderedPage::is_ok));
}

#[test]
fn bad_width_falls_back_for_every_section_without_panicking() {
    let deck = Deck::default();
    let opts = RenderOpts {
        output_width: f64::NAN,
        animate: false,
    };
    let pages = render_deck(&deck, &Viewer::default(), &opts);
    assert_eq!(pages.len(), 1);
    assert!(!pages[0].is_ok());
    assert!(pages[0].html.contains("mds-fallback"));
}

#[test]
fn unknown_animation_only_affects_its_asset() {
    let mut deck = Deck::default();
    let s = deck.active_id();
    let bad = deck.add_asset(s, "data:,bad".into()).unwrap();
    deck.add_asset(s, "data:,good".into()).unwrap();
    deck.push_animation(
        bad,
        AnimationDirective {
            kind: AnimationKind::Unknown("spin".into()),
            ..AnimationDirective::default()
        },
    )
    .unwrap();

    let pages = render_deck(&deck, &Viewer::default(), &RenderOpts::presentation(960.0));
    assert!(pages[0].is_ok());
    assert!(pages[0].html.contains("asset-error"));
    assert!(pages[0].html.contains("data:,good"));
}

#[test]
fn presentation_document_wraps_pages() {
    let mut deck = Deck::default();
    deck.add_section();
    let pages = render_deck(&deck, &Viewer::default(), &RenderOpts::export());
    let doc = render_presentation_document("Deck <1>", &pages);
    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains("<title>Deck &lt;1&gt;</title>"));
    assert_eq!(doc.matches("class=\"pdf-section\"").count(), 2);
}
