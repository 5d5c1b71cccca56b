use super::*;
use crate::animation::directive::{AnimationDirective, AnimationKind};
use crate::foundation::core::Axis;

fn asset_at(x: f64, y: f64) -> Asset {
    let mut a = Asset::new("data:image/png;base64,AAAA", 100.0);
    a.x = x;
    a.y = y;
    a
}

fn moveto(value: f64) -> AnimationDirective {
    AnimationDirective {
        kind: AnimationKind::MoveTo,
        direction: Axis::Y,
        duration: 2.0,
        value,
        ..AnimationDirective::default()
    }
}

#[test]
fn thumbnail_scales_canvas_uniformly() {
    let viewer = Viewer::default();
    let out = viewer
        .render_section(SectionId(1), "# title", &[], &RenderOpts::thumbnail())
        .unwrap();
    assert!((out.scale - 100.0 / 1920.0).abs() < 1e-12);
    assert!((out.height - 56.25).abs() < 1e-9);
    assert!(out.html.contains("width:100px;height:56.25px"));
    assert!(out.html.contains("matrix(0.0521,0,0,0.0521,0,0)"));
    assert!(out.html.contains("width:1920px;height:1080px"));
    assert!(out.html.contains("<h1>title</h1>"));
}

#[test]
fn output_is_wrapped_in_a_shadow_root() {
    let out = Viewer::default()
        .render_section(SectionId(3), "<style>*{}</style>", &[], &RenderOpts::export())
        .unwrap();
    assert!(out.html.starts_with("<div class=\"mds-viewer\" data-section=\"3\""));
    assert!(out.html.contains("<template shadowrootmode=\"open\">"));
    assert!(out.html.ends_with("</template></div>"));
    assert!(!out.html.contains("<style>*{}</style>"));
}

#[test]
fn assets_are_positioned_in_virtual_units() {
    let a = asset_at(910.0, 490.0);
    let out = Viewer::default()
        .render_section(SectionId(1), "", &[(AssetId(7), &a)], &RenderOpts::thumbnail())
        .unwrap();
    assert!(out.html.contains(
        "data-asset=\"7\" style=\"left:910px;top:490px;width:100px;height:100px\""
    ));
    assert!(out.html.contains("<img src=\"data:image/png;base64,AAAA\""));
}

#[test]
fn static_render_emits_no_layers() {
    let mut a = asset_at(0.0, 0.0);
    a.animation.push(moveto(50.0));
    let out = Viewer::default()
        .render_section(SectionId(1), "", &[(AssetId(1), &a)], &RenderOpts::thumbnail())
        .unwrap();
    assert!(!out.html.contains("@keyframes"));
    assert!(!out.html.contains("class=\"layer\""));
}

#[test]
fn animated_render_nests_one_wrapper_per_layer() {
    let mut a = asset_at(0.0, 0.0);
    a.animation.push(moveto(50.0));
    a.animation.push(AnimationDirective::default());
    let out = Viewer::default()
        .render_section(
            SectionId(1),
            "",
            &[(AssetId(4), &a)],
            &RenderOpts::presentation(960.0),
        )
        .unwrap();
    assert_eq!(out.html.matches("class=\"layer\"").count(), 2);
    assert!(out.html.contains(
        "@keyframes mds-a4-l0{0%{transform:translateY(0px)}100%{transform:translateY(50px)}}"
    ));
    assert!(out.html.contains("animation:mds-a4-l0 2s linear infinite"));
    assert!(out.html.contains("animation:mds-a4-l1 1s linear infinite"));
    let outer = out.html.find("mds-a4-l0 2s").unwrap();
    let inner = out.html.find("mds-a4-l1 1s").unwrap();
    let img = out.html.find("<img").unwrap();
    assert!(outer < inner && inner < img);
}

#[test]
fn unknown_animation_falls_back_per_asset() {
    let mut bad = asset_at(10.0, 10.0);
    bad.animation.push(AnimationDirective {
        kind: AnimationKind::Unknown("spin".into()),
        ..AnimationDirective::default()
    });
    let good = asset_at(20.0, 20.0);
    let out = Viewer::default()
        .render_section(
            SectionId(1),
            "",
            &[(AssetId(1), &bad), (AssetId(2), &good)],
            &RenderOpts::presentation(1920.0),
        )
        .unwrap();
    assert_eq!(out.asset_failures.len(), 1);
    assert_eq!(out.asset_failures[0].0, AssetId(1));
    assert!(out.html.contains("asset asset-error"));
    assert!(out.html.contains("data-asset=\"2\""));
}

#[test]
fn rejects_non_positive_width() {
    let err = Viewer::default()
        .render_section(
            SectionId(1),
            "",
            &[],
            &RenderOpts {
                output_width: 0.0,
                animate: false,
            },
        )
        .unwrap_err();
    assert!(matches!(err, SlidesError::Validation(_)));
}

#[test]
fn vibrate_keyframes_cover_the_period() {
    let layer = TransformLayer::from_directive(&AnimationDirective::default()).unwrap();
    let css = keyframes_css("k", &layer);
    assert!(css.starts_with("@keyframes k{0%{transform:translateX(0px)}"));
    assert!(css.contains("100%{"));
    assert_eq!(css.matches("transform:").count(), 60);
}
