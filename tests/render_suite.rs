use std::path::Path;

use wavedrom_rs_renderer::{Config, parse_document, render_svg};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
    assert!(svg.contains("viewBox=\"0 0 "), "{fixture}: missing viewBox");
}

fn render_fixture(path: &Path) -> String {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let doc = parse_document(&input).expect("parse failed");
    render_svg(&doc, &Config::default())
}

#[test]
fn render_all_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "basic.json5",
        "groups.json5",
        "arcs.json5",
        "gaps.json5",
        "hbounds.json5",
        "subcycle.json5",
        "levels.json5",
        "assign.json5",
        "spacers.json5",
    ];

    for rel in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        let svg = render_fixture(&path);
        assert_valid_svg(&svg, rel);
    }
}

#[test]
fn fixtures_render_deterministically() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    for rel in ["basic.json5", "groups.json5", "arcs.json5"] {
        let path = root.join(rel);
        let first = render_fixture(&path);
        let second = render_fixture(&path);
        assert_eq!(first, second, "{rel}: renders differ between passes");
    }
}

#[test]
fn widest_name_fits_inside_the_gutter() {
    let doc = parse_document(
        "{ signal: [{ name: 'a_rather_long_signal_name', wave: '01' }, { name: 's', wave: '10' }] }",
    )
    .unwrap();
    let svg = render_svg(&doc, &Config::default());
    let gutter = svg
        .split("id=\"lanes_0\" transform=\"translate(")
        .nth(1)
        .and_then(|rest| rest.split(',').next())
        .and_then(|x| x.parse::<f64>().ok())
        .expect("lanes transform missing");
    let short = parse_document("{ signal: [{ name: 's', wave: '10' }] }").unwrap();
    let short_svg = render_svg(&short, &Config::default());
    let short_gutter = short_svg
        .split("id=\"lanes_0\" transform=\"translate(")
        .nth(1)
        .and_then(|rest| rest.split(',').next())
        .and_then(|x| x.parse::<f64>().ok())
        .expect("lanes transform missing");
    assert!(
        gutter > short_gutter,
        "long names must widen the gutter ({gutter} vs {short_gutter})"
    );
}

#[test]
fn bad_documents_fail_with_typed_errors() {
    assert!(parse_document("not wavejson").is_err());
    assert!(parse_document("{}").is_err());
    assert!(parse_document("{ signal: {} }").is_err());
}
