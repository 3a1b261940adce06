use std::path::Path;

use risk_matrix_renderer::config::{Config, PackingStrategy};
use risk_matrix_renderer::{compute_layout, parse_risk_rows, render_svg};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn render_fixture(path: &Path, strategy: PackingStrategy) -> (String, usize) {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let mut config = Config::default();
    config.layout.packing.strategy = strategy;
    let parsed = parse_risk_rows(&input, &config.source);
    let layout = compute_layout(&parsed.set, &config.theme, &config.layout);
    let marker_count = layout.markers.len();
    (
        render_svg(&layout, &config.theme, &config.layout),
        marker_count,
    )
}

#[test]
fn render_all_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates: [(&str, usize); 5] = [
        ("basic.json", 6),
        ("named_ratings.json5", 4),
        ("crowded.json", 35),
        ("empty.json", 0),
        ("partial.json", 2),
    ];

    for (rel, expected_markers) in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        for strategy in [PackingStrategy::Grid, PackingStrategy::Hex] {
            let (svg, markers) = render_fixture(&path, strategy);
            assert_valid_svg(&svg, rel);
            assert_eq!(markers, expected_markers, "{rel} ({strategy:?})");
            assert_eq!(
                svg.matches("<circle").count(),
                expected_markers,
                "{rel} ({strategy:?})"
            );
        }
    }
}

#[test]
fn refreshing_unchanged_data_is_pixel_identical() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("crowded.json");
    let (first, _) = render_fixture(&path, PackingStrategy::Grid);
    let (second, _) = render_fixture(&path, PackingStrategy::Grid);
    assert_eq!(first, second);
}

#[test]
fn strategies_are_interchangeable_on_the_same_contract() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("basic.json");
    let (grid_svg, grid_markers) = render_fixture(&path, PackingStrategy::Grid);
    let (hex_svg, hex_markers) = render_fixture(&path, PackingStrategy::Hex);
    assert_eq!(grid_markers, hex_markers);
    assert_valid_svg(&grid_svg, "basic.json");
    assert_valid_svg(&hex_svg, "basic.json");
}
