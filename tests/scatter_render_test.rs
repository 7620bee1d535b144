// Scatter rendering tests
//
// Marker counts, scale endpoints, monotonicity and determinism of the
// render pipeline, exercised against an in-memory surface.

use commit_scatter::models::{ChartConfig, CommitRecord, Dataset, RenderMode};
use commit_scatter::renderers::{RenderStats, ScatterRenderer};

fn two_commits() -> Dataset {
    Dataset::new(vec![
        CommitRecord::new(10.0, 2.0, "a"),
        CommitRecord::new(50.0, 20.0, "b"),
    ])
    .expect("valid records")
}

fn many_commits(n: usize) -> Dataset {
    let records = (0..n)
        .map(|i| CommitRecord::new((i * 7 % 31) as f64, (i * 3 % 17) as f64, format!("dev{}", i % 4)))
        .collect();
    Dataset::new(records).expect("valid records")
}

fn renderer(mode: RenderMode) -> ScatterRenderer {
    ScatterRenderer::new(ChartConfig {
        mode,
        ..ChartConfig::default()
    })
    .expect("default config is valid")
}

#[test]
fn test_one_marker_per_record() {
    let renderer = renderer(RenderMode::Append);
    let dataset = many_commits(25);
    let mut surface = renderer.initialize();

    let (_, stats) = renderer.draw(&mut surface, &dataset);

    assert_eq!(surface.marker_count(), 25);
    assert_eq!(stats.entered, 25);
}

#[test]
fn test_append_mode_accumulates_markers() {
    let renderer = renderer(RenderMode::Append);
    let dataset = two_commits();
    let mut surface = renderer.initialize();
    let scales = renderer.compute_scales(&dataset);

    renderer.render(&mut surface, &dataset, &scales);
    renderer.render(&mut surface, &dataset, &scales);

    assert_eq!(surface.marker_count(), 4, "append mode is not idempotent");
}

#[test]
fn test_example_scenario_positions() {
    let renderer = renderer(RenderMode::Append);
    let dataset = two_commits();
    let mut surface = renderer.initialize();

    renderer.draw(&mut surface, &dataset);

    let positions = surface.marker_positions();
    assert_eq!(positions[0], (0.0, 450.0), "record a sits at the lower-left corner");
    assert_eq!(positions[1], (900.0, 0.0), "record b sits at the upper-right corner");
    assert!(positions[1].1 < positions[0].1, "more deletions means smaller y");
}

#[test]
fn test_scale_endpoints() {
    let renderer = renderer(RenderMode::Append);
    let dataset = many_commits(40);
    let scales = renderer.compute_scales(&dataset);

    let (x_min, x_max) = scales.x.domain();
    let (y_min, y_max) = scales.y.domain();
    assert_eq!(scales.x.map(x_min), 0.0);
    assert_eq!(scales.x.map(x_max), 900.0);
    assert_eq!(scales.y.map(y_min), 450.0);
    assert_eq!(scales.y.map(y_max), 0.0);
}

#[test]
fn test_x_position_is_monotonic_in_additions() {
    let renderer = renderer(RenderMode::Append);
    let dataset = many_commits(60);
    let scales = renderer.compute_scales(&dataset);

    for a in dataset.iter() {
        for b in dataset.iter() {
            if a.additions < b.additions {
                let (xa, _) = renderer.position(a, &scales);
                let (xb, _) = renderer.position(b, &scales);
                assert!(xa < xb, "{} -> {} should be left of {} -> {}", a.additions, xa, b.additions, xb);
            }
        }
    }
}

#[test]
fn test_empty_dataset_draws_axes_and_no_markers() {
    let renderer = renderer(RenderMode::Append);
    let dataset = Dataset::default();
    let mut surface = renderer.initialize();

    let (scales, stats) = renderer.draw(&mut surface, &dataset);

    assert_eq!(surface.marker_count(), 0);
    assert_eq!(stats, RenderStats::default());
    assert_eq!(scales.x.domain(), (0.0, 1.0));
    assert_eq!(scales.y.domain(), (0.0, 1.0));

    let x_axis = surface.plot().children_with_class("x").next().expect("x axis drawn");
    assert_eq!(x_axis.children_with_class("tick").count(), 11);
}

#[test]
fn test_single_value_domain_collapses_to_midpoint() {
    let renderer = renderer(RenderMode::Append);
    let dataset = Dataset::new(vec![
        CommitRecord::new(5.0, 5.0, "a"),
        CommitRecord::new(5.0, 5.0, "b"),
    ])
    .unwrap();
    let mut surface = renderer.initialize();

    renderer.draw(&mut surface, &dataset);

    for (x, y) in surface.marker_positions() {
        assert_eq!((x, y), (450.0, 225.0));
    }
}

#[test]
fn test_clear_then_render_is_deterministic() {
    let renderer = renderer(RenderMode::Append);
    let dataset = many_commits(30);
    let mut surface = renderer.initialize();

    renderer.clear(&mut surface);
    renderer.draw(&mut surface, &dataset);
    let first = surface.marker_positions();

    renderer.clear(&mut surface);
    renderer.draw(&mut surface, &dataset);
    let second = surface.marker_positions();

    assert_eq!(first.len(), 30);
    assert_eq!(first, second);
}

#[test]
fn test_reconcile_mode_is_idempotent() {
    let renderer = renderer(RenderMode::Reconcile);
    let dataset = many_commits(12);
    let mut surface = renderer.initialize();

    let (_, first) = renderer.draw(&mut surface, &dataset);
    let (_, second) = renderer.draw(&mut surface, &dataset);

    assert_eq!(surface.marker_count(), 12);
    assert_eq!(first, RenderStats { entered: 12, updated: 0, removed: 0 });
    assert_eq!(second, RenderStats { entered: 0, updated: 12, removed: 0 });
}

#[test]
fn test_reconcile_mode_removes_surplus_and_moves_markers() {
    let renderer = renderer(RenderMode::Reconcile);
    let mut surface = renderer.initialize();
    renderer.draw(&mut surface, &many_commits(10));

    let smaller = two_commits();
    let (_, stats) = renderer.draw(&mut surface, &smaller);

    assert_eq!(stats, RenderStats { entered: 0, updated: 2, removed: 8 });
    assert_eq!(surface.marker_positions(), vec![(0.0, 450.0), (900.0, 0.0)]);
}

#[test]
fn test_reconcile_cleans_up_after_append_duplicates() {
    let append = renderer(RenderMode::Append);
    let reconcile = renderer(RenderMode::Reconcile);
    let dataset = two_commits();
    let mut surface = append.initialize();

    append.draw(&mut surface, &dataset);
    append.draw(&mut surface, &dataset);
    assert_eq!(surface.marker_count(), 4);

    let (_, stats) = reconcile.draw(&mut surface, &dataset);
    assert_eq!(stats.removed, 2);
    assert_eq!(surface.marker_count(), 2);
}

#[test]
fn test_axis_labels_present_in_markup() {
    let renderer = renderer(RenderMode::Append);
    let mut surface = renderer.initialize();
    renderer.draw(&mut surface, &two_commits());

    let markup = surface.to_markup();
    assert!(markup.contains(">Additions</text>"));
    assert!(markup.contains(">Deletions</text>"));
    assert!(markup.contains("transform=\"rotate(-90)\""));
    assert!(markup.contains("class=\"x axis\""));
    assert!(markup.contains("transform=\"translate(0,450)\""));
}
