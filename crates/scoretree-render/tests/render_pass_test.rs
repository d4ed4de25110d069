use scoretree_core::{ChartConfig, Dimensions, TreeNode, parse_tree_json};
use scoretree_render::config::{NEGATIVE_COLOR, POSITIVE_COLOR};
use scoretree_render::scene::{Paint, Primitive, Role, Scene, TextAnchor};
use scoretree_render::{
    Error, RenderOptions, RenderOutcome, SvgSurface, TreeChart, render_scene,
};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture(name: &str) -> String {
    let path = workspace_root().join("fixtures").join(name);
    std::fs::read_to_string(&path).expect("fixture")
}

fn primates() -> TreeNode {
    parse_tree_json(&fixture("primates.json")).expect("fixture parses")
}

fn dims() -> Option<Dimensions> {
    Some(Dimensions::new(800.0, 300.0))
}

fn scene(tree: &TreeNode) -> Scene {
    render_scene(tree, dims(), &RenderOptions::default())
        .expect("render ok")
        .expect("dimensions present")
}

fn path(scene: &Scene, i: usize) -> &scoretree_render::scene::PathPrimitive {
    match &scene.links[i] {
        Primitive::Path(p) => p,
        other => panic!("expected path, got {other:?}"),
    }
}

fn circle(scene: &Scene, i: usize) -> &scoretree_render::scene::CirclePrimitive {
    match &scene.nodes[i] {
        Primitive::Circle(c) => c,
        other => panic!("expected circle, got {other:?}"),
    }
}

fn text(scene: &Scene, i: usize) -> &scoretree_render::scene::TextPrimitive {
    match &scene.labels[i] {
        Primitive::Text(t) => t,
        other => panic!("expected text, got {other:?}"),
    }
}

fn path_numbers(d: &str) -> Vec<f64> {
    d.trim_start_matches('M')
        .split(['C', ','])
        .map(|n| n.parse::<f64>().expect("number"))
        .collect()
}

#[test]
fn primitive_counts_follow_node_count() {
    let tree = primates();
    let scene = scene(&tree);
    assert_eq!(tree.node_count(), 8);
    assert_eq!(scene.nodes.len(), 8);
    assert_eq!(scene.labels.len(), 8);
    assert_eq!(scene.links.len(), 7);
    assert_eq!(scene.legend.len(), 1);
}

#[test]
fn edge_styles_follow_branch_scores() {
    // Links are ordered by child in pre-order:
    // HOMININAE, Homo sapiens, PAN, Pan troglodytes, Pan paniscus, Gorilla gorilla, Pongo abelii
    let scene = scene(&primates());

    let homininae = path(&scene, 0);
    assert_eq!(homininae.stroke, POSITIVE_COLOR);
    assert_eq!(homininae.opacity, 0.8);
    assert_eq!(homininae.dash, 0.0);
    assert_eq!(homininae.stroke_width, 4.0);
    assert_eq!(homininae.fill, Paint::None);

    assert_eq!(path(&scene, 1).opacity, 0.25);

    let pan = path(&scene, 2);
    assert_eq!(pan.stroke, NEGATIVE_COLOR);
    assert_eq!(pan.opacity, 0.6);

    let troglodytes = path(&scene, 3);
    assert_eq!(troglodytes.stroke, "black");
    assert_eq!(troglodytes.dash, 5.0);
    assert_eq!(troglodytes.opacity, 0.25);

    // "0.45" arrives as a string in the fixture.
    assert_eq!(path(&scene, 4).opacity, 0.45);
    assert_eq!(path(&scene, 5).stroke, NEGATIVE_COLOR);
    assert_eq!(path(&scene, 5).opacity, 0.25);
    assert_eq!(path(&scene, 6).opacity, 1.2);
}

#[test]
fn links_connect_parent_to_child() {
    let tree = primates();
    let options = RenderOptions::default();
    let layout = scoretree_render::layout::layout_tree(
        &tree,
        dims().unwrap(),
        &options.config.layout,
    );
    let scene = scoretree_render::encode_scene(&layout, &options.config);
    for (i, edge) in layout.edges().iter().enumerate() {
        let (x0, y0) = layout.nodes[edge.parent].point();
        let (x1, y1) = layout.nodes[edge.child].point();
        let d = &path(&scene, i).d;
        let nums = path_numbers(d);
        assert_eq!(nums.len(), 8, "{d}");
        let mx = (x0 + x1) / 2.0;
        for (got, want) in nums.iter().zip([x0, y0, mx, y0, mx, y1, x1, y1]) {
            // Path data is rounded to three fractional digits.
            assert!((got - want).abs() <= 5e-4 + 1e-9, "{d}: {got} != {want}");
        }
    }
}

#[test]
fn node_styles_follow_node_scores() {
    let scene = scene(&primates());

    let homininae = circle(&scene, 1);
    assert_eq!(homininae.fill, Paint::Transparent);
    assert_eq!(homininae.r, 4.0);

    let pan = circle(&scene, 3);
    assert_eq!(pan.r, 0.0);

    let paniscus = circle(&scene, 5);
    assert_eq!(paniscus.fill, Paint::Color("black".into()));
    assert_eq!(paniscus.r, 4.0);

    for i in 0..scene.nodes.len() {
        let c = circle(&scene, i);
        assert_eq!(c.stroke, "black");
        assert_eq!(c.stroke_width, 1.0);
    }
}

#[test]
fn labels_hide_all_caps_names_and_pick_a_side() {
    let scene = scene(&primates());

    assert_eq!(text(&scene, 0).content, "");
    assert_eq!(text(&scene, 1).content, "");
    assert_eq!(text(&scene, 3).content, "");
    assert_eq!(text(&scene, 2).content, "Homo sapiens");
    assert_eq!(text(&scene, 7).content, "Pongo abelii");

    let root = text(&scene, 0);
    assert_eq!(root.anchor, Some(TextAnchor::End));
    assert_eq!(root.x, -5.0);

    // `"children": []` is a leaf.
    let pongo = text(&scene, 7);
    assert_eq!(pongo.anchor, Some(TextAnchor::Start));
    assert_eq!(pongo.y, circle(&scene, 7).cy);
    assert_eq!(pongo.x, circle(&scene, 7).cx + 5.0);
}

#[test]
fn missing_dimensions_touch_nothing() {
    let tree = primates();
    assert!(
        render_scene(&tree, None, &RenderOptions::default())
            .unwrap()
            .is_none()
    );

    let mut chart = TreeChart::new(SvgSurface::new());
    assert_eq!(chart.render(&tree, None).unwrap(), RenderOutcome::Skipped);
    assert_eq!(chart.surface().mutations(), 0);
    assert_eq!(chart.surface().element_count(), 0);

    chart.render(&tree, dims()).unwrap();
    let before = chart.surface().to_svg_string();
    let writes = chart.surface().mutations();
    assert_eq!(chart.render(&tree, None).unwrap(), RenderOutcome::Skipped);
    assert_eq!(chart.surface().mutations(), writes);
    assert_eq!(chart.surface().to_svg_string(), before);
}

#[test]
fn repeated_passes_are_idempotent() {
    let tree = primates();
    let mut chart = TreeChart::new(SvgSurface::new());

    let first = chart.render(&tree, dims()).unwrap();
    let svg_once = chart.surface().to_svg_string();
    let count_once = chart.surface().element_count();

    let second = chart.render(&tree, dims()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, RenderOutcome::Rendered { nodes: 8, links: 7 });
    assert_eq!(chart.surface().element_count(), count_once);
    assert_eq!(chart.surface().to_svg_string(), svg_once);
    assert_eq!(chart.surface().elements(Role::Legend).len(), 1);
}

#[test]
fn chart_hands_back_its_surface_and_options() {
    let cfg = ChartConfig::from_value(serde_json::json!({ "node": { "radius": 3 } }));
    let options = RenderOptions::from_chart_config(&cfg).unwrap();
    let mut chart = TreeChart::with_options(SvgSurface::new().with_id("primates"), options);
    assert_eq!(chart.options().config.node.radius, 3.0);

    chart.render(&primates(), dims()).unwrap();
    let surface = chart.into_surface();
    assert_eq!(surface.elements(Role::Node).len(), 8);
    assert!(surface.to_svg_string().contains(r#"id="primates""#));
}

#[test]
fn deep_ladders_render_end_to_end() {
    let depth = 250;
    let mut json = String::from(r#"{"name":"Homo sapiens","node_score":0.7,"branch_score":0.9}"#);
    for level in (0..depth).rev() {
        json = format!(
            r#"{{"name":"N{level}","branch_score":-0.3,"children":[{json},{{"name":"outgroup {level}"}}]}}"#
        );
    }
    let tree = parse_tree_json(&json).unwrap();
    assert_eq!(tree.max_depth(), depth);

    let mut chart = TreeChart::new(SvgSurface::new());
    let outcome = chart.render(&tree, dims()).unwrap();
    assert_eq!(
        outcome,
        RenderOutcome::Rendered {
            nodes: 2 * depth + 1,
            links: 2 * depth
        }
    );
}

#[test]
fn shrinking_the_tree_leaves_no_stale_elements() {
    let mut chart = TreeChart::new(SvgSurface::new());
    chart.render(&primates(), dims()).unwrap();

    let small = TreeNode::leaf("ROOT").with_children([TreeNode::leaf("Danio rerio")]);
    chart.render(&small, dims()).unwrap();

    let surface = chart.surface();
    assert_eq!(surface.elements(Role::Node).len(), 2);
    assert_eq!(surface.elements(Role::Label).len(), 2);
    assert_eq!(surface.elements(Role::Link).len(), 1);
    assert_eq!(surface.elements(Role::Legend).len(), 1);
}

#[test]
fn resizing_rescales_the_layout() {
    let tree = primates();
    let narrow = scene(&tree);
    let wide = render_scene(
        &tree,
        Some(Dimensions::new(1600.0, 300.0)),
        &RenderOptions::default(),
    )
    .unwrap()
    .unwrap();
    // Leaf depth doubles with the width; the legend does not move.
    assert_eq!(circle(&wide, 2).cx, 2.0 * circle(&narrow, 2).cx);
    assert_eq!(wide.legend, narrow.legend);
    assert_eq!(wide.extent, (1600.0, 1200.0));
}

#[test]
fn invalid_dimensions_are_rejected_without_touching_the_surface() {
    let mut chart = TreeChart::new(SvgSurface::new());
    let err = chart
        .render(&primates(), Some(Dimensions::new(f64::NAN, 10.0)))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDimensions { .. }));
    assert_eq!(chart.surface().mutations(), 0);
}

#[test]
fn programmatic_nan_scores_fail_fast() {
    let tree = TreeNode::leaf("ROOT").with_children([TreeNode::leaf("x").with_scores(0.2, f64::NAN)]);
    let err = render_scene(&tree, dims(), &RenderOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(scoretree_core::Error::NonFiniteScore {
            field: "branch_score",
            ..
        })
    ));
}

#[test]
fn malformed_scores_are_rejected_at_ingestion() {
    let err = parse_tree_json(&fixture("bad_score.json")).unwrap_err();
    match err {
        scoretree_core::Error::InvalidScore { node, field, .. } => {
            assert_eq!(node, "Mus musculus");
            assert_eq!(field, "branch_score");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn chart_config_overrides_reach_the_scene() {
    let cfg = ChartConfig::from_value(serde_json::json!({
        "edge": { "positiveColor": "darkred", "unscoredOpacity": 0.1 },
        "node": { "radius": 6 },
        "legend": { "x": 0, "y": 0 }
    }));
    let options = RenderOptions::from_chart_config(&cfg).unwrap();
    let scene = render_scene(&primates(), dims(), &options).unwrap().unwrap();

    assert_eq!(path(&scene, 0).stroke, "darkred");
    assert_eq!(path(&scene, 3).opacity, 0.1);
    assert_eq!(circle(&scene, 0).r, 6.0);
    let Primitive::Group(legend) = &scene.legend[0] else {
        panic!("legend group");
    };
    assert_eq!(legend.translate, (0.0, 0.0));
    let Primitive::Rect(swatch) = &legend.children[0] else {
        panic!("swatch");
    };
    assert_eq!(swatch.fill, Paint::Color("darkred".into()));
}
