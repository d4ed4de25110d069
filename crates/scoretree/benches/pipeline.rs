use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use scoretree::render::{
    LayoutAlgorithm, LayoutConfig, RenderOptions, layout_tree, render_scene, render_svg_sync,
};
use scoretree::{Dimensions, TreeNode, parse_tree_json};

fn balanced(depth: usize, fanout: usize, counter: &mut usize) -> TreeNode {
    *counter += 1;
    let score = (*counter % 7) as f64 / 5.0 - 0.6;
    let node = TreeNode::leaf(format!("taxon {counter}")).with_scores(score.abs(), score);
    if depth == 0 {
        return node;
    }
    node.with_children((0..fanout).map(|_| balanced(depth - 1, fanout, counter)))
}

fn fixtures() -> Vec<(&'static str, TreeNode)> {
    let mut counter = 0;
    let wide = balanced(2, 30, &mut counter);
    counter = 0;
    let deep = balanced(10, 2, &mut counter);
    vec![("wide", wide), ("deep", deep)]
}

fn dims() -> Dimensions {
    Dimensions::new(1200.0, 800.0)
}

fn bench_layout_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_only");
    for (name, tree) in fixtures() {
        for algorithm in [LayoutAlgorithm::Bands, LayoutAlgorithm::Tidy] {
            let cfg = LayoutConfig {
                algorithm,
                ..LayoutConfig::default()
            };
            group.bench_function(format!("{name}/{algorithm:?}"), |b| {
                b.iter(|| layout_tree(&tree, dims(), &cfg));
            });
        }
    }
    group.finish();
}

fn bench_render_scene(c: &mut Criterion) {
    let options = RenderOptions::default();
    let mut group = c.benchmark_group("render_scene");
    for (name, tree) in fixtures() {
        group.bench_function(name, |b| {
            b.iter(|| render_scene(&tree, Some(dims()), &options).unwrap());
        });
    }
    group.finish();
}

fn bench_parse_and_render_svg(c: &mut Criterion) {
    let options = RenderOptions::default();
    let mut group = c.benchmark_group("parse_and_render_svg");
    for (name, tree) in fixtures() {
        let json = serde_json::to_string(&tree).unwrap();
        group.bench_function(name, |b| {
            b.iter_batched(
                || json.as_str(),
                |text| {
                    let tree = parse_tree_json(text).unwrap();
                    let _svg = render_svg_sync(&tree, dims(), &options).unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_layout_only,
    bench_render_scene,
    bench_parse_and_render_svg
);
criterion_main!(benches);
