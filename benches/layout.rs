use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crew_layout::{
    CanvasSelector, Edge, LayoutEngine, NodeArchetype, Orientation, PositionedNode,
};
use std::hint::black_box;

fn placed_crew(engine: &LayoutEngine, agents: usize, tasks: usize) -> Vec<PositionedNode> {
    let mut nodes = Vec::with_capacity(agents + tasks + 1);
    let push = |nodes: &mut Vec<PositionedNode>, id: String, archetype: NodeArchetype| {
        let position = engine.place_next(nodes, archetype, CanvasSelector::Primary);
        nodes.push(PositionedNode::new(id, archetype, position.x, position.y));
    };
    push(&mut nodes, "manager".to_string(), NodeArchetype::Manager);
    for i in 0..agents {
        push(&mut nodes, format!("agent-{i}"), NodeArchetype::Agent);
    }
    for i in 0..tasks {
        push(&mut nodes, format!("task-{i}"), NodeArchetype::Task);
    }
    nodes
}

fn crew_edges(agents: usize, tasks: usize) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(agents + tasks);
    for i in 0..agents {
        edges.push(Edge::new("manager", format!("agent-{i}")));
    }
    if agents > 0 {
        for i in 0..tasks {
            edges.push(Edge::new(format!("agent-{}", i % agents), format!("task-{i}")));
        }
    }
    edges
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    for orientation in [Orientation::Vertical, Orientation::Horizontal] {
        let mut engine = LayoutEngine::default();
        engine.set_orientation(orientation);
        for (agents, tasks) in [(3usize, 9usize), (10, 40), (25, 100)] {
            let name = format!("{orientation:?}_{agents}_{tasks}");
            group.bench_function(BenchmarkId::from_parameter(name), |b| {
                b.iter(|| {
                    let nodes = placed_crew(&engine, black_box(agents), black_box(tasks));
                    black_box(nodes.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_reorganize(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorganize");
    let engine = LayoutEngine::default();
    for (agents, tasks) in [(3usize, 9usize), (10, 40), (25, 100), (50, 400)] {
        let nodes = placed_crew(&engine, agents, tasks);
        let edges = crew_edges(agents, tasks);
        let name = format!("{agents}_{tasks}");
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(nodes, edges),
            |b, (nodes, edges)| {
                b.iter(|| {
                    let relayout =
                        engine.relayout(black_box(nodes), black_box(edges), CanvasSelector::Primary);
                    black_box(relayout.nodes.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_overlap_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_scan");
    let engine = LayoutEngine::default();
    for (agents, tasks) in [(10usize, 40usize), (50, 400)] {
        let nodes = placed_crew(&engine, agents, tasks);
        let name = format!("{}_nodes", nodes.len());
        group.bench_with_input(BenchmarkId::from_parameter(name), &nodes, |b, nodes| {
            b.iter(|| black_box(engine.collisions(black_box(nodes)).len()));
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_placement, bench_reorganize, bench_overlap_scan
);
criterion_main!(benches);
