use criterion::{Criterion, black_box, criterion_group, criterion_main};
use twin_layout::{
    BuildingGraph, LayoutProjector, Logger, LogEvent, LogSink, LoggingResult, PlacementCache,
    ProjectionConfig, Zone,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

const FLOORS: i64 = 12;
const ZONES_PER_FLOOR: usize = 40;

/// Corridor-style building: each zone links to the next on its floor and to
/// the zone directly above, plus one dangling reference per floor.
fn tower() -> BuildingGraph {
    let mut zones = Vec::new();
    for floor in 1..=FLOORS {
        for idx in 0..ZONES_PER_FLOOR {
            let mut zone = Zone::new(format!("f{floor}-z{idx}"), floor);
            if idx + 1 < ZONES_PER_FLOOR {
                zone = zone.with_neighbor(format!("f{floor}-z{}", idx + 1));
            }
            if floor < FLOORS {
                zone = zone.with_neighbor(format!("f{}-z{idx}", floor + 1));
            }
            if idx == 0 {
                zone = zone.with_neighbor(format!("f{floor}-annex"));
            }
            zones.push(zone);
        }
    }
    BuildingGraph::from_zones(zones)
}

fn project_tower(c: &mut Criterion) {
    let graph = tower();
    let projector = LayoutProjector::new(ProjectionConfig::default());
    c.bench_function("project_tower", |b| {
        b.iter(|| projector.project(black_box(&graph)).expect("projection"));
    });
}

fn project_tower_observed(c: &mut Criterion) {
    let graph = tower();
    let mut projector = LayoutProjector::new(ProjectionConfig::default())
        .with_logger(Logger::new(NullSink::default()));
    projector.enable_metrics();
    c.bench_function("project_tower_observed", |b| {
        b.iter(|| projector.project(black_box(&graph)).expect("projection"));
    });
}

fn cached_tower(c: &mut Criterion) {
    let graph = tower();
    let projector = LayoutProjector::new(ProjectionConfig::default());
    let mut cache = PlacementCache::new();
    c.bench_function("cached_tower", |b| {
        b.iter(|| {
            cache
                .get_or_project(&projector, black_box(&graph))
                .expect("projection")
                .edges
                .len()
        });
    });
}

criterion_group!(benches, project_tower, project_tower_observed, cached_tower);
criterion_main!(benches);
