use blake3::{Hash, Hasher};

use crate::error::Result;
use crate::graph::BuildingGraph;
use crate::layout::{LayoutProjector, PlacementResult, ProjectionConfig};

/// Content hash of a projection's inputs.
pub fn fingerprint(graph: &BuildingGraph, config: &ProjectionConfig) -> Result<Hash> {
    let mut hasher = Hasher::new();
    hasher.update(&serde_json::to_vec(graph)?);
    hasher.update(b"\0");
    hasher.update(&serde_json::to_vec(config)?);
    Ok(hasher.finalize())
}

/// Single-slot memo keyed by input content.
///
/// A failed projection leaves the previous good result in place so callers can
/// keep rendering it.
#[derive(Debug, Default)]
pub struct PlacementCache {
    last: Option<(Hash, PlacementResult)>,
    hits: u64,
    misses: u64,
}

impl PlacementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_project(
        &mut self,
        projector: &LayoutProjector,
        graph: &BuildingGraph,
    ) -> Result<&PlacementResult> {
        let key = fingerprint(graph, projector.config())?;
        let entry = match self.last.take() {
            Some((cached, result)) if cached == key => {
                self.hits += 1;
                (cached, result)
            }
            previous => match projector.project(graph) {
                Ok(result) => {
                    self.misses += 1;
                    (key, result)
                }
                Err(err) => {
                    self.last = previous;
                    return Err(err);
                }
            },
        };
        let (_, result) = self.last.insert(entry);
        Ok(&*result)
    }

    pub fn last_good(&self) -> Option<&PlacementResult> {
        self.last.as_ref().map(|(_, result)| result)
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Zone;

    fn graph() -> BuildingGraph {
        BuildingGraph::new()
            .with_zone(Zone::new("a", 1).with_neighbors(["b"]))
            .with_zone(Zone::new("b", 1))
    }

    #[test]
    fn fingerprint_tracks_graph_and_config() {
        let base = fingerprint(&graph(), &ProjectionConfig::default()).unwrap();
        assert_eq!(base, fingerprint(&graph(), &ProjectionConfig::default()).unwrap());

        let taller = ProjectionConfig::default().with_floor_height(4.0);
        assert_ne!(base, fingerprint(&graph(), &taller).unwrap());

        let edited = graph().with_zone(Zone::new("c", 2));
        assert_ne!(base, fingerprint(&edited, &ProjectionConfig::default()).unwrap());
    }

    #[test]
    fn repeated_input_hits_cache() {
        let projector = LayoutProjector::new(ProjectionConfig::default());
        let mut cache = PlacementCache::new();
        let first = cache.get_or_project(&projector, &graph()).unwrap().clone();
        let second = cache.get_or_project(&projector, &graph()).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn failure_keeps_previous_good_result() {
        let projector = LayoutProjector::new(ProjectionConfig::default());
        let mut cache = PlacementCache::new();
        cache.get_or_project(&projector, &graph()).unwrap();

        let broken = graph().with_zone(Zone::new("cellar", -1));
        assert!(cache.get_or_project(&projector, &broken).is_err());
        let kept = cache.last_good().unwrap();
        assert_eq!(kept.positions.len(), 2);

        cache.invalidate();
        assert!(cache.last_good().is_none());
    }
}
