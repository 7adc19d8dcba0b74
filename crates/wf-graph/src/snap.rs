//! R-tree snapping index over connected nodes.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wf_core::{GeoPoint, NodeId, NodeIdx};

/// Entry stored in the R-tree: a projected `[x, y]` point, the arena index,
/// and the map id used for tie-breaking.
#[derive(Clone)]
struct SnapEntry {
    point: [f64; 2],
    idx:   NodeIdx,
    id:    NodeId,
}

impl RTreeObject for SnapEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SnapEntry {
    /// Squared Euclidean distance in the projected plane.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

pub(crate) struct SnapIndex {
    tree:      RTree<SnapEntry>,
    /// `cos(mean latitude)` of the indexed nodes; constant for the graph's lifetime.
    lon_scale: f64,
}

impl SnapIndex {
    pub(crate) fn build(connected: &[NodeIdx], pos: &[GeoPoint], ids: &[NodeId]) -> Self {
        let lon_scale = if connected.is_empty() {
            1.0
        } else {
            let mean_lat = connected.iter().map(|n| pos[n.index()].lat).sum::<f64>()
                / connected.len() as f64;
            mean_lat.to_radians().cos()
        };

        let entries: Vec<SnapEntry> = connected
            .iter()
            .map(|&idx| SnapEntry {
                point: pos[idx.index()].planar(lon_scale),
                idx,
                id: ids[idx.index()],
            })
            .collect();

        Self { tree: RTree::bulk_load(entries), lon_scale }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.size()
    }

    /// Nearest entry; among exact ties the lowest `NodeId` wins.
    pub(crate) fn nearest(&self, pos: GeoPoint) -> Option<NodeIdx> {
        let query = pos.planar(self.lon_scale);
        let mut iter = self.tree.nearest_neighbor_iter_with_distance_2(&query);
        let (mut best, best_d2) = iter.next()?;
        for (entry, d2) in iter {
            if d2 > best_d2 {
                break;
            }
            if entry.id < best.id {
                best = entry;
            }
        }
        Some(best.idx)
    }

    pub(crate) fn k_nearest(&self, pos: GeoPoint, k: usize) -> Vec<NodeIdx> {
        let query = pos.planar(self.lon_scale);
        self.tree
            .nearest_neighbor_iter(&query)
            .take(k)
            .map(|e| e.idx)
            .collect()
    }
}
