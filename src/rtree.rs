//! R-tree indexed projected points and nearest-neighbour queries.

use geo::Coord;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A projected point with its dataset index for R-tree queries
#[derive(Debug, Clone, Copy)]
pub struct IndexedPoint {
    pub idx: usize,
    pub x: f64,
    pub y: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Build R-tree from projected points
pub fn build_rtree(points: &[Coord<f64>]) -> RTree<IndexedPoint> {
    let indexed: Vec<IndexedPoint> = points
        .iter()
        .enumerate()
        .map(|(i, c)| IndexedPoint {
            idx: i,
            x: c.x,
            y: c.y,
        })
        .collect();
    RTree::bulk_load(indexed)
}

/// Distance from point `idx` to its nearest other point.
///
/// Coincident points count as neighbours at distance zero. Returns `None`
/// when the tree holds no other point.
pub fn nearest_other_distance(
    tree: &RTree<IndexedPoint>,
    idx: usize,
    at: Coord<f64>,
) -> Option<f64> {
    tree.nearest_neighbor_iter(&[at.x, at.y])
        .find(|p| p.idx != idx)
        .map(|p| p.distance_2(&[at.x, at.y]).sqrt())
}
