//! Lattice voxelization of an SDF
//!
//! Samples a node at every integer lattice point inside a region and reports
//! the solid ones. Scan order is x-major: x outermost, then y, then z
//! innermost. Consumers may rely on this order, so every evaluator in this
//! crate produces it.

use glam::IVec3;
use log::trace;

use super::NodeRef;
use crate::types::{block_center, BlockPos, Bounds};

/// One solid lattice cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Voxel {
    /// Lattice position
    pub pos: BlockPos,
    /// Material of the surface owning this cell
    pub material: u32,
}

/// One diagnostic sample, reported for every visited cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugSample {
    /// Lattice position
    pub pos: BlockPos,
    /// Distance rounded to the nearest quarter block
    pub distance: f64,
    /// Whether the cell was reported as solid
    pub placed: bool,
}

/// Counters of one evaluation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Cells visited
    pub sampled: usize,
    /// Cells reported as solid
    pub solid: usize,
}

/// Round to the nearest multiple of 0.25
#[inline]
pub fn round_quarter(d: f64) -> f64 {
    (d * 4.0).round() / 4.0
}

/// Inclusive integer range of lattice points covered by `region`
pub(crate) fn lattice_range(region: &Bounds) -> (IVec3, IVec3) {
    (region.min.ceil().as_ivec3(), region.max.floor().as_ivec3())
}

/// Block-aligned bounding box of a node, the natural region to evaluate
pub fn region_for(node: NodeRef<'_>) -> Option<Bounds> {
    node.bounding_box().map(|b| b.block_aligned())
}

/// Voxelize `node` over `region`
///
/// A cell is solid when the distance at its lattice point is `<= 0`.
/// `on_debug` sees every visited cell, solid or not. An empty node returns
/// at once without invoking either callback.
pub fn evaluate<F>(
    node: NodeRef<'_>,
    region: &Bounds,
    mut on_solid: F,
    mut on_debug: Option<&mut dyn FnMut(DebugSample)>,
) -> EvalStats
where
    F: FnMut(Voxel),
{
    let mut stats = EvalStats::default();
    if node.is_empty() {
        return stats;
    }

    let (lo, hi) = lattice_range(region);
    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                let pos = IVec3::new(x, y, z);
                let (distance, placed) = sample(node, pos, &mut on_solid);
                stats.sampled += 1;
                if placed {
                    stats.solid += 1;
                }
                if let Some(debug) = on_debug.as_deref_mut() {
                    debug(DebugSample {
                        pos,
                        distance: round_quarter(distance),
                        placed,
                    });
                }
            }
        }
    }

    trace!(
        "evaluated node {} over {}: {} sampled, {} solid",
        node.id(),
        region,
        stats.sampled,
        stats.solid
    );
    stats
}

/// Sample one cell, reporting it when solid
#[inline]
fn sample<F: FnMut(Voxel)>(node: NodeRef<'_>, pos: BlockPos, on_solid: &mut F) -> (f64, bool) {
    let p = block_center(pos);
    let d = node.distance(p);
    let placed = d <= 0.0;
    if placed {
        on_solid(Voxel {
            pos,
            material: node.material_at(p),
        });
    }
    (d, placed)
}

/// All solid cells of `node` inside `region`, in scan order
pub fn collect_solid(node: NodeRef<'_>, region: &Bounds) -> Vec<Voxel> {
    let mut voxels = Vec::new();
    evaluate(node, region, |v| voxels.push(v), None);
    voxels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Float3, SdfGraph, SdfNode};

    fn two_spheres() -> SdfGraph {
        let mut graph = SdfGraph::new();
        let a = graph.sphere(Float3::ZERO, 3.0).unwrap();
        let b = graph.sphere(Float3::new(0.0, 2.0, 0.0), 2.0).unwrap();
        let u = graph.union(&[a, b]).unwrap();
        graph.set_root(u).unwrap();
        graph
    }

    #[test]
    fn test_two_spheres_scenario() {
        let graph = two_spheres();
        let node = NodeRef::root_of(&graph);
        let region = region_for(node).unwrap();
        let voxels = collect_solid(node, &region);

        assert!(voxels.iter().any(|v| v.pos == IVec3::ZERO));
        assert!(!voxels.iter().any(|v| v.pos == IVec3::splat(10)));
        assert!(voxels.iter().any(|v| v.pos == IVec3::new(0, 4, 0)));
    }

    #[test]
    fn test_scan_order_is_x_major() {
        let graph = SdfGraph::with_root(SdfNode::cuboid(Float3::ZERO, Float3::splat(3.0))).unwrap();
        let node = NodeRef::root_of(&graph);
        let voxels = collect_solid(node, &region_for(node).unwrap());
        assert_eq!(voxels.len(), 27);
        assert_eq!(voxels[0].pos, IVec3::new(-1, -1, -1));
        assert_eq!(voxels[1].pos, IVec3::new(-1, -1, 0));
        assert_eq!(voxels[3].pos, IVec3::new(-1, 0, -1));
        assert_eq!(voxels[9].pos, IVec3::new(0, -1, -1));
        let mut sorted = voxels.clone();
        sorted.sort_by_key(|v| (v.pos.x, v.pos.y, v.pos.z));
        assert_eq!(sorted, voxels);
    }

    #[test]
    fn test_surface_cells_are_solid() {
        // Lattice points exactly on the surface count as inside
        let graph = SdfGraph::with_root(SdfNode::sphere(Float3::ZERO, 1.0)).unwrap();
        let node = NodeRef::root_of(&graph);
        let voxels = collect_solid(node, &Bounds::new(Float3::splat(-2.0), Float3::splat(2.0)));
        assert_eq!(voxels.len(), 7);
    }

    #[test]
    fn test_region_outside_shape_is_empty() {
        let graph = two_spheres();
        let node = NodeRef::root_of(&graph);
        let far = Bounds::new(Float3::splat(20.0), Float3::splat(30.0));
        let stats = evaluate(node, &far, |_| panic!("no voxel expected"), None);
        assert_eq!(stats.solid, 0);
        assert_eq!(stats.sampled, 11 * 11 * 11);
    }

    #[test]
    fn test_debug_sees_every_cell() {
        let graph = two_spheres();
        let node = NodeRef::root_of(&graph);
        let region = Bounds::new(Float3::new(0.0, 0.0, 0.0), Float3::new(5.0, 0.0, 0.0));
        let mut samples = Vec::new();
        let mut debug = |s: DebugSample| samples.push(s);
        let stats = evaluate(node, &region, |_| {}, Some(&mut debug));

        assert_eq!(stats.sampled, 6);
        assert_eq!(samples.len(), 6);
        assert_eq!(samples.iter().filter(|s| s.placed).count(), stats.solid);
        // (0,0,0) is 3 blocks inside the big sphere
        assert_eq!(samples[0].distance, -3.0);
        // (5,0,0) is 2 blocks outside
        assert_eq!(samples[5].distance, 2.0);
        assert!(!samples[5].placed);
    }

    #[test]
    fn test_empty_node_short_circuits() {
        let graph = SdfGraph::new();
        let node = NodeRef::root_of(&graph);
        let mut calls = 0;
        let mut debug = |_: DebugSample| calls += 1;
        let stats = evaluate(
            node,
            &Bounds::new(Float3::ZERO, Float3::splat(4.0)),
            |_| panic!("no voxel expected"),
            Some(&mut debug),
        );
        assert_eq!(stats, EvalStats::default());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_deterministic() {
        let graph = two_spheres();
        let node = NodeRef::root_of(&graph);
        let region = region_for(node).unwrap();
        assert_eq!(collect_solid(node, &region), collect_solid(node, &region));
    }

    #[test]
    fn test_round_quarter() {
        assert_eq!(round_quarter(0.3), 0.25);
        assert_eq!(round_quarter(-1.13), -1.25);
        assert_eq!(round_quarter(2.0), 2.0);
    }
}
