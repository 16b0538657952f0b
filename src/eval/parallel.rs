//! Parallel SDF evaluation
//!
//! Batch evaluation using rayon for CPU parallelism. The voxel collector
//! splits the region into x-slabs; rayon's indexed collect keeps the slabs
//! in order, so the output matches the sequential scan exactly.

use glam::IVec3;
use rayon::prelude::*;

use super::voxel::{lattice_range, Voxel};
use super::NodeRef;
use crate::types::{block_center, Bounds, Float3};

/// Evaluate SDF at multiple points (single-threaded)
#[inline]
pub fn eval_batch(node: NodeRef<'_>, points: &[Float3]) -> Vec<f64> {
    points.iter().map(|&p| node.distance(p)).collect()
}

/// Evaluate SDF at multiple points (parallel)
#[inline]
pub fn eval_batch_parallel(node: NodeRef<'_>, points: &[Float3]) -> Vec<f64> {
    points.par_iter().map(|&p| node.distance(p)).collect()
}

/// Parallel variant of [`collect_solid`](super::collect_solid)
///
/// Same cells, same order. Worth it for large regions only; the typical
/// construction box is small enough for the sequential scan.
pub fn collect_solid_parallel(node: NodeRef<'_>, region: &Bounds) -> Vec<Voxel> {
    if node.is_empty() {
        return Vec::new();
    }

    let (lo, hi) = lattice_range(region);
    let slabs: Vec<Vec<Voxel>> = (lo.x..=hi.x)
        .into_par_iter()
        .map(|x| {
            let mut slab = Vec::new();
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    let pos = IVec3::new(x, y, z);
                    let p = block_center(pos);
                    if node.distance(p) <= 0.0 {
                        slab.push(Voxel {
                            pos,
                            material: node.material_at(p),
                        });
                    }
                }
            }
            slab
        })
        .collect();

    slabs.into_iter().flatten().collect()
}
