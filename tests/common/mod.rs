//! Common test helpers for construct-sdf integration tests

#![allow(dead_code)]

use construct_sdf::prelude::*;

// ============================================================================
// Standard test shapes
// ============================================================================

/// Sphere(r=3) at origin unioned with Sphere(r=2) at (0,2,0)
pub fn two_spheres() -> SdfGraph {
    let mut graph = SdfGraph::new();
    let a = graph.sphere(Float3::ZERO, 3.0).unwrap();
    let b = graph.sphere(Float3::new(0.0, 2.0, 0.0), 2.0).unwrap();
    let u = graph.union(&[a, b]).unwrap();
    graph.set_root(u).unwrap();
    graph
}

/// Sphere with a box carved out of one side, materials 1 and 2
pub fn carved_sphere() -> SdfGraph {
    let mut graph = SdfGraph::new();
    let base = graph
        .push(SdfNode::sphere(Float3::ZERO, 4.0).with_material(1))
        .unwrap();
    let cut = graph
        .push(
            SdfNode::cuboid(Float3::new(3.0, 0.0, 0.0), Float3::new(4.0, 2.0, 6.0))
                .with_material(2),
        )
        .unwrap();
    let s = graph.subtract(base, cut).unwrap();
    graph.set_root(s).unwrap();
    graph
}

/// Single axis-aligned box
pub fn single_box(center: Float3, size: Float3) -> SdfGraph {
    SdfGraph::with_root(SdfNode::cuboid(center, size)).unwrap()
}

/// Item tag holding `graph` placed at `center`
pub fn item_with(graph: SdfGraph, center: Option<Float3>) -> TagCompound {
    let mut item = TagCompound::new();
    {
        let mut data = ConstructionData::of(&mut item);
        data.set_graph(Some(graph));
        data.set_center(center);
    }
    item
}

// ============================================================================
// Standard test points
// ============================================================================

/// Lattice points of a cube `[-n, n]^3`
pub fn lattice_points(n: i32) -> Vec<Float3> {
    let mut points = Vec::new();
    for x in -n..=n {
        for y in -n..=n {
            for z in -n..=n {
                points.push(Float3::new(x as f64, y as f64, z as f64));
            }
        }
    }
    points
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert two f64 values are close within tolerance
pub fn assert_close(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff={}, tol={})",
        msg,
        a,
        b,
        (a - b).abs(),
        tol
    );
}

/// Assert two boxes match within tolerance
pub fn assert_bounds_close(a: &Bounds, b: &Bounds, tol: f64) {
    assert!(
        (a.min - b.min).abs().max_element() < tol && (a.max - b.max).abs().max_element() < tol,
        "bounds differ: {} vs {}",
        a,
        b
    );
}

/// Select the handle at `from`, then hover to each of `path`
pub fn drag(
    data: &mut ConstructionData<'_>,
    from: BlockPos,
    path: &[BlockPos],
    requester: Float3,
) -> Vec<EditOutcome> {
    let mut outcomes = vec![data.apply_edit(&EditInput::at(from, requester, EditAction::Select))];
    for &to in path {
        outcomes.push(data.apply_edit(&EditInput::at(to, requester, EditAction::Hover)));
    }
    outcomes
}
