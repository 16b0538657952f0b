//! Intersection operation for SDFs

/// Intersection of two SDFs (maximum distance)
#[inline(always)]
pub fn sdf_intersection(d1: f64, d2: f64) -> f64 {
    d1.max(d2)
}

/// Index of the child that defines the intersection at this point
///
/// Strict comparison: on equal distances the earlier child wins.
pub fn intersection_winner(distances: impl IntoIterator<Item = f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, d) in distances.into_iter().enumerate() {
        match best {
            Some((_, b)) if d <= b => {}
            _ => best = Some((i, d)),
        }
    }
    best
}
