//! Union operation for SDFs

/// Union of two SDFs (minimum distance)
#[inline(always)]
pub fn sdf_union(d1: f64, d2: f64) -> f64 {
    d1.min(d2)
}

/// Index of the child that defines the union at this point
///
/// Strict comparison: on equal distances the earlier child wins.
pub fn union_winner(distances: impl IntoIterator<Item = f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, d) in distances.into_iter().enumerate() {
        match best {
            Some((_, b)) if d >= b => {}
            _ => best = Some((i, d)),
        }
    }
    best
}
