//! Subtraction operation for SDFs

/// Subtraction of B from A (A minus B)
///
/// # Returns
/// max(d1, -d2)
#[inline(always)]
pub fn sdf_subtraction(d1: f64, d2: f64) -> f64 {
    d1.max(-d2)
}

/// Whether the base shape (rather than the carving shape) defines the
/// surface of `base - cut` at this point; the base wins ties
#[inline(always)]
pub fn subtraction_base_wins(d_base: f64, d_cut: f64) -> bool {
    d_base >= -d_cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtraction() {
        assert_eq!(sdf_subtraction(1.0, 2.0), 1.0);
        assert_eq!(sdf_subtraction(1.0, -2.0), 2.0);
    }

    #[test]
    fn test_base_wins() {
        assert!(subtraction_base_wins(1.0, 2.0));
        assert!(!subtraction_base_wins(-1.0, -0.5));
        assert!(subtraction_base_wins(-0.5, 0.5));
    }
}
