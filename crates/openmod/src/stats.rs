//! Summary statistics over mass differences

pub fn mean(slice: &[f64]) -> f64 {
    slice.iter().sum::<f64>() / slice.len() as f64
}

/// Median of `slice`; for an even number of values this is the mean of the
/// two middle values. Returns NaN for an empty slice
pub fn median(slice: &[f64]) -> f64 {
    let mut sorted = slice.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => f64::NAN,
        n if n % 2 == 1 => sorted[mid],
        _ => (sorted[mid - 1] + sorted[mid]) / 2.0,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn smoke() {
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
        assert_eq!(median(&[6.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[0.5, 0.0]), 0.25);
        assert_eq!(median(&[4.0, -1.0, 2.0, 10.0]), 3.0);
        assert!(median(&[]).is_nan());
    }
}
