use rand::Rng;

/// Synthesize illustrative sparkline points between two known anchors: the
/// start-of-window value and the current value. Interior points follow the
/// straight line between them with cosmetic jitter; the endpoints are always
/// exact. This is visualization sugar only, so the random source is injected
/// and every numeric contract elsewhere in the engine stays untouched.
pub fn sparkline_points<R: Rng>(
    rng: &mut R,
    start: f64,
    end: f64,
    points: usize,
    jitter: f64,
) -> Vec<f64> {
    if points == 0 {
        return Vec::new();
    }
    if points == 1 {
        return vec![end];
    }

    (0..points)
        .map(|i| {
            if i == 0 {
                return start;
            }
            if i == points - 1 {
                return end;
            }
            let t = i as f64 / (points - 1) as f64;
            let base = start + (end - start) * t;
            if jitter <= 0.0 {
                base
            } else {
                base + rng.random_range(-jitter..jitter)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn endpoints_are_always_exact() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = sparkline_points(&mut rng, 40.0, 85.0, 10, 2.0);
        assert_eq!(points.len(), 10);
        assert_eq!(points[0], 40.0);
        assert_eq!(points[9], 85.0);
    }

    #[test]
    fn same_seed_reproduces_the_series() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            sparkline_points(&mut a, 10.0, 90.0, 12, 3.0),
            sparkline_points(&mut b, 10.0, 90.0, 12, 3.0)
        );
    }

    #[test]
    fn zero_jitter_yields_the_straight_line() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = sparkline_points(&mut rng, 0.0, 100.0, 5, 0.0);
        assert_eq!(points, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn degenerate_lengths_are_handled() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sparkline_points(&mut rng, 1.0, 2.0, 0, 1.0).is_empty());
        assert_eq!(sparkline_points(&mut rng, 1.0, 2.0, 1, 1.0), vec![2.0]);
    }
}
