/// Squared-error loss used to score network outputs against targets.
pub struct MseLoss;

impl MseLoss {
    /// `mean((expected - predicted)²)` over paired components; `0.0` when there are none.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len().min(expected.len());
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = predicted
            .iter()
            .zip(expected)
            .map(|(p, t)| (t - p) * (t - p))
            .sum();
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_averages_squared_differences() {
        assert_eq!(MseLoss::loss(&[0.0, 1.0], &[1.0, 1.0]), 0.5);
        assert_eq!(MseLoss::loss(&[0.3], &[0.3]), 0.0);
    }

    #[test]
    fn empty_output_has_zero_loss() {
        assert_eq!(MseLoss::loss(&[], &[]), 0.0);
    }
}
