/// Power below this is clamped before conversion to decibels (-200 dB).
pub const POWER_FLOOR: f64 = 1e-20;

pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    /// `10 * log10(power)`, floored so exact nulls stay finite.
    pub fn power_db(power: f64) -> f64 {
        10.0 * power.max(POWER_FLOOR).log10()
    }

    /// Index of the largest value, ignoring NaN.
    pub fn argmax(values: &[f64]) -> Option<usize> {
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_zero_sequence_yields_zero() {
        assert_eq!(StatsHelper::rms(&[]), 0.0);
        assert_eq!(StatsHelper::rms(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn rms_handles_single_value() {
        assert_eq!(StatsHelper::rms(&[4.0]), 4.0);
    }

    #[test]
    fn power_db_is_floored() {
        assert!((StatsHelper::power_db(100.0) - 20.0).abs() < 1e-12);
        assert_eq!(StatsHelper::power_db(0.0), -200.0);
    }

    #[test]
    fn argmax_skips_nan() {
        assert_eq!(StatsHelper::argmax(&[1.0, f64::NAN, 3.0, 2.0]), Some(2));
        assert_eq!(StatsHelper::argmax(&[]), None);
    }
}
