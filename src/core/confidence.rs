/// Arithmetic mean of word confidences. An empty page aggregates to `0.0`
/// rather than dividing by zero.
pub fn mean_confidence<I>(values: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_aggregates_to_zero() {
        assert_eq!(mean_confidence(std::iter::empty()), 0.0);
    }

    #[test]
    fn single_value_is_its_own_mean() {
        assert_eq!(mean_confidence([0.5]), 0.5);
    }

    #[test]
    fn averages_multiple_values() {
        assert_eq!(mean_confidence([0.2, 0.4, 0.6]), 0.4);
    }
}
