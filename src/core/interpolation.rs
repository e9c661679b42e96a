/// Converts samples into a step-chart friendly point sequence.
///
/// `n` samples produce `2n + 1` points: the first sample is repeated three
/// times as a flat lead-in, then every sample contributes a half-step
/// midpoint followed by the sample itself. Gaps never get bridged by a
/// diagonal: a gap next to a value repeats the value or keeps the gap.
#[must_use]
pub fn interpolate(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let Some((&first, rest)) = values.split_first() else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(values.len() * 2 + 1);
    points.extend([first; 3]);

    let mut previous = first;
    for &current in rest {
        match (previous, current) {
            (None, None) => points.extend([None, None]),
            (None, Some(value)) => points.extend([Some(value), Some(value)]),
            (Some(value), None) => points.extend([Some(value), None]),
            (Some(before), Some(value)) => {
                points.extend([Some((before + value) / 2.0), Some(value)]);
            }
        }
        previous = current;
    }

    points
}

#[cfg(test)]
mod tests {
    use super::interpolate;

    #[test]
    fn gap_after_value_keeps_value_then_gap() {
        let points = interpolate(&[Some(4.0), None]);
        assert_eq!(points, vec![Some(4.0), Some(4.0), Some(4.0), Some(4.0), None]);
    }

    #[test]
    fn value_after_gap_is_repeated() {
        let points = interpolate(&[None, Some(2.0)]);
        assert_eq!(points, vec![None, None, None, Some(2.0), Some(2.0)]);
    }
}
