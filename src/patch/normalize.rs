use ndarray::Array3;

/// Rescale a pixel array to [0,1] using its global min and max.
///
/// The rescale is element-wise over the entire array, not per-channel.
/// A constant array (max == min) is returned unchanged.
pub fn normalize(array: &Array3<f32>) -> Array3<f32> {
    let min = array.fold(f32::INFINITY, |acc, &v| acc.min(v));
    let max = array.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));

    if max - min == 0.0 {
        return array.clone();
    }

    array.mapv(|v| (v - min) / (max - min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_in_unit_range() {
        let mut array = Array3::zeros((4, 4, 3));
        array[[0, 0, 0]] = 10.0;
        array[[3, 3, 2]] = 250.0;
        array[[1, 2, 1]] = 130.0;

        let out = normalize(&array);
        for &v in out.iter() {
            assert!((0.0..=1.0).contains(&v));
        }
        assert_eq!(out[[0, 0, 1]], 0.0);
        assert_eq!(out[[3, 3, 2]], 1.0);
    }

    #[test]
    fn test_preserves_relative_order() {
        let mut array = Array3::zeros((2, 2, 3));
        array[[0, 0, 0]] = 5.0;
        array[[0, 1, 0]] = 50.0;
        array[[1, 0, 0]] = 100.0;

        let out = normalize(&array);
        assert!(out[[0, 0, 0]] < out[[0, 1, 0]]);
        assert!(out[[0, 1, 0]] < out[[1, 0, 0]]);
    }

    #[test]
    fn test_constant_array_unchanged() {
        let array = Array3::from_elem((3, 3, 3), 42.0);
        let out = normalize(&array);
        assert_eq!(out, array);
    }

    #[test]
    fn test_zero_array_unchanged() {
        let array = Array3::<f32>::zeros((2, 2, 3));
        let out = normalize(&array);
        assert_eq!(out, array);
    }
}
