//! Shared math utilities.

/// L2-normalize a vector in place so its magnitude is 1.
pub fn l2_normalize_in_place(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// L2-normalize a slice, returning a new vector with unit magnitude.
pub fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let mut result = v.to_vec();
    l2_normalize_in_place(&mut result);
    result
}

/// Dot product of two equal-length slices.
///
/// For L2-normalized inputs this is the cosine similarity.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Numerically stable softmax over a slice of logits.
///
/// Subtracts the maximum logit before exponentiating so large logit scales
/// (CLIP multiplies cosines by ~100) cannot overflow. The output sums to 1
/// and every element lies in [0, 1]. Empty input yields an empty vector.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let Some(max) = logits.iter().cloned().reduce(f32::max) else {
        return Vec::new();
    };
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize() {
        let v = l2_normalize(&[3.0, 4.0]);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector() {
        let v = l2_normalize(&[0.0, 0.0, 0.0]);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_l2_normalize_in_place() {
        let mut v = vec![3.0, 4.0];
        l2_normalize_in_place(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_is_cosine_for_unit_vectors() {
        let a = l2_normalize(&[1.0, 0.0]);
        let b = l2_normalize(&[1.0, 1.0]);
        let cos = dot(&a, &b);
        assert!((cos - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0, 4.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_softmax_monotonic() {
        let probs = softmax(&[0.1, 0.5, 0.9]);
        assert!(probs[0] < probs[1]);
        assert!(probs[1] < probs[2]);
    }

    #[test]
    fn test_softmax_stable_at_clip_scale() {
        // Cosines scaled by CLIP's temperature must not overflow to NaN.
        let probs = softmax(&[95.0, 88.0, 12.0, -30.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert!(probs[0] > 0.99);
    }

    #[test]
    fn test_softmax_uniform_for_equal_logits() {
        let probs = softmax(&[2.5; 8]);
        for p in &probs {
            assert!((p - 0.125).abs() < 1e-6);
        }
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }
}
