use crate::error::{EvaluatorError, Result};

/// Float noise tolerated before flooring a percentage
const PERCENT_EPSILON: f64 = 1e-9;

/// Cosine of the angle between two embedding vectors
///
/// Accumulates in `f64`. Vectors must share a non-zero dimension and have
/// non-zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.is_empty() || a.len() != b.len() {
        return Err(EvaluatorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (dot, na, nb) = a.iter().zip(b).fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&x, &y)| {
        let (x, y) = (f64::from(x), f64::from(y));
        (x.mul_add(y, dot), x.mul_add(x, na), y.mul_add(y, nb))
    });

    let denom = na.sqrt() * nb.sqrt();
    if denom == 0.0 {
        return Err(EvaluatorError::ZeroNorm);
    }

    Ok(dot / denom)
}

/// Map a cosine in `[-1, 1]` to a similarity in `[0, 1]`
///
/// Cosine distance `d = 1 - cos` lies in `[0, 2]`; the similarity is
/// `1 - d / 2`, clamped.
pub fn normalized_similarity(cosine: f64) -> f64 {
    let distance = 1.0 - cosine;
    (1.0 - distance / 2.0).clamp(0.0, 1.0)
}

/// Whole percentage for a similarity, floored and kept within `0..=100`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percentage(similarity: f64) -> u8 {
    let scaled = similarity.mul_add(100.0, PERCENT_EPSILON).floor().clamp(0.0, 100.0);
    scaled as u8
}
