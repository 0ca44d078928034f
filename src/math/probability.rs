use crate::io::error::{Result, computation_error};

/// Draw an index from a discrete distribution
///
/// `weights` are unnormalized non-negative masses and `r` is a uniform draw in
/// `[0, 1)`. The result is the index whose slice of the cumulative
/// distribution contains `r * sum`. Zero-mass entries are never returned
/// unless every weight is zero, in which case the result is 0.
pub fn sample_discrete(weights: &[f64], r: f64) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }

    let target = r * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = index;
        if target <= cumulative {
            return index;
        }
    }
    // Rounding can leave `target` a hair above the final cumulative sum
    last_positive
}

/// `w * ln(w)` for a symbol prior
///
/// # Errors
///
/// Returns a computation error when `weight` is not a positive finite number,
/// since the product would poison every entropy it feeds into.
pub fn weight_log_weight(weight: f64) -> Result<f64> {
    if !(weight.is_finite() && weight > 0.0) {
        return Err(computation_error(
            "weight_log_weight",
            &format!("symbol weight {weight} must be positive and finite"),
        ));
    }
    let value = weight * weight.ln();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(computation_error(
            "weight_log_weight",
            &format!("log-weight of {weight} is not finite"),
        ))
    }
}
