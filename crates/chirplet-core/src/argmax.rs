//! First-occurrence argmax helpers
//!
//! Every peak the estimator locates (envelope maximum, spectral maximum,
//! best grid score) goes through these helpers, so ties always resolve to
//! the lowest index. NaN entries never win against a number.
//!
//! ## Example
//!
//! ```rust
//! use chirplet_core::argmax::argmax_f64;
//!
//! let (idx, val) = argmax_f64(&[1.0, 7.0, 3.0, 7.0]).unwrap();
//! assert_eq!(idx, 1); // first of the two maxima
//! assert_eq!(val, 7.0);
//! ```

/// Find index and value of the first maximum in a real slice.
///
/// NaN entries are skipped. If every entry is NaN the first index is
/// returned with its (NaN) value.
pub fn argmax_f64(data: &[f64]) -> Option<(usize, f64)> {
    if data.is_empty() {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in data.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, best_val)) if v <= best_val => {}
            _ => best = Some((i, v)),
        }
    }
    Some(best.unwrap_or((0, data[0])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_basic() {
        let (idx, val) = argmax_f64(&[1.0, 5.0, 3.0, 2.0]).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(val, 5.0);
    }

    #[test]
    fn test_argmax_first_on_tie() {
        let (idx, _) = argmax_f64(&[2.0, 9.0, 9.0, 9.0]).unwrap();
        assert_eq!(idx, 1);
        let (idx, _) = argmax_f64(&[0.0; 8]).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_argmax_empty() {
        assert!(argmax_f64(&[]).is_none());
    }

    #[test]
    fn test_argmax_skips_nan() {
        let (idx, val) = argmax_f64(&[f64::NAN, 1.0, f64::NAN, 4.0]).unwrap();
        assert_eq!(idx, 3);
        assert_eq!(val, 4.0);
        let (idx, val) = argmax_f64(&[f64::NAN, f64::NAN]).unwrap();
        assert_eq!(idx, 0);
        assert!(val.is_nan());
    }

    #[test]
    fn test_argmax_negative_values() {
        let (idx, val) = argmax_f64(&[-3.0, -1.0, -2.0]).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(val, -1.0);
    }
}
