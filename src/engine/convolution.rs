//! Direct-form linear convolution
//!
//! `y[n] = sum x[k] * h[n - k]` over every `k` where both indices are in
//! range, giving `size_x + size_h - 1` output samples. O(size_x * size_h).

use crate::engine::signal::Signal;
use crate::error::{ConvError, Result};

/// Length of the linear convolution of sequences of `size_x` and `size_h`
/// samples. Zero if either is empty.
pub fn output_len(size_x: usize, size_h: usize) -> usize {
    if size_x == 0 || size_h == 0 {
        0
    } else {
        size_x + size_h - 1
    }
}

/// Convolve `x` with `h` into a freshly zeroed buffer
pub fn convolve(x: &[f64], h: &[f64]) -> Result<Vec<f64>> {
    let mut y = vec![0.0; output_len(x.len(), h.len())];
    convolve_into(x, h, &mut y)?;
    Ok(y)
}

/// Accumulate the convolution of `x` and `h` into `y`
///
/// `y` must hold exactly `size_x + size_h - 1` samples. Existing contents are
/// added to, not overwritten.
pub fn convolve_into(x: &[f64], h: &[f64], y: &mut [f64]) -> Result<()> {
    if x.is_empty() || h.is_empty() {
        return Err(ConvError::ProcessingError {
            reason: "cannot convolve an empty sequence".to_string(),
        });
    }

    let size_x = x.len();
    let size_h = h.len();
    let size_y = output_len(size_x, size_h);

    if y.len() != size_y {
        return Err(ConvError::ProcessingError {
            reason: format!(
                "output buffer holds {} samples, expected {}",
                y.len(),
                size_y
            ),
        });
    }

    for (n, out) in y.iter_mut().enumerate() {
        let k_min = n.saturating_sub(size_h - 1);
        let k_max = n.min(size_x - 1);

        for k in k_min..=k_max {
            *out += x[k] * h[n - k];
        }
    }

    Ok(())
}

/// Convolve two signals
///
/// The result carries the larger of the two channel counts and no audio
/// format; the caller decides which input's format the output inherits.
pub fn convolve_signals(x: &Signal, h: &Signal) -> Result<Signal> {
    let mut y = Signal::new(convolve(x.samples(), h.samples())?);
    y.set_channels(x.channels().max(h.channels()));
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_literal_example() {
        let y = convolve(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.5]).unwrap();
        assert_eq!(y, vec![0.0, 1.0, 2.5, 4.0, 1.5]);
    }

    #[test]
    fn test_output_length() {
        for size_x in 1..6 {
            for size_h in 1..6 {
                let x = vec![1.0; size_x];
                let h = vec![0.5; size_h];
                let y = convolve(&x, &h).unwrap();
                assert_eq!(y.len(), size_x + size_h - 1);
            }
        }
    }

    #[test]
    fn test_identity() {
        let x = vec![0.3, -1.2, 4.5, 0.0, 7.25];
        assert_eq!(convolve(&x, &[1.0]).unwrap(), x);
    }

    #[test]
    fn test_commutative() {
        let x = vec![0.1, 0.7, -0.3, 2.2, 1.0, -0.4];
        let h = vec![0.25, -0.5, 0.125];

        let xh = convolve(&x, &h).unwrap();
        let hx = convolve(&h, &x).unwrap();

        assert_eq!(xh.len(), hx.len());
        for (a, b) in xh.iter().zip(hx.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_accumulates_into_seeded_buffer() {
        let mut y = vec![1.0, 1.0, 1.0];
        convolve_into(&[1.0, 1.0], &[2.0, 3.0], &mut y).unwrap();
        assert_eq!(y, vec![3.0, 6.0, 4.0]);
    }

    #[test]
    fn test_rejects_empty_and_wrong_size() {
        assert!(convolve(&[], &[1.0]).is_err());
        assert!(convolve(&[1.0], &[]).is_err());

        let mut y = vec![0.0; 2];
        let err = convolve_into(&[1.0, 2.0], &[1.0, 2.0], &mut y).unwrap_err();
        assert_eq!(err.error_code(), "PROCESSING_ERROR");
    }

    #[test]
    fn test_nan_propagates() {
        let y = convolve(&[1.0, f64::NAN], &[1.0, 1.0]).unwrap();
        assert_eq!(y[0], 1.0);
        assert!(y[1].is_nan());
        assert!(y[2].is_nan());
    }

    #[test]
    fn test_signal_channels_take_max() {
        let x = Signal::new(vec![1.0, 2.0]);
        let mut h = Signal::new(vec![1.0, 0.0, 0.0, 0.0]);
        h.set_channels(2);

        let y = convolve_signals(&x, &h).unwrap();
        assert_eq!(y.len(), 5);
        assert_eq!(y.channels(), 2);
        assert!(y.format().is_none());
    }
}
