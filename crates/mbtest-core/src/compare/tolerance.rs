use crate::errors::{CompareError, CompareResult};

/// Joint relative/absolute tolerance used to decide whether two values agree.
///
/// Two values match if **either** bound holds:
///
/// $$ |a - b| \le \epsilon_{abs} \quad \lor \quad \frac{2|a - b|}{|a + b|} \le \epsilon_{rel} $$
///
/// The relative error is taken against the mean of the two values rather than
/// either one of them. Regression baselines were tuned against this form, so it
/// must not be swapped for `|a - b| / |a|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    relative: f64,
    absolute: f64,
}

impl Tolerance {
    /// Create a tolerance, rejecting negative or NaN bounds.
    pub fn new(relative: f64, absolute: f64) -> CompareResult<Self> {
        if relative.is_nan() || relative < 0.0 {
            return Err(CompareError::InvalidTolerance {
                name: "relative",
                value: relative,
            });
        }
        if absolute.is_nan() || absolute < 0.0 {
            return Err(CompareError::InvalidTolerance {
                name: "absolute",
                value: absolute,
            });
        }
        Ok(Self { relative, absolute })
    }

    pub fn relative(&self) -> f64 {
        self.relative
    }

    pub fn absolute(&self) -> f64 {
        self.absolute
    }

    /// Mean-based relative difference `2|a-b| / |a+b|`.
    ///
    /// Infinite when `a + b == 0` and `a != b`; NaN when both are zero.
    pub fn relative_difference(a: f64, b: f64) -> f64 {
        (a - b).abs() * 2.0 / (a + b).abs()
    }

    /// Whether `a` and `b` agree under this tolerance.
    ///
    /// Bit-for-bit equal values and pairs of NaNs always agree, so identical
    /// tables pass regardless of the bounds.
    pub fn accepts(&self, a: f64, b: f64) -> bool {
        if a == b || (a.is_nan() && b.is_nan()) {
            return true;
        }
        (a - b).abs() <= self.absolute || Self::relative_difference(a, b) <= self.relative
    }
}
