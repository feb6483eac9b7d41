use std::f64::consts::PI;

/// Converts a fluctuation value (in nanometers) into a B-factor estimate via
/// the Debye-Waller relation `B = 8 * pi^2 * f^2 / 3`.
///
/// No rounding is applied beyond natural floating-point precision. The
/// conversion is monotonic in |f|, and B is zero iff f is zero.
#[inline]
pub fn convert(fluctuation: f64) -> f64 {
    8.0 * PI * PI * fluctuation * fluctuation / 3.0
}

/// Applies [`convert`] to every entry of a fluctuation table.
pub fn convert_table(fluctuations: &[f64]) -> Vec<f64> {
    fluctuations.iter().map(|&f| convert(f)).collect()
}
