/// Numeric helpers shared by the escape model: linear blending and
/// trapezoid integration over sampled curves.

/// Linear interpolation between two values
///
/// `ratio` is not clamped: values outside [0, 1] extrapolate along the same line.
///
/// # Examples
/// ```
/// use atmo_escape_rust::math_utils::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(10.0, 20.0, 2.0), 30.0);
/// ```
pub fn lerp(a: f64, b: f64, ratio: f64) -> f64 {
    a + (b - a) * ratio
}

/// Trapezoid-rule integral of `y` over `x`
///
/// Both slices must have the same length; fewer than two samples integrate to zero.
///
/// # Examples
/// ```
/// use atmo_escape_rust::math_utils::trapezoid;
///
/// // y = x over [0, 2]
/// assert_eq!(trapezoid(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]), 2.0);
/// ```
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (ys[0] + ys[1]) * (xs[1] - xs[0]))
        .sum()
}
