//! Small DSP math helpers

/// Scale a sequence so its peak magnitude is 1 (no-op for silence)
pub fn normalize_peak(samples: &mut [f64]) {
    let peak = samples.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    if peak > 0.0 {
        for x in samples.iter_mut() {
            *x /= peak;
        }
    }
}

/// Linear interpolation between `a` and `b` at fraction `mu` in [0, 1]
#[inline]
pub fn lerp(a: f64, b: f64, mu: f64) -> f64 {
    a + (b - a) * mu
}
