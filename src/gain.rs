/// Three-band piecewise-linear gain curve on the edge-strength signal.
///
/// Coefficients are derived once from the configuration on a x256
/// fixed-point scale; after construction no floating point is involved.
use log::debug;

/// Derived integer coefficients of the gain curve.
#[derive(Debug, Clone)]
pub struct GainCurve {
    flat_threshold: i32,
    edge_threshold: i32,
    delta_threshold: i32,
    middle_slope: i32,     // x256
    middle_intercept: i32, // x256
    edge_gain: i32,        // x256
}

impl GainCurve {
    /// Derive the curve coefficients.
    ///
    /// A configuration with `edge_threshold <= flat_threshold` is
    /// tolerated: the denominator is clamped to a small epsilon instead
    /// of dividing by zero, and the float-to-int casts saturate, so the
    /// degenerate curve is still defined (everything above
    /// `flat_threshold` clamps to `delta_threshold`).
    pub fn new(
        flat_threshold: i32,
        edge_threshold: i32,
        edge_gain: i32,
        delta_threshold: i32,
    ) -> Self {
        let t1 = f64::from(flat_threshold);
        let t2 = f64::from(edge_threshold);
        let gain = f64::from(edge_gain);

        let threshold_delta = (t2 - t1).max(1e-6);
        let middle_slope = (gain * t2 / threshold_delta) as i32;
        let middle_intercept = (-gain * t1 * t2 / threshold_delta) as i32;

        debug!(
            "GainCurve::new slope={} intercept={} edge_gain={} (x256)",
            middle_slope, middle_intercept, edge_gain
        );

        Self {
            flat_threshold,
            edge_threshold,
            delta_threshold,
            middle_slope,
            middle_intercept,
            edge_gain,
        }
    }

    /// Enhancement magnitude for a given `abs_delta`.
    ///
    /// Band selection is strict `>` at `flat_threshold` and inclusive
    /// `<=` at `edge_threshold`; the `>> 8` is an arithmetic shift on the
    /// widened signed value. The result is clamped to
    /// `[0, delta_threshold]`.
    pub fn boost(&self, abs_delta: i32) -> i32 {
        let d = i64::from(abs_delta);
        let raw = if abs_delta <= self.flat_threshold {
            0
        } else if abs_delta <= self.edge_threshold {
            (i64::from(self.middle_slope) * d + i64::from(self.middle_intercept)) >> 8
        } else {
            (i64::from(self.edge_gain) * d) >> 8
        };
        raw.clamp(0, i64::from(self.delta_threshold)) as i32
    }
}
