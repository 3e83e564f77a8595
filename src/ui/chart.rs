//! Impact chart helpers
//!
//! Curve smoothing and axis labels for the carbon-savings line chart.

use ratatui::text::Span;

/// Upper bound on interpolated points between two samples
pub const MAX_SAMPLES_PER_SEGMENT: usize = 64;

/// Interpolate a Catmull-Rom curve through `points`.
///
/// The curve passes through every input point; `samples_per_segment`
/// intermediate points are inserted between each neighbouring pair, capped
/// at `MAX_SAMPLES_PER_SEGMENT`.
pub fn smooth_curve(points: &[(f64, f64)], samples_per_segment: usize) -> Vec<(f64, f64)> {
    let samples_per_segment = samples_per_segment.min(MAX_SAMPLES_PER_SEGMENT);
    if points.len() < 3 || samples_per_segment == 0 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity((points.len() - 1) * (samples_per_segment + 1) + 1);
    let last = points.len() - 1;

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        out.push(p1);
        for s in 1..=samples_per_segment {
            let t = s as f64 / (samples_per_segment + 1) as f64;
            out.push((catmull_rom(p0.0, p1.0, p2.0, p3.0, t), catmull_rom(p0.1, p1.1, p2.1, p3.1, t)));
        }
    }
    out.push(points[last]);
    out
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Upper y bound rounded up to the next multiple of 5
pub fn y_upper_bound(max: f64) -> f64 {
    ((max / 5.0).ceil() * 5.0).max(5.0)
}

/// Evenly spaced y axis labels with two decimals and a "kg" suffix
pub fn y_labels(upper: f64, count: usize) -> Vec<Span<'static>> {
    let steps = count.max(2) - 1;
    (0..=steps)
        .map(|i| Span::raw(format!("{:.2}kg", upper * i as f64 / steps as f64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_curve_passes_through_samples() {
        let points = [(0.0, 5.0), (1.0, 7.0), (2.0, 9.0), (3.0, 12.0)];
        let curve = smooth_curve(&points, 4);

        assert_eq!(curve.len(), 3 * 5 + 1);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(curve[i * 5], *p);
        }
        // x stays monotonic for evenly spaced samples
        assert!(curve.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_smooth_curve_short_input_unchanged() {
        let points = [(0.0, 1.0), (1.0, 2.0)];
        assert_eq!(smooth_curve(&points, 8), points.to_vec());
        assert_eq!(smooth_curve(&[(0.0, 1.0), (1.0, 2.0), (2.0, 4.0)], 0).len(), 3);
    }

    #[test]
    fn test_smooth_curve_caps_huge_segment_counts() {
        let points = [(0.0, 5.0), (1.0, 7.0), (2.0, 9.0)];
        let curve = smooth_curve(&points, usize::MAX);
        assert_eq!(curve.len(), 2 * (MAX_SAMPLES_PER_SEGMENT + 1) + 1);
        assert_eq!(curve.last(), Some(&(2.0, 9.0)));
    }

    #[test]
    fn test_y_axis() {
        assert_eq!(y_upper_bound(22.0), 25.0);
        assert_eq!(y_upper_bound(0.0), 5.0);

        let labels = y_labels(25.0, 3);
        let text: Vec<_> = labels.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(text, ["0.00kg", "12.50kg", "25.00kg"]);
    }
}
