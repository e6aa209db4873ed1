//! Colour-space conversions and the selectable colour schemes.

use serde::Deserialize;

/// How primitives derive colour from audio features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ColorScheme {
    /// Hue, saturation and lightness follow the frequency bands
    Spectrum,
    /// Depth shading only, even while audio plays
    Monochrome,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Spectrum => ColorScheme::Monochrome,
            ColorScheme::Monochrome => ColorScheme::Spectrum,
        }
    }
}

/// HSV to RGB. Hue wraps; saturation and value are used as given.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match (sector as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// HSL to RGB. Hue wraps into [0, 1); saturation and lightness are clamped to [0, 1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let upper = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let lower = 2.0 * l - upper;

    [
        hue_channel(lower, upper, h + 1.0 / 3.0),
        hue_channel(lower, upper, h),
        hue_channel(lower, upper, h - 1.0 / 3.0),
    ]
}

fn hue_channel(lower: f32, upper: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        lower + (upper - lower) * 6.0 * t
    } else if t < 0.5 {
        upper
    } else if t < 2.0 / 3.0 {
        lower + (upper - lower) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lower
    }
}

/// Grey of the given level
pub fn grey(level: f32) -> [f32; 3] {
    [level, level, level]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_rgb(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_hsv_primaries() {
        assert_rgb(hsv_to_rgb(0.0, 1.0, 1.0), [1.0, 0.0, 0.0]);
        assert_rgb(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), [0.0, 1.0, 0.0]);
        assert_rgb(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0.0, 0.0, 1.0]);
        assert_rgb(hsv_to_rgb(0.5, 0.0, 0.4), [0.4, 0.4, 0.4]);
    }

    #[test]
    fn test_hsv_hue_wraps_both_ways() {
        assert_rgb(hsv_to_rgb(1.2, 0.8, 0.9), hsv_to_rgb(0.2, 0.8, 0.9));
        assert_rgb(hsv_to_rgb(-0.25, 1.0, 1.0), hsv_to_rgb(0.75, 1.0, 1.0));
    }

    #[test]
    fn test_hsv_value_is_not_clamped() {
        let rgb = hsv_to_rgb(0.0, 0.0, 1.5);
        assert_rgb(rgb, [1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_hsl_primaries_and_greys() {
        assert_rgb(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_rgb(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]);
        assert_rgb(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]);
        assert_rgb(hsl_to_rgb(0.3, 0.0, 0.25), [0.25, 0.25, 0.25]);
        assert_rgb(hsl_to_rgb(0.6, 1.0, 1.0), [1.0, 1.0, 1.0]);
        assert_rgb(hsl_to_rgb(0.6, 1.0, 0.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hsl_clamps_overdriven_inputs() {
        assert_rgb(hsl_to_rgb(0.55, 1.3, 1.7), [1.0, 1.0, 1.0]);
        assert_rgb(hsl_to_rgb(1.55, 1.0, 0.4), hsl_to_rgb(0.55, 1.0, 0.4));
    }

    #[test]
    fn test_scheme_toggle() {
        assert_eq!(ColorScheme::Spectrum.toggled(), ColorScheme::Monochrome);
        assert_eq!(ColorScheme::Spectrum.toggled().toggled(), ColorScheme::Spectrum);
    }
}
