//! RGBA color with f64 components and HSB construction.
//!
//! Blade colors are drawn in HSB (hue band, saturation band, brightness
//! band) because perceived grass variation is natural there; the renderer
//! consumes plain RGBA. Components live in [0, 1]; constructors clamp.

/// An RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Creates a color from [0, 1] components, clamping each into range.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a color from 8-bit channel values.
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Creates a color from HSB components.
    ///
    /// `h` in degrees (wrapped into [0, 360)), `s` and `b` in [0, 100],
    /// `a` in [0, 1]. These are the value ranges the grass color bands are
    /// configured in.
    pub fn from_hsb(h: f64, s: f64, b: f64, a: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 100.0) / 100.0;
        let v = b.clamp(0.0, 100.0) / 100.0;

        let c = v * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = v - c;

        let (r1, g1, b1) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(r1 + m, g1 + m, b1 + m, a)
    }

    /// Linear interpolation toward `other` at parameter `t` in [0, 1].
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Returns the color with alpha multiplied by `factor` (layer tinting).
    pub fn scale_alpha(self, factor: f64) -> Rgba {
        Rgba {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Quantizes to four 8-bit channels (R, G, B, A).
    pub fn to_bytes(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_components() {
        let c = Rgba::new(1.5, -0.2, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn from_u8_round_trips_through_bytes() {
        let c = Rgba::from_u8(20, 30, 50, 255);
        assert_eq!(c.to_bytes(), [20, 30, 50, 255]);
    }

    #[test]
    fn hsb_primary_hues() {
        // Full saturation and brightness at the primary hue angles.
        let red = Rgba::from_hsb(0.0, 100.0, 100.0, 1.0);
        assert_eq!(red.to_bytes(), [255, 0, 0, 255]);
        let green = Rgba::from_hsb(120.0, 100.0, 100.0, 1.0);
        assert_eq!(green.to_bytes(), [0, 255, 0, 255]);
        let blue = Rgba::from_hsb(240.0, 100.0, 100.0, 1.0);
        assert_eq!(blue.to_bytes(), [0, 0, 255, 255]);
    }

    #[test]
    fn hsb_zero_saturation_is_gray() {
        let c = Rgba::from_hsb(200.0, 0.0, 50.0, 1.0);
        assert!((c.r - c.g).abs() < 1e-12);
        assert!((c.g - c.b).abs() < 1e-12);
        assert!((c.r - 0.5).abs() < 1e-12);
    }

    #[test]
    fn hsb_grass_band_is_green_dominant() {
        // The grass bands (hue 80..120, sat 60..90, bright 30..70) must come
        // out green-dominant or the field reads as dirt.
        for hue in [80.0, 100.0, 120.0] {
            let c = Rgba::from_hsb(hue, 75.0, 50.0, 1.0);
            assert!(c.g >= c.r, "hue {hue}: green {} < red {}", c.g, c.r);
            assert!(c.g > c.b, "hue {hue}: green {} <= blue {}", c.g, c.b);
        }
    }

    #[test]
    fn hsb_wraps_hue() {
        let a = Rgba::from_hsb(380.0, 100.0, 100.0, 1.0);
        let b = Rgba::from_hsb(20.0, 100.0, 100.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let black = Rgba::from_u8(0, 0, 0, 255);
        let white = Rgba::from_u8(255, 255, 255, 255);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        let mid = black.lerp(white, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-12);
    }

    #[test]
    fn scale_alpha_only_touches_alpha() {
        let c = Rgba::new(0.2, 0.4, 0.6, 0.8);
        let tinted = c.scale_alpha(0.5);
        assert_eq!(tinted.r, c.r);
        assert_eq!(tinted.g, c.g);
        assert_eq!(tinted.b, c.b);
        assert!((tinted.a - 0.4).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hsb_always_produces_valid_components(
                h in -720.0_f64..720.0,
                s in -10.0_f64..110.0,
                b in -10.0_f64..110.0,
                a in 0.0_f64..=1.0,
            ) {
                let c = Rgba::from_hsb(h, s, b, a);
                for (name, v) in [("r", c.r), ("g", c.g), ("b", c.b), ("a", c.a)] {
                    prop_assert!(
                        (0.0..=1.0).contains(&v),
                        "component {name} = {v} out of range for hsb({h}, {s}, {b})"
                    );
                }
            }

            #[test]
            fn lerp_stays_between_endpoints(t in 0.0_f64..=1.0) {
                let a = Rgba::new(0.1, 0.2, 0.3, 1.0);
                let b = Rgba::new(0.9, 0.8, 0.7, 1.0);
                let c = a.lerp(b, t);
                prop_assert!(c.r >= a.r - 1e-12 && c.r <= b.r + 1e-12);
                prop_assert!(c.g >= a.g - 1e-12 && c.g <= b.g + 1e-12);
                prop_assert!(c.b >= a.b - 1e-12 && c.b <= b.b + 1e-12);
            }
        }
    }
}
