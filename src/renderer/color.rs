/// 8-bit RGBA color; alpha is always opaque for rendered cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

/// Hue offset so that thin dye starts in the blue range.
const HUE_OFFSET: f32 = 235.0;
const SATURATION: f32 = 0.7;
const COLOR_LIGHTNESS_CAP: f32 = 255.0;
const GRAY_LIGHTNESS_CAP: f32 = 200.0;

/// Convert hue [0, 360], saturation [0, 1], lightness [0, 1] to RGBA.
/// Hue outside [0, 360] maps to black.
pub fn hsl_to_rgba(h: f32, s: f32, l: f32) -> Rgba {
    let h = if h == 360.0 { 0.0 } else { h / 60.0 };
    let fract = h - h.floor();

    let p = l * (1.0 - s);
    let q = l * (1.0 - s * fract);
    let t = l * (1.0 - s * (1.0 - fract));

    let (r, g, b) = if (0.0..1.0).contains(&h) {
        (l, t, p)
    } else if (1.0..2.0).contains(&h) {
        (q, l, p)
    } else if (2.0..3.0).contains(&h) {
        (p, l, t)
    } else if (3.0..4.0).contains(&h) {
        (p, q, l)
    } else if (4.0..5.0).contains(&h) {
        (t, p, l)
    } else if (5.0..6.0).contains(&h) {
        (l, p, q)
    } else {
        (0.0, 0.0, 0.0)
    };

    let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba::opaque(to_u8(r), to_u8(g), to_u8(b))
}

/// Map a density value to a display color.
/// Hue cycles with density, lightness saturates at the cap.
pub fn density_to_rgba(d: f32, grayscale: bool) -> Rgba {
    let hue = ((HUE_OFFSET + d) as i32 % 361) as f32;
    let (sat, cap) = if grayscale {
        (0.0, GRAY_LIGHTNESS_CAP)
    } else {
        (SATURATION, COLOR_LIGHTNESS_CAP)
    };
    hsl_to_rgba(hue, sat, d.min(cap) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primary_hues() {
        assert_eq!(hsl_to_rgba(0.0, 1.0, 1.0), Rgba::opaque(255, 0, 0));
        assert_eq!(hsl_to_rgba(120.0, 1.0, 1.0), Rgba::opaque(0, 255, 0));
        assert_eq!(hsl_to_rgba(240.0, 1.0, 1.0), Rgba::opaque(0, 0, 255));
        assert_eq!(hsl_to_rgba(360.0, 1.0, 1.0), Rgba::opaque(255, 0, 0));
    }

    #[test]
    fn test_hsl_zero_saturation_is_gray() {
        let c = hsl_to_rgba(200.0, 0.0, 0.5);
        assert_eq!(c, Rgba::opaque(128, 128, 128));
    }

    #[test]
    fn test_hsl_negative_hue_is_black() {
        assert_eq!(hsl_to_rgba(-10.0, 0.7, 1.0), Rgba::opaque(0, 0, 0));
    }

    #[test]
    fn test_zero_density_is_black() {
        assert_eq!(density_to_rgba(0.0, false), Rgba::opaque(0, 0, 0));
        assert_eq!(density_to_rgba(0.0, true), Rgba::opaque(0, 0, 0));
    }

    #[test]
    fn test_dense_dye_color() {
        // d=255: hue = 490 % 361 = 129, full lightness, 0.7 saturation.
        let c = density_to_rgba(255.0, false);
        assert_eq!(c, hsl_to_rgba(129.0, 0.7, 1.0));
        assert_eq!(c.g, 255);
        assert_eq!(c.a, 0xFF);
    }

    #[test]
    fn test_grayscale_caps_lightness() {
        let c = density_to_rgba(1000.0, true);
        assert_eq!(c, Rgba::opaque(200, 200, 200));
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }
}
