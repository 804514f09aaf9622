use serde::{Deserialize, Serialize};

/**
 * Color value in the HSL (hue, saturation, luminance) model. The hue is in
 * degrees on [0, 360), while saturation and luminance are on [0, 1].
 *
 * Values are immutable: adjusting the luminance produces a new color, so a
 * single palette entry can be shared by every pixel in a frame.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub hue: f64,
    pub saturation: f64,
    pub luminance: f64,
}

impl HslColor {
    pub fn black() -> HslColor {
        HslColor {
            hue: 0.0,
            saturation: 0.0,
            luminance: 0.0,
        }
    }

    pub fn from_rgb_u8(rgb: [u8; 3]) -> HslColor {
        let [r, g, b] = rgb.map(|c| (c as f64) / 255.0);
        HslColor::from_rgb([r, g, b])
    }

    /// Standard RGB --> HSL conversion. Channels are expected on [0, 1].
    pub fn from_rgb(rgb: [f64; 3]) -> HslColor {
        let [r, g, b] = rgb;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let luminance = 0.5 * (max + min);
        let delta = max - min;

        if delta == 0.0 {
            // achromatic (gray scale)
            return HslColor {
                hue: 0.0,
                saturation: 0.0,
                luminance,
            };
        }

        let saturation = if luminance < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let sector = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        HslColor {
            hue: 60.0 * sector,
            saturation,
            luminance,
        }
    }

    pub fn with_luminance(&self, luminance: f64) -> HslColor {
        HslColor {
            luminance: luminance.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// Standard HSL --> RGB conversion, returning channels on [0, 1].
    pub fn to_rgb(&self) -> [f64; 3] {
        let l = self.luminance;
        let s = self.saturation;
        if s == 0.0 {
            return [l, l, l];
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = self.hue.rem_euclid(360.0) / 360.0;
        [
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        ]
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Converts a normalized RGB triple into an 8-bit image pixel.
pub fn rgb_to_pixel(rgb: [f64; 3]) -> image::Rgb<u8> {
    image::Rgb(rgb.map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8))
}
