//! CIE L\*a\*b\* color space and its 8-bit working encoding
//!
//! Lab separates lightness from the two chrominance axes, so a grayscale
//! target can supply `L` unchanged while `a`/`b` come from the source.
//!
//! The transfer pipeline works on the 8-bit scaling used by common imaging
//! toolkits, where every channel lives in 0..=255:
//!
//! ```text
//! L8 = L* * 255 / 100
//! a8 = a* + 128
//! b8 = b* + 128
//! ```
//!
//! so a grayscale pixel value can be compared directly with `L8`.

use super::linear_rgb::LinearRgb;

/// D65 reference white, X component (Y is 1.0).
const WHITE_X: f32 = 0.950456;
/// D65 reference white, Z component.
const WHITE_Z: f32 = 1.088754;

/// Threshold between the cube-root and linear segments of `f(t)`.
const EPSILON: f32 = 0.008856;
/// Slope of the linear segment of `f(t)`.
const SLOPE: f32 = 7.787;
/// `L*` slope below [`EPSILON`].
const KAPPA: f32 = 903.3;
const OFFSET: f32 = 16.0 / 116.0;

/// Offset applied to `a*`/`b*` in the 8-bit encoding.
pub const CHROMA_OFFSET: f32 = 128.0;

/// A color in CIE L\*a\*b\* (D65).
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis, roughly -128..=127
/// - `b`: Blue-yellow axis, roughly -128..=127
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0.0 to 100.0
    pub l: f32,
    /// Green-red axis
    pub a: f32,
    /// Blue-yellow axis
    pub b: f32,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Encode into the 8-bit working scale, rounding and clamping to 0..=255.
    ///
    /// # Example
    ///
    /// ```
    /// use color_transfer::Lab;
    ///
    /// assert_eq!(Lab::new(100.0, 0.0, 0.0).encode8(), [255, 128, 128]);
    /// ```
    #[inline]
    pub fn encode8(self) -> [u8; 3] {
        let quantize = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        [
            quantize(self.l * 255.0 / 100.0),
            quantize(self.a + CHROMA_OFFSET),
            quantize(self.b + CHROMA_OFFSET),
        ]
    }

    /// Decode from the 8-bit working scale.
    #[inline]
    pub fn decode8(bytes: [u8; 3]) -> Self {
        Self {
            l: bytes[0] as f32 * 100.0 / 255.0,
            a: bytes[1] as f32 - CHROMA_OFFSET,
            b: bytes[2] as f32 - CHROMA_OFFSET,
        }
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        SLOPE * t + OFFSET
    }
}

#[inline]
fn lab_f_inv(t: f32) -> f32 {
    let cubed = t * t * t;
    if cubed > EPSILON {
        cubed
    } else {
        (t - OFFSET) / SLOPE
    }
}

impl From<LinearRgb> for Lab {
    /// Convert linear sRGB primaries to Lab through CIE XYZ.
    fn from(rgb: LinearRgb) -> Self {
        let x = 0.412453 * rgb.r + 0.357580 * rgb.g + 0.180423 * rgb.b;
        let y = 0.212671 * rgb.r + 0.715160 * rgb.g + 0.072169 * rgb.b;
        let z = 0.019334 * rgb.r + 0.119193 * rgb.g + 0.950227 * rgb.b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y);
        let fz = lab_f(z / WHITE_Z);

        let l = if y > EPSILON {
            116.0 * y.cbrt() - 16.0
        } else {
            KAPPA * y
        };

        Lab {
            l,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for LinearRgb {
    /// Convert Lab back to linear sRGB primaries.
    ///
    /// The result is not clamped; colors outside the sRGB gamut produce
    /// channels outside 0.0..=1.0.
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let y = if lab.l > KAPPA * EPSILON {
            fy * fy * fy
        } else {
            lab.l / KAPPA
        };
        let x = WHITE_X * lab_f_inv(fx);
        let z = WHITE_Z * lab_f_inv(fz);

        LinearRgb {
            r: 3.240479 * x - 1.537150 * y - 0.498535 * z,
            g: -0.969256 * x + 1.875991 * y + 0.041556 * z,
            b: 0.055648 * x - 0.204043 * y + 1.057311 * z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;

    /// Our constants differ slightly from the palette crate's (older D65
    /// white and rounded CIE thresholds), so compare with a loose tolerance.
    const PALETTE_TOLERANCE: f32 = 0.2;

    const ROUND_TRIP_TOLERANCE: f32 = 1e-3;

    #[test]
    fn test_lab_matches_palette_crate() {
        use palette::{IntoColor, Lab as PaletteLab, LinSrgb};

        let test_colors = [
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.5, 0.5, 0.5),
            (1.0, 1.0, 1.0),
            (0.0, 0.0, 0.0),
            (0.2, 0.6, 0.9),
        ];

        for (r, g, b) in test_colors {
            let ours = Lab::from(LinearRgb::new(r, g, b));
            let theirs: PaletteLab = LinSrgb::new(r, g, b).into_color();

            assert!(
                (ours.l - theirs.l).abs() < PALETTE_TOLERANCE,
                "L mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.l,
                theirs.l
            );
            assert!(
                (ours.a - theirs.a).abs() < PALETTE_TOLERANCE,
                "a mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.a,
                theirs.a
            );
            assert!(
                (ours.b - theirs.b).abs() < PALETTE_TOLERANCE,
                "b mismatch for ({r}, {g}, {b}): ours={}, palette={}",
                ours.b,
                theirs.b
            );
        }
    }

    #[test]
    fn test_lab_round_trip() {
        for &(r, g, b) in &[(0.9, 0.1, 0.3), (0.05, 0.5, 0.05), (0.3, 0.3, 0.8)] {
            let back = LinearRgb::from(Lab::from(LinearRgb::new(r, g, b)));
            assert!((back.r - r).abs() < ROUND_TRIP_TOLERANCE, "r: {} vs {r}", back.r);
            assert!((back.g - g).abs() < ROUND_TRIP_TOLERANCE, "g: {} vs {g}", back.g);
            assert!((back.b - b).abs() < ROUND_TRIP_TOLERANCE, "b: {} vs {b}", back.b);
        }
    }

    #[test]
    fn test_gray_has_neutral_chroma() {
        for v in [0u8, 40, 128, 200, 255] {
            let lab = Lab::from(LinearRgb::from(Srgb::from_u8(v, v, v)));
            let [_, a, b] = lab.encode8();
            assert_eq!((a, b), (128, 128), "gray {v} should encode neutral");
        }
    }

    #[test]
    fn test_encode8_extremes() {
        assert_eq!(Lab::new(0.0, 0.0, 0.0).encode8(), [0, 128, 128]);
        assert_eq!(Lab::new(100.0, 200.0, -300.0).encode8(), [255, 255, 0]);
    }

    #[test]
    fn test_8bit_round_trip_within_one_step() {
        for bytes in [[0u8, 128, 128], [128, 140, 100], [200, 60, 190], [255, 128, 128]] {
            let back = Lab::decode8(bytes).encode8();
            for c in 0..3 {
                assert!(
                    (back[c] as i32 - bytes[c] as i32).abs() <= 1,
                    "{bytes:?} -> {back:?}"
                );
            }
        }
    }
}
