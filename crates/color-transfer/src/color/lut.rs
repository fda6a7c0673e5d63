//! Gamma lookup table access functions
//!
//! The tables are generated at compile time by `build.rs`. Lookups clamp
//! their input to 0.0..=1.0, so out-of-gamut values coming back from Lab
//! decoding land on the nearest displayable value instead of indexing out of
//! range.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

const LAST: usize = SRGB_TO_LINEAR.len() - 1;

#[inline]
fn lookup(table: &[f32], value: f32) -> f32 {
    if value.is_nan() {
        return table[0];
    }
    let value = value.clamp(0.0, 1.0);
    let scaled = value * LAST as f32;
    let index = scaled as usize;

    if index >= LAST {
        return table[LAST];
    }

    let frac = scaled - index as f32;
    let a = table[index];
    let b = table[index + 1];
    a + (b - a) * frac
}

/// Convert an sRGB value (0.0..=1.0) to linear RGB.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    lookup(&SRGB_TO_LINEAR, srgb)
}

/// Convert a linear RGB value (0.0..=1.0) to sRGB.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    lookup(&LINEAR_TO_SRGB, linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lut_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lut_clamps_out_of_range() {
        assert_eq!(linear_to_srgb(-0.25), 0.0);
        assert!((linear_to_srgb(1.7) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_srgb(f32::NAN), 0.0);
    }

    #[test]
    fn test_lut_mid_gray() {
        // sRGB 0.5 is about 0.214 linear
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
        assert!((linear_to_srgb(0.214) - 0.5).abs() < 1e-3);
    }
}
