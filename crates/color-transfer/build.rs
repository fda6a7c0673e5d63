use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Number of entries in each gamma table.
const LUT_SIZE: usize = 4096;

/// IEC 61966-2-1 exact formula: sRGB to linear
fn srgb_to_linear_exact(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 exact formula: linear to sRGB
fn linear_to_srgb_exact(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn write_table(file: &mut File, name: &str, doc: &str, f: fn(f64) -> f64) -> io::Result<()> {
    writeln!(file, "/// {doc}")?;
    writeln!(file, "/// Index: input * {}.0", LUT_SIZE - 1)?;
    writeln!(file, "pub static {name}: [f32; {LUT_SIZE}] = [")?;
    for i in 0..LUT_SIZE {
        let x = i as f64 / (LUT_SIZE - 1) as f64;
        if i > 0 && i % 8 == 0 {
            writeln!(file)?;
        }
        write!(file, "    {:.9},", f(x) as f32)?;
    }
    writeln!(file, "\n];")?;
    writeln!(file)
}

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;
    let dest_path = Path::new(&out_dir).join("gamma_lut.rs");
    let mut file = File::create(&dest_path)?;

    write_table(
        &mut file,
        "SRGB_TO_LINEAR",
        "Lookup table for sRGB to linear conversion",
        srgb_to_linear_exact,
    )?;
    write_table(
        &mut file,
        "LINEAR_TO_SRGB",
        "Lookup table for linear to sRGB conversion",
        linear_to_srgb_exact,
    )?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
