use crate::models::Symbol;
use image::{GrayImage, Luma};
use std::fmt::Write as _;
use std::path::Path;

/// Quiet zone width in modules required around a symbol (ISO/IEC 18004:2015 6.3.8)
pub const QUIET_ZONE: usize = 4;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Rasterize a symbol: `scale` pixels per module, `quiet_zone` light modules on each side.
pub fn to_luma_image(symbol: &Symbol, scale: u32, quiet_zone: usize) -> GrayImage {
    let scale = scale.max(1);
    let modules = symbol.module_count() + 2 * quiet_zone;
    let side = modules as u32 * scale;
    GrayImage::from_fn(side, side, |px, py| {
        let col = (px / scale) as usize;
        let row = (py / scale) as usize;
        let dark = row >= quiet_zone
            && col >= quiet_zone
            && symbol.is_dark(row - quiet_zone, col - quiet_zone);
        if dark { DARK } else { LIGHT }
    })
}

/// Render a symbol to a PNG file.
pub fn save_png<P: AsRef<Path>>(
    symbol: &Symbol,
    path: P,
    scale: u32,
) -> Result<(), image::ImageError> {
    to_luma_image(symbol, scale, QUIET_ZONE).save_with_format(path, image::ImageFormat::Png)
}

/// Render a symbol as a standalone SVG document, one unit per module.
pub fn to_svg_string(symbol: &Symbol, quiet_zone: usize) -> String {
    let size = symbol.module_count();
    let side = size + 2 * quiet_zone;
    let mut path = String::new();
    for row in 0..size {
        for col in 0..size {
            if symbol.is_dark(row, col) {
                let _ = write!(path, "M{},{}h1v1h-1z", col + quiet_zone, row + quiet_zone);
            }
        }
    }
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {side} {side}\" stroke=\"none\">\n",
            "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n",
            "\t<path d=\"{path}\" fill=\"#000000\"/>\n",
            "</svg>\n"
        ),
        side = side,
        path = path
    )
}

/// Render a symbol as text, two characters per module (`##` dark, spaces light).
pub fn to_text(symbol: &Symbol, quiet_zone: usize) -> String {
    let size = symbol.module_count();
    let side = size + 2 * quiet_zone;
    let mut out = String::with_capacity(side * (2 * side + 1));
    for row in 0..side {
        for col in 0..side {
            let dark = row >= quiet_zone
                && col >= quiet_zone
                && symbol.is_dark(row - quiet_zone, col - quiet_zone);
            out.push_str(if dark { "##" } else { "  " });
        }
        out.push('\n');
    }
    out
}
