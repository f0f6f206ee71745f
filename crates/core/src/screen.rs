//! Projection between cube coordinates and pixel (screen) space. See
//! [crate::hex] for a description of both coordinate systems.

use crate::{
    config::TileLayout,
    error::{HexError, Result},
    hex::{hex_coords, rect_components, AsCoords, CoordShape, HexCoords, Scalar},
};
use validator::Validate;

/// Get the pixel position of the center of a tile, for flat-topped tiles of
/// the given size. The output is always whole pixels.
pub fn hex_to_pixel<O: CoordShape>(
    qrs: &(impl AsCoords + ?Sized),
    layout: &TileLayout,
) -> Result<O> {
    layout.validate()?;
    let coords = hex_coords(qrs)?;
    let (x, y) = project(coords, layout);
    O::from_rect(x, y)
}

fn project(coords: HexCoords, layout: &TileLayout) -> (Scalar, Scalar) {
    let [q, r, s] = [coords.q(), coords.r(), coords.s()].map(Scalar::to_f64);
    let width = f64::from(layout.tile_width);
    let height = f64::from(layout.tile_height);

    // Tiles overlap horizontally by a quarter of their width, hence the 3/4
    // (in the form of 2 * 0.375) horizontal spacing
    let x = ((4.0 / 3.0) * q - (2.0 / 3.0) * r - (2.0 / 3.0) * s) * width * 0.375;
    let y = (r - s) * height * 0.5;
    (Scalar::Float(x).round(), Scalar::Float(y).round())
}

/// Get the tile that a pixel position falls in, for flat-topped tiles of the
/// given size. This is the inverse of [hex_to_pixel] for tile centers. Each
/// axis is rounded on its own, so points near a tile boundary may come out
/// off by one tile; use [crate::round_hex] on an unrounded projection if that
/// matters.
pub fn pixel_to_hex<O: CoordShape>(
    xy: &(impl AsCoords + ?Sized),
    layout: &TileLayout,
) -> Result<O> {
    layout.validate()?;
    let [x, y] = rect_components(xy)?.map(Scalar::to_f64);
    let width = f64::from(layout.tile_width);
    let height = f64::from(layout.tile_height);

    let q = Scalar::Float((x / 2.0) / width * (8.0 / 3.0)).round();
    let r = Scalar::Float((y / 2.0 - x / 4.0) / height * 2.0).round();
    let s = -q - r;
    O::from_cube(q, r, s)
}

/// Get the pixel position of a coordinate of either dimension. Cube
/// coordinates are projected onto the screen first.
fn pixel_position(
    input: &(impl AsCoords + ?Sized),
    len: usize,
    layout: &TileLayout,
) -> Result<(f64, f64)> {
    match len {
        2 => {
            let [x, y] = rect_components(input)?;
            Ok((x.to_f64(), y.to_f64()))
        }
        3 => {
            let (x, y) = project(hex_coords(input)?, layout);
            Ok((x.to_f64(), y.to_f64()))
        }
        _ => Err(HexError::value(format!(
            "only 2 or 3 axis coordinate systems are supported, got {}",
            len
        ))),
    }
}

/// Get the heading from `a` to `b` in degrees, within `[0, 360)`. Each point
/// can be given in pixel (`len = 2`) or cube (`len = 3`) coordinates; cube
/// coordinates are projected with the given layout first. 0° points along
/// `+x`, and since `+y` points down on screen, 90° points straight down.
pub fn angle(
    a: &(impl AsCoords + ?Sized),
    a_len: usize,
    b: &(impl AsCoords + ?Sized),
    b_len: usize,
    layout: &TileLayout,
) -> Result<f64> {
    layout.validate()?;
    let (x_a, y_a) = pixel_position(a, a_len, layout)?;
    let (x_b, y_b) = pixel_position(b, b_len, layout)?;

    let degrees = (y_b - y_a).atan2(x_b - x_a).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative angles
    Ok(if degrees >= 360.0 { 0.0 } else { degrees })
}
