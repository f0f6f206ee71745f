//! Operations on coordinates: interpolation, rounding, adjacency, distance,
//! and the derived shapes (ranges, lines, flood fills). Every function here
//! validates its coordinate input through the coercion layer before doing any
//! math.

use crate::{
    config::FloodFillConfig,
    error::{HexError, Result},
    hex::{
        coerce::{
            cube_components, hex_coords, rect_components, scalar_field,
            AsCoords, CoordShape, Fields,
        },
        scalar::{float_to_int, linint},
        HexCoords, HexDirection, HexMap, HexSet, HexVector, RectCoords,
        Scalar,
    },
};
use log::debug;
use serde_json::Value;
use strum::IntoEnumIterator;
use validator::Validate;

/// Interpolate between two 2D points, one axis at a time
pub fn rect_linint<O: CoordShape>(
    a: &(impl AsCoords + ?Sized),
    b: &(impl AsCoords + ?Sized),
    t: impl Into<Scalar>,
) -> Result<O> {
    let [x_a, y_a] = rect_components(a)?;
    let [x_b, y_b] = rect_components(b)?;
    let t = t.into();
    O::from_rect(linint(x_a, x_b, t), linint(y_a, y_b, t))
}

/// Interpolate between two cube coordinates, one axis at a time. Both inputs
/// must be valid coordinates. The output generally isn't on a tile center,
/// and with float math its components might not sum to _exactly_ zero, so
/// asking for a [HexCoords] output can fail where a tuple wouldn't.
pub fn cube_linint<O: CoordShape>(
    a: &(impl AsCoords + ?Sized),
    b: &(impl AsCoords + ?Sized),
    t: impl Into<Scalar>,
) -> Result<O> {
    let a = hex_coords(a)?;
    let b = hex_coords(b)?;
    let t = t.into();
    O::from_cube(
        linint(a.q(), b.q(), t),
        linint(a.r(), b.r(), t),
        linint(a.s(), b.s(), t),
    )
}

/// A container whose float entries can be rounded in place
pub trait RoundContainer: Sized {
    /// Round every float in this container to `digits` decimal places.
    /// Integers and non-numeric entries are left alone.
    fn round_floats(self, digits: i32) -> Result<Self>;
}

fn round_value(value: Value, digits: i32) -> Value {
    match value {
        Value::Number(number) if number.is_f64() => match number.as_f64() {
            Some(f) => Scalar::Float(f).round_to(digits).into(),
            None => Value::Number(number),
        },
        other => other,
    }
}

impl RoundContainer for Value {
    /// Arrays have each float entry rounded. Objects have each float field
    /// rounded, as well as float entries of array fields. Nested objects are
    /// not descended into.
    fn round_floats(self, digits: i32) -> Result<Self> {
        let round_all = |values: Vec<Value>| -> Vec<Value> {
            values.into_iter().map(|v| round_value(v, digits)).collect()
        };

        match self {
            Value::Array(values) => Ok(Value::Array(round_all(values))),
            Value::Object(map) => Ok(Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        let value = match value {
                            Value::Array(values) => {
                                Value::Array(round_all(values))
                            }
                            other => round_value(other, digits),
                        };
                        (key, value)
                    })
                    .collect(),
            )),
            other => Err(HexError::type_error(format!(
                "cannot round a non-container value: {}",
                other
            ))),
        }
    }
}

impl RoundContainer for Vec<Scalar> {
    fn round_floats(self, digits: i32) -> Result<Self> {
        Ok(self.into_iter().map(|v| v.round_to(digits)).collect())
    }
}

impl RoundContainer for (Scalar, Scalar) {
    fn round_floats(self, digits: i32) -> Result<Self> {
        Ok((self.0.round_to(digits), self.1.round_to(digits)))
    }
}

impl RoundContainer for (Scalar, Scalar, Scalar) {
    fn round_floats(self, digits: i32) -> Result<Self> {
        Ok((
            self.0.round_to(digits),
            self.1.round_to(digits),
            self.2.round_to(digits),
        ))
    }
}

impl RoundContainer for RectCoords {
    fn round_floats(self, digits: i32) -> Result<Self> {
        Ok(RectCoords::new(
            self.x().round_to(digits),
            self.y().round_to(digits),
        ))
    }
}

impl RoundContainer for HexCoords {
    /// The rounded components are re-validated, since rounding each axis on
    /// its own can knock the point off the plane
    fn round_floats(self, digits: i32) -> Result<Self> {
        HexCoords::new(
            self.q().round_to(digits),
            self.r().round_to(digits),
            self.s().round_to(digits),
        )
    }
}

/// Round every float in a container to `digits` decimal places. Use `0` for
/// the common case of rounding to whole numbers (the output entries stay
/// floats).
pub fn round_container<C: RoundContainer>(container: C, digits: i32) -> Result<C> {
    container.round_floats(digits)
}

/// Round a fractional cube coordinate to the nearest tile. The input doesn't
/// need to satisfy the zero-sum constraint, but the output always will.
///
/// Each axis is rounded on its own, then whichever axis moved the most is
/// recomputed from the other two. Ties go to `s`, then `r`.
/// See https://www.redblobgames.com/grids/hexagons/#rounding
pub fn round_hex<O: CoordShape>(qrs: &(impl AsCoords + ?Sized)) -> Result<O> {
    let [q_f, r_f, s_f] = cube_components(qrs)?;
    let (mut q, mut r, mut s) = (q_f.round(), r_f.round(), s_f.round());

    let q_diff = (q - q_f).abs();
    let r_diff = (r - r_f).abs();
    let s_diff = (s - s_f).abs();

    if q_diff > r_diff && q_diff > s_diff {
        q = -r - s;
    } else if r_diff > s_diff {
        r = -q - s;
    } else {
        s = -q - r;
    }
    O::from_cube(q, r, s)
}

/// Get the six coordinates adjacent to the given one. They're always in the
/// same order, see [HexDirection].
pub fn neighbors(qrs: &(impl AsCoords + ?Sized)) -> Result<[HexCoords; 6]> {
    let center = hex_coords(qrs)?;
    let mut adjacents = [center; 6];
    for (slot, direction) in adjacents.iter_mut().zip(HexDirection::iter()) {
        *slot = center.adjacent(direction)?;
    }
    Ok(adjacents)
}

/// Calculate the distance between two coordinates, meaning the number of
/// steps it takes to get from one to the other. 0 if the points are equal,
/// 1 if the tiles are adjacent, etc. Whole distances are always returned as
/// [Scalar::Int].
pub fn distance(
    a: &(impl AsCoords + ?Sized),
    b: &(impl AsCoords + ?Sized),
) -> Result<Scalar> {
    let a = hex_coords(a)?;
    let b = hex_coords(b)?;
    Ok(hex_distance(a, b))
}

/// [distance], for coordinates that are already validated
pub(crate) fn hex_distance(a: HexCoords, b: HexCoords) -> Scalar {
    let q_diff = (a.q() - b.q()).abs();
    let r_diff = (a.r() - b.r()).abs();
    let s_diff = (a.s() - b.s()).abs();
    float_to_int(q_diff.max(r_diff).max(s_diff))
}

/// Convert a step count argument to an integer. Fractional distances don't
/// mean anything on a tile grid.
fn whole_steps(n: Scalar, what: &str) -> Result<i64> {
    n.as_int().ok_or_else(|| {
        HexError::type_error(format!(
            "{} must be a whole number, fractional distances are not \
             supported (got {})",
            what, n
        ))
    })
}

/// Get every coordinate within `n` steps of the given center, including the
/// center. For `n >= 0` there will always be exactly `3n² + 3n + 1` values.
/// A negative `n` produces an empty set.
pub fn in_range(
    center: &(impl AsCoords + ?Sized),
    n: impl Into<Scalar>,
) -> Result<HexSet> {
    let center = hex_coords(center)?;
    let n = whole_steps(n.into(), "n")?;

    disk_vectors(n)
        .map(|vector| center.translate(vector))
        .collect()
}

/// Get the offset of every coordinate within `radius` steps of a center, in
/// a stable order (by `q`, then `r`)
pub(crate) fn disk_vectors(radius: i64) -> impl Iterator<Item = HexVector> {
    (-radius..=radius).flat_map(move |dq| {
        // Only walk the r values that put s in range too
        let dr_min = (-radius).max(-dq - radius);
        let dr_max = radius.min(-dq + radius);
        (dr_min..=dr_max).map(move |dr| HexVector::new(dq, dr, -dq - dr))
    })
}

/// Get the ordered list of tiles that a straight line between two coordinates
/// passes through, including both endpoints. The line always has
/// `distance(a, b) + 1` tiles, and each consecutive pair is adjacent.
/// See https://www.redblobgames.com/grids/hexagons/#line-drawing
pub fn line_draw(
    a: &(impl AsCoords + ?Sized),
    b: &(impl AsCoords + ?Sized),
) -> Result<Vec<HexCoords>> {
    let a = hex_coords(a)?;
    let b = hex_coords(b)?;
    let steps = whole_steps(hex_distance(a, b), "the distance between a and b")?;

    (0..=steps)
        .map(|i| {
            let t = if steps == 0 {
                0.0
            } else {
                1.0 / steps as f64 * i as f64
            };
            let sample: (Scalar, Scalar, Scalar) = cube_linint(&a, &b, t)?;
            round_hex(&sample)
        })
        .collect()
}

/// Find every tile that can be reached from `start` within `n` steps, given
/// that tiles with a negative movement cost can't be entered. Coordinates
/// with no tile in the group can't be entered either. Only the _number_ of
/// steps is limited here, the magnitude of each cost doesn't matter.
///
/// Every tile in the group is validated (coordinates and cost field) before
/// the fill starts. The returned set always includes `start`.
pub fn dist_lim_flood_fill<T: AsCoords + Fields>(
    start: &(impl AsCoords + ?Sized),
    n: impl Into<Scalar>,
    tiles: &[T],
    config: &FloodFillConfig,
) -> Result<HexSet> {
    config.validate()?;
    let start = hex_coords(start)?;
    let n = whole_steps(n.into(), "n")?;

    let mut costs: HexMap<Scalar> = HexMap::default();
    costs.reserve(tiles.len());
    for tile in tiles {
        let coords = hex_coords(tile)?;
        let cost = scalar_field(tile, &config.movement_field)?;
        costs.insert(coords, cost);
    }
    let passable = |coords: &HexCoords| {
        costs.get(coords).map_or(false, |cost| !cost.is_negative())
    };

    let mut visited = HexSet::default();
    visited.insert(start);
    let mut fringe = vec![start];
    for _ in 0..n {
        let mut next_fringe = Vec::new();
        for coords in &fringe {
            for neighbor in neighbors(coords)?.iter() {
                if !visited.contains(neighbor) && passable(neighbor) {
                    visited.insert(*neighbor);
                    next_fringe.push(*neighbor);
                }
            }
        }
        fringe = next_fringe;
    }

    debug!(
        "Flood fill from {} over {} steps reached {} tiles",
        start,
        n,
        visited.len()
    );
    Ok(visited)
}
