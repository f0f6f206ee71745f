//! Normalization of "tuple-or-object" coordinate input. Every public function
//! that accepts a coordinate goes through [container_or_object] (or one of the
//! helpers below it) before touching any component, so malformed input is
//! rejected up front with a consistent error.
//!
//! Input is described by [AsCoords], which lets a value say whether it's
//! positional (a tuple or list) or an object with named fields. Output is
//! selected by the caller through the [CoordShape] type parameter, e.g.
//! `container_or_object::<HexCoords>(&tile, 3)`.

use crate::{
    error::{HexError, Result},
    hex::{
        scalar::{value_kind, Scalar},
        HexCoords, RectCoords,
    },
};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::convert::{TryFrom, TryInto};

const RECT_FIELDS: [&str; 2] = ["x", "y"];
const CUBE_FIELDS: [&str; 3] = ["q", "r", "s"];

/// Field-name-keyed output shape, e.g. `{"q": 1, "r": -1, "s": 0}`. Keys are
/// kept in axis order.
pub type CoordMap = IndexMap<&'static str, Scalar, FnvBuildHasher>;

/// Read access to named fields of an object, by name. This is the capability
/// that stands in for attribute lookup: tiles, JSON objects, and any caller
/// type that wants to act as a coordinate or carry a movement cost implement
/// it.
pub trait Fields {
    /// Get the value of a field, or `None` if this object doesn't have it
    fn field(&self, name: &str) -> Option<Value>;
}

/// Write access to named fields of an object
pub trait FieldsMut: Fields {
    /// Set several fields at once. Implementations must either write all of
    /// the values or none of them.
    fn set_fields(&mut self, values: &[(&'static str, Scalar)]) -> Result<()>;
}

/// How a value presents itself to the coercion layer
pub enum Coercible<'a> {
    /// Statically typed numeric components
    Tuple(Vec<Scalar>),
    /// Dynamically typed positional components, which still need to be
    /// checked for numeric type
    Sequence(&'a [Value]),
    /// An object with named fields (`x`/`y` or `q`/`r`/`s`)
    Object(&'a dyn Fields),
    /// Something that can't be a coordinate at all. Holds a name of the
    /// value's type for the error message.
    Unsupported(&'static str),
}

/// Any value that can be coerced into a coordinate
pub trait AsCoords {
    fn as_coords(&self) -> Coercible<'_>;
}

impl<T: AsCoords + ?Sized> AsCoords for &T {
    fn as_coords(&self) -> Coercible<'_> {
        (**self).as_coords()
    }
}

impl<A: Copy + Into<Scalar>, B: Copy + Into<Scalar>> AsCoords for (A, B) {
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Tuple(vec![self.0.into(), self.1.into()])
    }
}

impl<A, B, C> AsCoords for (A, B, C)
where
    A: Copy + Into<Scalar>,
    B: Copy + Into<Scalar>,
    C: Copy + Into<Scalar>,
{
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Tuple(vec![self.0.into(), self.1.into(), self.2.into()])
    }
}

impl AsCoords for [Scalar] {
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Tuple(self.to_vec())
    }
}

impl AsCoords for Vec<Scalar> {
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Tuple(self.clone())
    }
}

// Both coordinate structs are positional, so a HexCoords can't be read as a
// 2D point and vice versa
impl AsCoords for RectCoords {
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Tuple(vec![self.x(), self.y()])
    }
}

impl AsCoords for HexCoords {
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Tuple(self.components().to_vec())
    }
}

impl AsCoords for Value {
    fn as_coords(&self) -> Coercible<'_> {
        match self {
            Value::Array(values) => Coercible::Sequence(values),
            Value::Object(map) => Coercible::Object(map),
            other => Coercible::Unsupported(value_kind(other)),
        }
    }
}

impl AsCoords for Map<String, Value> {
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Object(self)
    }
}

impl AsCoords for CoordMap {
    fn as_coords(&self) -> Coercible<'_> {
        Coercible::Object(self)
    }
}

impl Fields for Value {
    /// Only JSON objects have fields
    fn field(&self, name: &str) -> Option<Value> {
        self.as_object().and_then(|map| map.field(name))
    }
}

impl Fields for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl FieldsMut for Map<String, Value> {
    fn set_fields(&mut self, values: &[(&'static str, Scalar)]) -> Result<()> {
        for &(name, value) in values {
            self.insert(name.to_owned(), value.into());
        }
        Ok(())
    }
}

impl Fields for CoordMap {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).map(|value| (*value).into())
    }
}

impl FieldsMut for CoordMap {
    fn set_fields(&mut self, values: &[(&'static str, Scalar)]) -> Result<()> {
        self.extend(values.iter().copied());
        Ok(())
    }
}

/// An output shape for coordinate-producing functions. Implemented for the
/// raw tuples, the typed structs, `Vec<Scalar>` (ordered list) and
/// [CoordMap]. Producing a shape of the wrong dimension is a type error.
pub trait CoordShape: Sized {
    fn from_rect(x: Scalar, y: Scalar) -> Result<Self>;

    fn from_cube(q: Scalar, r: Scalar, s: Scalar) -> Result<Self>;
}

fn wrong_dimension(shape: &str, len: usize) -> HexError {
    HexError::type_error(format!("{} cannot hold {} components", shape, len))
}

impl CoordShape for (Scalar, Scalar) {
    fn from_rect(x: Scalar, y: Scalar) -> Result<Self> {
        Ok((x, y))
    }

    fn from_cube(_: Scalar, _: Scalar, _: Scalar) -> Result<Self> {
        Err(wrong_dimension("a 2-tuple", 3))
    }
}

impl CoordShape for (Scalar, Scalar, Scalar) {
    fn from_rect(_: Scalar, _: Scalar) -> Result<Self> {
        Err(wrong_dimension("a 3-tuple", 2))
    }

    fn from_cube(q: Scalar, r: Scalar, s: Scalar) -> Result<Self> {
        Ok((q, r, s))
    }
}

impl CoordShape for RectCoords {
    fn from_rect(x: Scalar, y: Scalar) -> Result<Self> {
        Ok(RectCoords::new(x, y))
    }

    fn from_cube(_: Scalar, _: Scalar, _: Scalar) -> Result<Self> {
        Err(wrong_dimension("RectCoords", 3))
    }
}

impl CoordShape for HexCoords {
    fn from_rect(_: Scalar, _: Scalar) -> Result<Self> {
        Err(wrong_dimension("HexCoords", 2))
    }

    fn from_cube(q: Scalar, r: Scalar, s: Scalar) -> Result<Self> {
        HexCoords::new(q, r, s)
    }
}

impl CoordShape for Vec<Scalar> {
    fn from_rect(x: Scalar, y: Scalar) -> Result<Self> {
        Ok(vec![x, y])
    }

    fn from_cube(q: Scalar, r: Scalar, s: Scalar) -> Result<Self> {
        Ok(vec![q, r, s])
    }
}

impl CoordShape for CoordMap {
    fn from_rect(x: Scalar, y: Scalar) -> Result<Self> {
        Ok(RECT_FIELDS.iter().copied().zip(vec![x, y]).collect())
    }

    fn from_cube(q: Scalar, r: Scalar, s: Scalar) -> Result<Self> {
        Ok(CUBE_FIELDS.iter().copied().zip(vec![q, r, s]).collect())
    }
}

/// Read a single numeric field from an object. A missing field is an
/// attribute error, a non-numeric one is a type error.
pub(crate) fn scalar_field(
    object: &(impl Fields + ?Sized),
    name: &str,
) -> Result<Scalar> {
    let value = object.field(name).ok_or_else(|| {
        HexError::attribute(format!("object has no field '{}'", name))
    })?;
    Scalar::try_from(&value).map_err(|_| {
        HexError::type_error(format!(
            "field '{}' must be an integer or float, got {}",
            name,
            value_kind(&value)
        ))
    })
}

/// Pull exactly `N` numeric components out of a value, positionally or by the
/// given field names
fn components<const N: usize>(
    input: &(impl AsCoords + ?Sized),
    names: [&'static str; N],
) -> Result<[Scalar; N]> {
    let expected = || {
        format!(
            "expected a {}-tuple or an object with fields {}",
            N,
            names.join(", ")
        )
    };

    let values: Vec<Scalar> = match input.as_coords() {
        Coercible::Tuple(values) => values,
        Coercible::Sequence(values) => values
            .iter()
            .map(Scalar::try_from)
            .collect::<Result<_>>()?,
        Coercible::Object(object) => names
            .iter()
            .map(|name| scalar_field(object, name))
            .collect::<Result<_>>()?,
        Coercible::Unsupported(kind) => {
            return Err(HexError::type_error(format!(
                "{}, got {}",
                expected(),
                kind
            )));
        }
    };

    values.try_into().map_err(|values: Vec<Scalar>| {
        HexError::type_error(format!(
            "{}, got a sequence of length {}",
            expected(),
            values.len()
        ))
    })
}

/// Pull `(x, y)` out of any coordinate-like input
pub(crate) fn rect_components(
    input: &(impl AsCoords + ?Sized),
) -> Result<[Scalar; 2]> {
    components(input, RECT_FIELDS)
}

/// Pull `(q, r, s)` out of any coordinate-like input, **without** checking
/// the zero-sum constraint. Only for operations that are meant to accept
/// off-plane triples, like rounding.
pub(crate) fn cube_components(
    input: &(impl AsCoords + ?Sized),
) -> Result<[Scalar; 3]> {
    components(input, CUBE_FIELDS)
}

/// Coerce any coordinate-like input into a validated [HexCoords]
pub(crate) fn hex_coords(input: &(impl AsCoords + ?Sized)) -> Result<HexCoords> {
    let [q, r, s] = cube_components(input)?;
    HexCoords::new(q, r, s)
}

/// Normalize a tuple, list, typed coordinate or object into a coordinate of
/// dimension `expected_len`, in the caller's chosen output shape.
///
/// Fails with:
/// - A type error if the input can't be a coordinate at all, a positional
///   input has the wrong length, or a component isn't a number
/// - An attribute error if an object lacks one of the named fields
/// - A constraint violation if `expected_len` is 3 and the components don't
///   sum to zero
/// - A value error if `expected_len` is anything other than 2 or 3
pub fn container_or_object<O: CoordShape>(
    input: &(impl AsCoords + ?Sized),
    expected_len: usize,
) -> Result<O> {
    match expected_len {
        2 => {
            let [x, y] = rect_components(input)?;
            O::from_rect(x, y)
        }
        3 => {
            let coords = hex_coords(input)?;
            O::from_cube(coords.q(), coords.r(), coords.s())
        }
        _ => Err(HexError::value(format!(
            "only 2 or 3 axis coordinate systems are supported, got {}",
            expected_len
        ))),
    }
}

/// Read the `x` and `y` fields of an object
pub fn get_xy<O: CoordShape>(object: &(impl Fields + ?Sized)) -> Result<O> {
    O::from_rect(scalar_field(object, "x")?, scalar_field(object, "y")?)
}

/// Overwrite the `x` and `y` fields of an object
pub fn set_xy(
    object: &mut (impl FieldsMut + ?Sized),
    x: impl Into<Scalar>,
    y: impl Into<Scalar>,
) -> Result<()> {
    object.set_fields(&[("x", x.into()), ("y", y.into())])
}

/// Read the `q`, `r` and `s` fields of an object. The zero-sum constraint is
/// only checked if the output shape is [HexCoords].
pub fn get_qrs<O: CoordShape>(object: &(impl Fields + ?Sized)) -> Result<O> {
    O::from_cube(
        scalar_field(object, "q")?,
        scalar_field(object, "r")?,
        scalar_field(object, "s")?,
    )
}

/// Overwrite the `q`, `r` and `s` fields of an object. The new values are
/// validated before anything is written.
pub fn set_qrs(
    object: &mut (impl FieldsMut + ?Sized),
    q: impl Into<Scalar>,
    r: impl Into<Scalar>,
    s: impl Into<Scalar>,
) -> Result<()> {
    let coords = HexCoords::new(q, r, s)?;
    object.set_fields(&[
        ("q", coords.q()),
        ("r", coords.r()),
        ("s", coords.s()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn s(value: i64) -> Scalar {
        Scalar::Int(value)
    }

    #[test]
    fn test_tuples() {
        let xy: (Scalar, Scalar) = container_or_object(&(3, -4), 2).unwrap();
        assert_eq!(xy, (s(3), s(-4)));

        let qrs: HexCoords = container_or_object(&(1, -2, 1), 3).unwrap();
        assert_eq!(qrs, HexCoords::new(1, -2, 1).unwrap());

        // Wrong arity for the requested dimension
        let err = container_or_object::<RectCoords>(&(1, -2, 1), 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        let err = container_or_object::<HexCoords>(&(1, 2), 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_output_shapes() {
        let input = (2, -1, -1);
        let tuple: (Scalar, Scalar, Scalar) =
            container_or_object(&input, 3).unwrap();
        assert_eq!(tuple, (s(2), s(-1), s(-1)));
        let list: Vec<Scalar> = container_or_object(&input, 3).unwrap();
        assert_eq!(list, vec![s(2), s(-1), s(-1)]);
        let map: CoordMap = container_or_object(&input, 3).unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["q", "r", "s"]);
        assert_eq!(map["r"], -1);

        let map: CoordMap = container_or_object(&(0.5, 7), 2).unwrap();
        assert_eq!(map["x"], 0.5);
        assert_eq!(map["y"], 7);

        // A 2D request can't produce a 3D shape
        let err = container_or_object::<HexCoords>(&(1, 2), 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_typed_coords_idempotent() {
        let coords = HexCoords::new(3, -5, 2).unwrap();
        let out: HexCoords = container_or_object(&coords, 3).unwrap();
        assert_eq!(out, coords);

        let rect = RectCoords::new(1.5, -2);
        let out: RectCoords = container_or_object(&rect, 2).unwrap();
        assert_eq!(out, rect);

        // Typed coordinates are positional
        let err = container_or_object::<RectCoords>(&coords, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_objects() {
        let tile = json!({"q": 1, "r": 0, "s": -1, "movement_cost": 2});
        let coords: HexCoords = container_or_object(&tile, 3).unwrap();
        assert_eq!(coords, HexCoords::new(1, 0, -1).unwrap());

        let err = container_or_object::<HexCoords>(&json!({"q": 1, "r": -1}), 3)
            .unwrap_err();
        assert_eq!(err, HexError::attribute("object has no field 's'"));

        let err = container_or_object::<RectCoords>(&json!({"x": "1", "y": 2}), 2)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let err =
            container_or_object::<HexCoords>(&json!({"q": 1, "r": 1, "s": 1}), 3)
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Constraint);
    }

    #[test]
    fn test_sequences() {
        let coords: HexCoords =
            container_or_object(&json!([0, 2, -2]), 3).unwrap();
        assert_eq!(coords, HexCoords::new(0, 2, -2).unwrap());

        let err = container_or_object::<HexCoords>(&json!([0, true, 0]), 3)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        let err =
            container_or_object::<HexCoords>(&json!([0, 0]), 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_unsupported() {
        for input in &[json!(3), json!("(1, 2)"), json!(null), json!(false)] {
            let err = container_or_object::<RectCoords>(input, 2).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type, "{}", input);
        }
    }

    #[test]
    fn test_bad_dimension() {
        for &len in &[0, 1, 4] {
            let err = container_or_object::<Vec<Scalar>>(&(1, 2), len)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value);
        }
    }

    #[test]
    fn test_get_set_xy() {
        let mut object = Map::new();
        assert_eq!(
            get_xy::<RectCoords>(&object).unwrap_err().kind(),
            ErrorKind::Attribute
        );

        set_xy(&mut object, 3, 4.5).unwrap();
        let xy: (Scalar, Scalar) = get_xy(&object).unwrap();
        assert_eq!(xy, (s(3), Scalar::Float(4.5)));
    }

    #[test]
    fn test_get_set_qrs() {
        let mut object = CoordMap::default();
        set_qrs(&mut object, 1, -3, 2).unwrap();
        let coords: HexCoords = get_qrs(&object).unwrap();
        assert_eq!(coords, HexCoords::new(1, -3, 2).unwrap());

        // Invalid values are rejected before anything is written
        let err = set_qrs(&mut object, 1, 1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Constraint);
        assert_eq!(object["q"], 1);
        assert_eq!(object["r"], -3);

        // Only the typed output checks the constraint
        object.insert("s", s(5));
        let raw: (Scalar, Scalar, Scalar) = get_qrs(&object).unwrap();
        assert_eq!(raw, (s(1), s(-3), s(5)));
        assert_eq!(
            get_qrs::<HexCoords>(&object).unwrap_err().kind(),
            ErrorKind::Constraint
        );
    }
}
