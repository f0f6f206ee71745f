//! This sub-module contains the basic value types of the coordinate systems.
//! See the parent module documentation for a description of both systems.

use crate::{
    error::{HexError, Result},
    hex::Scalar,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use strum::EnumIter;

/// A point in pixel (screen) space. There is no relationship between the two
/// components, so any pair of numbers is valid.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct RectCoords {
    x: Scalar,
    y: Scalar,
}

impl RectCoords {
    pub fn new(x: impl Into<Scalar>, y: impl Into<Scalar>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn x(&self) -> Scalar {
        self.x
    }

    pub fn y(&self) -> Scalar {
        self.y
    }
}

/// A point in the cube coordinate system. **Every instance satisfies
/// `q + r + s = 0`**, that is checked at every construction point (including
/// deserialization), and there is no way to mutate a value after that.
///
/// Components may be fractional, e.g. for interpolated points that haven't
/// been rounded to a tile yet. Only integral coordinates refer to tiles.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", q, r, s)]
#[serde(try_from = "UncheckedHexCoords")]
pub struct HexCoords {
    q: Scalar,
    r: Scalar,
    s: Scalar,
}

impl HexCoords {
    pub const ORIGIN: Self = Self {
        q: Scalar::ZERO,
        r: Scalar::ZERO,
        s: Scalar::ZERO,
    };

    /// Construct a new coordinate, failing if the components don't sum to
    /// zero. The sum is exact for integers and plain float addition otherwise,
    /// so fractional triples only pass if their float sum is exactly zero.
    pub fn new(
        q: impl Into<Scalar>,
        r: impl Into<Scalar>,
        s: impl Into<Scalar>,
    ) -> Result<Self> {
        let (q, r, s) = (q.into(), r.into(), s.into());
        if q + r + s == Scalar::ZERO {
            Ok(Self { q, r, s })
        } else {
            Err(HexError::Constraint { q, r, s })
        }
    }

    pub fn q(&self) -> Scalar {
        self.q
    }

    pub fn r(&self) -> Scalar {
        self.r
    }

    pub fn s(&self) -> Scalar {
        self.s
    }

    /// The three components, in `(q, r, s)` order
    pub fn components(&self) -> [Scalar; 3] {
        [self.q, self.r, self.s]
    }

    /// Does this coordinate refer to a tile center? True iff all three
    /// components are whole numbers.
    pub fn is_integral(&self) -> bool {
        self.components().iter().all(|c| c.is_integral())
    }

    /// Shift this coordinate by a vector. The result is re-validated, since
    /// float components can drift off the plane.
    pub fn translate(self, vector: HexVector) -> Result<Self> {
        Self::new(
            self.q + vector.q.into(),
            self.r + vector.r.into(),
            self.s + vector.s.into(),
        )
    }

    /// Get the coordinate of the tile one step away in the given direction
    pub fn adjacent(self, direction: HexDirection) -> Result<Self> {
        self.translate(direction.to_vector())
    }
}

/// Deserialization target for [HexCoords]. All deserialized coordinates are
/// funneled through [HexCoords::new] for validation.
#[derive(Deserialize)]
#[serde(rename = "HexCoords")]
struct UncheckedHexCoords {
    q: Scalar,
    r: Scalar,
    s: Scalar,
}

impl TryFrom<UncheckedHexCoords> for HexCoords {
    type Error = HexError;

    fn try_from(value: UncheckedHexCoords) -> Result<Self> {
        Self::new(value.q, value.r, value.s)
    }
}

/// An offset within the cube coordinate system. Unlike [HexCoords], a vector
/// isn't validated; a translation is only checked once it's applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
#[display(fmt = "({}, {}, {})", q, r, s)]
pub struct HexVector {
    pub q: i64,
    pub r: i64,
    pub s: i64,
}

impl HexVector {
    pub const fn new(q: i64, r: i64, s: i64) -> Self {
        Self { q, r, s }
    }
}

/// The 6 directions in which flat-topped hexes line up side-to-side. Names
/// assume screen space, where `+y` points down (south).
///
/// The declaration order is the order in which neighbors are always
/// enumerated: [HexDirection::iter] and [HexDirection::ALL] both follow it.
/// Flood fill and graph construction depend on this order for reproducible
/// output, so don't rearrange the variants.
#[derive(
    Copy,
    Clone,
    Debug,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HexDirection {
    SouthEast,
    NorthEast,
    North,
    NorthWest,
    SouthWest,
    South,
}

impl HexDirection {
    pub const ALL: [Self; 6] = [
        Self::SouthEast,
        Self::NorthEast,
        Self::North,
        Self::NorthWest,
        Self::SouthWest,
        Self::South,
    ];

    /// Get a vector offset that would move a point one tile in this direction
    pub fn to_vector(self) -> HexVector {
        match self {
            Self::SouthEast => HexVector::new(1, 0, -1),
            Self::NorthEast => HexVector::new(1, -1, 0),
            Self::North => HexVector::new(0, -1, 1),
            Self::NorthWest => HexVector::new(-1, 0, 1),
            Self::SouthWest => HexVector::new(-1, 1, 0),
            Self::South => HexVector::new(0, 1, -1),
        }
    }

    /// Get the direction pointing the opposite way of this one
    pub fn opposite(self) -> Self {
        match self {
            Self::SouthEast => Self::NorthWest,
            Self::NorthEast => Self::SouthWest,
            Self::North => Self::South,
            Self::NorthWest => Self::SouthEast,
            Self::SouthWest => Self::NorthEast,
            Self::South => Self::North,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};
    use strum::IntoEnumIterator;

    #[test]
    fn test_new_hex_coords() {
        assert!(HexCoords::new(1, -2, 1).is_ok());
        assert!(HexCoords::new(0.5, -0.25, -0.25).is_ok());
        assert_eq!(HexCoords::new(0, 0, 0).unwrap(), HexCoords::ORIGIN);

        // Every permutation of an invalid triple fails the same way
        for &(q, r, s) in &[(1, 1, 1), (1, 2, 3), (3, 1, 2), (-1, 0, 0)] {
            let err = HexCoords::new(q, r, s).unwrap_err();
            assert_eq!(
                err,
                HexError::Constraint {
                    q: q.into(),
                    r: r.into(),
                    s: s.into()
                }
            );
        }

        let err = HexCoords::new(f64::NAN, 0, 0).unwrap_err();
        assert!(matches!(err, HexError::Constraint { .. }));
    }

    #[test]
    fn test_display() {
        let coords = HexCoords::new(1, -3, 2).unwrap();
        assert_eq!(coords.to_string(), "(1, -3, 2)");
        assert_eq!(RectCoords::new(-48, 0.5).to_string(), "(-48, 0.5)");
    }

    #[test]
    fn test_mixed_variant_keys() {
        let a = HexCoords::new(1, -1, 0).unwrap();
        let b = HexCoords::new(1.0, -1.0, 0.0).unwrap();
        assert_eq!(a, b);
        assert!(a.is_integral());
        assert!(!HexCoords::new(0.5, -0.5, 0).unwrap().is_integral());
    }

    #[test]
    fn test_directions() {
        let vectors: Vec<HexVector> =
            HexDirection::iter().map(HexDirection::to_vector).collect();
        assert_eq!(
            vectors,
            vec![
                HexVector::new(1, 0, -1),
                HexVector::new(1, -1, 0),
                HexVector::new(0, -1, 1),
                HexVector::new(-1, 0, 1),
                HexVector::new(-1, 1, 0),
                HexVector::new(0, 1, -1),
            ]
        );
        assert_eq!(HexDirection::iter().collect::<Vec<_>>(), HexDirection::ALL);

        for dir in HexDirection::iter() {
            let v = dir.to_vector();
            let o = dir.opposite().to_vector();
            assert_eq!((v.q + o.q, v.r + o.r, v.s + o.s), (0, 0, 0));
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(HexDirection::North.opposite(), HexDirection::South);
        // Opposite is three steps around the fixed order
        for (i, dir) in HexDirection::ALL.iter().enumerate() {
            assert_eq!(dir.opposite(), HexDirection::ALL[(i + 3) % 6]);
        }
    }

    #[test]
    fn test_adjacent() {
        let origin = HexCoords::ORIGIN;
        assert_eq!(
            origin.adjacent(HexDirection::SouthEast).unwrap(),
            HexCoords::new(1, 0, -1).unwrap()
        );
        assert_eq!(
            origin.adjacent(HexDirection::North).unwrap(),
            HexCoords::new(0, -1, 1).unwrap()
        );
    }

    #[test]
    fn test_serde() {
        let coords = HexCoords::new(1, -2, 1).unwrap();
        assert_tokens(
            &coords,
            &[
                Token::Struct {
                    name: "HexCoords",
                    len: 3,
                },
                Token::Str("q"),
                Token::I64(1),
                Token::Str("r"),
                Token::I64(-2),
                Token::Str("s"),
                Token::I64(1),
                Token::StructEnd,
            ],
        );

        // Deserialization enforces the invariant too
        assert_de_tokens_error::<HexCoords>(
            &[
                Token::Struct {
                    name: "HexCoords",
                    len: 3,
                },
                Token::Str("q"),
                Token::I64(1),
                Token::Str("r"),
                Token::I64(1),
                Token::Str("s"),
                Token::I64(1),
                Token::StructEnd,
            ],
            "constraint violation: (1, 1, 1) is not on the plane q + r + s = 0",
        );
    }
}
