//! The numeric type behind every coordinate component and movement cost.

use crate::error::{HexError, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    cmp::Ordering,
    convert::TryFrom,
    hash::{Hash, Hasher},
    iter::Sum,
    ops,
};

/// A real number that remembers whether it is integral. Coordinates, costs
/// and interpolation results can all be either whole or fractional, and a lot
/// of the kernel's behavior depends on which one it has (e.g. only whole
/// numbers address tiles). Arithmetic between two `Int`s stays exact, anything
/// involving a `Float` produces a `Float`.
///
/// Equality, hashing and ordering are by numeric value across both variants,
/// so `Int(2)` and `Float(2.0)` are the same graph key.
#[derive(Copy, Clone, Debug, Display, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[display(fmt = "{}", _0)]
    Int(i64),
    // Debug formatting keeps the trailing `.0` on whole floats
    #[display(fmt = "{:?}", _0)]
    Float(f64),
}

/// Convert a float to an integer, if it is whole and within `i64` range
fn float_as_int(f: f64) -> Option<i64> {
    // 2^63 is exactly representable, everything below it in magnitude fits
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

impl Scalar {
    pub const ZERO: Self = Self::Int(0);

    /// The value as a float. Lossy for integers beyond 2^53.
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// The value as an integer, if it's whole (regardless of variant)
    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(i),
            Self::Float(f) => float_as_int(f),
        }
    }

    /// Is this a whole number? `Float(3.0)` counts.
    pub fn is_integral(self) -> bool {
        self.as_int().is_some()
    }

    pub fn is_negative(self) -> bool {
        match self {
            Self::Int(i) => i < 0,
            Self::Float(f) => f < 0.0,
        }
    }

    pub fn abs(self) -> Self {
        match self {
            Self::Int(i) => i
                .checked_abs()
                .map(Self::Int)
                .unwrap_or_else(|| Self::Float((i as f64).abs())),
            Self::Float(f) => Self::Float(f.abs()),
        }
    }

    /// Round to the nearest whole number, with ties going to the even
    /// neighbor. The result is an `Int` whenever it fits.
    pub fn round(self) -> Self {
        match self {
            Self::Int(_) => self,
            Self::Float(f) => {
                let rounded = f.round_ties_even();
                float_as_int(rounded)
                    .map(Self::Int)
                    .unwrap_or(Self::Float(rounded))
            }
        }
    }

    /// Round a float to `digits` decimal places (ties to even). Integers are
    /// returned untouched, and floats stay floats. Precision beyond what an
    /// `f64` can hold leaves the value as is; rounding away every digit gives
    /// zero with the sign kept.
    pub fn round_to(self, digits: i32) -> Self {
        match self {
            Self::Int(_) => self,
            Self::Float(f) => {
                let factor = 10f64.powi(digits);
                if factor == 0.0 {
                    return Self::Float(0.0f64.copysign(f));
                }
                let scaled = f * factor;
                if !factor.is_finite() || !scaled.is_finite() {
                    return self;
                }
                Self::Float(scaled.round_ties_even() / factor)
            }
        }
    }

    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

/// Returns an `Int` if given an `Int`, or a `Float` whose fractional part is
/// zero. Any other `Float` is returned as is.
pub fn float_to_int(num: Scalar) -> Scalar {
    match num.as_int() {
        Some(i) => Scalar::Int(i),
        None => num,
    }
}

/// Linear interpolation between `a` and `b` at `t`: `a + (b - a) * t`. The
/// math is done in floating point, and whole results come back as `Int`.
pub fn linint(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    let (a, b, t) = (a.to_f64(), b.to_f64(), t.to_f64());
    float_to_int(Scalar::Float(a + (b - a) * t))
}

/// [linint] over dynamic values. Fails with a type error if any argument
/// isn't a number.
pub fn lerp(a: &Value, b: &Value, t: &Value) -> Result<Scalar> {
    Ok(linint(
        Scalar::try_from(a)?,
        Scalar::try_from(b)?,
        Scalar::try_from(t)?,
    ))
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => {
                float_as_int(f) == Some(i)
            }
        }
    }
}

impl Eq for Scalar {}

impl PartialEq<i64> for Scalar {
    fn eq(&self, other: &i64) -> bool {
        *self == Self::Int(*other)
    }
}

impl PartialEq<f64> for Scalar {
    fn eq(&self, other: &f64) -> bool {
        *self == Self::Float(*other)
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with PartialEq: whole floats hash like their integer
        match self.as_int() {
            Some(i) => i.hash(state),
            None => {
                let f = self.to_f64();
                let bits = if f.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    f.to_bits()
                };
                bits.hash(state);
            }
        }
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(&b),
            (Self::Float(a), Self::Float(b)) => {
                if self == other {
                    Ordering::Equal
                } else {
                    a.total_cmp(&b)
                }
            }
            (Self::Int(i), Self::Float(f)) => match float_as_int(f) {
                Some(j) => i.cmp(&j),
                None => (i as f64).total_cmp(&f),
            },
            (Self::Float(_), Self::Int(_)) => other.cmp(self).reverse(),
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Implement a binary operator that stays exact for two ints, and falls back
/// to float math on overflow or if either side is a float
macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $checked:ident, $op:tt) => {
        impl ops::$trait for Scalar {
            type Output = Scalar;

            fn $method(self, rhs: Scalar) -> Scalar {
                match (self, rhs) {
                    (Scalar::Int(a), Scalar::Int(b)) => a
                        .$checked(b)
                        .map(Scalar::Int)
                        .unwrap_or_else(|| Scalar::Float(a as f64 $op b as f64)),
                    (a, b) => Scalar::Float(a.to_f64() $op b.to_f64()),
                }
            }
        }
    };
}

impl_scalar_op!(Add, add, checked_add, +);
impl_scalar_op!(Sub, sub, checked_sub, -);
impl_scalar_op!(Mul, mul, checked_mul, *);

impl ops::Div for Scalar {
    type Output = Scalar;

    /// Division is always true division, never integer division
    fn div(self, rhs: Scalar) -> Scalar {
        Scalar::Float(self.to_f64() / rhs.to_f64())
    }
}

impl ops::Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        match self {
            Self::Int(i) => i
                .checked_neg()
                .map(Self::Int)
                .unwrap_or_else(|| Self::Float(-(i as f64))),
            Self::Float(f) => Self::Float(-f),
        }
    }
}

impl Sum for Scalar {
    fn sum<I: Iterator<Item = Scalar>>(iter: I) -> Self {
        iter.fold(Scalar::ZERO, |acc, v| acc + v)
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i16> for Scalar {
    fn from(value: i16) -> Self {
        Self::Int(value.into())
    }
}

impl From<u16> for Scalar {
    fn from(value: u16) -> Self {
        Self::Int(value.into())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Int(i) => Value::from(i),
            Scalar::Float(f) => Value::from(f),
        }
    }
}

impl TryFrom<&Value> for Scalar {
    type Error = HexError;

    /// Only JSON numbers are numeric. Booleans are explicitly **not** numbers.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                // u64 beyond i64 range, or a genuine float
                None => number.as_f64().map(Self::Float).ok_or_else(|| {
                    HexError::type_error(format!(
                        "{} is not a representable number",
                        number
                    ))
                }),
            },
            other => Err(HexError::type_error(format!(
                "expected an integer or float, got {}",
                value_kind(other)
            ))),
        }
    }
}

/// Human-readable name of a dynamic value's type, for error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
