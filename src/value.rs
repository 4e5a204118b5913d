//! Values measured by rules and used as rule thresholds.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Fractional number usable as a map key.
///
/// Equality and hashing work on the bit pattern with every NaN collapsed to
/// one value and `-0.0` folded into `0.0`, so `Eq` and `Hash` agree.
/// Ordering is left to [`Float::get`] and `partial_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct Float(f64);

impl Float {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    fn key(self) -> u64 {
        if self.0.is_nan() {
            f64::NAN.to_bits()
        } else if self.0 == 0.0 {
            0.0f64.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Float {}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Float {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

/// A single text, number or boolean value.
///
/// Integers and fractional numbers are distinct variants: `2` and `2.0`
/// compare equal under the loose policy but are different set members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Scalar {
    Text(String),
    Number(i64),
    Float(Float),
    Bool(bool),
}

impl Scalar {
    /// Numeric view used for loose comparisons across types.
    ///
    /// Booleans count as 0/1, text counts when it parses as a number
    /// (`"2"`, `" 2.5 "`, `"1e3"`).
    pub fn numeric(&self) -> Option<f64> {
        match self {
            // i64 beyond 2^53 loses precision here; same-typed integers never take this path
            Scalar::Number(n) => Some(*n as f64),
            Scalar::Float(x) => Some(x.get()),
            Scalar::Bool(b) => Some(f64::from(u8::from(*b))),
            Scalar::Text(t) => t.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(t) => f.write_str(t),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Measured value or threshold: a scalar or an ordered list of scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum CheckValue {
    Text(String),
    Number(i64),
    Float(Float),
    Bool(bool),
    List(Vec<Scalar>),
}

impl CheckValue {
    /// Returns the value as a scalar, or `None` for lists.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            CheckValue::Text(t) => Some(Scalar::Text(t.clone())),
            CheckValue::Number(n) => Some(Scalar::Number(*n)),
            CheckValue::Float(x) => Some(Scalar::Float(*x)),
            CheckValue::Bool(b) => Some(Scalar::Bool(*b)),
            CheckValue::List(_) => None,
        }
    }

    /// Returns the value as a set of members, wrapping a scalar into a
    /// singleton.
    pub fn members(&self) -> Vec<Scalar> {
        match self {
            CheckValue::List(items) => items.clone(),
            other => other.as_scalar().into_iter().collect(),
        }
    }
}

impl fmt::Display for CheckValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&rendered.join(", "))
            }
            other => match other.as_scalar() {
                Some(s) => fmt::Display::fmt(&s, f),
                None => Ok(()),
            },
        }
    }
}

impl From<Scalar> for CheckValue {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Text(t) => CheckValue::Text(t),
            Scalar::Number(n) => CheckValue::Number(n),
            Scalar::Float(x) => CheckValue::Float(x),
            Scalar::Bool(b) => CheckValue::Bool(b),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => |$v:ident| $scalar:expr, $check:expr;)*) => {
        $(
            impl From<$ty> for Scalar {
                fn from($v: $ty) -> Self {
                    $scalar
                }
            }

            impl From<$ty> for CheckValue {
                fn from($v: $ty) -> Self {
                    $check
                }
            }
        )*
    };
}

impl_from_scalar! {
    i64 => |v| Scalar::Number(v), CheckValue::Number(v);
    i32 => |v| Scalar::Number(i64::from(v)), CheckValue::Number(i64::from(v));
    u32 => |v| Scalar::Number(i64::from(v)), CheckValue::Number(i64::from(v));
    usize => |v| Scalar::Number(saturating_i64(v)), CheckValue::Number(saturating_i64(v));
    f64 => |v| Scalar::Float(Float::new(v)), CheckValue::Float(Float::new(v));
    f32 => |v| Scalar::Float(Float::new(f64::from(v))), CheckValue::Float(Float::new(f64::from(v)));
    bool => |v| Scalar::Bool(v), CheckValue::Bool(v);
    char => |v| Scalar::Text(v.to_string()), CheckValue::Text(v.to_string());
    &str => |v| Scalar::Text(v.to_string()), CheckValue::Text(v.to_string());
    String => |v| Scalar::Text(v), CheckValue::Text(v);
}

impl<T: Into<Scalar>> From<Vec<T>> for CheckValue {
    fn from(items: Vec<T>) -> Self {
        CheckValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar> + Clone> From<&[T]> for CheckValue {
    fn from(items: &[T]) -> Self {
        CheckValue::List(items.iter().cloned().map(Into::into).collect())
    }
}

fn saturating_i64(v: usize) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_view() {
        assert_eq!(Scalar::Number(3).numeric(), Some(3.0));
        assert_eq!(Scalar::from(0.75).numeric(), Some(0.75));
        assert_eq!(Scalar::Bool(true).numeric(), Some(1.0));
        assert_eq!(Scalar::Text(" 42 ".to_string()).numeric(), Some(42.0));
        assert_eq!(Scalar::Text("2.5".to_string()).numeric(), Some(2.5));
        assert_eq!(Scalar::Text("abc".to_string()).numeric(), None);
    }

    #[test]
    fn test_float_equality_and_hash_agree() {
        use std::collections::HashSet;

        assert_eq!(Float::new(0.0), Float::new(-0.0));
        assert_eq!(Float::new(f64::NAN), Float::new(f64::NAN));
        let set: HashSet<Scalar> =
            [Scalar::from(0.0), Scalar::from(-0.0), Scalar::from(f64::NAN), Scalar::from(f64::NAN)]
                .into_iter()
                .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_members_wraps_scalar() {
        assert_eq!(CheckValue::from(2).members(), vec![Scalar::Number(2)]);
        assert_eq!(
            CheckValue::from(vec![1, 2]).members(),
            vec![Scalar::Number(1), Scalar::Number(2)]
        );
    }

    #[test]
    fn test_display_joins_lists() {
        assert_eq!(CheckValue::from(vec!["p", "q", "r"]).to_string(), "p, q, r");
        assert_eq!(CheckValue::from(7).to_string(), "7");
        assert_eq!(CheckValue::from(false).to_string(), "false");
        assert_eq!(CheckValue::from(0.5).to_string(), "0.5");
        assert_eq!(CheckValue::from(vec![1.5, 2.0]).to_string(), "1.5, 2");
    }

    #[test]
    fn test_number_and_text_are_distinct() {
        assert_ne!(CheckValue::from(2), CheckValue::from("2"));
        assert_ne!(CheckValue::from(2), CheckValue::from(2.0));
    }
}
