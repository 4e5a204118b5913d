//! Comparison operators and their evaluation over [`CheckValue`]s.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidatorError;
use crate::value::{CheckValue, Scalar};

/// Operator a rule uses to compare its measured value with its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    IsIn,
    IsNotIn,
    ShouldContainAny,
}

pub const COMPARISON_OPERATORS: [ComparisonOperator; 9] = [
    ComparisonOperator::Eq,
    ComparisonOperator::Le,
    ComparisonOperator::Ge,
    ComparisonOperator::Gt,
    ComparisonOperator::Lt,
    ComparisonOperator::Ne,
    ComparisonOperator::IsIn,
    ComparisonOperator::IsNotIn,
    ComparisonOperator::ShouldContainAny,
];

impl ComparisonOperator {
    /// Textual token of the operator, as used in message templates.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::IsIn => "is-in",
            Self::IsNotIn => "is-not-in",
            Self::ShouldContainAny => "should-contain-any",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOperator {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COMPARISON_OPERATORS
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ValidatorError::UnsupportedOperator(s.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ComparisonOperator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Compares `lhs` with `rhs` using `operator`.
///
/// Membership operators use strict typed equality and treat a scalar
/// right-hand side as a singleton set; `should-contain-any` does the same on
/// the left-hand side and checks the two sets intersect.
///
/// `==`, `!=` and the ordering operators use [`loose_cmp`]: values that are
/// incomparable are never equal and never ordered.
pub fn compare(lhs: &CheckValue, operator: ComparisonOperator, rhs: &CheckValue) -> bool {
    use ComparisonOperator::*;

    match operator {
        IsIn => is_member(lhs, rhs),
        IsNotIn => !is_member(lhs, rhs),
        ShouldContainAny => {
            let wanted = rhs.members();
            lhs.members().iter().any(|m| wanted.contains(m))
        }
        Eq => loose_cmp(lhs, rhs) == Some(Ordering::Equal),
        Ne => loose_cmp(lhs, rhs) != Some(Ordering::Equal),
        Lt => loose_cmp(lhs, rhs) == Some(Ordering::Less),
        Le => matches!(loose_cmp(lhs, rhs), Some(Ordering::Less | Ordering::Equal)),
        Gt => loose_cmp(lhs, rhs) == Some(Ordering::Greater),
        Ge => matches!(loose_cmp(lhs, rhs), Some(Ordering::Greater | Ordering::Equal)),
    }
}

fn is_member(lhs: &CheckValue, rhs: &CheckValue) -> bool {
    match lhs.as_scalar() {
        Some(needle) => rhs.members().contains(&needle),
        // a list is never a member of a set of scalars
        None => false,
    }
}

/// Orders two values under the loose coercion policy.
///
/// Same-typed scalars order naturally (text by code point). Mixed scalars
/// order numerically when both have a [`Scalar::numeric`] view, so `"2.5"`
/// orders above `2` and `2 == 2.0` holds. Lists are
/// only ever `Equal` to an element-wise equal list. Everything else is
/// incomparable (`None`).
pub fn loose_cmp(lhs: &CheckValue, rhs: &CheckValue) -> Option<Ordering> {
    match (lhs, rhs) {
        (CheckValue::List(a), CheckValue::List(b)) => {
            let equal = a.len() == b.len()
                && a.iter().zip(b).all(|(x, y)| scalar_cmp(x, y) == Some(Ordering::Equal));
            equal.then_some(Ordering::Equal)
        }
        (CheckValue::List(_), _) | (_, CheckValue::List(_)) => None,
        _ => scalar_cmp(&lhs.as_scalar()?, &rhs.as_scalar()?),
    }
}

fn scalar_cmp(lhs: &Scalar, rhs: &Scalar) -> Option<Ordering> {
    match (lhs, rhs) {
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(b)),
        (Scalar::Number(a), Scalar::Number(b)) => Some(a.cmp(b)),
        (Scalar::Bool(a), Scalar::Bool(b)) => Some(a.cmp(b)),
        // NaN on either side is incomparable
        _ => lhs.numeric()?.partial_cmp(&rhs.numeric()?),
    }
}
