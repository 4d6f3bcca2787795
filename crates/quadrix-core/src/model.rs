//! Core data model types for quadrix.
//!
//! Users own equation sets, equation sets own equations, and each equation
//! carries at most one recorded answer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::generator;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a registered user.
    UserId
);
uuid_id!(
    /// Identifier of an equation set.
    SetId
);
uuid_id!(
    /// Opaque identity of an equation, unique within its set.
    EquationId
);

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique login.
    pub login: String,
    pub created_at: DateTime<Utc>,
}

/// One batch of equations created by a single generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationSet {
    pub id: SetId,
    pub owner: UserId,
    /// Only used to find a user's most recent set.
    pub created_at: DateTime<Utc>,
}

/// A monic quadratic `x² + bx + c = 0` with known real roots.
///
/// The coefficients are never stored: they are derived from the roots, and
/// `text` is their canonical rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    pub id: EquationId,
    /// Canonical text, e.g. `x² + 2.00x - 15.00 = 0`.
    pub text: String,
    pub root1: f64,
    pub root2: f64,
}

impl Equation {
    /// Build an equation from two roots, truncating them toward zero to
    /// hundredths first.
    pub fn from_roots(id: EquationId, root1: f64, root2: f64) -> Self {
        let root1 = generator::truncate_hundredths(root1);
        let root2 = generator::truncate_hundredths(root2);
        let (b, c) = coefficients(root1, root2);
        Self {
            id,
            text: generator::render_equation(b, c),
            root1,
            root2,
        }
    }

    /// The `(b, c)` coefficients of `x² + bx + c`.
    pub fn coefficients(&self) -> (f64, f64) {
        coefficients(self.root1, self.root2)
    }

    /// The true roots in stored order.
    pub fn roots(&self) -> (f64, f64) {
        (self.root1, self.root2)
    }
}

fn coefficients(root1: f64, root2: f64) -> (f64, f64) {
    (-(root1 + root2), root1 * root2)
}

/// A user's submitted root pair for one equation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub root1: f64,
    pub root2: f64,
}

impl Answer {
    pub fn new(root1: f64, root2: f64) -> Self {
        Self { root1, root2 }
    }

    /// Reject NaN and infinities, which would silently fail every tolerance
    /// comparison.
    pub fn validate(&self, equation: EquationId) -> Result<(), QuizError> {
        if self.root1.is_finite() && self.root2.is_finite() {
            Ok(())
        } else {
            Err(QuizError::InvalidAnswer {
                equation,
                root1: self.root1,
                root2: self.root2,
            })
        }
    }

    pub fn values(&self) -> (f64, f64) {
        (self.root1, self.root2)
    }
}

/// An equation together with whatever answer was recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredEquation {
    pub equation: Equation,
    #[serde(default)]
    pub answer: Option<Answer>,
}

/// Display entry of an equation listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationItem {
    /// 1-based position in the set, not the equation's identity.
    pub id: usize,
    pub equation: String,
}

/// An equation set as shown to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetListing {
    pub set_id: SetId,
    pub count: usize,
    pub list: Vec<EquationItem>,
    /// Persistence ids in display order; `equation_ids[i]` belongs to
    /// `list[i]`.
    #[serde(skip)]
    pub equation_ids: Vec<EquationId>,
}

impl SetListing {
    pub fn from_equations(set_id: SetId, equations: &[Equation]) -> Self {
        Self {
            set_id,
            count: equations.len(),
            list: equations
                .iter()
                .enumerate()
                .map(|(i, eq)| EquationItem {
                    id: i + 1,
                    equation: eq.text.clone(),
                })
                .collect(),
            equation_ids: equations.iter().map(|eq| eq.id).collect(),
        }
    }

    /// Resolve a 1-based display id to the equation's identity.
    pub fn resolve(&self, display_id: usize) -> Option<EquationId> {
        display_id
            .checked_sub(1)
            .and_then(|i| self.equation_ids.get(i))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_roots_truncates_and_renders() {
        let eq = Equation::from_roots(EquationId::new(), 3.0, -5.0);
        assert_eq!(eq.text, "x² + 2.00x - 15.00 = 0");
        assert_eq!(eq.coefficients(), (2.0, -15.0));
    }

    #[test]
    fn from_roots_truncates_toward_zero() {
        let eq = Equation::from_roots(EquationId::new(), 1.239, -1.239);
        assert_eq!(eq.roots(), (1.23, -1.23));
    }

    #[test]
    fn answer_validation_rejects_non_finite() {
        let id = EquationId::new();
        assert!(Answer::new(1.0, 2.0).validate(id).is_ok());
        assert!(matches!(
            Answer::new(f64::NAN, 2.0).validate(id),
            Err(QuizError::InvalidAnswer { .. })
        ));
        assert!(Answer::new(1.0, f64::INFINITY).validate(id).is_err());
        assert!(Answer::new(f64::NEG_INFINITY, 0.0).validate(id).is_err());
    }

    #[test]
    fn listing_resolves_display_ids() {
        let eqs = vec![
            Equation::from_roots(EquationId::new(), 1.0, 2.0),
            Equation::from_roots(EquationId::new(), 3.0, 4.0),
        ];
        let listing = SetListing::from_equations(SetId::new(), &eqs);
        assert_eq!(listing.count, 2);
        assert_eq!(listing.list[1].id, 2);
        assert_eq!(listing.resolve(1), Some(eqs[0].id));
        assert_eq!(listing.resolve(2), Some(eqs[1].id));
        assert_eq!(listing.resolve(0), None);
        assert_eq!(listing.resolve(3), None);
    }

    #[test]
    fn ids_parse_and_display() {
        let id = SetId::new();
        let parsed: SetId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn equation_serde_roundtrip() {
        let eq = Equation::from_roots(EquationId::new(), -0.5, 7.25);
        let json = serde_json::to_string(&eq).unwrap();
        let back: Equation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, eq);
    }
}
