//! Exact probabilities and probability distributions over states.

use crate::error::{LinResult, LinearisationError};
use num::rational::BigRational;
use num::{BigInt, One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

/// A probability in `[0, 1]`, kept exactly and in lowest terms.
///
/// Serialized as a fraction string such as `"1/3"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Probability(BigRational);

impl Probability {
    /// `numerator / denominator`; `None` for a zero denominator or a value
    /// above one.
    pub fn new(numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        Self::from_ratio(BigRational::new(
            BigInt::from(numerator),
            BigInt::from(denominator),
        ))
    }

    fn from_ratio(r: BigRational) -> Option<Self> {
        if r < BigRational::zero() || r > BigRational::one() {
            None
        } else {
            Some(Self(r))
        }
    }

    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn one() -> Self {
        Self(BigRational::one())
    }

    pub fn numerator(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denominator(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// `self + rhs`, or `None` if the sum exceeds one.
    pub fn checked_add(&self, rhs: &Probability) -> Option<Probability> {
        Self::from_ratio(&self.0 + &rhs.0)
    }
}

impl Mul for Probability {
    type Output = Probability;

    fn mul(self, rhs: Probability) -> Probability {
        Probability(self.0 * rhs.0)
    }
}

impl FromStr for Probability {
    type Err = LinearisationError;

    fn from_str(s: &str) -> LinResult<Self> {
        let invalid = || LinearisationError::InvalidProbability {
            value: s.to_string(),
        };
        let r: BigRational = s.parse().map_err(|_| invalid())?;
        Self::from_ratio(r).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Probability {
    type Error = LinearisationError;

    fn try_from(s: String) -> LinResult<Self> {
        s.parse()
    }
}

impl From<Probability> for String {
    fn from(p: Probability) -> String {
        p.to_string()
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.denom().is_one() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

fn total<S>(entries: &[(S, Probability)]) -> BigRational {
    entries
        .iter()
        .fold(BigRational::zero(), |acc, (_, p)| acc + &p.0)
}

/// A finite distribution over states.
///
/// The probabilities always add up to exactly one. Deserializing checks this
/// and merges entries for equal states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<(S, Probability)>",
    into = "Vec<(S, Probability)>",
    bound(
        serialize = "S: Serialize + Clone",
        deserialize = "S: Deserialize<'de> + PartialEq"
    )
)]
pub struct ProbabilisticState<S> {
    entries: Vec<(S, Probability)>,
}

impl<S: PartialEq> ProbabilisticState<S> {
    pub fn new(entries: Vec<(S, Probability)>) -> Self {
        let result = Self { entries };
        debug_assert!(result.is_distribution(), "probabilities must add up to one");
        result
    }

    /// Like `new`, but reports a non-distribution as an error.
    pub fn try_new(entries: Vec<(S, Probability)>) -> LinResult<Self> {
        let sum = total(&entries);
        if !sum.is_one() {
            return Err(LinearisationError::NotADistribution {
                total: Probability(sum).to_string(),
            });
        }
        Ok(Self { entries })
    }

    /// The Dirac distribution on `state`.
    pub fn single(state: S) -> Self {
        Self {
            entries: vec![(state, Probability::one())],
        }
    }

    fn is_distribution(&self) -> bool {
        total(&self.entries).is_one()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &Probability)> {
        self.entries.iter().map(|(s, p)| (s, p))
    }

    /// Merge entries for equal states, adding their probabilities. The first
    /// occurrence of each state keeps its position.
    pub fn shrink(&mut self) {
        let mut merged: Vec<(S, Probability)> = Vec::with_capacity(self.entries.len());
        for (state, p) in self.entries.drain(..) {
            match merged.iter_mut().find(|(s, _)| *s == state) {
                Some((_, q)) => q.0 = &q.0 + &p.0,
                None => merged.push((state, p)),
            }
        }
        self.entries = merged;
        debug_assert!(self.is_distribution(), "probabilities must add up to one");
    }
}

impl<S: PartialEq> TryFrom<Vec<(S, Probability)>> for ProbabilisticState<S> {
    type Error = LinearisationError;

    fn try_from(entries: Vec<(S, Probability)>) -> LinResult<Self> {
        let mut result = Self::try_new(entries)?;
        result.shrink();
        Ok(result)
    }
}

impl<S> From<ProbabilisticState<S>> for Vec<(S, Probability)> {
    fn from(state: ProbabilisticState<S>) -> Self {
        state.entries
    }
}
