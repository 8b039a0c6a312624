//! Stock levels and the stock-ratio ranking.
//!
//! The ratio `current / minimum` measures how close an item is to running out:
//! anything below `1.0` is under its minimum. Items are ranked by ascending
//! ratio so the most urgently understocked ones come first.
//!
//! An item whose minimum is zero has no restock threshold. Its ratio is
//! [`StockRatio::Unbounded`] and it sorts after every finite ratio.

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

/// The individual quantities of [`StockLevels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockField {
    Current,
    Ideal,
    Minimum,
}

impl StockField {
    /// Form field name for this quantity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current_stock",
            Self::Ideal => "ideal_stock",
            Self::Minimum => "minimum_stock",
        }
    }
}

/// Errors that can occur when constructing [`StockLevels`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// A quantity is below zero.
    #[error("Must be zero or more.")]
    Negative(StockField),
    /// The minimum exceeds the ideal level.
    #[error("Minimum stock cannot exceed ideal stock.")]
    MinimumAboveIdeal,
}

impl StockError {
    /// The field this error refers to.
    #[must_use]
    pub const fn field(&self) -> StockField {
        match self {
            Self::Negative(field) => *field,
            Self::MinimumAboveIdeal => StockField::Minimum,
        }
    }
}

/// Validated stock quantities for one item.
///
/// ## Invariants
///
/// - `current`, `ideal`, `minimum` are all `>= 0`
/// - `minimum <= ideal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockLevels {
    current: i64,
    ideal: i64,
    minimum: i64,
}

impl StockLevels {
    /// Validate a set of stock quantities.
    ///
    /// # Errors
    ///
    /// Returns every violated rule: negative quantities, and a minimum above the
    /// ideal level.
    pub fn new(current: i64, ideal: i64, minimum: i64) -> Result<Self, Vec<StockError>> {
        let mut errors = Vec::new();
        for (value, field) in [
            (current, StockField::Current),
            (ideal, StockField::Ideal),
            (minimum, StockField::Minimum),
        ] {
            if value < 0 {
                errors.push(StockError::Negative(field));
            }
        }
        if minimum > ideal {
            errors.push(StockError::MinimumAboveIdeal);
        }

        if errors.is_empty() {
            Ok(Self {
                current,
                ideal,
                minimum,
            })
        } else {
            Err(errors)
        }
    }

    /// Rebuild levels from stored values without re-validating.
    ///
    /// The storage layer enforces the same invariants with check constraints.
    #[must_use]
    pub const fn from_stored(current: i64, ideal: i64, minimum: i64) -> Self {
        Self {
            current,
            ideal,
            minimum,
        }
    }

    #[must_use]
    pub const fn current(&self) -> i64 {
        self.current
    }

    #[must_use]
    pub const fn ideal(&self) -> i64 {
        self.ideal
    }

    #[must_use]
    pub const fn minimum(&self) -> i64 {
        self.minimum
    }

    /// The same levels with a new current quantity.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Negative`] if `current` is below zero.
    pub const fn with_current(self, current: i64) -> Result<Self, StockError> {
        if current < 0 {
            return Err(StockError::Negative(StockField::Current));
        }
        Ok(Self { current, ..self })
    }

    /// `current / minimum`, or [`StockRatio::Unbounded`] when the minimum is zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Household quantities are far below 2^52
    pub fn ratio(&self) -> StockRatio {
        if self.minimum == 0 {
            StockRatio::Unbounded
        } else {
            StockRatio::Finite(self.current as f64 / self.minimum as f64)
        }
    }

    /// Whether the current quantity is below the minimum.
    #[must_use]
    pub const fn below_minimum(&self) -> bool {
        self.current < self.minimum
    }

    /// Quantity needed to get back to the ideal level.
    #[must_use]
    pub const fn restock_quantity(&self) -> i64 {
        let missing = self.ideal - self.current;
        if missing > 0 { missing } else { 0 }
    }
}

/// Ratio of current stock to minimum stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StockRatio {
    /// `current / minimum` for a positive minimum.
    Finite(f64),
    /// The minimum is zero, so there is no restock threshold.
    Unbounded,
}

impl StockRatio {
    /// Scarcity ordering: lower finite ratios first, unbounded last.
    #[must_use]
    pub fn cmp_scarcity(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => a.total_cmp(b),
            (Self::Finite(_), Self::Unbounded) => Ordering::Less,
            (Self::Unbounded, Self::Finite(_)) => Ordering::Greater,
            (Self::Unbounded, Self::Unbounded) => Ordering::Equal,
        }
    }
}

impl fmt::Display for StockRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(ratio) => write!(f, "{ratio:.2}"),
            Self::Unbounded => f.write_str("no minimum"),
        }
    }
}

/// Sort `items` by ascending stock ratio.
///
/// The sort is stable: items with equal ratios keep their incoming order, so
/// callers that list items by name get a deterministic tie-break for free.
pub fn rank_by_scarcity<T, F>(items: &mut [T], levels: F)
where
    F: Fn(&T) -> StockLevels,
{
    items.sort_by(|a, b| levels(a).ratio().cmp_scarcity(&levels(b).ratio()));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn levels(current: i64, minimum: i64) -> StockLevels {
        StockLevels::new(current, minimum.max(current), minimum).unwrap()
    }

    #[test]
    fn test_new_rejects_minimum_above_ideal() {
        let errors = StockLevels::new(5, 4, 6).unwrap_err();
        assert_eq!(errors, vec![StockError::MinimumAboveIdeal]);
        assert_eq!(errors[0].field(), StockField::Minimum);
    }

    #[test]
    fn test_new_reports_each_negative_quantity() {
        let errors = StockLevels::new(-1, -2, 0).unwrap_err();
        assert!(errors.contains(&StockError::Negative(StockField::Current)));
        assert!(errors.contains(&StockError::Negative(StockField::Ideal)));
        assert!(errors.contains(&StockError::MinimumAboveIdeal));
    }

    #[test]
    fn test_minimum_equal_to_ideal_is_allowed() {
        assert!(StockLevels::new(0, 3, 3).is_ok());
    }

    #[test]
    fn test_ratio() {
        assert_eq!(levels(2, 10).ratio(), StockRatio::Finite(0.2));
        assert_eq!(levels(5, 0).ratio(), StockRatio::Unbounded);
    }

    #[test]
    fn test_lower_ratio_ranks_first() {
        let mut items = vec![("eggs", levels(8, 10)), ("milk", levels(2, 10))];
        rank_by_scarcity(&mut items, |(_, l)| *l);
        let names: Vec<_> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["milk", "eggs"]);
    }

    #[test]
    fn test_zero_minimum_ranks_last() {
        let mut items = vec![
            ("salt", levels(0, 0)),
            ("flour", levels(50, 1)),
            ("rice", levels(1, 4)),
        ];
        rank_by_scarcity(&mut items, |(_, l)| *l);
        let names: Vec<_> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["rice", "flour", "salt"]);
    }

    #[test]
    fn test_ties_keep_incoming_order() {
        let mut items = vec![
            ("apples", levels(1, 2)),
            ("bananas", levels(2, 4)),
            ("cherries", levels(0, 0)),
            ("dates", levels(3, 0)),
        ];
        rank_by_scarcity(&mut items, |(_, l)| *l);
        let names: Vec<_> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["apples", "bananas", "cherries", "dates"]);
    }

    #[test]
    fn test_restock_quantity_and_below_minimum() {
        let l = StockLevels::new(2, 12, 4).unwrap();
        assert!(l.below_minimum());
        assert_eq!(l.restock_quantity(), 10);

        let full = StockLevels::new(20, 12, 4).unwrap();
        assert!(!full.below_minimum());
        assert_eq!(full.restock_quantity(), 0);
    }

    #[test]
    fn test_with_current() {
        let l = StockLevels::new(2, 12, 4).unwrap();
        assert_eq!(l.with_current(7).unwrap().current(), 7);
        assert_eq!(
            l.with_current(-1),
            Err(StockError::Negative(StockField::Current))
        );
    }

    #[test]
    fn test_ratio_display() {
        assert_eq!(StockRatio::Finite(0.25).to_string(), "0.25");
        assert_eq!(StockRatio::Unbounded.to_string(), "no minimum");
    }
}
