//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{Money, Percentage};
use domain_reporting::AccountRow;
use rust_decimal::Decimal;
use std::fmt::Debug;

/// Asserts that two Money values are equal, naming what was compared
///
/// # Panics
///
/// Panics if the amounts differ.
pub fn assert_money_eq(actual: Money, expected: Money, what: &str) {
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "{what}: actual={actual}, expected={expected}"
    );
}

/// Asserts that two Money values are approximately equal within a tolerance
pub fn assert_money_approx_eq(actual: Money, expected: Money, tolerance: Decimal) {
    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts a percentage, expressed on the 0-100 scale, within a tolerance
pub fn assert_percentage_approx(actual: Percentage, expected_percent: Decimal, tolerance: Decimal) {
    let diff = (actual.as_percentage() - expected_percent).abs();
    assert!(
        diff <= tolerance,
        "Percentage differs by more than tolerance: actual={}%, expected={}%, tolerance={}",
        actual.as_percentage(),
        expected_percent,
        tolerance
    );
}

/// Asserts two grids have the same rows with the same figures, in order
///
/// Reports the first differing row rather than the whole grid.
pub fn assert_rows_equal<F: PartialEq + Debug>(actual: &[AccountRow<F>], expected: &[AccountRow<F>]) {
    for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a.id, e.id, "row {index}: account mismatch");
        assert_eq!(a.figures, e.figures, "row {index} ({}): figures differ", a.id);
    }
    assert_eq!(
        actual.len(),
        expected.len(),
        "grids differ in length: actual={}, expected={}",
        actual.len(),
        expected.len()
    );
}
