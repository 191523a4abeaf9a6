//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating entry data over a given
//! account tree. Amounts are whole cents so sums stay exact.

use core_kernel::Money;
use domain_accounts::{AccountTree, DottedPath};
use domain_entries::{ExpenseFigures, ExpenseMap, RevenueFigures, RevenueMap};
use proptest::prelude::*;

/// Strategy for non-negative amounts up to ten million
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (0i64..1_000_000_000i64).prop_map(Money::from_cents)
}

/// Strategy for expense figures with `finalistica <= total`
pub fn expense_figures_strategy() -> impl Strategy<Value = ExpenseFigures> {
    (0i64..1_000_000_000i64)
        .prop_flat_map(|total| (Just(total), 0i64..=total))
        .prop_map(|(total, finalistica)| ExpenseFigures::new(Money::from_cents(total), Money::from_cents(finalistica)))
}

/// Strategy for expense figures where finalística may exceed the total
pub fn unchecked_expense_figures_strategy() -> impl Strategy<Value = ExpenseFigures> {
    (money_strategy(), money_strategy()).prop_map(|(total, finalistica)| ExpenseFigures::new(total, finalistica))
}

pub fn revenue_figures_strategy() -> impl Strategy<Value = RevenueFigures> {
    money_strategy().prop_map(RevenueFigures::new)
}

fn leaves(tree: &AccountTree) -> Vec<DottedPath> {
    tree.analytical_accounts().map(|a| a.id.clone()).collect()
}

/// Strategy for an expense map over some subset of `tree`'s analytical accounts
pub fn expense_map_strategy(tree: &AccountTree) -> impl Strategy<Value = ExpenseMap> {
    let ids = leaves(tree);
    prop::collection::vec(prop::option::of(expense_figures_strategy()), ids.len()).prop_map(move |figures| {
        ids.iter()
            .zip(figures)
            .filter_map(|(id, f)| f.map(|f| (id.clone(), f)))
            .collect()
    })
}

/// Strategy for a revenue map over some subset of `tree`'s analytical accounts
pub fn revenue_map_strategy(tree: &AccountTree) -> impl Strategy<Value = RevenueMap> {
    let ids = leaves(tree);
    prop::collection::vec(prop::option::of(revenue_figures_strategy()), ids.len()).prop_map(move |figures| {
        ids.iter()
            .zip(figures)
            .filter_map(|(id, f)| f.map(|f| (id.clone(), f)))
            .collect()
    })
}

/// Strategy for well-formed dotted paths one to five segments deep
pub fn dotted_path_strategy() -> impl Strategy<Value = DottedPath> {
    prop::collection::vec(1u32..20, 1..=5).prop_filter_map("valid path", |segments| {
        DottedPath::from_segments(segments).ok()
    })
}
