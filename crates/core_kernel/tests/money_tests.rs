//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic, parsing and percentage shares.

use core_kernel::{Money, MoneyError, Percentage};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789));
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_zero_is_default() {
        assert_eq!(Money::default(), Money::zero());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_negative_amount_creation() {
        let m = Money::new(dec!(-100.00));
        assert!(m.is_negative());
        assert!(!m.is_positive());
        assert_eq!(m.abs(), Money::new(dec!(100)));
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_add_assign_accumulates() {
        let mut acc = Money::zero();
        acc += Money::new(dec!(100));
        acc += Money::new(dec!(50));
        assert_eq!(acc, Money::new(dec!(150)));
    }

    #[test]
    fn test_apoio_style_subtraction_can_go_negative() {
        let total = Money::new(dec!(50));
        let finalistica = Money::new(dec!(80));
        assert_eq!(total - finalistica, Money::new(dec!(-30)));
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        let max = Money::new(rust_decimal::Decimal::MAX);
        assert_eq!(max.checked_add(&Money::new(dec!(1))), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_round_to_cents_uses_bankers_rounding() {
        assert_eq!(Money::new(dec!(2.345)).round_to_cents(), Money::new(dec!(2.34)));
        assert_eq!(Money::new(dec!(2.355)).round_to_cents(), Money::new(dec!(2.36)));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_blank_input_is_zero() {
        assert_eq!("   ".parse::<Money>().unwrap(), Money::zero());
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let err = "12,5".parse::<Money>().unwrap_err();
        assert!(matches!(err, MoneyError::InvalidAmount(_)));
    }
}

mod percentage {
    use super::*;

    #[test]
    fn test_share_of_zero_whole_is_zero() {
        let pct = Percentage::of(Money::new(dec!(0)), Money::zero());
        assert!(pct.is_zero());
    }

    #[test]
    fn test_negative_part_gives_negative_share() {
        let pct = Percentage::of(Money::new(dec!(-30)), Money::new(dec!(50)));
        assert_eq!(pct.as_percentage(), dec!(-60));
    }

    #[test]
    fn test_from_percentage() {
        assert_eq!(Percentage::from_percentage(dec!(25)).as_decimal(), dec!(0.25));
    }
}
