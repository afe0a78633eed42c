//! Comprehensive unit tests for the Money module
//!
//! Tests cover money creation, arithmetic operations, currency handling,
//! serialization, and edge cases.

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::USD);
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::USD);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_minor_converts_cents_correctly() {
        let m = Money::from_minor(10050, Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_from_minor_handles_jpy_no_decimals() {
        let m = Money::from_minor(10000, Currency::JPY);
        assert_eq!(m.amount(), dec!(10000));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_addition_same_currency() {
        let a = Money::new(dec!(100.25), Currency::USD);
        let b = Money::new(dec!(49.75), Currency::USD);
        assert_eq!((a + b).amount(), dec!(150.00));
    }

    #[test]
    fn test_subtraction_can_go_negative() {
        let a = Money::new(dec!(50), Currency::USD);
        let b = Money::new(dec!(75), Currency::USD);
        let diff = a - b;
        assert!(diff.is_negative());
        assert_eq!(diff.amount(), dec!(-25));
    }

    #[test]
    fn test_checked_add_rejects_currency_mismatch() {
        let usd = Money::new(dec!(1), Currency::USD);
        let gbp = Money::new(dec!(1), Currency::GBP);
        assert!(matches!(
            usd.checked_add(&gbp),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn test_checked_sub_rejects_currency_mismatch() {
        let usd = Money::new(dec!(1), Currency::USD);
        let inr = Money::new(dec!(1), Currency::INR);
        assert!(matches!(
            usd.checked_sub(&inr),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn test_abs_of_negative() {
        let m = Money::new(dec!(-42.42), Currency::USD);
        assert_eq!(m.abs().amount(), dec!(42.42));
    }

    #[test]
    fn test_exact_equality_no_tolerance() {
        let a = Money::new(dec!(100.0001), Currency::USD);
        let b = Money::new(dec!(100.0002), Currency::USD);
        assert_ne!(a, b);
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency_two_places() {
        let m = Money::new(dec!(10.006), Currency::USD).round_to_currency();
        assert_eq!(m.amount(), dec!(10.01));
    }

    #[test]
    fn test_round_to_currency_jpy_zero_places() {
        let m = Money::new(dec!(100.4), Currency::JPY).round_to_currency();
        assert_eq!(m.amount(), dec!(100));
    }

    #[test]
    fn test_bankers_rounding_half_to_even() {
        assert_eq!(
            Money::new(dec!(0.125), Currency::USD)
                .round_bankers(2)
                .amount(),
            dec!(0.12)
        );
        assert_eq!(
            Money::new(dec!(0.135), Currency::USD)
                .round_bankers(2)
                .amount(),
            dec!(0.14)
        );
    }
}

mod display_and_serde {
    use super::*;

    #[test]
    fn test_display_includes_currency_code() {
        let m = Money::new(dec!(1234.5), Currency::USD);
        assert_eq!(m.to_string(), "USD 1234.50");
    }

    #[test]
    fn test_display_jpy_without_decimals() {
        let m = Money::new(dec!(5000), Currency::JPY);
        assert_eq!(m.to_string(), "JPY 5000");
    }

    #[test]
    fn test_serde_round_trip() {
        let m = Money::new(dec!(99.99), Currency::EUR);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
    }
}
