//! Property tests for cell normalization.

use autodocs_transform::{format_as_decimal, normalize_phone, trim_numeric_suffix};
use proptest::prelude::*;

proptest! {
    #[test]
    fn whole_floats_lose_marker(n in 0u64..10_000_000_000) {
        prop_assert_eq!(trim_numeric_suffix(&format!("{n}.0")), n.to_string());
    }

    #[test]
    fn values_without_marker_are_only_trimmed(s in "[ ]{0,2}[A-Za-z0-9'.-]{0,12}[A-Za-z1-9'-][ ]{0,2}") {
        prop_assert_eq!(trim_numeric_suffix(&s), s.trim());
    }

    #[test]
    fn decimal_formatting_is_stable(n in -1_000_000i64..1_000_000) {
        let once = format_as_decimal(&n.to_string());
        prop_assert_eq!(&once, &format!("{n}.0"));
        prop_assert_eq!(format_as_decimal(&once), once);
    }

    #[test]
    fn phone_never_starts_with_two_stripped_zeros(digits in "[1-9][0-9]{6,11}") {
        let with_prefix = format!("0{digits}");
        prop_assert_eq!(normalize_phone(&with_prefix), digits.clone());
        prop_assert_eq!(normalize_phone(&digits), digits);
    }
}

#[test]
fn documented_examples() {
    assert_eq!(trim_numeric_suffix("12.0"), "12");
    assert_eq!(trim_numeric_suffix("12.50"), "12.50");
    assert_eq!(trim_numeric_suffix(""), "");
    assert_eq!(format_as_decimal("5"), "5.0");
    assert_eq!(format_as_decimal(""), "");
    assert_eq!(format_as_decimal("abc"), "abc");
    assert_eq!(normalize_phone("01234567890"), "1234567890");
    assert_eq!(normalize_phone("1234"), "1234");
}
