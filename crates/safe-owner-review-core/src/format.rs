//! Human-readable rendering of native-coin amounts.
//!
//! All arithmetic stays in `U256`; amounts are never routed through floats.
//! Fractional precision shrinks as the whole part grows, very large amounts
//! get an `M`/`B`/`T` suffix, and anything that rounds to zero at the finest
//! precision is shown as [`PLACEHOLDER`].

use alloy::primitives::U256;

use crate::domain::CostEstimate;

/// Shown before the first estimate lands and for amounts too small to print.
pub const PLACEHOLDER: &str = "< 0.001";
pub const OVERFLOW_LABEL: &str = "> 1000T";

const SUFFIX_FRACTION_DIGITS: u32 = 3;
const OVERFLOW_WHOLE: u64 = 1_000_000_000_000_000;

/// Display precision for one magnitude band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tier {
    /// Power of ten the amount is divided by before rounding (`M` = 6).
    exponent: u32,
    fraction_digits: u32,
    suffix: Option<&'static str>,
}

impl Tier {
    const fn plain(fraction_digits: u32) -> Self {
        Self {
            exponent: 0,
            fraction_digits,
            suffix: None,
        }
    }

    const fn suffixed(exponent: u32, suffix: &'static str) -> Self {
        Self {
            exponent,
            fraction_digits: SUFFIX_FRACTION_DIGITS,
            suffix: Some(suffix),
        }
    }

    fn label(self, scaled: U256) -> String {
        match self.suffix {
            Some(suffix) => format!("{} {suffix}", render(scaled, self.fraction_digits)),
            None if scaled.is_zero() => PLACEHOLDER.to_owned(),
            None => render(scaled, self.fraction_digits),
        }
    }
}

pub fn format_estimate(estimate: &CostEstimate) -> String {
    format_amount(estimate.raw_amount, estimate.unit_decimals)
}

pub fn format_amount(raw: U256, decimals: u8) -> String {
    let decimals = u32::from(decimals);
    let Some(mut tier) = tier_for(whole_units(raw, decimals)) else {
        return OVERFLOW_LABEL.to_owned();
    };

    // Rounding only moves the amount up a band, never down, so this settles.
    loop {
        let Some(scaled) = scale_rounded(raw, decimals + tier.exponent, tier.fraction_digits)
        else {
            return OVERFLOW_LABEL.to_owned();
        };
        let rounded_whole = whole_units(scaled, tier.fraction_digits)
            .saturating_mul(U256::from(10u64.pow(tier.exponent)));
        match tier_for(rounded_whole) {
            None => return OVERFLOW_LABEL.to_owned(),
            Some(carried) if carried != tier => tier = carried,
            Some(_) => return tier.label(scaled),
        }
    }
}

fn pow10(exp: u32) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exp))
}

/// Integer part of `amount / 10^decimals`. Zero once `10^decimals` no longer
/// fits in a `U256`, since every `U256` is below it.
fn whole_units(amount: U256, decimals: u32) -> U256 {
    pow10(decimals).map_or(U256::ZERO, |unit| amount / unit)
}

fn tier_for(whole: U256) -> Option<Tier> {
    if whole >= U256::from(OVERFLOW_WHOLE) {
        return None;
    }
    let tier = match whole.saturating_to::<u64>() {
        0..=999 => Tier::plain(5),
        1_000..=9_999 => Tier::plain(4),
        10_000..=99_999 => Tier::plain(3),
        100_000..=999_999 => Tier::plain(2),
        1_000_000..=9_999_999 => Tier::plain(1),
        10_000_000..=99_999_999 => Tier::plain(0),
        100_000_000..=999_999_999 => Tier::suffixed(6, "M"),
        1_000_000_000..=999_999_999_999 => Tier::suffixed(9, "B"),
        _ => Tier::suffixed(12, "T"),
    };
    Some(tier)
}

/// `raw / 10^decimals`, expressed in units of `10^-digits` and rounded half-up.
fn scale_rounded(raw: U256, decimals: u32, digits: u32) -> Option<U256> {
    if decimals >= digits {
        // A divisor past U256::MAX leaves less than half a unit.
        let Some(divisor) = pow10(decimals - digits) else {
            return Some(U256::ZERO);
        };
        let quotient = raw / divisor;
        let remainder = raw % divisor;
        if !remainder.is_zero() && remainder >= divisor - remainder {
            Some(quotient + U256::from(1u8))
        } else {
            Some(quotient)
        }
    } else {
        raw.checked_mul(pow10(digits - decimals)?)
    }
}

fn render(scaled: U256, digits: u32) -> String {
    let Some(unit) = pow10(digits) else {
        return OVERFLOW_LABEL.to_owned();
    };
    let whole = group_thousands(&(scaled / unit).to_string());
    if digits == 0 {
        return whole;
    }
    let fraction = format!(
        "{:0>width$}",
        (scaled % unit).to_string(),
        width = digits as usize
    );
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole
    } else {
        format!("{whole}.{fraction}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth(raw: u128) -> String {
        format_amount(U256::from(raw), 18)
    }

    #[test]
    fn zero_renders_placeholder() {
        assert_eq!(eth(0), PLACEHOLDER);
    }

    #[test]
    fn dust_below_finest_precision_renders_placeholder() {
        assert_eq!(eth(4_000_000_000_000), PLACEHOLDER);
        assert_eq!(eth(5_000_000_000_000), "0.00001");
    }

    #[test]
    fn small_amounts_keep_five_fraction_digits() {
        assert_eq!(eth(500_000_000_000_000), "0.0005");
        assert_eq!(eth(1_234_567_000_000_000), "0.00123");
        assert_eq!(eth(1_234_565_000_000_000), "0.00123");
        assert_eq!(eth(1_235_000_000_000_000), "0.00124");
        assert_eq!(eth(1_000_000_000_000_000_000), "1");
    }

    #[test]
    fn precision_shrinks_as_whole_part_grows() {
        let one = 1_000_000_000_000_000_000u128;
        assert_eq!(eth(1_234 * one + one / 3), "1,234.3333");
        assert_eq!(eth(12_345 * one + one / 3), "12,345.333");
        assert_eq!(eth(123_456 * one + one / 3), "123,456.33");
        assert_eq!(eth(1_234_567 * one + one / 3), "1,234,567.3");
        assert_eq!(eth(12_345_678 * one + one / 3), "12,345,678");
    }

    #[test]
    fn large_amounts_use_suffixes() {
        let one = U256::from(10u64).pow(U256::from(18u64));
        let amount = |whole: u64| format_amount(U256::from(whole) * one, 18);
        assert_eq!(amount(123_456_789), "123.457 M");
        assert_eq!(amount(2_500_000_000), "2.5 B");
        assert_eq!(amount(7_000_000_000_000), "7 T");
        assert_eq!(amount(1_000_000_000_000_000), OVERFLOW_LABEL);
    }

    #[test]
    fn rounding_can_carry_into_whole_part() {
        assert_eq!(eth(999_999_999_999_999_999), "1");
    }

    #[test]
    fn rounding_carry_moves_amount_into_the_next_tier() {
        let ten_thousandths = |v: u128| v * 100_000_000_000_000;
        // 999.999996 ETH
        assert_eq!(eth(999_999_996_000_000_000_000), "1,000");
        // 99,999,999.6 ETH
        assert_eq!(eth(ten_thousandths(999_999_996_000)), "100 M");
        // 999,999,999.9999 ETH
        assert_eq!(eth(ten_thousandths(9_999_999_999_999)), "1 B");
        // 999,999,999,999.9999 ETH
        assert_eq!(eth(ten_thousandths(9_999_999_999_999_999)), "1 T");
    }

    #[test]
    fn rounding_up_to_the_overflow_threshold_renders_overflow() {
        // 999,999,999,999,999.9999 ETH
        assert_eq!(
            eth(9_999_999_999_999_999_999 * 100_000_000_000_000),
            OVERFLOW_LABEL
        );
    }

    #[test]
    fn amounts_just_below_a_boundary_keep_their_tier() {
        let one = 1_000_000_000_000_000_000u128;
        assert_eq!(eth(99_999_999 * one + one / 3), "99,999,999");
        assert_eq!(eth(999_999_000 * one), "999.999 M");
        assert_eq!(eth(999_999_499 * one), "999.999 M");
        assert_eq!(eth(999_999_500 * one), "1 B");
    }

    #[test]
    fn decimals_beyond_u256_range_are_divided_exactly() {
        assert_eq!(format_amount(U256::MAX, 78), "0.11579");
        assert_eq!(format_amount(U256::MAX, 79), "0.01158");
        assert_eq!(format_amount(U256::MAX, 84), PLACEHOLDER);
    }

    #[test]
    fn low_decimal_units_scale_up() {
        assert_eq!(format_amount(U256::from(150u64), 2), "1.5");
        assert_eq!(format_amount(U256::from(7u64), 0), "7");
    }

    #[test]
    fn oversized_decimals_do_not_panic() {
        assert_eq!(format_amount(U256::MAX, 200), PLACEHOLDER);
        assert_eq!(format_amount(U256::MAX, 0), OVERFLOW_LABEL);
    }
}
