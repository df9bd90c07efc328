use derive_more::{Display, Error};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// decimals shown for money totals
const CENT_PLACES: u32 = 2;

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub(crate) enum AmountError {
    #[display("no amount given")]
    Empty,
    #[display("{input} is not a plain decimal number")]
    Malformed { input: String },
}

/// Parse a plain decimal literal such as `3.50` or `-2`.
///
/// Scientific notation, thousands separators and locale formats are rejected.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    if input.is_empty() {
        return Err(AmountError::Empty);
    }
    let digits = input.strip_prefix(['-', '+']).unwrap_or(input);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let well_formed = is_digits(whole)
        && fraction.map_or(true, is_digits)
        && (!whole.is_empty() || fraction.is_some_and(|f| !f.is_empty()));
    if !well_formed {
        return Err(AmountError::Malformed {
            input: input.to_string(),
        });
    }
    // range overflow and excess precision are left to the decimal parser
    Decimal::from_str(input).map_err(|_| AmountError::Malformed {
        input: input.to_string(),
    })
}

/// Round to whole cents, halves away from zero.
pub(crate) fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
