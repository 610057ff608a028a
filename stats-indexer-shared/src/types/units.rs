use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use bigdecimal::num_bigint::BigInt;

/// Decimals of the tracked token; amounts on chain are integers scaled by
/// 10^18.
pub const TOKEN_DECIMALS: i64 = 18;

/// Converts a raw on-chain amount to whole tokens, exactly.
///
/// The conversion goes through arbitrary-precision integers so 18-decimal
/// amounts round-trip without loss; binary floating point is never involved.
pub fn to_tokens(amount: U256) -> BigDecimal {
    let digits = BigInt::parse_bytes(amount.to_string().as_bytes(), 10)
        .unwrap_or_else(|| BigInt::from(0));
    BigDecimal::new(digits, TOKEN_DECIMALS)
}
