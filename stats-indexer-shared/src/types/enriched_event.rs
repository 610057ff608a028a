use crate::types::RawEvent;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// A raw event plus its on-chain derived value.
///
/// `derived_value` is in whole tokens (exact 18-decimal conversion) and
/// `derivation_block` records the historical block the value was computed
/// as of.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichedEvent {
    pub raw: RawEvent,
    pub derived_value: BigDecimal,
    pub derivation_block: u64,
}

impl EnrichedEvent {
    pub fn date(&self) -> NaiveDate {
        self.raw.date()
    }

    pub fn entity(&self) -> Option<u64> {
        self.raw.entity()
    }
}
