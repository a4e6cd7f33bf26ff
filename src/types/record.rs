//! Catalog record types for the Catalog Discount Engine
//!
//! This module defines the `Record` structure that flows through the discount
//! pipeline, along with the identifier type used to look records up.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::calculator::DiscountTier;

/// Record identifier
///
/// Stable lookup key; no two records share an id.
pub type RecordId = u64;

/// A catalog record
///
/// Serialized to JSON with camelCase keys when published as a change
/// notification. Monetary fields are written as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique record identifier
    pub id: RecordId,

    /// Display name, opaque to the discount pipeline
    pub name: String,

    /// Category label, opaque to the discount pipeline
    pub category: String,

    /// List price, the only input to discount computation
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Whether a non-zero discount tier currently applies
    pub offer_applied: bool,

    /// Applied discount percentage (0 when no offer applies)
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percentage: Decimal,

    /// Price once the discount is taken off
    ///
    /// Equals `price` when no offer applies, otherwise
    /// `price - price * discount_percentage / 100`.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_after_discount: Decimal,
}

impl Record {
    /// Create a record with no offer applied
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Record {
            id,
            name: name.into(),
            category: category.into(),
            price,
            offer_applied: false,
            discount_percentage: Decimal::ZERO,
            price_after_discount: price,
        }
    }

    /// Apply a discount tier to this record
    ///
    /// The discount fields are always cleared first, so a tier of zero leaves
    /// the record in the no-offer state. All three fields are written together
    /// from the same tier, which keeps the record consistent.
    pub fn apply_tier(&mut self, tier: DiscountTier) {
        self.clear_discount();

        let percentage = tier.percentage();
        if percentage > Decimal::ZERO {
            self.offer_applied = true;
            self.discount_percentage = percentage;
            self.price_after_discount =
                self.price - (self.price * percentage / Decimal::ONE_HUNDRED);
        }
    }

    /// Remove any discount from this record
    pub fn clear_discount(&mut self) {
        self.offer_applied = false;
        self.discount_percentage = Decimal::ZERO;
        self.price_after_discount = self.price;
    }

    /// Check the discount invariant
    ///
    /// `offer_applied` must match `discount_percentage > 0`, and
    /// `price_after_discount` must follow from `price` and `discount_percentage`.
    pub fn is_consistent(&self) -> bool {
        if self.offer_applied != (self.discount_percentage > Decimal::ZERO) {
            return false;
        }

        let expected = if self.offer_applied {
            self.price - (self.price * self.discount_percentage / Decimal::ONE_HUNDRED)
        } else {
            self.price
        };

        self.price_after_discount == expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_new_record_has_no_offer() {
        let record = Record::new(7, "Desk", "furniture", dec("450.00"));

        assert!(!record.offer_applied);
        assert_eq!(record.discount_percentage, Decimal::ZERO);
        assert_eq!(record.price_after_discount, dec("450.00"));
        assert!(record.is_consistent());
    }

    #[rstest]
    #[case::premium(DiscountTier::Premium, "1200", true, "10", "1080")]
    #[case::standard(DiscountTier::Standard, "900", true, "5", "855")]
    #[case::none(DiscountTier::None, "300", false, "0", "300")]
    fn test_apply_tier(
        #[case] tier: DiscountTier,
        #[case] price: &str,
        #[case] offer: bool,
        #[case] percentage: &str,
        #[case] after: &str,
    ) {
        let mut record = Record::new(1, "Item", "misc", dec(price));

        record.apply_tier(tier);

        assert_eq!(record.offer_applied, offer);
        assert_eq!(record.discount_percentage, dec(percentage));
        assert_eq!(record.price_after_discount, dec(after));
        assert!(record.is_consistent());
    }

    #[test]
    fn test_apply_zero_tier_clears_stale_discount() {
        let mut record = Record::new(1, "Item", "misc", dec("500"));
        record.offer_applied = true;
        record.discount_percentage = dec("10");
        record.price_after_discount = dec("450");

        record.apply_tier(DiscountTier::None);

        assert!(!record.offer_applied);
        assert_eq!(record.discount_percentage, Decimal::ZERO);
        assert_eq!(record.price_after_discount, dec("500"));
    }

    #[rstest]
    #[case::flag_without_percentage(true, "0", "100")]
    #[case::percentage_without_flag(false, "5", "95")]
    #[case::wrong_discounted_price(true, "10", "95")]
    #[case::stale_price_without_offer(false, "0", "90")]
    fn test_is_consistent_detects_violations(
        #[case] offer: bool,
        #[case] percentage: &str,
        #[case] after: &str,
    ) {
        let mut record = Record::new(1, "Item", "misc", dec("100"));
        record.offer_applied = offer;
        record.discount_percentage = dec(percentage);
        record.price_after_discount = dec(after);

        assert!(!record.is_consistent());
    }

    #[test]
    fn test_json_uses_camel_case_keys_and_numbers() {
        let mut record = Record::new(3, "Laptop", "electronics", dec("1500"));
        record.apply_tier(DiscountTier::Premium);

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["offerApplied"], true);
        assert_eq!(json["discountPercentage"].as_f64(), Some(10.0));
        assert_eq!(json["priceAfterDiscount"].as_f64(), Some(1350.0));
        assert!(json.get("offer_applied").is_none());
    }
}
