//! Discount tier calculation
//!
//! Maps a price to the discount tier that applies to it. Both thresholds are
//! exclusive: a price of exactly 1000 is in the standard tier and a price of
//! exactly 800 gets no discount.

use rust_decimal::Decimal;

/// Discount tier selected by price thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountTier {
    /// No discount (price up to and including 800)
    None,
    /// 5% off (price above 800, up to and including 1000)
    Standard,
    /// 10% off (price above 1000)
    Premium,
}

impl DiscountTier {
    /// Discount percentage for this tier
    pub fn percentage(self) -> Decimal {
        match self {
            DiscountTier::None => Decimal::ZERO,
            DiscountTier::Standard => Decimal::from(5),
            DiscountTier::Premium => Decimal::TEN,
        }
    }
}

/// Select the discount tier for a price
pub fn tier(price: Decimal) -> DiscountTier {
    if price > Decimal::ONE_THOUSAND {
        DiscountTier::Premium
    } else if price > Decimal::from(800) {
        DiscountTier::Standard
    } else {
        DiscountTier::None
    }
}
