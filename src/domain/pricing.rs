use serde::Serialize;

/// Credits billed for one classic (retrieval-only) conversational turn.
pub const CLASSIC_TURN_CREDITS: f64 = 1.0;
/// Credits billed for one generative turn.
pub const GENERATIVE_TURN_CREDITS: f64 = 2.0;
/// Credits billed for one agent action (flow or connector invocation).
pub const ACTION_CREDITS: f64 = 5.0;
/// Credits billed per conversation when tenant grounding is switched on.
pub const TENANT_GROUNDING_CREDITS: f64 = 10.0;

/// Lowest per-user monthly seat price the vendor offers.
pub const FLAT_SEAT_PRICE_MIN: f64 = 25.0;
/// Highest per-user monthly seat price the vendor offers.
pub const FLAT_SEAT_PRICE_MAX: f64 = 35.0;

/// Vendor price book all cost models are evaluated against.
///
/// The pay-as-you-go rate, pack price and pack size are fixed list prices.
/// Only the flat seat price is negotiable, within
/// [`FLAT_SEAT_PRICE_MIN`]..=[`FLAT_SEAT_PRICE_MAX`].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PricingConstants {
    pub payg_rate_per_credit: f64,
    pub prepaid_pack_price: f64,
    pub prepaid_pack_credits: f64,
    pub flat_seat_price: f64,
    pub prepaid_discount: f64,
}

impl Default for PricingConstants {
    fn default() -> Self {
        PricingConstants {
            payg_rate_per_credit: 0.01,
            prepaid_pack_price: 200.0,
            prepaid_pack_credits: 25_000.0,
            flat_seat_price: 30.0,
            prepaid_discount: 0.15,
        }
    }
}

impl PricingConstants {
    /// Monthly credit volume per user at which pay-as-you-go billing costs
    /// exactly one flat seat. Derived, never stored.
    pub fn breakeven_credits_per_user(&self) -> f64 {
        self.flat_seat_price / self.payg_rate_per_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_breakeven_is_three_thousand_credits() {
        let pricing = PricingConstants::default();

        assert_eq!(pricing.breakeven_credits_per_user(), 3000.0);
    }

    #[test]
    fn breakeven_follows_the_seat_price() {
        let pricing = PricingConstants {
            flat_seat_price: 25.0,
            ..PricingConstants::default()
        };

        assert_eq!(pricing.breakeven_credits_per_user(), 2500.0);
    }

    #[test]
    fn default_prices_match_the_vendor_list() {
        let pricing = PricingConstants::default();

        assert_eq!(pricing.payg_rate_per_credit, 0.01);
        assert_eq!(pricing.prepaid_pack_price, 200.0);
        assert_eq!(pricing.prepaid_pack_credits, 25_000.0);
        assert_eq!(pricing.flat_seat_price, 30.0);
        assert_eq!(pricing.prepaid_discount, 0.15);
    }
}
