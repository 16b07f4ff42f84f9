use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::{
    offer::{DiscountOperator, EligibilityOperator, Offer},
    product::{Product, ProductCode},
};
use crate::errors::PricingError;

pub const CURRENCY_SYMBOL: &str = "£";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePricing {
    pub code: ProductCode,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub list_subtotal: Decimal,
    pub applied_offer: Option<Offer>,
    pub subtotal: Decimal,
    pub discount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketPricing {
    pub lines: Vec<LinePricing>,
    pub unrounded_total: Decimal,
    pub total: Decimal,
    pub formatted_total: String,
}

pub fn is_offer_eligible(offer: &Offer, quantity: u32) -> bool {
    match &offer.operator {
        EligibilityOperator::AtLeast => quantity >= offer.quantity,
        EligibilityOperator::EveryN => {
            quantity.checked_div(offer.quantity).is_some_and(|groups| groups > 0)
        }
        EligibilityOperator::Unrecognized(_) => false,
    }
}

pub fn find_applicable_offer(offers: &[Offer], quantity: u32) -> Option<&Offer> {
    offers.iter().find(|offer| is_offer_eligible(offer, quantity))
}

/// Price of `quantity` units of `product` with `offer` applied.
///
/// Eligibility is not re-checked here; callers pick the offer with
/// [`find_applicable_offer`] first.
pub fn compute_offer_price(
    offer: &Offer,
    product: &Product,
    quantity: u32,
) -> Result<Decimal, PricingError> {
    match &offer.discount_operator {
        DiscountOperator::BundlePrice => {
            if offer.quantity == 0 {
                return Err(PricingError::InvalidOfferQuantity { code: product.code.clone() });
            }
            let groups = quantity / offer.quantity;
            let remainder = quantity % offer.quantity;
            product.list_price(groups + remainder)
        }
        DiscountOperator::FlatAmountOff => {
            let overflow = || PricingError::AmountOverflow { code: product.code.clone() };
            let list = product.list_price(quantity)?;
            let discount =
                offer.discount.checked_mul(Decimal::from(quantity)).ok_or_else(overflow)?;
            list.checked_sub(discount).ok_or_else(overflow)
        }
        DiscountOperator::Unrecognized(operator) => {
            Err(PricingError::UnrecognizedDiscountOperator {
                code: product.code.clone(),
                operator: operator.clone(),
            })
        }
    }
}

/// Subtotal for one product line: the first eligible offer, or list price.
pub fn price_line(product: &Product, quantity: u32) -> Result<LinePricing, PricingError> {
    let list_subtotal = product.list_price(quantity)?;
    let applied_offer = find_applicable_offer(&product.offers, quantity);
    let subtotal = match applied_offer {
        Some(offer) => compute_offer_price(offer, product, quantity)?,
        None => list_subtotal,
    };

    Ok(LinePricing {
        code: product.code.clone(),
        quantity,
        unit_price: product.price,
        list_subtotal,
        applied_offer: applied_offer.cloned(),
        subtotal,
        discount: list_subtotal
            .checked_sub(subtotal)
            .ok_or_else(|| PricingError::AmountOverflow { code: product.code.clone() })?,
    })
}

/// Adds one line subtotal to a running sum, attributing overflow to `code`.
pub fn accumulate(
    sum: Decimal,
    subtotal: Decimal,
    code: &ProductCode,
) -> Result<Decimal, PricingError> {
    sum.checked_add(subtotal).ok_or_else(|| PricingError::AmountOverflow { code: code.clone() })
}

/// Two decimal places, midpoints rounded away from zero.
pub fn round_total(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = round_total(amount);
    rounded.rescale(2);
    format!("{CURRENCY_SYMBOL}{rounded}")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{
        accumulate, compute_offer_price, find_applicable_offer, format_currency,
        is_offer_eligible, price_line, round_total,
    };
    use crate::domain::offer::{DiscountOperator, EligibilityOperator, Offer};
    use crate::domain::product::Product;
    use crate::errors::PricingError;

    fn flat_off() -> Offer {
        Offer::flat_amount_off_at_least(3, Decimal::new(50, 2))
    }

    fn bundle() -> Offer {
        Offer::bundle_every(2)
    }

    fn product(offers: Vec<Offer>) -> Product {
        Product { offers, ..Product::new("PRODUCT1", Decimal::ONE) }
    }

    #[test]
    fn at_least_applies_from_threshold() {
        let offer = flat_off();

        assert!(!is_offer_eligible(&offer, 2));
        assert!(is_offer_eligible(&offer, 3));
        assert!(is_offer_eligible(&offer, 4));
    }

    #[test]
    fn every_n_requires_one_full_group() {
        let offer = Offer { quantity: 3, ..bundle() };

        for quantity in 0..3 {
            assert!(!is_offer_eligible(&offer, quantity), "quantity {quantity}");
        }
        assert!(is_offer_eligible(&offer, 3));
        assert!(is_offer_eligible(&offer, 7));
    }

    #[test]
    fn every_n_with_zero_divisor_never_applies() {
        let offer = Offer { quantity: 0, ..bundle() };

        assert!(!is_offer_eligible(&offer, 0));
        assert!(!is_offer_eligible(&offer, 10));
    }

    #[test]
    fn unrecognized_operator_is_never_eligible() {
        let offer = Offer {
            operator: EligibilityOperator::Unrecognized("UNDEFINED_OPERATOR".to_string()),
            ..flat_off()
        };

        for quantity in [0, 1, 3, 100, u32::MAX] {
            assert!(!is_offer_eligible(&offer, quantity));
        }
    }

    #[test]
    fn first_eligible_offer_wins() {
        let offers = vec![flat_off(), bundle()];

        assert_eq!(find_applicable_offer(&offers, 2), Some(&offers[1]));
        assert_eq!(find_applicable_offer(&offers, 4), Some(&offers[0]));
        assert_eq!(find_applicable_offer(&offers, 1), None);
        assert_eq!(find_applicable_offer(&[], 5), None);
    }

    #[test]
    fn bundle_price_charges_one_unit_per_group_plus_remainder() {
        let product = product(vec![bundle()]);

        assert_eq!(compute_offer_price(&bundle(), &product, 2), Ok(Decimal::ONE));
        assert_eq!(compute_offer_price(&bundle(), &product, 3), Ok(Decimal::TWO));
        assert_eq!(compute_offer_price(&bundle(), &product, 4), Ok(Decimal::TWO));
    }

    #[test]
    fn flat_amount_off_discounts_every_unit() {
        let product = product(vec![flat_off()]);

        assert_eq!(compute_offer_price(&flat_off(), &product, 3), Ok(Decimal::new(150, 2)));
    }

    #[test]
    fn unrecognized_discount_operator_fails() {
        let offer = Offer {
            discount_operator: DiscountOperator::Unrecognized("*".to_string()),
            ..flat_off()
        };
        let product = product(vec![offer.clone()]);

        assert_eq!(
            compute_offer_price(&offer, &product, 3),
            Err(PricingError::UnrecognizedDiscountOperator {
                code: "PRODUCT1".into(),
                operator: "*".to_string(),
            })
        );
    }

    #[test]
    fn bundle_with_zero_quantity_fails() {
        let offer = Offer { quantity: 0, ..bundle() };
        let product = product(vec![]);

        assert!(matches!(
            compute_offer_price(&offer, &product, 3),
            Err(PricingError::InvalidOfferQuantity { .. })
        ));
    }

    #[test]
    fn price_line_reports_discount_against_list_price() {
        let line = price_line(&product(vec![flat_off(), bundle()]), 3).expect("priced line");

        assert_eq!(line.list_subtotal, Decimal::new(3, 0));
        assert_eq!(line.subtotal, Decimal::new(150, 2));
        assert_eq!(line.discount, Decimal::new(150, 2));
        assert_eq!(line.applied_offer, Some(flat_off()));
    }

    #[test]
    fn price_line_without_offer_uses_list_price() {
        let line = price_line(&product(vec![]), 2).expect("priced line");

        assert_eq!(line.subtotal, Decimal::TWO);
        assert_eq!(line.discount, Decimal::ZERO);
        assert!(line.applied_offer.is_none());
    }

    #[test]
    fn flat_amount_off_overflow_is_an_error() {
        let offer = Offer::flat_amount_off_at_least(1, Decimal::ZERO);
        let product = Product::new("BIG", Decimal::MAX).with_offer(offer.clone());

        assert_eq!(
            compute_offer_price(&offer, &product, 2),
            Err(PricingError::AmountOverflow { code: "BIG".into() })
        );
    }

    #[test]
    fn bundle_price_overflow_is_an_error() {
        let product = Product::new("BIG", Decimal::MAX);

        // 5 units in pairs bill as 3 units
        assert_eq!(
            compute_offer_price(&bundle(), &product, 5),
            Err(PricingError::AmountOverflow { code: "BIG".into() })
        );
        assert_eq!(compute_offer_price(&bundle(), &product, 2), Ok(Decimal::MAX));
    }

    #[test]
    fn accumulate_reports_overflowing_line() {
        assert_eq!(
            accumulate(Decimal::MAX, Decimal::ONE, &"LAST".into()),
            Err(PricingError::AmountOverflow { code: "LAST".into() })
        );
        assert_eq!(accumulate(Decimal::ONE, Decimal::ONE, &"A".into()), Ok(Decimal::TWO));
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_total(Decimal::new(2345, 3)), Decimal::new(235, 2));
        assert_eq!(round_total(Decimal::new(2344, 3)), Decimal::new(234, 2));
        assert_eq!(round_total(Decimal::new(-2345, 3)), Decimal::new(-235, 2));
    }

    #[test]
    fn currency_always_has_two_decimals() {
        assert_eq!(format_currency(Decimal::ZERO), "£0.00");
        assert_eq!(format_currency(Decimal::new(25, 1)), "£2.50");
        assert_eq!(format_currency(Decimal::new(2345, 3)), "£2.35");
        assert_eq!(format_currency(Decimal::new(1934, 2)), "£19.34");
    }
}
