use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::cpq::catalog::Catalog;
use crate::cpq::pricing::{self, BasketPricing, LinePricing};
use crate::domain::offer::Offer;
use crate::domain::product::{Product, ProductCode};
use crate::errors::PricingError;

/// Running count of purchased product codes, priced against a borrowed catalog.
///
/// Codes are only resolved against the catalog when a subtotal or total is
/// requested, so `add` accepts any code.
#[derive(Clone, Debug)]
pub struct Basket<'a> {
    catalog: &'a Catalog,
    items: HashMap<ProductCode, u32>,
}

impl<'a> Basket<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog, items: HashMap::new() }
    }

    /// Counts one more unit of `code`. The count saturates at `u32::MAX`.
    pub fn add(&mut self, code: impl Into<ProductCode>) {
        let code = code.into();
        let quantity = self.items.entry(code.clone()).or_insert(0);
        *quantity = quantity.saturating_add(1);

        debug!(
            event_name = "basket.item.added",
            product_code = code.as_str(),
            quantity = *quantity,
            "item added to basket"
        );
    }

    pub fn items(&self) -> &HashMap<ProductCode, u32> {
        &self.items
    }

    pub fn quantity(&self, code: &ProductCode) -> u32 {
        self.items.get(code).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_offer_eligible(&self, offer: &Offer, quantity: u32) -> bool {
        pricing::is_offer_eligible(offer, quantity)
    }

    pub fn product(&self, code: &ProductCode) -> Result<&'a Product, PricingError> {
        self.catalog.find(code).ok_or_else(|| PricingError::UnknownProduct { code: code.clone() })
    }

    pub fn find_applicable_offer<'p>(
        &self,
        product: &'p Product,
    ) -> Result<Option<&'p Offer>, PricingError> {
        let quantity = self.stored_quantity(&product.code)?;
        Ok(pricing::find_applicable_offer(&product.offers, quantity))
    }

    pub fn compute_offer_price(
        &self,
        offer: &Offer,
        product: &Product,
    ) -> Result<Decimal, PricingError> {
        let quantity = self.stored_quantity(&product.code)?;
        pricing::compute_offer_price(offer, product, quantity)
    }

    pub fn product_subtotal(&self, code: &ProductCode) -> Result<Decimal, PricingError> {
        let product = self.product(code)?;
        match self.find_applicable_offer(product)? {
            Some(offer) => self.compute_offer_price(offer, product),
            None => product.list_price(self.quantity(code)),
        }
    }

    pub fn total_amount(&self) -> Result<Decimal, PricingError> {
        let mut sum = Decimal::ZERO;
        for code in self.items.keys() {
            sum = pricing::accumulate(sum, self.product_subtotal(code)?, code)?;
        }
        Ok(pricing::round_total(sum))
    }

    /// Grand total rendered as currency, e.g. `£2.50`.
    pub fn total(&self) -> Result<String, PricingError> {
        let total = self.total_amount()?;
        let formatted = pricing::format_currency(total);

        info!(
            event_name = "basket.total.computed",
            distinct_items = self.items.len(),
            total = %formatted,
            "basket total computed"
        );
        Ok(formatted)
    }

    /// Itemised breakdown, one line per distinct code in code order.
    pub fn price(&self) -> Result<BasketPricing, PricingError> {
        let mut codes: Vec<&ProductCode> = self.items.keys().collect();
        codes.sort();

        let lines = codes
            .into_iter()
            .map(|code| {
                let product = self.product(code)?;
                pricing::price_line(product, self.quantity(code))
            })
            .collect::<Result<Vec<LinePricing>, PricingError>>()?;

        let unrounded_total = lines.iter().try_fold(Decimal::ZERO, |sum, line| {
            pricing::accumulate(sum, line.subtotal, &line.code)
        })?;
        let total = pricing::round_total(unrounded_total);

        Ok(BasketPricing {
            lines,
            unrounded_total,
            total,
            formatted_total: pricing::format_currency(total),
        })
    }

    fn stored_quantity(&self, code: &ProductCode) -> Result<u32, PricingError> {
        self.items
            .get(code)
            .copied()
            .ok_or_else(|| PricingError::NotInBasket { code: code.clone() })
    }
}
