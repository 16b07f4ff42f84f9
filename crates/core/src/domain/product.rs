use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::offer::Offer;
use crate::errors::PricingError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(pub String);

impl ProductCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A purchasable item with its unit price and the offers evaluated against it.
///
/// `offers` is ordered: when several offers are eligible for the purchased
/// quantity only the first one is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub code: ProductCode,
    #[serde(default)]
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl Product {
    pub fn new(code: impl Into<ProductCode>, price: Decimal) -> Self {
        Self { code: code.into(), name: String::new(), price, offers: Vec::new() }
    }

    pub fn with_offer(mut self, offer: Offer) -> Self {
        self.offers.push(offer);
        self
    }

    pub fn list_price(&self, quantity: u32) -> Result<Decimal, PricingError> {
        self.price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| PricingError::AmountOverflow { code: self.code.clone() })
    }
}
