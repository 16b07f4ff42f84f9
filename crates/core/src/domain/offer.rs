use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Comparison deciding whether an offer applies at a purchased quantity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EligibilityOperator {
    /// Quantity is at least the threshold.
    AtLeast,
    /// Quantity holds at least one full group of the divisor.
    EveryN,
    /// Tag read from catalog data that matches no known operator. Never eligible.
    Unrecognized(String),
}

/// Pricing rule used once an offer is eligible.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscountOperator {
    /// `discount` is taken off every purchased unit.
    FlatAmountOff,
    /// Every full group of `quantity` units costs one unit.
    BundlePrice,
    Unrecognized(String),
}

impl EligibilityOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AtLeast => "at_least",
            Self::EveryN => "every_n",
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl DiscountOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FlatAmountOff => "flat_amount_off",
            Self::BundlePrice => "bundle_price",
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl From<&str> for EligibilityOperator {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "at_least" | ">=" => Self::AtLeast,
            "every_n" | "%" => Self::EveryN,
            _ => Self::Unrecognized(value.to_string()),
        }
    }
}

impl From<String> for EligibilityOperator {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<EligibilityOperator> for String {
    fn from(value: EligibilityOperator) -> Self {
        value.as_str().to_string()
    }
}

impl From<&str> for DiscountOperator {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "flat_amount_off" | "-" => Self::FlatAmountOff,
            "bundle_price" | "/" => Self::BundlePrice,
            _ => Self::Unrecognized(value.to_string()),
        }
    }
}

impl From<String> for DiscountOperator {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<DiscountOperator> for String {
    fn from(value: DiscountOperator) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EligibilityOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DiscountOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub operator: EligibilityOperator,
    pub quantity: u32,
    pub discount_operator: DiscountOperator,
    #[serde(default)]
    pub discount: Decimal,
}

impl Offer {
    /// `quantity` or more units get `discount` off each unit.
    pub fn flat_amount_off_at_least(quantity: u32, discount: Decimal) -> Self {
        Self {
            operator: EligibilityOperator::AtLeast,
            quantity,
            discount_operator: DiscountOperator::FlatAmountOff,
            discount,
        }
    }

    /// Every full group of `quantity` units is charged as a single unit.
    pub fn bundle_every(quantity: u32) -> Self {
        Self {
            operator: EligibilityOperator::EveryN,
            quantity,
            discount_operator: DiscountOperator::BundlePrice,
            discount: Decimal::ZERO,
        }
    }
}
