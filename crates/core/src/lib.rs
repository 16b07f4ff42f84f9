pub mod basket;
pub mod config;
pub mod cpq;
pub mod domain;
pub mod errors;

pub use basket::Basket;
pub use cpq::catalog::Catalog;
pub use cpq::pricing::{BasketPricing, LinePricing};
pub use domain::offer::{DiscountOperator, EligibilityOperator, Offer};
pub use domain::product::{Product, ProductCode};
pub use errors::{ApplicationError, CatalogError, PricingError};
