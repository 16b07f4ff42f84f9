use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::offer::{DiscountOperator, EligibilityOperator};
use crate::domain::product::{Product, ProductCode};
use crate::errors::CatalogError;

/// Read-only set of products a basket is priced against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn try_new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let catalog = Self::new(products);
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let file = toml::from_str::<CatalogFile>(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;
        let catalog = Self::try_new(file.products)?;

        info!(
            event_name = "catalog.loaded",
            path = %path.display(),
            product_count = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file = toml::from_str::<CatalogFile>(raw).map_err(|source| {
            CatalogError::ParseFile { path: "<inline>".into(), source }
        })?;
        Self::try_new(file.products)
    }

    pub fn find(&self, code: &ProductCode) -> Option<&Product> {
        self.products.iter().find(|product| &product.code == code)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen_codes: HashSet<&str> = HashSet::new();

        for product in &self.products {
            let code = product.code.as_str().trim();
            if code.is_empty() {
                return Err(CatalogError::Validation("product code must not be empty".to_string()));
            }
            if !seen_codes.insert(code) {
                return Err(CatalogError::Validation(format!("duplicate product code `{code}`")));
            }
            if product.price.is_sign_negative() {
                return Err(CatalogError::Validation(format!(
                    "product `{code}` has a negative price"
                )));
            }

            for (position, offer) in product.offers.iter().enumerate() {
                if offer.quantity == 0 {
                    return Err(CatalogError::Validation(format!(
                        "offer #{position} on product `{code}` must have a quantity greater than zero"
                    )));
                }

                if let EligibilityOperator::Unrecognized(tag) = &offer.operator {
                    warn!(
                        event_name = "catalog.offer.unrecognized_operator",
                        product_code = code,
                        offer_position = position,
                        operator = tag.as_str(),
                        "offer operator is not recognized and will never apply"
                    );
                }

                match &offer.discount_operator {
                    DiscountOperator::FlatAmountOff => {
                        validate_flat_discount(code, position, offer.discount, product.price)?;
                    }
                    DiscountOperator::BundlePrice => {}
                    DiscountOperator::Unrecognized(tag) => {
                        return Err(CatalogError::Validation(format!(
                            "offer #{position} on product `{code}` has unrecognized discount operator `{tag}` (expected flat_amount_off|bundle_price)"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn validate_flat_discount(
    code: &str,
    position: usize,
    discount: Decimal,
    price: Decimal,
) -> Result<(), CatalogError> {
    if discount.is_sign_negative() {
        return Err(CatalogError::Validation(format!(
            "offer #{position} on product `{code}` has a negative discount"
        )));
    }
    if discount > price {
        return Err(CatalogError::Validation(format!(
            "offer #{position} on product `{code}` discounts more than the unit price"
        )));
    }
    Ok(())
}
