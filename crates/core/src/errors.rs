use std::path::PathBuf;

use thiserror::Error;

use crate::{config::ConfigError, domain::product::ProductCode};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("product not found in catalog: `{code}`")]
    UnknownProduct { code: ProductCode },
    #[error("product `{code}` has not been added to the basket")]
    NotInBasket { code: ProductCode },
    #[error("unrecognized discount operator `{operator}` on product `{code}`")]
    UnrecognizedDiscountOperator { code: ProductCode, operator: String },
    #[error("offer on product `{code}` has a zero quantity")]
    InvalidOfferQuantity { code: ProductCode },
    #[error("amount for product `{code}` exceeds the representable range")]
    AmountOverflow { code: ProductCode },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("catalog validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Pricing(_) => "pricing",
            Self::Catalog(_) => "catalog",
            Self::Config(_) => "config_validation",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Catalog(_) => 3,
            Self::Pricing(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ConfigError;
    use crate::errors::{ApplicationError, CatalogError, PricingError};

    #[test]
    fn pricing_error_maps_to_pricing_class() {
        let error = ApplicationError::from(PricingError::UnknownProduct { code: "XX1".into() });

        assert_eq!(error.error_class(), "pricing");
        assert_eq!(error.exit_code(), 4);
        assert_eq!(error.to_string(), "product not found in catalog: `XX1`");
    }

    #[test]
    fn catalog_error_maps_to_catalog_class() {
        let error = ApplicationError::from(CatalogError::Validation("duplicate code".to_owned()));

        assert_eq!(error.error_class(), "catalog");
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn configuration_error_maps_to_config_validation() {
        let error = ApplicationError::from(ConfigError::Validation("bad level".to_owned()));

        assert_eq!(error.error_class(), "config_validation");
        assert_eq!(error.exit_code(), 2);
    }
}
