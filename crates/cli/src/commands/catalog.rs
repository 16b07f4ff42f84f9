use basket_core::config::LoadOptions;

use crate::commands::{load_catalog, CommandResult};

pub fn run(options: LoadOptions) -> CommandResult {
    let catalog = match load_catalog(options) {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_error("catalog", &error),
    };

    let offer_count: usize = catalog.products().iter().map(|product| product.offers.len()).sum();
    let codes = catalog
        .products()
        .iter()
        .map(|product| product.code.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    CommandResult::success(
        "catalog",
        format!(
            "catalog valid: {} products, {} offers ({codes})",
            catalog.len(),
            offer_count
        ),
    )
}
