use basket_core::config::LoadOptions;
use basket_core::errors::ApplicationError;
use basket_core::Basket;

use crate::commands::{load_catalog, CommandResult};

pub fn run(options: LoadOptions, codes: &[String]) -> CommandResult {
    match compute(options, codes) {
        Ok(total) => CommandResult { exit_code: 0, output: total },
        Err(error) => CommandResult::from_error("total", &error),
    }
}

fn compute(options: LoadOptions, codes: &[String]) -> Result<String, ApplicationError> {
    let catalog = load_catalog(options)?;
    let mut basket = Basket::new(&catalog);
    for code in codes {
        basket.add(code.as_str());
    }
    Ok(basket.total()?)
}
