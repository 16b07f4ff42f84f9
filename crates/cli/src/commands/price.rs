use basket_core::config::LoadOptions;
use basket_core::cpq::pricing::{format_currency, BasketPricing, LinePricing};
use basket_core::errors::ApplicationError;
use basket_core::Basket;
use rust_decimal::Decimal;

use crate::commands::{load_catalog, CommandResult};

pub fn run(options: LoadOptions, codes: &[String], json_output: bool) -> CommandResult {
    let pricing = match compute(options, codes) {
        Ok(pricing) => pricing,
        Err(error) => return CommandResult::from_error("price", &error),
    };

    if json_output {
        return match serde_json::to_string_pretty(&pricing) {
            Ok(output) => CommandResult { exit_code: 0, output },
            Err(error) => CommandResult::failure(
                "price",
                "serialization",
                format!("could not serialize pricing: {error}"),
                1,
            ),
        };
    }

    CommandResult { exit_code: 0, output: render_human(&pricing) }
}

fn compute(options: LoadOptions, codes: &[String]) -> Result<BasketPricing, ApplicationError> {
    let catalog = load_catalog(options)?;
    let mut basket = Basket::new(&catalog);
    for code in codes {
        basket.add(code.as_str());
    }
    Ok(basket.price()?)
}

fn render_human(pricing: &BasketPricing) -> String {
    let mut lines: Vec<String> = pricing.lines.iter().map(render_line).collect();
    if lines.is_empty() {
        lines.push("basket is empty".to_string());
    }
    lines.push(format!("total: {}", pricing.formatted_total));
    lines.join("\n")
}

fn render_line(line: &LinePricing) -> String {
    let base = format!(
        "- {} x{} @ {} = {}",
        line.code,
        line.quantity,
        format_currency(line.unit_price),
        format_currency(line.subtotal)
    );

    match &line.applied_offer {
        Some(offer) if line.discount > Decimal::ZERO => format!(
            "{base} (offer {} {} -> {}, saves {})",
            offer.operator,
            offer.quantity,
            offer.discount_operator,
            format_currency(line.discount)
        ),
        Some(offer) => format!(
            "{base} (offer {} {} -> {})",
            offer.operator, offer.quantity, offer.discount_operator
        ),
        None => base,
    }
}
