//! Catalog listing.

use anyhow::Result;
use luckymart_commerce::catalog::StockAlert;
use luckymart_commerce::config::StorefrontConfig;
use serde_json::json;

use super::CatalogArgs;
use crate::context::Context;

/// Print the configured catalog without starting a session.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    ctx.config.validate()?;
    let catalog = ctx.config.build_catalog()?;
    let alerts = catalog.stock_alerts(ctx.config.low_stock_threshold);

    if ctx.output.is_json() {
        if args.alerts {
            ctx.output.json(&alerts);
        } else {
            ctx.output.json(&json!({
                "products": catalog.list_products(),
                "alerts": alerts,
            }));
        }
        return Ok(());
    }

    if !args.alerts {
        ctx.output.header("Products");
        ctx.output.options(&catalog.options());
        print_line_rates(&ctx.config, ctx);
    }

    ctx.output.header("Stock");
    print_alerts(&alerts, ctx);
    Ok(())
}

fn print_line_rates(config: &StorefrontConfig, ctx: &Context) {
    if config.pricing.line_rates.is_empty() {
        return;
    }
    ctx.output.info(&format!(
        "Line discounts from {} units:",
        config.pricing.line_discount_min_quantity
    ));
    for (id, rate) in &config.pricing.line_rates {
        ctx.output.kv(id.as_str(), &format!("{:.1}%", rate * 100.0));
    }
}

fn print_alerts(alerts: &[StockAlert], ctx: &Context) {
    if alerts.is_empty() {
        ctx.output.success("All products in stock");
    } else {
        ctx.output.stock_alerts(alerts);
    }
}
