//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use luckymart_commerce::config::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, DEFAULT_CONFIG_FILE};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    ctx.output.header("Current Configuration");
    ctx.output.kv("source", &ctx.config_source());
    ctx.output.kv("low_stock_threshold", &config.low_stock_threshold.to_string());
    ctx.output.kv(
        "rng_seed",
        &config
            .rng_seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "entropy".to_string()),
    );

    // Catalog section
    ctx.output.info("");
    ctx.output.info("[[catalog]]");
    for product in &config.catalog {
        let price = product.price().to_string();
        let stock = format!("stock {}", product.stock());
        ctx.output.table_row(
            &[product.id().as_str(), product.name(), price.as_str(), stock.as_str()],
            &[4, 8, 10, 0],
        );
    }

    // Pricing section
    let pricing = &config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv(
        "line_discount_min_quantity",
        &pricing.line_discount_min_quantity.to_string(),
    );
    ctx.output.kv("bulk_threshold", &pricing.bulk_threshold.to_string());
    ctx.output.kv("bulk_rate", &pricing.bulk_rate.to_string());
    ctx.output.kv("day_discount_weekday", &format!("{:?}", pricing.day_discount_weekday));
    ctx.output.kv("day_discount_rate", &pricing.day_discount_rate.to_string());
    ctx.output.kv("label_threshold", &pricing.label_threshold.to_string());
    ctx.output.kv("points_unit", &pricing.points_unit.to_string());
    for (id, rate) in &pricing.line_rates {
        ctx.output.kv(&format!("line_rates.{}", id), &rate.to_string());
    }

    // Promotions section
    let promotions = &config.promotions;
    ctx.output.info("");
    ctx.output.info("[promotions]");
    ctx.output.kv("enabled", &promotions.enabled.to_string());
    ctx.output.kv(
        "flash_sale",
        &format!(
            "every {}s after up to {}s, p={}, -{}",
            promotions.flash_sale.period_secs,
            promotions.flash_sale.initial_delay_max_secs,
            promotions.flash_sale.probability,
            promotions.flash_sale.rate
        ),
    );
    ctx.output.kv(
        "suggestion",
        &format!(
            "every {}s after up to {}s, -{}",
            promotions.suggestion.period_secs,
            promotions.suggestion.initial_delay_max_secs,
            promotions.suggestion.rate
        ),
    );

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");
    ctx.output.kv("source", &ctx.config_source());

    if let Err(e) = ctx.config.validate() {
        ctx.output.error(&format!("Error: {}", e));
        bail!("Configuration is invalid");
    }

    let warnings = collect_warnings(&ctx.config);
    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }
    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Settings that load fine but make for an odd storefront.
fn collect_warnings(config: &StorefrontConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.catalog.is_empty() {
        warnings.push("catalog is empty".to_string());
    } else if config.catalog.iter().all(|p| !p.is_in_stock()) {
        warnings.push("every product is sold out".to_string());
    }

    for id in config.pricing.line_rates.keys() {
        if !config.catalog.iter().any(|p| p.id() == id) {
            warnings.push(format!("pricing.line_rates.{} names no catalog product", id));
        }
    }

    if config.promotions.enabled && config.promotions.flash_sale.probability == 0.0 {
        warnings.push("promotions.flash_sale.probability is 0, flash sales never fire".to_string());
    }

    warnings
}
