//! Configuration file loading.

use std::path::Path;

use anyhow::{Context, Result};
use luckymart_commerce::config::StorefrontConfig;

/// Names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["luckymart.toml", ".luckymart.toml", "luckymart.json"];

/// Default file written by `luckymart config init`.
pub const DEFAULT_CONFIG_FILE: &str = "luckymart.toml";

/// Load a storefront config from a TOML or JSON file.
pub fn load_config(path: &Path) -> Result<StorefrontConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content, is_json(path))
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a config document. Missing fields take their defaults.
pub fn parse_config(content: &str, json: bool) -> Result<StorefrontConfig> {
    if json {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(toml::from_str(content)?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Generate a default luckymart.toml config file.
pub fn generate_default_config() -> String {
    r#"# LuckyMart storefront configuration

# Products with fewer units than this are listed in stock alerts.
low_stock_threshold = 5
# Fix the promotion randomness for reproducible sessions.
# rng_seed = 42

[[catalog]]
id = "p1"
name = "상품1"
price = 10000
stock = 50

[[catalog]]
id = "p2"
name = "상품2"
price = 20000
stock = 30

[[catalog]]
id = "p3"
name = "상품3"
price = 30000
stock = 20

[[catalog]]
id = "p4"
name = "상품4"
price = 15000
stock = 0

[[catalog]]
id = "p5"
name = "상품5"
price = 25000
stock = 10

[pricing]
line_discount_min_quantity = 10
bulk_threshold = 30
bulk_rate = 0.25
day_discount_weekday = "Tue"
day_discount_rate = 0.1
label_threshold = 10
points_unit = 1000

[pricing.line_rates]
p1 = 0.1
p2 = 0.15
p3 = 0.2
p4 = 0.05
p5 = 0.25

[promotions]
enabled = true

[promotions.flash_sale]
initial_delay_max_secs = 10
period_secs = 30
probability = 0.3
rate = 0.2

[promotions.suggestion]
initial_delay_max_secs = 20
period_secs = 60
rate = 0.05
"#
    .to_string()
}
