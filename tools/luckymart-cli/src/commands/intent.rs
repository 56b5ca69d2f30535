//! Parsing of interactive shell input.

use luckymart_commerce::ProductId;
use thiserror::Error;

/// A shopper action typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show the product selector.
    List,
    /// Pick a product without buying it.
    Select(ProductId),
    /// Add one unit.
    Add(ProductId),
    /// Change a line by a signed amount.
    Change(ProductId, i64),
    /// Drop a line.
    Remove(ProductId),
    Cart,
    Points,
    Alerts,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntentError {
    #[error("unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    #[error("'{0}' needs a product id")]
    MissingProduct(&'static str),

    #[error("'change' needs a quantity, e.g. 'change p1 3'")]
    MissingDelta,

    #[error("'{0}' is not a valid quantity change")]
    InvalidDelta(String),

    #[error("too many arguments for '{0}'")]
    TrailingInput(&'static str),
}

/// Lines printed by `help`.
pub const HELP: &[(&str, &str)] = &[
    ("list", "show products"),
    ("select <id>", "pick a product"),
    ("add <id>", "add one unit to the cart"),
    ("inc <id>", "one more unit"),
    ("dec <id>", "one less unit"),
    ("change <id> <n>", "change quantity by n (may be negative)"),
    ("rm <id>", "remove from the cart"),
    ("cart", "show the cart and total"),
    ("points", "show the point balance"),
    ("alerts", "show stock alerts"),
    ("quit", "leave the store"),
];

impl Intent {
    pub fn parse(line: &str) -> Result<Self, IntentError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Intent::Nothing);
        };

        let intent = match command.to_lowercase().as_str() {
            "list" | "ls" => Intent::List,
            "select" | "sel" => Intent::Select(product(&mut words, "select")?),
            "add" => Intent::Add(product(&mut words, "add")?),
            "inc" | "+" => Intent::Change(product(&mut words, "inc")?, 1),
            "dec" | "-" => Intent::Change(product(&mut words, "dec")?, -1),
            "change" => {
                let id = product(&mut words, "change")?;
                let delta = words.next().ok_or(IntentError::MissingDelta)?;
                let delta = delta
                    .parse()
                    .map_err(|_| IntentError::InvalidDelta(delta.to_string()))?;
                Intent::Change(id, delta)
            }
            "rm" | "remove" => Intent::Remove(product(&mut words, "rm")?),
            "cart" => Intent::Cart,
            "points" => Intent::Points,
            "alerts" => Intent::Alerts,
            "help" | "?" => Intent::Help,
            "quit" | "exit" | "q" => Intent::Quit,
            other => return Err(IntentError::UnknownCommand(other.to_string())),
        };

        if words.next().is_some() {
            return Err(IntentError::TrailingInput(command_name(&intent)));
        }
        Ok(intent)
    }
}

fn product<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<ProductId, IntentError> {
    words
        .next()
        .map(ProductId::from)
        .ok_or(IntentError::MissingProduct(command))
}

fn command_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::List => "list",
        Intent::Select(_) => "select",
        Intent::Add(_) => "add",
        Intent::Change(..) => "change",
        Intent::Remove(_) => "rm",
        Intent::Cart => "cart",
        Intent::Points => "points",
        Intent::Alerts => "alerts",
        Intent::Help => "help",
        Intent::Quit => "quit",
        Intent::Nothing => "",
    }
}
