//! Interactive shopping session.

use std::sync::Arc;

use anyhow::Result;
use luckymart_commerce::cart::CartSummary;
use luckymart_commerce::catalog::ProductOption;
use luckymart_commerce::clock::{Clock, FixedClock, SystemClock};
use luckymart_commerce::promotion::Promotion;
use luckymart_commerce::session::Session;
use luckymart_commerce::{ProductId, ShopError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::intent::{Intent, HELP};
use super::RunArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the interactive session until `quit` or end of input.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    if args.no_promotions {
        config.promotions.enabled = false;
    }
    let clock: Arc<dyn Clock> = match args.date {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };

    let output = &ctx.output;
    output.debug(&format!("Using config: {}", ctx.config_source()));
    let (mut session, mut promotions) = Session::start(config, clock)?;

    output.header("LuckyMart");
    output.options(&session.product_options());
    output.stock_alerts(&session.stock_alerts());
    output.info("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(promotion) = promotions.recv() => {
                announce(&session, &promotion, output);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Intent::parse(&line) {
                    Ok(Intent::Quit) => break,
                    Ok(intent) => handle(&session, intent, output),
                    Err(e) => output.warn(&e.to_string()),
                }
            }
        }
    }

    session.stop();
    output.header("영수증");
    output.cart(&session.cart_summary()?, session.loyalty_points());
    Ok(())
}

fn handle(session: &Session, intent: Intent, output: &Output) {
    let result = match intent {
        Intent::Nothing => Ok(()),
        Intent::List => {
            output.options(&session.product_options());
            Ok(())
        }
        Intent::Select(id) => session
            .select_product(&id)
            .map(|()| output.success(&format!("{} selected", id))),
        Intent::Add(id) => {
            add_and_select(session, &id).map(|summary| show_cart(session, &summary, output))
        }
        Intent::Change(id, delta) => session
            .change_quantity(&id, delta)
            .map(|summary| show_cart(session, &summary, output)),
        Intent::Remove(id) => session
            .remove_from_cart(&id)
            .map(|summary| show_cart(session, &summary, output)),
        Intent::Cart => session
            .cart_summary()
            .map(|summary| output.cart(&summary, session.loyalty_points())),
        Intent::Points => {
            output.kv("points", &session.loyalty_points().balance().to_string());
            Ok(())
        }
        Intent::Alerts => {
            output.stock_alerts(&session.stock_alerts());
            Ok(())
        }
        Intent::Help => {
            for (command, description) in HELP {
                output.table_row(&[*command, *description], &[18, 0]);
            }
            Ok(())
        }
        Intent::Quit => Ok(()),
    };

    if let Err(err) = result {
        debug!(error = %err, "command rejected");
        report(&err, output);
    }
}

/// Show a promotion, then the selector with the cut price.
fn announce(session: &Session, promotion: &Promotion, output: &Output) -> Vec<ProductOption> {
    output.promotion(promotion);
    let options = session.product_options();
    output.options(&options);
    options
}

/// Add one unit and remember the product for the next suggestion.
///
/// An in-stock pick counts as selected even when the cart line is already at
/// the stock limit.
fn add_and_select(session: &Session, id: &ProductId) -> Result<CartSummary, ShopError> {
    let result = session.add_to_cart(id);
    if matches!(result, Ok(_) | Err(ShopError::InsufficientStock { .. })) {
        session.select_product(id)?;
    }
    result
}

fn show_cart(session: &Session, summary: &CartSummary, output: &Output) {
    output.cart(summary, session.loyalty_points());
    output.stock_alerts(&session.stock_alerts());
}

fn report(err: &ShopError, output: &Output) {
    output.warn(&err.user_message());
}
