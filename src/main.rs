use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tenki_core::Config;
use tenki_forecast::ForecastProvider;
use tenki_ui::render::{render, render_menu};
use tenki_ui::{request_fetch, Command, ForecastModel, ForecastServiceMessage};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    tenki_core::init(&config)?;
    config.ensure_valid()?;

    let provider = ForecastProvider::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.request_timeout_secs),
    )
    .context("Failed to create forecast provider")?;

    tracing::info!(backend = %provider.base_url(), "tenki started");

    let mut model = ForecastModel::new(Arc::new(provider));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("tenki - two-day regional forecast\n");
    println!("{}", render_menu());
    println!("\n{}", render(model.view()));

    // Once stdin closes, stay around only to show a fetch still in flight.
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line.context("Failed to read input")? else {
                    input_open = false;
                    if model.view().is_loading() {
                        continue;
                    }
                    break;
                };
                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::List => println!("{}", render_menu()),
                    Command::Choose(selection) => {
                        if let Some(ticket) = model.begin_submit(selection) {
                            request_fetch(&tx, model.source(), ticket);
                        }
                        println!("\n{}", render(model.view()));
                    }
                }
            }
            Some(message) = rx.recv() => {
                let ForecastServiceMessage::FetchDone { ticket, result } = message;
                if model.complete(ticket, result) {
                    println!("\n{}", render(model.view()));
                }
                if !input_open && !model.view().is_loading() {
                    break;
                }
            }
        }
    }

    tracing::info!("tenki shutting down");
    Ok(())
}
