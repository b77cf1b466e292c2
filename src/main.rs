use anyhow::{Context, Result};
use log::info;
use std::env;

use fintally::accounting::analyzer::Analyzer;
use fintally::accounting::transactions;
use fintally::data;

const DEFAULT_INPUT: &str = "transactions.json";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        eprintln!("Usage: cargo run -- [input_file]");
        std::process::exit(1);
    }

    let file_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_INPUT);
    let input = data::load_json(file_path)?;
    let transactions = transactions::parse(&input).with_context(|| format!("invalid input in {}", file_path))?;
    info!("validated {} transactions", transactions.len());

    let analyzer = Analyzer::new(transactions);
    data::export_csv(&analyzer)?;

    Ok(())
}
