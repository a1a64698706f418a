mod cli;
mod input;
mod render;
mod terminal;

use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use services::{Clock, HttpQuizService, QuizController};

use crate::cli::Args;
use crate::terminal::Terminal;

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let service = Arc::new(HttpQuizService::new(args.service_config()?)?);
    log::info!("using quiz service at {}", service.config().base_url());

    let controller = QuizController::new(service, Clock::system());
    args.preselect(&controller)?;

    let mut terminal = Terminal::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    terminal::run(&controller, &mut terminal).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
