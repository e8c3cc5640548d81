//! WalletGuard CLI - Main entry point

use clap::Parser;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walletguard_cli::{commands, AppContext, Command, ContextOptions};

#[derive(Parser)]
#[command(name = "walletguard")]
#[command(about = "WalletGuard - screen crypto transfers for fraud", long_about = None)]
struct Cli {
    /// Opening wallet balance (default 125.45, or the config value)
    #[arg(long)]
    balance: Option<Decimal>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON logistic model file
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Fraud probability reported when no model file is given
    #[arg(long, default_value = "0.05")]
    baseline_risk: f64,

    /// Append every decision to this JSONL file
    #[arg(short, long)]
    journal: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they do not interleave with the prompt
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut ctx = AppContext::new(&ContextOptions {
        balance: cli.balance,
        config: cli.config,
        model: cli.model,
        baseline_risk: cli.baseline_risk,
        journal: cli.journal,
    })?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "🪙 WalletGuard - Crypto Fraud Detection")?;
    writeln!(stdout, "Wallet Balance: {} KAS", ctx.session.balance())?;
    writeln!(stdout, "Type 'help' for commands.")?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "⚠️  {}", e)?;
                continue;
            }
        };

        if !commands::execute(&mut ctx.session, command, &mut stdout)? {
            break;
        }
    }

    Ok(())
}
