//! Interactive commands

use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use walletguard_engine::{Decision, RiskAssessment};
use walletguard_session::{SessionError, WalletSession};

pub const HELP: &str = "\
Commands:
  send <amount> <address>   Screen and send a transfer
  verify <code>             Answer the pending OTP challenge
  balance                   Show wallet balance
  history                   Show destinations sent to
  explain                   Show how the last score was calculated
  help                      Show this help
  quit                      Exit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send { amount: Decimal, destination: String },
    Verify { code: String },
    Balance,
    History,
    Explain,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Enter valid amount: '{0}'")]
    InvalidAmount(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or(ParseError::Empty)?;

        match name.to_lowercase().as_str() {
            "send" => {
                let (Some(amount), Some(destination)) = (parts.next(), parts.next()) else {
                    return Err(ParseError::Usage("send <amount> <address>"));
                };
                let amount = Decimal::from_str(amount)
                    .map_err(|_| ParseError::InvalidAmount(amount.to_string()))?;
                Ok(Command::Send {
                    amount,
                    destination: destination.to_string(),
                })
            }
            "verify" => {
                let code = parts.next().ok_or(ParseError::Usage("verify <code>"))?;
                Ok(Command::Verify {
                    code: code.to_string(),
                })
            }
            "balance" => Ok(Command::Balance),
            "history" => Ok(Command::History),
            "explain" => Ok(Command::Explain),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

/// Run one command. Returns `false` when the user asked to quit.
///
/// Session errors are reported to `out`; only output failures are returned.
pub fn execute(
    session: &mut WalletSession,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match command {
        Command::Send {
            amount,
            destination,
        } => send(session, amount, &destination, out)?,
        Command::Verify { code } => verify(session, &code, out)?,
        Command::Balance => balance(session, out)?,
        Command::History => history(session, out)?,
        Command::Explain => match session.last_assessment() {
            Some(assessment) => write_assessment(assessment, out)?,
            None => writeln!(out, "No transaction analysed yet")?,
        },
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn send(
    session: &mut WalletSession,
    amount: Decimal,
    destination: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "Running fraud analysis...")?;

    let outcome = match session.submit_transaction(amount, destination) {
        Ok(outcome) => outcome,
        Err(e) => return report(e, out),
    };

    write_assessment(&outcome.assessment, out)?;

    match outcome.assessment.decision {
        Decision::Approved => {
            writeln!(out, "✅ Sent {} KAS to {}", amount, destination.trim())?;
        }
        Decision::Challenge => {
            if let Some(code) = outcome.challenge_code {
                writeln!(out, "🔐 OTP sent: {}", code)?;
                writeln!(out, "   Confirm with: verify <code>")?;
            }
        }
        Decision::Blocked => {
            writeln!(out, "🧊 Transaction Frozen")?;
        }
    }
    writeln!(out, "Wallet Balance: {} KAS", outcome.balance)?;
    Ok(())
}

fn verify(session: &mut WalletSession, code: &str, out: &mut impl Write) -> anyhow::Result<()> {
    match session.verify_challenge(code) {
        Ok(result) if result.settled => {
            writeln!(out, "✅ OTP Verified. Transaction Completed!")?;
            writeln!(out, "Wallet Balance: {} KAS", result.balance)?;
        }
        Ok(_) => {
            writeln!(out, "❌ Wrong or expired OTP. Transaction Frozen.")?;
        }
        Err(e) => report(e, out)?,
    }
    Ok(())
}

fn balance(session: &WalletSession, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Wallet Balance: {} KAS", session.balance())?;
    if let Some(pending) = session.pending_challenge() {
        writeln!(
            out,
            "   Pending: {} KAS to {} awaiting OTP",
            pending.amount, pending.destination
        )?;
    }
    Ok(())
}

fn history(session: &WalletSession, out: &mut impl Write) -> anyhow::Result<()> {
    let memory = session.memory();
    if memory.history().is_empty() {
        writeln!(out, "No transactions yet")?;
        return Ok(());
    }

    writeln!(out, "📜 Submissions: {}", memory.recent_count())?;
    for (i, dest) in memory.history().iter().enumerate() {
        writeln!(out, "  {:>3}. {}", i + 1, dest)?;
    }

    let mut totals: Vec<_> = memory
        .history()
        .iter()
        .map(|dest| (dest, memory.total_sent_to(dest)))
        .collect();
    totals.sort_by(|a, b| a.0.cmp(b.0));
    totals.dedup_by(|a, b| a.0 == b.0);

    writeln!(out, "Totals by destination:")?;
    for (dest, total) in totals {
        writeln!(out, "  {} : {} KAS", dest, total)?;
    }
    Ok(())
}

fn write_assessment(assessment: &RiskAssessment, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out)?;
    writeln!(out, "📊 Final Decision")?;
    writeln!(out, "Final Fraud Risk: {} %", assessment.final_percent())?;
    writeln!(out, "Decision: {}", assessment.decision.label())?;
    writeln!(out)?;
    writeln!(out, "🔍 How this score was calculated")?;
    writeln!(out, "ML Risk: {} %", assessment.model_percent())?;
    writeln!(out, "Rule Risk: {} %", assessment.rule_percent())?;
    write!(out, "{}", assessment.explain())?;
    writeln!(out)?;
    writeln!(out, "🚩 Rules Triggered")?;
    if assessment.reasons.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for reason in &assessment.reasons {
        writeln!(out, "  • {}", reason)?;
    }
    Ok(())
}

fn report(error: SessionError, out: &mut impl Write) -> anyhow::Result<()> {
    match &error {
        SessionError::Validation(_)
        | SessionError::ChallengeOutstanding
        | SessionError::NoChallengePending => writeln!(out, "⚠️  {}", error)?,
        _ => {
            tracing::error!(error = %error, "Transfer could not be screened");
            writeln!(out, "❌ {}", error)?;
        }
    }
    Ok(())
}
