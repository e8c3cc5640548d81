//! Wallet session - transfer and OTP state machine

use chrono::Timelike;
use rust_decimal::Decimal;
use strum_macros::Display;
use walletguard_core::Amount;
use walletguard_engine::{Decision, RiskAssessment, RiskEngine, TransactionRequest, WalletMemory};
use walletguard_model::FraudModel;

use crate::challenge::{ChallengeCode, CodeGenerator, PendingChallenge, RandomCodeGenerator};
use crate::clock::{Clock, SystemClock};
use crate::config::{SessionConfig, WalletGuardConfig};
use crate::error::{SessionError, SessionResult};
use crate::event::{ChallengeFailure, SessionEvent};
use crate::journal::DecisionJournal;

/// Where the session stands after the last operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    Idle,
    ChallengePending,
    Settled,
    Blocked,
}

/// Result of `submit_transaction`
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub tx_id: String,
    pub assessment: RiskAssessment,
    /// Present only for `Decision::Challenge`; deliver it out of band
    pub challenge_code: Option<ChallengeCode>,
    pub state: SessionState,
    pub balance: Amount,
}

/// Result of `verify_challenge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub settled: bool,
    pub final_state: SessionState,
    pub balance: Amount,
    /// Set when the challenge was refused
    pub failure: Option<ChallengeFailure>,
}

/// One wallet, one user, one request at a time.
///
/// The session exclusively owns the wallet memory. Every submission is
/// recorded into memory once it has been assessed, whatever the decision.
pub struct WalletSession {
    engine: RiskEngine,
    settings: SessionConfig,
    memory: WalletMemory,
    model: Box<dyn FraudModel>,
    clock: Box<dyn Clock>,
    codes: Box<dyn CodeGenerator>,
    state: SessionState,
    pending: Option<PendingChallenge>,
    last_assessment: Option<RiskAssessment>,
    journal: DecisionJournal,
}

impl WalletSession {
    /// Start building a session over `model`
    pub fn builder(config: WalletGuardConfig, model: impl FraudModel + 'static) -> SessionBuilder {
        SessionBuilder::new(config, model)
    }

    /// Score a transfer and apply the decision.
    ///
    /// Validation failures, an outstanding challenge and (with fail-closed)
    /// model failures leave the session untouched.
    pub fn submit_transaction(
        &mut self,
        amount: Decimal,
        destination: &str,
    ) -> SessionResult<SubmitOutcome> {
        let request = TransactionRequest::validate(amount, destination, self.memory.balance())?;

        if self.pending.is_some() {
            return Err(SessionError::ChallengeOutstanding);
        }

        let now = self.clock.now();
        let assessment =
            self.engine
                .assess(self.model.as_ref(), &self.memory, &request, now.hour())?;

        self.memory
            .record_destination(&request.destination, request.amount);

        let tx_id = uuid::Uuid::new_v4().to_string();
        self.record(SessionEvent::transaction_assessed(
            &tx_id,
            request.amount,
            request.destination.clone(),
            assessment.clone(),
            now,
        ));

        let mut challenge_code = None;
        match assessment.decision {
            Decision::Approved => {
                let balance = self.memory.debit(request.amount)?;
                self.state = SessionState::Settled;
                tracing::info!(
                    tx_id = %tx_id,
                    amount = %request.amount,
                    destination = %request.destination,
                    final_risk = %assessment.final_risk,
                    balance = %balance,
                    "Transfer approved and settled"
                );
                self.record(SessionEvent::transaction_settled(
                    &tx_id,
                    request.amount,
                    balance,
                    false,
                    now,
                ));
            }
            Decision::Challenge => {
                let code = self.codes.generate();
                self.pending = Some(PendingChallenge {
                    tx_id: tx_id.clone(),
                    code,
                    amount: request.amount,
                    destination: request.destination.clone(),
                    issued_at: now,
                });
                self.state = SessionState::ChallengePending;
                challenge_code = Some(code);
                tracing::info!(
                    tx_id = %tx_id,
                    amount = %request.amount,
                    final_risk = %assessment.final_risk,
                    "Transfer challenged, OTP issued"
                );
                self.record(SessionEvent::challenge_issued(&tx_id, now));
            }
            Decision::Blocked => {
                self.state = SessionState::Blocked;
                tracing::warn!(
                    tx_id = %tx_id,
                    amount = %request.amount,
                    destination = %request.destination,
                    final_risk = %assessment.final_risk,
                    reasons = ?assessment.reasons,
                    "Transfer blocked"
                );
            }
        }

        self.last_assessment = Some(assessment.clone());

        Ok(SubmitOutcome {
            tx_id,
            assessment,
            challenge_code,
            state: self.state,
            balance: self.memory.balance(),
        })
    }

    /// Resolve the pending challenge. One attempt only: a wrong or expired
    /// code blocks the transfer.
    pub fn verify_challenge(&mut self, code: &str) -> SessionResult<VerifyOutcome> {
        let pending = self.pending.take().ok_or(SessionError::NoChallengePending)?;
        let now = self.clock.now();

        let failure = if pending.is_expired(now, self.settings.challenge_ttl()) {
            Some(ChallengeFailure::Expired)
        } else if !pending.code.matches(code) {
            Some(ChallengeFailure::WrongCode)
        } else {
            None
        };

        if let Some(reason) = failure {
            self.state = SessionState::Blocked;
            tracing::warn!(tx_id = %pending.tx_id, reason = ?reason, "Challenge failed, transfer blocked");
            self.record(SessionEvent::challenge_failed(&pending.tx_id, reason, now));
            return Ok(VerifyOutcome {
                settled: false,
                final_state: self.state,
                balance: self.memory.balance(),
                failure: Some(reason),
            });
        }

        let balance = self.memory.debit(pending.amount)?;
        self.state = SessionState::Settled;
        tracing::info!(
            tx_id = %pending.tx_id,
            amount = %pending.amount,
            destination = %pending.destination,
            balance = %balance,
            "Challenge passed, transfer settled"
        );
        self.record(SessionEvent::transaction_settled(
            &pending.tx_id,
            pending.amount,
            balance,
            true,
            now,
        ));

        Ok(VerifyOutcome {
            settled: true,
            final_state: self.state,
            balance,
            failure: None,
        })
    }

    pub fn balance(&self) -> Amount {
        self.memory.balance()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pending_challenge(&self) -> Option<&PendingChallenge> {
        self.pending.as_ref()
    }

    /// Most recent assessment, for display
    pub fn last_assessment(&self) -> Option<&RiskAssessment> {
        self.last_assessment.as_ref()
    }

    pub fn memory(&self) -> &WalletMemory {
        &self.memory
    }

    pub fn journal(&self) -> &DecisionJournal {
        &self.journal
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    // The transfer outcome stands even if the journal cannot be written.
    fn record(&mut self, event: SessionEvent) {
        if let Err(e) = self.journal.append(event) {
            tracing::error!(error = %e, "Failed to append to decision journal");
        }
    }
}

/// Builder for [`WalletSession`]
///
/// Defaults: system clock, entropy-seeded codes, in-memory journal.
pub struct SessionBuilder {
    config: WalletGuardConfig,
    model: Box<dyn FraudModel>,
    clock: Box<dyn Clock>,
    codes: Box<dyn CodeGenerator>,
    journal: DecisionJournal,
}

impl SessionBuilder {
    pub fn new(config: WalletGuardConfig, model: impl FraudModel + 'static) -> Self {
        Self {
            config,
            model: Box::new(model),
            clock: Box::new(SystemClock),
            codes: Box::new(RandomCodeGenerator::from_entropy()),
            journal: DecisionJournal::in_memory(),
        }
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn code_generator(mut self, codes: impl CodeGenerator + 'static) -> Self {
        self.codes = Box::new(codes);
        self
    }

    pub fn journal(mut self, journal: DecisionJournal) -> Self {
        self.journal = journal;
        self
    }

    /// Validate the configuration and open the session
    pub fn build(self) -> SessionResult<WalletSession> {
        self.config.session.validate()?;
        let fingerprint = self.config.fingerprint()?;
        let WalletGuardConfig { engine, session } = self.config;
        let engine = RiskEngine::new(engine)?;
        let memory = WalletMemory::new(session.initial_balance);

        let mut journal = self.journal;
        journal.append(SessionEvent::session_opened(
            session.initial_balance,
            &fingerprint,
            self.model.name(),
            self.clock.now(),
        ))?;

        tracing::info!(
            balance = %session.initial_balance,
            model = self.model.name(),
            config = %fingerprint,
            "Wallet session opened"
        );

        Ok(WalletSession {
            engine,
            settings: session,
            memory,
            model: self.model,
            clock: self.clock,
            codes: self.codes,
            state: SessionState::Idle,
            pending: None,
            last_assessment: None,
            journal,
        })
    }
}
