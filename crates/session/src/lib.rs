//! WalletGuard Session
//!
//! Sequences a transfer through assessment, an optional OTP challenge, and
//! settlement, mutating the wallet memory it exclusively owns.
//!
//! ```text
//!            submit                        verify(ok)
//!   Idle ───────────► [assess] ──► Settled ◄──────────┐
//!                         │                            │
//!                         ├──────► ChallengePending ───┤
//!                         │                            │ verify(wrong / expired)
//!                         └──────► Blocked ◄───────────┘
//! ```
//!
//! Terminal states accept the next `submit_transaction`. A pending challenge
//! must be verified before anything else is submitted.

pub mod challenge;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod journal;
pub mod session;

pub use challenge::{
    ChallengeCode, CodeGenerator, FixedCodeGenerator, PendingChallenge, RandomCodeGenerator,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{SessionConfig, WalletGuardConfig};
pub use error::{SessionError, SessionResult};
pub use event::{ChallengeFailure, SessionEvent};
pub use journal::DecisionJournal;
pub use session::{SessionBuilder, SessionState, SubmitOutcome, VerifyOutcome, WalletSession};
