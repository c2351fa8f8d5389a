//! Yeti Math: Everest — Session Engine
//!
//! Platform-agnostic core logic for the Yeti Math multiplication drill game.
//! This crate provides the deterministic expedition simulation — question
//! generation, altitude progression, supply depletion, and the session state
//! machine — without UI or platform-specific dependencies. The presentation
//! layer feeds it answer text and tick pulses and renders the snapshots it
//! exposes.

pub mod constants;
pub mod numbers;
pub mod progression;
pub mod question;
pub mod records;
pub mod result;
pub mod seed;
pub mod session;
pub mod supplies;
pub mod tables;

// Re-export commonly used types
pub use constants::{MAX_ALTITUDE_M, SUPPLY_MAX};
pub use progression::{
    CAMPS, Camp, DifficultyLevel, camp_reached, gain_for_correct, next_camp, wrong_penalty,
};
pub use question::Question;
pub use records::SessionBest;
pub use result::{Ending, ExpeditionSummary, epilogue_for, format_clock};
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use session::{
    AnswerOutcome, ExpeditionError, Feedback, Phase, Session, SessionSnapshot, TickOutcome,
};
pub use supplies::{DrainAccumulator, Supplies};
pub use tables::TableSet;
