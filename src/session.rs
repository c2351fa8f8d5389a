//! The expedition session state machine.
//!
//! Owns altitude, supplies, streak, the game clock, and the screen phase.
//! Mutation enters only through the defined transitions (`start`, `tick`,
//! `submit_answer`, `acknowledge_feedback`, `quit`, `rematch`, `restart`).
//! The engine owns no wall-clock timer: the caller pulses `tick` while the
//! session is in play and stops pulsing when it leaves; inert ticks make a
//! late stop harmless.

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::{
    MAX_ALTITUDE_M, NEXT_QUESTION_DELAY_SECS, RESCUE_DELAY_SECS, SUMMIT_DELAY_SECS,
};
use crate::progression::{DifficultyLevel, camp_reached, gain_for_correct, next_camp, wrong_penalty};
use crate::question::Question;
use crate::records::SessionBest;
use crate::result::{Ending, ExpeditionSummary};
use crate::supplies::{DrainAccumulator, Supplies};
use crate::tables::TableSet;

const MSG_RESCUE: &str = "You ran out of supplies and had to turn back. Rest and try again!";

/// Screen phase. One-directional within a session; Summary exits only via
/// the explicit restart/rematch transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Intro,
    Playing,
    Summary,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intro => f.write_str("intro"),
            Self::Playing => f.write_str("playing"),
            Self::Summary => f.write_str("summary"),
        }
    }
}

/// Feedback shown between answering and the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Feedback {
    #[default]
    None,
    /// Toast while the next question (or the summary) is scheduled.
    Correct { climbed_m: i32 },
    /// Blocking recap of the retired question; requires acknowledgement.
    Incorrect {
        question: Question,
        correct_answer: i32,
    },
}

/// Rejected transition. None of these consume the live question or alter
/// counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExpeditionError {
    #[error("Enter a number (the wind howls…)")]
    UnreadableAnswer,
    #[error("not available in the {found} phase")]
    PhaseMismatch { found: Phase },
    #[error("answer already being resolved")]
    AnswerPending,
    #[error("acknowledge the answer check first")]
    FeedbackUnacknowledged,
    #[error("no live question to answer")]
    NoActiveQuestion,
}

/// Result of an accepted answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct {
        climbed_m: i32,
        altitude_m: i32,
        summited: bool,
    },
    Incorrect {
        correct_answer: i32,
        altitude_m: i32,
    },
}

/// What a tick pulse did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not in play (or already on the summary screen); nothing happened.
    Idle,
    /// Clock advanced; `drained` background drain units were applied.
    Advanced { drained: u32 },
    /// A scheduled next question came due and was issued.
    QuestionIssued,
    /// Background drain emptied a supply pool; rescue is now scheduled.
    RescueTriggered,
    /// A scheduled end-of-run came due; the session is now in Summary.
    SummaryShown,
}

/// Deferred transition kinds. At most one task is pending at a time; the
/// end-of-run task replaces a pending next-question task, never the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DeferredKind {
    NextQuestion,
    ShowSummary,
}

/// Single-slot deferred task resolved by tick time. The token rises on every
/// schedule/cancel, so a task observed earlier can never fire after state
/// has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Deferred {
    kind: DeferredKind,
    due_at_secs: f64,
    token: u64,
}

/// A single expedition: created at session start, consumed by `restart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    seed: u64,
    tables: TableSet,
    phase: Phase,
    altitude_m: i32,
    peak_altitude_m: i32,
    supplies: Supplies,
    drain: DrainAccumulator,
    streak: u32,
    /// Game clock; frozen once an ending is set.
    elapsed_secs: f64,
    /// Monotonic tick timeline; keeps advancing through end-of-run delays.
    timeline_secs: f64,
    question: Option<Question>,
    feedback: Feedback,
    message: String,
    ending: Option<Ending>,
    pending: Option<Deferred>,
    next_token: u64,
    #[serde(skip)]
    rng: Option<ChaCha20Rng>,
}

impl Session {
    /// Fresh session on the intro screen.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tables: TableSet::full(),
            phase: Phase::Intro,
            altitude_m: 0,
            peak_altitude_m: 0,
            supplies: Supplies::full(),
            drain: DrainAccumulator::default(),
            streak: 0,
            elapsed_secs: 0.0,
            timeline_secs: 0.0,
            question: None,
            feedback: Feedback::None,
            message: String::new(),
            ending: None,
            pending: None,
            next_token: 0,
            rng: Some(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    /// Begin the ascent: Intro → Playing with the chosen tables, fresh
    /// counters, and the first question issued immediately (no drain has
    /// accumulated yet).
    ///
    /// # Errors
    ///
    /// Returns `PhaseMismatch` outside the intro screen.
    pub fn start(&mut self, tables: TableSet) -> Result<(), ExpeditionError> {
        if self.phase != Phase::Intro {
            return Err(ExpeditionError::PhaseMismatch { found: self.phase });
        }
        self.tables = tables;
        debug!("expedition started; tables={}", self.tables);
        self.begin_run();
        Ok(())
    }

    /// Replay with the same tables from the summary screen.
    ///
    /// # Errors
    ///
    /// Returns `PhaseMismatch` outside the summary screen.
    pub fn rematch(&mut self) -> Result<(), ExpeditionError> {
        if self.phase != Phase::Summary {
            return Err(ExpeditionError::PhaseMismatch { found: self.phase });
        }
        self.begin_run();
        Ok(())
    }

    /// Back to the intro screen with a fresh session on the same seed.
    #[must_use]
    pub fn restart(self) -> Self {
        Self::new(self.seed)
    }

    fn begin_run(&mut self) {
        self.cancel_pending();
        self.phase = Phase::Playing;
        self.altitude_m = 0;
        self.peak_altitude_m = 0;
        self.supplies = Supplies::full();
        self.drain = DrainAccumulator::default();
        self.streak = 0;
        self.elapsed_secs = 0.0;
        self.ending = None;
        self.feedback = Feedback::None;
        self.message.clear();
        self.issue_question();
    }

    /// Advance the session by `delta_secs` of real time.
    ///
    /// While the run is live this advances the game clock, applies background
    /// drain, and checks for supply exhaustion; once an ending is set only
    /// the deferred end-of-run transition is driven. Ticks outside Playing
    /// are inert.
    pub fn tick(&mut self, delta_secs: f64, best: &mut SessionBest) -> TickOutcome {
        if self.phase != Phase::Playing || !delta_secs.is_finite() || delta_secs <= 0.0 {
            return TickOutcome::Idle;
        }
        self.timeline_secs += delta_secs;

        let mut drained = 0;
        let mut rescue_fired = false;
        if self.ending.is_none() {
            self.elapsed_secs += delta_secs;
            drained = self.drain.advance(delta_secs);
            if drained > 0 {
                self.supplies.drain(drained);
                rescue_fired = self.check_supply_failure(best);
            }
        }

        if let Some(task) = self.pending
            && task.token == self.next_token
            && task.due_at_secs <= self.timeline_secs
        {
            self.pending = None;
            match task.kind {
                DeferredKind::NextQuestion => {
                    self.issue_question();
                    return TickOutcome::QuestionIssued;
                }
                DeferredKind::ShowSummary => {
                    self.phase = Phase::Summary;
                    self.question = None;
                    self.feedback = Feedback::None;
                    return TickOutcome::SummaryShown;
                }
            }
        }

        if rescue_fired {
            TickOutcome::RescueTriggered
        } else {
            TickOutcome::Advanced { drained }
        }
    }

    /// Submit a raw answer for the live question. The question is retired
    /// exactly once per accepted submission.
    ///
    /// # Errors
    ///
    /// Returns `UnreadableAnswer` for non-numeric input (retryable, nothing
    /// consumed), `PhaseMismatch` outside play, `AnswerPending` while a
    /// resolution is scheduled, `FeedbackUnacknowledged` while the wrong
    /// answer recap is up, and `NoActiveQuestion` if no question is live.
    pub fn submit_answer(
        &mut self,
        guess: &str,
        best: &mut SessionBest,
    ) -> Result<AnswerOutcome, ExpeditionError> {
        if self.phase != Phase::Playing {
            return Err(ExpeditionError::PhaseMismatch { found: self.phase });
        }
        if self.ending.is_some() || matches!(self.feedback, Feedback::Correct { .. }) {
            return Err(ExpeditionError::AnswerPending);
        }
        if matches!(self.feedback, Feedback::Incorrect { .. }) {
            return Err(ExpeditionError::FeedbackUnacknowledged);
        }
        let Some(question) = self.question else {
            return Err(ExpeditionError::NoActiveQuestion);
        };
        let guess: i32 = guess
            .trim()
            .parse()
            .map_err(|_| ExpeditionError::UnreadableAnswer)?;

        // Retire the question; every path below issues feedback.
        self.question = None;
        if guess == question.product() {
            Ok(self.apply_correct(question, best))
        } else {
            Ok(self.apply_incorrect(question, best))
        }
    }

    fn apply_correct(&mut self, question: Question, best: &mut SessionBest) -> AnswerOutcome {
        let level = DifficultyLevel::for_altitude(self.altitude_m);
        self.streak += 1;
        let climbed_m = gain_for_correct(level, self.streak);
        self.altitude_m = (self.altitude_m + climbed_m).min(MAX_ALTITUDE_M);
        self.peak_altitude_m = self.peak_altitude_m.max(self.altitude_m);
        self.supplies.boost();
        self.feedback = Feedback::Correct { climbed_m };
        self.message = format!("Correct! You climb {climbed_m} m. Supplies boosted.");
        debug!(
            "correct answer for {}; +{climbed_m} m to {} m (streak {})",
            question.prompt(),
            self.altitude_m,
            self.streak
        );

        let summited = self.altitude_m >= MAX_ALTITUDE_M;
        if summited {
            // Clock stops here; the summary screen follows after the toast.
            self.ending = Some(Ending::Summit);
            best.record_altitude(self.peak_altitude_m);
            best.record_summit(self.elapsed_secs);
            self.schedule(DeferredKind::ShowSummary, SUMMIT_DELAY_SECS);
            info!("summit reached at {:.1}s", self.elapsed_secs);
        } else {
            self.schedule(DeferredKind::NextQuestion, NEXT_QUESTION_DELAY_SECS);
        }
        AnswerOutcome::Correct {
            climbed_m,
            altitude_m: self.altitude_m,
            summited,
        }
    }

    fn apply_incorrect(&mut self, question: Question, best: &mut SessionBest) -> AnswerOutcome {
        let correct_answer = question.product();
        self.altitude_m = (self.altitude_m - wrong_penalty()).max(0);
        self.streak = 0;
        self.supplies.penalize();
        self.feedback = Feedback::Incorrect {
            question,
            correct_answer,
        };
        self.message = format!(
            "Not quite. Correct was {correct_answer}. You slip {} m and lose supplies.",
            wrong_penalty()
        );
        debug!(
            "wrong answer for {}; back to {} m",
            question.prompt(),
            self.altitude_m
        );
        self.check_supply_failure(best);
        AnswerOutcome::Incorrect {
            correct_answer,
            altitude_m: self.altitude_m,
        }
    }

    /// Dismiss the wrong-answer recap and take the next question.
    ///
    /// # Errors
    ///
    /// Returns `PhaseMismatch` outside play and `NoActiveQuestion` when no
    /// recap is up.
    pub fn acknowledge_feedback(&mut self) -> Result<(), ExpeditionError> {
        if self.phase != Phase::Playing {
            return Err(ExpeditionError::PhaseMismatch { found: self.phase });
        }
        if !matches!(self.feedback, Feedback::Incorrect { .. }) {
            return Err(ExpeditionError::NoActiveQuestion);
        }
        // A scheduled rescue outlives the recap; the next question never does.
        if self.ending.is_none() {
            self.issue_question();
        } else {
            self.feedback = Feedback::None;
        }
        Ok(())
    }

    /// Leave the mountain voluntarily: Playing → Summary, clock stopped,
    /// run peak folded into the records, summit times untouched.
    ///
    /// # Errors
    ///
    /// Returns `PhaseMismatch` outside play.
    pub fn quit(&mut self, best: &mut SessionBest) -> Result<(), ExpeditionError> {
        if self.phase != Phase::Playing {
            return Err(ExpeditionError::PhaseMismatch { found: self.phase });
        }
        self.cancel_pending();
        self.ending = Some(Ending::Quit);
        best.record_altitude(self.peak_altitude_m);
        self.question = None;
        self.feedback = Feedback::None;
        self.phase = Phase::Summary;
        info!("expedition abandoned at {} m", self.peak_altitude_m);
        Ok(())
    }

    /// Terminal report; None until the session reaches the summary screen.
    #[must_use]
    pub fn summary(&self, best: &SessionBest) -> Option<ExpeditionSummary> {
        if self.phase != Phase::Summary {
            return None;
        }
        let ending = self.ending?;
        Some(ExpeditionSummary::new(
            ending,
            self.peak_altitude_m,
            self.elapsed_secs,
            *best,
        ))
    }

    /// Everything the presentation layer renders, as one serializable value.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            altitude_m: self.altitude_m,
            peak_altitude_m: self.peak_altitude_m,
            food: self.supplies.food,
            water: self.supplies.water,
            streak: self.streak,
            elapsed_secs: self.elapsed_secs,
            question: self.question.map(Question::prompt),
            feedback: self.feedback,
            message: self.message.clone(),
            camp_reached: camp_reached(self.altitude_m).map(|camp| camp.name.to_string()),
            next_camp: next_camp(self.altitude_m).map(|camp| camp.name.to_string()),
            ending: self.ending,
        }
    }

    // One-shot: once an ending is set, later exhaustion checks are inert.
    fn check_supply_failure(&mut self, best: &mut SessionBest) -> bool {
        if self.ending.is_some() || !self.supplies.exhausted() {
            return false;
        }
        self.ending = Some(Ending::Rescue);
        best.record_altitude(self.peak_altitude_m);
        self.message = String::from(MSG_RESCUE);
        self.schedule(DeferredKind::ShowSummary, RESCUE_DELAY_SECS);
        info!("supplies exhausted at {} m; rescue inbound", self.altitude_m);
        true
    }

    fn issue_question(&mut self) {
        let level = DifficultyLevel::for_altitude(self.altitude_m);
        let seed = self.seed;
        let rng = self
            .rng
            .get_or_insert_with(|| ChaCha20Rng::seed_from_u64(seed));
        self.question = Some(Question::generate(&self.tables, level, rng));
        self.feedback = Feedback::None;
        self.message.clear();
    }

    fn schedule(&mut self, kind: DeferredKind, delay_secs: f64) {
        self.next_token += 1;
        self.pending = Some(Deferred {
            kind,
            due_at_secs: self.timeline_secs + delay_secs,
            token: self.next_token,
        });
    }

    fn cancel_pending(&mut self) {
        self.next_token += 1;
        self.pending = None;
    }

    // Read-only surface -----------------------------------------------------

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn altitude_m(&self) -> i32 {
        self.altitude_m
    }

    #[must_use]
    pub const fn peak_altitude_m(&self) -> i32 {
        self.peak_altitude_m
    }

    #[must_use]
    pub const fn supplies(&self) -> Supplies {
        self.supplies
    }

    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub const fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    #[must_use]
    pub const fn question(&self) -> Option<Question> {
        self.question
    }

    #[must_use]
    pub const fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn ending(&self) -> Option<Ending> {
        self.ending
    }

    #[must_use]
    pub const fn tables(&self) -> &TableSet {
        &self.tables
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether a deferred transition is waiting on tick time.
    #[must_use]
    pub const fn has_pending_task(&self) -> bool {
        self.pending.is_some()
    }
}

/// Serializable view of the session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub altitude_m: i32,
    pub peak_altitude_m: i32,
    pub food: i32,
    pub water: i32,
    pub streak: u32,
    pub elapsed_secs: f64,
    pub question: Option<String>,
    pub feedback: Feedback,
    pub message: String,
    pub camp_reached: Option<String>,
    pub next_camp: Option<String>,
    pub ending: Option<Ending>,
}
