//! Conversation engine — the dialogue state machine.
//!
//! Owns the transcript, the step cursor, and the raw answer buffer; walks the
//! user through the fixed prompt sequence, coerces the buffered answers into
//! a [`LoanApplication`] at the final step, and renders the prediction
//! outcome back into the transcript. Errors are surfaced inline as bot
//! messages, never raised to the caller — the session is always resumable.

use std::sync::Arc;

use tokio::time::sleep;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::Error;
use crate::flow::{
    self, APPROVED_MESSAGE, OPENING_MESSAGE, REJECTED_MESSAGE, RESTART_INVITATION,
    RESTART_KEYWORD, LoanApplication,
};
use crate::predict::PredictClient;
use crate::transcript::{Message, Transcript};

/// Where the session currently sits between turns.
///
/// A `Submitting` state exists only inside a single `submit_turn` await and
/// is never observable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Still gathering the answer to prompt `k` (0-based; the opening
    /// message counts as prompt 0's question).
    Collecting(usize),
    /// All prompts issued; the next input is the final field and triggers
    /// submission.
    AwaitingFinal,
    /// A prediction result has been rendered; only "restart" progresses.
    Terminal,
}

/// What a call to [`ConversationEngine::submit_turn`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty input, a turn while busy, or a stray turn after the result.
    Ignored,
    /// The session was reset by the restart keyword.
    Restarted,
    /// The next prompt was issued.
    Prompted,
    /// The prediction came back; `approved` selects which result was shown.
    Decided { approved: bool },
    /// A validation or remote error was rendered inline.
    Failed,
}

/// The dialogue state machine. Plain owned object: injectable and testable
/// without any rendering layer, which observes it through the accessors.
pub struct ConversationEngine {
    session_id: Uuid,
    config: EngineConfig,
    client: Arc<dyn PredictClient>,
    transcript: Transcript,
    /// Raw user inputs, one per accepted turn. Grows past the field count on
    /// final-step retries; payload positions are fixed regardless.
    answers: Vec<String>,
    /// How many prompts have been issued after the opening message.
    cursor: usize,
    /// In-flight input text, mirrored from the input surface.
    input: String,
    busy: bool,
    terminal: bool,
    last_error: Option<String>,
}

impl ConversationEngine {
    pub fn new(config: EngineConfig, client: Arc<dyn PredictClient>) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, "Session started");
        Self {
            session_id,
            config,
            client,
            transcript: Transcript::seeded(OPENING_MESSAGE),
            answers: Vec::new(),
            cursor: 0,
            input: String::new(),
            busy: false,
            terminal: false,
            last_error: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// True while a turn is being paced. The rendering surface shows its
    /// typing indicator off this flag.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Most recent inline error text, cleared on the next accepted turn.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current in-flight input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Mirror the input surface's text into the session.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn phase(&self) -> SessionPhase {
        if self.terminal {
            SessionPhase::Terminal
        } else if self.cursor < flow::prompt_count() {
            SessionPhase::Collecting(self.cursor)
        } else {
            SessionPhase::AwaitingFinal
        }
    }

    /// Submit whatever is currently in the in-flight input buffer.
    pub async fn send(&mut self) -> TurnOutcome {
        let text = std::mem::take(&mut self.input);
        self.submit_turn(&text).await
    }

    /// Accept one user turn.
    ///
    /// Empty (after trimming) input is rejected without touching any state.
    /// Overlapping calls while a turn is pending are ignored rather than
    /// queued, so the answer buffer can never interleave.
    pub async fn submit_turn(&mut self, raw: &str) -> TurnOutcome {
        if raw.trim().is_empty() {
            return TurnOutcome::Ignored;
        }
        if self.busy {
            tracing::debug!(session_id = %self.session_id, "Turn ignored: engine busy");
            return TurnOutcome::Ignored;
        }

        self.transcript.push(Message::user(raw));
        self.answers.push(raw.to_string());
        self.input.clear();
        self.last_error = None;

        if self.restart_requested() {
            self.reset();
            return TurnOutcome::Restarted;
        }

        self.busy = true;
        sleep(self.config.pacing_delay).await;
        self.busy = false;

        if self.terminal {
            // Stray turn after the result: recorded, but no progression.
            return TurnOutcome::Ignored;
        }

        if self.cursor < flow::prompt_count() {
            self.advance()
        } else {
            self.submit(raw).await
        }
    }

    /// Branch A: more prompts remain. Issue the next one.
    fn advance(&mut self) -> TurnOutcome {
        self.transcript.push(Message::bot(flow::prompt(self.cursor)));
        self.cursor += 1;
        TurnOutcome::Prompted
    }

    /// Branch B: the sequence is exhausted and `raw` supplies the final
    /// field. Coerce, call the endpoint, render the outcome.
    async fn submit(&mut self, raw: &str) -> TurnOutcome {
        // Positions 0..N-1 from the committed buffer, this turn's raw text
        // as the final field. Stale retries past that are ignored.
        let count = flow::LOAN_FIELDS.len();
        let mut values: Vec<&str> = self.answers[..count - 1]
            .iter()
            .map(String::as_str)
            .collect();
        values.push(raw);

        let application = match LoanApplication::from_answers(&values) {
            Ok(application) => application,
            Err(e) => return self.fail(e.into()),
        };

        tracing::info!(session_id = %self.session_id, ?application, "Submitting application");
        // The busy flag covers only the pacing delay; the remote call runs
        // with it cleared, matching the source system's indicator behavior.
        let result = self.client.predict(&application).await;
        match result {
            Ok(prediction) => {
                let approved = prediction.is_approved();
                let text = if approved {
                    APPROVED_MESSAGE
                } else {
                    REJECTED_MESSAGE
                };
                self.transcript.push(Message::bot(text));
                // Second phase of the terminal rendering: invite a restart
                // a beat after the result lands.
                sleep(self.config.followup_delay).await;
                self.transcript.push(Message::bot(RESTART_INVITATION));
                self.terminal = true;
                tracing::info!(session_id = %self.session_id, approved, "Session decided");
                TurnOutcome::Decided { approved }
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Render an error inline and keep the session resumable at the final
    /// step (the cursor is untouched).
    fn fail(&mut self, error: Error) -> TurnOutcome {
        let message = error.to_string();
        tracing::warn!(session_id = %self.session_id, %message, "Turn failed");
        self.transcript
            .push(Message::bot(format!("Error: {message}. Please try again.")));
        self.last_error = Some(message);
        TurnOutcome::Failed
    }

    /// Post-append restart hook: does the most recent user message equal the
    /// restart keyword, case-insensitively? Recognized in every phase.
    fn restart_requested(&self) -> bool {
        self.transcript
            .last_user_message()
            .is_some_and(|m| m.text.trim().eq_ignore_ascii_case(RESTART_KEYWORD))
    }

    /// Back to the initial state: single seeded bot message, empty buffer,
    /// cursor 0.
    fn reset(&mut self) {
        tracing::info!(session_id = %self.session_id, "Session reset");
        self.transcript = Transcript::seeded(OPENING_MESSAGE);
        self.answers.clear();
        self.cursor = 0;
        self.terminal = false;
        self.busy = false;
        self.last_error = None;
    }
}
