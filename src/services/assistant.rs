use anyhow::Context;

use crate::models::{BookingRecord, Session};
use crate::services::dialogue::{normalize_utterance, DialogueEngine, Outcome, INTRO};
use crate::services::speech::{Speaker, Transcriber, Transcript};

/// Consecutive transcription failures tolerated before giving up.
const MAX_TRANSCRIBE_FAILURES: u32 = 3;

const SAVE_FAILED: &str =
    "I'm sorry, I could not save your booking right now. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum ConversationEnd {
    Exited,
    Booked(BookingRecord),
    InputClosed,
}

/// Runs one conversation: introduction, then listen / handle / speak until the
/// engine reports a terminal outcome or the input source closes.
pub async fn run_conversation(
    engine: &DialogueEngine,
    transcriber: &mut dyn Transcriber,
    speaker: &dyn Speaker,
) -> anyhow::Result<ConversationEnd> {
    speaker.speak(INTRO).await?;

    let mut session = Session::new();
    let mut failures = 0;

    loop {
        let raw = match transcriber.transcribe().await {
            Ok(Transcript::Speech(raw)) => raw,
            Ok(Transcript::Silence) => continue,
            Ok(Transcript::Closed) => {
                tracing::info!(state = session.state.as_str(), "input closed");
                return Ok(ConversationEnd::InputClosed);
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(error = %e, failures, "speech recognition error");
                if failures >= MAX_TRANSCRIBE_FAILURES {
                    return Err(e.context("speech recognition keeps failing"));
                }
                continue;
            }
        };
        failures = 0;

        let text = normalize_utterance(&raw);
        if text.is_empty() {
            continue;
        }
        tracing::debug!(utterance = %text, "user said");

        let turn = match engine.handle(&text, &session) {
            Ok(turn) => turn,
            Err(e) => {
                tracing::error!(error = %e, "failed to save booking");
                speaker.speak(SAVE_FAILED).await?;
                return Err(e).context("failed to save booking");
            }
        };

        speaker.speak(&turn.reply).await?;
        session = turn.session;

        match turn.outcome {
            Outcome::Continue => {}
            Outcome::Exit => return Ok(ConversationEnd::Exited),
            Outcome::Booked(record) => return Ok(ConversationEnd::Booked(record)),
        }
    }
}
