use anyhow::Context;
use tracing_subscriber::EnvFilter;

use booking_assistant::config::AppConfig;
use booking_assistant::services::assistant::{self, ConversationEnd};
use booking_assistant::services::clock::SystemClock;
use booking_assistant::services::dialogue::DialogueEngine;
use booking_assistant::services::speech::console::{ConsoleSpeaker, ConsoleTranscriber};
use booking_assistant::store::{BookingStore, JsonFileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    config.validate()?;

    let store = JsonFileStore::new(&config.booking_file);
    let existing = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;
    tracing::info!(
        path = %store.path().display(),
        existing = existing.len(),
        max_advance_days = config.dialogue.max_advance_days,
        ask_room_count = config.dialogue.ask_room_count,
        "starting booking assistant"
    );

    let engine = DialogueEngine::new(config.dialogue.clone(), Box::new(store), Box::new(SystemClock));
    let mut transcriber = ConsoleTranscriber::new();
    let speaker = ConsoleSpeaker;

    tokio::select! {
        result = assistant::run_conversation(&engine, &mut transcriber, &speaker) => {
            match result? {
                ConversationEnd::Booked(record) => tracing::info!(
                    name = %record.name,
                    service = record.service.as_str(),
                    checkin = %record.checkin,
                    checkout = %record.checkout,
                    "booking confirmed"
                ),
                ConversationEnd::Exited => tracing::info!("caller ended the conversation"),
                ConversationEnd::InputClosed => tracing::info!("input closed before a booking was made"),
            }
        }
        _ = tokio::signal::ctrl_c() => tracing::info!("assistant stopped"),
    }

    Ok(())
}
