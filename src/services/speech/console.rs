use anyhow::Context;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use super::{Speaker, Transcriber, Transcript};
use crate::errors::AppError;

/// Reads one utterance per stdin line.
pub struct ConsoleTranscriber {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsoleTranscriber {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for ConsoleTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for ConsoleTranscriber {
    async fn transcribe(&mut self) -> anyhow::Result<Transcript> {
        let line = self
            .lines
            .next_line()
            .await
            .context("failed to read from stdin")?;

        Ok(match line {
            Some(line) if line.trim().is_empty() => Transcript::Silence,
            Some(line) => Transcript::Speech(line),
            None => Transcript::Closed,
        })
    }
}

/// Prints replies to stdout.
pub struct ConsoleSpeaker;

#[async_trait]
impl Speaker for ConsoleSpeaker {
    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("Assistant: {text}\n").as_bytes())
            .await
            .map_err(|e| AppError::Speech(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| AppError::Speech(e.to_string()))?;
        Ok(())
    }
}
