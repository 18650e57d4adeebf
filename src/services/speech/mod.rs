pub mod console;

use async_trait::async_trait;

/// One listening attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    Speech(String),
    /// Nothing intelligible was heard; keep listening.
    Silence,
    /// The input source is gone.
    Closed,
}

#[async_trait]
pub trait Transcriber: Send {
    async fn transcribe(&mut self) -> anyhow::Result<Transcript>;
}

#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str) -> anyhow::Result<()>;
}
