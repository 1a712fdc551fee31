use crate::core::session::ChatSession;
use crate::domain::ports::Responder;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "> ";

/// Line-oriented chat loop: one input line in, one reply out.
pub struct AssistantEngine<R: Responder> {
    session: ChatSession<R>,
    assistant_name: String,
    thinking_delay: Duration,
}

impl<R: Responder> AssistantEngine<R> {
    pub fn new(session: ChatSession<R>, assistant_name: impl Into<String>) -> Self {
        Self {
            session,
            assistant_name: assistant_name.into(),
            thinking_delay: Duration::ZERO,
        }
    }

    /// Cosmetic pause before each reply is shown. The reply is already computed.
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    /// Runs until EOF or `exit`/`quit`; returns the number of exchanges.
    pub async fn run<I, O>(&mut self, input: I, output: &mut O) -> Result<usize>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        tracing::info!("Starting chat session");

        if let Some(welcome) = self.session.messages().first() {
            let line = format!("{}: {}\n\n", self.assistant_name, welcome.content);
            output.write_all(line.as_bytes()).await?;
        }

        let mut lines = input.lines();
        let mut exchanges = 0;

        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                output.write_all(b"\n").await?;
                break;
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                tracing::debug!("Exit requested");
                break;
            }

            if self.exchange(trimmed, output).await? {
                exchanges += 1;
            }
        }

        output.flush().await?;
        tracing::info!("Chat session ended after {} exchange(s)", exchanges);
        Ok(exchanges)
    }

    /// Sends one message and writes the reply. Returns `false` for blank input.
    pub async fn exchange<O>(&mut self, message: &str, output: &mut O) -> Result<bool>
    where
        O: AsyncWrite + Unpin,
    {
        let Some(reply) = self.session.send(message).map(|m| m.content.clone()) else {
            return Ok(false);
        };

        if !self.thinking_delay.is_zero() {
            tokio::time::sleep(self.thinking_delay).await;
        }

        let line = format!("{}: {}\n\n", self.assistant_name, reply);
        output.write_all(line.as_bytes()).await?;
        output.flush().await?;
        Ok(true)
    }

    pub fn session(&self) -> &ChatSession<R> {
        &self.session
    }

    pub fn into_session(self) -> ChatSession<R> {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::selector::{KeywordSelector, FALLBACK_REPLY};
    use std::sync::Arc;

    fn engine() -> AssistantEngine<KeywordSelector> {
        let selector = KeywordSelector::new(Arc::new(Catalog::builtin()));
        AssistantEngine::new(ChatSession::new(selector, "Welcome!"), "Bot")
    }

    #[tokio::test]
    async fn test_exchange_skips_blank_input() {
        let mut engine = engine();
        let mut out = Vec::new();

        assert!(!engine.exchange("   ", &mut out).await.unwrap());
        assert!(out.is_empty());

        assert!(engine.exchange("banana peel", &mut out).await.unwrap());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("Bot: {}\n\n", FALLBACK_REPLY));
    }

    #[tokio::test(start_paused = true)]
    async fn test_thinking_delay_elapses_before_reply() {
        let mut engine = engine().with_thinking_delay(Duration::from_millis(1500));
        let mut out = Vec::new();

        let started = tokio::time::Instant::now();
        engine.exchange("help", &mut out).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
