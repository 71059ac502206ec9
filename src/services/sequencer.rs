//! Timed message sequencer.
//!
//! Dispatches an ordered list of [`TimedMessage`] values to one chat,
//! honoring each item's pre-send delay and typing-indicator flag. A failed
//! send never aborts the rest of the sequence: every item gets exactly one
//! attempt and the caller receives one [`DeliveryOutcome`] per input item,
//! in input order.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::types::ChatId;
use thiserror::Error;
use tracing::{error, warn};

/// Below this delay a typing indicator would only flicker, so none is sent.
pub const TYPING_THRESHOLD: Duration = Duration::from_millis(200);

/// Markup mode for a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageFormat {
    /// No parse mode, text is sent verbatim.
    #[default]
    Plain,
    /// Telegram HTML parse mode.
    Html,
}

/// An inline URL button attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAction {
    /// Button label shown to the user.
    pub label: String,
    /// Target URL opened on tap.
    pub url: String,
}

/// One scripted line plus its pacing and formatting metadata.
#[derive(Debug, Clone)]
pub struct TimedMessage {
    /// Message body.
    pub text: String,
    /// Pause observed before the send attempt.
    pub delay_before: Duration,
    /// Whether to emit a typing indicator while the delay elapses.
    pub show_typing: bool,
    /// Markup mode of the body.
    pub formatting: MessageFormat,
    /// Optional inline URL button.
    pub action: Option<InlineAction>,
}

impl TimedMessage {
    /// Creates a plain-text message with no delay and no typing indicator.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay_before: Duration::ZERO,
            show_typing: false,
            formatting: MessageFormat::Plain,
            action: None,
        }
    }

    /// Creates an HTML-formatted message with no delay and no typing indicator.
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            formatting: MessageFormat::Html,
            ..Self::plain(text)
        }
    }

    /// Sets the pause observed before the send attempt.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_before = delay;
        self
    }

    /// Enables the typing indicator for this message.
    pub fn with_typing(mut self) -> Self {
        self.show_typing = true;
        self
    }

    /// Attaches an inline URL button.
    pub fn with_action(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.action = Some(InlineAction {
            label: label.into(),
            url: url.into(),
        });
        self
    }
}

/// An ordered list of timed messages, owned by the caller for one dispatch.
pub type MessageSequence = Vec<TimedMessage>;

/// Classified delivery failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// Transient failure (rate limit, network); the next item is still tried.
    #[error("recoverable delivery failure: {0}")]
    Recoverable(String),
    /// The target can no longer receive anything (blocked, chat gone).
    #[error("delivery target invalid: {0}")]
    TargetInvalid(String),
    /// Anything else, including malformed requests.
    #[error("unexpected delivery failure: {0}")]
    Unexpected(String),
}

impl DeliveryError {
    /// True when no further sends to this target can succeed.
    pub fn is_target_invalid(&self) -> bool {
        matches!(self, DeliveryError::TargetInvalid(_))
    }
}

/// Handle to a message accepted by the delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef(pub i32);

/// Per-message result of an attempted send.
#[derive(Debug, Clone)]
pub enum DeliveryOutcome {
    /// The channel accepted the message.
    Sent(MessageRef),
    /// The send attempt failed; the marker says how.
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    /// True for a successful send.
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent(_))
    }
}

/// Capability the sequencer calls but does not own: a chat provider that can
/// emit presence signals and deliver messages.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Emits a "composing" presence signal to the target.
    async fn send_typing(&self, target: ChatId) -> Result<(), DeliveryError>;

    /// Delivers one message to the target.
    async fn send_message(
        &self,
        target: ChatId,
        message: &TimedMessage,
    ) -> Result<MessageRef, DeliveryError>;
}

/// Sends `sequence` to `target` in strict order.
///
/// `initial_delay` is observed once before the first item; an empty sequence
/// returns immediately without it. The returned list always has one outcome
/// per input item, index-aligned, so callers can correlate failures to
/// specific script lines.
///
/// Once a send fails with [`DeliveryError::TargetInvalid`] the remaining
/// items are marked failed without further sleeps or channel calls.
pub async fn send_delayed_sequence<C>(
    channel: &C,
    target: ChatId,
    sequence: &[TimedMessage],
    initial_delay: Duration,
) -> Vec<DeliveryOutcome>
where
    C: DeliveryChannel + ?Sized,
{
    let mut outcomes = Vec::with_capacity(sequence.len());
    if sequence.is_empty() {
        return outcomes;
    }

    if !initial_delay.is_zero() {
        tokio::time::sleep(initial_delay).await;
    }

    let mut dead_target: Option<DeliveryError> = None;
    for (index, message) in sequence.iter().enumerate() {
        if let Some(err) = &dead_target {
            outcomes.push(DeliveryOutcome::Failed(err.clone()));
            continue;
        }

        if message.show_typing && message.delay_before > TYPING_THRESHOLD {
            if let Err(err) = channel.send_typing(target).await {
                warn!(
                    "typing indicator failed before item {} in chat {}: {}",
                    index, target.0, err
                );
            }
        }

        if !message.delay_before.is_zero() {
            tokio::time::sleep(message.delay_before).await;
        }

        match channel.send_message(target, message).await {
            Ok(handle) => outcomes.push(DeliveryOutcome::Sent(handle)),
            Err(err) => {
                match &err {
                    DeliveryError::Recoverable(reason) => {
                        warn!(
                            "item {} in chat {} not delivered (recoverable): {}",
                            index, target.0, reason
                        );
                    }
                    DeliveryError::TargetInvalid(reason) => {
                        warn!(
                            "chat {} became invalid at item {}; failing the rest of the sequence: {}",
                            target.0, index, reason
                        );
                        dead_target = Some(err.clone());
                    }
                    DeliveryError::Unexpected(reason) => {
                        error!(
                            "item {} in chat {} not delivered (unexpected): {}",
                            index, target.0, reason
                        );
                    }
                }
                outcomes.push(DeliveryOutcome::Failed(err));
            }
        }
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let msg = TimedMessage::plain("hi");
        assert_eq!(msg.delay_before, Duration::ZERO);
        assert!(!msg.show_typing);
        assert_eq!(msg.formatting, MessageFormat::Plain);
        assert!(msg.action.is_none());
    }

    #[test]
    fn builder_chain() {
        let msg = TimedMessage::html("<b>x</b>")
            .with_delay(Duration::from_millis(700))
            .with_typing()
            .with_action("Open", "https://example.com/x");
        assert_eq!(msg.formatting, MessageFormat::Html);
        assert_eq!(msg.delay_before, Duration::from_millis(700));
        assert!(msg.show_typing);
        let action = msg.action.unwrap();
        assert_eq!(action.label, "Open");
        assert_eq!(action.url, "https://example.com/x");
    }

    #[test]
    fn target_invalid_classification() {
        assert!(DeliveryError::TargetInvalid("blocked".into()).is_target_invalid());
        assert!(!DeliveryError::Recoverable("rate limit".into()).is_target_invalid());
        assert!(!DeliveryError::Unexpected("boom".into()).is_target_invalid());
    }
}
