//! Inbound message shapes and the outbound messenger contract.
//!
//! The hosting framework owns the messaging transport; this module only
//! defines the two values exchanged with it. Inbound, a message arrives as an
//! [`InboundMessage`] whose payload is one of the known shape variants.
//! Outbound, replies go through the [`Messenger`] trait, which the framework
//! implements on top of its connection handle.

use mockall::automock;

/// Known textual payload shapes of an inbound chat message.
///
/// Different transport wrappers expose the message text under different
/// fields. Instead of probing fields speculatively, the framework maps each
/// message into exactly one of these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Plain conversation body
    Conversation(String),
    /// Quoted or link-preview wrapper carrying its own text field
    ExtendedText(String),
    /// Wrapper types exposing a bare text field
    Plain(String),
    /// No textual payload
    Empty,
}

/// A message received from the chat network.
///
/// Handlers never send without quoting the triggering message, so the whole
/// value is carried through each invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Textual payload of the message
    pub content: MessageContent,
    /// Sender display name, used as a last-resort text source
    pub push_name: Option<String>,
}

impl InboundMessage {
    /// Creates a message with a plain conversation body.
    pub fn conversation(text: &str) -> Self {
        InboundMessage {
            content: MessageContent::Conversation(text.to_owned()),
            push_name: None,
        }
    }

    /// Creates a message with an extended-text payload.
    pub fn extended_text(text: &str) -> Self {
        InboundMessage {
            content: MessageContent::ExtendedText(text.to_owned()),
            push_name: None,
        }
    }

    /// Creates a message with a bare text field.
    pub fn plain(text: &str) -> Self {
        InboundMessage {
            content: MessageContent::Plain(text.to_owned()),
            push_name: None,
        }
    }

    /// Creates a message without any textual payload.
    pub fn empty() -> Self {
        InboundMessage {
            content: MessageContent::Empty,
            push_name: None,
        }
    }

    /// Attaches the sender display name.
    pub fn with_push_name(mut self, push_name: &str) -> Self {
        self.push_name = Some(push_name.to_owned());
        self
    }

    /// Extracts the plain text of the message.
    ///
    /// Runs an ordered sequence of capability checks: the payload variant is
    /// consulted first, then the sender display name. The first non-empty
    /// trimmed candidate wins; an empty string is returned when none match.
    ///
    /// # Examples
    ///
    /// ```
    /// # use knightbot::messaging::InboundMessage;
    /// let message = InboundMessage::conversation("  hello  ");
    /// assert_eq!(message.text(), "hello");
    ///
    /// let message = InboundMessage::empty().with_push_name("Alice");
    /// assert_eq!(message.text(), "Alice");
    /// ```
    pub fn text(&self) -> String {
        let payload = match &self.content {
            MessageContent::Conversation(text)
            | MessageContent::ExtendedText(text)
            | MessageContent::Plain(text) => text.trim(),
            MessageContent::Empty => "",
        };

        if !payload.is_empty() {
            return payload.to_owned();
        }

        match &self.push_name {
            Some(push_name) if !push_name.trim().is_empty() => push_name.trim().to_owned(),
            _ => String::new(),
        }
    }
}

/// Outbound messaging contract implemented by the hosting framework.
///
/// Both operations quote the triggering message. Handlers only use the
/// returned result to feed their top-level error guard; they never inspect
/// it beyond that.
#[automock]
pub trait Messenger {
    /// Sends a plain text reply to a chat.
    async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        quoted: &InboundMessage,
    ) -> Result<(), anyhow::Error>;

    /// Sends an image with a caption to a chat.
    async fn send_image(
        &self,
        chat_id: &str,
        image: Vec<u8>,
        caption: &str,
        quoted: &InboundMessage,
    ) -> Result<(), anyhow::Error>;
}
