// SPDX-License-Identifier: MPL-2.0
//! Banner message model.
//!
//! A [`Message`] describes one banner: its text, its [`MessageType`], how long it
//! stays up ([`HideDelay`]) and an optional reuse identifier used to collapse
//! repeated submissions of the same logical banner. Messages are immutable once
//! built; every factory validates that the title is not blank.
//!
//! # Example
//!
//! ```
//! use message_bar::domain::message::{Message, MessageType};
//!
//! let saved = Message::new("Saved", None, MessageType::Success, Some("save"), 2.0).unwrap();
//! assert_eq!(saved.reuse_identifier(), Some("save"));
//!
//! let offline = Message::with_reuse_identifier("network")
//!     .title("You are offline")
//!     .detail("Changes will sync when the connection returns")
//!     .build()
//!     .unwrap();
//! assert_eq!(offline.message_type(), MessageType::Error);
//!
//! assert!(Message::with_title("", MessageType::Success).is_err());
//! ```

mod newtypes;
mod types;

pub use newtypes::HideDelay;
pub use types::{Colour, MessageId, MessageType, Style};

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Callback invoked with the showing message each time its banner is tapped.
pub type TapHandler = Arc<dyn Fn(&Message) + Send + Sync>;

/// A displayable banner.
#[derive(Clone)]
pub struct Message {
    id: MessageId,
    title: String,
    title_explanation: Option<String>,
    detail: Option<String>,
    message_type: MessageType,
    reuse_identifier: Option<String>,
    duration: HideDelay,
    enclose_title_in_quotes: bool,
    style: Style,
    on_tap: Option<TapHandler>,
}

impl Message {
    /// Starts a banner with the given reuse identifier and a blank title.
    ///
    /// The title must be supplied before [`MessageBuilder::build`] succeeds.
    pub fn with_reuse_identifier(identifier: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new().reuse_identifier(identifier)
    }

    /// Starts a banner with the given type and reuse identifier and a blank title.
    pub fn with_type(message_type: MessageType, identifier: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new()
            .message_type(message_type)
            .reuse_identifier(identifier)
    }

    /// Creates a banner with a title and type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `title` is blank.
    pub fn with_title(title: impl Into<String>, message_type: MessageType) -> Result<Self> {
        MessageBuilder::new()
            .title(title)
            .message_type(message_type)
            .build()
    }

    /// Creates a banner with a title, type and reuse identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `title` is blank.
    pub fn with_title_and_identifier(
        title: impl Into<String>,
        message_type: MessageType,
        identifier: impl Into<String>,
    ) -> Result<Self> {
        MessageBuilder::new()
            .title(title)
            .message_type(message_type)
            .reuse_identifier(identifier)
            .build()
    }

    /// Creates a banner with a title, detail text and type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `title` is blank.
    pub fn with_title_and_detail(
        title: impl Into<String>,
        detail: impl Into<String>,
        message_type: MessageType,
    ) -> Result<Self> {
        MessageBuilder::new()
            .title(title)
            .detail(detail)
            .message_type(message_type)
            .build()
    }

    /// Creates a fully specified banner.
    ///
    /// `duration_secs` of zero keeps the banner up until it is hidden explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `title` is blank.
    pub fn new(
        title: impl Into<String>,
        detail: Option<&str>,
        message_type: MessageType,
        reuse_identifier: Option<&str>,
        duration_secs: f64,
    ) -> Result<Self> {
        let mut builder = MessageBuilder::new()
            .title(title)
            .message_type(message_type)
            .duration_secs(duration_secs);
        if let Some(detail) = detail {
            builder = builder.detail(detail);
        }
        if let Some(identifier) = reuse_identifier {
            builder = builder.reuse_identifier(identifier);
        }
        builder.build()
    }

    /// Returns a builder for setting every field explicitly.
    #[must_use]
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Same banner content under another identity.
    pub(crate) fn adopting(mut self, id: MessageId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the title as it should be rendered, quoted if requested.
    #[must_use]
    pub fn display_title(&self) -> String {
        if self.enclose_title_in_quotes {
            format!("\u{201C}{}\u{201D}", self.title)
        } else {
            self.title.clone()
        }
    }

    #[must_use]
    pub fn title_explanation(&self) -> Option<&str> {
        self.title_explanation.as_deref()
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    #[must_use]
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Returns the deduplication key, if any. Never returns an empty string.
    #[must_use]
    pub fn reuse_identifier(&self) -> Option<&str> {
        self.reuse_identifier.as_deref()
    }

    #[must_use]
    pub fn duration(&self) -> HideDelay {
        self.duration
    }

    #[must_use]
    pub fn encloses_title_in_quotes(&self) -> bool {
        self.enclose_title_in_quotes
    }

    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Returns true if a tap handler is attached.
    #[must_use]
    pub fn has_tap_handler(&self) -> bool {
        self.on_tap.is_some()
    }

    /// Runs the tap handler, if any.
    pub(crate) fn invoke_tap_handler(&self) {
        if let Some(handler) = &self.on_tap {
            handler(self);
        }
    }

    /// Returns true if both banners carry the same non-empty reuse identifier.
    #[must_use]
    pub fn is_same_banner(&self, other: &Message) -> bool {
        match (self.reuse_identifier(), other.reuse_identifier()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("title_explanation", &self.title_explanation)
            .field("detail", &self.detail)
            .field("message_type", &self.message_type)
            .field("reuse_identifier", &self.reuse_identifier)
            .field("duration", &self.duration)
            .field("enclose_title_in_quotes", &self.enclose_title_in_quotes)
            .field("style", &self.style)
            .field("on_tap", &self.on_tap.is_some())
            .finish()
    }
}

// =============================================================================
// MessageBuilder
// =============================================================================

/// Step-by-step construction of a [`Message`].
#[derive(Clone, Default)]
#[must_use]
pub struct MessageBuilder {
    title: String,
    title_explanation: Option<String>,
    detail: Option<String>,
    message_type: MessageType,
    reuse_identifier: Option<String>,
    duration: HideDelay,
    enclose_title_in_quotes: bool,
    style: Style,
    on_tap: Option<TapHandler>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.title_explanation = Some(explanation.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    /// Sets the deduplication key. Blank identifiers mean "no identifier".
    pub fn reuse_identifier(mut self, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        self.reuse_identifier = (!identifier.trim().is_empty()).then_some(identifier);
        self
    }

    /// Sets the auto-hide delay in seconds; zero means manual hide only.
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration = HideDelay::from_secs_f64(secs);
        self
    }

    pub fn hide_after(mut self, duration: Duration) -> Self {
        self.duration = HideDelay::from_duration(duration);
        self
    }

    pub fn enclose_title_in_quotes(mut self, enclose: bool) -> Self {
        self.enclose_title_in_quotes = enclose;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn on_tap(mut self, handler: impl Fn(&Message) + Send + Sync + 'static) -> Self {
        self.on_tap = Some(Arc::new(handler));
        self
    }

    /// Validates and produces the message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no non-blank title was set.
    pub fn build(self) -> Result<Message> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "message title must not be empty".to_string(),
            ));
        }
        Ok(Message {
            id: MessageId::next(),
            title: self.title,
            title_explanation: self.title_explanation,
            detail: self.detail,
            message_type: self.message_type,
            reuse_identifier: self.reuse_identifier,
            duration: self.duration,
            enclose_title_in_quotes: self.enclose_title_in_quotes,
            style: self.style,
            on_tap: self.on_tap,
        })
    }
}

impl fmt::Debug for MessageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuilder")
            .field("title", &self.title)
            .field("message_type", &self.message_type)
            .field("reuse_identifier", &self.reuse_identifier)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
