// SPDX-License-Identifier: MPL-2.0
//! Terminal renderer.
//!
//! Prints one line when a banner appears and one when it goes away. Used by
//! the `message-bar` binary; works with any [`Write`] target.

use crate::application::port::{Completion, DisplaySurface, SurfaceError};
use crate::domain::message::{Message, MessageType};
use std::io::{self, Write};

/// Renders banners as text lines.
pub struct ConsoleSurface {
    out: Box<dyn Write + Send>,
    showing: Option<String>,
}

impl ConsoleSurface {
    /// Writes to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    #[must_use]
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out, showing: None }
    }

    fn badge(message_type: MessageType) -> &'static str {
        match message_type {
            MessageType::Error => "[error]",
            MessageType::Notification => "[info]",
            MessageType::Success => "[ok]",
        }
    }

    /// The single line used to render `message`.
    #[must_use]
    pub fn render(message: &Message) -> String {
        let mut line = format!(
            "{} {}",
            Self::badge(message.message_type()),
            message.display_title()
        );
        if let Some(explanation) = message.title_explanation() {
            line.push_str(&format!(" ({explanation})"));
        }
        if let Some(detail) = message.detail() {
            line.push_str(&format!(": {detail}"));
        }
        line
    }

    fn write_line(&mut self, line: &str) -> Result<(), SurfaceError> {
        writeln!(self.out, "{line}")
            .and_then(|()| self.out.flush())
            .map_err(|err| SurfaceError::Other(err.to_string()))
    }
}

impl DisplaySurface for ConsoleSurface {
    fn show(&mut self, message: &Message, _animated: bool) -> Result<Completion, SurfaceError> {
        let line = Self::render(message);
        self.write_line(&format!("+ {line}"))?;
        self.showing = Some(line);
        Ok(Completion::Immediate)
    }

    fn hide(&mut self, _animated: bool) -> Result<Completion, SurfaceError> {
        if let Some(line) = self.showing.take() {
            self.write_line(&format!("- {line}"))?;
        }
        Ok(Completion::Immediate)
    }

    fn is_showing(&self) -> bool {
        self.showing.is_some()
    }

    fn refresh(&mut self, message: &Message) -> Result<(), SurfaceError> {
        let line = Self::render(message);
        self.write_line(&format!("~ {line}"))?;
        self.showing = Some(line);
        Ok(())
    }
}

impl std::fmt::Debug for ConsoleSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSurface")
            .field("showing", &self.showing)
            .finish_non_exhaustive()
    }
}
