use tracing::warn;

use ferrite_sketch::Session;

// ---------------------------------------------------------------------------
// Flash messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind { Success, Error }

#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Success, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Error, text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

/// Owned by the request loop and lent to one handler at a time.
pub struct StudioState {
    pub session: Session,
    /// One-shot flash message for the next page render.
    pub flash:   Option<FlashMessage>,
}

impl StudioState {
    pub fn new(session: Session) -> Self {
        StudioState { session, flash: None }
    }

    /// Takes and returns the current flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<FlashMessage> {
        self.flash.take()
    }

    pub fn flash_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!("{}", text);
        self.flash = Some(FlashMessage::error(text));
    }

    pub fn flash_success(&mut self, text: impl Into<String>) {
        self.flash = Some(FlashMessage::success(text));
    }
}
