//! Callback token encoding.
//!
//! Telegram is stateless between rendering an effect menu and the button
//! press that follows, so the pair `(source message id, effect key)` rides
//! inside the button's `callback_data` field. The wire format is a minimal
//! `"<message_id>:<effect_key>"` pair; Telegram caps callback data at 64
//! bytes, which this comfortably fits.

use teloxide::types::MessageId;

use crate::error::{BotError, Result};

/// A decoded callback payload: which message to transform, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackToken {
    pub message_id: MessageId,
    pub effect_key: String,
}

impl CallbackToken {
    pub fn new(message_id: MessageId, effect_key: impl Into<String>) -> Self {
        Self {
            message_id,
            effect_key: effect_key.into(),
        }
    }

    /// Serialize for a button's `callback_data` field.
    pub fn encode(&self) -> String {
        debug_assert!(!self.effect_key.contains(':'));
        format!("{}:{}", self.message_id.0, self.effect_key)
    }

    /// Parse a payload back into a token. Anything that is not exactly an
    /// integer, a colon, and a colon-free key is rejected.
    pub fn decode(data: &str) -> Result<Self> {
        let malformed = || BotError::MalformedToken(data.to_string());

        let (id_part, key_part) = data.split_once(':').ok_or_else(malformed)?;
        if key_part.is_empty() || key_part.contains(':') {
            return Err(malformed());
        }
        let id: i32 = id_part.parse().map_err(|_| malformed())?;

        Ok(Self::new(MessageId(id), key_part))
    }
}
