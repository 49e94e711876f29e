use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ReplyParameters};

use crate::effects;
use crate::token::CallbackToken;

/// Voice message handler: offer the effect menu.
///
/// The menu is sent as a reply to the voice message. That reply link is what
/// lets the callback handler find the source audio later, since each button
/// only carries a `message_id:effect_key` token.
pub async fn handle_voice(
    bot: Bot,
    msg: Message,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!(
        chat_id = msg.chat.id.0,
        message_id = msg.id.0,
        "voice message received, sending effect menu"
    );

    bot.send_message(msg.chat.id, "Выберите эффект для голосового сообщения:")
        .reply_markup(effect_keyboard(msg.id))
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}

/// One button per catalog effect, in catalog order, one per row.
pub fn effect_keyboard(source_message_id: MessageId) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = effects::all()
        .iter()
        .map(|effect| {
            vec![InlineKeyboardButton::callback(
                effect.display_name.to_string(),
                CallbackToken::new(source_message_id, effect.key).encode(),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn keyboard_has_one_labeled_button_per_effect() {
        let keyboard = effect_keyboard(MessageId(7));
        assert_eq!(keyboard.inline_keyboard.len(), effects::all().len());

        let labels: Vec<&str> = keyboard
            .inline_keyboard
            .iter()
            .map(|row| row[0].text.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Робот",
                "Эхо",
                "Замедление",
                "Ускорение",
                "Обратное воспроизведение",
                "Автотюн"
            ]
        );
    }

    #[test]
    fn buttons_carry_decodable_tokens() {
        let keyboard = effect_keyboard(MessageId(42));
        for (row, effect) in keyboard.inline_keyboard.iter().zip(effects::all()) {
            let InlineKeyboardButtonKind::CallbackData(data) = &row[0].kind else {
                panic!("expected a callback button");
            };
            let token = CallbackToken::decode(data).unwrap();
            assert_eq!(token.message_id, MessageId(42));
            assert_eq!(token.effect_key, effect.key);
        }
    }
}
