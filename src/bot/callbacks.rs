use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::net::Download;
use teloxide::types::{InputFile, Message, ReplyParameters};

use crate::bot::AppState;
use crate::effects;
use crate::error::{BotError, Result};
use crate::token::CallbackToken;

const GENERIC_FAILURE: &str = "Произошла ошибка при обработке голосового сообщения";

/// Effect-button press handler.
///
/// The press is acknowledged up front; Telegram expects an answer whether or
/// not processing succeeds. Every failure after that point is logged with the
/// press context and collapsed into one generic user-facing message.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Presses arriving without a reachable menu message (inline-origin
    // buttons, or a menu too old for the API to include) cannot be served
    // and have no chat to reply in; the callback answer itself is the only
    // channel back to the user.
    if menu_message(&q).is_none() {
        tracing::warn!(
            user_id = q.from.id.0,
            callback_data = q.data.as_deref().unwrap_or(""),
            "press without reachable menu message"
        );
        bot.answer_callback_query(q.id.clone())
            .text(GENERIC_FAILURE)
            .show_alert(true)
            .await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id.clone()).await?;

    let data = match q.data.as_deref() {
        Some(d) => d,
        None => return Ok(()),
    };

    if let Err(e) = process_press(&bot, &q, data, &state).await {
        tracing::error!(
            user_id = q.from.id.0,
            callback_data = data,
            "effect processing failed: {e}"
        );
        if let Some(menu_msg) = menu_message(&q) {
            if let Err(send_err) = bot.send_message(menu_msg.chat.id, GENERIC_FAILURE).await {
                tracing::error!(
                    user_id = q.from.id.0,
                    callback_data = data,
                    "failed to report processing error: {send_err}"
                );
            }
        }
    }

    Ok(())
}

async fn process_press(bot: &Bot, q: &CallbackQuery, data: &str, state: &AppState) -> Result<()> {
    let token = CallbackToken::decode(data)?;
    let effect = effects::get(&token.effect_key)?;

    let menu_msg = menu_message(q).ok_or(BotError::MessageUnavailable)?;
    let source = resolve_source(menu_msg, &token)?;
    let voice = source.voice().ok_or(BotError::NotVoiceMessage)?;

    let file = bot.get_file(&voice.file.id).await?;
    let mut input = Vec::new();
    bot.download_file(&file.path, &mut input).await?;

    let notice = bot
        .send_message(
            menu_msg.chat.id,
            format!(
                "Обработка голосового сообщения с эффектом: {}...",
                effect.display_name
            ),
        )
        .await?;

    let transformed = state.transformer.apply(effect, &input).await?;

    tracing::info!(
        chat_id = menu_msg.chat.id.0,
        source_message_id = source.id.0,
        effect = effect.key,
        "sending transformed voice"
    );

    let output = InputFile::memory(transformed).file_name("processed.ogg");
    bot.send_voice(menu_msg.chat.id, output)
        .caption(format!("Обработано с эффектом: {}", effect.display_name))
        .reply_parameters(ReplyParameters::new(source.id))
        .await?;

    bot.delete_message(menu_msg.chat.id, notice.id).await?;

    Ok(())
}

/// The regular chat message the pressed button hangs off, if the API still
/// has it. Inline-origin presses carry only an `inline_message_id` and
/// resolve to `None` here.
fn menu_message(q: &CallbackQuery) -> Option<&Message> {
    q.message.as_ref().and_then(|m| m.regular_message())
}

/// Resolve the token back to the source voice message.
///
/// The effect menu was sent as a reply to the voice message, so the source is
/// the menu's `reply_to_message`, cross-checked against the id the token
/// carries. A deleted source, a menu that lost its reply link, or an id
/// mismatch all resolve to `MessageUnavailable`.
fn resolve_source<'a>(menu_msg: &'a Message, token: &CallbackToken) -> Result<&'a Message> {
    menu_msg
        .reply_to_message()
        .filter(|m| m.id == token.message_id)
        .ok_or(BotError::MessageUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(json: serde_json::Value) -> CallbackQuery {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn inline_origin_press_has_no_menu_message() {
        // Buttons minted by the inline path arrive with inline_message_id
        // only; these presses must take the answer-with-failure-text path.
        let q = press(serde_json::json!({
            "id": "1",
            "from": {"id": 10, "is_bot": false, "first_name": "Утя"},
            "inline_message_id": "AgAAAxkBAAE",
            "chat_instance": "-123",
            "data": "0:echo"
        }));
        assert!(menu_message(&q).is_none());
    }

    #[test]
    fn inaccessible_menu_message_resolves_to_none() {
        // Telegram marks messages it can no longer return with date 0.
        let q = press(serde_json::json!({
            "id": "2",
            "from": {"id": 10, "is_bot": false, "first_name": "Утя"},
            "chat_instance": "-123",
            "data": "7:echo",
            "message": {
                "message_id": 8,
                "date": 0,
                "chat": {"id": 10, "type": "private", "first_name": "Утя"}
            }
        }));
        assert!(menu_message(&q).is_none());
    }

    #[test]
    fn source_resolves_through_the_menu_reply_link() {
        let q = press(serde_json::json!({
            "id": "3",
            "from": {"id": 10, "is_bot": false, "first_name": "Утя"},
            "chat_instance": "-123",
            "data": "7:echo",
            "message": {
                "message_id": 8,
                "date": 1710000000,
                "chat": {"id": 10, "type": "private", "first_name": "Утя"},
                "text": "Выберите эффект для голосового сообщения:",
                "reply_to_message": {
                    "message_id": 7,
                    "date": 1709999990,
                    "chat": {"id": 10, "type": "private", "first_name": "Утя"},
                    "voice": {
                        "file_id": "AwACAgIAAxkBAAE",
                        "file_unique_id": "AgADbQEAAn8",
                        "file_size": 4096,
                        "duration": 3,
                        "mime_type": "audio/ogg"
                    }
                }
            }
        }));
        let menu = menu_message(&q).unwrap();

        let token = CallbackToken::decode("7:echo").unwrap();
        let source = resolve_source(menu, &token).unwrap();
        assert!(source.voice().is_some());

        // An id mismatch means the menu no longer points at the message the
        // token was minted for.
        let stale = CallbackToken::decode("6:echo").unwrap();
        assert!(matches!(
            resolve_source(menu, &stale),
            Err(BotError::MessageUnavailable)
        ));
    }
}
