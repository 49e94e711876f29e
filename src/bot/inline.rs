use teloxide::prelude::*;
use teloxide::types::{
    ChatType, InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryResult,
    InlineQueryResultArticle, InputMessageContent, InputMessageContentText, MessageId,
};

use crate::effects;
use crate::token::CallbackToken;

/// Inline query handler.
///
/// Telegram inline queries carry no reply-to-message context; the closest
/// signal the API exposes is `chat_type == Sender` (the query was typed in
/// the user's own chat with themselves). In that case we offer the effect
/// menu; an empty query gets a usage hint; anything else gets no results.
pub async fn handle_inline_query(
    bot: Bot,
    q: InlineQuery,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let results = if matches!(q.chat_type, Some(ChatType::Sender)) {
        effect_results()
    } else if q.query.trim().is_empty() {
        help_results()
    } else {
        Vec::new()
    };

    bot.answer_inline_query(q.id, results).await?;

    Ok(())
}

/// One article per catalog effect, each with a single "process" button.
///
/// Inline-sent messages cannot reference a source voice message, so these
/// tokens carry message id 0; pressing such a button fails resolution and
/// the user gets the generic failure message.
pub fn effect_results() -> Vec<InlineQueryResult> {
    effects::all()
        .iter()
        .map(|effect| {
            let content = InputMessageContent::Text(InputMessageContentText::new(format!(
                "Обработка голосового сообщения с эффектом: {}",
                effect.display_name
            )));
            let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
                "Обработать",
                CallbackToken::new(MessageId(0), effect.key).encode(),
            )]]);

            InlineQueryResult::Article(
                InlineQueryResultArticle::new(effect.key, effect.display_name, content)
                    .reply_markup(keyboard),
            )
        })
        .collect()
}

/// A single usage-hint article for empty queries.
pub fn help_results() -> Vec<InlineQueryResult> {
    let content = InputMessageContent::Text(InputMessageContentText::new(
        "1. Ответьте на голосовое сообщение\n2. Выберите эффект из списка",
    ));

    vec![InlineQueryResult::Article(InlineQueryResultArticle::new(
        "help",
        "Как использовать бота",
        content,
    ))]
}
