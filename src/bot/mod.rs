pub mod callbacks;
pub mod commands;
pub mod handlers;
pub mod inline;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;

use crate::audio::Transformer;
use crate::config::AppConfig;

/// Shared application state, accessible from all handlers.
pub struct AppState {
    pub config: AppConfig,
    pub transformer: Transformer,
}

/// Build the teloxide update handler tree.
pub fn build_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    let command_handler = Update::filter_message()
        .filter_command::<commands::BotCommand>()
        .endpoint(commands::handle_command);

    let inline_handler = Update::filter_inline_query().endpoint(inline::handle_inline_query);

    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle_callback);

    let voice_handler = Update::filter_message()
        .filter(|msg: Message| msg.voice().is_some())
        .endpoint(handlers::handle_voice);

    dptree::entry()
        .branch(command_handler)
        .branch(inline_handler)
        .branch(callback_handler)
        .branch(voice_handler)
}
