use teloxide::macros::BotCommands;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands as _;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommand {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show help")]
    Help,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: BotCommand,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cmd {
        BotCommand::Start => {
            bot.send_message(
                msg.chat.id,
                "Привет! Я бот для обработки голосовых сообщений.\n\
                 Пришлите мне голосовое сообщение или вызовите меня через \
                 @имя_бота в любой переписке, и я помогу обработать его.",
            )
            .await?;
        }

        BotCommand::Help => {
            bot.send_message(msg.chat.id, BotCommand::descriptions().to_string())
                .await?;
        }
    }

    Ok(())
}
