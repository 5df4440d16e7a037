//! Slash command declarations, registration, and interaction decoding.

use anyhow::Result;
use serenity::all::{
    Command, CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, GuildId,
    Http,
};
use tracing::info;

use crate::platform::CommandInvocation;

pub const POST: &str = "post";
pub const GET_POSTS: &str = "getposts";
pub const DELETE_ALL_POSTS: &str = "deleteallposts";

/// Maximum length of the /post message option, enforced by Discord.
const MESSAGE_MAX_LEN: u16 = 1000;

/// Descriptors for every command the bot supports.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(POST)
            .description("Post a message to the website")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "The message to post",
                )
                .required(true)
                .max_length(MESSAGE_MAX_LEN),
            ),
        CreateCommand::new(GET_POSTS)
            .description("Get the latest posts from the website")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "count",
                    "Number of posts to retrieve (default: 5)",
                )
                .min_int_value(1)
                .max_int_value(20),
            ),
        CreateCommand::new(DELETE_ALL_POSTS)
            .description("⚠️ Delete ALL posts from the website (Admin only)"),
    ]
}

/// Publish the command set to Discord's catalog.
///
/// Guild-scoped registration propagates near-instantly; global registration
/// can take up to an hour to roll out.
pub async fn register(http: &Http, guild_id: Option<u64>) -> Result<()> {
    info!("Started refreshing application (/) commands.");

    match guild_id {
        Some(id) => {
            GuildId::new(id).set_commands(http, definitions()).await?;
            info!("Successfully reloaded guild application (/) commands.");
        }
        None => {
            Command::set_global_commands(http, definitions()).await?;
            info!("Successfully reloaded global application (/) commands.");
        }
    }

    Ok(())
}

/// Decode an incoming interaction into a command invocation.
///
/// Returns `None` for command names outside the registered set; those
/// interactions are ignored.
pub fn decode(interaction: &CommandInteraction) -> Option<CommandInvocation> {
    match interaction.data.name.as_str() {
        POST => {
            let message = str_option(interaction, "message")?.to_string();
            Some(CommandInvocation::Post { message })
        }
        GET_POSTS => Some(CommandInvocation::GetPosts {
            count: int_option(interaction, "count"),
        }),
        DELETE_ALL_POSTS => Some(CommandInvocation::DeleteAllPosts),
        _ => None,
    }
}

fn str_option<'a>(interaction: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    interaction
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

fn int_option(interaction: &CommandInteraction, name: &str) -> Option<i64> {
    interaction
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_i64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_cover_the_command_set_in_order() {
        let json = serde_json::to_value(definitions()).unwrap();
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|command| command["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec![POST, GET_POSTS, DELETE_ALL_POSTS]);
    }

    #[test]
    fn post_message_option_is_required_with_length_cap() {
        let json = serde_json::to_value(definitions()).unwrap();
        let option = &json[0]["options"][0];
        assert_eq!(option["name"], "message");
        assert_eq!(option["required"], true);
        assert_eq!(option["max_length"], 1000);
    }

    #[test]
    fn getposts_count_option_is_optional_and_bounded() {
        let json = serde_json::to_value(definitions()).unwrap();
        let option = &json[1]["options"][0];
        assert_eq!(option["name"], "count");
        assert_ne!(option["required"], true);
        assert_eq!(option["min_value"], 1);
        assert_eq!(option["max_value"], 20);
    }

    #[test]
    fn deleteallposts_takes_no_options() {
        let json = serde_json::to_value(definitions()).unwrap();
        let options = json[2].get("options").cloned().unwrap_or_default();
        assert!(options.as_array().map(Vec::is_empty).unwrap_or(true));
    }
}
