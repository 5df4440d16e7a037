//! Discord gateway adapter.
//!
//! Decodes incoming interactions, dispatches them through the router, and
//! performs the defer / reply / edit-reply calls against Discord.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::all::{
    ApplicationId, Client, CommandInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, EventHandler, GatewayIntents, Http,
    Interaction, Ready,
};
use tracing::{error, info, warn};

use crate::commands;
use crate::platform::{Invoker, Responder};
use crate::router::{self, AppState};

/// Replies to one interaction, tracking whether a placeholder was already
/// acknowledged so later output edits it instead of double-replying.
struct DiscordResponder<'a> {
    http: &'a Http,
    interaction: &'a CommandInteraction,
    deferred: bool,
}

#[async_trait]
impl Responder for DiscordResponder<'_> {
    async fn defer(&mut self, ephemeral: bool) -> Result<()> {
        if ephemeral {
            self.interaction.defer_ephemeral(self.http).await
        } else {
            self.interaction.defer(self.http).await
        }
        .context("Failed to acknowledge interaction")?;

        self.deferred = true;
        Ok(())
    }

    async fn respond(&mut self, text: &str, ephemeral: bool) -> Result<()> {
        if self.deferred {
            self.interaction
                .edit_response(self.http, EditInteractionResponse::new().content(text))
                .await
                .context("Failed to edit deferred reply")?;
        } else {
            self.interaction
                .create_response(
                    self.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .content(text)
                            .ephemeral(ephemeral),
                    ),
                )
                .await
                .context("Failed to send reply")?;
        }
        Ok(())
    }
}

struct Handler {
    state: Arc<AppState>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("✅ Discord bot is ready! Logged in as {}", ready.user.tag());
        info!("🔗 Connected to Posts API: {}", self.state.config.posts.api_url);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let Some(invocation) = commands::decode(&command) else {
            warn!("Ignoring unknown command: {}", command.data.name);
            return;
        };

        let invoker = Invoker {
            id: command.user.id.get(),
            name: command.user.name.clone(),
        };
        info!(
            "/{} from {} ({})",
            command.data.name, invoker.name, invoker.id
        );

        let mut responder = DiscordResponder {
            http: &ctx.http,
            interaction: &command,
            deferred: false,
        };

        if let Err(e) = router::handle(
            &self.state.config,
            &self.state.posts,
            &invoker,
            invocation,
            &mut responder,
        )
        .await
        {
            error!("Failed to reply to /{}: {:#}", command.data.name, e);
        }
    }
}

/// Register commands over plain REST, then connect to the gateway.
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let token = state.config.discord.bot_token.clone();
    let application_id = ApplicationId::new(state.config.discord.application_id);

    // Registration failure is logged and non-fatal; the bot still connects
    // with whatever command set Discord last stored.
    let http = Http::new(&token);
    http.set_application_id(application_id);
    if let Err(e) = commands::register(&http, state.config.discord.guild_id).await {
        error!("Error registering commands: {:#}", e);
    }

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;
    let mut client = Client::builder(&token, intents)
        .application_id(application_id)
        .event_handler(Handler { state })
        .await
        .context("Failed to create Discord client")?;

    client.start().await.context("Discord client error")?;

    Ok(())
}
