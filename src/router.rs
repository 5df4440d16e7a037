//! Routes decoded slash-command invocations to the posts API and turns
//! results into user-visible replies.
//!
//! Every handler acknowledges before calling out, and every error escaping
//! a handler is converted into a reply at this boundary, so no interaction
//! is left unanswered.

use anyhow::Result;
use tracing::{error, info};

use crate::config::Config;
use crate::format;
use crate::platform::{CommandInvocation, Invoker, Responder};
use crate::posts::{PostsApi, PostsClient};

/// Number of posts shown when the count option is omitted.
const DEFAULT_POST_COUNT: i64 = 5;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub posts: PostsClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let posts = PostsClient::new(config.posts.api_url.clone());
        Self { config, posts }
    }
}

/// Handle one invocation, converting any failure into an error reply.
pub async fn handle(
    config: &Config,
    posts: &dyn PostsApi,
    invoker: &Invoker,
    invocation: CommandInvocation,
    responder: &mut dyn Responder,
) -> Result<()> {
    if let Err(e) = run_command(config, posts, invoker, invocation, responder).await {
        error!("Error handling command: {:#}", e);
        responder
            .respond(&format!("❌ **Error:** {e}"), true)
            .await?;
    }
    Ok(())
}

async fn run_command(
    config: &Config,
    posts: &dyn PostsApi,
    invoker: &Invoker,
    invocation: CommandInvocation,
    responder: &mut dyn Responder,
) -> Result<()> {
    match invocation {
        CommandInvocation::Post { message } => {
            responder.defer(false).await?;

            let content = format::prefixed_content(&invoker.name, &message);
            let post = posts.create_post(&content).await?;
            info!(
                "Created post ({} chars) for {}",
                post.content.chars().count(),
                invoker.name
            );

            responder
                .respond(
                    &format::post_success(&message, config.posts.site_url()),
                    false,
                )
                .await?;
        }

        CommandInvocation::GetPosts { count } => {
            responder.defer(false).await?;

            let all = posts.list_posts().await?;
            if all.is_empty() {
                responder.respond(format::NO_POSTS, false).await?;
                return Ok(());
            }

            let count = count.unwrap_or(DEFAULT_POST_COUNT).clamp(1, 20) as usize;
            let latest = &all[..count.min(all.len())];

            responder
                .respond(
                    &format::post_listing(latest, config.posts.site_url()),
                    false,
                )
                .await?;
        }

        CommandInvocation::DeleteAllPosts => {
            // Authorization gate comes before any acknowledgment.
            if invoker.id != config.posts.admin_user_id {
                info!(
                    "Denied /deleteallposts for {} ({})",
                    invoker.name, invoker.id
                );
                responder.respond(format::ACCESS_DENIED, true).await?;
                return Ok(());
            }

            responder.defer(true).await?;

            let confirmation = posts.delete_all_posts().await?;
            responder
                .respond(&format::delete_success(&confirmation.message), true)
                .await?;
        }
    }

    Ok(())
}
