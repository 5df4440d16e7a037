pub mod discord;

use anyhow::Result;
use async_trait::async_trait;

/// A slash-command invocation decoded from the chat platform.
///
/// The variants are the full command surface; the router matches them
/// exhaustively, so adding a command is a compile-checked change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandInvocation {
    Post { message: String },
    GetPosts { count: Option<i64> },
    DeleteAllPosts,
}

/// The user behind one invocation.
#[derive(Debug, Clone)]
pub struct Invoker {
    /// Platform user id
    pub id: u64,
    /// Display name of the user
    pub name: String,
}

/// Reply surface for one interaction.
///
/// An interaction moves from received to deferred (placeholder shown) to
/// replied. `respond` edits the placeholder when one exists and sends an
/// immediate reply with the given visibility otherwise.
#[async_trait]
pub trait Responder: Send {
    async fn defer(&mut self, ephemeral: bool) -> Result<()>;
    async fn respond(&mut self, text: &str, ephemeral: bool) -> Result<()>;
}
