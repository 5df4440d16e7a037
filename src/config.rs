use anyhow::{bail, Context, Result};

/// Endpoint used when POSTS_API_URL is not set.
pub const DEFAULT_POSTS_API_URL: &str = "https://simple-posts-app.netlify.app/posts";

/// Admin identity used when POSTS_ADMIN_USER_ID is not set.
const DEFAULT_ADMIN_USER_ID: u64 = 1195808542628774001;

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub bot_token: String,
    pub application_id: u64,
    /// When set, commands register guild-scoped (propagates near-instantly);
    /// otherwise globally (propagation can take up to an hour).
    pub guild_id: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct PostsConfig {
    pub api_url: String,
    /// The only user allowed to run /deleteallposts.
    pub admin_user_id: u64,
}

impl PostsConfig {
    /// Human-facing site link: the API URL without its /posts path segment.
    pub fn site_url(&self) -> &str {
        self.api_url
            .strip_suffix("/posts")
            .unwrap_or(&self.api_url)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord: DiscordConfig,
    pub posts: PostsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = get("DISCORD_BOT_TOKEN").filter(|v| !v.is_empty());
        let client_id = get("DISCORD_CLIENT_ID").filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        if bot_token.is_none() {
            missing.push("DISCORD_BOT_TOKEN");
        }
        if client_id.is_none() {
            missing.push("DISCORD_CLIENT_ID");
        }
        if !missing.is_empty() {
            bail!(
                "missing required environment variables: {}\n  \
                 DISCORD_BOT_TOKEN: your bot token from the Discord Developer Portal\n  \
                 DISCORD_CLIENT_ID: your bot's client id\n  \
                 DISCORD_GUILD_ID: (optional) guild id for faster command registration",
                missing.join(", ")
            );
        }

        let application_id: u64 = client_id
            .unwrap()
            .parse()
            .context("DISCORD_CLIENT_ID must be a numeric application id")?;

        let guild_id = match get("DISCORD_GUILD_ID").filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                raw.parse()
                    .context("DISCORD_GUILD_ID must be a numeric guild id")?,
            ),
            None => None,
        };

        let api_url = get("POSTS_API_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_POSTS_API_URL.to_string());

        let admin_user_id = match get("POSTS_ADMIN_USER_ID").filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .parse()
                .context("POSTS_ADMIN_USER_ID must be a numeric user id")?,
            None => DEFAULT_ADMIN_USER_ID,
        };

        Ok(Config {
            discord: DiscordConfig {
                bot_token: bot_token.unwrap(),
                application_id,
                guild_id,
            },
            posts: PostsConfig {
                api_url,
                admin_user_id,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn reports_every_missing_required_variable() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("DISCORD_BOT_TOKEN"));
        assert!(message.contains("DISCORD_CLIENT_ID"));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err =
            Config::from_lookup(lookup(&[("DISCORD_BOT_TOKEN", ""), ("DISCORD_CLIENT_ID", "1")]))
                .unwrap_err();
        assert!(err.to_string().contains("DISCORD_BOT_TOKEN"));
    }

    #[test]
    fn applies_defaults_for_optional_settings() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", "42"),
        ]))
        .unwrap();

        assert_eq!(config.discord.application_id, 42);
        assert_eq!(config.discord.guild_id, None);
        assert_eq!(config.posts.api_url, DEFAULT_POSTS_API_URL);
        assert_eq!(config.posts.admin_user_id, DEFAULT_ADMIN_USER_ID);
    }

    #[test]
    fn parses_optional_settings_when_present() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", "42"),
            ("DISCORD_GUILD_ID", "99"),
            ("POSTS_API_URL", "https://example.test/posts"),
            ("POSTS_ADMIN_USER_ID", "7"),
        ]))
        .unwrap();

        assert_eq!(config.discord.guild_id, Some(99));
        assert_eq!(config.posts.api_url, "https://example.test/posts");
        assert_eq!(config.posts.admin_user_id, 7);
    }

    #[test]
    fn rejects_non_numeric_client_id() {
        let err = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", "not-a-number"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DISCORD_CLIENT_ID"));
    }

    #[test]
    fn site_url_strips_the_posts_segment() {
        let posts = PostsConfig {
            api_url: "https://example.test/posts".to_string(),
            admin_user_id: 1,
        };
        assert_eq!(posts.site_url(), "https://example.test");

        let bare = PostsConfig {
            api_url: "https://example.test".to_string(),
            admin_user_id: 1,
        };
        assert_eq!(bare.site_url(), "https://example.test");
    }
}
