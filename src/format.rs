//! Reply text rendering for command responses.

use chrono::{DateTime, Utc};

use crate::posts::Post;

/// Longest content preview shown per post in a listing.
const PREVIEW_LIMIT: usize = 100;

pub const NO_POSTS: &str = "📭 No posts found on the website.";

pub const ACCESS_DENIED: &str =
    "❌ **Access Denied!** You are not authorized to use this command.";

/// Content sent to the API: the message prefixed with the poster's name.
pub fn prefixed_content(username: &str, message: &str) -> String {
    format!("[{username}]: {message}")
}

/// Success reply for /post, echoing the original (unprefixed) message.
pub fn post_success(message: &str, site_url: &str) -> String {
    format!("✅ **Message posted successfully!**\n```{message}```\n🔗 View at: {site_url}")
}

/// Listing reply for /getposts: one line per post, newest first.
pub fn post_listing(posts: &[Post], site_url: &str) -> String {
    let mut out = format!("📋 **Latest {} posts:**\n\n", posts.len());
    for post in posts {
        out.push_str(&format!(
            "**{}** - {}\n\n",
            short_date(&post.created_at),
            preview(&post.content)
        ));
    }
    out.push_str(&format!("🔗 View all posts: {site_url}"));
    out
}

/// Confirmation reply for /deleteallposts, echoing the API's message.
pub fn delete_success(confirmation: &str) -> String {
    format!("🗑️ **All posts deleted!** {confirmation}")
}

fn short_date(ts: &DateTime<Utc>) -> String {
    ts.format("%-m/%-d/%Y").to_string()
}

fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_LIMIT {
        return content.to_string();
    }
    let cut: String = content.chars().take(PREVIEW_LIMIT).collect();
    format!("{cut}...")
}
