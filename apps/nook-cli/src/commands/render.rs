//! Plain-text rendering of feed items.

use nook_core::domain::{Comment, Post, User};
use nook_core::ports::{FeedQuery, Notification, NotificationLevel};

pub fn user(user: &User) -> String {
    format!("{} (@{})", user.display_name(), user.username)
}

/// One post with its like summary and comments. `viewer` marks the post as
/// liked when the signed-in user is in its like set.
pub fn post(post: &Post, viewer: Option<&str>) -> String {
    let mut header = format!(
        "[{}] {} (@{}) {}",
        post.id,
        post.author.name,
        post.author.username,
        post.created_at.format("%Y-%m-%d %H:%M")
    );
    if let Some(post_type) = post.post_type {
        header.push_str(&format!(" #{post_type}"));
    }
    if let Some(location) = post.location.as_deref().filter(|l| !l.is_empty()) {
        header.push_str(&format!(" @ {location}"));
    }

    let liked = viewer.is_some_and(|id| post.is_liked_by(id));
    let mut out = format!(
        "{header}\n  {}\n  {} {} likes, {} comments",
        post.content,
        if liked { "[liked]" } else { "[like]" },
        post.like_count(),
        post.comments.len()
    );
    for image in &post.images {
        out.push_str(&format!("\n  image: {image}"));
    }
    for c in &post.comments {
        out.push_str(&format!("\n    {}", comment(c)));
    }
    out.push('\n');
    out
}

pub fn comment(comment: &Comment) -> String {
    format!("{}: {}", comment.author.username, comment.content)
}

pub fn filter(filter: &FeedQuery) -> String {
    let post_type = filter
        .post_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| "all".to_string());
    match filter.location.as_deref() {
        Some(location) => format!("{post_type} near {location}"),
        None => post_type,
    }
}

pub fn notification(index: usize, notification: &Notification) -> String {
    let level = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    format!(
        "{index}. [{level}] {} ({})",
        notification.message,
        notification.created_at.format("%H:%M:%S")
    )
}
