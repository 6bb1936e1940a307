//! Subcommands.

use std::path::PathBuf;

use clap::Subcommand;

use nook_core::DomainError;
use nook_core::domain::{PostType, User};
use nook_core::ports::{FeedQuery, SessionStore};

use crate::state::AppState;

mod account;
mod feed;
mod post;
mod render;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        mobile: String,
        #[arg(long, env = "NOOK_PASSWORD")]
        password: String,
        /// Defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign in with an existing account
    Login {
        username: String,
        #[arg(long, env = "NOOK_PASSWORD")]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Check the stored session with the server
    Whoami,
    /// Show your own posts
    Profile,
    /// Publish a post
    Post {
        content: String,
        #[arg(long = "type", default_value = "recommendation")]
        post_type: PostType,
        #[arg(long)]
        location: Option<String>,
        /// Image file to attach; repeatable
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Browse the feed
    Feed {
        #[arg(long = "type")]
        post_type: Option<PostType>,
        #[arg(long)]
        location: Option<String>,
        /// Print this many pages and exit instead of starting the interactive browser
        #[arg(long)]
        pages: Option<u32>,
    },
}

pub async fn run(command: Command, state: &AppState) -> Result<(), DomainError> {
    match command {
        Command::Signup {
            name,
            username,
            mobile,
            password,
            confirm_password,
        } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            account::signup(state, name, username, mobile, password, confirm_password).await
        }
        Command::Login { username, password } => account::login(state, &username, &password).await,
        Command::Logout => account::logout(state).await,
        Command::Whoami => account::whoami(state).await,
        Command::Profile => account::profile(state).await,
        Command::Post {
            content,
            post_type,
            location,
            images,
        } => post::publish(state, content, post_type, location, images).await,
        Command::Feed {
            post_type,
            location,
            pages,
        } => {
            let mut filter = FeedQuery {
                post_type,
                location: None,
            };
            if let Some(location) = location {
                filter = filter.with_location(location);
            }
            match pages {
                Some(pages) => feed::print_pages(state, filter, pages).await,
                None => feed::browse(state, filter).await,
            }
        }
    }
}

/// Print an error that has not already been shown as a notification.
pub fn report(err: &DomainError) {
    match err {
        // Already surfaced through the notifier.
        DomainError::Api(_) => {}
        DomainError::Unauthorized => eprintln!("Not signed in. Run `nook login` first."),
        other => eprintln!("{}", other.user_message()),
    }
}

/// The signed-in user, after confirming the session is still accepted.
async fn require_user(state: &AppState) -> Result<User, DomainError> {
    if !state.auth.authenticate().await? {
        return Err(DomainError::Unauthorized);
    }
    state
        .session
        .current_user()
        .await
        .ok_or(DomainError::Unauthorized)
}
