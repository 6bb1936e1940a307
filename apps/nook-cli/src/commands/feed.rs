//! Feed browsing: a one-shot page dump and an interactive line-oriented browser.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use nook_core::DomainError;
use nook_core::domain::{NewPost, PostType, User};
use nook_core::feed::{FeedPhase, PageOutcome, ScrollMetrics};
use nook_core::ports::FeedQuery;

use super::{render, report, require_user};
use crate::state::AppState;

/// Height of the terminal "viewport" used to turn scrolling into scroll reports.
const VIEWPORT_HEIGHT: f64 = 900.0;
/// Rendered height of one post in the virtual document.
const POST_HEIGHT: f64 = 240.0;

const HELP: &str = "\
commands:
  scroll [px]                 scroll down (default: one screen)
  more                        jump to the bottom and load the next page
  show                        print every loaded post
  refresh                     reload from the first page
  filter <type|all> [place]   change the feed filter
  like <post-id>              like or unlike a post
  comment <post-id> <text>    comment on a post
  post <type> <text>          publish a post
  notices                     list active notifications
  dismiss <n|all>             dismiss a notification
  help                        show this help
  quit                        leave";

#[derive(Debug, Clone, PartialEq)]
enum FeedCommand {
    Scroll(Option<f64>),
    More,
    Show,
    Refresh,
    Filter(FeedQuery),
    Like(String),
    Comment { post_id: String, text: String },
    Post { post_type: PostType, content: String },
    Notices,
    Dismiss(Option<usize>),
    Help,
    Quit,
}

impl FeedCommand {
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        let command = match verb {
            "scroll" | "s" if rest.is_empty() => FeedCommand::Scroll(None),
            "scroll" | "s" => FeedCommand::Scroll(Some(
                rest.parse()
                    .map_err(|_| format!("Not a scroll distance: {rest}"))?,
            )),
            "more" | "m" => FeedCommand::More,
            "show" | "ls" => FeedCommand::Show,
            "refresh" | "r" => FeedCommand::Refresh,
            "filter" | "f" => {
                let (kind, place) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let filter = match kind {
                    "" => return Err("usage: filter <type|all> [place]".to_string()),
                    "all" => FeedQuery::all(),
                    other => {
                        let post_type = other.parse::<PostType>().map_err(|e| {
                            format!("{}; expected one of: all, {}", e.user_message(), type_names())
                        })?;
                        FeedQuery::of_type(post_type)
                    }
                };
                FeedCommand::Filter(filter.with_location(place))
            }
            "like" | "l" if rest.is_empty() => return Err("usage: like <post-id>".to_string()),
            "like" | "l" => FeedCommand::Like(rest.to_string()),
            "comment" | "c" => match rest.split_once(char::is_whitespace) {
                Some((post_id, text)) => FeedCommand::Comment {
                    post_id: post_id.to_string(),
                    text: text.trim().to_string(),
                },
                None => return Err("usage: comment <post-id> <text>".to_string()),
            },
            "post" | "p" => match rest.split_once(char::is_whitespace) {
                Some((kind, content)) => FeedCommand::Post {
                    post_type: kind
                        .parse::<PostType>()
                        .map_err(|e| e.user_message())?,
                    content: content.trim().to_string(),
                },
                None => return Err("usage: post <type> <text>".to_string()),
            },
            "notices" | "n" => FeedCommand::Notices,
            "dismiss" | "d" if rest == "all" => FeedCommand::Dismiss(None),
            "dismiss" | "d" => FeedCommand::Dismiss(Some(
                rest.parse()
                    .map_err(|_| "usage: dismiss <n|all>".to_string())?,
            )),
            "help" | "?" => FeedCommand::Help,
            "quit" | "q" | "exit" => FeedCommand::Quit,
            other => return Err(format!("Unknown command: {other} (try `help`)")),
        };
        Ok(Some(command))
    }
}

fn type_names() -> String {
    PostType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the first `pages` pages of the feed and exit.
pub async fn print_pages(
    state: &AppState,
    filter: FeedQuery,
    pages: u32,
) -> Result<(), DomainError> {
    let viewer = require_user(state).await?;

    state.feed.set_filter(filter).await?;
    while state.feed.page_state().await.current_page < pages {
        if state.feed.load_more().await? == PageOutcome::Skipped {
            break;
        }
    }

    for post in state.feed.posts().await {
        println!("{}", render::post(&post, Some(&viewer.id)));
    }
    if state.feed.phase().await == FeedPhase::Exhausted {
        println!("(end of feed)");
    }
    Ok(())
}

/// Interactive browser reading commands from stdin.
pub async fn browse(state: &AppState, filter: FeedQuery) -> Result<(), DomainError> {
    let viewer = require_user(state).await?;
    let mut browser = Browser {
        state,
        viewer,
        scroll_position: 0.0,
        shown: 0,
    };

    println!("Feed: {} (type `help` for commands)\n", render::filter(&filter));
    if state.feed.set_filter(filter).await.is_ok() {
        browser.print_new().await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt().await;
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| DomainError::Internal(format!("reading stdin: {e}")))?
        else {
            break;
        };

        match FeedCommand::parse(&line) {
            Ok(Some(FeedCommand::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(err) = browser.execute(command).await {
                    report(&err);
                }
            }
            Ok(None) => {}
            Err(usage) => eprintln!("{usage}"),
        }
    }
    Ok(())
}

async fn prompt() {
    let mut stdout = tokio::io::stdout();
    // Prompt write errors are ignored.
    let _ = stdout.write_all(b"> ").await;
    let _ = stdout.flush().await;
}

struct Browser<'a> {
    state: &'a AppState,
    viewer: User,
    scroll_position: f64,
    /// Number of posts already printed since the last reset.
    shown: usize,
}

impl Browser<'_> {
    async fn execute(&mut self, command: FeedCommand) -> Result<(), DomainError> {
        let state = self.state;
        let feed = &state.feed;
        match command {
            FeedCommand::Scroll(distance) => {
                let document_height = self.document_height().await;
                let max_position = (document_height - VIEWPORT_HEIGHT).max(0.0);
                self.scroll_position = (self.scroll_position + distance.unwrap_or(VIEWPORT_HEIGHT))
                    .clamp(0.0, max_position);
                let metrics =
                    ScrollMetrics::new(self.scroll_position, VIEWPORT_HEIGHT, document_height);
                self.after_page(feed.on_scroll(metrics).await?).await;
            }
            FeedCommand::More => {
                let document_height = self.document_height().await;
                let metrics = ScrollMetrics::at_bottom(document_height, VIEWPORT_HEIGHT);
                self.scroll_position = metrics.scroll_position;
                self.after_page(feed.on_scroll(metrics).await?).await;
            }
            FeedCommand::Show => {
                self.shown = 0;
                self.print_new().await;
            }
            FeedCommand::Refresh => {
                self.reset();
                feed.refresh().await?;
                self.print_new().await;
            }
            FeedCommand::Filter(filter) => {
                println!("Feed: {}\n", render::filter(&filter));
                let outcome = feed.set_filter(filter).await;
                if matches!(outcome, Ok(PageOutcome::Skipped)) {
                    return Ok(());
                }
                self.reset();
                outcome?;
                self.print_new().await;
            }
            FeedCommand::Like(post_id) => match feed.toggle_like(&post_id).await? {
                Some(liked) => {
                    if let Some(post) = feed.post(&post_id).await {
                        let verb = if liked { "Liked" } else { "Unliked" };
                        println!("{verb} {post_id} ({} likes)", post.like_count());
                    }
                }
                None => eprintln!("No post {post_id} in the feed"),
            },
            FeedCommand::Comment { post_id, text } => {
                let comment = feed.add_comment(&post_id, &text).await?;
                println!("  {}", render::comment(&comment));
            }
            FeedCommand::Post { post_type, content } => {
                feed.create_post(NewPost::new(content, post_type)).await?;
                self.reset();
                self.print_new().await;
            }
            FeedCommand::Notices => {
                let active = state.notices.active();
                if active.is_empty() {
                    println!("No notifications");
                }
                for (i, notification) in active.iter().enumerate() {
                    println!("{}", render::notification(i + 1, notification));
                }
            }
            FeedCommand::Dismiss(None) => state.notices.dismiss_all(),
            FeedCommand::Dismiss(Some(index)) => {
                let active = state.notices.active();
                let dismissed = index
                    .checked_sub(1)
                    .and_then(|i| active.get(i))
                    .is_some_and(|n| state.notices.dismiss(n.id));
                if !dismissed {
                    eprintln!("No notification {index}");
                }
            }
            FeedCommand::Help => println!("{HELP}"),
            FeedCommand::Quit => {}
        }
        Ok(())
    }

    async fn document_height(&self) -> f64 {
        self.state.feed.posts().await.len() as f64 * POST_HEIGHT
    }

    fn reset(&mut self) {
        self.scroll_position = 0.0;
        self.shown = 0;
    }

    async fn after_page(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Applied { .. } => self.print_new().await,
            PageOutcome::Skipped if self.state.feed.phase().await == FeedPhase::Exhausted => {
                println!("(end of feed)");
            }
            PageOutcome::Skipped | PageOutcome::Discarded => {}
        }
    }

    /// Print posts loaded since the last print.
    async fn print_new(&mut self) {
        let posts = self.state.feed.posts().await;
        for post in posts.iter().skip(self.shown) {
            println!("{}", render::post(post, Some(&self.viewer.id)));
        }
        self.shown = posts.len();
        if posts.is_empty() {
            println!("No posts yet");
        }
    }
}
