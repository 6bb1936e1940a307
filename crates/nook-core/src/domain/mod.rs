//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{Author, Comment, ImageAttachment, Like, NewPost, Post, PostType};
pub use user::{Session, SignupForm, User};
