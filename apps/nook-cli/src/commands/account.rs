use nook_core::DomainError;
use nook_core::domain::SignupForm;

use super::{render, require_user};
use crate::state::AppState;

pub async fn signup(
    state: &AppState,
    name: String,
    username: String,
    mobile: String,
    password: String,
    confirm_password: String,
) -> Result<(), DomainError> {
    let user = state
        .auth
        .signup(SignupForm {
            name,
            username,
            mobile,
            password,
            confirm_password,
        })
        .await?;
    println!("Signed in as {}", render::user(&user));
    Ok(())
}

pub async fn login(state: &AppState, username: &str, password: &str) -> Result<(), DomainError> {
    let user = state.auth.login(username, password).await?;
    println!("Signed in as {}", render::user(&user));
    Ok(())
}

pub async fn logout(state: &AppState) -> Result<(), DomainError> {
    state.auth.logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(state: &AppState) -> Result<(), DomainError> {
    let user = require_user(state).await?;
    println!("{}", render::user(&user));
    Ok(())
}

pub async fn profile(state: &AppState) -> Result<(), DomainError> {
    require_user(state).await?;
    let profile = state.profile.load().await?;

    println!("{}", render::user(&profile.user));
    if let Some(bio) = profile.user.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("{bio}");
    }
    println!("{} posts\n", profile.posts.len());
    for post in &profile.posts {
        println!("{}", render::post(post, Some(&profile.user.id)));
    }
    Ok(())
}
