use std::path::{Path, PathBuf};

use mime::Mime;

use nook_core::DomainError;
use nook_core::domain::{ImageAttachment, NewPost, PostType};

use super::require_user;
use crate::state::AppState;

pub async fn publish(
    state: &AppState,
    content: String,
    post_type: PostType,
    location: Option<String>,
    images: Vec<PathBuf>,
) -> Result<(), DomainError> {
    require_user(state).await?;

    let mut post = NewPost::new(content, post_type);
    if let Some(location) = location {
        post = post.with_location(location);
    }
    for path in &images {
        post = post.with_image(load_image(path).await?);
    }

    state.feed.create_post(post).await?;
    Ok(())
}

async fn load_image(path: &Path) -> Result<ImageAttachment, DomainError> {
    let content_type = content_type_for(path);
    if content_type.type_() != mime::IMAGE {
        return Err(DomainError::Validation(format!(
            "{} is not an image ({content_type})",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        DomainError::Validation(format!("Cannot read image {}: {e}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(ImageAttachment {
        file_name,
        content_type: content_type.essence_str().to_string(),
        bytes,
    })
}

fn content_type_for(path: &Path) -> Mime {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("webp") => "image/webp"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
