//! Embedded widget assets
//!
//! Falls back to serving from the filesystem, so the page can be edited
//! without a rebuild.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::PathBuf;

const UI_DIR: &str = "ui";

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

/// Serve a widget asset under `/assets/`
pub async fn serve_static(Path(path): Path<String>) -> Response {
    match load_asset(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Get the index.html content (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    let content = load_asset("index.html")?;
    String::from_utf8(content.into_owned()).ok()
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    if path.split('/').any(|part| part == "..") {
        return None;
    }

    // Try embedded assets first
    if let Some(file) = Assets::get(path) {
        return Some(file.data);
    }

    let fs_path = PathBuf::from(UI_DIR).join(path);
    std::fs::read(fs_path).ok().map(Cow::Owned)
}
