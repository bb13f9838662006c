use std::path::Path;

use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mime_guess::from_path;

use crate::core::helpers::initials;

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Encodes an uploaded image. The mime type comes from the file name.
pub fn image_data_url(file_name: &str, bytes: &[u8]) -> String {
    let mime = from_path(file_name).first_or_octet_stream();
    data_url(mime.as_ref(), bytes)
}

pub fn read_image(path: impl AsRef<Path>) -> anyhow::Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(image_data_url(&name, &bytes))
}

/// SVG initials avatar for users without an uploaded picture.
pub fn default_avatar(name: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='200' height='200'>\
<rect width='100%' height='100%' fill='#0f1724'/>\
<text x='50%' y='55%' font-size='72' fill='#6ee7b7' text-anchor='middle' \
dominant-baseline='middle' font-family='sans-serif'>{}</text></svg>",
        html_escape::encode_text(&initials(name))
    );
    data_url("image/svg+xml", svg.as_bytes())
}

/// Uploaded avatar, or the generated one.
pub fn avatar_src(avatar: &str, name: &str) -> String {
    if avatar.is_empty() {
        default_avatar(name)
    } else {
        avatar.to_string()
    }
}
