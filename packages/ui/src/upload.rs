//! Image picking for the post and logo fields.

use dioxus::prelude::*;
use store::media;

/// The first file picked in `evt`, read into a `data:` URI.
pub async fn picked_image(evt: FormEvent) -> Option<String> {
    let file = evt.files().into_iter().next()?;
    match file.read_bytes().await {
        Ok(bytes) => {
            tracing::info!(name = %file.name(), size = bytes.len(), "image picked");
            Some(media::data_uri(file.content_type().as_deref(), &bytes))
        }
        Err(e) => {
            tracing::warn!(error = ?e, name = %file.name(), "could not read picked file");
            None
        }
    }
}

/// What a URL field shows: an uploaded image is not echoed back as text.
pub fn url_field_text(value: &str) -> &str {
    if media::is_data_uri(value) {
        ""
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_field_hides_uploaded_images() {
        assert_eq!(url_field_text("data:image/png;base64,iVBORw=="), "");
        assert_eq!(url_field_text("https://img/1.png"), "https://img/1.png");
    }
}
