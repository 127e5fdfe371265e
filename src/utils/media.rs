use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

/// File extensions treated as video regardless of host
const VIDEO_EXTENSIONS: [&str; 6] = [".mp4", ".webm", ".ogv", ".mov", ".m4v", ".avi"];

/// Query markers that mark a Drive URL as direct media
const DRIVE_VIDEO_MARKERS: [&str; 3] = ["export=download", "export=media", "alt=media"];

lazy_static! {
    static ref YOUTUBE_ID_RE: Regex = Regex::new(
        r"(?:youtube\.com/(?:watch\?(?:[^#\s]*&)?v=|embed/|shorts/|live/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})"
    )
    .expect("youtube id pattern");
    static ref DRIVE_PATH_ID_RE: Regex =
        Regex::new(r"drive\.google\.com/(?:file/d/|d/)([A-Za-z0-9_-]{10,})").expect("drive path id pattern");
    static ref DRIVE_QUERY_ID_RE: Regex =
        Regex::new(r"drive\.google\.com/[^\s]*[?&]id=([A-Za-z0-9_-]{10,})").expect("drive query id pattern");
}

/// A media reference: a pasted URL or an uploaded file's declared type
#[derive(Debug, Clone, Copy)]
pub enum MediaSource<'a> {
    Url(&'a str),
    Upload { content_type: &'a str },
}

/// Whether the source refers to video content
pub fn is_video_source(source: &MediaSource<'_>) -> bool {
    match source {
        MediaSource::Upload { content_type } => content_type.starts_with("video/"),
        MediaSource::Url(url) => is_video_url(url),
    }
}

/// Whether a URL points at video content.
///
/// Drive thumbnail URLs always serve images, even when the underlying
/// file is a video, so they are classified as images on purpose.
pub fn is_video_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();

    if lower.starts_with("data:video/") {
        return true;
    }
    if has_video_extension(&lower) {
        return true;
    }
    if lower.contains("drive.google.com") {
        if lower.contains("/thumbnail") {
            return false;
        }
        return DRIVE_VIDEO_MARKERS
            .iter()
            .any(|marker| lower.contains(marker));
    }

    extract_youtube_id(url).is_some()
}

/// Extract the 11-character YouTube video id from any known URL shape
pub fn extract_youtube_id(url: &str) -> Option<String> {
    YOUTUBE_ID_RE
        .captures(url)
        .map(|captures| captures[1].to_string())
}

/// Extract a Drive file id from any of the common Drive URL shapes
pub fn extract_drive_id(url: &str) -> Option<String> {
    if !url.contains("drive.google.com") {
        return None;
    }
    if let Some(captures) = DRIVE_PATH_ID_RE.captures(url) {
        return Some(captures[1].to_string());
    }
    DRIVE_QUERY_ID_RE
        .captures(url)
        .map(|captures| captures[1].to_string())
}

pub fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", id)
}

pub fn youtube_thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id)
}

pub fn drive_preview_url(id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/preview", id)
}

pub fn drive_download_url(id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={}", id)
}

pub fn drive_thumbnail_url(id: &str) -> String {
    format!("https://drive.google.com/thumbnail?id={}&sz=w1200", id)
}

/// Rewrite a pasted share link into a directly embeddable form.
///
/// YouTube links become embed URLs; Drive links become a preview for
/// video content or a thumbnail for images. Unrecognized URLs pass
/// through untouched.
pub fn normalize_media_url(url: &str) -> String {
    if let Some(id) = extract_youtube_id(url) {
        return youtube_embed_url(&id);
    }
    if let Some(id) = extract_drive_id(url) {
        if is_video_url(url) {
            return drive_preview_url(&id);
        }
        return drive_thumbnail_url(&id);
    }
    url.to_string()
}

/// Whether the URL path ends in a known video extension
fn has_video_extension(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative URLs: strip query and fragment by hand
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .to_string(),
    };
    VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_extract_youtube_id_across_url_shapes() {
        let shapes = [
            format!("https://www.youtube.com/watch?v={}", ID),
            format!("https://www.youtube.com/watch?list=PL123&v={}", ID),
            format!("https://youtu.be/{}", ID),
            format!("https://www.youtube.com/embed/{}", ID),
            format!("https://www.youtube.com/shorts/{}", ID),
            format!("https://www.youtube.com/live/{}", ID),
            format!("https://m.youtube.com/watch?v={}", ID),
            format!("youtube.com/watch?v={}", ID),
        ];

        for shape in &shapes {
            assert_eq!(
                extract_youtube_id(shape).as_deref(),
                Some(ID),
                "failed for {}",
                shape
            );
        }
    }

    #[test]
    fn test_extract_youtube_id_rejects_non_youtube() {
        assert_eq!(extract_youtube_id("https://vimeo.com/123456"), None);
        assert_eq!(extract_youtube_id("https://example.com/watch?v=short"), None);
        assert_eq!(extract_youtube_id("not a url"), None);
        assert_eq!(extract_youtube_id(""), None);
    }

    #[test]
    fn test_extract_drive_id_across_url_shapes() {
        let id = "1AbC-dEfGhIjKlMnOpQ";
        let shapes = [
            format!("https://drive.google.com/file/d/{}/view?usp=sharing", id),
            format!("https://drive.google.com/d/{}", id),
            format!("https://drive.google.com/open?id={}", id),
            format!("https://drive.google.com/uc?export=download&id={}", id),
        ];

        for shape in &shapes {
            assert_eq!(
                extract_drive_id(shape).as_deref(),
                Some(id),
                "failed for {}",
                shape
            );
        }

        assert_eq!(extract_drive_id("https://example.com/file/d/abcdefghij"), None);
    }

    #[test]
    fn test_drive_thumbnail_is_an_image_even_for_video_files() {
        let id = "1AbC-dEfGhIjKlMnOpQ";
        let thumbnail = format!("https://drive.google.com/thumbnail?id={}&sz=w1200", id);
        let download = format!("https://drive.google.com/uc?export=download&id={}", id);

        assert!(!is_video_url(&thumbnail));
        assert!(is_video_url(&download));
    }

    #[test]
    fn test_video_extensions_and_data_urls() {
        assert!(is_video_url("https://example.com/media/easter.mp4"));
        assert!(is_video_url("/uploads/gallery/retreat.webm?cache=1"));
        assert!(is_video_url("data:video/mp4;base64,AAAA"));

        assert!(!is_video_url("https://example.com/media/easter.jpg"));
        assert!(!is_video_url("/uploads/gallery/retreat.png"));
        assert!(!is_video_url(""));
    }

    #[test]
    fn test_is_video_source_for_uploads() {
        assert!(is_video_source(&MediaSource::Upload {
            content_type: "video/mp4"
        }));
        assert!(!is_video_source(&MediaSource::Upload {
            content_type: "image/jpeg"
        }));
    }

    #[test]
    fn test_normalize_media_url() {
        assert_eq!(
            normalize_media_url(&format!("https://youtu.be/{}", ID)),
            format!("https://www.youtube.com/embed/{}", ID)
        );

        let drive_id = "1AbC-dEfGhIjKlMnOpQ";
        assert_eq!(
            normalize_media_url(&format!(
                "https://drive.google.com/file/d/{}/view",
                drive_id
            )),
            drive_thumbnail_url(drive_id)
        );
        assert_eq!(
            normalize_media_url(&drive_download_url(drive_id)),
            drive_preview_url(drive_id)
        );

        // Unrecognized URLs pass through
        assert_eq!(
            normalize_media_url("https://example.com/photo.jpg"),
            "https://example.com/photo.jpg"
        );
    }
}
