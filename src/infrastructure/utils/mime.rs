//! MIME type backfill for asset-store responses that omit Content-Type.

/// Look up a Content-Type for a URL path from its file extension.
/// Returns `None` for paths without a dot or with an unknown extension.
pub fn mime_for_path(path: &str) -> Option<&'static str> {
    let lower = path.to_ascii_lowercase();
    let (_, ext) = lower.rsplit_once('.')?;

    match ext {
        // Text files
        "html" => Some("text/html;charset=UTF-8"),
        "css" => Some("text/css;charset=UTF-8"),
        "js" => Some("application/javascript;charset=UTF-8"),
        "mjs" => Some("application/javascript;charset=UTF-8"),
        "json" => Some("application/json;charset=UTF-8"),
        "xml" => Some("application/xml;charset=UTF-8"),
        "txt" => Some("text/plain;charset=UTF-8"),

        // Images
        "svg" => Some("image/svg+xml"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "ico" => Some("image/x-icon"),
        "bmp" => Some("image/bmp"),

        // Fonts
        "woff" => Some("font/woff"),
        "woff2" => Some("font/woff2"),
        "ttf" => Some("font/ttf"),
        "otf" => Some("font/otf"),
        "eot" => Some("application/vnd.ms-fontobject"),

        // Media
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "ogg" => Some("audio/ogg"),

        // Documents
        "pdf" => Some("application/pdf"),
        "zip" => Some("application/zip"),
        "tar" => Some("application/x-tar"),
        "gz" => Some("application/gzip"),

        _ => None,
    }
}
