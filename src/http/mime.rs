use std::path::Path;

/// Content type used when the extension is unknown or missing.
pub const DEFAULT_MIME: &str = "application/octet-stream";

const MIME_TABLE: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("jpg", "image/jpeg"),
    ("css", "text/css"),
    ("js", "text/javascript"),
];

/// Maps a file path to its content type by the suffix after the last `.`
/// of the file name. Matching is case-insensitive.
pub fn mime_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(mime_for_extension)
        .unwrap_or(DEFAULT_MIME)
}

pub fn mime_for_extension(ext: &str) -> &'static str {
    MIME_TABLE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME)
}
