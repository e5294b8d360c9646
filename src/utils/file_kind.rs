//! Maps entries to the icon kind shown by the frontend.

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "ico", "webp", "svg", "tiff", "tif", "heic", "heif",
    "avif",
];

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "ogg", "flac", "wav", "aac", "m4a", "opus", "wma"];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v"];

const ARCHIVE_EXTENSIONS: &[&str] = &[
    "zip", "tar", "gz", "bz2", "xz", "zst", "7z", "rar", "jar", "deb", "rpm",
];

const CODE_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "mjs", "ts", "tsx", "jsx", "java", "c", "cpp", "cc", "h", "hpp", "go",
    "rb", "php", "swift", "kt", "scala", "hs", "lua", "sh", "bash", "zsh", "sql", "html", "css",
    "scss", "json", "yaml", "yml", "toml", "xml",
];

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "odt", "xls", "xlsx", "ods", "ppt", "pptx", "odp", "txt", "md", "rst",
];

/// Classifies an entry by name for the frontend's icon set.
pub fn file_kind(name: &str, is_directory: bool) -> &'static str {
    if is_directory {
        return "folder";
    }
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    let ext = extension.as_str();
    if IMAGE_EXTENSIONS.contains(&ext) {
        "image"
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        "audio"
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        "video"
    } else if ARCHIVE_EXTENSIONS.contains(&ext) {
        "archive"
    } else if CODE_EXTENSIONS.contains(&ext) {
        "code"
    } else if DOCUMENT_EXTENSIONS.contains(&ext) {
        "document"
    } else {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_win_over_extensions() {
        assert_eq!(file_kind("pictures.png", true), "folder");
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(file_kind("photo.JPG", false), "image");
        assert_eq!(file_kind("notes.MD", false), "document");
    }

    #[test]
    fn unknown_extensions_fall_back_to_file() {
        assert_eq!(file_kind("data.xyz123", false), "file");
        assert_eq!(file_kind("no_extension", false), "file");
    }

    #[test]
    fn common_kinds() {
        assert_eq!(file_kind("main.rs", false), "code");
        assert_eq!(file_kind("song.flac", false), "audio");
        assert_eq!(file_kind("clip.webm", false), "video");
        assert_eq!(file_kind("backup.tar", false), "archive");
    }
}
