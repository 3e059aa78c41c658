//! Download file naming and saving.

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Prefix of every auto-generated filename.
const FILENAME_PREFIX: &str = "ai-generated";

/// Characters of the prompt kept in auto-generated filenames.
const PROMPT_CHARS: usize = 20;

/// Build the download filename for a prompt: the first 20 characters with
/// whitespace runs turned into hyphens.
///
/// Characters that are unsafe in a filename are dropped.
#[must_use]
pub fn download_filename(prompt: &str, ext: &str) -> String {
    let mut stem = String::new();
    let mut in_whitespace = false;

    for ch in prompt.chars().take(PROMPT_CHARS) {
        if ch.is_whitespace() {
            if !in_whitespace {
                stem.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | ',') {
                stem.push(ch);
            }
        }
    }

    let stem = stem.trim_matches(|c: char| c == '-' || c == '.');
    if stem.is_empty() {
        format!("{FILENAME_PREFIX}-image.{ext}")
    } else {
        format!("{FILENAME_PREFIX}-{stem}.{ext}")
    }
}

/// File extension for the image bytes, sniffed from their signature.
///
/// Unrecognized data is assumed to be JPEG.
#[must_use]
pub fn image_extension(data: &[u8]) -> &'static str {
    match image::guess_format(data) {
        Ok(image::ImageFormat::Png) => "png",
        Ok(image::ImageFormat::WebP) => "webp",
        Ok(image::ImageFormat::Gif) => "gif",
        _ => "jpg",
    }
}

/// Resolve the output path: use explicit path or auto-generate.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, prompt: &str, ext: &str) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(download_filename(prompt, ext)),
    }
}

/// Insert `-{n}` before the extension, for saving several images.
#[must_use]
pub fn numbered_path(base: &Path, n: usize) -> PathBuf {
    let stem = base.file_stem().unwrap_or_default().to_string_lossy();
    match base.extension() {
        Some(ext) => base.with_file_name(format!("{stem}-{n}.{}", ext.to_string_lossy())),
        None => base.with_file_name(format!("{stem}-{n}")),
    }
}

/// Write image bytes to disk unchanged.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_image(data: &[u8], output_path: &Path) -> Result<(), AppError> {
    std::fs::write(output_path, data).map_err(AppError::Io)
}
