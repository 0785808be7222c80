//! Writing pixel buffers to disk as JPEG files.
//!
//! Every failure is logged and reported as `None`; callers only learn
//! whether a file was produced.

use crate::graphics::PixelBuffer;
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const FILE_EXTENSION: &str = "jpg";
const FILE_QUALITY: u8 = 100;
/// Suffixed names tried when a timestamp name is already taken.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Saves `buffer` as `dir/<name>.jpg`.
///
/// `dir` must already exist and be writable. A given name overwrites an
/// existing file of that name. Without a name, the current Unix time in
/// milliseconds is used, and an existing file is never overwritten: a
/// `-1`, `-2`, ... suffix is added instead. No file is left behind when
/// the save fails.
pub fn save_as_file(buffer: &PixelBuffer, dir: &Path, file_name: Option<&str>) -> Option<PathBuf> {
    let result = encode_jpeg(buffer).and_then(|jpeg| match file_name {
        Some(name) => {
            let path = file_path(dir, name);
            write_file(&path, &jpeg, false).map(|()| (path, jpeg.len()))
        }
        None => write_unique(dir, &timestamp_name(), &jpeg).map(|path| (path, jpeg.len())),
    });

    match result {
        Ok((path, bytes)) => {
            log::info!(
                "[PERSIST] Wrote {}x{} image to {} ({} bytes)",
                buffer.width(),
                buffer.height(),
                path.display(),
                bytes
            );
            Some(path)
        }
        Err(e) => {
            log::warn!("[PERSIST] Could not save image to {}: {}", dir.display(), e);
            None
        }
    }
}

/// [`save_as_file`] on tokio's blocking pool, away from the render thread.
pub async fn save_as_file_async(
    buffer: PixelBuffer,
    dir: PathBuf,
    file_name: Option<String>,
) -> Option<PathBuf> {
    let task =
        tokio::task::spawn_blocking(move || save_as_file(&buffer, &dir, file_name.as_deref()));
    match task.await {
        Ok(path) => path,
        Err(e) => {
            log::warn!("[PERSIST] Save task failed: {}", e);
            None
        }
    }
}

fn timestamp_name() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

fn file_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, FILE_EXTENSION))
}

/// Encodes in memory so a bad buffer never reaches the file system.
fn encode_jpeg(buffer: &PixelBuffer) -> Result<Vec<u8>, PersistError> {
    let rgb: RgbImage = buffer.convert();
    let mut jpeg_bytes: Vec<u8> = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_bytes, FILE_QUALITY).encode_image(&rgb)?;
    Ok(jpeg_bytes)
}

fn write_unique(dir: &Path, base: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = match attempt {
            0 => base.to_string(),
            n => format!("{}-{}", base, n),
        };
        let path = file_path(dir, &name);
        match write_file(&path, bytes, true) {
            Ok(()) => return Ok(path),
            Err(PersistError::Io(e)) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(PersistError::NameTaken(base.to_string()))
}

/// The file is closed when the writer drops, on success and on error alike.
/// A partially written file is removed.
fn write_file(path: &Path, bytes: &[u8], create_new: bool) -> Result<(), PersistError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if create_new {
        options.create_new(true);
    } else {
        options.create(true).truncate(true);
    }
    let file: File = options.open(path)?;

    let mut writer = BufWriter::new(file);
    let written = writer.write_all(bytes).and_then(|()| writer.flush());
    drop(writer);

    if let Err(e) = written {
        if let Err(remove_err) = std::fs::remove_file(path) {
            log::warn!(
                "[PERSIST] Could not remove partial file {}: {}",
                path.display(),
                remove_err
            );
        }
        return Err(e.into());
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("No free file name for {0}.jpg")]
    NameTaken(String),
}
