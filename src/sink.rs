use crate::error::{ClipError, Result};
use crate::models::ClipRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Plain-text URL list: one clip URL per line.
///
/// The file is created up front so an unwritable name can be reported before any
/// clip is fetched. The handle is released when the sink is dropped, whichever
/// way the round ends.
pub struct UrlSink {
    path: PathBuf,
    w: BufWriter<File>,
}

impl UrlSink {
    pub fn create(path: &Path) -> Result<Self> {
        let f = File::create(path).map_err(|source| ClipError::FileUnwritable {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { path: path.to_path_buf(), w: BufWriter::new(f) })
    }

    pub fn path(&self) -> &Path { &self.path }

    #[inline]
    pub fn write_url(&mut self, url: &str) -> std::io::Result<()> {
        self.w.write_all(url.as_bytes())?;
        self.w.write_all(b"\n")
    }

    /// Write every record's `url` in order, then flush and close. Returns the line count.
    pub fn write_all(mut self, clips: &[ClipRecord]) -> Result<usize> {
        for clip in clips {
            self.write_url(&clip.url)?;
        }
        self.w.flush()?;
        tracing::info!(path=%self.path.display(), lines = clips.len(), "wrote clip urls");
        Ok(clips.len())
    }
}
