//! Overlay recorder: one JSON object per line

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::overlay::Overlay;
use super::RenderSink;

pub struct OverlayRecorder {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl OverlayRecorder {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(OverlayRecorder {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl RenderSink for OverlayRecorder {
    fn draw(&mut self, overlay: &Overlay) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, overlay)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn reference(&self) -> Option<String> {
        Some(self.path.display().to_string())
    }
}
