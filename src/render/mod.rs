//! Render sink: optional overlay consumers
//!
//! # Components
//! - `overlay.rs`: Overlay instructions (segments, markers, labels)
//! - `recorder.rs`: Sink writing overlays as JSON lines
//! - `FanOut`: forwards each overlay to several sinks
//!
//! Sinks are advisory. A session runs identically with none attached, and a
//! failing sink is logged and ignored.

pub mod overlay;
pub mod recorder;

pub use overlay::{LabelKind, Overlay};
pub use recorder::OverlayRecorder;

use std::io;

/// Consumer of per-frame overlays
pub trait RenderSink {
    /// Draw one frame's overlay
    fn draw(&mut self, overlay: &Overlay) -> io::Result<()>;

    /// Called once after the last overlay
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Where the rendered output can be found, if anywhere
    fn reference(&self) -> Option<String> {
        None
    }
}

/// Forwards overlays to every attached sink
#[derive(Default)]
pub struct FanOut<'a> {
    sinks: Vec<&'a mut dyn RenderSink>,
}

impl<'a> FanOut<'a> {
    pub fn new() -> Self {
        FanOut { sinks: Vec::new() }
    }

    pub fn push(&mut self, sink: &'a mut dyn RenderSink) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl RenderSink for FanOut<'_> {
    /// Every sink sees the overlay; the first error is returned
    fn draw(&mut self, overlay: &Overlay) -> io::Result<()> {
        let mut result = Ok(());
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.draw(overlay) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    fn finish(&mut self) -> io::Result<()> {
        let mut result = Ok(());
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.finish() {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    fn reference(&self) -> Option<String> {
        self.sinks.iter().find_map(|s| s.reference())
    }
}
