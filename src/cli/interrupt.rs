//! Ctrl+C handling for headless runs
//!
//! Without raw mode the terminal turns Ctrl+C into SIGINT. The handler only
//! raises a flag; the session loop sees it on its next pass and finalizes
//! with whatever it has counted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::tracker::AbortSignal;

/// Abort flag shared with a signal handler
#[derive(Clone, Debug, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route SIGINT to this flag for the rest of the process
    pub fn install(&self) -> Result<(), ctrlc::Error> {
        let flag = self.clone();
        ctrlc::set_handler(move || flag.raise())
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

impl AbortSignal for InterruptFlag {
    fn should_abort(&mut self) -> bool {
        self.is_raised()
    }
}
