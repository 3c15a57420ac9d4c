// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Learning/test mode switch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use autodidact_core::Mode;
use tokio::sync::Mutex;
use tracing::info;

use crate::pool::TeacherPool;

/// Owns the current mode and keeps the teacher pool in step with it.
///
/// Starts in [`Mode::Test`].
pub struct ModeController {
    pool: Arc<TeacherPool>,
    learning: AtomicBool,
    /// Serializes transitions; reads go through `learning` without waiting.
    transition: Mutex<()>,
}

impl ModeController {
    pub fn new(pool: Arc<TeacherPool>) -> Self {
        Self {
            pool,
            learning: AtomicBool::new(false),
            transition: Mutex::new(()),
        }
    }

    /// Switch modes. Setting the current mode again is a no-op.
    pub async fn set_mode(&self, learning: bool) -> Mode {
        let _guard = self.transition.lock().await;
        let target = Mode::from_learning(learning);
        if self.mode() == target {
            return target;
        }

        if learning {
            self.pool.start().await;
            self.learning.store(true, Ordering::SeqCst);
        } else {
            // Stop provider fallback first, then wait for the workers.
            self.learning.store(false, Ordering::SeqCst);
            self.pool.stop().await;
        }
        info!(mode = %target, "mode changed");
        target
    }

    pub fn mode(&self) -> Mode {
        Mode::from_learning(self.is_learning())
    }

    pub fn is_learning(&self) -> bool {
        self.learning.load(Ordering::SeqCst)
    }

    pub fn pool(&self) -> &Arc<TeacherPool> {
        &self.pool
    }
}
