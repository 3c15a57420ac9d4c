// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background learning for Autodidact.
//!
//! - [`TeacherPool`]: one worker per provider, growing the corpus from a topic list
//! - [`ModeController`]: learning vs test mode, starting and stopping the pool

pub mod mode;
pub mod pool;
pub mod topics;

pub use mode::ModeController;
pub use pool::{TeacherPool, TeacherSettings};
pub use topics::{Topic, TopicCursor, builtin_topics, topics_from_config};
