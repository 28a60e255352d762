//! # Mindwell Core Library
//!
//! This library provides the core business logic for Mindwell, a guided-session
//! timer for meditation and breathing exercises. All operations are available
//! via a standalone CLI binary; any GUI would be a thin layer over the same
//! core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine that counts discrete
//!   one-second ticks delivered by a swappable [`ClockSource`]
//! - **Registry**: Static catalog of guided activities (id, duration,
//!   localized title and instructions)
//! - **Storage**: SQLite-based session history and key-value timer persistence
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: Core timer state machine
//! - [`Registry`]: Session descriptor lookup
//! - [`Database`]: Completed-session history

pub mod error;
pub mod events;
pub mod registry;
pub mod storage;
pub mod timer;

pub use error::{CoreError, Result};
pub use events::Event;
pub use registry::{Category, Language, Localized, Registry, SessionDescriptor};
pub use storage::{Database, HistoryRecord, Stats};
pub use timer::{ClockSource, ManualClock, Notifier, Phase, SessionTimer, SystemClock};
