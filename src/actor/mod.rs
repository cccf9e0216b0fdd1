//! Actor System for the Build → Upload → Reload Pipeline
//!
//! Watch mode runs as a chain of message-passing actors:
//!
//! ```text
//! FsActor --> BuilderActor --> RouterActor --> UploadGate --> WsActor
//! (watch)      (bundle)        (classify)      (sync)       (broadcast)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - message types passed between actors
//! - `fs` - debounced source-tree watcher
//! - `builder` - bundler wrapper emitting compiler lifecycle events
//! - `router` - build event router: status rendering + classification
//! - `gate` - upload gate: serialized remote sync + reload notification
//! - `ws` - live-reload broadcast to browser clients
//! - `coordinator` - channel wiring and actor lifecycle

pub mod builder;
pub mod coordinator;
pub mod fs;
pub mod gate;
pub mod messages;
pub mod router;
pub mod ws;

pub use coordinator::Coordinator;
