#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod panels;
pub mod restore;
pub mod snapshot;
pub mod stroke;
pub mod surface;
pub mod tool;
pub mod util;
pub mod whiteboard;

pub use app::WhiteboardApp;
pub use config::WhiteboardConfig;
pub use error::{WhiteboardError, WhiteboardResult};
pub use export::{DEFAULT_EXPORT_FILE_NAME, DownloadSink, MemorySink};
pub use history::History;
pub use input::PointerEvent;
pub use snapshot::Snapshot;
pub use surface::Surface;
pub use tool::{ToolKind, ToolState};
pub use whiteboard::{RestoreOutcome, Whiteboard};
