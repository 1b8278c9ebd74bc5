use egui::Pos2;

use crate::config::WhiteboardConfig;
use crate::error::{WhiteboardError, WhiteboardResult};
use crate::export::{self, DownloadSink};
use crate::history::History;
use crate::input::PointerEvent;
use crate::restore::RestoreTask;
use crate::snapshot::Snapshot;
use crate::stroke::{OpenStroke, StrokeController};
use crate::surface::Surface;
use crate::tool::ToolState;
use crate::util::time;

/// What happened to an undo once its decode finished
#[derive(Debug)]
pub enum RestoreOutcome {
    /// Surface repainted from the snapshot, which was popped from history
    Applied,
    /// A stroke or clear happened after the undo was requested; nothing changed
    Superseded,
    /// Decoding failed and the surface is unchanged. A snapshot that can never
    /// decode is dropped from history so the next undo reaches older ones.
    Failed(WhiteboardError),
}

/// One drawing session: the surface plus every piece of state that changes it.
///
/// History holds the pre-stroke snapshot of every stroke started since the
/// last clear, minus the undos that completed.
#[derive(Debug)]
pub struct Whiteboard {
    surface: Surface,
    tool: ToolState,
    history: History,
    stroke: StrokeController,
    pending_restore: Option<RestoreTask>,
    /// Advanced by every action that invalidates an in-flight restore
    epoch: u64,
    export_file_name: String,
}

impl Whiteboard {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config([width, height], &WhiteboardConfig::default())
    }

    pub fn with_config(size: [u32; 2], config: &WhiteboardConfig) -> Self {
        let surface = Surface::new(size[0], size[1]);
        log::debug!("Mounted {}x{} surface", surface.width(), surface.height());
        Self {
            surface,
            tool: config.tool_state(),
            history: History::new(),
            stroke: StrokeController::new(),
            pending_restore: None,
            epoch: 0,
            export_file_name: config.export_file_name.clone(),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ToolState {
        &mut self.tool
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_open()
    }

    pub fn open_stroke(&self) -> Option<&OpenStroke> {
        self.stroke.current()
    }

    pub fn restore_pending(&self) -> bool {
        self.pending_restore.is_some()
    }

    /// Undo is offered when there is history and no restore in flight
    pub fn can_undo(&self) -> bool {
        self.history.can_undo() && !self.restore_pending()
    }

    pub fn export_file_name(&self) -> &str {
        &self.export_file_name
    }

    /// Snapshot the surface, then open a path at `point` with the current tool
    pub fn begin_stroke(&mut self, point: Pos2) {
        self.epoch += 1;
        match Snapshot::capture(&self.surface) {
            Ok(snapshot) => self.history.push(snapshot),
            Err(err) => log::error!("Stroke will not be undoable: {err}"),
        }
        self.stroke.begin(point, &self.tool);
        log::debug!("Stroke started at {:?}, history {}", point, self.history.len());
    }

    /// Draw to `point` if a stroke is open
    pub fn extend_stroke(&mut self, point: Pos2) -> bool {
        self.stroke.extend(point, &mut self.surface)
    }

    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.stroke.end() {
            log::debug!("Stroke ended after {} segments", stroke.segments());
        }
    }

    /// Route a canvas pointer event to the stroke operations
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => self.begin_stroke(pos),
            PointerEvent::Move(pos) => {
                self.extend_stroke(pos);
            }
            PointerEvent::Up | PointerEvent::Leave => self.end_stroke(),
        }
    }

    /// Start restoring the most recent snapshot. Returns false (and does
    /// nothing) when history is empty or another undo is still decoding.
    pub fn undo(&mut self) -> bool {
        if let Some(task) = &self.pending_restore {
            if task.epoch() == self.epoch {
                log::debug!("Undo ignored, a restore is already in flight");
                return false;
            }
            // Already superseded; it would be discarded anyway
            self.pending_restore = None;
        }

        let Some(snapshot) = self.history.last() else {
            return false;
        };
        self.pending_restore = Some(RestoreTask::spawn(snapshot.clone(), self.epoch));
        true
    }

    /// Apply the in-flight restore if its decode has finished. Call once per frame.
    pub fn poll_restore(&mut self) -> Option<RestoreOutcome> {
        let result = self.pending_restore.as_mut()?.try_take()?;
        let task = self.pending_restore.take()?;
        Some(self.apply(task.epoch(), task.requested_at(), result))
    }

    /// Block until the in-flight restore finishes and apply it
    #[cfg(not(target_arch = "wasm32"))]
    pub fn finish_restore(&mut self) -> Option<RestoreOutcome> {
        let task = self.pending_restore.take()?;
        let epoch = task.epoch();
        let requested_at = task.requested_at();
        let result = task.wait();
        Some(self.apply(epoch, requested_at, result))
    }

    fn apply(&mut self, epoch: u64, requested_at: f64, result: WhiteboardResult<image::RgbaImage>) -> RestoreOutcome {
        if epoch != self.epoch {
            log::info!("Discarding undo from epoch {epoch}, session is at {}", self.epoch);
            return RestoreOutcome::Superseded;
        }

        match result {
            Ok(image) => {
                self.surface.restore_from(&image);
                self.history.pop();
                self.end_stroke();
                log::debug!(
                    "Undo applied in {:.1} ms, history {}",
                    time::elapsed_millis(requested_at),
                    self.history.len()
                );
                RestoreOutcome::Applied
            }
            Err(err) => {
                log::error!("Undo failed: {err}");
                if matches!(err, WhiteboardError::Decode(_) | WhiteboardError::SizeMismatch { .. }) {
                    self.history.pop();
                    log::warn!("Dropped undecodable snapshot, history {}", self.history.len());
                }
                RestoreOutcome::Failed(err)
            }
        }
    }

    /// Empty history and blank the surface. Supersedes any in-flight undo.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.pending_restore = None;
        self.history.clear();
        self.surface.blank();
        log::info!("Whiteboard cleared");
    }

    /// Deliver the surface as PNG under the configured file name
    pub fn export_image(&self, sink: &mut dyn DownloadSink) -> WhiteboardResult<()> {
        export::export_png(&self.surface, &self.export_file_name, sink)
    }
}
