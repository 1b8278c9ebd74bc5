use futures::channel::oneshot;
use image::RgbaImage;

use crate::error::{WhiteboardError, WhiteboardResult};
use crate::snapshot::Snapshot;
use crate::util::time;

type DecodeResult = WhiteboardResult<RgbaImage>;

/// In-flight decode of the snapshot an undo will restore.
///
/// The task remembers the session epoch it was requested at. The session
/// only applies the decoded pixels if its epoch has not moved since; any
/// stroke start or clear in between supersedes the undo.
pub struct RestoreTask {
    epoch: u64,
    requested_at: f64,
    receiver: oneshot::Receiver<DecodeResult>,
}

impl std::fmt::Debug for RestoreTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestoreTask")
            .field("epoch", &self.epoch)
            .field("requested_at", &self.requested_at)
            .finish()
    }
}

impl RestoreTask {
    /// Start decoding `snapshot` in the background
    pub fn spawn(snapshot: Snapshot, epoch: u64) -> Self {
        let (sender, receiver) = oneshot::channel();
        log::debug!("Decoding snapshot {:?} for epoch {}", snapshot.size(), epoch);
        spawn_decode(snapshot, sender);
        Self {
            epoch,
            requested_at: time::current_time_secs(),
            receiver,
        }
    }

    /// Epoch of the session when the undo was requested
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn requested_at(&self) -> f64 {
        self.requested_at
    }

    /// Non-blocking check. `None` while the decode is still running.
    pub fn try_take(&mut self) -> Option<DecodeResult> {
        match self.receiver.try_recv() {
            Ok(result) => result,
            Err(oneshot::Canceled) => Some(Err(WhiteboardError::RestoreCancelled)),
        }
    }

    /// Block the current thread until the decode finishes
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(self) -> DecodeResult {
        futures::executor::block_on(self.receiver).unwrap_or(Err(WhiteboardError::RestoreCancelled))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_decode(snapshot: Snapshot, sender: oneshot::Sender<DecodeResult>) {
    let spawned = std::thread::Builder::new()
        .name("snapshot-decode".to_owned())
        .spawn(move || {
            // The session may have dropped the task; nothing to report then
            let _ = sender.send(snapshot.decode());
        });

    // On failure the closure and its sender are dropped, so the task
    // resolves to `RestoreCancelled`.
    if let Err(err) = spawned {
        log::error!("Could not start snapshot decode thread: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn_decode(snapshot: Snapshot, sender: oneshot::Sender<DecodeResult>) {
    wasm_bindgen_futures::spawn_local(async move {
        let _ = sender.send(snapshot.decode());
    });
}
