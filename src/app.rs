use egui::{Key, KeyboardShortcut, Modifiers, TextureHandle, TextureOptions, Vec2};

use crate::config::WhiteboardConfig;
use crate::export::{self, DownloadSink};
use crate::input::CanvasInput;
use crate::panels::{canvas_panel, toolbar};
use crate::whiteboard::{RestoreOutcome, Whiteboard};

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);

/// The whiteboard widget as an eframe application.
///
/// The surface is created on the first frame, sized to the canvas area
/// available then, and keeps that size for the rest of the session.
pub struct WhiteboardApp {
    config: WhiteboardConfig,
    whiteboard: Option<Whiteboard>,
    pub(crate) input: CanvasInput,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    sink: Box<dyn DownloadSink>,
    /// Last export / undo message shown in the toolbar
    status: Option<String>,
}

impl WhiteboardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: WhiteboardConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let sink = export::platform_sink(&config);
        Self::with_sink(config, sink)
    }

    pub fn with_sink(config: WhiteboardConfig, sink: Box<dyn DownloadSink>) -> Self {
        Self {
            config,
            whiteboard: None,
            input: CanvasInput::new(egui::Rect::NOTHING),
            texture: None,
            uploaded_revision: None,
            sink,
            status: None,
        }
    }

    pub fn whiteboard(&self) -> Option<&Whiteboard> {
        self.whiteboard.as_ref()
    }

    pub fn whiteboard_mut(&mut self) -> Option<&mut Whiteboard> {
        self.whiteboard.as_mut()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Create the session on first use, sized from config or the canvas area
    pub fn mount(&mut self, available: Vec2) -> &mut Whiteboard {
        let config = &self.config;
        self.whiteboard.get_or_insert_with(|| {
            let size = config
                .surface_size
                .unwrap_or([available.x.max(1.0) as u32, available.y.max(1.0) as u32]);
            Whiteboard::with_config(size, config)
        })
    }

    /// Feed this frame's pointer input to the session
    pub(crate) fn route_input(&mut self, ctx: &egui::Context, canvas: &egui::Response) {
        let events = self.input.process(ctx, canvas);
        if let Some(board) = &mut self.whiteboard {
            for event in events {
                board.handle_pointer(event);
            }
        }
    }

    /// Re-upload the surface when it changed since the last upload
    pub(crate) fn sync_texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        let board = self.whiteboard.as_ref()?;
        let revision = board.surface().revision();

        if self.uploaded_revision != Some(revision) || self.texture.is_none() {
            let image = board.surface().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("whiteboard_surface", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(revision);
        }
        self.texture.as_ref()
    }

    pub fn undo(&mut self) {
        if let Some(board) = &mut self.whiteboard {
            board.undo();
        }
    }

    pub fn clear(&mut self) {
        if let Some(board) = &mut self.whiteboard {
            board.clear();
            self.status = None;
        }
    }

    pub fn export(&mut self) {
        let Some(board) = &self.whiteboard else {
            return;
        };
        self.status = Some(match board.export_image(self.sink.as_mut()) {
            Ok(()) => format!("Saved {}", board.export_file_name()),
            Err(err) => {
                log::error!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }

    /// Apply a finished undo, and keep frames coming while one is decoding
    fn drive_restore(&mut self, ctx: &egui::Context) {
        let Some(board) = &mut self.whiteboard else {
            return;
        };
        match board.poll_restore() {
            Some(RestoreOutcome::Applied) | Some(RestoreOutcome::Superseded) => ctx.request_repaint(),
            Some(RestoreOutcome::Failed(err)) => self.status = Some(format!("Undo failed: {err}")),
            None => {}
        }
        if board.restore_pending() {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for WhiteboardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input_mut(|i| i.consume_shortcut(&UNDO_SHORTCUT)) {
            self.undo();
        }

        // Panels: toolbar first so the canvas gets the remaining space
        toolbar(self, ctx);
        canvas_panel(self, ctx);

        self.drive_restore(ctx);
    }
}
