use crate::error::WhiteboardResult;
use crate::surface::Surface;

/// File name every export is delivered under unless configured otherwise
pub const DEFAULT_EXPORT_FILE_NAME: &str = "whiteboard.png";

/// Destination for an exported image.
///
/// Natively this is a directory on disk; in the browser it is a client-side
/// download.
pub trait DownloadSink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> WhiteboardResult<()>;
}

/// Encode the full surface as PNG and hand it to `sink`. Reads the surface only.
pub fn export_png(surface: &Surface, file_name: &str, sink: &mut dyn DownloadSink) -> WhiteboardResult<()> {
    let png = surface.encode_png()?;
    log::info!(
        "Exporting {}x{} surface as {} ({} bytes)",
        surface.width(),
        surface.height(),
        file_name,
        png.len()
    );
    sink.deliver(file_name, &png)
}

/// Keeps every delivered file in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub downloads: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&(String, Vec<u8>)> {
        self.downloads.last()
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> WhiteboardResult<()> {
        self.downloads.push((file_name.to_owned(), png.to_vec()));
        Ok(())
    }
}

/// Writes exports into a directory, replacing any previous file of the same name
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSystemSink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DownloadSink for FileSystemSink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> WhiteboardResult<()> {
        // Only a bare name may be joined, never a path that leaves `dir`
        let path = std::path::Path::new(file_name);
        if path.file_name() != Some(path.as_os_str()) {
            return Err(crate::error::WhiteboardError::InvalidFileName(file_name.to_owned()));
        }
        let path = self.dir.join(path);
        std::fs::write(&path, png)?;
        log::info!("Saved {}", path.display());
        Ok(())
    }
}

/// Triggers a browser download through a temporary object URL
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDownloadSink;

#[cfg(target_arch = "wasm32")]
impl DownloadSink for BrowserDownloadSink {
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> WhiteboardResult<()> {
        use crate::error::WhiteboardError;
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| WhiteboardError::Download(format!("{e:?}"));

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| WhiteboardError::Download("no document".to_owned()))?;

        let bytes = js_sys::Uint8Array::from(png);
        let parts = js_sys::Array::new();
        parts.push(&bytes);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| WhiteboardError::Download("element is not an anchor".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).ok();
        Ok(())
    }
}

/// The sink the app uses on this platform
pub fn platform_sink(config: &crate::config::WhiteboardConfig) -> Box<dyn DownloadSink> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(FileSystemSink::new(config.export_dir.clone()))
    }
    #[cfg(target_arch = "wasm32")]
    {
        let _ = config;
        Box::new(BrowserDownloadSink)
    }
}
