//! Browser upload source that decodes user-selected files through `FileReader`.

use platform_host::{UploadEncoding, UploadReadFuture, UploadSource};

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone)]
/// A browser `File` selected through an `<input type="file">` element.
pub struct WebUploadSource {
    name: String,
    size_bytes: u64,
    #[cfg(target_arch = "wasm32")]
    file: web_sys::File,
}

impl WebUploadSource {
    /// Wraps a browser `File`.
    #[cfg(target_arch = "wasm32")]
    pub fn new(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            size_bytes: file.size().max(0.0) as u64,
            file,
        }
    }

    /// Collects every file of an input element's `FileList`.
    #[cfg(target_arch = "wasm32")]
    pub fn from_file_list(files: &web_sys::FileList) -> Vec<Self> {
        (0..files.length())
            .filter_map(|idx| files.get(idx))
            .map(Self::new)
            .collect()
    }
}

impl UploadSource for WebUploadSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    fn read<'a>(
        &'a self,
        encoding: UploadEncoding,
    ) -> UploadReadFuture<'a, Result<Vec<u8>, String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                read_file(&self.file, encoding).await.map(String::into_bytes)
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = encoding;
                Err(format!(
                    "cannot read `{}`: FileReader is only available when compiled for wasm32",
                    self.name
                ))
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_file(file: &web_sys::File, encoding: UploadEncoding) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read uploaded file: {err:?}"))
            .and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| "file reader returned non-string result".to_string())
            });
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_sender = sender.clone();
    let file_name = file.name();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err(format!("failed to load `{file_name}`")));
        }
    }));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    match encoding {
        UploadEncoding::DataUrl => reader.read_as_data_url(file),
        UploadEncoding::Text => reader.read_as_text(file),
    }
    .map_err(|err| format!("failed to start file read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "uploaded file read was interrupted".to_string())?;
    on_load.forget();
    on_error.forget();
    result
}
