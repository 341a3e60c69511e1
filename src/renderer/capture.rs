use std::fs;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crossbeam::channel::{bounded, Sender, TrySendError};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::error::{Result, SimError};

/// Receives finished frames from a [`super::surface::PixelBuffer`].
pub trait FrameSink: Send {
    fn submit(&mut self, index: u64, frame: &RgbaImage) -> Result<()>;

    /// Flush whatever is still queued and report the first failure, if any.
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Writes frames as `<prefix>_<index>.png` from a background thread.
pub struct PngCapture {
    folder: PathBuf,
    tx: Option<Sender<(u64, RgbaImage)>>,
    worker: Option<JoinHandle<Result<u64>>>,
}

impl PngCapture {
    pub fn new<P: AsRef<Path>>(folder: P, prefix: &str, queue_depth: usize) -> Result<Self> {
        let folder = folder.as_ref().to_path_buf();
        fs::create_dir_all(&folder)?;

        let (tx, rx) = bounded::<(u64, RgbaImage)>(queue_depth.max(1));
        let out = folder.clone();
        let prefix = prefix.to_string();
        let worker = std::thread::Builder::new()
            .name("png-capture".into())
            .spawn(move || -> Result<u64> {
                let mut written = 0u64;
                for (index, frame) in rx {
                    let path = out.join(format!("{prefix}_{index:05}.png"));
                    frame.save(&path)?;
                    written += 1;
                }
                Ok(written)
            })?;

        Ok(Self {
            folder,
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// The writer hung up early: join it and surface the error that stopped it.
    fn writer_failure(&mut self) -> SimError {
        self.tx.take();
        match self.worker.take().map(|w| w.join()) {
            Some(Ok(Err(e))) => e,
            Some(Err(_)) => SimError::Capture("PNG writer thread panicked".into()),
            Some(Ok(Ok(_))) | None => SimError::Capture("PNG writer thread stopped".into()),
        }
    }
}

impl FrameSink for PngCapture {
    fn submit(&mut self, index: u64, frame: &RgbaImage) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| SimError::Capture("capture already finished".into()))?;
        match tx.try_send((index, frame.clone())) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(item)) => {
                warn!(index, "capture queue full, render loop waiting on PNG writer");
                if tx.send(item).is_ok() {
                    return Ok(());
                }
                Err(self.writer_failure())
            }
            Err(TrySendError::Disconnected(_)) => Err(self.writer_failure()),
        }
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        // Dropping the sender ends the writer loop.
        self.tx.take();
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        let written = worker
            .join()
            .map_err(|_| SimError::Capture("PNG writer thread panicked".into()))??;
        debug!(written, folder = %self.folder.display(), "capture finished");
        Ok(())
    }
}

impl Drop for PngCapture {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
