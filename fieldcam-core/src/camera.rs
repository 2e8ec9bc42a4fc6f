//! src/camera.rs
//! ============================================================================
//! # Camera surface and photo capture
//!
//! The camera only produces bytes. Naming the file, writing it into the
//! current location and bumping the photo counter happen in
//! [`capture_photo`], in that order, so a failed capture leaves no file and
//! no count behind.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info, instrument, warn};

use crate::config::CameraConfig;
use crate::error::{AppError, AppResult};
use crate::model::navigator::Navigator;

/// How often a running capture is checked for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Camera collaborator: one still image per call.
pub trait CameraSurface {
    fn capture(&mut self) -> AppResult<Vec<u8>>;
}

/// Runs an external program and takes the image from its stdout. A run
/// longer than `timeout` is killed and reported as a capture failure.
#[derive(Debug, Clone)]
pub struct CommandCamera {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandCamera {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Drain a pipe on its own thread so a chatty child never blocks on a
    /// full pipe while we wait for it.
    fn drain(pipe: Option<impl Read + Send + 'static>) -> JoinHandle<Vec<u8>> {
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(mut pipe) = pipe {
                let _ = pipe.read_to_end(&mut buf);
            }
            buf
        })
    }

    fn kill(&self, child: &mut Child) {
        if let Err(e) = child.kill() {
            warn!(program = %self.program, error = %e, "Failed to kill capture command");
        }
        let _ = child.wait();
    }
}

impl CameraSurface for CommandCamera {
    fn capture(&mut self) -> AppResult<Vec<u8>> {
        debug!(program = %self.program, args = ?self.args, timeout = ?self.timeout, "Running capture command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppError::capture(format!("cannot start {}: {e}", self.program)))?;

        let stdout = Self::drain(child.stdout.take());
        let stderr = Self::drain(child.stderr.take());
        let deadline = Instant::now() + self.timeout;

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    self.kill(&mut child);
                    warn!(program = %self.program, timeout = ?self.timeout, "Capture command timed out");
                    return Err(AppError::capture(format!(
                        "{} timed out after {:?}",
                        self.program, self.timeout
                    )));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    self.kill(&mut child);
                    return Err(AppError::capture(format!(
                        "lost track of {}: {e}",
                        self.program
                    )));
                }
            }
        };

        let stdout = stdout
            .join()
            .map_err(|_| AppError::capture("stdout reader panicked"))?;
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            warn!(
                program = %self.program,
                code = ?status.code(),
                stderr = %stderr.trim(),
                "Capture command failed"
            );
            return Err(AppError::capture(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        Ok(stdout)
    }
}

/// Stand-in when no camera is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCamera;

impl CameraSurface for UnavailableCamera {
    fn capture(&mut self) -> AppResult<Vec<u8>> {
        Err(AppError::capture("no camera configured"))
    }
}

/// Camera described by the config, or [`UnavailableCamera`].
pub fn camera_from_config(config: &CameraConfig) -> Box<dyn CameraSurface> {
    match config.program.as_deref().map(str::trim) {
        Some(program) if !program.is_empty() => {
            Box::new(CommandCamera::new(program, config.args.clone(), config.timeout))
        }
        _ => Box::new(UnavailableCamera),
    }
}

/// `IMG_<YYYYMMDD_HHMMSS>.png`
pub fn photo_file_name(at: &DateTime<Local>) -> String {
    format!("IMG_{}.png", at.format("%Y%m%d_%H%M%S"))
}

/// Capture one photo into the navigator's current location.
///
/// Two captures within the same second target the same name; the second
/// overwrites the first.
#[instrument(level = "info", skip_all, fields(location = %navigator.state().location().display()))]
pub fn capture_photo(
    navigator: &mut Navigator,
    camera: &mut dyn CameraSurface,
    at: DateTime<Local>,
) -> AppResult<PathBuf> {
    let bytes = camera.capture()?;
    if bytes.is_empty() {
        return Err(AppError::capture("camera returned no image data"));
    }

    let path = navigator.state().location().join(photo_file_name(&at));
    navigator.fs().write_file(&path, &bytes)?;
    navigator.state_mut().record_photo();

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        photo_count = navigator.state().photo_count(),
        "Photo saved"
    );
    Ok(path)
}
