use std::ffi::OsString;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::OnceLock;
use std::thread::JoinHandle;

use herald_common::{SpeakOptions, SpeechEngine, SpeechError, Voice};
use tracing::{debug, info, warn};

use super::backend::Backend;

/// Speaks through the platform's command-line TTS tool.
///
/// The voice list is queried once, on first use. Utterances are queued to a
/// single worker thread that runs one TTS process at a time, so messages
/// play in the order they were spoken and never overlap. Dropping the
/// engine waits for the queue to drain.
pub struct SystemSpeechEngine {
    backend: Option<Backend>,
    program: OsString,
    voices: OnceLock<Vec<Voice>>,
    queue: OnceLock<SpeechQueue>,
}

struct SpeechQueue {
    tx: Sender<Vec<String>>,
    worker: JoinHandle<()>,
}

impl SystemSpeechEngine {
    pub fn new() -> Self {
        let backend = Backend::detect();
        match backend {
            Some(b) => info!(program = b.program(), "system speech backend selected"),
            None => warn!("no speech backend for this platform"),
        }
        Self::build(backend, backend.map(Backend::program).unwrap_or_default())
    }

    pub fn with_backend(backend: Backend) -> Self {
        Self::build(Some(backend), backend.program())
    }

    /// Drive `backend`'s argument conventions through a different program.
    pub fn with_program(backend: Backend, program: impl Into<OsString>) -> Self {
        Self::build(Some(backend), program)
    }

    fn build(backend: Option<Backend>, program: impl Into<OsString>) -> Self {
        Self {
            backend,
            program: program.into(),
            voices: OnceLock::new(),
            queue: OnceLock::new(),
        }
    }

    pub fn backend(&self) -> Option<Backend> {
        self.backend
    }

    fn query_voices(&self) -> Vec<Voice> {
        let Some(backend) = self.backend else {
            return Vec::new();
        };

        let output = match Command::new(&self.program)
            .args(backend.list_args())
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                warn!(program = ?self.program, error = %e, "failed to list speech voices");
                return Vec::new();
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(program = ?self.program, stderr = %stderr.trim(), "voice listing failed");
            return Vec::new();
        }

        let voices = backend.parse_voices(&String::from_utf8_lossy(&output.stdout));
        debug!(count = voices.len(), "speech voices listed");
        voices
    }

    fn queue(&self) -> &SpeechQueue {
        self.queue.get_or_init(|| {
            let (tx, rx) = mpsc::channel();
            let program = self.program.clone();
            let worker = std::thread::spawn(move || run_queue(&program, rx));
            SpeechQueue { tx, worker }
        })
    }
}

/// Play queued utterances one after another until every sender is gone.
fn run_queue(program: &OsString, rx: Receiver<Vec<String>>) {
    for args in rx {
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if !status.success() => warn!(%status, "speech process exited with failure"),
            Ok(_) => {}
            Err(e) => warn!(program = ?program, error = %e, "failed to run speech process"),
        }
    }
    debug!("speech queue closed");
}

impl Default for SystemSpeechEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SystemSpeechEngine {
    fn drop(&mut self) {
        if let Some(SpeechQueue { tx, worker }) = self.queue.take() {
            drop(tx);
            if worker.join().is_err() {
                warn!("speech worker panicked");
            }
        }
    }
}

impl SpeechEngine for SystemSpeechEngine {
    fn list_voices(&self) -> Vec<Voice> {
        self.voices.get_or_init(|| self.query_voices()).clone()
    }

    fn speak(&self, text: &str, options: &SpeakOptions) -> Result<(), SpeechError> {
        let backend = self
            .backend
            .ok_or_else(|| SpeechError::EngineFailed("no speech backend on this platform".into()))?;

        self.queue()
            .tx
            .send(backend.speak_args(text, options))
            .map_err(|_| SpeechError::EngineFailed("speech queue closed".into()))
    }
}
