//! File logging for the command-line client
//!
//! Output on stdout belongs to the commands, so tracing goes to
//! `{data_dir}/rentsim.log`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "rentsim.log";

/// Log size that triggers a rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Most recent bytes kept by a rotation (1 MB)
const KEEP_SIZE: u64 = 1024 * 1024;

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Truncate the log to its last `keep` bytes once it grows past `max`.
///
/// The kept tail starts at a line boundary.
fn rotate(log_path: &Path, max: u64, keep: u64) -> io::Result<()> {
    let size = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if size <= max {
        return Ok(());
    }

    let mut tail = Vec::with_capacity(keep as usize);
    {
        let mut file = File::open(log_path)?;
        file.seek(SeekFrom::Start(size.saturating_sub(keep)))?;
        file.read_to_end(&mut tail)?;
    }

    let first_full_line = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    file.write_all(ROTATION_MARKER)?;
    file.write_all(&tail[first_full_line..])?;
    Ok(())
}

/// Log file shared by every writer the subscriber asks for
#[derive(Clone)]
struct SharedLogFile(Arc<Mutex<File>>);

impl SharedLogFile {
    fn lock(&self) -> io::Result<MutexGuard<'_, File>> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for SharedLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = SharedLogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Initialize logging into `{data_dir}/rentsim.log`.
///
/// The file is trimmed to its last megabyte when it exceeds 5 MB. `RUST_LOG`
/// overrides `level`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE);

    if let Err(e) = rotate(&log_path, MAX_LOG_SIZE, KEEP_SIZE) {
        eprintln!("Warning: Failed to rotate log file: {e}");
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let default_filter = format!("rentsim={level},rentsim_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(SharedLogFile(Arc::new(Mutex::new(file))))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!("rentsim logging initialized (log_path={})", log_path.display());
    Ok(())
}
