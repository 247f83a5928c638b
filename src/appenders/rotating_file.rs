//! Rolling-file appender
//!
//! Appends JSON lines to `<dir>/<filename>`. Before a write that would push
//! the file past the size limit, the file is moved to `<filename>.1` and
//! older backups shift up by one (`.1` is always the newest). Backups past
//! the count limit or older than the age limit are deleted after each
//! rotation. Backups may be gzip-compressed (`<filename>.N.gz`); compression
//! runs on a background thread so writers are not held up by it.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::log_entry::LogEntry;
use crate::core::output_format;
use crate::core::timestamp::TimestampFormat;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

/// Size limit used when the configured one is zero or negative
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

const MEGABYTE: u64 = 1024 * 1024;
const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const COMPRESSED_SUFFIX: &str = ".gz";

/// When to rotate and which backups to keep
///
/// # Examples
///
/// ```
/// use log_bootstrap::appenders::RotationPolicy;
/// use std::time::Duration;
///
/// let policy = RotationPolicy::new()
///     .with_max_size(50 * 1024 * 1024)
///     .with_max_backups(7)
///     .with_max_age(Duration::from_secs(14 * 24 * 3600))
///     .with_compression(true);
/// assert_eq!(policy.max_backups, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate before the active file would exceed this many bytes
    pub max_bytes: u64,
    /// Backups to keep; `None` keeps all
    pub max_backups: Option<usize>,
    /// Delete backups last modified longer ago than this; `None` keeps all
    pub max_age: Option<Duration>,
    /// Gzip backups after rotation
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SIZE_MB * MEGABYTE,
            max_backups: None,
            max_age: None,
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a policy from raw configuration numbers.
    ///
    /// Zero or negative values mean "use the default": 100 MB for size, no
    /// count limit for backups, no age limit.
    #[must_use]
    pub fn from_limits(max_size_mb: i64, max_backups: i64, max_age_days: i64) -> Self {
        let positive = |value: i64| u64::try_from(value).ok().filter(|v| *v > 0);

        Self {
            max_bytes: positive(max_size_mb)
                .unwrap_or(DEFAULT_MAX_SIZE_MB)
                .saturating_mul(MEGABYTE),
            max_backups: positive(max_backups).map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
            max_age: positive(max_age_days)
                .map(|days| DAY.saturating_mul(u32::try_from(days).unwrap_or(u32::MAX))),
            compress: false,
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = Some(count);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// Create `dir` and any missing parents: owner rwx, group/other read-only.
pub fn create_log_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o744);
    }

    builder.create(dir)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options.open(path)
}

/// One rotated file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub index: usize,
    pub path: PathBuf,
    pub compressed: bool,
}

/// Size-rotated JSON-lines file
///
/// # Examples
///
/// ```no_run
/// use log_bootstrap::appenders::{RotatingFileAppender, RotationPolicy};
///
/// let policy = RotationPolicy::from_limits(10, 5, 30);
/// let appender = RotatingFileAppender::with_policy("/var/log/svc/svc.log", policy).unwrap();
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    file: Option<File>,
    current_size: u64,
    timestamp_format: TimestampFormat,
    compression: Option<thread::JoinHandle<()>>,
}

impl RotatingFileAppender {
    /// Open with the default policy
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created or opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Open `path` for appending, creating its directory if needed
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created or opened
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_log_dir(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = open_log_file(&base_path).map_err(|e| {
            LoggerError::file_appender(
                base_path.display().to_string(),
                format!("Failed to open: {}", e),
            )
        })?;

        let current_size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    base_path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        let appender = Self {
            base_path,
            policy,
            file: Some(file),
            current_size,
            timestamp_format: TimestampFormat::default(),
            compression: None,
        };
        appender.prune_backups();

        Ok(appender)
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    fn should_rotate(&self, incoming: u64) -> bool {
        // An oversized record still goes into an empty file
        self.current_size > 0 && self.current_size.saturating_add(incoming) > self.policy.max_bytes
    }

    fn file_name(&self) -> String {
        self.base_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn backup_path(&self, index: usize, compressed: bool) -> PathBuf {
        let suffix = if compressed { COMPRESSED_SUFFIX } else { "" };
        self.base_path
            .with_file_name(format!("{}.{}{}", self.file_name(), index, suffix))
    }

    /// Rotated files currently on disk, oldest (highest index) first
    pub fn backups(&self) -> Vec<Backup> {
        let dir = match self.base_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let prefix = format!("{}.", self.file_name());

        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut backups: Vec<Backup> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let rest = name.strip_prefix(&prefix)?;
                let (digits, compressed) = match rest.strip_suffix(COMPRESSED_SUFFIX) {
                    Some(digits) => (digits, true),
                    None => (rest, false),
                };
                let index = digits.parse::<usize>().ok().filter(|i| *i > 0)?;
                Some(Backup {
                    index,
                    path: entry.path(),
                    compressed,
                })
            })
            .collect();

        backups.sort_by(|a, b| b.index.cmp(&a.index));
        backups
    }

    fn rotate(&mut self) -> Result<()> {
        // Backups must not be renamed under a running compressor
        self.wait_for_compression();
        // Release the handle before renaming
        drop(self.file.take());

        for backup in self.backups() {
            let target = self.backup_path(backup.index + 1, backup.compressed);
            fs::rename(&backup.path, &target).map_err(|e| {
                LoggerError::file_rotation(
                    backup.path.display().to_string(),
                    format!("Failed to shift backup: {}", e),
                )
            })?;
        }

        let newest = self.backup_path(1, false);
        if self.base_path.exists() {
            fs::rename(&self.base_path, &newest).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;
        }

        let file = open_log_file(&self.base_path).map_err(|e| {
            LoggerError::file_rotation(
                self.base_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;
        self.file = Some(file);
        self.current_size = 0;

        if self.policy.compress && newest.exists() {
            self.start_compression(newest);
        }

        self.prune_backups();
        Ok(())
    }

    /// Delete backups beyond the count limit or older than the age limit
    fn prune_backups(&self) {
        if self.policy.max_backups.is_none() && self.policy.max_age.is_none() {
            return;
        }

        let now = SystemTime::now();
        for backup in self.backups() {
            let over_count = self
                .policy
                .max_backups
                .is_some_and(|max| backup.index > max);
            let too_old = self.policy.max_age.is_some_and(|max_age| {
                fs::metadata(&backup.path)
                    .and_then(|m| m.modified())
                    .ok()
                    .and_then(|modified| now.duration_since(modified).ok())
                    .is_some_and(|age| age > max_age)
            });

            if over_count || too_old {
                if let Err(e) = fs::remove_file(&backup.path) {
                    eprintln!(
                        "[WARN] Failed to remove old backup {}: {}",
                        backup.path.display(),
                        e
                    );
                }
            }
        }
    }

    fn start_compression(&mut self, backup: PathBuf) {
        let spawned = thread::Builder::new()
            .name("log-compress".to_string())
            .spawn({
                let backup = backup.clone();
                move || compress_backup(&backup)
            });

        match spawned {
            Ok(handle) => self.compression = Some(handle),
            Err(e) => {
                eprintln!("[WARN] Failed to spawn compression thread: {}. Compressing inline.", e);
                compress_backup(&backup);
            }
        }
    }

    /// Block until the last rotated backup has been compressed
    fn wait_for_compression(&mut self) {
        if let Some(handle) = self.compression.take() {
            if handle.join().is_err() {
                eprintln!("[WARN] Backup compression thread panicked");
            }
        }
    }

    fn reopen(&mut self) -> Result<()> {
        let file = open_log_file(&self.base_path).map_err(|e| {
            LoggerError::file_appender(
                self.base_path.display().to_string(),
                format!("Failed to reopen after rotation failure: {}", e),
            )
        })?;
        self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.file = Some(file);
        Ok(())
    }
}

fn compress_backup(path: &Path) {
    if let Err(e) = compress_file(path) {
        eprintln!("[WARN] Failed to compress {}: {}", path.display(), e);
    }
}

/// Gzip `path` into `path.gz`, removing the original only after success
fn compress_file(path: &Path) -> Result<()> {
    let mut gz_name = path.as_os_str().to_os_string();
    gz_name.push(COMPRESSED_SUFFIX);
    let gz_path = PathBuf::from(gz_name);
    let mut tmp_name = gz_path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = (|| -> io::Result<()> {
        let mut reader = BufReader::new(File::open(path)?);
        let output = BufWriter::new(File::create(&tmp_path)?);
        let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());
        io::copy(&mut reader, &mut encoder)?;
        encoder.finish()?.flush()?;
        fs::rename(&tmp_path, &gz_path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[WARN] Compressed {} but failed to remove the original: {}",
            path.display(),
            e
        );
    }

    Ok(())
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating-file"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = output_format::format_json(entry, &self.timestamp_format)?;
        line.push('\n');
        let incoming = line.len() as u64;

        if self.should_rotate(incoming) {
            if let Err(e) = self.rotate() {
                // Keep the record: carry on in the active file, over the limit
                eprintln!("[WARN] Log rotation failed: {}. Continuing with current file.", e);
                if self.file.is_none() {
                    self.reopen()?;
                }
            }
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Writer not initialized"))?;
        file.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.base_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += incoming;
        Ok(())
    }

    /// Also waits for a pending backup compression to finish
    fn flush(&mut self) -> Result<()> {
        self.wait_for_compression();
        if let Some(ref mut file) = self.file {
            file.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        self.wait_for_compression();
    }
}
