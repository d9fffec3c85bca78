// WHY: The document is rewritten in two phases: everything goes to a staging file
// first, and only a fully written staging file replaces the original

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::error::{LimvocError, Result};

/// Default staging file name, relative to the working directory
pub const DEFAULT_STAGING_PATH: &str = "temp.txt";

/// How the staging file replaces the original document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitStrategy {
    /// Atomic rename over the original. Falls back to `Copy` if the rename fails.
    #[default]
    Rename,
    /// Truncate the original and copy staged bytes into it, then delete the staging file.
    /// A failure partway can leave the original truncated.
    Copy,
}

impl fmt::Display for CommitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitStrategy::Rename => f.write_str("rename"),
            CommitStrategy::Copy => f.write_str("copy"),
        }
    }
}

impl FromStr for CommitStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rename" => Ok(CommitStrategy::Rename),
            "copy" => Ok(CommitStrategy::Copy),
            other => Err(format!("unknown commit strategy '{other}' (expected rename or copy)")),
        }
    }
}

/// Write side of the staging file. Owned by one run.
pub struct StagingFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl StagingFile {
    /// Create (or silently overwrite) the staging file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| LimvocError::OpenStaging {
            path: path.clone(),
            source,
        })?;
        debug!("Created staging file: {}", path.display());
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and sync, closing the write handle
    fn close(self) -> Result<PathBuf> {
        let close_err = |path: &Path, source: io::Error| LimvocError::CloseStaging {
            path: path.to_path_buf(),
            source,
        };
        let file = self
            .writer
            .into_inner()
            .map_err(|e| close_err(&self.path, e.into_error()))?;
        file.sync_all().map_err(|e| close_err(&self.path, e))?;
        Ok(self.path)
    }

    /// Replace `target` with the staged content. Returns the strategy that did the job.
    ///
    /// A symlinked target is followed, so the file it points at is what gets replaced.
    pub fn commit(self, target: &Path, strategy: CommitStrategy) -> Result<CommitStrategy> {
        let staged = self.close()?;

        match strategy {
            CommitStrategy::Rename => match rename_over(&staged, &link_target(target)) {
                Ok(()) => {
                    info!("Committed {} over {} by rename", staged.display(), target.display());
                    Ok(CommitStrategy::Rename)
                }
                Err(e) => {
                    warn!(
                        "Rename of {} over {} failed ({}), falling back to copy",
                        staged.display(),
                        target.display(),
                        e
                    );
                    copy_over(&staged, target)?;
                    Ok(CommitStrategy::Copy)
                }
            },
            CommitStrategy::Copy => {
                copy_over(&staged, target)?;
                Ok(CommitStrategy::Copy)
            }
        }
    }
}

impl Write for StagingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Fail before anything is created when `staging` names the same file as `input`.
///
/// Creating the staging file truncates it, which would empty the input unread.
pub fn ensure_distinct(staging: &Path, input: &Path) -> Result<()> {
    let (Ok(staging_real), Ok(input_real)) = (fs::canonicalize(staging), fs::canonicalize(input)) else {
        return Ok(());
    };
    if staging_real == input_real {
        return Err(LimvocError::OpenStaging {
            path: staging.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "staging path is the input document"),
        });
    }
    Ok(())
}

/// Path a rename should replace: the file behind `target` when it is a symlink
fn link_target(target: &Path) -> PathBuf {
    let is_link = fs::symlink_metadata(target)
        .map(|metadata| metadata.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return target.to_path_buf();
    }
    match fs::canonicalize(target) {
        Ok(resolved) => {
            debug!("Following symlink {} to {}", target.display(), resolved.display());
            resolved
        }
        // Dangling link: the rename fails over to a copy, which writes through it
        Err(_) => target.to_path_buf(),
    }
}

fn rename_over(staged: &Path, target: &Path) -> io::Result<()> {
    // Keep the document's mode; a rename would otherwise carry the staging file's
    if let Ok(metadata) = fs::metadata(target) {
        if let Err(e) = fs::set_permissions(staged, metadata.permissions()) {
            debug!("Could not copy permissions to {}: {}", staged.display(), e);
        }
    }
    fs::rename(staged, target)
}

fn copy_over(staged: &Path, target: &Path) -> Result<()> {
    let mut output = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(target)
        .map_err(|source| LimvocError::OpenInput {
            path: target.to_path_buf(),
            source,
        })?;
    let mut input = File::open(staged).map_err(|source| LimvocError::OpenStaging {
        path: staged.to_path_buf(),
        source,
    })?;

    let copied = io::copy(&mut input, &mut output)
        .map_err(|e| LimvocError::io("copying staging file over document", e))?;
    output.sync_all().map_err(|source| LimvocError::CloseInput {
        path: target.to_path_buf(),
        source,
    })?;
    drop(input);

    fs::remove_file(staged).map_err(|source| LimvocError::CloseStaging {
        path: staged.to_path_buf(),
        source,
    })?;
    info!("Committed {} bytes into {} by copy", copied, target.display());
    Ok(())
}
