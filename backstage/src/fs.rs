use std::path::{Path, PathBuf};

use crate::core::{BrowseTarget, DirectoryEntry, FileEntryKind, HostError};
use crate::host::BrowseResponse;
use crate::paths;

/// Lists directories for [`Host::browse`](crate::Host::browse).
///
/// Hosts that keep documents on the local disk can answer browse requests
/// with [`StdDirectorySource`]; remote hosts implement their own.
pub trait DirectorySource {
    /// Lists `target`: the default start directory, the roots, or a path.
    fn list(&self, target: &BrowseTarget) -> Result<BrowseResponse, HostError>;
}

/// Directory source backed by `std::fs`.
///
/// `Default` lists the home directory. `Root` lists the existing drive
/// letters on Windows and `/` elsewhere. Entries whose type cannot be read
/// are skipped; hidden entries are kept.
#[derive(Clone, Debug, Default)]
pub struct StdDirectorySource {
    home: Option<PathBuf>,
}

impl StdDirectorySource {
    /// Source whose default directory is the user's home (`HOME`, else
    /// `USERPROFILE`).
    pub fn new() -> Self {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from);
        Self { home }
    }

    /// Overrides the default directory.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Directory listed for [`BrowseTarget::Default`].
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    fn list_dir(&self, dir: &Path) -> Result<BrowseResponse, HostError> {
        let mut contents = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            // Follow symlinks so linked folders can be entered.
            let is_dir = if file_type.is_symlink() {
                entry.path().is_dir()
            } else {
                file_type.is_dir()
            };
            let kind = if is_dir {
                FileEntryKind::Folder
            } else {
                FileEntryKind::File
            };
            let name = entry.file_name().to_string_lossy().to_string();
            let path = paths::normalise(&entry.path().to_string_lossy());
            contents.push(DirectoryEntry::new(name, path, kind));
        }
        // read_dir order is platform dependent.
        contents.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let os_path = dir.to_string_lossy().to_string();
        Ok(BrowseResponse {
            path: paths::normalise(&os_path),
            os_path,
            kind: Some(FileEntryKind::Folder),
            contents,
            error_message: None,
        })
    }

    fn list_roots(&self) -> BrowseResponse {
        let contents = if cfg!(windows) {
            windows_drives()
                .into_iter()
                .map(|d| {
                    let name = d.trim_end_matches('\\').to_string();
                    DirectoryEntry::new(name, paths::normalise(&d), FileEntryKind::Drive)
                })
                .collect()
        } else {
            vec![DirectoryEntry::new("/", "/", FileEntryKind::Drive)]
        };
        BrowseResponse {
            path: BrowseTarget::ROOT_TOKEN.to_string(),
            os_path: String::new(),
            kind: None,
            contents,
            error_message: None,
        }
    }
}

impl DirectorySource for StdDirectorySource {
    fn list(&self, target: &BrowseTarget) -> Result<BrowseResponse, HostError> {
        match target {
            BrowseTarget::Root => Ok(self.list_roots()),
            BrowseTarget::Default => match &self.home {
                Some(home) => self.list_dir(home),
                None => Ok(self.list_roots()),
            },
            BrowseTarget::Path(p) => {
                let dir = Path::new(p);
                if !dir.is_dir() {
                    return Err(HostError::Message(format!("Not a directory: {p}")));
                }
                self.list_dir(dir)
            }
        }
    }
}

fn windows_drives() -> Vec<String> {
    (b'A'..=b'Z')
        .map(|c| format!("{}:\\", c as char))
        .filter(|s| Path::new(s).exists())
        .collect()
}
