use crate::core::{BrowseTarget, DirectoryEntry, FileEntryKind, HostError};

/// Answer to [`Host::browse`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrowseResponse {
    /// Logical path of the listed directory (normalized on receipt)
    pub path: String,
    /// Host-native form of `path`
    pub os_path: String,
    /// Kind of the listed item, when the host knows it
    pub kind: Option<FileEntryKind>,
    /// Directory contents
    pub contents: Vec<DirectoryEntry>,
    /// Problem with the directory to show instead of its contents
    pub error_message: Option<String>,
}

/// Options forwarded to [`Host::save`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Write an export (data or results) instead of the document itself
    pub export: bool,
}

/// Read-only view of the host document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Path the document was last saved to
    pub path: Option<String>,
    /// Path the document was imported from (a foreign format)
    pub import_path: Option<String>,
    /// Document title
    pub title: String,
}

/// Change notification from the settings store.
///
/// `None` fields were not part of the change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsChange {
    /// New recent documents list
    pub recents: Option<Vec<DirectoryEntry>>,
    /// New examples list
    pub examples: Option<Vec<DirectoryEntry>>,
}

/// The application instance that owns the document.
///
/// All calls are made from the single UI flow that drives the
/// [`Backstage`](crate::Backstage); futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Host {
    /// Opens the document at `path` (an empty path opens a blank document).
    async fn open(&self, path: &str) -> Result<(), HostError>;

    /// Writes the document (or an export) to `path`.
    async fn save(&self, path: &str, options: SaveOptions, overwrite: bool)
    -> Result<(), HostError>;

    /// Lists a directory.
    async fn browse(&self, target: &BrowseTarget) -> Result<BrowseResponse, HostError>;

    /// Current document paths and title.
    fn document(&self) -> DocumentInfo;
}
