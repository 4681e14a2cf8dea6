use indexmap::IndexSet;
use thiserror::Error;

/// Kind of a filesystem item reported by the host.
///
/// The discriminants are the ranks used when ordering listings: higher
/// ranks are listed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileEntryKind {
    /// A regular file
    File = 0,
    /// A directory
    Folder = 1,
    /// A drive or volume root
    Drive = 2,
    /// A well-known directory (Documents, Desktop, ...)
    SpecialFolder = 3,
}

impl FileEntryKind {
    /// Ordering rank of this kind.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Whether entries of this kind are navigated into rather than opened.
    pub fn is_container(self) -> bool {
        !matches!(self, FileEntryKind::File)
    }
}

/// What a browser place is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// Pick an existing document to open
    Open,
    /// Pick a destination for saving the document
    Save,
    /// Pick a destination for exporting data or results
    Export,
}

impl Purpose {
    /// Lower-case name, as used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::Open => "open",
            Purpose::Save => "save",
            Purpose::Export => "export",
        }
    }

    /// Whether this purpose writes a file (save or export).
    pub fn is_saving(self) -> bool {
        matches!(self, Purpose::Save | Purpose::Export)
    }
}

/// One item of a directory listing, recents list or examples list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Base name shown in the list
    pub name: String,
    /// Logical `/`-separated path
    pub path: String,
    /// Item kind
    pub kind: FileEntryKind,
    /// Containing location (recents), shown under the name
    pub location: Option<String>,
    /// Free-form description (examples), shown when there is no location
    pub description: Option<String>,
}

impl DirectoryEntry {
    /// Creates an entry of the given kind.
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: FileEntryKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            location: None,
            description: None,
        }
    }

    /// Convenience constructor for a file entry.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, FileEntryKind::File)
    }

    /// Convenience constructor for a folder entry.
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, FileEntryKind::Folder)
    }

    /// Sets the location shown under the name.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the description shown under the name.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Secondary label for flat lists: the location with separators drawn
    /// as chevrons, else the description, else empty.
    pub fn location_label(&self) -> String {
        if let Some(location) = &self.location {
            return crate::paths::normalise(location).replace('/', " \u{FE65} ");
        }
        self.description.clone().unwrap_or_default()
    }
}

/// Result of one directory query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Normalized logical path of the directory
    pub path: String,
    /// Host-native path, only used as the native dialog default location
    pub os_path: String,
    /// Kind of the browsed item, when known
    pub kind: Option<FileEntryKind>,
    /// Directory contents, in host order
    pub entries: Vec<DirectoryEntry>,
    /// Host-reported problem with this directory (shown instead of entries)
    pub error_message: Option<String>,
}

/// Where a browse request should go.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BrowseTarget {
    /// The host's default starting location
    Default,
    /// The host's enumerated roots (drive list)
    Root,
    /// A logical path
    Path(String),
}

impl BrowseTarget {
    /// Token sent to the host for [`BrowseTarget::Root`].
    pub const ROOT_TOKEN: &'static str = "{{Root}}";

    /// Builds a target from a path string: empty means the default
    /// location, the root token means the root listing.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            BrowseTarget::Default
        } else if path == Self::ROOT_TOKEN {
            BrowseTarget::Root
        } else {
            BrowseTarget::Path(path)
        }
    }

    /// String form understood by the host's `browse`.
    pub fn as_host_path(&self) -> &str {
        match self {
            BrowseTarget::Default => "",
            BrowseTarget::Root => Self::ROOT_TOKEN,
            BrowseTarget::Path(p) => p,
        }
    }
}

/// A named set of file extensions (e.g. "CSV" -> ["csv", "txt"]).
///
/// Extensions are stored lower-case without a leading dot. The first one is
/// the group's default, appended to save names that lack an extension.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtensionGroup {
    /// Description shown in the file type selector
    pub description: String,
    /// Lower-case extensions without dot, in declaration order
    pub extensions: IndexSet<String>,
}

impl ExtensionGroup {
    /// Creates a group, normalizing extensions to lower-case without dots.
    pub fn new<I, S>(description: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            description: description.into(),
            extensions: extensions
                .into_iter()
                .map(|s| s.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// The extension appended by save-name normalization.
    pub fn default_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }

    /// Whether this group lists `ext` (no leading dot).
    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }
}

impl From<(&str, &[&str])> for ExtensionGroup {
    fn from(value: (&str, &[&str])) -> Self {
        Self::new(value.0, value.1.iter().copied())
    }
}

/// Error reported by the host collaborator.
#[derive(Error, Debug)]
pub enum HostError {
    /// I/O failure while opening, saving or listing
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Host-specific failure message
    #[error("{0}")]
    Message(String),
}

/// Errors returned by the backstage controller.
#[derive(Error, Debug)]
pub enum BackstageError {
    /// Save or export attempted without a destination; the user is sent to Save As
    #[error("no destination path")]
    NoPath,
    /// The host failed the request
    #[error("host error: {0}")]
    Host(#[from] HostError),
    /// `external_request_save` was called while the panel is open
    #[error("external save requested while the backstage is active")]
    Activated,
    /// An external save is already waiting for the user
    #[error("an external save request is already pending")]
    SavePending,
    /// The operation name is not registered
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    /// The place name is not part of the current operation
    #[error("unknown place: {0}")]
    UnknownPlace(String),
    /// A place was picked while no operation is current
    #[error("no current operation")]
    NoOperation,
    /// The user left the panel without completing the request
    #[error("cancelled")]
    Cancelled,
    /// Requested operation unsupported by the chosen backend
    #[error("unsupported operation for backend")]
    Unsupported,
}
