use crate::core::{BrowseTarget, DirectoryListing, FileEntryKind, HostError};
use crate::host::BrowseResponse;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Immutable browse request descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseRequest {
    /// Monotonic browse generation.
    pub generation: u64,
    /// Where the host is asked to browse.
    pub target: BrowseTarget,
    /// Kind of the item being entered, when the caller knows it.
    pub kind: Option<FileEntryKind>,
}

/// Current browse status of the cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BrowseStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Browsing {
        /// Active generation id.
        generation: u64,
    },
    /// The latest request produced a listing.
    Ready {
        /// Applied generation id.
        generation: u64,
    },
    /// The latest request failed.
    Failed {
        /// Failed generation id.
        generation: u64,
        /// Error message captured from the host.
        message: String,
    },
}

/// What [`NavigationCursor::apply`] did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseOutcome {
    /// The listing replaced the previous one.
    Applied,
    /// The host failed; the error is shown in place of entries.
    Failed,
    /// A newer request was issued meanwhile; the result was dropped.
    Stale,
}

/// The directory currently browsed and its listing.
///
/// One cursor is shared by the open, save and export browsers. Requests are
/// tagged with a generation and only the most recently issued one may
/// apply.
#[derive(Clone, Debug, Default)]
pub struct NavigationCursor {
    generation: u64,
    status: BrowseStatus,
    listing: Option<DirectoryListing>,
    listing_generation: u64,
    error: Option<String>,
    has_directory: bool,
}

impl NavigationCursor {
    /// Creates a cursor with no directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new request, superseding any in flight.
    pub fn begin(&mut self, target: BrowseTarget, kind: Option<FileEntryKind>) -> BrowseRequest {
        let generation = self.generation.saturating_add(1);
        self.generation = generation;
        self.status = BrowseStatus::Browsing { generation };
        let request = BrowseRequest {
            generation,
            target,
            kind,
        };
        trace_browse_requested(&request);
        request
    }

    /// Applies the host's answer to `request`.
    pub fn apply(
        &mut self,
        request: &BrowseRequest,
        result: Result<BrowseResponse, HostError>,
    ) -> BrowseOutcome {
        if request.generation != self.generation {
            trace_browse_dropped_stale(request.generation, self.generation);
            return BrowseOutcome::Stale;
        }

        match result {
            Ok(response) => {
                let listing = DirectoryListing {
                    path: crate::paths::normalise(&response.path),
                    os_path: response.os_path,
                    kind: request.kind.or(response.kind),
                    entries: response.contents,
                    error_message: response.error_message,
                };
                trace_browse_applied(request.generation, &listing);
                self.error = None;
                self.listing = Some(listing);
                self.listing_generation = request.generation;
                self.has_directory = true;
                self.status = BrowseStatus::Ready {
                    generation: request.generation,
                };
                BrowseOutcome::Applied
            }
            Err(err) => {
                let message = err.to_string();
                trace_browse_failed(request.generation, &message);
                self.error = Some(message.clone());
                self.status = BrowseStatus::Failed {
                    generation: request.generation,
                    message,
                };
                BrowseOutcome::Failed
            }
        }
    }

    /// Latest issued generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation of the request that produced the current listing.
    pub fn listing_generation(&self) -> u64 {
        self.listing_generation
    }

    /// Current status.
    pub fn status(&self) -> &BrowseStatus {
        &self.status
    }

    /// Whether any browse has succeeded yet.
    pub fn has_directory(&self) -> bool {
        self.has_directory
    }

    /// The current listing, if a browse has succeeded.
    pub fn listing(&self) -> Option<&DirectoryListing> {
        self.listing.as_ref()
    }

    /// Logical path of the current directory.
    pub fn path(&self) -> Option<&str> {
        self.listing.as_ref().map(|l| l.path.as_str())
    }

    /// Host-native path of the current directory.
    pub fn os_path(&self) -> Option<&str> {
        self.listing.as_ref().map(|l| l.os_path.as_str())
    }

    /// Message to show instead of entries: the last browse failure, else
    /// the problem reported with the listing.
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.listing.as_ref()?.error_message.as_deref())
    }

    /// Target for the "up" button: the parent of the current directory.
    pub fn parent_target(&self) -> Option<BrowseTarget> {
        self.path().map(parent_of)
    }
}

/// Parent of a logical path.
///
/// A trailing separator is stripped first. When no separator remains, or
/// the parent would be empty, the root listing is returned.
pub fn parent_of(path: &str) -> BrowseTarget {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(i) if i > 0 => BrowseTarget::Path(trimmed[..i].to_string()),
        _ => BrowseTarget::Root,
    }
}

#[cfg(feature = "tracing")]
fn trace_browse_requested(request: &BrowseRequest) {
    trace!(
        event = "browse.requested",
        generation = request.generation,
        dir = request.target.as_host_path(),
        "browse requested"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_browse_requested(_request: &BrowseRequest) {}

#[cfg(feature = "tracing")]
fn trace_browse_applied(generation: u64, listing: &DirectoryListing) {
    trace!(
        event = "browse.applied",
        generation,
        path = %listing.path,
        entries = listing.entries.len(),
        "browse applied"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_browse_applied(_generation: u64, _listing: &DirectoryListing) {}

#[cfg(feature = "tracing")]
fn trace_browse_failed(generation: u64, message: &str) {
    tracing::debug!(
        event = "browse.failed",
        generation,
        error = message,
        "browse failed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_browse_failed(_generation: u64, _message: &str) {}

#[cfg(feature = "tracing")]
fn trace_browse_dropped_stale(generation: u64, current_generation: u64) {
    trace!(
        event = "browse.dropped_stale",
        generation, current_generation, "browse dropped stale result"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_browse_dropped_stale(_generation: u64, _current_generation: u64) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DirectoryEntry;

    fn response(path: &str, names: &[&str]) -> BrowseResponse {
        BrowseResponse {
            path: path.to_string(),
            os_path: path.to_string(),
            kind: None,
            contents: names
                .iter()
                .map(|n| DirectoryEntry::file(*n, format!("{path}/{n}")))
                .collect(),
            error_message: None,
        }
    }

    #[test]
    fn parent_strips_trailing_separator_first() {
        assert_eq!(parent_of("/a/b/"), BrowseTarget::Path("/a".into()));
        assert_eq!(parent_of("/a/b"), BrowseTarget::Path("/a".into()));
        assert_eq!(parent_of("C:/Users/me"), BrowseTarget::Path("C:/Users".into()));
    }

    #[test]
    fn parent_of_top_level_is_root() {
        assert_eq!(parent_of("/a"), BrowseTarget::Root);
        assert_eq!(parent_of("/a/"), BrowseTarget::Root);
        assert_eq!(parent_of("C:"), BrowseTarget::Root);
        assert_eq!(parent_of("C:/"), BrowseTarget::Root);
        assert_eq!(parent_of("/"), BrowseTarget::Root);
        assert_eq!(parent_of(""), BrowseTarget::Root);
    }

    #[test]
    fn apply_replaces_listing_and_marks_directory() {
        let mut cursor = NavigationCursor::new();
        assert!(!cursor.has_directory());

        let req = cursor.begin(BrowseTarget::Default, None);
        assert_eq!(cursor.status(), &BrowseStatus::Browsing { generation: 1 });
        let outcome = cursor.apply(&req, Ok(response("C:\\data", &["a.csv"])));

        assert_eq!(outcome, BrowseOutcome::Applied);
        assert!(cursor.has_directory());
        assert_eq!(cursor.path(), Some("C:/data"));
        assert_eq!(cursor.os_path(), Some("C:\\data"));
        assert_eq!(cursor.listing().unwrap().entries.len(), 1);
        assert_eq!(cursor.status(), &BrowseStatus::Ready { generation: 1 });
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut cursor = NavigationCursor::new();
        let first = cursor.begin(BrowseTarget::Path("/slow".into()), None);
        let second = cursor.begin(BrowseTarget::Path("/fast".into()), None);

        assert_eq!(
            cursor.apply(&second, Ok(response("/fast", &["f.csv"]))),
            BrowseOutcome::Applied
        );
        assert_eq!(
            cursor.apply(&first, Ok(response("/slow", &["s.csv"]))),
            BrowseOutcome::Stale
        );
        assert_eq!(cursor.path(), Some("/fast"));
        assert_eq!(cursor.status(), &BrowseStatus::Ready { generation: 2 });
    }

    #[test]
    fn failure_keeps_has_directory_and_sets_error() {
        let mut cursor = NavigationCursor::new();
        let req = cursor.begin(BrowseTarget::Default, None);
        let outcome = cursor.apply(&req, Err(HostError::Message("denied".into())));

        assert_eq!(outcome, BrowseOutcome::Failed);
        assert!(!cursor.has_directory());
        assert_eq!(cursor.error_message(), Some("denied"));

        let req = cursor.begin(BrowseTarget::Path("/ok".into()), Some(FileEntryKind::Folder));
        cursor.apply(&req, Ok(response("/ok", &[])));
        assert_eq!(cursor.error_message(), None);
        assert_eq!(cursor.listing().unwrap().kind, Some(FileEntryKind::Folder));

        let req = cursor.begin(BrowseTarget::Path("/gone".into()), None);
        cursor.apply(&req, Err(HostError::Message("missing".into())));
        assert!(cursor.has_directory());
        assert_eq!(cursor.path(), Some("/ok"));
        assert_eq!(cursor.error_message(), Some("missing"));
    }
}
