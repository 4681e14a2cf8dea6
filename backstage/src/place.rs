use crate::core::{BrowseTarget, DirectoryEntry, ExtensionGroup, FileEntryKind, Purpose};
use crate::filter::{ExtensionFilter, order_entries};
use crate::navigation::NavigationCursor;
use crate::paths;
use crate::selection::SelectionController;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Keys the browser list reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    /// Move the selection up
    Up,
    /// Move the selection down
    Down,
    /// Activate the selected row
    Enter,
}

/// Input event for a browser place, free of UI toolkit types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserEvent {
    /// Single click on a visible row.
    Click(usize),
    /// Double click on a visible row.
    DoubleClick(usize),
    /// Keyboard navigation in the list.
    Key(NavKey),
    /// The save name field gained focus.
    NameFocused,
    /// The file type selector gained focus.
    TypeSelectorFocused,
    /// The save name field changed.
    NameChanged(String),
    /// Enter pressed in the save name field.
    NameSubmitted,
    /// The file type selector changed.
    SetActiveGroup(Option<usize>),
    /// The save/export button was pressed.
    SaveClicked,
    /// The "up" button was pressed.
    Back,
    /// The "Browse" button was pressed (native dialog).
    Browse,
}

/// Side effect requested by a place after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserOutcome {
    /// Nothing to do beyond redrawing.
    None,
    /// Open the document at this path.
    Open(String),
    /// Browse into another directory.
    Navigate {
        /// Where to browse
        target: BrowseTarget,
        /// Kind of the entered item, when known
        kind: Option<FileEntryKind>,
    },
    /// Save the document to this path.
    Save(String),
    /// Export to this path.
    Export(String),
    /// Show the native dialog for this purpose.
    NativeBrowse {
        /// Purpose of the originating place
        purpose: Purpose,
        /// Typed save name (empty for open)
        filename: String,
    },
}

/// Message shown when a browser has no rows to show.
pub const EMPTY_HINT: &str = "No recognised data files were found.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ViewKey {
    listing_generation: u64,
    failed: bool,
}

/// Directory browser surface of one purpose (open, save or export).
///
/// The browser does not own a listing. It projects the shared
/// [`NavigationCursor`] through its extension filter into ordered rows.
#[derive(Clone, Debug)]
pub struct PlaceModel {
    purpose: Purpose,
    filter: ExtensionFilter,
    suggested_path: Option<String>,
    save_name: String,
    selection: SelectionController,
    rows: Vec<DirectoryEntry>,
    last_view_key: Option<ViewKey>,
}

impl PlaceModel {
    /// Creates a browser with its first extension group active.
    pub fn new(purpose: Purpose, groups: Vec<ExtensionGroup>) -> Self {
        Self {
            purpose,
            filter: ExtensionFilter::new(groups),
            suggested_path: None,
            save_name: String::new(),
            selection: SelectionController::default(),
            rows: Vec::new(),
            last_view_key: None,
        }
    }

    /// What this browser is used for.
    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// Extension groups and active group.
    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    /// Replaces the extension groups (export places swap them).
    pub fn set_extension_groups(&mut self, groups: Vec<ExtensionGroup>) {
        self.filter.set_groups(groups);
        self.last_view_key = None;
    }

    /// Activates a group from the file type selector.
    pub fn set_active_group(&mut self, index: Option<usize>) {
        if self.filter.set_active(index) {
            self.last_view_key = None;
        }
    }

    /// Path pre-filled for Save As.
    pub fn suggested_path(&self) -> Option<&str> {
        self.suggested_path.as_deref()
    }

    /// Pre-fills the save name with the path's stem and activates the
    /// group of its extension.
    pub fn set_suggested_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.save_name = paths::stem(&path).to_string();
        if let Some(index) = self.filter.resolve_group_index_for(paths::extname(&path)) {
            self.set_active_group(Some(index));
        }
        self.suggested_path = Some(path);
    }

    /// Text of the save name field.
    pub fn save_name(&self) -> &str {
        &self.save_name
    }

    /// Whether the save button is enabled.
    pub fn can_save(&self) -> bool {
        !self.save_name.trim().is_empty()
    }

    /// Selection state of the rows.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Updates the list geometry reported by the UI.
    pub fn set_viewport(&mut self, height: f32, row_height: f32) {
        self.selection.set_viewport(height, row_height);
    }

    /// Visible rows, containers first.
    pub fn rows(&self) -> &[DirectoryEntry] {
        &self.rows
    }

    /// Hint to show when there are no rows and no error.
    pub fn empty_hint(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(EMPTY_HINT)
    }

    /// Rebuilds rows when the cursor's listing or the filter changed.
    ///
    /// A failed browse shows no rows; the cursor's error message is shown
    /// instead.
    pub fn refresh(&mut self, cursor: &NavigationCursor) {
        let key = ViewKey {
            listing_generation: cursor.listing_generation(),
            failed: cursor.error_message().is_some(),
        };
        if self.last_view_key == Some(key) {
            return;
        }

        let mut rows: Vec<DirectoryEntry> = match cursor.listing() {
            Some(listing) if !key.failed => listing
                .entries
                .iter()
                .filter(|e| self.filter.is_visible(&e.name, e.kind))
                .cloned()
                .collect(),
            _ => Vec::new(),
        };
        order_entries(&mut rows);
        self.selection.reset(rows.len());
        self.rows = rows;
        self.last_view_key = Some(key);
        trace_rows_rebuilt(self.purpose, self.rows.len());
    }

    /// Applies one event and returns what the controller should do next.
    pub fn handle_event(
        &mut self,
        event: BrowserEvent,
        cursor: &NavigationCursor,
    ) -> BrowserOutcome {
        match event {
            BrowserEvent::Click(index) => self.click(index),
            BrowserEvent::DoubleClick(index) => self
                .rows
                .get(index)
                .map(|entry| self.activation_for(entry))
                .unwrap_or(BrowserOutcome::None),
            BrowserEvent::Key(NavKey::Up) => {
                self.selection.decrement();
                BrowserOutcome::None
            }
            BrowserEvent::Key(NavKey::Down) => {
                self.selection.increment();
                BrowserOutcome::None
            }
            BrowserEvent::Key(NavKey::Enter) => self
                .selection
                .selected()
                .and_then(|index| self.rows.get(index))
                .map(|entry| self.activation_for(entry))
                .unwrap_or(BrowserOutcome::None),
            BrowserEvent::NameFocused | BrowserEvent::TypeSelectorFocused => {
                self.selection.clear();
                BrowserOutcome::None
            }
            BrowserEvent::NameChanged(name) => {
                self.save_name = name;
                BrowserOutcome::None
            }
            BrowserEvent::SetActiveGroup(index) => {
                self.set_active_group(index);
                self.refresh(cursor);
                BrowserOutcome::None
            }
            BrowserEvent::NameSubmitted | BrowserEvent::SaveClicked => self.save_target(cursor),
            BrowserEvent::Back => match cursor.parent_target() {
                Some(target) => BrowserOutcome::Navigate {
                    target,
                    kind: Some(FileEntryKind::Folder),
                },
                None => BrowserOutcome::None,
            },
            BrowserEvent::Browse => BrowserOutcome::NativeBrowse {
                purpose: self.purpose,
                filename: if self.purpose.is_saving() {
                    self.save_name.trim().to_string()
                } else {
                    String::new()
                },
            },
        }
    }

    fn click(&mut self, index: usize) -> BrowserOutcome {
        let Some(entry) = self.rows.get(index) else {
            return BrowserOutcome::None;
        };
        if entry.kind.is_container() || self.purpose == Purpose::Open {
            return self.activation_for(entry);
        }
        self.save_name = entry.name.clone();
        self.selection.select(index);
        BrowserOutcome::None
    }

    /// What double click and Enter do with an entry.
    fn activation_for(&self, entry: &DirectoryEntry) -> BrowserOutcome {
        if entry.kind.is_container() {
            return BrowserOutcome::Navigate {
                target: BrowseTarget::from_path(entry.path.clone()),
                kind: Some(entry.kind),
            };
        }
        match self.purpose {
            Purpose::Open => BrowserOutcome::Open(entry.path.clone()),
            Purpose::Save => BrowserOutcome::Save(entry.path.clone()),
            Purpose::Export => BrowserOutcome::Export(entry.path.clone()),
        }
    }

    fn save_target(&self, cursor: &NavigationCursor) -> BrowserOutcome {
        let Some(dir) = cursor.path() else {
            return BrowserOutcome::None;
        };
        let name = self.save_name.trim();
        if name.is_empty() {
            return BrowserOutcome::None;
        }
        let path = paths::join(dir, &self.filter.normalize_for_save(name));
        match self.purpose {
            Purpose::Save => BrowserOutcome::Save(path),
            Purpose::Export => BrowserOutcome::Export(path),
            Purpose::Open => BrowserOutcome::None,
        }
    }
}

/// Which settings list feeds an [`EntryList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Recently opened documents
    Recents,
    /// Bundled example documents
    Examples,
}

/// Flat list place (recents, examples). Clicking an entry opens it.
#[derive(Clone, Debug)]
pub struct EntryList {
    kind: ListKind,
    items: Vec<DirectoryEntry>,
}

impl EntryList {
    /// Creates an empty list.
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Which list this is.
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Items in settings order.
    pub fn items(&self) -> &[DirectoryEntry] {
        &self.items
    }

    /// Replaces the items.
    pub fn set_items(&mut self, items: Vec<DirectoryEntry>) {
        self.items = items;
    }

    /// Outcome of clicking an item.
    pub fn click(&self, index: usize) -> BrowserOutcome {
        self.items
            .get(index)
            .map(|item| BrowserOutcome::Open(item.path.clone()))
            .unwrap_or(BrowserOutcome::None)
    }
}

#[cfg(feature = "tracing")]
fn trace_rows_rebuilt(purpose: Purpose, rows: usize) {
    trace!(
        event = "place.rows_rebuilt",
        purpose = purpose.as_str(),
        rows,
        "place rows rebuilt"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_rows_rebuilt(_purpose: Purpose, _rows: usize) {}
