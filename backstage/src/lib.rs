#![deny(missing_docs)]
//! Navigation and request core for a document application's "backstage"
//! panel: the place where users open, save and export documents.
//!
//! The crate owns the state machine only. A host application renders the
//! panel with any UI toolkit, forwards user input as method calls or
//! [`BrowserEvent`]s, and drains [`BackstageEvent`]s to update its widgets.
//!
//! Pieces, leaves first:
//! - [`NavigationCursor`]: the browsed directory shared by every browser place
//! - [`SelectionController`]: single-row keyboard selection with scroll-into-view
//! - [`ExtensionFilter`]: visibility, save-name normalization, group lookup
//! - [`PlaceModel`] / [`EntryList`]: per-place projections
//! - [`OperationRegistry`]: the static New/Open/Save/Save As/Export table
//! - [`Backstage`]: the controller and the save/export/open request protocol
//!
//! The document itself is reached through the [`Host`] trait. Native OS
//! dialogs are optional (`native-rfd` feature, via `rfd`).

mod backstage;
mod config;
mod core;
mod filter;
mod fs;
mod host;
mod native;
mod navigation;
mod paths;
mod place;
mod registry;
mod selection;

pub use backstage::{Backstage, BackstageEvent, BackstageState, DeferredSave, SaveArgs};
pub use config::BackstageConfig;
pub use core::{
    BackstageError, BrowseTarget, DirectoryEntry, DirectoryListing, ExtensionGroup,
    FileEntryKind, HostError, Purpose,
};
pub use filter::{ExtensionFilter, order_entries};
pub use fs::{DirectorySource, StdDirectorySource};
pub use host::{BrowseResponse, DocumentInfo, Host, SaveOptions, SettingsChange};
#[cfg(feature = "native-rfd")]
pub use native::RfdDialog;
pub use native::{NativeDialog, NoNativeDialog};
pub use navigation::{BrowseOutcome, BrowseRequest, BrowseStatus, NavigationCursor, parent_of};
pub use place::{BrowserEvent, BrowserOutcome, EntryList, ListKind, NavKey, PlaceModel};
pub use registry::{Action, Operation, OperationRegistry, Place, PlaceView};
pub use selection::{ScrollViewport, SelectionController};
