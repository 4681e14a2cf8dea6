//! OS-native file dialogs.
//!
//! The controller only needs "pick a file to open" and "pick a destination".
//! [`NoNativeDialog`] reports [`BackstageError::Unsupported`], which makes
//! the controller emit [`BackstageEvent::BrowseInvoked`](crate::BackstageEvent)
//! so a web host can show its own picker.
//!
//! With the `native-rfd` feature, [`RfdDialog`] uses `rfd::AsyncFileDialog`:
//! - Each extension group becomes one `add_filter` entry.
//! - The current directory's host-native path becomes the start directory.

use crate::core::{BackstageError, ExtensionGroup};

/// Native picker backend.
///
/// Returned paths are host-native; `Ok(None)` means the user cancelled.
#[allow(async_fn_in_trait)]
pub trait NativeDialog {
    /// Picks an existing file.
    async fn pick_open(
        &self,
        filters: &[ExtensionGroup],
        directory: Option<&str>,
    ) -> Result<Option<String>, BackstageError>;

    /// Picks a destination file.
    async fn pick_save(
        &self,
        filters: &[ExtensionGroup],
        directory: Option<&str>,
        file_name: &str,
    ) -> Result<Option<String>, BackstageError>;
}

/// Backend for hosts without native dialogs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNativeDialog;

impl NativeDialog for NoNativeDialog {
    async fn pick_open(
        &self,
        _filters: &[ExtensionGroup],
        _directory: Option<&str>,
    ) -> Result<Option<String>, BackstageError> {
        Err(BackstageError::Unsupported)
    }

    async fn pick_save(
        &self,
        _filters: &[ExtensionGroup],
        _directory: Option<&str>,
        _file_name: &str,
    ) -> Result<Option<String>, BackstageError> {
        Err(BackstageError::Unsupported)
    }
}

/// `rfd`-backed native dialogs.
#[cfg(feature = "native-rfd")]
#[derive(Clone, Copy, Debug, Default)]
pub struct RfdDialog;

#[cfg(feature = "native-rfd")]
impl RfdDialog {
    fn dialog(filters: &[ExtensionGroup], directory: Option<&str>) -> rfd::AsyncFileDialog {
        let mut d = rfd::AsyncFileDialog::new();
        for group in filters {
            let exts: Vec<&str> = group
                .extensions
                .iter()
                .map(String::as_str)
                .filter(|e| is_plain_extension(e))
                .collect();
            if !exts.is_empty() {
                d = d.add_filter(&group.description, &exts);
            }
        }
        if let Some(dir) = directory.filter(|d| !d.is_empty()) {
            d = d.set_directory(dir);
        }
        d
    }
}

#[cfg(feature = "native-rfd")]
impl NativeDialog for RfdDialog {
    async fn pick_open(
        &self,
        filters: &[ExtensionGroup],
        directory: Option<&str>,
    ) -> Result<Option<String>, BackstageError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(?directory, "rfd async open");
        let picked = Self::dialog(filters, directory).pick_file().await;
        Ok(picked.map(|h| h.path().to_string_lossy().to_string()))
    }

    async fn pick_save(
        &self,
        filters: &[ExtensionGroup],
        directory: Option<&str>,
        file_name: &str,
    ) -> Result<Option<String>, BackstageError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(?directory, file_name, "rfd async save");
        let mut d = Self::dialog(filters, directory);
        if !file_name.is_empty() {
            d = d.set_file_name(file_name);
        }
        let picked = d.save_file().await;
        Ok(picked.map(|h| h.path().to_string_lossy().to_string()))
    }
}

/// Wildcards and regex-style tokens cannot be expressed as native filters.
#[cfg(feature = "native-rfd")]
fn is_plain_extension(token: &str) -> bool {
    let t = token.trim();
    !t.is_empty() && !t.contains('*') && !t.contains('?') && !t.starts_with("((")
}
