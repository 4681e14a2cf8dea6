use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::config::BackstageConfig;
use crate::core::{BackstageError, BrowseTarget, FileEntryKind, Purpose};
use crate::host::{Host, SaveOptions, SettingsChange};
use crate::native::{NativeDialog, NoNativeDialog};
use crate::navigation::{BrowseOutcome, NavigationCursor};
use crate::paths;
use crate::place::{BrowserEvent, BrowserOutcome, EntryList, ListKind, PlaceModel};
use crate::registry::{Action, Operation, OperationRegistry, Place, PlaceView};

/// Observable state of the panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackstageState {
    /// Whether the panel is shown
    pub activated: bool,
    /// Current operation name, empty when none
    pub operation: String,
    /// Current place name within the operation, empty when none
    pub place: String,
    /// Place the user last picked, preferred when an operation is re-entered
    pub last_selected_place: String,
}

/// Change notification, queued in order and drained by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackstageEvent {
    /// The panel was shown or hidden.
    ActivatedChanged(bool),
    /// The current operation changed (empty when cleared).
    OperationChanged(String),
    /// The current place changed (empty when cleared).
    PlaceChanged(String),
    /// A browse succeeded.
    DirectoryChanged {
        /// Logical path of the new directory
        path: String,
    },
    /// A save or export started or finished.
    SavingChanged(bool),
    /// The document was saved.
    Saved,
    /// A native dialog was requested but is unavailable; the UI should
    /// show its own picker.
    BrowseInvoked(Purpose),
}

/// Arguments of [`Backstage::request_save`].
///
/// Converts from the accepted call shapes: `()`, `overwrite`, `path` and
/// `(path, overwrite)`. An empty path counts as no path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveArgs {
    /// Destination, `None` when the user must pick one
    pub path: Option<String>,
    /// Replace an existing file without asking
    pub overwrite: bool,
}

impl SaveArgs {
    fn new(path: Option<String>, overwrite: bool) -> Self {
        Self {
            path: path.filter(|p| !p.is_empty()),
            overwrite,
        }
    }
}

impl From<()> for SaveArgs {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<bool> for SaveArgs {
    fn from(overwrite: bool) -> Self {
        Self::new(None, overwrite)
    }
}

impl From<&str> for SaveArgs {
    fn from(path: &str) -> Self {
        Self::new(Some(path.to_string()), false)
    }
}

impl From<String> for SaveArgs {
    fn from(path: String) -> Self {
        Self::new(Some(path), false)
    }
}

impl From<Option<String>> for SaveArgs {
    fn from(path: Option<String>) -> Self {
        Self::new(path, false)
    }
}

impl From<(&str, bool)> for SaveArgs {
    fn from((path, overwrite): (&str, bool)) -> Self {
        Self::new(Some(path.to_string()), overwrite)
    }
}

impl From<(String, bool)> for SaveArgs {
    fn from((path, overwrite): (String, bool)) -> Self {
        Self::new(Some(path), overwrite)
    }
}

impl From<(Option<String>, bool)> for SaveArgs {
    fn from((path, overwrite): (Option<String>, bool)) -> Self {
        Self::new(path, overwrite)
    }
}

type SaveResult = Result<(), BackstageError>;

/// Completion of [`Backstage::external_request_save`].
///
/// Resolves when the document is saved from the panel, fails with
/// [`BackstageError::Cancelled`] when the panel closes first (or the
/// controller is dropped).
#[must_use = "a deferred save does nothing unless awaited or polled"]
#[derive(Debug)]
pub struct DeferredSave {
    state: DeferredState,
}

#[derive(Debug)]
enum DeferredState {
    Settled(Option<SaveResult>),
    Waiting(oneshot::Receiver<SaveResult>),
}

impl DeferredSave {
    fn settled(result: SaveResult) -> Self {
        Self {
            state: DeferredState::Settled(Some(result)),
        }
    }

    /// Takes the outcome without blocking, if it is known.
    pub fn try_take(&mut self) -> Option<SaveResult> {
        match &mut self.state {
            DeferredState::Settled(result) => result.take(),
            DeferredState::Waiting(rx) => match rx.try_recv() {
                Ok(Some(result)) => Some(result),
                Ok(None) => None,
                Err(_) => Some(Err(BackstageError::Cancelled)),
            },
        }
    }
}

impl Future for DeferredSave {
    type Output = SaveResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            DeferredState::Settled(result) => {
                Poll::Ready(result.take().unwrap_or(Err(BackstageError::Cancelled)))
            }
            DeferredState::Waiting(rx) => rx
                .poll_unpin(cx)
                .map(|r| r.unwrap_or(Err(BackstageError::Cancelled))),
        }
    }
}

#[derive(Debug)]
struct PendingSave {
    sender: oneshot::Sender<SaveResult>,
    /// Rejected on the next deactivation once the first attempt failed.
    armed: bool,
}

/// The backstage controller.
///
/// Owns the panel state, the shared [`NavigationCursor`], one browser per
/// [`Purpose`] and the recents/examples lists, and drives the host through
/// open/save/export requests. All methods take `&mut self`, so requests
/// cannot overlap.
pub struct Backstage<H: Host, D: NativeDialog = NoNativeDialog> {
    host: H,
    native: D,
    config: BackstageConfig,
    registry: OperationRegistry,
    state: BackstageState,
    cursor: NavigationCursor,
    open_browser: PlaceModel,
    save_browser: PlaceModel,
    export_browser: PlaceModel,
    recents: EntryList,
    examples: EntryList,
    saving: bool,
    pending_save: Option<PendingSave>,
    events: Vec<BackstageEvent>,
}

impl<H: Host> Backstage<H> {
    /// Creates an inactive controller with the standard operation table.
    pub fn new(host: H, config: BackstageConfig) -> Self {
        let registry = OperationRegistry::standard(&config);
        Self {
            host,
            native: NoNativeDialog,
            open_browser: PlaceModel::new(Purpose::Open, config.open_groups.clone()),
            save_browser: PlaceModel::new(Purpose::Save, config.save_groups()),
            export_browser: PlaceModel::new(Purpose::Export, config.data_export_groups.clone()),
            config,
            registry,
            state: BackstageState::default(),
            cursor: NavigationCursor::new(),
            recents: EntryList::new(ListKind::Recents),
            examples: EntryList::new(ListKind::Examples),
            saving: false,
            pending_save: None,
            events: Vec::new(),
        }
    }
}

impl<H: Host, D: NativeDialog> Backstage<H, D> {
    /// Replaces the native dialog backend.
    pub fn with_native_dialog<E: NativeDialog>(self, native: E) -> Backstage<H, E> {
        Backstage {
            host: self.host,
            native,
            config: self.config,
            registry: self.registry,
            state: self.state,
            cursor: self.cursor,
            open_browser: self.open_browser,
            save_browser: self.save_browser,
            export_browser: self.export_browser,
            recents: self.recents,
            examples: self.examples,
            saving: self.saving,
            pending_save: self.pending_save,
            events: self.events,
        }
    }

    /// Replaces the operation table.
    pub fn with_registry(mut self, registry: OperationRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The host document.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Static configuration.
    pub fn config(&self) -> &BackstageConfig {
        &self.config
    }

    /// Operation table.
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Panel state.
    pub fn state(&self) -> &BackstageState {
        &self.state
    }

    /// Whether the panel is shown.
    pub fn is_activated(&self) -> bool {
        self.state.activated
    }

    /// Current operation name (empty when none).
    pub fn operation(&self) -> &str {
        &self.state.operation
    }

    /// Current place name (empty when none).
    pub fn place(&self) -> &str {
        &self.state.place
    }

    /// The current operation.
    pub fn current_operation(&self) -> Option<&Operation> {
        self.registry.get(&self.state.operation)
    }

    /// The current place, if it belongs to the current operation.
    pub fn current_place(&self) -> Option<&Place> {
        self.current_operation()?.place(&self.state.place)
    }

    /// Whether a save or export is in progress.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether any browse has succeeded yet.
    pub fn has_directory(&self) -> bool {
        self.cursor.has_directory()
    }

    /// The shared navigation cursor.
    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    /// Browser of a purpose.
    pub fn browser(&self, purpose: Purpose) -> &PlaceModel {
        match purpose {
            Purpose::Open => &self.open_browser,
            Purpose::Save => &self.save_browser,
            Purpose::Export => &self.export_browser,
        }
    }

    /// Mutable browser of a purpose (viewport geometry, groups).
    pub fn browser_mut(&mut self, purpose: Purpose) -> &mut PlaceModel {
        match purpose {
            Purpose::Open => &mut self.open_browser,
            Purpose::Save => &mut self.save_browser,
            Purpose::Export => &mut self.export_browser,
        }
    }

    /// Flat list of a kind.
    pub fn list(&self, kind: ListKind) -> &EntryList {
        match kind {
            ListKind::Recents => &self.recents,
            ListKind::Examples => &self.examples,
        }
    }

    /// Whether an external save is waiting for the user.
    pub fn has_pending_save(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Takes the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<BackstageEvent> {
        std::mem::take(&mut self.events)
    }

    /// Shows the panel.
    pub fn activate(&mut self) {
        if self.state.activated {
            return;
        }
        self.state.activated = true;
        trace_activated(true);
        self.events.push(BackstageEvent::ActivatedChanged(true));
    }

    /// Hides the panel, clears the operation and place, and rejects an
    /// external save left waiting by a failed attempt.
    pub fn deactivate(&mut self) {
        if self.state.activated {
            self.state.activated = false;
            trace_activated(false);
            self.events.push(BackstageEvent::ActivatedChanged(false));
            if let Some(pending) = self.pending_save.take_if(|p| p.armed) {
                let _ = pending.sender.send(Err(BackstageError::Cancelled));
            }
        }
        if !self.state.operation.is_empty() {
            self.state.operation.clear();
            self.events.push(BackstageEvent::OperationChanged(String::new()));
        }
        if !self.state.place.is_empty() {
            self.state.place.clear();
            self.events.push(BackstageEvent::PlaceChanged(String::new()));
        }
    }

    /// Switches to an operation, runs its action and selects a place.
    ///
    /// Selecting the current operation again does nothing. The place is
    /// chosen after the action settled: the last picked place if the
    /// operation has it, else the current place, else the first one.
    pub async fn set_operation(&mut self, name: &str) -> Result<(), BackstageError> {
        let Some(op) = self.registry.get(name) else {
            return Err(BackstageError::UnknownOperation(name.to_string()));
        };
        if self.state.operation == name {
            return Ok(());
        }
        let action = op.action.clone();

        self.state.operation = name.to_string();
        trace_operation_changed(name);
        self.events
            .push(BackstageEvent::OperationChanged(name.to_string()));

        if let Some(action) = action {
            if let Err(err) = self.run_action(action).await {
                warn_action_failed(name, &err);
            }
        }

        // The action may have moved on (Save falling into Save As, New
        // closing the panel).
        if self.state.operation != name {
            return Ok(());
        }
        let Some(op) = self.registry.get(name) else {
            return Ok(());
        };
        let Some(first) = op.places.first() else {
            if !self.state.place.is_empty() {
                self.state.place.clear();
                self.events.push(BackstageEvent::PlaceChanged(String::new()));
            }
            return Ok(());
        };
        let place = [&self.state.last_selected_place, &self.state.place]
            .into_iter()
            .find(|n| op.has_place(n))
            .unwrap_or(&first.name)
            .clone();

        self.state.place = place.clone();
        trace_place_changed(name, &place);
        self.events.push(BackstageEvent::PlaceChanged(place.clone()));
        self.activate_place(&place).await
    }

    /// User pick of a place within the current operation.
    ///
    /// Places with a surface become current and are remembered; action-only
    /// places just run their action.
    pub async fn set_place(&mut self, name: &str) -> Result<(), BackstageError> {
        let op = self
            .current_operation()
            .ok_or(BackstageError::NoOperation)?;
        let place = op
            .place(name)
            .ok_or_else(|| BackstageError::UnknownPlace(name.to_string()))?;

        if place.view.is_none() {
            if let Some(action) = place.action.clone() {
                self.run_action(action).await?;
            }
            return Ok(());
        }

        self.state.last_selected_place = name.to_string();
        if self.state.place != name {
            self.state.place = name.to_string();
            trace_place_changed(&self.state.operation, name);
            self.events.push(BackstageEvent::PlaceChanged(name.to_string()));
        }
        self.activate_place(name).await
    }

    async fn activate_place(&mut self, name: &str) -> Result<(), BackstageError> {
        let Some(place) = self.current_operation().and_then(|op| op.place(name)) else {
            return Ok(());
        };
        let view = place.view;
        let action = place.action.clone();

        if let Some(action) = action {
            self.run_action(action).await?;
        }
        if let Some(PlaceView::Browser(purpose)) = view {
            if !self.cursor.has_directory() {
                self.set_current_directory(BrowseTarget::Default, None).await;
            } else {
                self.refresh_browser(purpose);
            }
        }
        Ok(())
    }

    /// Browses the host to `target` and rebuilds every browser.
    ///
    /// Host failures are shown by the browsers in place of entries.
    pub async fn set_current_directory(
        &mut self,
        target: BrowseTarget,
        kind: Option<FileEntryKind>,
    ) -> BrowseOutcome {
        let request = self.cursor.begin(target, kind);
        let result = self.host.browse(&request.target).await;
        let outcome = self.cursor.apply(&request, result);
        if outcome == BrowseOutcome::Applied {
            if let Some(path) = self.cursor.path() {
                self.events.push(BackstageEvent::DirectoryChanged {
                    path: path.to_string(),
                });
            }
        }
        if outcome != BrowseOutcome::Stale {
            self.refresh_browsers();
        }
        outcome
    }

    fn refresh_browsers(&mut self) {
        self.open_browser.refresh(&self.cursor);
        self.save_browser.refresh(&self.cursor);
        self.export_browser.refresh(&self.cursor);
    }

    fn refresh_browser(&mut self, purpose: Purpose) {
        let browser = match purpose {
            Purpose::Open => &mut self.open_browser,
            Purpose::Save => &mut self.save_browser,
            Purpose::Export => &mut self.export_browser,
        };
        browser.refresh(&self.cursor);
    }

    /// Opens a document (empty path: a blank one). The panel closes
    /// whatever the outcome.
    pub async fn request_open(&mut self, path: &str) -> Result<(), BackstageError> {
        trace_request("open", path);
        let result = self.host.open(path).await;
        self.deactivate();
        result.map_err(|err| {
            warn_request_failed("open", &err);
            BackstageError::from(err)
        })
    }

    /// Saves the document.
    ///
    /// Without a path the panel opens on Save As and [`BackstageError::NoPath`]
    /// is returned without contacting the host. A host failure also lands
    /// on Save As. Success closes the panel, emits [`BackstageEvent::Saved`]
    /// and resolves a waiting external save.
    pub async fn request_save(&mut self, args: impl Into<SaveArgs>) -> Result<(), BackstageError> {
        let SaveArgs { path, overwrite } = args.into();
        let Some(path) = path else {
            trace_request("save", "");
            self.show_operation(OperationRegistry::SAVE_AS).await;
            return Err(BackstageError::NoPath);
        };

        trace_request("save", &path);
        self.set_saving(true);
        let result = self
            .host
            .save(&path, SaveOptions { export: false }, overwrite)
            .await;
        self.set_saving(false);

        match result {
            Ok(()) => {
                if let Some(pending) = self.pending_save.take() {
                    let _ = pending.sender.send(Ok(()));
                }
                self.deactivate();
                self.events.push(BackstageEvent::Saved);
                Ok(())
            }
            Err(err) => {
                warn_request_failed("save", &err);
                self.show_operation(OperationRegistry::SAVE_AS).await;
                Err(err.into())
            }
        }
    }

    /// Exports data or results. On success the destination directory is
    /// browsed and the panel closes; on failure the panel shows Export.
    pub async fn request_export(
        &mut self,
        path: &str,
        overwrite: bool,
    ) -> Result<(), BackstageError> {
        trace_request("export", path);
        self.set_saving(true);
        let result = self
            .host
            .save(path, SaveOptions { export: true }, overwrite)
            .await;
        self.set_saving(false);

        match result {
            Ok(()) => {
                let dir = paths::dirname(&paths::normalise(path));
                self.set_current_directory(BrowseTarget::from_path(dir), None)
                    .await;
                self.deactivate();
                Ok(())
            }
            Err(err) => {
                warn_request_failed("export", &err);
                self.show_operation(OperationRegistry::EXPORT).await;
                Err(err.into())
            }
        }
    }

    /// Save requested from outside the panel (menu shortcut, close prompt).
    ///
    /// Fails with [`BackstageError::Activated`] while the panel is shown.
    /// A document with a path is saved in place and the returned future is
    /// already settled. Otherwise the future settles when the user saves
    /// from the panel, or fails with [`BackstageError::Cancelled`] when the
    /// panel closes first.
    pub async fn external_request_save(
        &mut self,
        args: impl Into<SaveArgs>,
    ) -> Result<DeferredSave, BackstageError> {
        if self.state.activated {
            error_external_save_while_active();
            return Err(BackstageError::Activated);
        }
        if let Some(path) = self.host.document().path.filter(|p| !p.is_empty()) {
            let result = self.request_save((path, true)).await;
            return Ok(DeferredSave::settled(result));
        }
        if self.pending_save.is_some() {
            return Err(BackstageError::SavePending);
        }

        let (sender, receiver) = oneshot::channel();
        self.pending_save = Some(PendingSave {
            sender,
            armed: false,
        });
        if self.request_save(args).await.is_err() {
            if let Some(pending) = self.pending_save.as_mut() {
                pending.armed = true;
            }
        }
        Ok(DeferredSave {
            state: DeferredState::Waiting(receiver),
        })
    }

    /// Where the document would be saved: its own path, else its import
    /// path with the native extension, else an untitled file in the
    /// documents location.
    pub fn determine_save_path(&self) -> String {
        let doc = self.host.document();
        let native = &self.config.native_extension;
        if let Some(path) = doc.path.filter(|p| !p.is_empty()) {
            return path;
        }
        if let Some(path) = doc.import_path.filter(|p| !p.is_empty()) {
            if paths::extname(&path).trim_start_matches('.') == native {
                return path;
            }
            let name = format!("{}.{native}", paths::stem(&path));
            return paths::join(&paths::dirname(&path), &name);
        }
        paths::join(
            &self.config.documents_location,
            &format!("{}.{native}", doc.title),
        )
    }

    /// Forwards a UI event to the browser of `purpose` and carries out what
    /// it asks for.
    pub async fn browser_event(
        &mut self,
        purpose: Purpose,
        event: BrowserEvent,
    ) -> Result<(), BackstageError> {
        let cursor = &self.cursor;
        let browser = match purpose {
            Purpose::Open => &mut self.open_browser,
            Purpose::Save => &mut self.save_browser,
            Purpose::Export => &mut self.export_browser,
        };
        let outcome = browser.handle_event(event, cursor);
        self.dispatch(outcome).await
    }

    /// Click on a recents or examples item.
    pub async fn list_event(&mut self, kind: ListKind, index: usize) -> Result<(), BackstageError> {
        let outcome = self.list(kind).click(index);
        self.dispatch(outcome).await
    }

    async fn dispatch(&mut self, outcome: BrowserOutcome) -> Result<(), BackstageError> {
        match outcome {
            BrowserOutcome::None => Ok(()),
            BrowserOutcome::Open(path) => self.request_open(&path).await,
            BrowserOutcome::Navigate { target, kind } => {
                self.set_current_directory(target, kind).await;
                Ok(())
            }
            BrowserOutcome::Save(path) => self.request_save(path).await,
            BrowserOutcome::Export(path) => self.request_export(&path, false).await,
            BrowserOutcome::NativeBrowse { purpose, filename } => {
                self.browse_natively(purpose, &filename).await
            }
        }
    }

    /// Shows the native dialog for `purpose`, filtered by that browser's
    /// extension groups and starting in the current directory.
    ///
    /// Picked paths are saved or exported with overwrite, since the native
    /// dialog already confirmed it. An unsupported backend queues
    /// [`BackstageEvent::BrowseInvoked`].
    pub async fn browse_natively(
        &mut self,
        purpose: Purpose,
        file_name: &str,
    ) -> Result<(), BackstageError> {
        let filters = self.browser(purpose).filter().groups().to_vec();
        let directory = self.cursor.os_path().map(str::to_string);
        let picked = match purpose {
            Purpose::Open => self.native.pick_open(&filters, directory.as_deref()).await,
            Purpose::Save | Purpose::Export => {
                self.native
                    .pick_save(&filters, directory.as_deref(), file_name)
                    .await
            }
        };

        let path = match picked {
            Ok(Some(path)) => paths::normalise(&path),
            Ok(None) => return Ok(()),
            Err(BackstageError::Unsupported) => {
                self.events.push(BackstageEvent::BrowseInvoked(purpose));
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        match purpose {
            Purpose::Open => self.request_open(&path).await,
            Purpose::Save => self.request_save((path, true)).await,
            Purpose::Export => self.request_export(&path, true).await,
        }
    }

    /// Applies a settings change to the recents and examples lists.
    pub fn apply_settings(&mut self, change: SettingsChange) {
        if let Some(recents) = change.recents {
            self.recents.set_items(recents);
        }
        if let Some(examples) = change.examples {
            self.examples.set_items(examples);
        }
    }

    /// Activates the panel on `operation`. Used by the failure paths.
    async fn show_operation(&mut self, operation: &str) {
        self.activate();
        if let Err(err) = self.set_operation(operation).await {
            warn_action_failed(operation, &err);
        }
    }

    fn set_saving(&mut self, saving: bool) {
        if self.saving != saving {
            self.saving = saving;
            self.events.push(BackstageEvent::SavingChanged(saving));
        }
    }

    /// Boxed so that actions may re-enter `set_operation`.
    fn run_action(&mut self, action: Action) -> LocalBoxFuture<'_, Result<(), BackstageError>> {
        async move {
            match action {
                Action::OpenBlank => self.request_open("").await,
                Action::BrowseToDocument => {
                    let path = self.determine_save_path();
                    let dir = paths::dirname(&path);
                    self.set_current_directory(BrowseTarget::from_path(dir), None)
                        .await;
                    Ok(())
                }
                Action::SaveDocument => {
                    let path = self.host.document().path;
                    self.request_save((path, true)).await
                }
                Action::PrepareSaveAs => {
                    let path = self.determine_save_path();
                    let dir = paths::dirname(&path);
                    self.set_current_directory(BrowseTarget::from_path(dir), None)
                        .await;
                    self.save_browser.set_suggested_path(path);
                    self.save_browser.refresh(&self.cursor);
                    Ok(())
                }
                Action::SetExtensionGroups(purpose, groups) => {
                    self.browser_mut(purpose).set_extension_groups(groups);
                    self.refresh_browser(purpose);
                    Ok(())
                }
            }
        }
        .boxed_local()
    }
}

#[cfg(feature = "tracing")]
fn trace_activated(activated: bool) {
    tracing::debug!(event = "backstage.activated", activated, "backstage visibility changed");
}

#[cfg(not(feature = "tracing"))]
fn trace_activated(_activated: bool) {}

#[cfg(feature = "tracing")]
fn trace_operation_changed(operation: &str) {
    tracing::debug!(event = "backstage.operation", operation, "operation changed");
}

#[cfg(not(feature = "tracing"))]
fn trace_operation_changed(_operation: &str) {}

#[cfg(feature = "tracing")]
fn trace_place_changed(operation: &str, place: &str) {
    tracing::debug!(event = "backstage.place", operation, place, "place changed");
}

#[cfg(not(feature = "tracing"))]
fn trace_place_changed(_operation: &str, _place: &str) {}

#[cfg(feature = "tracing")]
fn trace_request(kind: &'static str, path: &str) {
    tracing::trace!(event = "backstage.request", kind, path, "request started");
}

#[cfg(not(feature = "tracing"))]
fn trace_request(_kind: &'static str, _path: &str) {}

#[cfg(feature = "tracing")]
fn warn_request_failed(kind: &'static str, err: &dyn std::error::Error) {
    tracing::warn!(event = "backstage.request_failed", kind, error = %err, "request failed");
}

#[cfg(not(feature = "tracing"))]
fn warn_request_failed(_kind: &'static str, _err: &dyn std::error::Error) {}

#[cfg(feature = "tracing")]
fn warn_action_failed(operation: &str, err: &BackstageError) {
    tracing::warn!(event = "backstage.action_failed", operation, error = %err, "action failed");
}

#[cfg(not(feature = "tracing"))]
fn warn_action_failed(_operation: &str, _err: &BackstageError) {}

#[cfg(feature = "tracing")]
fn error_external_save_while_active() {
    tracing::error!(
        event = "backstage.external_save_rejected",
        "external save can only be requested while the backstage is hidden"
    );
}

#[cfg(not(feature = "tracing"))]
fn error_external_save_while_active() {}
