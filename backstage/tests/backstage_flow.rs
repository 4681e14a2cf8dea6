use std::cell::{Cell, RefCell};

use backstage::{
    Backstage, BackstageConfig, BackstageError, BackstageEvent, BrowseResponse, BrowseTarget,
    BrowserEvent, DirectoryEntry, DocumentInfo, Host, HostError, ListKind, NativeDialog, Purpose,
    SaveOptions, SettingsChange,
};
use pollster::block_on;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SaveCall {
    path: String,
    export: bool,
    overwrite: bool,
}

/// Scripted host: records calls and fails on demand.
#[derive(Default)]
struct ScriptedHost {
    doc: RefCell<DocumentInfo>,
    fail_save: Cell<bool>,
    fail_open: Cell<bool>,
    saves: RefCell<Vec<SaveCall>>,
    opens: RefCell<Vec<String>>,
    browsed: RefCell<Vec<String>>,
}

impl ScriptedHost {
    fn untitled() -> Self {
        let host = Self::default();
        host.doc.borrow_mut().title = "Untitled".into();
        host
    }

    fn with_path(path: &str) -> Self {
        let host = Self::default();
        host.doc.borrow_mut().path = Some(path.into());
        host
    }
}

impl Host for ScriptedHost {
    async fn open(&self, path: &str) -> Result<(), HostError> {
        self.opens.borrow_mut().push(path.to_string());
        if self.fail_open.get() {
            return Err(HostError::Message("cannot open".into()));
        }
        Ok(())
    }

    async fn save(&self, path: &str, options: SaveOptions, overwrite: bool) -> Result<(), HostError> {
        self.saves.borrow_mut().push(SaveCall {
            path: path.to_string(),
            export: options.export,
            overwrite,
        });
        if self.fail_save.get() {
            return Err(HostError::Message("disk full".into()));
        }
        if !options.export {
            self.doc.borrow_mut().path = Some(path.to_string());
        }
        Ok(())
    }

    async fn browse(&self, target: &BrowseTarget) -> Result<BrowseResponse, HostError> {
        let path = match target {
            BrowseTarget::Default => "/home/user".to_string(),
            BrowseTarget::Root => BrowseTarget::ROOT_TOKEN.to_string(),
            BrowseTarget::Path(p) if p.starts_with("{{") => "/home/user/Documents".to_string(),
            BrowseTarget::Path(p) => p.clone(),
        };
        self.browsed.borrow_mut().push(path.clone());
        Ok(BrowseResponse {
            os_path: path.clone(),
            contents: vec![
                DirectoryEntry::file("results.pdf", format!("{path}/results.pdf")),
                DirectoryEntry::file("data.csv", format!("{path}/data.csv")),
                DirectoryEntry::folder("sub", format!("{path}/sub")),
            ],
            path,
            ..BrowseResponse::default()
        })
    }

    fn document(&self) -> DocumentInfo {
        self.doc.borrow().clone()
    }
}

fn backstage(host: ScriptedHost) -> Backstage<ScriptedHost> {
    Backstage::new(host, BackstageConfig::default())
}

fn count_saved(events: &[BackstageEvent]) -> usize {
    events
        .iter()
        .filter(|e| **e == BackstageEvent::Saved)
        .count()
}

#[test]
fn place_always_belongs_to_current_operation() {
    let mut b = backstage(ScriptedHost::untitled());
    b.activate();
    for op in ["open", "export", "saveAs", "open", "export"] {
        block_on(b.set_operation(op)).unwrap();
        let current = b.current_operation().unwrap();
        assert!(
            b.place().is_empty() || current.has_place(b.place()),
            "{op}: place {:?}",
            b.place()
        );
    }
}

#[test]
fn save_without_path_lands_on_save_as() {
    let mut b = backstage(ScriptedHost::untitled());
    let err = block_on(b.request_save(())).unwrap_err();

    assert!(matches!(err, BackstageError::NoPath));
    assert!(b.host().saves.borrow().is_empty());
    assert!(b.is_activated());
    assert_eq!(b.operation(), "saveAs");
    assert_eq!(b.place(), "thispc");
    // Save As suggests the untitled document in the documents folder.
    assert_eq!(b.browser(Purpose::Save).save_name(), "Untitled");
    assert_eq!(
        b.host().browsed.borrow().as_slice(),
        ["/home/user/Documents"]
    );
}

#[test]
fn overwrite_only_call_shape_has_no_path() {
    let mut b = backstage(ScriptedHost::untitled());
    let err = block_on(b.request_save(true)).unwrap_err();
    assert!(matches!(err, BackstageError::NoPath));
    assert!(b.host().saves.borrow().is_empty());
}

#[test]
fn successful_save_deactivates_and_emits_saved_once() {
    let mut b = backstage(ScriptedHost::untitled());
    b.activate();
    block_on(b.request_save(("/x/a.omv", true))).unwrap();

    assert!(!b.is_activated());
    assert!(!b.is_saving());
    assert_eq!(
        b.host().saves.borrow().as_slice(),
        [SaveCall {
            path: "/x/a.omv".into(),
            export: false,
            overwrite: true,
        }]
    );
    let events = b.drain_events();
    assert_eq!(count_saved(&events), 1);
    let busy: Vec<&BackstageEvent> = events
        .iter()
        .filter(|e| matches!(e, BackstageEvent::SavingChanged(_)))
        .collect();
    assert_eq!(
        busy,
        [
            &BackstageEvent::SavingChanged(true),
            &BackstageEvent::SavingChanged(false)
        ]
    );
}

#[test]
fn failed_save_reopens_save_as() {
    let host = ScriptedHost::untitled();
    host.fail_save.set(true);
    let mut b = backstage(host);

    let err = block_on(b.request_save(("/x/a.omv", true))).unwrap_err();
    assert!(matches!(err, BackstageError::Host(_)));
    assert!(b.is_activated());
    assert_eq!(b.operation(), "saveAs");
    assert!(!b.is_saving());
    assert_eq!(count_saved(&b.drain_events()), 0);
}

#[test]
fn external_save_while_active_has_no_side_effects() {
    let mut b = backstage(ScriptedHost::with_path("/x/doc.omv"));
    b.activate();
    block_on(b.set_operation("open")).unwrap();
    b.drain_events();

    let err = block_on(b.external_request_save(())).unwrap_err();
    assert!(matches!(err, BackstageError::Activated));
    assert!(b.drain_events().is_empty());
    assert!(b.host().saves.borrow().is_empty());
    assert_eq!(b.operation(), "open");
}

#[test]
fn external_save_with_document_path_settles_immediately() {
    let mut b = backstage(ScriptedHost::with_path("/x/doc.omv"));
    let deferred = block_on(b.external_request_save(())).unwrap();
    block_on(deferred).unwrap();

    assert_eq!(
        b.host().saves.borrow().as_slice(),
        [SaveCall {
            path: "/x/doc.omv".into(),
            export: false,
            overwrite: true,
        }]
    );
    assert!(!b.has_pending_save());
}

#[test]
fn external_save_resolves_after_user_saves_from_panel() {
    let mut b = backstage(ScriptedHost::untitled());
    let mut deferred = block_on(b.external_request_save(())).unwrap();

    assert!(b.is_activated());
    assert_eq!(b.operation(), "saveAs");
    assert!(deferred.try_take().is_none());
    assert!(b.has_pending_save());

    block_on(b.browser_event(Purpose::Save, BrowserEvent::NameChanged("report".into()))).unwrap();
    block_on(b.browser_event(Purpose::Save, BrowserEvent::SaveClicked)).unwrap();

    assert_eq!(
        b.host().saves.borrow().last().map(|c| c.path.clone()),
        Some("/home/user/Documents/report.omv".to_string())
    );
    assert!(!b.is_activated());
    block_on(deferred).unwrap();
}

#[test]
fn external_save_is_cancelled_when_panel_closes() {
    let mut b = backstage(ScriptedHost::untitled());
    let deferred = block_on(b.external_request_save(())).unwrap();
    b.deactivate();

    assert!(matches!(block_on(deferred), Err(BackstageError::Cancelled)));
    assert!(!b.has_pending_save());
    assert!(b.host().saves.borrow().is_empty());
}

#[test]
fn save_operation_saves_in_place() {
    let mut b = backstage(ScriptedHost::with_path("/x/doc.omv"));
    b.activate();
    block_on(b.set_operation("save")).unwrap();

    assert_eq!(b.host().saves.borrow().len(), 1);
    assert!(!b.is_activated());
    assert_eq!(b.operation(), "");
}

#[test]
fn save_operation_without_path_falls_into_save_as() {
    let mut b = backstage(ScriptedHost::untitled());
    b.activate();
    block_on(b.set_operation("save")).unwrap();

    assert!(b.host().saves.borrow().is_empty());
    assert_eq!(b.operation(), "saveAs");
    assert_eq!(b.place(), "thispc");
}

#[test]
fn export_success_rebrowses_destination_and_closes() {
    let mut b = backstage(ScriptedHost::untitled());
    b.activate();
    block_on(b.set_operation("export")).unwrap();
    block_on(b.request_export("/out/table.csv", false)).unwrap();

    assert!(!b.is_activated());
    assert_eq!(b.cursor().path(), Some("/out"));
    assert_eq!(
        b.host().saves.borrow().as_slice(),
        [SaveCall {
            path: "/out/table.csv".into(),
            export: true,
            overwrite: false,
        }]
    );
}

#[test]
fn export_failure_reopens_export() {
    let host = ScriptedHost::untitled();
    host.fail_save.set(true);
    let mut b = backstage(host);

    let err = block_on(b.request_export("/out/table.csv", true)).unwrap_err();
    assert!(matches!(err, BackstageError::Host(_)));
    assert!(b.is_activated());
    assert_eq!(b.operation(), "export");
    assert_eq!(b.place(), "dataExport");
}

#[test]
fn failed_open_still_closes_panel() {
    let host = ScriptedHost::untitled();
    host.fail_open.set(true);
    let mut b = backstage(host);
    b.activate();

    let err = block_on(b.request_open("/x/broken.omv")).unwrap_err();
    assert!(matches!(err, BackstageError::Host(_)));
    assert!(!b.is_activated());
}

#[test]
fn new_operation_opens_blank_document() {
    let mut b = backstage(ScriptedHost::untitled());
    b.activate();
    block_on(b.set_operation("new")).unwrap();

    assert_eq!(b.host().opens.borrow().as_slice(), [""]);
    assert!(!b.is_activated());
}

#[test]
fn browser_navigation_and_back() {
    let mut b = backstage(ScriptedHost::with_path("/data/proj/doc.omv"));
    b.activate();
    block_on(b.set_operation("open")).unwrap();
    assert_eq!(b.cursor().path(), Some("/data/proj"));

    // Folders sort first.
    assert_eq!(b.browser(Purpose::Open).rows()[0].name, "sub");
    block_on(b.browser_event(Purpose::Open, BrowserEvent::Click(0))).unwrap();
    assert_eq!(b.cursor().path(), Some("/data/proj/sub"));

    block_on(b.browser_event(Purpose::Open, BrowserEvent::Back)).unwrap();
    assert_eq!(b.cursor().path(), Some("/data/proj"));

    let events = b.drain_events();
    let dirs = events
        .iter()
        .filter(|e| matches!(e, BackstageEvent::DirectoryChanged { .. }))
        .count();
    assert_eq!(dirs, 3);
}

#[test]
fn clicking_example_opens_it() {
    let mut b = backstage(ScriptedHost::untitled());
    b.apply_settings(SettingsChange {
        examples: Some(vec![
            DirectoryEntry::file("Tooth Growth.csv", "{{Examples}}/Tooth Growth.csv")
                .with_description("Effect of vitamin C on tooth growth"),
        ]),
        ..SettingsChange::default()
    });
    b.activate();
    block_on(b.set_operation("open")).unwrap();
    block_on(b.set_place("examples")).unwrap();
    assert_eq!(b.place(), "examples");

    block_on(b.list_event(ListKind::Examples, 0)).unwrap();
    assert_eq!(
        b.host().opens.borrow().as_slice(),
        ["{{Examples}}/Tooth Growth.csv"]
    );
    assert!(!b.is_activated());
}

#[test]
fn unsupported_native_dialog_asks_ui_to_browse() {
    let mut b = backstage(ScriptedHost::untitled());
    b.activate();
    block_on(b.set_operation("open")).unwrap();
    b.drain_events();

    block_on(b.browser_event(Purpose::Open, BrowserEvent::Browse)).unwrap();
    assert_eq!(
        b.drain_events(),
        vec![BackstageEvent::BrowseInvoked(Purpose::Open)]
    );
}

/// Dialog that always picks a fixed host-native path.
struct FixedDialog(&'static str);

impl NativeDialog for FixedDialog {
    async fn pick_open(
        &self,
        _filters: &[backstage::ExtensionGroup],
        _directory: Option<&str>,
    ) -> Result<Option<String>, BackstageError> {
        Ok(Some(self.0.to_string()))
    }

    async fn pick_save(
        &self,
        _filters: &[backstage::ExtensionGroup],
        _directory: Option<&str>,
        _file_name: &str,
    ) -> Result<Option<String>, BackstageError> {
        Ok(Some(self.0.to_string()))
    }
}

#[test]
fn native_export_pick_routes_to_export() {
    let mut b = backstage(ScriptedHost::untitled()).with_native_dialog(FixedDialog("C:\\out\\t.csv"));
    b.activate();
    block_on(b.set_operation("export")).unwrap();
    block_on(b.browser_event(Purpose::Export, BrowserEvent::Browse)).unwrap();

    assert_eq!(
        b.host().saves.borrow().as_slice(),
        [SaveCall {
            path: "C:/out/t.csv".into(),
            export: true,
            overwrite: true,
        }]
    );
}
