use indexmap::IndexMap;

use crate::config::BackstageConfig;
use crate::core::{ExtensionGroup, Purpose};
use crate::place::ListKind;

/// Side effect attached to an operation or place.
///
/// Actions are run by the controller when their operation or place is
/// selected, and awaited before the selection continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Open a blank document.
    OpenBlank,
    /// Browse to the directory the document would be saved in.
    BrowseToDocument,
    /// Save to the document's own path, overwriting.
    SaveDocument,
    /// Browse to the save directory and suggest the save path.
    PrepareSaveAs,
    /// Replace the extension groups of a browser.
    SetExtensionGroups(Purpose, Vec<ExtensionGroup>),
}

/// Surface shown when a place is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceView {
    /// Directory browser of the given purpose.
    Browser(Purpose),
    /// Flat list fed by settings.
    List(ListKind),
}

/// Sub-item of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Place {
    /// Stable identifier, unique within its operation
    pub name: String,
    /// Label shown in the panel
    pub title: String,
    /// Draw a separator before this place
    pub separator: bool,
    /// Surface, or `None` for an action-only place
    pub view: Option<PlaceView>,
    /// Run when the place is activated
    pub action: Option<Action>,
}

impl Place {
    /// Creates an action-less place without separator.
    pub fn new(name: impl Into<String>, title: impl Into<String>, view: Option<PlaceView>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            separator: false,
            view,
            action: None,
        }
    }

    /// Draws a separator before this place.
    pub fn separated(mut self) -> Self {
        self.separator = true;
        self
    }

    /// Attaches an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

/// Top-level entry of the panel (New, Open, Save, Save As, Export).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    /// Stable identifier
    pub name: String,
    /// Label shown in the panel
    pub title: String,
    /// Places, in display order (may be empty)
    pub places: Vec<Place>,
    /// Run when the operation is selected
    pub action: Option<Action>,
}

impl Operation {
    /// Creates an operation without places or action.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            places: Vec::new(),
            action: None,
        }
    }

    /// Appends a place.
    pub fn with_place(mut self, place: Place) -> Self {
        self.places.push(place);
        self
    }

    /// Attaches an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Looks up a place by name.
    pub fn place(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.name == name)
    }

    /// Whether `name` is one of this operation's places.
    pub fn has_place(&self, name: &str) -> bool {
        self.place(name).is_some()
    }
}

/// Ordered, name-addressed table of operations.
#[derive(Clone, Debug, Default)]
pub struct OperationRegistry {
    ops: IndexMap<String, Operation>,
}

impl OperationRegistry {
    /// Name of the operation opening a blank document.
    pub const NEW: &'static str = "new";
    /// Name of the open operation.
    pub const OPEN: &'static str = "open";
    /// Name of the save operation.
    pub const SAVE: &'static str = "save";
    /// Name of the save-as operation.
    pub const SAVE_AS: &'static str = "saveAs";
    /// Name of the export operation.
    pub const EXPORT: &'static str = "export";

    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard New / Open / Save / Save As / Export table.
    pub fn standard(config: &BackstageConfig) -> Self {
        Self::new()
            .with(Operation::new(Self::NEW, "New").with_action(Action::OpenBlank))
            .with(
                Operation::new(Self::OPEN, "Open")
                    .with_action(Action::BrowseToDocument)
                    .with_place(Place::new(
                        "thispc",
                        "This PC",
                        Some(PlaceView::Browser(Purpose::Open)),
                    ))
                    .with_place(
                        Place::new(
                            "examples",
                            "Examples",
                            Some(PlaceView::List(ListKind::Examples)),
                        )
                        .separated(),
                    ),
            )
            .with(Operation::new(Self::SAVE, "Save").with_action(Action::SaveDocument))
            .with(
                Operation::new(Self::SAVE_AS, "Save As")
                    .with_action(Action::PrepareSaveAs)
                    .with_place(
                        Place::new("thispc", "This PC", Some(PlaceView::Browser(Purpose::Save)))
                            .separated(),
                    ),
            )
            .with(
                Operation::new(Self::EXPORT, "Export")
                    .with_place(
                        Place::new("dataExport", "Data", Some(PlaceView::Browser(Purpose::Export)))
                            .separated()
                            .with_action(Action::SetExtensionGroups(
                                Purpose::Export,
                                config.data_export_groups.clone(),
                            )),
                    )
                    .with_place(
                        Place::new(
                            "resultsExport",
                            "Results",
                            Some(PlaceView::Browser(Purpose::Export)),
                        )
                        .with_action(Action::SetExtensionGroups(
                            Purpose::Export,
                            config.results_export_groups.clone(),
                        )),
                    ),
            )
    }

    /// Adds or replaces an operation, keeping the position of a replaced one.
    pub fn with(mut self, op: Operation) -> Self {
        self.insert(op);
        self
    }

    /// Adds or replaces an operation.
    pub fn insert(&mut self, op: Operation) {
        self.ops.insert(op.name.clone(), op);
    }

    /// Looks up an operation.
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.ops.get(name)
    }

    /// Operations in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.ops.values()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether no operation is registered.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_order_and_places() {
        let reg = OperationRegistry::standard(&BackstageConfig::default());
        let names: Vec<&str> = reg.iter().map(|op| op.name.as_str()).collect();
        assert_eq!(names, vec!["new", "open", "save", "saveAs", "export"]);

        let open = reg.get("open").unwrap();
        assert_eq!(open.places[0].view, Some(PlaceView::Browser(Purpose::Open)));
        assert!(open.has_place("examples"));
        assert!(reg.get("save").unwrap().places.is_empty());
    }

    #[test]
    fn export_places_swap_groups() {
        let reg = OperationRegistry::standard(&BackstageConfig::default());
        let export = reg.get("export").unwrap();
        let Some(Action::SetExtensionGroups(Purpose::Export, groups)) =
            &export.place("resultsExport").unwrap().action
        else {
            panic!("results export should set groups");
        };
        assert_eq!(groups[0].default_extension(), Some("pdf"));
        assert!(groups[1].contains("htm"));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut reg = OperationRegistry::standard(&BackstageConfig::default());
        reg.insert(Operation::new("open", "Browse"));
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.iter().nth(1).unwrap().title, "Browse");
        assert!(reg.get("missing").is_none());
    }
}
