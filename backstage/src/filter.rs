use crate::core::{DirectoryEntry, ExtensionGroup, FileEntryKind};

/// Extension groups of a place plus the active one.
///
/// With no active group every entry is visible and save names are left as
/// typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    groups: Vec<ExtensionGroup>,
    active: Option<usize>,
}

impl ExtensionFilter {
    /// Creates a filter with the first group active (if any).
    pub fn new(groups: Vec<ExtensionGroup>) -> Self {
        let active = if groups.is_empty() { None } else { Some(0) };
        Self { groups, active }
    }

    /// Configured groups, in selector order.
    pub fn groups(&self) -> &[ExtensionGroup] {
        &self.groups
    }

    /// Replaces the groups and re-activates the first one.
    pub fn set_groups(&mut self, groups: Vec<ExtensionGroup>) {
        *self = Self::new(groups);
    }

    /// Index of the active group.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active group, if any.
    pub fn active_group(&self) -> Option<&ExtensionGroup> {
        self.active.and_then(|i| self.groups.get(i))
    }

    /// Activates a group by index. Out-of-range indices are ignored and
    /// return `false`.
    pub fn set_active(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.groups.len() => false,
            _ => {
                self.active = index;
                true
            }
        }
    }

    /// Whether an entry is shown: non-files always are; files need a suffix
    /// from the active group (case-sensitive).
    pub fn is_visible(&self, name: &str, kind: FileEntryKind) -> bool {
        if kind != FileEntryKind::File {
            return true;
        }
        self.has_valid_extension(name)
    }

    /// Whether `name` ends with `.<ext>` for an extension of the active group.
    pub fn has_valid_extension(&self, name: &str) -> bool {
        let Some(group) = self.active_group() else {
            return true;
        };
        match name.rsplit_once('.') {
            Some((_, suffix)) => group.contains(suffix),
            None => false,
        }
    }

    /// Returns `name` unchanged when it already carries an active group
    /// extension, otherwise with the group's default extension appended.
    pub fn normalize_for_save(&self, name: &str) -> String {
        if self.has_valid_extension(name) {
            return name.to_string();
        }
        match self.active_group().and_then(ExtensionGroup::default_extension) {
            Some(ext) => format!("{name}.{ext}"),
            None => name.to_string(),
        }
    }

    /// First group that lists `ext`. A leading dot is accepted.
    pub fn resolve_group_index_for(&self, ext: &str) -> Option<usize> {
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() {
            return None;
        }
        self.groups.iter().position(|g| g.contains(ext))
    }
}

/// Orders a listing so that special folders, drives and folders come before
/// files. The sort is stable: entries of the same kind keep host order.
pub fn order_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(|a, b| b.kind.rank().cmp(&a.kind.rank()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<ExtensionGroup> {
        vec![
            ExtensionGroup::new("Data files", ["omv", "csv", "txt"]),
            ExtensionGroup::new("jamovi files (.omv)", ["omv"]),
            ExtensionGroup::new("CSV (.csv, .txt)", ["csv", "txt"]),
        ]
    }

    #[test]
    fn folders_are_always_visible() {
        let mut f = ExtensionFilter::new(vec![ExtensionGroup::new("csv", ["csv"])]);
        assert!(f.is_visible("a.csv", FileEntryKind::File));
        assert!(f.is_visible("sub", FileEntryKind::Folder));

        f.set_groups(vec![ExtensionGroup::new("omv", ["omv"])]);
        assert!(!f.is_visible("a.csv", FileEntryKind::File));
        assert!(f.is_visible("sub", FileEntryKind::Folder));
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let f = ExtensionFilter::new(vec![ExtensionGroup::new("csv", ["csv"])]);
        assert!(!f.is_visible("A.CSV", FileEntryKind::File));
        assert!(!f.is_visible("csv", FileEntryKind::File));
    }

    #[test]
    fn no_active_group_shows_everything() {
        let mut f = ExtensionFilter::new(groups());
        assert!(f.set_active(None));
        assert!(f.is_visible("notes.pdf", FileEntryKind::File));
        assert_eq!(f.normalize_for_save("notes"), "notes");
        assert!(!f.set_active(Some(9)));
        assert_eq!(f.active_index(), None);
    }

    #[test]
    fn normalize_appends_default_extension_once() {
        let mut f = ExtensionFilter::new(groups());
        f.set_active(Some(2));
        assert_eq!(f.normalize_for_save("data"), "data.csv");
        assert_eq!(f.normalize_for_save("data.txt"), "data.txt");
        assert_eq!(f.normalize_for_save("data.omv"), "data.omv.csv");

        let once = f.normalize_for_save("report");
        assert_eq!(f.normalize_for_save(&once), once);
    }

    #[test]
    fn resolve_group_returns_first_match() {
        let f = ExtensionFilter::new(groups());
        assert_eq!(f.resolve_group_index_for(".omv"), Some(0));
        assert_eq!(f.resolve_group_index_for("txt"), Some(0));
        assert_eq!(f.resolve_group_index_for(".pdf"), None);
        assert_eq!(f.resolve_group_index_for(""), None);
    }

    #[test]
    fn resolved_group_normalization_is_idempotent() {
        let mut f = ExtensionFilter::new(groups());
        let index = f.resolve_group_index_for("csv");
        f.set_active(index);
        let name = f.normalize_for_save("survey");
        assert_eq!(f.normalize_for_save(&name), name);
    }

    #[test]
    fn order_puts_containers_before_files_stably() {
        let mut entries = vec![
            DirectoryEntry::file("b.csv", "/b.csv"),
            DirectoryEntry::folder("z", "/z"),
            DirectoryEntry::file("a.csv", "/a.csv"),
            DirectoryEntry::new("Documents", "/Documents", FileEntryKind::SpecialFolder),
            DirectoryEntry::folder("c", "/c"),
        ];
        order_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Documents", "z", "c", "b.csv", "a.csv"]);
    }
}
