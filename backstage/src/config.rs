use crate::core::ExtensionGroup;

/// Static configuration of a [`Backstage`](crate::Backstage).
///
/// The defaults describe a statistics spreadsheet application whose native
/// format is `.omv` and which imports CSV, SPSS, Stata, SAS and JASP files.
#[derive(Clone, Debug)]
pub struct BackstageConfig {
    /// Extension of the native document format (no dot)
    pub native_extension: String,
    /// Description of the native format in the save type selector
    pub native_description: String,
    /// Logical location used for untitled documents
    pub documents_location: String,
    /// Groups of the open browser
    pub open_groups: Vec<ExtensionGroup>,
    /// Groups of the data export place
    pub data_export_groups: Vec<ExtensionGroup>,
    /// Groups of the results export place
    pub results_export_groups: Vec<ExtensionGroup>,
}

impl Default for BackstageConfig {
    fn default() -> Self {
        Self {
            native_extension: "omv".to_string(),
            native_description: "jamovi file (.omv)".to_string(),
            documents_location: "{{Documents}}".to_string(),
            open_groups: vec![
                ExtensionGroup::new(
                    "Data files",
                    [
                        "omv", "csv", "txt", "sav", "zsav", "por", "dta", "sas7bdat", "xpt", "jasp",
                    ],
                ),
                ExtensionGroup::new("jamovi files (.omv)", ["omv"]),
                ExtensionGroup::new("CSV (Comma delimited) (.csv, .txt)", ["csv", "txt"]),
                ExtensionGroup::new("SPSS files (.sav, .zsav, .por)", ["sav", "zsav", "por"]),
                ExtensionGroup::new("Stata files (.dta, .sas7bdat)", ["dta", "sas7bdat"]),
                ExtensionGroup::new("SAS files (.xpt)", ["xpt"]),
                ExtensionGroup::new("JASP files (.jasp)", ["jasp"]),
            ],
            data_export_groups: vec![ExtensionGroup::new(
                "CSV (Comma delimited) (.csv)",
                ["csv"],
            )],
            results_export_groups: vec![
                ExtensionGroup::new("Portable Document Format (.pdf)", ["pdf"]),
                ExtensionGroup::new("Web Page (.html, .htm)", ["html", "htm"]),
            ],
        }
    }
}

impl BackstageConfig {
    /// Sets the native format extension and its selector description.
    pub fn native_format(
        mut self,
        extension: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.native_extension = extension.into().trim_start_matches('.').to_lowercase();
        self.native_description = description.into();
        self
    }

    /// Sets the location used for untitled documents.
    pub fn documents_location(mut self, location: impl Into<String>) -> Self {
        self.documents_location = location.into();
        self
    }

    /// Replaces the open browser groups.
    pub fn open_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<ExtensionGroup>,
    {
        self.open_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the data export groups.
    pub fn data_export_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<ExtensionGroup>,
    {
        self.data_export_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the results export groups.
    pub fn results_export_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<ExtensionGroup>,
    {
        self.results_export_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// The save browser's single group: the native format.
    pub fn save_groups(&self) -> Vec<ExtensionGroup> {
        vec![ExtensionGroup::new(
            self.native_description.clone(),
            [self.native_extension.as_str()],
        )]
    }
}
