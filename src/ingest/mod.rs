//! Ingestion: raw bytes in, normalized [`Table`] out.

pub mod delimiter;
pub mod excel;
pub mod normalize;

use std::fs;
use std::path::Path;

use crate::encoding::decode_to_utf8;
use crate::error::{PipelineError, Result};
use crate::table::Table;
use self::delimiter::sniff_delimiter;

/// Source format resolved from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma- or semicolon-delimited text, delimiter auto-detected.
    Csv,
    /// Excel workbook, first sheet only. Bypasses delimiter inference.
    Excel,
}

impl SourceFormat {
    /// Resolve a format from a file extension, case-insensitively.
    ///
    /// Anything other than `.csv`/`.xlsx` is an [`PipelineError::UnsupportedFormat`];
    /// this check runs before any bytes are parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("xlsx") => Ok(SourceFormat::Excel),
            _ => Err(PipelineError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Tabular source loader and normalizer.
///
/// Stateless across calls: each load parses, normalizes and returns a
/// fresh [`Table`] with no retained global state.
///
/// # Example
///
/// ```no_run
/// use chart_scout::Loader;
///
/// let loader = Loader::new();
/// let table = loader.load_path("sales.csv").unwrap();
/// println!("{} rows", table.num_rows());
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    /// Optional forced delimiter (skips sniffing).
    forced_delimiter: Option<u8>,
    /// Column labels that receive locale-currency cleanup.
    currency_labels: Vec<String>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Create a loader with default settings. The only currency-cleaned
    /// column label out of the box is `price`.
    pub fn new() -> Self {
        Self {
            forced_delimiter: None,
            currency_labels: vec!["price".to_string()],
        }
    }

    /// Force a specific CSV delimiter, skipping inference.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.forced_delimiter = Some(delimiter);
        self
    }

    /// Register an additional column label for currency cleanup.
    pub fn currency_column(&mut self, label: impl Into<String>) -> &mut Self {
        self.currency_labels.push(label.into());
        self
    }

    /// Remove all currency-cleanup labels, including the default.
    pub fn clear_currency_columns(&mut self) -> &mut Self {
        self.currency_labels.clear();
        self
    }

    /// Load and normalize a local file, dispatching on its extension.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        let path = path.as_ref();
        // Unsupported extensions fail before the file is opened.
        let format = SourceFormat::from_path(path)?;
        let data = fs::read(path)?;
        self.load_bytes(&data, format)
    }

    /// Load and normalize an in-memory payload of the given format.
    pub fn load_bytes(&self, data: &[u8], format: SourceFormat) -> Result<Table> {
        if data.is_empty() {
            return Err(PipelineError::EmptyData);
        }
        match format {
            SourceFormat::Csv => self.load_csv(data),
            SourceFormat::Excel => self.load_excel(data),
        }
    }

    /// Fetch a remote CSV payload (e.g. a published spreadsheet export
    /// link) and normalize it. Fetch failures surface as
    /// [`PipelineError::SourceUnavailable`]; no partial table is returned.
    #[cfg(feature = "http")]
    pub fn load_url(&self, url: &str) -> Result<Table> {
        let data = crate::http::fetch_url(url)
            .map_err(|e| PipelineError::SourceUnavailable(e.to_string()))?;
        if data.is_empty() {
            return Err(PipelineError::EmptyData);
        }
        self.load_csv(&data)
    }

    fn load_csv(&self, data: &[u8]) -> Result<Table> {
        let text = decode_to_utf8(data);
        let bytes = text.as_bytes();

        let delimiter = self
            .forced_delimiter
            .unwrap_or_else(|| sniff_delimiter(bytes));

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(ToString::to_string).collect());
        }
        if rows.is_empty() {
            return Err(PipelineError::EmptyData);
        }

        let header = rows.remove(0);
        Ok(normalize::build_table(&header, &rows, &self.currency_labels))
    }

    fn load_excel(&self, data: &[u8]) -> Result<Table> {
        let mut rows = excel::read_rows(data)?;
        if rows.is_empty() {
            return Err(PipelineError::EmptyData);
        }

        let header = rows.remove(0);
        Ok(normalize::build_table(&header, &rows, &self.currency_labels))
    }
}
