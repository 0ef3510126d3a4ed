//! CSV Data Loader Module
//! Loads the bridge inventory CSV using Polars.

use super::table::BridgeTable;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Rows used for schema inference. The export is capped at 10 000 bridges.
const INFER_SCHEMA_ROWS: usize = 10000;

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the bridge CSV and validate its columns.
    pub fn load_csv(file_path: &Path) -> Result<BridgeTable, LoaderError> {
        log::info!("Loading bridge data from {}", file_path.display());

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let table = BridgeTable::new(df)?;
        log::info!(
            "Loaded {} bridges, {} columns",
            table.row_count(),
            table.dataframe().width()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::columns;
    use crate::data::DataProcessor;
    use std::io::Write;

    fn header() -> String {
        columns::REQUIRED
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_load_csv_with_all_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", header()).unwrap();
        writeln!(file, "88,33.75,-84.39,121-0001-0,Fulton,1936,State Highway Agency,41000,Concrete").unwrap();
        writeln!(file, "12,32.08,-81.09,051-0042-0,Chatham,2012,County Highway Agency,12500,Steel").unwrap();
        file.flush().unwrap();

        let table = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.owner_agencies().len(), 2);
    }

    #[test]
    fn test_load_csv_unparseable_cell_becomes_null() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", header()).unwrap();
        writeln!(file, "88,33.75,-84.39,121-0001-0,Fulton,1936,State Highway Agency,41000,Concrete").unwrap();
        writeln!(file, "12,32.08,-81.09,051-0042-0,Chatham,2012,County Highway Agency,n/a,Steel").unwrap();
        writeln!(file, "40,31.15,-81.49,127-0003-0,Glynn,1985,County Highway Agency,900,Steel").unwrap();
        file.flush().unwrap();

        let table = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.numeric_column(columns::AVERAGE_DAILY_TRAFFIC).unwrap(),
            vec![Some(41000.0), None, Some(900.0)]
        );
        assert_eq!(DataProcessor::total_traffic(&table).unwrap(), 41900.0);
    }

    #[test]
    fn test_load_csv_missing_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\"{}\",\"{}\"", columns::AGE, columns::COUNTY_NAME).unwrap();
        writeln!(file, "88,Fulton").unwrap();
        file.flush().unwrap();

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(_)));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::CsvError(_)));
    }
}
