//! Bridge Table Module
//! Immutable in-memory view over the bridge inventory.

use super::loader::LoaderError;
use polars::prelude::*;

/// CSV column names used by the dashboard.
pub mod columns {
    pub const AGE: &str = "Bridge Age (yr)";
    pub const LATITUDE: &str = "16 - Latitude (decimal)";
    pub const LONGITUDE: &str = "17 - Longitude (decimal)";
    pub const STRUCTURE_NUMBER: &str = "8 - Structure Number";
    pub const COUNTY_NAME: &str = "3 - County Name";
    pub const YEAR_BUILT: &str = "27 - Year Built";
    pub const OWNER_AGENCY: &str = "22 - Owner Agency";
    pub const AVERAGE_DAILY_TRAFFIC: &str = "29 - Average Daily Traffic";
    pub const MAIN_SPAN_MATERIAL: &str = "43A - Main Span Material";

    pub const REQUIRED: [&str; 9] = [
        AGE,
        LATITUDE,
        LONGITUDE,
        STRUCTURE_NUMBER,
        COUNTY_NAME,
        YEAR_BUILT,
        OWNER_AGENCY,
        AVERAGE_DAILY_TRAFFIC,
        MAIN_SPAN_MATERIAL,
    ];
}

/// The loaded bridge records. One row per physical bridge, never mutated.
#[derive(Debug, Clone)]
pub struct BridgeTable {
    df: DataFrame,
}

impl BridgeTable {
    /// Wrap a DataFrame after checking that every required column is present.
    pub fn new(df: DataFrame) -> Result<Self, LoaderError> {
        for name in columns::REQUIRED {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }
        Ok(Self { df })
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Distinct owner agencies, nulls removed, sorted ascending.
    pub fn owner_agencies(&self) -> Vec<String> {
        let mut agencies: Vec<String> = self
            .text_column(columns::OWNER_AGENCY)
            .map(|values| values.into_iter().flatten().collect())
            .unwrap_or_default();
        agencies.sort();
        agencies.dedup();
        agencies
    }

    /// Read a column as strings, one entry per row.
    pub fn text_column(&self, name: &str) -> PolarsResult<Vec<Option<String>>> {
        let column = self.df.column(name)?.cast(&DataType::String)?;
        let ca = column.str()?;
        Ok(ca.into_iter().map(|v| v.map(|s| s.to_string())).collect())
    }

    /// Read a column as f64, one entry per row. Unparseable cells are null.
    pub fn numeric_column(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let column = self.df.column(name)?.cast(&DataType::Float64)?;
        let ca = column.f64()?;
        Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
    }

    /// Read a column as i64, one entry per row.
    pub fn integer_column(&self, name: &str) -> PolarsResult<Vec<Option<i64>>> {
        let column = self.df.column(name)?.cast(&DataType::Int64)?;
        let ca = column.i64()?;
        Ok(ca.into_iter().collect())
    }
}
