//! Data Processor Module
//! Selections and grouped aggregations feeding the map, bar and pie views.

use super::table::{columns, BridgeTable};
use polars::prelude::*;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Upper bound of the "oldest bridges" input.
pub const MAX_OLDEST: usize = 500;

/// Bucket for rows with no main span material.
pub const MISSING_MATERIAL: &str = "(missing)";

/// One bridge on the map, projected to the fields the tooltip needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub age: Option<f64>,
    /// `[longitude, latitude]`, absent when either coordinate is null.
    pub position: Option<[f64; 2]>,
    pub structure_number: String,
    pub county_name: String,
    pub year_built: Option<i64>,
}

/// Number of bridges owned by one agency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgencyCount {
    pub agency: String,
    pub count: usize,
}

/// Total average daily traffic carried by one main span material.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTraffic {
    pub material: String,
    pub traffic: f64,
}

/// Stateless transformations over a [`BridgeTable`].
pub struct DataProcessor;

impl DataProcessor {
    /// The `n` oldest bridges, oldest first.
    ///
    /// `n` is clamped to [`MAX_OLDEST`]. The sort is stable and puts null ages
    /// last, so the result has exactly `min(n, row_count)` distinct rows.
    pub fn oldest_bridges(table: &BridgeTable, n: usize) -> Result<Vec<MapPoint>, ProcessorError> {
        let take = n.min(MAX_OLDEST).min(table.row_count());
        if take == 0 {
            return Ok(Vec::new());
        }

        let ages = table.numeric_column(columns::AGE)?;
        let latitudes = table.numeric_column(columns::LATITUDE)?;
        let longitudes = table.numeric_column(columns::LONGITUDE)?;
        let structures = table.text_column(columns::STRUCTURE_NUMBER)?;
        let counties = table.text_column(columns::COUNTY_NAME)?;
        let years = table.integer_column(columns::YEAR_BUILT)?;

        let mut order: Vec<usize> = (0..table.row_count()).collect();
        order.sort_by(|&a, &b| match (ages[a], ages[b]) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let points = order
            .into_iter()
            .take(take)
            .map(|row| MapPoint {
                age: ages[row],
                position: longitudes[row].zip(latitudes[row]).map(|(lon, lat)| [lon, lat]),
                structure_number: structures[row].clone().unwrap_or_default(),
                county_name: counties[row].clone().unwrap_or_default(),
                year_built: years[row],
            })
            .collect();

        Ok(points)
    }

    /// Bridge counts for the selected agencies, ordered by agency name.
    ///
    /// Agencies with no rows are left out; an empty selection gives an empty result.
    pub fn count_by_agency(
        table: &BridgeTable,
        selected: &[String],
    ) -> Result<Vec<AgencyCount>, ProcessorError> {
        if selected.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for agency in table.text_column(columns::OWNER_AGENCY)?.into_iter().flatten() {
            if wanted.contains(agency.as_str()) {
                *counts.entry(agency).or_insert(0) += 1;
            }
        }

        Ok(counts
            .into_iter()
            .map(|(agency, count)| AgencyCount { agency, count })
            .collect())
    }

    /// Total traffic per main span material, ordered by material name.
    ///
    /// Single pass, one addition per row. Null traffic adds nothing and null
    /// material goes to [`MISSING_MATERIAL`].
    pub fn traffic_by_material(table: &BridgeTable) -> Result<Vec<MaterialTraffic>, ProcessorError> {
        let materials = table.text_column(columns::MAIN_SPAN_MATERIAL)?;
        let traffic = table.numeric_column(columns::AVERAGE_DAILY_TRAFFIC)?;

        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for (material, amount) in materials.into_iter().zip(traffic) {
            let key = material.unwrap_or_else(|| MISSING_MATERIAL.to_string());
            *totals.entry(key).or_insert(0.0) += amount.unwrap_or(0.0);
        }

        Ok(totals
            .into_iter()
            .map(|(material, traffic)| MaterialTraffic { material, traffic })
            .collect())
    }

    /// Sum of all non-null traffic values.
    pub fn total_traffic(table: &BridgeTable) -> Result<f64, ProcessorError> {
        Ok(table
            .numeric_column(columns::AVERAGE_DAILY_TRAFFIC)?
            .into_iter()
            .flatten()
            .sum())
    }
}
