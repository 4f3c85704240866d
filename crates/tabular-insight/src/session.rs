//! Stateful analysis session for interactive hosts.
//!
//! A session owns the loaded dataset, the list of active filters and the last
//! analysis result. Hosts create one per open document; nothing is global.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::{InsightError, Result};
use crate::filter::{FilterCondition, FilterOperator, RowFilter};
use crate::profiler::DataProfiler;
use crate::types::{AnalysisResult, Dataset, Record};

/// Identifier of a filter, unique within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilterId(u64);

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "filter-{}", self.0)
    }
}

/// A filter condition together with its session identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFilter {
    pub id: FilterId,
    pub condition: FilterCondition,
}

#[derive(Debug, Default)]
pub struct AnalysisSession {
    profiler: DataProfiler,
    dataset: Option<Dataset>,
    filters: Vec<ActiveFilter>,
    next_filter_id: u64,
    analysis: Option<AnalysisResult>,
}

impl AnalysisSession {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            profiler: DataProfiler::new(config),
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.profiler.config()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Replace the loaded data. Filters and the previous analysis are dropped.
    pub fn load(&mut self, dataset: Dataset) {
        info!(
            rows = dataset.len(),
            columns = dataset.headers().len(),
            "Loading dataset into session"
        );
        self.dataset = Some(dataset);
        self.filters.clear();
        self.analysis = None;
    }

    /// Drop the data, the filters and the analysis.
    pub fn clear(&mut self) {
        self.dataset = None;
        self.filters.clear();
        self.analysis = None;
    }

    /// Append a filter and return its identifier.
    pub fn add_filter(&mut self, condition: FilterCondition) -> FilterId {
        let id = FilterId(self.next_filter_id);
        self.next_filter_id += 1;
        debug!(%id, %condition, "Adding filter");
        self.filters.push(ActiveFilter { id, condition });
        id
    }

    /// Append an `eq ""` filter on the first column, ready to be edited.
    pub fn add_default_filter(&mut self) -> Result<FilterId> {
        let column = self
            .dataset
            .as_ref()
            .and_then(|d| d.headers().first())
            .cloned()
            .ok_or(InsightError::NoDataLoaded)?;
        Ok(self.add_filter(FilterCondition::new(column, FilterOperator::Eq, "")))
    }

    /// Edit a filter in place. Returns `false` if the id is unknown.
    pub fn update_filter(&mut self, id: FilterId, update: impl FnOnce(&mut FilterCondition)) -> bool {
        match self.filters.iter_mut().find(|f| f.id == id) {
            Some(filter) => {
                update(&mut filter.condition);
                debug!(%id, condition = %filter.condition, "Updated filter");
                true
            }
            None => false,
        }
    }

    /// Remove a filter, returning its condition if it existed.
    pub fn remove_filter(&mut self, id: FilterId) -> Option<FilterCondition> {
        let index = self.filters.iter().position(|f| f.id == id)?;
        Some(self.filters.remove(index).condition)
    }

    /// Active filters in the order they were added.
    pub fn filters(&self) -> &[ActiveFilter] {
        &self.filters
    }

    fn conditions(&self) -> Vec<FilterCondition> {
        self.filters.iter().map(|f| f.condition.clone()).collect()
    }

    /// Rows passing every active filter; empty when nothing is loaded.
    pub fn filtered_rows(&self) -> Vec<&Record> {
        match &self.dataset {
            Some(dataset) => RowFilter::filter(dataset, &self.conditions()),
            None => Vec::new(),
        }
    }

    /// The loaded dataset restricted to rows passing every active filter.
    pub fn filtered_dataset(&self) -> Option<Dataset> {
        self.dataset
            .as_ref()
            .map(|dataset| RowFilter::apply(dataset, &self.conditions()))
    }

    /// Analyze the full loaded dataset and keep the result.
    pub fn analyze(&mut self) -> Result<&AnalysisResult> {
        let dataset = self.dataset.as_ref().ok_or(InsightError::NoDataLoaded)?;
        let result = self.profiler.analyze(dataset)?;
        Ok(&*self.analysis.insert(result))
    }

    /// Analyze only the filtered rows. The cached analysis is left untouched.
    pub fn analyze_filtered(&self) -> Result<AnalysisResult> {
        let dataset = self.filtered_dataset().ok_or(InsightError::NoDataLoaded)?;
        self.profiler.analyze(&dataset)
    }

    /// The result of the last [`AnalysisSession::analyze`] call.
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }
}
