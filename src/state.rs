use std::path::Path;

use crate::analytics::DashboardReport;
use crate::color::ColorMap;
use crate::config::AGE_BINS;
use crate::data::filter::{filtered_indices, FilterCriteria, FilteredView};
use crate::data::loader::load_file;
use crate::data::model::{Dimension, HrDataset};

// ---------------------------------------------------------------------------
// Dashboard sections (tabs)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Overview,
    Demographics,
    Compensation,
    Satisfaction,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Demographics,
        Section::Compensation,
        Section::Satisfaction,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Overview => "📊 Overview",
            Section::Demographics => "💼 Workforce Demographics",
            Section::Compensation => "💰 Compensation",
            Section::Satisfaction => "😊 Employee Satisfaction",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<HrDataset>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Indices of employees passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregations over the visible employees (cached).
    pub report: Option<DashboardReport>,

    /// Stable per-department and per-gender colours.
    pub department_colors: Option<ColorMap>,
    pub gender_colors: Option<ColorMap>,

    /// Active tab.
    pub section: Section,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a file and make it the session's dataset. On failure the
    /// previous dataset is dropped: no analysis is shown for a file that
    /// could not be read.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} employees from {} ({} departments, {} job roles, {} genders)",
                    dataset.len(),
                    path.display(),
                    dataset.departments.len(),
                    dataset.job_roles.len(),
                    dataset.genders.len(),
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                *self = AppState {
                    status_message: Some(format!(
                        "Unable to load the HR dataset ({e}). Check the file and try again."
                    )),
                    ..AppState::default()
                };
            }
        }
    }

    /// Ingest a newly loaded dataset, reset filters and colours.
    pub fn set_dataset(&mut self, dataset: HrDataset) {
        self.criteria = FilterCriteria::full_domain(&dataset);
        self.department_colors = Some(ColorMap::new(&dataset.departments));
        self.gender_colors = Some(ColorMap::new(&dataset.genders));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and the report after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.criteria);
        let view = FilteredView::from_indices(ds, self.visible_indices.clone());
        self.report = Some(DashboardReport::compute(&view, AGE_BINS));
        log::debug!("refiltered: {} of {} employees visible", view.len(), ds.len());
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_filter_value(&mut self, dimension: Dimension, value: &str) {
        let selected = self.criteria.selection_mut(dimension);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select all observed values of a dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        if let Some(ds) = &self.dataset {
            *self.criteria.selection_mut(dimension) = ds.domain(dimension).clone();
            self.refilter();
        }
    }

    /// Deselect all values of a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.criteria.selection_mut(dimension).clear();
        self.refilter();
    }

    /// Set the experience range. Bounds are clamped to the observed range
    /// and the lower bound never exceeds the upper one.
    pub fn set_experience_range(&mut self, min: u32, max: u32) {
        self.criteria.experience = (min.min(max), max.max(min));
        if let Some(ds) = &self.dataset {
            self.criteria.clamp_to(ds);
        }
        self.refilter();
    }

    /// Back to the full domain of every dimension.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::full_domain(ds);
            self.refilter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{employee, three_rows};
    use crate::data::model::Attrition;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(three_rows());
        state
    }

    #[test]
    fn new_dataset_shows_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.visible, 3);
        assert_eq!(report.total, 3);
        assert_eq!(state.criteria.departments.len(), 2);
    }

    #[test]
    fn toggling_recomputes_report() {
        let mut state = loaded();
        state.toggle_filter_value(Dimension::Department, "Research & Development");

        assert_eq!(state.visible_indices, vec![0, 1]);
        let metrics = &state.report.as_ref().unwrap().overview.metrics;
        assert_eq!(metrics.attrition_rate.value, Some(50.0));
        assert_eq!(metrics.monthly_income.value, Some(4500.0));

        state.toggle_filter_value(Dimension::Department, "Research & Development");
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn select_none_then_all() {
        let mut state = loaded();
        state.select_none(Dimension::Gender);
        assert!(state.visible_indices.is_empty());
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.visible, 0);
        assert_eq!(report.overview.metrics.attrition_rate.value, Some(0.0));
        assert_eq!(report.overview.metrics.job_satisfaction.value, None);

        state.select_all(Dimension::Gender);
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn experience_range_is_ordered_and_clamped() {
        let mut rows = Vec::new();
        for years in [1, 3, 5, 10] {
            let mut e = employee("Sales", "Male", Attrition::No, 1000.0);
            e.total_working_years = years;
            rows.push(e);
        }
        let mut state = AppState::default();
        state.set_dataset(HrDataset::from_employees(rows));

        state.set_experience_range(5, 2);
        assert_eq!(state.criteria.experience, (2, 5));
        assert_eq!(state.visible_indices, vec![1, 2]);

        state.set_experience_range(0, 99);
        assert_eq!(state.criteria.experience, (1, 10));
        assert_eq!(state.visible_indices.len(), 4);
    }

    #[test]
    fn reset_restores_full_domain() {
        let mut state = loaded();
        state.select_none(Dimension::JobRole);
        state.reset_filters();
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn failed_load_clears_session() {
        let mut state = loaded();
        state.load(Path::new("/nonexistent/HR_Analytics.csv"));

        assert!(state.dataset.is_none());
        assert!(state.report.is_none());
        assert!(state.visible_indices.is_empty());
        assert!(state.status_message.as_deref().unwrap().contains("Unable to load"));
    }
}
