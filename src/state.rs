use std::path::Path;

use anyhow::{Context, Result};
use questionnaire_viewer::data::correlation::{correlate_gender_age, GenderAgeSummary};
use questionnaire_viewer::data::filter::remove_rows_without_mail;
use questionnaire_viewer::data::histogram::{show_age_distrib, ChartSurface, HistogramChart};
use questionnaire_viewer::data::impute::fill_na_with_mean;
use questionnaire_viewer::data::loader::QuestionnaireAnalysis;
use questionnaire_viewer::data::model::Dataset;
use questionnaire_viewer::data::scoring::{score_subjects, DEFAULT_MAX_NANS_PER_SUBJECT};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Options and chart surface
// ---------------------------------------------------------------------------

/// User-adjustable analysis settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Missing grades tolerated before a participant's score is NA.
    pub max_nans_per_subject: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_nans_per_subject: DEFAULT_MAX_NANS_PER_SUBJECT,
        }
    }
}

/// Holds the most recent chart for the central plot panel to draw.
#[derive(Debug, Default)]
pub struct PlotSurface {
    pub histogram: Option<HistogramChart>,
}

impl ChartSurface for PlotSurface {
    fn show_histogram(&mut self, chart: HistogramChart) {
        self.histogram = Some(chart);
    }
}

/// A table derived from the loaded data, shown instead of it.
#[derive(Debug, Clone)]
pub struct DerivedTable {
    pub label: String,
    pub dataset: Dataset,
    /// Rows to highlight (imputed rows).
    pub highlighted: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Resolved source file (None until user loads a file).
    pub analysis: Option<QuestionnaireAnalysis>,

    /// The loaded table. Scoring and correlation modify it in place.
    pub dataset: Option<Dataset>,

    /// Last copy produced by the email filter or imputation.
    pub derived: Option<DerivedTable>,

    /// Receives the age histogram.
    pub surface: PlotSurface,

    /// Last gender/age summary.
    pub summary: Option<GenderAgeSummary>,

    /// Colours for the summary chart, one per gender.
    pub color_map: Option<ColorMap>,

    pub options: AnalysisOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Resolve and read `path`, replacing whatever was loaded before.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let analysis = QuestionnaireAnalysis::new(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let dataset = analysis.read_data().context("reading questionnaire data")?;
        self.set_dataset(analysis, dataset);
        Ok(())
    }

    /// Ingest a newly loaded dataset and drop results computed on the old one.
    pub fn set_dataset(&mut self, analysis: QuestionnaireAnalysis, dataset: Dataset) {
        self.analysis = Some(analysis);
        self.dataset = Some(dataset);
        self.derived = None;
        self.surface = PlotSurface::default();
        self.summary = None;
        self.color_map = None;
        self.status_message = None;
        self.show_age_distribution();
    }

    /// The table the UI should currently display.
    pub fn visible_table(&self) -> Option<(&str, &Dataset, &[usize])> {
        match (&self.derived, &self.dataset) {
            (Some(d), _) => Some((d.label.as_str(), &d.dataset, d.highlighted.as_slice())),
            (None, Some(ds)) => Some(("loaded data", ds, &[] as &[usize])),
            (None, None) => None,
        }
    }

    pub fn show_loaded(&mut self) {
        self.derived = None;
    }

    pub fn show_age_distribution(&mut self) {
        if let Some(ds) = &self.dataset {
            show_age_distrib(ds, &mut self.surface);
        }
    }

    pub fn filter_emails(&mut self) {
        if let Some(ds) = &self.dataset {
            let cleaned = remove_rows_without_mail(ds);
            self.status_message = Some(format!(
                "{} of {} participants have a valid email",
                cleaned.len(),
                ds.len()
            ));
            self.derived = Some(DerivedTable {
                label: "valid emails".to_string(),
                dataset: cleaned,
                highlighted: Vec::new(),
            });
        }
    }

    pub fn impute_missing(&mut self) {
        if let Some(ds) = &self.dataset {
            let (imputed, rows) = fill_na_with_mean(ds);
            self.status_message = Some(format!("Imputed grades for {} participants", rows.len()));
            self.derived = Some(DerivedTable {
                label: "imputed grades".to_string(),
                dataset: imputed,
                highlighted: rows,
            });
        }
    }

    pub fn score(&mut self) {
        let Some(ds) = self.dataset.as_mut() else {
            return;
        };
        match score_subjects(ds, self.options.max_nans_per_subject) {
            Ok(_) => {
                self.derived = None;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Scoring failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Runs the in-place correlation: the loaded `age` column becomes the
    /// over-40 flag, so the histogram is refreshed to show that.
    pub fn correlate(&mut self) {
        let Some(ds) = self.dataset.as_mut() else {
            return;
        };
        let summary = correlate_gender_age(ds);
        self.color_map = Some(ColorMap::new(summary.genders()));
        self.summary = Some(summary);
        self.derived = None;
        self.show_age_distribution();
    }
}
