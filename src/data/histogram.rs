use super::model::{Dataset, AGE};

pub const AGE_BIN_WIDTH: f64 = 10.0;
pub const AGE_BIN_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// AgeHistogram – binned participant ages
// ---------------------------------------------------------------------------

/// Participant counts over half-open age bins `[0,10), [10,20), ..., [90,100)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeHistogram {
    /// `AGE_BIN_COUNT` counts, one per bin.
    pub counts: Vec<usize>,
    /// `AGE_BIN_COUNT + 1` edges: 0, 10, ..., 100.
    pub edges: Vec<f64>,
}

impl AgeHistogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(left edge, count)` pairs, handy for bar charts.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges.iter().copied().zip(self.counts.iter().copied())
    }
}

/// Bin the participants' ages. Missing ages land in no bin, and so do ages
/// outside `[0, 100)`. Boolean ages (left behind by the gender/age
/// correlation) count as 0 and 1.
pub fn age_distribution(dataset: &Dataset) -> AgeHistogram {
    let edges: Vec<f64> = (0..=AGE_BIN_COUNT)
        .map(|i| i as f64 * AGE_BIN_WIDTH)
        .collect();
    let upper = AGE_BIN_COUNT as f64 * AGE_BIN_WIDTH;

    let mut counts = vec![0usize; AGE_BIN_COUNT];
    for age in dataset.column(AGE).filter_map(|cell| cell.as_f64()) {
        if (0.0..upper).contains(&age) {
            counts[(age / AGE_BIN_WIDTH) as usize] += 1;
        }
    }

    AgeHistogram { counts, edges }
}

// ---------------------------------------------------------------------------
// Chart rendering – delegated to whatever display the caller owns
// ---------------------------------------------------------------------------

/// A histogram ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub histogram: AgeHistogram,
}

/// An external surface that can display charts.
pub trait ChartSurface {
    fn show_histogram(&mut self, chart: HistogramChart);
}

/// Discards every chart; for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDisplay;

impl ChartSurface for NoDisplay {
    fn show_histogram(&mut self, _chart: HistogramChart) {}
}

/// Compute the age histogram and hand a labelled chart of it to `surface`.
pub fn show_age_distrib(dataset: &Dataset, surface: &mut impl ChartSurface) -> AgeHistogram {
    let histogram = age_distribution(dataset);
    log::debug!("Age histogram: {:?} ({} binned)", histogram.counts, histogram.total());

    surface.show_histogram(HistogramChart {
        title: "age distribution".to_string(),
        x_label: "age".to_string(),
        y_label: "counts".to_string(),
        histogram: histogram.clone(),
    });
    histogram
}
