use super::model::{CellValue, Dataset, GRADE_COLUMNS};

/// Round to one decimal place, halves to even.
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Fill each missing grade with the mean of that participant's other grades.
///
/// Works on a copy: `dataset` is left as it was. Every imputed cell holds the
/// row mean rounded to one decimal; grades that were present are not touched.
/// A participant with no grades at all has no mean, so all five cells become
/// NaN.
///
/// Returns the imputed table and the ascending indices of the rows that had
/// at least one missing grade.
pub fn fill_na_with_mean(dataset: &Dataset) -> (Dataset, Vec<usize>) {
    let mut corrected = dataset.clone();
    let mut imputed_rows = Vec::new();

    for (i, row) in corrected.rows.iter_mut().enumerate() {
        let grades = row.grades();
        if grades.iter().all(Option::is_some) {
            continue;
        }
        imputed_rows.push(i);

        let fill = round1(row.grade_mean());
        for (col, grade) in GRADE_COLUMNS.iter().zip(grades) {
            if grade.is_none() {
                row.set(col, CellValue::Float(fill));
            }
        }
    }

    log::debug!(
        "Imputed missing grades for {} of {} participants",
        imputed_rows.len(),
        dataset.len()
    );
    (corrected, imputed_rows)
}
