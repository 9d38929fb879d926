use super::error::{DatasetError, DatasetResult};
use super::model::{CellValue, Dataset, Score, SCORE};

/// How many missing grades a participant may have and still be scored.
pub const DEFAULT_MAX_NANS_PER_SUBJECT: usize = 1;

/// Add (or overwrite) the `score` column of `dataset` in place.
///
/// A participant's score is the mean of their present grades, truncated to
/// an integer. Participants missing more than `maximal_nans_per_sub` grades
/// get [`Score::Missing`] whatever their remaining grades are.
///
/// Every score is computed before any is written, so a mean outside `0..=255`
/// fails the call with [`DatasetError::ScoreOutOfRange`] and leaves the
/// table unchanged.
pub fn score_subjects(
    dataset: &mut Dataset,
    maximal_nans_per_sub: usize,
) -> DatasetResult<&mut Dataset> {
    let scores = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if row.missing_grades() > maximal_nans_per_sub {
                return Ok(Score::Missing);
            }
            Score::from_mean(row.grade_mean())
                .map_err(|mean| DatasetError::ScoreOutOfRange { row: i, mean })
        })
        .collect::<DatasetResult<Vec<Score>>>()?;

    for (row, score) in dataset.rows.iter_mut().zip(scores) {
        row.set(SCORE, CellValue::Score(score));
    }
    dataset.add_column(SCORE);

    log::debug!(
        "Scored {} participants ({} missing, threshold {maximal_nans_per_sub})",
        dataset.len(),
        dataset
            .column(SCORE)
            .filter(|cell| cell.is_missing())
            .count()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::data::test_support::{dataset, graded};

    fn row(grades: [Value; 5]) -> Value {
        graded(json!(30), "F", grades)
    }

    fn score_at(ds: &Dataset, i: usize) -> &CellValue {
        ds.rows[i].get(SCORE)
    }

    #[test]
    fn one_missing_grade_is_scored_from_the_rest() {
        // (81 + 90 + 70 + 60) / 4 = 75.25
        let mut ds = dataset(vec![row([json!(81), json!(null), json!(90), json!(70), json!(60)])]);
        score_subjects(&mut ds, DEFAULT_MAX_NANS_PER_SUBJECT).unwrap();
        assert_eq!(score_at(&ds, 0), &CellValue::Score(Score::Present(75)));
    }

    #[test]
    fn two_missing_grades_exceed_default_threshold() {
        let mut ds = dataset(vec![row([json!(80), json!(null), json!(90), json!(null), json!(70)])]);
        score_subjects(&mut ds, DEFAULT_MAX_NANS_PER_SUBJECT).unwrap();
        assert_eq!(score_at(&ds, 0), &CellValue::Score(Score::Missing));
    }

    #[test]
    fn threshold_is_configurable() {
        let mut ds = dataset(vec![row([json!(80), json!(null), json!(91), json!(null), json!(70)])]);
        score_subjects(&mut ds, 2).unwrap();
        // (80 + 91 + 70) / 3 = 80.33
        assert_eq!(score_at(&ds, 0), &CellValue::Score(Score::Present(80)));

        score_subjects(&mut ds, 0).unwrap();
        assert_eq!(score_at(&ds, 0), &CellValue::Score(Score::Missing));
    }

    #[test]
    fn all_missing_row_is_missing_even_with_lenient_threshold() {
        let mut ds = dataset(vec![row([json!(null), json!(null), json!(null), json!(null), json!(null)])]);
        score_subjects(&mut ds, 5).unwrap();
        assert_eq!(score_at(&ds, 0), &CellValue::Score(Score::Missing));
    }

    #[test]
    fn fractional_means_are_truncated() {
        let mut ds = dataset(vec![row([json!(99), json!(100), json!(100), json!(100), json!(100)])]);
        score_subjects(&mut ds, DEFAULT_MAX_NANS_PER_SUBJECT).unwrap();
        assert_eq!(score_at(&ds, 0), &CellValue::Score(Score::Present(99)));
    }

    #[test]
    fn mutates_the_given_table_and_registers_the_column() {
        let mut ds = dataset(vec![
            row([json!(1), json!(2), json!(3), json!(4), json!(5)]),
            row([json!(10), json!(10), json!(10), json!(10), json!(10)]),
        ]);
        let returned = score_subjects(&mut ds, 1).unwrap();
        assert_eq!(returned.len(), 2);
        assert!(ds.has_column(SCORE));
        assert_eq!(score_at(&ds, 0), &CellValue::Score(Score::Present(3)));
        assert_eq!(score_at(&ds, 1), &CellValue::Score(Score::Present(10)));
    }

    #[test]
    fn out_of_range_mean_is_rejected_without_partial_writes() {
        let mut ds = dataset(vec![
            row([json!(10), json!(10), json!(10), json!(10), json!(10)]),
            row([json!(300), json!(300), json!(300), json!(300), json!(300)]),
        ]);
        let err = score_subjects(&mut ds, 1).unwrap_err();
        assert!(matches!(err, DatasetError::ScoreOutOfRange { row: 1, .. }));
        assert!(!ds.has_column(SCORE));
        assert_eq!(score_at(&ds, 0), &CellValue::Null);
    }

    #[test]
    fn out_of_range_rows_over_threshold_are_simply_missing() {
        let mut ds = dataset(vec![row([json!(300), json!(300), json!(null), json!(null), json!(300)])]);
        score_subjects(&mut ds, 1).unwrap();
        assert_eq!(score_at(&ds, 0), &CellValue::Score(Score::Missing));
    }
}
