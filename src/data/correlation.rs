use std::collections::BTreeMap;

use super::model::{mean, CellValue, Dataset, Row, AGE, GENDER, GRADE_COLUMNS};

/// Participants strictly older than this are in the "over 40" group.
pub const AGE_THRESHOLD: f64 = 40.0;

// ---------------------------------------------------------------------------
// GenderAgeSummary – per-question means grouped by (gender, over 40)
// ---------------------------------------------------------------------------

/// Key of one summary group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub gender: String,
    pub over_40: bool,
}

/// Mean grade per question for every (gender, over 40) group.
///
/// Groups are ordered by gender, then `false` before `true`. A question that
/// nobody in a group answered has a NaN mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenderAgeSummary {
    pub groups: BTreeMap<GroupKey, [f64; 5]>,
}

impl GenderAgeSummary {
    pub fn get(&self, gender: &str, over_40: bool) -> Option<&[f64; 5]> {
        self.groups.get(&GroupKey {
            gender: gender.to_string(),
            over_40,
        })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Distinct genders, in order.
    pub fn genders(&self) -> Vec<&str> {
        let mut genders: Vec<&str> = self.groups.keys().map(|k| k.gender.as_str()).collect();
        genders.dedup();
        genders
    }
}

fn over_40(age: &CellValue) -> Option<bool> {
    age.as_f64().map(|age| age > AGE_THRESHOLD)
}

fn gender_of(row: &Row) -> Option<String> {
    match row.get(GENDER) {
        CellValue::String(s) => Some(s.clone()),
        cell if cell.is_missing() => None,
        other => Some(other.to_string()),
    }
}

fn summarize<'a>(rows: impl Iterator<Item = (GroupKey, &'a Row)>) -> GenderAgeSummary {
    let mut buckets: BTreeMap<GroupKey, Vec<&Row>> = BTreeMap::new();
    for (key, row) in rows {
        buckets.entry(key).or_default().push(row);
    }

    let groups = buckets
        .into_iter()
        .map(|(key, rows)| {
            let means = std::array::from_fn(|q| {
                mean(rows.iter().filter_map(|row| row.get(GRADE_COLUMNS[q]).as_f64()))
            });
            (key, means)
        })
        .collect();
    GenderAgeSummary { groups }
}

fn group_key(row: &Row) -> Option<GroupKey> {
    let over_40 = over_40(row.get(AGE))?;
    let gender = gender_of(row)?;
    Some(GroupKey { gender, over_40 })
}

/// Group participants by gender and whether they are over 40, and average
/// each question within each group. Rows with no age or no gender belong to
/// no group. `dataset` is not modified.
pub fn gender_age_summary(dataset: &Dataset) -> GenderAgeSummary {
    summarize(
        dataset
            .rows
            .iter()
            .filter_map(|row| Some((group_key(row)?, row))),
    )
}

/// Like [`gender_age_summary`], but also rewrites the `age` column of
/// `dataset` into the over-40 flag.
///
/// Groups come from the ages as they were before the rewrite. Afterwards
/// every known age in the table is a boolean, so later age-based operations
/// on the same table see 0/1 instead of years, and a second call puts
/// everyone in the "not over 40" group. Use [`gender_age_summary`] to keep
/// the ages.
pub fn correlate_gender_age(dataset: &mut Dataset) -> GenderAgeSummary {
    let keys: Vec<Option<GroupKey>> = dataset.rows.iter().map(group_key).collect();

    for row in &mut dataset.rows {
        if let Some(flag) = over_40(row.get(AGE)) {
            row.set(AGE, CellValue::Bool(flag));
        }
    }

    let summary = summarize(
        keys.into_iter()
            .zip(&dataset.rows)
            .filter_map(|(key, row)| Some((key?, row))),
    );
    log::debug!(
        "Gender/age summary: {} groups over {} participants",
        summary.len(),
        dataset.len()
    );
    summary
}
