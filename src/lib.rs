//! Questionnaire cleaning and descriptive statistics.
//!
//! Load a results file with [`data::loader::QuestionnaireAnalysis`], then run
//! the operations in [`data`] on the returned [`data::model::Dataset`].

pub mod data;
