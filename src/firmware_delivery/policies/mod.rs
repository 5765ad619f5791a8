mod file_classification;

pub use file_classification::{ClassificationRule, FileCategory, FileClassification, Placement};
