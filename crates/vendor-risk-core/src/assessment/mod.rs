pub mod enrich;
pub mod extract;
pub mod schema;
pub mod suggestions;

pub use enrich::{
    build_grade_report, enrich_assessment, grade_assessment, Enrichment, GradeReport, LetterGrades,
};
pub use extract::{extract_scores, ExtractedScores};
pub use schema::{migrate_legacy, AssessmentRecord, PrimaryDisplay, SchemaVersion};
