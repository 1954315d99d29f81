use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{normalize_token, Course};

/// Read-only lookup of courses. The engine takes at most one point lookup and
/// one full snapshot per request; consistency across those reads is the
/// implementation's concern.
pub trait CatalogRepository: Send + Sync {
    fn course(&self, name: &str) -> Result<Option<Course>, CatalogError>;
    fn all_courses(&self) -> Result<Vec<Course>, CatalogError>;
}

/// Infrastructure failure while reaching the catalog. Distinct from any
/// rejection verdict: an unreachable catalog is a fault, not a decision.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while building a catalog from administrative input.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog source: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog row: {0}")]
    Csv(#[from] csv::Error),
    #[error("course '{0}' declared more than once")]
    DuplicateCourse(String),
    #[error("course '{0}' has an empty required subject list")]
    EmptySubjects(String),
    #[error("course '{course}' has minimum average {value} outside 0..=100")]
    InvalidAverage { course: String, value: u8 },
}

/// In-memory catalog keyed by normalized course name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    courses: BTreeMap<String, Course>,
}

impl InMemoryCatalog {
    /// Build a catalog from administrative course entries, normalizing names
    /// and rejecting duplicates or structurally invalid courses.
    pub fn from_courses(
        courses: impl IntoIterator<Item = Course>,
    ) -> Result<Self, CatalogImportError> {
        let mut map = BTreeMap::new();
        for course in courses {
            let name = normalize_token(&course.name);
            let required_subjects: BTreeSet<String> = course
                .required_subjects
                .iter()
                .map(|subject| normalize_token(subject))
                .collect();

            if required_subjects.is_empty() {
                return Err(CatalogImportError::EmptySubjects(name));
            }
            if course.minimum_average > 100 {
                return Err(CatalogImportError::InvalidAverage {
                    course: name,
                    value: course.minimum_average,
                });
            }

            let normalized = Course {
                name: name.clone(),
                required_subjects,
                qualifying_exam: course
                    .qualifying_exam
                    .as_deref()
                    .and_then(parse_exam_field),
                minimum_average: course.minimum_average,
            };

            if map.insert(name.clone(), normalized).is_some() {
                return Err(CatalogImportError::DuplicateCourse(name));
            }
        }

        Ok(Self { courses: map })
    }

    /// Built-in seed catalog covering the standard six-subject domain, used by
    /// the server when no catalog file is configured and by the CLI demo.
    pub fn standard() -> Self {
        let mut courses = BTreeMap::new();
        for (name, subjects, exam, minimum_average) in [
            ("ENGINEERING", &["PHYSICS", "CHEMISTRY", "MATHS"][..], Some("CET"), 75),
            ("MEDICINE", &["PHYSICS", "CHEMISTRY", "BIOLOGY"][..], Some("NEET"), 80),
            ("COMPUTER APPLICATIONS", &["MATHS", "COMPUTER SCIENCE"][..], None, 65),
            ("SCIENCE", &["PHYSICS", "CHEMISTRY"][..], None, 55),
            ("ARTS", &["ENGLISH"][..], None, 40),
        ] {
            courses.insert(
                name.to_string(),
                Course {
                    name: name.to_string(),
                    required_subjects: subjects.iter().map(|s| s.to_string()).collect(),
                    qualifying_exam: exam.map(str::to_string),
                    minimum_average,
                },
            );
        }
        Self { courses }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn course(&self, name: &str) -> Result<Option<Course>, CatalogError> {
        Ok(self.courses.get(&normalize_token(name)).cloned())
    }

    fn all_courses(&self) -> Result<Vec<Course>, CatalogError> {
        Ok(self.courses.values().cloned().collect())
    }
}

/// Importer for administrative catalog exports in CSV form.
///
/// Expected header: `NAME,REQUIRED_SUBJECTS,QUALIFY_EXAM,MIN_AVERAGE` with
/// subjects separated by `|` and `NONE`/`NA` marking courses without an exam
/// prerequisite.
pub struct CsvCatalogImporter;

impl CsvCatalogImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<InMemoryCatalog, CatalogImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<InMemoryCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut courses = Vec::new();
        for record in csv_reader.deserialize::<CourseRow>() {
            let row = record?;
            courses.push(Course {
                name: row.name,
                required_subjects: row
                    .required_subjects
                    .split('|')
                    .map(normalize_token)
                    .filter(|subject| !subject.is_empty())
                    .collect(),
                qualifying_exam: parse_exam_field(&row.qualify_exam),
                minimum_average: row.min_average,
            });
        }

        InMemoryCatalog::from_courses(courses)
    }
}

fn parse_exam_field(raw: &str) -> Option<String> {
    let normalized = normalize_token(raw);
    match normalized.as_str() {
        "" | "NONE" | "NA" => None,
        _ => Some(normalized),
    }
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "REQUIRED_SUBJECTS")]
    required_subjects: String,
    #[serde(rename = "QUALIFY_EXAM", default)]
    qualify_exam: String,
    #[serde(rename = "MIN_AVERAGE")]
    min_average: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_import_builds_normalized_catalog() {
        let data = "\
NAME,REQUIRED_SUBJECTS,QUALIFY_EXAM,MIN_AVERAGE
engineering,physics|chemistry|maths,CET,75
arts,english,NONE,40
";
        let catalog = CsvCatalogImporter::from_reader(data.as_bytes()).expect("imports");
        assert_eq!(catalog.len(), 2);

        let engineering = catalog
            .course("Engineering")
            .expect("lookup succeeds")
            .expect("course present");
        assert_eq!(engineering.qualifying_exam.as_deref(), Some("CET"));
        assert!(engineering.required_subjects.contains("PHYSICS"));

        let arts = catalog
            .course("ARTS")
            .expect("lookup succeeds")
            .expect("course present");
        assert_eq!(arts.qualifying_exam, None);
    }

    #[test]
    fn csv_import_rejects_duplicate_courses() {
        let data = "\
NAME,REQUIRED_SUBJECTS,QUALIFY_EXAM,MIN_AVERAGE
ARTS,ENGLISH,NONE,40
arts,ENGLISH,NONE,45
";
        match CsvCatalogImporter::from_reader(data.as_bytes()) {
            Err(CatalogImportError::DuplicateCourse(name)) => assert_eq!(name, "ARTS"),
            other => panic!("expected duplicate course error, got {other:?}"),
        }
    }

    #[test]
    fn csv_import_rejects_empty_subject_lists() {
        let data = "\
NAME,REQUIRED_SUBJECTS,QUALIFY_EXAM,MIN_AVERAGE
ARTS,,NONE,40
";
        match CsvCatalogImporter::from_reader(data.as_bytes()) {
            Err(CatalogImportError::EmptySubjects(name)) => assert_eq!(name, "ARTS"),
            other => panic!("expected empty subjects error, got {other:?}"),
        }
    }

    #[test]
    fn na_sentinel_means_no_exam() {
        let data = "\
NAME,REQUIRED_SUBJECTS,QUALIFY_EXAM,MIN_AVERAGE
SCIENCE,PHYSICS|CHEMISTRY,NA,55
";
        let catalog = CsvCatalogImporter::from_reader(data.as_bytes()).expect("imports");
        let science = catalog
            .course("SCIENCE")
            .expect("lookup succeeds")
            .expect("course present");
        assert_eq!(science.qualifying_exam, None);
    }

    #[test]
    fn standard_catalog_is_well_formed() {
        let catalog = InMemoryCatalog::standard();
        assert!(!catalog.is_empty());
        for course in catalog.all_courses().expect("snapshot") {
            assert!(!course.required_subjects.is_empty());
            assert!(course.minimum_average <= 100);
        }
    }
}
