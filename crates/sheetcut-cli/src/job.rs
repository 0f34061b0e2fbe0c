//! Job file loading.
//!
//! A job file is TOML holding the sheet, the elements to cut and,
//! optionally, placements from an earlier optimizer run:
//!
//! ```toml
//! [sheet]
//! width = 2000
//! height = 1000
//!
//! [[elements]]
//! id = 1
//! width = 600
//! height = 400
//! category = "door"
//!
//! [[placements]]
//! id = 1
//! x = 0
//! y = 0
//! width = 600
//! height = 400
//! ```

use std::{collections::HashSet, fs, ops::Range, path::Path};

use log::debug;
use serde::Deserialize;

use sheetcut::{
    SheetcutError,
    element::{ElementSpec, Sheet},
    placement::Placement,
    session::CutSession,
};

/// A parsed job file.
#[derive(Debug, Deserialize)]
pub struct Job {
    #[serde(default)]
    sheet: Sheet,
    #[serde(default)]
    elements: Vec<ElementSpec>,
    #[serde(default)]
    placements: Vec<Placement>,
}

impl Job {
    /// Reads and parses the job file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetcutError::Io`] if the file cannot be read and
    /// [`SheetcutError::Job`] if it is not a valid job.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SheetcutError> {
        let source = fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Parses a job from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`SheetcutError::Job`] for malformed TOML and for element ids
    /// that appear more than once.
    pub fn parse(source: &str) -> Result<Self, SheetcutError> {
        let job: Job = toml::from_str(source).map_err(|err| {
            SheetcutError::new_job_error(err.message(), err.span(), source)
        })?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = job.elements.iter().find(|element| !seen.insert(element.id())) {
            let message = format!("duplicate element id {}", duplicate.id());
            let span = find_id_span(source, duplicate.id().value());
            return Err(SheetcutError::new_job_error(message, span, source));
        }

        debug!(
            elements = job.elements.len(),
            placements = job.placements.len();
            "Job parsed"
        );
        Ok(job)
    }

    pub fn sheet(&self) -> Sheet {
        self.sheet
    }

    pub fn elements(&self) -> &[ElementSpec] {
        &self.elements
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Turns the job into an editing session holding its placements.
    pub fn into_session(self) -> CutSession {
        let mut session = CutSession::from_elements(self.sheet, self.elements);
        session.set_placements(self.placements);
        session
    }
}

/// Locates the second `id = <id>` line inside `[[elements]]` tables, where a
/// duplicate element shows up. Trailing comments are not part of the span.
fn find_id_span(source: &str, id: u64) -> Option<Range<usize>> {
    let expected = id.to_string();
    let mut offset = 0;
    let mut occurrences = 0;
    let mut in_elements = false;

    for line in source.split_inclusive('\n') {
        let content = line.split('#').next().unwrap_or_default().trim();

        if content.starts_with('[') {
            in_elements = content == "[[elements]]";
        } else if in_elements {
            let value = content
                .strip_prefix("id")
                .and_then(|rest| rest.trim_start().strip_prefix('='))
                .map(str::trim);

            if value == Some(expected.as_str()) {
                occurrences += 1;
                if occurrences == 2 {
                    let start = offset + (line.len() - line.trim_start().len());
                    return Some(start..start + content.len());
                }
            }
        }
        offset += line.len();
    }
    None
}
