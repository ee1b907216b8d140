//! Batch construction of word entries and qstring mappings.
//!
//! Rows are processed independently; rejected rows are reported as
//! diagnostics and never consume ids. Ids are assigned afterwards by
//! enumerating the accepted rows, two per row: the POJ entry first, then the
//! Han entry.


use std::fmt;

use tracing::{debug_span, info, warn};

use crate::poj::TranslitError;
use crate::qstring::get_qstrings;
use crate::reconcile::{reconcile, ReconcileError};
use crate::settings::{BuildSettings, ReadingColumn};

/// Weight stored with every word entry.
pub const DEFAULT_PROBABILITY: i64 = 1;

/// One source record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRow {
    /// 1-based line in the source file, 0 when unknown.
    pub line: u64,
    pub original: String,
    pub corrected: String,
    pub han: String,
}

impl DictionaryRow {
    pub fn new(original: &str, corrected: &str, han: &str) -> Self {
        Self {
            line: 0,
            original: original.to_string(),
            corrected: corrected.to_string(),
            han: han.to_string(),
        }
    }

    /// The column stored as `reading` and used for qstrings.
    pub fn reading(&self, column: ReadingColumn) -> &str {
        match column {
            ReadingColumn::Original => &self.original,
            ReadingColumn::Corrected => &self.corrected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub id: i64,
    pub reading: String,
    pub value: String,
    pub probability: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QStringMapping {
    pub qstring: String,
    pub word_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Original and corrected readings split into different segment counts.
    SegmentCountMismatch { original: usize, corrected: usize },
    /// A tone digit on a segment with no tone-bearing letter.
    MalformedSyllable { segment: usize, syllable: String },
    /// An unchanged segment was empty. The row is still accepted.
    EmptyMatchedSegment { segment: usize },
}

impl DiagnosticKind {
    /// Whether the row carrying this diagnostic is rejected.
    pub fn rejects_row(&self) -> bool {
        !matches!(self, Self::EmptyMatchedSegment { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SegmentCountMismatch { .. } => "segment-count-mismatch",
            Self::MalformedSyllable { .. } => "malformed-syllable",
            Self::EmptyMatchedSegment { .. } => "empty-matched-segment",
        }
    }
}

impl From<ReconcileError> for DiagnosticKind {
    fn from(e: ReconcileError) -> Self {
        match e {
            ReconcileError::SegmentCountMismatch {
                original,
                corrected,
            } => Self::SegmentCountMismatch {
                original,
                corrected,
            },
            ReconcileError::Translit {
                index,
                source: TranslitError::MalformedSyllable { syllable },
            } => Self::MalformedSyllable {
                segment: index,
                syllable,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    pub line: u64,
    pub kind: DiagnosticKind,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            DiagnosticKind::SegmentCountMismatch {
                original,
                corrected,
            } => write!(
                f,
                "segment count mismatch (original {original}, corrected {corrected})"
            ),
            DiagnosticKind::MalformedSyllable { segment, syllable } => {
                write!(f, "malformed syllable {syllable:?} in segment {segment}")
            }
            DiagnosticKind::EmptyMatchedSegment { segment } => {
                write!(f, "empty segment {segment}")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("row rejected: {0}")]
    RowRejected(RowDiagnostic),
}

/// Everything the store needs, plus what happened along the way.
#[derive(Debug, Default)]
pub struct BuildOutput {
    pub words: Vec<WordEntry>,
    /// Sorted by qstring, ties in insertion order.
    pub mappings: Vec<QStringMapping>,
    pub diagnostics: Vec<RowDiagnostic>,
    pub rows_read: usize,
    pub rows_rejected: usize,
}

/// A row that passed reconciliation, before ids are assigned.
#[derive(Debug)]
struct AcceptedRow<'a> {
    reading: &'a str,
    poj: String,
    han: &'a str,
    qstrings: Vec<String>,
}

fn accept_row<'a>(
    row: &'a DictionaryRow,
    column: ReadingColumn,
    diagnostics: &mut Vec<RowDiagnostic>,
) -> Result<AcceptedRow<'a>, RowDiagnostic> {
    let reconciled = reconcile(&row.original, &row.corrected).map_err(|e| RowDiagnostic {
        line: row.line,
        kind: e.into(),
    })?;
    for segment in reconciled.empty {
        diagnostics.push(RowDiagnostic {
            line: row.line,
            kind: DiagnosticKind::EmptyMatchedSegment { segment },
        });
    }
    let reading = row.reading(column);
    Ok(AcceptedRow {
        reading,
        poj: reconciled.poj,
        han: &row.han,
        qstrings: get_qstrings(reading),
    })
}

/// Word entries for one accepted row, starting at `first_id`.
fn row_entries(row: AcceptedRow<'_>, first_id: i64) -> ([WordEntry; 2], Vec<String>) {
    let words = [
        WordEntry {
            id: first_id,
            reading: row.reading.to_string(),
            value: row.poj,
            probability: DEFAULT_PROBABILITY,
        },
        WordEntry {
            id: first_id + 1,
            reading: row.reading.to_string(),
            value: row.han.to_string(),
            probability: DEFAULT_PROBABILITY,
        },
    ];
    (words, row.qstrings)
}

/// Build all entries for `rows`.
///
/// Per-row problems are collected in [`BuildOutput::diagnostics`]. With
/// `fail_on_row_error` set, the first rejected row aborts the build instead.
pub fn build_entries(
    rows: &[DictionaryRow],
    settings: &BuildSettings,
) -> Result<BuildOutput, BuildError> {
    let _span = debug_span!("build_entries", rows = rows.len()).entered();

    let mut out = BuildOutput {
        rows_read: rows.len(),
        ..Default::default()
    };

    let mut accepted = Vec::with_capacity(rows.len());
    for row in rows {
        match accept_row(row, settings.reading, &mut out.diagnostics) {
            Ok(a) => accepted.push(a),
            Err(diag) => {
                if settings.fail_on_row_error {
                    return Err(BuildError::RowRejected(diag));
                }
                warn!(line = diag.line, kind = diag.kind.label(), "{diag}");
                out.diagnostics.push(diag);
                out.rows_rejected += 1;
            }
        }
    }

    for diag in out.diagnostics.iter().filter(|d| !d.kind.rejects_row()) {
        warn!(line = diag.line, kind = diag.kind.label(), "{diag}");
    }

    out.words.reserve(accepted.len() * 2);
    for (k, row) in accepted.into_iter().enumerate() {
        let first_id = 2 * k as i64 + 1;
        let (words, qstrings) = row_entries(row, first_id);
        for word in &words {
            out.mappings
                .extend(qstrings.iter().map(|q| QStringMapping {
                    qstring: q.clone(),
                    word_id: word.id,
                }));
        }
        out.words.extend(words);
    }

    // Stable: equal qstrings keep id order.
    out.mappings.sort_by(|a, b| a.qstring.cmp(&b.qstring));

    info!(
        rows = out.rows_read,
        rejected = out.rows_rejected,
        words = out.words.len(),
        mappings = out.mappings.len(),
        "built entries"
    );
    Ok(out)
}
