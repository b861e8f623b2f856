//! Findings produced by one evaluation of a proposal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarKey;
use crate::time::TimeWindow;

/// Whether a finding blocks saving because of bad input or because of a
/// double booking. The form renders both the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    ValidationError,
    Conflict,
}

/// The overlapping pair behind a conflict finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetail {
    /// Calendar key both windows sit under, e.g. `2025-06-28` or `monday`.
    #[serde(with = "key_string")]
    pub key: CalendarKey,
    pub proposed: TimeWindow,
    pub existing: TimeWindow,
    pub overlap_minutes: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub kind: FindingKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ConflictDetail>,
}

/// Ordered, de-duplicated findings. Insertion order is kept; a finding whose
/// message was already recorded is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Finding>", into = "Vec<Finding>")]
pub struct ConflictReport {
    findings: Vec<Finding>,
    seen: HashSet<String>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report holding a single validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.push(Finding {
            kind: FindingKind::ValidationError,
            message: message.into(),
            detail: None,
        });
        report
    }

    /// Record a finding. Returns `false` when an identical message was already present.
    pub fn push(&mut self, finding: Finding) -> bool {
        if !self.seen.insert(finding.message.clone()) {
            return false;
        }
        self.findings.push(finding);
        true
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// The plain messages, in report order, as the form displays them.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.findings.iter().map(|f| f.message.as_str())
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.kind == FindingKind::Conflict)
    }

    pub fn has_validation_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.kind == FindingKind::ValidationError)
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }
}

impl From<Vec<Finding>> for ConflictReport {
    fn from(findings: Vec<Finding>) -> Self {
        let mut report = ConflictReport::new();
        for finding in findings {
            report.push(finding);
        }
        report
    }
}

impl From<ConflictReport> for Vec<Finding> {
    fn from(report: ConflictReport) -> Self {
        report.findings
    }
}

mod key_string {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::calendar::CalendarKey;

    pub fn serialize<S: Serializer>(key: &CalendarKey, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(key)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<CalendarKey, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
