use super::score::Score;
use super::year_month::YearMonth;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    #[default]
    PendingSelf,
    PendingLeader,
    Completed,
}

impl PerformanceStatus {
    /// Position in the review lifecycle; never decreases for a given record.
    pub fn rank(&self) -> u8 {
        match self {
            PerformanceStatus::PendingSelf => 0,
            PerformanceStatus::PendingLeader => 1,
            PerformanceStatus::Completed => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceStatus::PendingSelf => "pending_self",
            PerformanceStatus::PendingLeader => "pending_leader",
            PerformanceStatus::Completed => "completed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "pending_self" | "self" => Some(PerformanceStatus::PendingSelf),
            "pending_leader" | "leader" => Some(PerformanceStatus::PendingLeader),
            "completed" | "done" => Some(PerformanceStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceStatus::PendingSelf => "Awaiting self-assessment",
            PerformanceStatus::PendingLeader => "Awaiting leader",
            PerformanceStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly review of one employee, keyed by `(employee_id, year_month)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub id: u32,
    pub employee_id: u32,
    pub year_month: YearMonth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_submitted_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_assessed_at: Option<NaiveDateTime>,
    /// Leader score saved ahead of batch approval. Not part of the assessment
    /// until the review is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staged_leader_score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staged_leader_comment: Option<String>,
    #[serde(default)]
    pub status: PerformanceStatus,
}

impl PerformanceRecord {
    pub fn new(id: u32, employee_id: u32, year_month: YearMonth) -> Self {
        Self {
            id,
            employee_id,
            year_month,
            self_score: None,
            self_comment: None,
            self_submitted_at: None,
            leader_score: None,
            leader_comment: None,
            leader_id: None,
            leader_assessed_at: None,
            staged_leader_score: None,
            staged_leader_comment: None,
            status: PerformanceStatus::PendingSelf,
        }
    }

    pub fn is_key(&self, employee_id: u32, year_month: YearMonth) -> bool {
        self.employee_id == employee_id && self.year_month == year_month
    }

    /// Score a batch approval would use: the staged leader score, falling
    /// back to the self score.
    pub fn effective_score(&self) -> Option<Score> {
        self.staged_leader_score.or(self.self_score)
    }
}
