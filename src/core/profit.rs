//! Profit check approval workflow
//!
//! A check starts `pending` and moves exactly once, to `approved` or
//! `rejected`. Storage enforces the same rule with a conditional UPDATE.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ProfitStatus {
    Pending,
    Approved,
    Rejected,
}

/// Admin verdict on a pending check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target_status(self) -> ProfitStatus {
        match self {
            Self::Approve => ProfitStatus::Approved,
            Self::Reject => ProfitStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("profit check #{0} not found")]
    NotFound(i64),
    #[error("profit check #{id} is already {status}")]
    AlreadyProcessed { id: i64, status: ProfitStatus },
    #[error("unknown profit check status {0:?}")]
    UnknownStatus(String),
}

/// A submitted profit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfitCheck {
    pub id: i64,
    pub user_id: i64,
    pub amount: i64,
    pub photo_file_id: Option<String>,
    pub status: ProfitStatus,
    pub created_at: String,
    pub processed_at: Option<String>,
}

impl ProfitStatus {
    pub fn parse(raw: &str) -> Result<Self, WorkflowError> {
        Self::from_str(raw).map_err(|_| WorkflowError::UnknownStatus(raw.to_string()))
    }

    pub fn is_final(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Validates a transition and returns the status the check moves to.
pub fn decide(check: &ProfitCheck, decision: Decision) -> Result<ProfitStatus, WorkflowError> {
    if check.status.is_final() {
        return Err(WorkflowError::AlreadyProcessed {
            id: check.id,
            status: check.status,
        });
    }
    Ok(decision.target_status())
}

/// Aggregated approved profits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfitTotals {
    pub count: i64,
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(status: ProfitStatus) -> ProfitCheck {
        ProfitCheck {
            id: 7,
            user_id: 42,
            amount: 15000,
            photo_file_id: Some("AgACAgIAAx0".to_string()),
            status,
            created_at: "2026-10-01 10:00:00".to_string(),
            processed_at: None,
        }
    }

    #[test]
    fn test_pending_check_can_be_decided() {
        assert_eq!(decide(&check(ProfitStatus::Pending), Decision::Approve), Ok(ProfitStatus::Approved));
        assert_eq!(decide(&check(ProfitStatus::Pending), Decision::Reject), Ok(ProfitStatus::Rejected));
    }

    #[test]
    fn test_processed_check_is_final() {
        let err = decide(&check(ProfitStatus::Approved), Decision::Reject).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::AlreadyProcessed {
                id: 7,
                status: ProfitStatus::Approved
            }
        );
        assert_eq!(err.to_string(), "profit check #7 is already approved");
    }

    #[test]
    fn test_status_round_trips_through_storage_text() {
        assert_eq!(ProfitStatus::parse("rejected"), Ok(ProfitStatus::Rejected));
        assert_eq!(ProfitStatus::Pending.as_ref(), "pending");
        assert!(matches!(ProfitStatus::parse("lost"), Err(WorkflowError::UnknownStatus(_))));
    }
}
