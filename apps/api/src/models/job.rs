use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub slug: Option<String>,
    pub department: Option<String>,
    pub location: String,
    pub job_type: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<Json<SalaryRange>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed set of job types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub const ALL: &'static [&'static str] =
        &["full-time", "part-time", "contract", "internship", "remote"];

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "full-time" => Ok(JobType::FullTime),
            "part-time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "internship" => Ok(JobType::Internship),
            "remote" => Ok(JobType::Remote),
            other => Err(AppError::Validation(format!(
                "invalid job type '{other}', expected one of: {}",
                Self::ALL.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
            JobType::Remote => "remote",
        }
    }
}

/// Posting lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Open,
    Closed,
}

impl JobStatus {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "open" => Ok(JobStatus::Open),
            "closed" => Ok(JobStatus::Closed),
            other => Err(AppError::Validation(format!(
                "invalid status '{other}', expected 'open' or 'closed'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_round_trips_all_variants() {
        for name in JobType::ALL {
            let parsed = JobType::parse(name).unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
    }

    #[test]
    fn test_job_type_rejects_unknown_and_cased_input() {
        assert!(matches!(
            JobType::parse("freelance"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            JobType::parse("Full-time"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_job_status_parses_both_states() {
        assert_eq!(JobStatus::parse("open").unwrap(), JobStatus::Open);
        assert_eq!(JobStatus::parse("closed").unwrap(), JobStatus::Closed);
        assert!(matches!(
            JobStatus::parse("archived"),
            Err(AppError::Validation(_))
        ));
    }
}
