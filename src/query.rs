//! Gmail search query construction for job-application emails

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{JobMailError, Result};

/// Phrases that roughly identify application confirmation emails.
/// Tune these to match what the emails in your accounts look like.
const JOB_PHRASES: &str = "(\"your application\" OR \"thanks for applying\" OR \"application received\" OR \"We received your application\")";

/// Categories excluded from the search
const EXCLUDED_CATEGORIES: &[&str] = &["-category:promotions", "-category:social"];

/// An immutable Gmail search query string
///
/// Built once per run and shared read-only by every account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the job-application search query against the current time
///
/// Exactly one of the two window arguments is authoritative:
/// - `start_date`, when given, is embedded verbatim as `after:<start_date>`.
///   It must look like `YYYY/MM/DD` or `YYYY-MM-DD`; anything else fails
///   with `InvalidArgument` rather than silently matching nothing.
/// - Otherwise `days_back` computes the lower bound from now.
/// - Neither given is an error.
pub fn build_job_query(days_back: Option<u32>, start_date: Option<&str>) -> Result<SearchQuery> {
    build_job_query_at(Utc::now(), days_back, start_date)
}

/// Build the query against an explicit reference time
///
/// Deterministic for a fixed `now`, which is what the tests rely on.
pub fn build_job_query_at(
    now: DateTime<Utc>,
    days_back: Option<u32>,
    start_date: Option<&str>,
) -> Result<SearchQuery> {
    let after = match (start_date, days_back) {
        (Some(date), _) => {
            validate_start_date(date)?;
            date.to_string()
        }
        (None, Some(days)) => {
            let since = now - Duration::days(i64::from(days));
            since.format("%Y/%m/%d").to_string()
        }
        (None, None) => {
            return Err(JobMailError::InvalidArgument(
                "either days_back or start_date must be provided".to_string(),
            ))
        }
    };

    let mut parts = vec![format!("after:{}", after), JOB_PHRASES.to_string()];
    parts.extend(EXCLUDED_CATEGORIES.iter().map(|c| c.to_string()));

    Ok(SearchQuery(parts.join(" ")))
}

/// Accept `YYYY/MM/DD` or `YYYY-MM-DD`; the value itself is passed through
/// verbatim, this only rejects dates Gmail would silently ignore.
fn validate_start_date(date: &str) -> Result<()> {
    let parsed = NaiveDate::parse_from_str(date, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"));

    match parsed {
        Ok(_) => Ok(()),
        Err(_) => Err(JobMailError::InvalidArgument(format!(
            "start_date {:?} is not in YYYY/MM/DD or YYYY-MM-DD format",
            date
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_query_is_deterministic_for_fixed_time() {
        let a = build_job_query_at(reference_time(), Some(365), None).unwrap();
        let b = build_job_query_at(reference_time(), Some(365), None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_days_back_computes_lower_bound() {
        let query = build_job_query_at(reference_time(), Some(30), None).unwrap();
        assert!(query.as_str().starts_with("after:2024/05/16"));
    }

    #[test]
    fn test_start_date_used_verbatim() {
        let query = build_job_query_at(reference_time(), Some(365), Some("2024/01/01")).unwrap();
        assert!(query.as_str().contains("after:2024/01/01"));
        // The days_back-derived date must not appear anywhere.
        assert!(!query.as_str().contains("2023/06/16"));
    }

    #[test]
    fn test_start_date_dashed_format_accepted() {
        let query = build_job_query_at(reference_time(), None, Some("2024-01-01")).unwrap();
        assert!(query.as_str().contains("after:2024-01-01"));
    }

    #[test]
    fn test_neither_argument_is_invalid() {
        let err = build_job_query_at(reference_time(), None, None).unwrap_err();
        assert!(matches!(err, JobMailError::InvalidArgument(_)));
    }

    #[test]
    fn test_malformed_start_date_is_invalid() {
        for bad in ["yesterday", "2024/13/41", "01/01/2024", "2024", ""] {
            let err = build_job_query_at(reference_time(), None, Some(bad)).unwrap_err();
            assert!(
                matches!(err, JobMailError::InvalidArgument(_)),
                "expected InvalidArgument for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_fixed_predicates_present() {
        let query = build_job_query_at(reference_time(), Some(90), None).unwrap();
        let q = query.as_str();
        assert!(q.contains("\"your application\""));
        assert!(q.contains("\"thanks for applying\""));
        assert!(q.contains("\"application received\""));
        assert!(q.contains("\"We received your application\""));
        assert!(q.contains("-category:promotions"));
        assert!(q.contains("-category:social"));
    }
}
