use chrono::{Days, NaiveDate};
use serde::Deserialize;

use super::error::ApiError;
use crate::pipeline::{CommentQuery, TimeWindow};

const DEFAULT_COMMENTS_LIMIT: u32 = 25;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw query string of `/subfeddit_comments`. Everything arrives as text so
/// that bad input turns into a `400` with a `detail` instead of a framework
/// rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CommentsParams {
    pub subfeddit: Option<String>,
    pub time_range: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sorted_results: Option<String>,
    pub comments_limit: Option<String>,
}

impl CommentsParams {
    /// Checks everything that does not need the backend.
    pub fn validate(
        &self,
        today: NaiveDate,
        default_lookback_days: u32,
    ) -> Result<CommentQuery, ApiError> {
        let subfeddit_id = match present(&self.subfeddit) {
            None => return Err(ApiError::validation("subfeddit is required")),
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| ApiError::validation("subfeddit must be an integer"))?,
        };
        if subfeddit_id < 0 {
            return Err(ApiError::validation("Subfeddit does not exist"));
        }

        let limit = match present(&self.comments_limit) {
            None => DEFAULT_COMMENTS_LIMIT,
            Some(raw) => non_negative(raw, "comments_limit", "Comments limit")?,
        };

        let relative = present(&self.time_range)
            .map(|raw| non_negative(raw, "time_range", "Time range"))
            .transpose()?;

        let start = present(&self.start_date)
            .map(|raw| parse_date(raw, "start_date"))
            .transpose()?;
        let end = present(&self.end_date)
            .map(|raw| parse_date(raw, "end_date"))
            .transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            check_date_order(start, end)?;
        }

        let window = match (relative, start, end) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(ApiError::validation(
                    "time_range cannot be combined with start_date/end_date",
                ));
            }
            (Some(minutes), None, None) => TimeWindow::LastMinutes(minutes),
            (None, None, None) => TimeWindow::All,
            (None, start, end) => {
                let end = end.unwrap_or(today);
                let start = start.unwrap_or_else(|| {
                    end.checked_sub_days(Days::new(u64::from(default_lookback_days)))
                        .unwrap_or(NaiveDate::MIN)
                });
                check_date_order(start, end)?;
                TimeWindow::Dates { start, end }
            }
        };

        let sorted = match present(&self.sorted_results) {
            None => false,
            Some(raw) => parse_bool(raw)
                .ok_or_else(|| ApiError::validation("sorted_results must be a boolean"))?,
        };

        Ok(CommentQuery {
            subfeddit_id,
            window,
            sorted,
            limit,
        })
    }
}

/// Valid ids are `0..count`.
pub fn check_subfeddit(subfeddit_id: i64, count: usize) -> Result<(), ApiError> {
    let in_range = usize::try_from(subfeddit_id)
        .map(|id| id < count)
        .unwrap_or(false);
    if in_range {
        Ok(())
    } else {
        Err(ApiError::validation("Subfeddit does not exist"))
    }
}

fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ApiError> {
    if start > end {
        Err(ApiError::validation("start_date must not be later than end_date"))
    } else {
        Ok(())
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn non_negative(raw: &str, name: &str, label: &str) -> Result<u32, ApiError> {
    let value = raw
        .parse::<i64>()
        .map_err(|_| ApiError::validation(format!("{} must be an integer", name)))?;
    if value < 0 {
        return Err(ApiError::validation(format!(
            "{} must be greater than or equal to 0",
            label
        )));
    }
    u32::try_from(value).map_err(|_| ApiError::validation(format!("{} is too large", name)))
}

fn parse_date(raw: &str, name: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ApiError::validation(format!("The format of the {} is not correct", name)))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}
