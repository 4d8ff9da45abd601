//! # Document Numbering
//!
//! Sequential, human-readable document numbers for mission authorizations
//! (`MA-<year>-<seq>`) and reports (`RPT-<yyyymm>-<seq>`). The next
//! sequence is derived from the highest existing number under the period
//! prefix, so deleting the latest document never reissues an older number
//! out of order and gaps from deletions are tolerated.
//!
//! Allocation is optimistic: callers insert with the candidate number and
//! retry on a unique-index violation, up to [`MAX_NUMBER_ATTEMPTS`] times.

use chrono::{Datelike, NaiveDate};
use error::AppError;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};

use crate::ServerResult;

/// Maximum insert attempts before giving up on a contended number.
pub const MAX_NUMBER_ATTEMPTS: usize = 5;

/// Width of the zero-padded sequence component.
const SEQ_WIDTH: usize = 4;

/// Prefix for mission authorization numbers in the given year.
#[must_use]
pub fn authorization_prefix(year: i32) -> String { format!("MA-{year}-") }

/// Prefix for report numbers in the given year and month.
#[must_use]
pub fn report_prefix(year: i32, month: u32) -> String { format!("RPT-{year}{month:02}-") }

/// Formats a full document number from a prefix and sequence value.
#[must_use]
pub fn format_number(prefix: &str, seq: u32) -> String { format!("{prefix}{seq:0width$}", width = SEQ_WIDTH) }

/// Computes the next sequence value from the existing numbers under a
/// prefix. Numbers that do not parse are ignored rather than failing the
/// allocation.
#[must_use]
pub fn next_sequence<'a>(existing: impl IntoIterator<Item = &'a str>, prefix: &str) -> u32 {
    existing
        .into_iter()
        .filter_map(|number| number.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .map_or(1, |max| max + 1)
}

/// Proposes the next mission authorization number for the given date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn next_authorization_number<C: ConnectionTrait>(db: &C, today: NaiveDate) -> ServerResult<String> {
    let prefix = authorization_prefix(today.year());

    let numbers: Vec<String> = entity::mission_authorizations::Entity::find()
        .select_only()
        .column(entity::mission_authorizations::Column::AuthorizationNumber)
        .filter(entity::mission_authorizations::Column::AuthorizationNumber.starts_with(&prefix))
        .into_tuple()
        .all(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Scanning authorization numbers"))?;

    let seq = next_sequence(numbers.iter().map(String::as_str), &prefix);
    Ok(format_number(&prefix, seq))
}

/// Proposes the next report number for the given date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn next_report_number<C: ConnectionTrait>(db: &C, today: NaiveDate) -> ServerResult<String> {
    let prefix = report_prefix(today.year(), today.month());

    let numbers: Vec<String> = entity::reports::Entity::find()
        .select_only()
        .column(entity::reports::Column::ReportNumber)
        .filter(entity::reports::Column::ReportNumber.starts_with(&prefix))
        .into_tuple()
        .all(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Scanning report numbers"))?;

    let seq = next_sequence(numbers.iter().map(String::as_str), &prefix);
    Ok(format_number(&prefix, seq))
}
