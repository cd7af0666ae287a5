use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A search for articles about one entity over an inclusive date range.
///
/// Validated once in [`Query::new`]; there are no setters, so a `Query` that
/// exists always has a non-empty entity and `start_date <= end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    entity: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    extra_terms: Vec<String>,
}

impl Query {
    pub fn new(
        entity: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        extra_terms: Vec<String>,
    ) -> Result<Self> {
        let entity = entity.into().trim().to_string();
        if entity.is_empty() {
            return Err(Error::InvalidQuery("entity must not be empty".to_string()));
        }
        if start_date > end_date {
            return Err(Error::InvalidQuery(format!(
                "start date {} is after end date {}",
                start_date, end_date
            )));
        }

        let extra_terms = extra_terms
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Self {
            entity,
            start_date,
            end_date,
            extra_terms,
        })
    }

    /// Window of `frame` ending on `today`.
    pub fn trailing(
        entity: impl Into<String>,
        frame: TimeFrame,
        today: NaiveDate,
        extra_terms: Vec<String>,
    ) -> Result<Self> {
        let start = today - Duration::days(frame.days());
        Self::new(entity, start, today, extra_terms)
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn extra_terms(&self) -> &[String] {
        &self.extra_terms
    }

    /// Entity followed by the extra terms, space separated.
    pub fn search_string(&self) -> String {
        std::iter::once(self.entity.as_str())
            .chain(self.extra_terms.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How far back a trailing query looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Week,
    Month,
}

impl TimeFrame {
    pub fn days(self) -> i64 {
        match self {
            TimeFrame::Week => 7,
            TimeFrame::Month => 30,
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFrame::Week => write!(f, "week"),
            TimeFrame::Month => write!(f, "month"),
        }
    }
}

impl FromStr for TimeFrame {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "one week" | "1w" => Ok(TimeFrame::Week),
            "month" | "one month" | "1m" => Ok(TimeFrame::Month),
            other => Err(Error::InvalidQuery(format!("unknown time frame: {}", other))),
        }
    }
}
