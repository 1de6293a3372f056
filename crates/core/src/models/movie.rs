use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::actor::require_text;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub release_date: NaiveDate,
}

impl CreateMovie {
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)
    }
}

/// Updates replace the whole record, so they carry every field a create does.
pub type UpdateMovie = CreateMovie;
