use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MAX_ACTOR_AGE: i32 = 150;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateActor {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

impl CreateActor {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_age(self.age)?;
        require_text("gender", &self.gender)
    }
}

/// Updates replace the whole record, so they carry every field a create does.
pub type UpdateActor = CreateActor;

pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_age(age: i32) -> Result<()> {
    if !(0..=MAX_ACTOR_AGE).contains(&age) {
        return Err(Error::Validation(format!(
            "age must be between 0 and {MAX_ACTOR_AGE}"
        )));
    }
    Ok(())
}
