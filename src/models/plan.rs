use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

// ______________________________________ Stored rows ______________________________________
#[derive(Debug, Clone, FromRow)]
pub struct PlanDayRow {
    pub id: i64,
    pub user_id: i64,
    pub day_number: i64,
    pub feedback: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ExerciseRow {
    pub id: i64,
    pub plan_day_id: i64,
    pub position: i64,
    pub drill_name: String,
    pub weight: String,
    pub reps: String,
    pub sets: String,
    pub rest_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ______________________________________ Client documents ______________________________________
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub plan_day_id: i64,
    pub drill_name: String,
    pub weight: String,
    pub reps: String,
    pub sets: String,
    pub rest_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        Exercise {
            id: row.id,
            plan_day_id: row.plan_day_id,
            drill_name: row.drill_name,
            weight: row.weight,
            reps: row.reps,
            sets: row.sets,
            rest_time: row.rest_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDay {
    pub id: i64,
    pub user_id: i64,
    pub day_number: i64,
    pub feedback: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub exercises: Vec<Exercise>,
}

impl From<PlanDayRow> for PlanDay {
    fn from(row: PlanDayRow) -> Self {
        PlanDay {
            id: row.id,
            user_id: row.user_id,
            day_number: row.day_number,
            feedback: row.feedback,
            done: row.done,
            created_at: row.created_at,
            updated_at: row.updated_at,
            exercises: Vec::new(),
        }
    }
}

// ______________________________________ Admin submissions ______________________________________
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ExerciseInput {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub drill_name: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub weight: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub reps: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub sets: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub rest_time: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PlanDayInput {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub day_number: i64,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub feedback: Option<String>,
    /// Accepted for compatibility; completion is always derived from feedback.
    pub done: Option<bool>,
    #[validate(nested)]
    pub exercises: Vec<ExerciseInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[validate(schema(function = "unique_day_numbers"))]
pub struct SavePlanRequest {
    #[validate(nested)]
    pub days: Vec<PlanDayInput>,
}

fn unique_day_numbers(req: &SavePlanRequest) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    if req.days.iter().all(|d| seen.insert(d.day_number)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("duplicate_day_number");
        err.message = Some("must not repeat a day_number".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub feedback: String,
}

/// Completion is a function of feedback, never stored independently.
pub fn is_done(feedback: &str) -> bool {
    !feedback.trim().is_empty()
}
