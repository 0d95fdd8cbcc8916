//! Workout plans: relational day/exercise rows in, nested `day -> exercises[]`
//! documents out, and admin documents persisted back as a full replacement.

use std::collections::HashMap;

use chrono::Utc;

use crate::{
    db::DbPool,
    error::ApiError,
    models::{
        plan::{is_done, ExerciseRow, PlanDayInput, PlanDayRow},
        PlanDay, Principal,
    },
};

/// Nest exercises under their days, ordered by day number and then by
/// submission position.
///
/// Exercises are attached by `plan_day_id`; rows whose parent is not among
/// `days` are dropped.
pub fn assemble_plan(mut days: Vec<PlanDayRow>, mut exercises: Vec<ExerciseRow>) -> Vec<PlanDay> {
    days.sort_by_key(|d| (d.day_number, d.id));

    let mut plan: Vec<PlanDay> = Vec::with_capacity(days.len());
    let mut slot_by_id: HashMap<i64, usize> = HashMap::new();
    for row in days {
        if plan.last().is_some_and(|d| d.day_number == row.day_number) {
            log::warn!("Ignoring duplicate day {} (id {})", row.day_number, row.id);
            continue;
        }
        slot_by_id.insert(row.id, plan.len());
        plan.push(PlanDay::from(row));
    }

    exercises.sort_by_key(|e| (e.position, e.id));
    for row in exercises {
        match slot_by_id.get(&row.plan_day_id) {
            Some(&slot) => plan[slot].exercises.push(row.into()),
            None => log::warn!(
                "Dropping exercise {} for missing plan day {}",
                row.id,
                row.plan_day_id
            ),
        }
    }

    plan
}

/// A user's full plan; empty when the user has none.
///
/// Both reads share one transaction so a concurrent save is seen either
/// entirely or not at all.
pub async fn fetch_plan(db: &DbPool, user_id: i64) -> Result<Vec<PlanDay>, ApiError> {
    let mut tx = db.begin().await?;

    let days: Vec<PlanDayRow> = sqlx::query_as(
        r#"
        SELECT id, user_id, day_number, feedback, done, created_at, updated_at
          FROM plan_days
         WHERE user_id = ?1
         ORDER BY day_number ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    let exercises: Vec<ExerciseRow> = if days.is_empty() {
        Vec::new()
    } else {
        sqlx::query_as(
            r#"
            SELECT
                e.id,
                e.plan_day_id,
                e.position,
                e.drill_name,
                e.weight,
                e.reps,
                e.sets,
                e.rest_time,
                e.created_at,
                e.updated_at
            FROM exercises e
            JOIN plan_days d
              ON d.id = e.plan_day_id
            WHERE d.user_id = ?1
            ORDER BY d.day_number ASC, e.position ASC, e.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?
    };

    tx.commit().await?;

    Ok(assemble_plan(days, exercises))
}

/// Replace a user's plan with `days`, all or nothing.
pub async fn save_plan(
    db: &DbPool,
    principal: &Principal,
    user_id: i64,
    days: &[PlanDayInput],
) -> Result<(), ApiError> {
    principal.require_admin()?;

    let mut tx = db.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(ApiError::NotFound(format!("No user found with id {}", user_id)));
    }

    // exercises go with their days (ON DELETE CASCADE)
    sqlx::query("DELETE FROM plan_days WHERE user_id = ?1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let now = Utc::now();
    for day in days {
        let feedback = day.feedback.clone().unwrap_or_default();

        let day_id = sqlx::query(
            r#"
            INSERT INTO plan_days (user_id, day_number, feedback, done, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(user_id)
        .bind(day.day_number)
        .bind(&feedback)
        .bind(is_done(&feedback))
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for (position, exercise) in day.exercises.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO exercises
                  (plan_day_id, position, drill_name, weight, reps, sets, rest_time, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
                "#,
            )
            .bind(day_id)
            .bind(position as i64)
            .bind(&exercise.drill_name)
            .bind(&exercise.weight)
            .bind(&exercise.reps)
            .bind(&exercise.sets)
            .bind(&exercise.rest_time)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    log::info!("Saved plan for user {} ({} days)", user_id, days.len());
    Ok(())
}

/// Record a user's feedback on one of their own days.
pub async fn update_feedback(
    db: &DbPool,
    day_id: i64,
    user_id: i64,
    feedback: &str,
) -> Result<(), ApiError> {
    let result = sqlx::query(
        r#"
        UPDATE plan_days
           SET feedback   = ?1,
               done       = ?2,
               updated_at = ?3
         WHERE id      = ?4
           AND user_id = ?5
        "#,
    )
    .bind(feedback)
    .bind(is_done(feedback))
    .bind(Utc::now())
    .bind(day_id)
    .bind(user_id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::Forbidden(
            "Plan day not found or not owned by you".to_string(),
        ));
    }

    Ok(())
}
