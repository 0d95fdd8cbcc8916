use actix_web::{get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::ApiError,
    models::{Message, MessageRow, Principal},
    AppState,
};

const SELECT_MESSAGES: &str = r#"
    SELECT
        m.id,
        m.sender_id,
        m.receiver_id,
        m.body,
        m.is_read,
        m.created_at,
        u.email AS sender_email
    FROM messages m
    LEFT JOIN users u
      ON u.id = m.sender_id
"#;

async fn fetch_messages(
    app_state: &AppState,
    filter: &str,
    user_id: Option<i64>,
) -> Result<Vec<Message>, ApiError> {
    let sql = format!("{} {} ORDER BY m.created_at DESC, m.id DESC", SELECT_MESSAGES, filter);
    let mut query = sqlx::query_as::<_, MessageRow>(&sql);
    if let Some(id) = user_id {
        query = query.bind(id);
    }

    let rows = query.fetch_all(&app_state.db).await?;
    Ok(rows.into_iter().map(Message::from).collect())
}

// a user's thread with the coach, both directions
const CONVERSATION_FILTER: &str = r#"
    WHERE (m.sender_id IS NULL AND m.receiver_id = ?1)
       OR (m.sender_id = ?1 AND m.receiver_id IS NULL)
"#;

#[get("")]
pub async fn list_messages(
    app_state: web::Data<AppState>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    let messages = match *principal {
        Principal::Admin => fetch_messages(&app_state, "", None).await?,
        Principal::User { id } => fetch_messages(&app_state, CONVERSATION_FILTER, Some(id)).await?,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({ "messages": messages })))
}

#[get("/conversation/{userId}")]
pub async fn conversation(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    principal.require_admin()?;
    let user_id = path.into_inner();

    let messages = fetch_messages(&app_state, CONVERSATION_FILTER, Some(user_id)).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "messages": messages })))
}

#[get("/new")]
pub async fn unread_from_coach(
    app_state: web::Data<AppState>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    let user_id = principal.require_user()?;

    let messages = fetch_messages(
        &app_state,
        "WHERE m.sender_id IS NULL AND m.receiver_id = ?1 AND m.is_read = 0",
        Some(user_id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "messages": messages })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub receiver_id: Option<i64>,
    #[validate(length(min = 1, max = 5000, message = "must be 1-5000 characters"))]
    pub message: String,
}

#[post("")]
pub async fn send_message(
    app_state: web::Data<AppState>,
    principal: web::ReqData<Principal>,
    json_data: web::Json<SendMessageRequest>,
) -> actix_web::Result<impl Responder> {
    let req = json_data.into_inner();
    req.validate().map_err(ApiError::from)?;
    if req.message.trim().is_empty() {
        return Err(ApiError::Validation("message must not be blank".to_string()).into());
    }

    let sender = *principal;
    let receiver = match (sender, req.receiver_id) {
        (Principal::Admin, Some(id)) => {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?1")
                .bind(id)
                .fetch_optional(&app_state.db)
                .await
                .map_err(ApiError::from)?;
            if exists.is_none() {
                return Err(ApiError::NotFound(format!("No user found with id {}", id)).into());
            }
            Principal::User { id }
        }
        (Principal::Admin, None) => {
            return Err(ApiError::Validation("receiver_id is required".to_string()).into());
        }
        (Principal::User { .. }, None) => Principal::Admin,
        (Principal::User { .. }, Some(_)) => {
            return Err(ApiError::Validation(
                "Users can only message the coach; omit receiver_id".to_string(),
            )
            .into());
        }
    };

    let id = sqlx::query(
        r#"
        INSERT INTO messages (sender_id, receiver_id, body, is_read, created_at)
        VALUES (?1, ?2, ?3, 0, ?4)
        "#,
    )
    .bind(sender.as_user_id())
    .bind(receiver.as_user_id())
    .bind(&req.message)
    .bind(Utc::now())
    .execute(&app_state.db)
    .await
    .map_err(ApiError::from)?
    .last_insert_rowid();

    let row: MessageRow = sqlx::query_as(&format!("{} WHERE m.id = ?1", SELECT_MESSAGES))
        .bind(id)
        .fetch_one(&app_state.db)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Message sent successfully",
        "data": Message::from(row),
    })))
}

/// Only the receiving side may flip the read flag.
#[put("/{messageId}/read")]
pub async fn mark_read(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    let message_id = path.into_inner();

    let receiver: Option<Option<i64>> =
        sqlx::query_scalar("SELECT receiver_id FROM messages WHERE id = ?1")
            .bind(message_id)
            .fetch_optional(&app_state.db)
            .await
            .map_err(ApiError::from)?;

    let receiver = match receiver {
        Some(r) => Principal::from_user_id(r),
        None => {
            return Err(ApiError::NotFound(format!("No message found with id {}", message_id)).into())
        }
    };
    if receiver != *principal {
        return Err(ApiError::forbidden().into());
    }

    sqlx::query("UPDATE messages SET is_read = 1 WHERE id = ?1")
        .bind(message_id)
        .execute(&app_state.db)
        .await
        .map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Message marked as read." })))
}
