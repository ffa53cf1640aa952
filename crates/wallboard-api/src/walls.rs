use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tera::Context;
use tracing::{error, info, warn};

use wallboard_db::models::{CreateOutcome, WallRow};

use crate::AppState;
use crate::error::WebError;
use crate::models::{Wall, WallDraft};
use crate::templates;

pub const DELETE_MISMATCH_MESSAGE: &str =
    "You can only delete a wall by entering the name of the wall's creator.";

/// Typed binding for the nested `wall[...]` field group of the creation
/// form. Missing fields default to empty strings so an incomplete
/// submission reaches the validation gate instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct WallForm {
    #[serde(rename = "wall[created_by]", default)]
    pub created_by: String,
    #[serde(rename = "wall[title]", default)]
    pub title: String,
    #[serde(rename = "wall[description]", default)]
    pub description: String,
    #[serde(rename = "wall[likes]", default)]
    pub likes: String,
}

impl WallForm {
    /// Coerce the submitted likes count: blank becomes 0, anything else
    /// must parse as an integer.
    fn into_draft(self) -> Result<WallDraft, (WallDraft, String)> {
        let likes = self.likes.trim();
        let likes = if likes.is_empty() {
            Ok(0)
        } else {
            likes
                .parse::<i64>()
                .map_err(|_| "Likes must be a whole number".to_string())
        };

        match likes {
            Ok(likes) => Ok(WallDraft {
                created_by: self.created_by,
                title: self.title,
                description: self.description,
                likes,
            }),
            Err(reason) => Err((
                WallDraft {
                    created_by: self.created_by,
                    title: self.title,
                    description: self.description,
                    likes: 0,
                },
                reason,
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub created_by: String,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_walls())
        .await
        .map_err(join_error)??;

    let walls: Vec<Wall> = rows.into_iter().map(wall_from_row).collect();

    let mut ctx = Context::new();
    ctx.insert("walls", &walls);
    Ok(Html(state.templates.render(templates::INDEX, &ctx)?))
}

/// GET /walls/new — blank draft, nothing persisted.
pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    render_new(&state, &WallDraft::default(), None)
}

/// GET /walls/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_wall(id))
        .await
        .map_err(join_error)??
        .ok_or(WebError::NotFound)?;

    render_show(&state, &wall_from_row(row), None)
}

/// POST /walls — stamp created_at server-side, insert, redirect to the
/// list on success. A rejected draft re-renders the form with the entered
/// values.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<WallForm>,
) -> Result<Response, WebError> {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err((draft, reason)) => {
            return Ok(render_new(&state, &draft, Some(&reason))?.into_response());
        }
    };

    let created_at = Utc::now().to_rfc3339();
    let db = state.clone();
    let to_save = draft.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        db.db.create_wall(
            &to_save.created_by,
            &to_save.title,
            &to_save.description,
            to_save.likes,
            &created_at,
        )
    })
    .await
    .map_err(join_error)??;

    match outcome {
        CreateOutcome::Saved(row) => {
            info!("Wall {} created by {}", row.id, row.created_by);
            Ok(Redirect::to("/").into_response())
        }
        CreateOutcome::Rejected(reason) => {
            Ok(render_new(&state, &draft, Some(&reason))?.into_response())
        }
    }
}

/// DELETE /walls/{id} — destroy only when the submitted name matches the
/// stored creator exactly; otherwise redisplay the wall with an error.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, WebError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_wall(id))
        .await
        .map_err(join_error)??
        .ok_or(WebError::NotFound)?;

    if form.created_by != row.created_by {
        info!("Delete refused for wall {}: creator name mismatch", id);
        return Ok(render_show(&state, &wall_from_row(row), Some(DELETE_MISMATCH_MESSAGE))?
            .into_response());
    }

    let db = state.clone();
    let removed = tokio::task::spawn_blocking(move || db.db.delete_wall(id))
        .await
        .map_err(join_error)??;

    // Row vanished between the creator check and the delete.
    if !removed {
        return Err(WebError::NotFound);
    }

    info!("Wall {} deleted", id);
    Ok(Redirect::to("/").into_response())
}

fn render_new(
    state: &AppState,
    draft: &WallDraft,
    error: Option<&str>,
) -> Result<Html<String>, WebError> {
    let mut ctx = Context::new();
    ctx.insert("wall", draft);
    ctx.insert("error", &error);
    Ok(Html(state.templates.render(templates::NEW, &ctx)?))
}

fn render_show(
    state: &AppState,
    wall: &Wall,
    error: Option<&str>,
) -> Result<Html<String>, WebError> {
    let mut ctx = Context::new();
    ctx.insert("wall", wall);
    ctx.insert("error", &error);
    Ok(Html(state.templates.render(templates::SHOW, &ctx)?))
}

fn wall_from_row(row: WallRow) -> Wall {
    let created_at = row
        .created_at
        .parse::<chrono::DateTime<Utc>>()
        .or_else(|_| {
            // SQLite column defaults store "YYYY-MM-DD HH:MM:SS" without a
            // timezone. Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on wall {}: {}", row.created_at, row.id, e);
            chrono::DateTime::default()
        });

    Wall {
        id: row.id,
        created_by: row.created_by,
        title: row.title,
        description: row.description,
        likes: row.likes,
        created_at,
    }
}

fn join_error(err: tokio::task::JoinError) -> WebError {
    error!("spawn_blocking join error: {}", err);
    WebError::Internal(anyhow::anyhow!("blocking task failed: {err}"))
}
