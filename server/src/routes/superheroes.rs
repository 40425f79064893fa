//! Record handlers under `/api/superheroes`.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use heroes_core::{Alignment, Superhero, SuperheroDraft, SuperheroId, SuperheroInput, Universe};
use heroes_db::superheroes::{self, SuperheroFilter};
use serde_json::{json, Value};

/// Query string accepted by the list endpoint.
///
/// Values are kept as raw text so that unknown enum values can be ignored
/// instead of rejected.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub alignment: Option<String>,
    pub universe: Option<String>,
}

impl ListQuery {
    /// Collect the recognized keys from decoded query pairs.
    ///
    /// A repeated key keeps its first value; other keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "search" => &mut query.search,
                "alignment" => &mut query.alignment,
                "universe" => &mut query.universe,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Build the store filter, dropping blank or unrecognized values.
    pub fn into_filter(self) -> SuperheroFilter {
        SuperheroFilter {
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            alignment: self.alignment.as_deref().and_then(Alignment::parse),
            universe: self.universe.as_deref().and_then(Universe::parse),
        }
    }
}

/// Ids that could never have been issued resolve to "not found".
fn parse_id(raw: &str) -> ApiResult<SuperheroId> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

fn parse_body(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<SuperheroDraft> {
    let Json(body) = payload?;
    Ok(SuperheroInput::from_json(&body)?.into_draft()?)
}

/// `GET /api/superheroes`
pub async fn list_superheroes(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<Superhero>>> {
    let filter = ListQuery::from_pairs(pairs).into_filter();
    let heroes = superheroes::find(state.db.pool(), &filter).await?;
    tracing::debug!(?filter, "Listed {} superheroes", heroes.len());
    Ok(Json(heroes))
}

/// `GET /api/superheroes/{id}`
pub async fn get_superhero(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Superhero>> {
    let id = parse_id(&id)?;
    superheroes::find_by_id(state.db.pool(), &id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `POST /api/superheroes`
pub async fn create_superhero(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Superhero>)> {
    let draft = parse_body(payload)?;

    // The UNIQUE constraint still guards concurrent writers.
    if superheroes::find_by_name(state.db.pool(), &draft.name, None)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(draft.name));
    }

    let hero = superheroes::insert(state.db.pool(), &draft).await?;
    tracing::info!("Created superhero {} ({})", hero.id, hero.name);
    Ok((StatusCode::CREATED, Json(hero)))
}

/// `PUT /api/superheroes/{id}`
pub async fn update_superhero(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Superhero>> {
    let id = parse_id(&id)?;
    let draft = parse_body(payload)?;

    if superheroes::find_by_name(state.db.pool(), &draft.name, Some(&id))
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(draft.name));
    }

    let hero = superheroes::replace_by_id(state.db.pool(), &id, &draft)
        .await?
        .ok_or(ApiError::NotFound)?;
    tracing::info!("Updated superhero {} ({})", hero.id, hero.name);
    Ok(Json(hero))
}

/// `DELETE /api/superheroes/{id}`
pub async fn delete_superhero(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    let hero = superheroes::delete_by_id(state.db.pool(), &id)
        .await?
        .ok_or(ApiError::NotFound)?;
    tracing::info!("Deleted superhero {} ({})", hero.id, hero.name);
    Ok(Json(json!({ "message": "Superhero deleted successfully" })))
}
