//! Superhero record operations.
//!
//! This module provides CRUD operations for the `superheroes` table and
//! full-text search through the `superheroes_fts` index. Listing is always
//! newest-first by creation time.

use crate::error::{DatabaseError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use heroes_core::{Alignment, Superhero, SuperheroDraft, SuperheroId, Universe};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Pool, QueryBuilder, Row, Sqlite};

const COLUMNS: &str = "id, name, real_name, powers, origin_story, image_url, alignment, universe, \
                       created_at, updated_at";

/// Predicates for listing records. Every set predicate must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuperheroFilter {
    /// Free text matched against `name` and `real_name`; any term may match
    pub search: Option<String>,
    /// Exact alignment
    pub alignment: Option<Alignment>,
    /// Exact universe
    pub universe: Option<Universe>,
}

impl SuperheroFilter {
    /// A filter that matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }
}

/// Build an FTS5 `MATCH` expression from free text.
///
/// Each whitespace-separated term with at least one alphanumeric character is
/// quoted as a phrase, and the phrases are OR-ed together. Returns `None` when
/// no term survives.
#[must_use]
pub fn fts_query(search: &str) -> Option<String> {
    let terms: Vec<String> = search
        .split_whitespace()
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

/// List records matching `filter`, newest first.
///
/// # Errors
/// Returns `DatabaseError` if the query fails or a row cannot be decoded.
pub async fn find(pool: &Pool<Sqlite>, filter: &SuperheroFilter) -> Result<Vec<Superhero>> {
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM superheroes WHERE 1 = 1"));

    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let Some(expression) = fts_query(search) else {
            tracing::debug!("Search '{}' has no searchable terms", search);
            return Ok(Vec::new());
        };
        query
            .push(" AND seq IN (SELECT rowid FROM superheroes_fts WHERE superheroes_fts MATCH ")
            .push_bind(expression)
            .push(")");
    }

    if let Some(alignment) = filter.alignment {
        query.push(" AND alignment = ").push_bind(alignment.as_str());
    }

    if let Some(universe) = filter.universe {
        query.push(" AND universe = ").push_bind(universe.as_str());
    }

    query.push(" ORDER BY created_at DESC, seq DESC");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(parse_superhero).collect()
}

/// Get a record by id.
///
/// # Errors
/// Returns `DatabaseError` if the query fails or the row cannot be decoded.
pub async fn find_by_id(pool: &Pool<Sqlite>, id: &SuperheroId) -> Result<Option<Superhero>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM superheroes WHERE id = ?"))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(parse_superhero).transpose()
}

/// Find the record carrying exactly `name`, optionally ignoring one id.
///
/// # Errors
/// Returns `DatabaseError` if the query fails or the row cannot be decoded.
pub async fn find_by_name(
    pool: &Pool<Sqlite>,
    name: &str,
    excluding: Option<&SuperheroId>,
) -> Result<Option<Superhero>> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM superheroes WHERE name = ? AND id IS NOT ?"
    ))
    .bind(name)
    .bind(excluding.map(SuperheroId::as_str))
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(parse_superhero).transpose()
}

/// Insert a new record, generating its id and timestamps.
///
/// # Errors
/// Returns `DatabaseError::Conflict` if the name is already taken.
pub async fn insert<'e, E>(executor: E, draft: &SuperheroDraft) -> Result<Superhero>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = SuperheroId::generate();
    let now = format_timestamp(Utc::now());
    let powers = encode_powers(&draft.powers)?;

    let row = sqlx::query(&format!(
        "INSERT INTO superheroes (id, name, real_name, powers, origin_story, image_url,
                                  alignment, universe, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING {COLUMNS}"
    ))
    .bind(id.as_str())
    .bind(&draft.name)
    .bind(&draft.real_name)
    .bind(powers)
    .bind(&draft.origin_story)
    .bind(&draft.image_url)
    .bind(draft.alignment.as_str())
    .bind(draft.universe.as_str())
    .bind(&now)
    .bind(&now)
    .fetch_one(executor)
    .await
    .map_err(|e| DatabaseError::from_write(e, &draft.name))?;

    let hero = parse_superhero(&row)?;
    tracing::debug!("Inserted superhero {} ({})", hero.id, hero.name);
    Ok(hero)
}

/// Replace every field of an existing record.
///
/// `id` and `created_at` are kept, `updated_at` is refreshed. Returns `None`
/// when no record has this id.
///
/// # Errors
/// Returns `DatabaseError::Conflict` if the new name belongs to another record.
pub async fn replace_by_id(
    pool: &Pool<Sqlite>,
    id: &SuperheroId,
    draft: &SuperheroDraft,
) -> Result<Option<Superhero>> {
    let now = format_timestamp(Utc::now());
    let powers = encode_powers(&draft.powers)?;

    let row = sqlx::query(&format!(
        "UPDATE superheroes
         SET name = ?, real_name = ?, powers = ?, origin_story = ?, image_url = ?,
             alignment = ?, universe = ?, updated_at = ?
         WHERE id = ?
         RETURNING {COLUMNS}"
    ))
    .bind(&draft.name)
    .bind(&draft.real_name)
    .bind(powers)
    .bind(&draft.origin_story)
    .bind(&draft.image_url)
    .bind(draft.alignment.as_str())
    .bind(draft.universe.as_str())
    .bind(&now)
    .bind(id.as_str())
    .fetch_optional(pool)
    .await
    .map_err(|e| DatabaseError::from_write(e, &draft.name))?;

    row.as_ref().map(parse_superhero).transpose()
}

/// Delete a record, returning it if it existed.
///
/// # Errors
/// Returns `DatabaseError` if the delete fails.
pub async fn delete_by_id(pool: &Pool<Sqlite>, id: &SuperheroId) -> Result<Option<Superhero>> {
    let row = sqlx::query(&format!(
        "DELETE FROM superheroes WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(parse_superhero).transpose()
}

/// Delete every record, returning how many were removed.
///
/// # Errors
/// Returns `DatabaseError` if the delete fails.
pub async fn delete_all<'e, E>(executor: E) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM superheroes")
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Count stored records.
///
/// # Errors
/// Returns `DatabaseError` if the query fails.
pub async fn count(pool: &Pool<Sqlite>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM superheroes")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    // Fixed precision keeps lexical order equal to chronological order.
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn encode_powers(powers: &[String]) -> Result<String> {
    serde_json::to_string(powers)
        .map_err(|e| DatabaseError::Decode(format!("failed to encode powers: {e}")))
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Decode(format!("invalid {column} '{raw}': {e}")))
}

fn parse_superhero(row: &SqliteRow) -> Result<Superhero> {
    let id: String = row.try_get("id")?;
    let id = SuperheroId::new(id).map_err(|e| DatabaseError::Decode(e.to_string()))?;

    let powers: String = row.try_get("powers")?;
    let powers: Vec<String> = serde_json::from_str(&powers)
        .map_err(|e| DatabaseError::Decode(format!("invalid powers for {id}: {e}")))?;

    let alignment: String = row.try_get("alignment")?;
    let alignment = Alignment::parse(&alignment)
        .ok_or_else(|| DatabaseError::Decode(format!("invalid alignment '{alignment}'")))?;

    let universe: String = row.try_get("universe")?;
    let universe = Universe::parse(&universe)
        .ok_or_else(|| DatabaseError::Decode(format!("invalid universe '{universe}'")))?;

    Ok(Superhero {
        id,
        name: row.try_get("name")?,
        real_name: row.try_get("real_name")?,
        powers,
        origin_story: row.try_get("origin_story")?,
        image_url: row.try_get("image_url")?,
        alignment,
        universe,
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}
