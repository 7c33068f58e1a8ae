use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{EventGeo, GeoResult};

/// Database row for the event_geo table.
#[derive(Debug, FromRow)]
struct EventGeoRow {
    event_id: String,
    lat: f64,
    lng: f64,
    region: Option<String>,
    country: Option<String>,
    confidence: String,
    source: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventGeoRow> for EventGeo {
    type Error = anyhow::Error;

    fn try_from(row: EventGeoRow) -> Result<Self, Self::Error> {
        let confidence = row.confidence.parse().map_err(anyhow::Error::msg)?;
        let source = row.source.parse().map_err(anyhow::Error::msg)?;

        Ok(EventGeo {
            event_id: row.event_id,
            geo: GeoResult {
                lat: row.lat,
                lng: row.lng,
                region: row.region,
                country: row.country,
                confidence,
                source,
            },
            updated_at: row.updated_at,
        })
    }
}

pub async fn get_geo(pool: &PgPool, event_id: &str) -> anyhow::Result<Option<EventGeo>> {
    let row = sqlx::query_as::<_, EventGeoRow>(
        r#"
        SELECT event_id, lat, lng, region, country, confidence, source, updated_at
        FROM event_geo
        WHERE event_id = $1
        "#,
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?;

    row.map(EventGeo::try_from).transpose()
}

/// Insert a geo row unless one exists. Returns whether a row was written.
pub async fn insert_geo_if_absent(pool: &PgPool, geo: &EventGeo) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO event_geo (event_id, lat, lng, region, country, confidence, source, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (event_id) DO NOTHING
        "#,
    )
    .bind(&geo.event_id)
    .bind(geo.geo.lat)
    .bind(geo.geo.lng)
    .bind(&geo.geo.region)
    .bind(&geo.geo.country)
    .bind(geo.geo.confidence.as_str())
    .bind(geo.geo.source.as_str())
    .bind(geo.updated_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
