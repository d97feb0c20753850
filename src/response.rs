// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON download responses.

use crate::error::{AppError, Result};
use crate::services::calendar::{api_date, parse_date};
use crate::services::geojson::transform_day;
use crate::services::{MovesApi, MovesService};
use crate::store::CacheStore;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use geojson::FeatureCollection;

/// Media type for GeoJSON documents.
pub const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";

/// One day of storyline as a downloadable GeoJSON file.
#[derive(Debug, Clone)]
pub struct GeoJsonDownload {
    pub date: NaiveDate,
    pub collection: FeatureCollection,
}

impl GeoJsonDownload {
    /// Download file name, e.g. `moves-2013-12-31.geojson`.
    pub fn filename(&self) -> String {
        format!("moves-{}.geojson", self.date.format("%Y-%m-%d"))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.collection).map_err(|e| AppError::Internal(e.into()))
    }
}

impl IntoResponse for GeoJsonDownload {
    fn into_response(self) -> Response {
        let body = match self.to_json() {
            Ok(body) => body,
            Err(e) => return e.into_response(),
        };
        let disposition = format!("attachment; filename=\"{}\"", self.filename());

        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, GEOJSON_CONTENT_TYPE.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response()
    }
}

/// Fetch and transform one day of storyline.
///
/// The date is validated before the cache or the Moves API is touched.
pub async fn storyline_geojson<S: CacheStore, A: MovesApi>(
    service: &MovesService<S, A>,
    access_token: &str,
    date: &str,
) -> Result<GeoJsonDownload> {
    let date = parse_date(date)?;
    let day = service.get_storyline(access_token, date).await?;
    let collection = transform_day(&day.segments)?;

    tracing::info!(
        date = %api_date(date),
        features = collection.features.len(),
        "Storyline converted to GeoJSON"
    );

    Ok(GeoJsonDownload { date, collection })
}
