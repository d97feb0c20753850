// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storyline to GeoJSON transformation.
//!
//! Place segments become styled Points and every activity of a move segment
//! becomes its own LineString. Output order follows the storyline. A day
//! with any unrecognized segment or activity fails as a whole.

use crate::error::{AppError, Result};
use crate::models::activity::describe;
use crate::models::{Activity, ActivityType, Segment, SegmentKind};
use crate::time_utils::parse_moves_timestamp;
use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::json;

/// Foursquare venue page prefix.
pub const FOURSQUARE_VENUE_URL: &str = "https://foursquare.com/v/";

/// Marker icon drawn for every place.
pub const PLACE_ICON_URL: &str = "/static/images/circle-stroked-24.svg";

/// Line width for every movement.
const STROKE_WIDTH: u32 = 3;

/// Convert one day of storyline segments into a FeatureCollection.
pub fn transform_day(segments: &[Segment]) -> Result<FeatureCollection> {
    let mut features = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment.kind()? {
            SegmentKind::Place => features.push(place_feature(segment)?),
            SegmentKind::Move => features.extend(move_features(segment)?),
        }
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Build the Point feature for a place segment.
fn place_feature(segment: &Segment) -> Result<Feature> {
    let place = segment
        .place
        .as_ref()
        .ok_or_else(|| AppError::MalformedSegment("place segment without a place".to_string()))?;

    let start = segment_time(segment.start_time.as_deref(), "startTime")?;
    let end = segment_time(segment.end_time.as_deref(), "endTime")?;

    let mut properties = to_properties(segment)?;
    properties.insert("duration".to_string(), json!((end - start).num_seconds()));
    properties.insert(
        "title".to_string(),
        json!(place.name.as_deref().unwrap_or("Unknown")),
    );
    if let Some(id) = &place.foursquare_id {
        properties.insert(
            "url".to_string(),
            json!(format!("{}{}", FOURSQUARE_VENUE_URL, id)),
        );
    }
    properties.insert(
        "icon".to_string(),
        json!({
            "iconUrl": PLACE_ICON_URL,
            "iconSize": [24, 24],
            "iconAnchor": [12, 12],
            "popupAnchor": [0, -12],
        }),
    );

    let point = Value::Point(vec![place.location.lon, place.location.lat]);
    Ok(feature(point, properties))
}

/// Build one LineString feature per activity of a move segment.
fn move_features(segment: &Segment) -> Result<Vec<Feature>> {
    segment
        .activities
        .iter()
        .flatten()
        .map(activity_feature)
        .collect()
}

fn activity_feature(activity: &Activity) -> Result<Feature> {
    let kind = ActivityType::from_code(&activity.activity)?;

    let coordinates: Vec<Vec<f64>> = activity
        .track_points
        .iter()
        .map(|p| vec![p.lon, p.lat])
        .collect();
    let times: Vec<&str> = activity
        .track_points
        .iter()
        .map(|p| p.time.as_str())
        .collect();

    let mut properties = to_properties(activity)?;
    properties.remove("trackPoints");
    properties.insert(
        "description".to_string(),
        json!(describe(
            kind.movement_label(),
            activity.distance_meters(),
            activity.duration_seconds()
        )),
    );
    properties.insert("times".to_string(), json!(times));
    properties.insert("stroke".to_string(), json!(kind.stroke()));
    properties.insert("stroke-width".to_string(), json!(STROKE_WIDTH));
    if let Some(opacity) = kind.stroke_opacity() {
        properties.insert("stroke-opacity".to_string(), json!(opacity));
    }

    Ok(feature(Value::LineString(coordinates), properties))
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Serialize a record into a property map, keeping every field.
fn to_properties<T: Serialize>(record: &T) -> Result<JsonObject> {
    match serde_json::to_value(record) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(AppError::Internal(anyhow::anyhow!(
            "expected an object, got {}",
            other
        ))),
        Err(e) => Err(AppError::Internal(e.into())),
    }
}

fn segment_time(value: Option<&str>, field: &str) -> Result<DateTime<Utc>> {
    let raw =
        value.ok_or_else(|| AppError::MalformedSegment(format!("place segment without {}", field)))?;
    parse_moves_timestamp(raw)
        .ok_or_else(|| AppError::MalformedSegment(format!("invalid {}: {}", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(json: serde_json::Value) -> Segment {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_place_without_name_or_foursquare() {
        let seg = segment(json!({
            "type": "place",
            "startTime": "20131231T080000Z",
            "endTime": "20131231T083000Z",
            "place": {"id": 1, "location": {"lat": 60.17, "lon": 24.94}}
        }));

        let collection = transform_day(&[seg]).unwrap();
        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["title"], "Unknown");
        assert_eq!(props["duration"], 1800);
        assert!(!props.contains_key("url"));
        assert_eq!(props["icon"]["iconSize"], json!([24, 24]));
        assert_eq!(props["icon"]["iconAnchor"], json!([12, 12]));
    }

    #[test]
    fn test_place_point_is_lon_lat() {
        let seg = segment(json!({
            "type": "place",
            "startTime": "20131231T080000Z",
            "endTime": "20131231T080000Z",
            "place": {"name": "Office", "location": {"lat": 60.17, "lon": 24.94}}
        }));

        let collection = transform_day(&[seg]).unwrap();
        let geometry = collection.features[0].geometry.as_ref().unwrap();
        assert_eq!(geometry.value, Value::Point(vec![24.94, 60.17]));
    }

    #[test]
    fn test_duration_spanning_midnight() {
        let seg = segment(json!({
            "type": "place",
            "startTime": "20131230T230000Z",
            "endTime": "20131231T010000Z",
            "place": {"location": {"lat": 0.0, "lon": 0.0}}
        }));

        let collection = transform_day(&[seg]).unwrap();
        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["duration"], 7200);
    }

    #[test]
    fn test_place_without_place_is_malformed() {
        let seg = segment(json!({
            "type": "place",
            "startTime": "20131231T080000Z",
            "endTime": "20131231T083000Z"
        }));
        assert!(matches!(
            transform_day(&[seg]),
            Err(AppError::MalformedSegment(_))
        ));
    }

    #[test]
    fn test_bad_timestamp_is_malformed() {
        let seg = segment(json!({
            "type": "place",
            "startTime": "yesterday",
            "endTime": "20131231T083000Z",
            "place": {"location": {"lat": 0.0, "lon": 0.0}}
        }));
        assert!(matches!(
            transform_day(&[seg]),
            Err(AppError::MalformedSegment(_))
        ));
    }

    #[test]
    fn test_transport_is_translucent() {
        let seg = segment(json!({
            "type": "move",
            "activities": [{
                "activity": "trp",
                "distance": 15300.0,
                "duration": 1500.0,
                "trackPoints": [
                    {"lat": 60.1, "lon": 24.9, "time": "20131231T090000Z"},
                    {"lat": 60.2, "lon": 25.0, "time": "20131231T092500Z"}
                ]
            }]
        }));

        let collection = transform_day(&[seg]).unwrap();
        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["stroke"], "#000000");
        assert_eq!(props["stroke-opacity"], 0.1);
        assert_eq!(props["stroke-width"], 3);
        assert_eq!(props["description"], "Transport for 15.3 km, taking 25 minutes");
        assert_eq!(
            props["times"],
            json!(["20131231T090000Z", "20131231T092500Z"])
        );
        assert!(!props.contains_key("trackPoints"));
    }

    #[test]
    fn test_move_without_activities_yields_nothing() {
        let seg = segment(json!({"type": "move", "activities": null}));
        assert!(transform_day(&[seg]).unwrap().features.is_empty());
    }

    #[test]
    fn test_empty_day() {
        let collection = transform_day(&[]).unwrap();
        assert!(collection.features.is_empty());
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
    }

    #[test]
    fn test_activity_fields_pass_through_unchanged() {
        let seg = segment(json!({
            "type": "move",
            "activities": [
                {"activity": "wlk", "distance": 812, "duration": 720, "trackPoints": []},
                {"activity": "cyc", "trackPoints": []}
            ]
        }));

        let collection = transform_day(&[seg]).unwrap();
        let walk = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(walk["distance"], json!(812));
        assert_eq!(walk["duration"], json!(720));
        assert_eq!(walk["description"], "Walking for 0.8 km, taking 12 minutes");

        let cycle = collection.features[1].properties.as_ref().unwrap();
        assert!(!cycle.contains_key("distance"));
        assert!(!cycle.contains_key("duration"));
        assert_eq!(cycle["description"], "Cycling for 0.0 km, taking 0 minutes");
    }
}
