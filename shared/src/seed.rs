//! Fixed demo dataset written on first access to an empty store

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Collection, CollectionStatus, QualityGrade};
use crate::types::GeoLocation;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 30, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn seed_collection(
    id: &str,
    batch_id: &str,
    farmer: &str,
    herb: &str,
    species: &str,
    quantity: &str,
    moisture: &str,
    geo: (&str, &str),
    location: &str,
    status: CollectionStatus,
    grade: QualityGrade,
    day: u32,
) -> Collection {
    let created_at = at(day, 9);
    Collection {
        id: id.to_string(),
        batch_id: batch_id.to_string(),
        collector_id: farmer.to_string(),
        farmer: farmer.to_string(),
        herb: herb.to_string(),
        species_name: Some(species.to_string()),
        quantity: quantity.to_string(),
        moisture: Some(moisture.to_string()),
        geo: Some(GeoLocation {
            latitude: geo.0.to_string(),
            longitude: geo.1.to_string(),
            accuracy: Some("±5m".to_string()),
        }),
        location: Some(location.to_string()),
        status,
        quality_grade: grade,
        created_at,
        last_updated: created_at,
    }
}

/// The default collections, in storage order
pub fn default_collections() -> Vec<Collection> {
    vec![
        seed_collection(
            "COL001",
            "BATCH-ASH-2024-001",
            "FARM-RJ-001",
            "Ashwagandha",
            "Withania somnifera",
            "25 kg",
            "8.5%",
            ("26.9124", "75.7873"),
            "Jaipur, Rajasthan",
            CollectionStatus::Verified,
            QualityGrade::Premium,
            15,
        ),
        seed_collection(
            "COL002",
            "BATCH-TUL-2024-002",
            "FARM-UP-014",
            "Tulsi",
            "Ocimum tenuiflorum",
            "12 kg",
            "10.2%",
            ("25.3176", "82.9739"),
            "Varanasi, Uttar Pradesh",
            CollectionStatus::Synced,
            QualityGrade::Standard,
            18,
        ),
        seed_collection(
            "COL003",
            "BATCH-TUR-2024-003",
            "FARM-KL-007",
            "Turmeric",
            "Curcuma longa",
            "40 kg",
            "9.1%",
            ("9.9312", "76.2673"),
            "Kochi, Kerala",
            CollectionStatus::Verified,
            QualityGrade::Standard,
            20,
        ),
        seed_collection(
            "COL004",
            "BATCH-BRA-2024-004",
            "FARM-TN-022",
            "Brahmi",
            "Bacopa monnieri",
            "8 kg",
            "11.4%",
            ("13.0827", "80.2707"),
            "Chennai, Tamil Nadu",
            CollectionStatus::Queued,
            QualityGrade::Basic,
            22,
        ),
    ]
}
