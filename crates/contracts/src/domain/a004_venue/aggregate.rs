use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::PersonRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueStatus {
    Verified,
    Unverified,
    Suspended,
}

impl VenueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Unverified => "Unverified",
            Self::Suspended => "Suspended",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Verified => "success",
            Self::Unverified => "warning",
            Self::Suspended => "error",
        }
    }
}

/// Площадка (спортивная площадка с почасовой арендой)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub zona: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub owner: Option<PersonRef>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub precio_por_hora: f64,
    #[serde(default)]
    pub capacidad: u32,
    #[serde(default)]
    pub tipo_superficie: String,
    #[serde(default)]
    pub techada: bool,
    #[serde(default)]
    pub iluminacion: bool,
    #[serde(default)]
    pub vestuarios: bool,
    #[serde(default)]
    pub estacionamiento: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Venue {
    /// Приостановка важнее верификации
    pub fn status(&self) -> VenueStatus {
        if self.suspended {
            VenueStatus::Suspended
        } else if self.verified {
            VenueStatus::Verified
        } else {
            VenueStatus::Unverified
        }
    }

    pub fn amenities(&self) -> Vec<&'static str> {
        [
            (self.techada, "Covered"),
            (self.iluminacion, "Lighting"),
            (self.vestuarios, "Locker rooms"),
            (self.estacionamiento, "Parking"),
        ]
        .into_iter()
        .filter_map(|(has, label)| has.then_some(label))
        .collect()
    }

    pub fn rating_label(&self) -> String {
        match self.avg_rating {
            Some(r) => format!("{:.1} ({})", r, self.review_count),
            None => "No ratings".to_string(),
        }
    }

    pub fn owner_name(&self) -> String {
        self.owner
            .as_ref()
            .map(PersonRef::display_name)
            .unwrap_or_else(|| "-".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenuesResponse {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_amenities() {
        let mut v: Venue = serde_json::from_str(
            r#"{"id":"v1","nombre":"Cancha 5","verified":true,"avg_rating":4.25,"review_count":8,
                "techada":true,"estacionamiento":true,"created_at":"2024-01-01T00:00:00Z",
                "owner":{"id":"o1","nombre":"Pedro"}}"#,
        )
        .unwrap();
        assert_eq!(v.status(), VenueStatus::Verified);
        assert_eq!(v.amenities(), vec!["Covered", "Parking"]);
        assert_eq!(v.owner_name(), "Pedro");

        v.suspended = true;
        assert_eq!(v.status(), VenueStatus::Suspended);
        v.avg_rating = None;
        assert_eq!(v.rating_label(), "No ratings");
    }
}
