use serde::{Deserialize, Serialize};
use std::fmt;
use super::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Driving,
}

/// Petición para `DirectionsService.route`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin: Location,
    pub destination: Location,
    pub travel_mode: TravelMode,
}

impl RouteRequest {
    pub fn driving(origin: Location, destination: Location) -> Self {
        Self {
            origin,
            destination,
            travel_mode: TravelMode::Driving,
        }
    }
}

/// `google.maps.DirectionsStatus`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteStatus {
    Ok,
    NotFound,
    ZeroResults,
    MaxWaypointsExceeded,
    MaxRouteLengthExceeded,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    Other(String),
}

impl RouteStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, RouteStatus::Ok)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RouteStatus::Ok => "OK",
            RouteStatus::NotFound => "NOT_FOUND",
            RouteStatus::ZeroResults => "ZERO_RESULTS",
            RouteStatus::MaxWaypointsExceeded => "MAX_WAYPOINTS_EXCEEDED",
            RouteStatus::MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
            RouteStatus::InvalidRequest => "INVALID_REQUEST",
            RouteStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            RouteStatus::RequestDenied => "REQUEST_DENIED",
            RouteStatus::UnknownError => "UNKNOWN_ERROR",
            RouteStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for RouteStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "OK" => RouteStatus::Ok,
            "NOT_FOUND" => RouteStatus::NotFound,
            "ZERO_RESULTS" => RouteStatus::ZeroResults,
            "MAX_WAYPOINTS_EXCEEDED" => RouteStatus::MaxWaypointsExceeded,
            "MAX_ROUTE_LENGTH_EXCEEDED" => RouteStatus::MaxRouteLengthExceeded,
            "INVALID_REQUEST" => RouteStatus::InvalidRequest,
            "OVER_QUERY_LIMIT" => RouteStatus::OverQueryLimit,
            "REQUEST_DENIED" => RouteStatus::RequestDenied,
            "UNKNOWN_ERROR" => RouteStatus::UnknownError,
            other => RouteStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parte legible de un `DirectionsResult` (el resto queda en el payload opaco)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DirectionsResult {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DirectionsLeg {
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
}

/// `{ text, value }` de Google (distancia en metros, duración en segundos)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: f64,
}

impl DirectionsResult {
    /// Resumen del primer tramo de la primera ruta.
    /// Sin rutas o sin tramos no hay resumen; sin distancia el texto queda vacío.
    pub fn summary(&self) -> Option<RouteSummary> {
        let leg = self.routes.first()?.legs.first()?;
        Some(RouteSummary {
            distance: leg.distance.as_ref().map(|d| d.text.clone()).unwrap_or_default(),
            duration: leg
                .duration
                .as_ref()
                .map(|d| d.text.clone())
                .filter(|text| !text.is_empty()),
        })
    }
}

/// Resumen mostrado en el badge (efímero, se recalcula con cada ruta)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance: String,
    pub duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_like_the_sdk_expects() {
        let request = RouteRequest::driving(Location::new(40.0, -74.0), Location::new(40.1, -74.1));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "origin": { "lat": 40.0, "lng": -74.0 },
                "destination": { "lat": 40.1, "lng": -74.1 },
                "travelMode": "DRIVING",
            })
        );
    }

    #[test]
    fn status_parsing_keeps_unknown_values() {
        assert!(RouteStatus::from("OK").is_ok());
        assert_eq!(RouteStatus::from("ZERO_RESULTS"), RouteStatus::ZeroResults);
        let odd = RouteStatus::from("SOMETHING_NEW");
        assert!(!odd.is_ok());
        assert_eq!(odd.to_string(), "SOMETHING_NEW");
    }

    #[test]
    fn summary_reads_first_leg_of_first_route() {
        let result: DirectionsResult = serde_json::from_str(
            r#"{
                "routes": [
                    { "legs": [
                        { "distance": { "text": "8.3 mi", "value": 13358 },
                          "duration": { "text": "21 mins", "value": 1260 },
                          "steps": [] },
                        { "distance": { "text": "1.0 mi", "value": 1609 } }
                    ], "summary": "I-95 N" },
                    { "legs": [ { "distance": { "text": "9.9 mi", "value": 15932 } } ] }
                ],
                "geocoded_waypoints": []
            }"#,
        )
        .unwrap();

        let summary = result.summary().unwrap();
        assert_eq!(summary.distance, "8.3 mi");
        assert_eq!(summary.duration.as_deref(), Some("21 mins"));
    }

    #[test]
    fn summary_handles_missing_pieces() {
        assert_eq!(DirectionsResult::default().summary(), None);

        let no_distance: DirectionsResult =
            serde_json::from_str(r#"{ "routes": [ { "legs": [ {} ] } ] }"#).unwrap();
        assert_eq!(no_distance.summary().unwrap().distance, "");
    }
}
