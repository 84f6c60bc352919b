use serde::Serialize;
use crate::config::AppConfig;
use crate::models::Location;

/// `google.maps.MapOptions` (subconjunto)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
    pub center: Location,
    pub zoom: f64,
    pub styles: Vec<MapStyler>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyler {
    pub feature_type: String,
    pub element_type: String,
    pub stylers: Vec<StylerRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylerRule {
    pub visibility: String,
}

impl MapOptions {
    /// Vista inicial con las etiquetas de POI ocultas
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            center: config.map_config.default_center(),
            zoom: config.map_config.default_zoom,
            styles: vec![MapStyler {
                feature_type: "poi".to_string(),
                element_type: "labels".to_string(),
                stylers: vec![StylerRule {
                    visibility: "off".to_string(),
                }],
            }],
        }
    }
}

/// `google.maps.DirectionsRendererOptions` sin `map` (se asigna aparte, es un objeto JS)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsRendererOptions {
    pub suppress_markers: bool,
    pub polyline_options: PolylineOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineOptions {
    pub stroke_color: String,
    pub stroke_weight: u32,
}

impl DirectionsRendererOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            suppress_markers: false,
            polyline_options: PolylineOptions {
                stroke_color: config.route_style.stroke_color.clone(),
                stroke_weight: config.route_style.stroke_weight,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn map_options_hide_poi_labels() {
        let options = MapOptions::from_config(&AppConfig::default());
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "center": { "lat": 40.7128, "lng": -74.006 },
                "zoom": 13.0,
                "styles": [ {
                    "featureType": "poi",
                    "elementType": "labels",
                    "stylers": [ { "visibility": "off" } ]
                } ]
            })
        );
    }

    #[test]
    fn renderer_keeps_markers_and_uses_route_style() {
        let options = DirectionsRendererOptions::from_config(&AppConfig::default());
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "suppressMarkers": false,
                "polylineOptions": { "strokeColor": "#3b82f6", "strokeWeight": 5 }
            })
        );
    }
}
