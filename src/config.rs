use serde::{Deserialize, Serialize};
use crate::models::Location;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub google_maps_api_key: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub route_style: RouteStyle,
    pub readiness: ReadinessConfig,
    pub autocomplete_widget: AutocompleteWidget,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            google_maps_api_key: String::new(),
            enable_logging: true,
            map_config: MapConfig::default(),
            route_style: RouteStyle::default(),
            readiness: ReadinessConfig::default(),
            autocomplete_widget: AutocompleteWidget::Legacy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: 40.7128,
            default_center_lng: -74.006,
            default_zoom: 13.0,
        }
    }
}

impl MapConfig {
    pub fn default_center(&self) -> Location {
        Location::new(self.default_center_lat, self.default_center_lng)
    }
}

/// Estilo del polyline que dibuja el DirectionsRenderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStyle {
    pub stroke_color: String,
    pub stroke_weight: u32,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#3b82f6".to_string(),
            stroke_weight: 5,
        }
    }
}

/// Sondeo del readiness gate (intervalo fijo, intentos acotados)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReadinessConfig {
    pub poll_interval_ms: u32,
    pub max_attempts: u32,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            max_attempts: 100,
        }
    }
}

/// Widget de autocompletado a montar sobre los inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutocompleteWidget {
    /// `google.maps.places.Autocomplete` sobre un `<input>`
    Legacy,
    /// `<gmp-place-autocomplete>` (PlaceAutocompleteElement)
    Element,
}

impl AutocompleteWidget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" | "autocomplete" => Some(Self::Legacy),
            "element" | "modern" => Some(Self::Element),
            _ => None,
        }
    }

    /// Ruta del constructor que el readiness gate espera antes de montar
    pub fn capability_path(&self) -> &'static [&'static str] {
        match self {
            Self::Legacy => &["google", "maps", "places", "Autocomplete"],
            Self::Element => &["google", "maps", "places", "PlaceAutocompleteElement"],
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            "GOOGLE_MAPS_API_KEY" => option_env!("GOOGLE_MAPS_API_KEY"),
            "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY" => option_env!("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY"),
            "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
            "DEFAULT_MAP_CENTER_LAT" => option_env!("DEFAULT_MAP_CENTER_LAT"),
            "DEFAULT_MAP_CENTER_LNG" => option_env!("DEFAULT_MAP_CENTER_LNG"),
            "DEFAULT_MAP_ZOOM" => option_env!("DEFAULT_MAP_ZOOM"),
            "ROUTE_STROKE_COLOR" => option_env!("ROUTE_STROKE_COLOR"),
            "ROUTE_STROKE_WEIGHT" => option_env!("ROUTE_STROKE_WEIGHT"),
            "READINESS_POLL_INTERVAL_MS" => option_env!("READINESS_POLL_INTERVAL_MS"),
            "READINESS_MAX_ATTEMPTS" => option_env!("READINESS_MAX_ATTEMPTS"),
            "AUTOCOMPLETE_WIDGET" => option_env!("AUTOCOMPLETE_WIDGET"),
            _ => None,
        })
    }

    /// Construye la configuración a partir de una función de búsqueda clave → valor.
    /// Valores ausentes o mal formados caen al valor por defecto.
    pub fn from_lookup<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let defaults = Self::default();

        let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY"))
            .unwrap_or("")
            .trim()
            .to_string();

        Self {
            google_maps_api_key,
            enable_logging: parse_or(lookup("ENABLE_LOGGING"), defaults.enable_logging),
            map_config: MapConfig {
                default_center_lat: parse_or(
                    lookup("DEFAULT_MAP_CENTER_LAT"),
                    defaults.map_config.default_center_lat,
                ),
                default_center_lng: parse_or(
                    lookup("DEFAULT_MAP_CENTER_LNG"),
                    defaults.map_config.default_center_lng,
                ),
                default_zoom: parse_or(lookup("DEFAULT_MAP_ZOOM"), defaults.map_config.default_zoom),
            },
            route_style: RouteStyle {
                stroke_color: lookup("ROUTE_STROKE_COLOR")
                    .map(str::trim)
                    .filter(|color| !color.is_empty())
                    .map(str::to_string)
                    .unwrap_or(defaults.route_style.stroke_color),
                stroke_weight: parse_or(
                    lookup("ROUTE_STROKE_WEIGHT"),
                    defaults.route_style.stroke_weight,
                ),
            },
            readiness: ReadinessConfig {
                poll_interval_ms: parse_or(
                    lookup("READINESS_POLL_INTERVAL_MS"),
                    defaults.readiness.poll_interval_ms,
                ),
                max_attempts: parse_or(
                    lookup("READINESS_MAX_ATTEMPTS"),
                    defaults.readiness.max_attempts,
                )
                .max(1),
            },
            autocomplete_widget: lookup("AUTOCOMPLETE_WIDGET")
                .and_then(AutocompleteWidget::parse)
                .unwrap_or(defaults.autocomplete_widget),
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Obtiene la clave de Google Maps (puede estar vacía)
    pub fn api_key(&self) -> &str {
        &self.google_maps_api_key
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&'static str, &'static str)]) -> AppConfig {
        let values: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::from_lookup(|key| values.get(key).copied())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_key(), "");
        assert!(config.is_logging_enabled());
        assert_eq!(config.map_config.default_center(), Location::new(40.7128, -74.006));
        assert_eq!(config.map_config.default_zoom, 13.0);
        assert_eq!(config.route_style.stroke_color, "#3b82f6");
        assert_eq!(config.route_style.stroke_weight, 5);
        assert_eq!(config.readiness.poll_interval_ms, 100);
        assert_eq!(config.readiness.max_attempts, 100);
        assert_eq!(config.autocomplete_widget, AutocompleteWidget::Legacy);
    }

    #[test]
    fn next_public_key_is_used_as_fallback() {
        let config = config_from(&[
            ("GOOGLE_MAPS_API_KEY", "   "),
            ("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY", " abc123 "),
        ]);
        assert_eq!(config.api_key(), "abc123");

        let config = config_from(&[
            ("GOOGLE_MAPS_API_KEY", "primary"),
            ("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY", "secondary"),
        ]);
        assert_eq!(config.api_key(), "primary");
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("ENABLE_LOGGING", "maybe"),
            ("DEFAULT_MAP_ZOOM", "close"),
            ("READINESS_MAX_ATTEMPTS", "0"),
            ("AUTOCOMPLETE_WIDGET", "fancy"),
            ("ROUTE_STROKE_COLOR", ""),
        ]);
        assert!(config.enable_logging);
        assert_eq!(config.map_config.default_zoom, 13.0);
        assert_eq!(config.readiness.max_attempts, 1);
        assert_eq!(config.autocomplete_widget, AutocompleteWidget::Legacy);
        assert_eq!(config.route_style.stroke_color, "#3b82f6");
    }

    #[test]
    fn element_widget_waits_for_its_own_constructor() {
        let config = config_from(&[("AUTOCOMPLETE_WIDGET", "Element")]);
        assert_eq!(config.autocomplete_widget, AutocompleteWidget::Element);
        assert_eq!(
            config.autocomplete_widget.capability_path().last(),
            Some(&"PlaceAutocompleteElement")
        );
    }
}
