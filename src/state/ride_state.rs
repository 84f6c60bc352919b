// ============================================================================
// RIDE STATE - Estado del formulario de viaje (recogida / destino / resumen)
// ============================================================================

use crate::models::{AddressSelection, Location, RouteSummary};

/// Estado de la tarjeta "Plan Your Ride"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideState {
    /// Texto escrito en cada input (puede no corresponder a una selección)
    pub pickup_text: String,
    pub dropoff_text: String,
    pub pickup: Option<AddressSelection>,
    pub dropoff: Option<AddressSelection>,
    /// Último resumen de ruta recibido (persiste aunque falle una ruta posterior)
    pub summary: Option<RouteSummary>,
    /// Aviso visible en la tarjeta (p.ej. falta una ubicación)
    pub notice: Option<String>,
}

impl RideState {
    pub fn pickup_location(&self) -> Option<Location> {
        self.pickup.as_ref().map(|s| s.location)
    }

    pub fn dropoff_location(&self) -> Option<Location> {
        self.dropoff.as_ref().map(|s| s.location)
    }

    /// Ambas ubicaciones resueltas
    pub fn has_route(&self) -> bool {
        self.pickup.is_some() && self.dropoff.is_some()
    }

    /// El botón "Show Route" se habilita con ambos textos no vacíos
    /// (sin recortar: un espacio ya cuenta como texto)
    pub fn can_show_route(&self) -> bool {
        !self.pickup_text.is_empty() && !self.dropoff_text.is_empty()
    }

    /// Texto del badge de distancia (None = oculto)
    pub fn distance_badge(&self) -> Option<&str> {
        self.summary
            .as_ref()
            .map(|s| s.distance.as_str())
            .filter(|d| !d.is_empty())
    }

    pub fn duration_badge(&self) -> Option<&str> {
        self.summary.as_ref().and_then(|s| s.duration.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(display: &str, lat: f64, lng: f64) -> AddressSelection {
        AddressSelection {
            display: display.to_string(),
            location: Location::new(lat, lng),
        }
    }

    #[test]
    fn route_needs_both_selections() {
        let mut state = RideState::default();
        assert!(!state.has_route());
        state.pickup = Some(selection("123 Main St", 40.0, -74.0));
        assert!(!state.has_route());
        state.dropoff = Some(selection("456 Oak Ave", 40.1, -74.1));
        assert!(state.has_route());
        assert_eq!(state.dropoff_location(), Some(Location::new(40.1, -74.1)));
    }

    #[test]
    fn button_follows_typed_text() {
        let mut state = RideState {
            pickup_text: "123".to_string(),
            ..Default::default()
        };
        assert!(!state.can_show_route());
        state.dropoff_text = "456".to_string();
        assert!(state.can_show_route());
        state.pickup_text.clear();
        assert!(!state.can_show_route());
        state.pickup_text = " ".to_string();
        assert!(state.can_show_route());
    }

    #[test]
    fn empty_distance_hides_badge() {
        let mut state = RideState::default();
        assert_eq!(state.distance_badge(), None);
        state.summary = Some(RouteSummary {
            distance: String::new(),
            duration: None,
        });
        assert_eq!(state.distance_badge(), None);
        state.summary = Some(RouteSummary {
            distance: "8.3 mi".to_string(),
            duration: Some("21 mins".to_string()),
        });
        assert_eq!(state.distance_badge(), Some("8.3 mi"));
        assert_eq!(state.duration_badge(), Some("21 mins"));
    }
}
