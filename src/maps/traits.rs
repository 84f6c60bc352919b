// ============================================================================
// MAPS TRAITS - Costuras entre la lógica de la app y el SDK de Google Maps
// ============================================================================
// La implementación del navegador vive en maps::web; los tests usan fakes.
// ============================================================================

use crate::models::{
    AutocompleteOptions, Bounds, DirectionsResult, Location, PlaceResult, RouteRequest, RouteStatus,
};
use super::listener::ListenerGuard;

/// Documento donde se inyecta el `<script>` del SDK
pub trait ScriptHost {
    /// Handle del script insertado (se guarda para poder retirarlo)
    type Script;

    /// `window.google.maps` ya existe
    fn namespace_present(&self) -> bool;

    /// La ruta anidada (p.ej. `google.maps.places.Autocomplete`) ya existe
    fn capability_present(&self, path: &[&str]) -> bool;

    /// Inserta el script. Exactamente uno de los dos callbacks se invoca después.
    fn insert_script(
        &self,
        src: &str,
        on_load: Box<dyn FnOnce()>,
        on_error: Box<dyn FnOnce()>,
    ) -> Result<Self::Script, MapError>;

    /// Retira el script si sigue adjunto al documento
    fn remove_script(&self, script: &Self::Script);
}

/// Temporizador de un solo disparo
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Campo de texto sobre el que se monta el autocompletado
pub trait AddressField: Clone + 'static {
    fn set_text(&self, text: &str);
}

/// Autocompletado de direcciones del SDK
pub trait PlacesService {
    type Field: AddressField;

    /// Monta el autocompletado sobre `field`; `on_place_changed` recibe cada selección.
    /// Los listeners se liberan cuando se suelta el guard devuelto.
    fn attach_autocomplete(
        &self,
        field: &Self::Field,
        options: &AutocompleteOptions,
        on_place_changed: Box<dyn FnMut(PlaceResult)>,
    ) -> Result<ListenerGuard, MapError>;
}

/// Respuesta OK del servicio de rutas: parte legible + payload opaco para el renderer
pub struct DirectionsResponse<P> {
    pub result: DirectionsResult,
    pub payload: P,
}

pub type RouteCallback<P> = Box<dyn FnOnce(RouteStatus, Option<DirectionsResponse<P>>)>;

/// `google.maps.DirectionsService`: una petición, un callback, sin resultados parciales
pub trait DirectionsService {
    type Payload: 'static;

    fn route(&self, request: &RouteRequest, done: RouteCallback<Self::Payload>);
}

/// Mapa + DirectionsRenderer
pub trait MapCanvas {
    type Directions;

    fn set_directions(&self, directions: &Self::Directions);
    fn fit_bounds(&self, bounds: &Bounds);
    fn set_center(&self, center: Location, zoom: f64);
}

/// Error del mapa
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    MissingElement(String),
    Js(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::MissingElement(id) => write!(f, "Element #{} not found", id),
            MapError::Js(msg) => write!(f, "JavaScript error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}
