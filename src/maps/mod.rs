// Módulo de mapas: lógica independiente de la plataforma + implementación web

#[cfg(target_arch = "wasm32")]
pub mod web;

// Traits comunes para todas las plataformas
pub mod traits;
pub mod listener;
pub mod options;
pub mod readiness;
pub mod loader;
pub mod autocomplete;
pub mod directions;

#[cfg(test)]
pub(crate) mod fakes;

pub use traits::{
    AddressField, DirectionsResponse, DirectionsService, MapCanvas, MapError, PlacesService,
    RouteCallback, Scheduler, ScriptHost,
};
pub use listener::ListenerGuard;
pub use options::{DirectionsRendererOptions, MapOptions};
pub use readiness::{LoadError, ReadinessOutcome, ReadinessPhase, ReadinessSignal};
pub use loader::{script_url, MapsLoader};
pub use autocomplete::AddressInputBinding;
pub use directions::{RouteDisplay, RouteViewState, ROUTE_ERROR_MESSAGE};
