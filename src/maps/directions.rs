// ============================================================================
// ROUTE DISPLAY BINDING - Petición de ruta en coche + renderizado
// ============================================================================
// Contador de generación: solo el callback de la petición más reciente
// puede actualizar el estado o el mapa.
// ============================================================================

use std::cell::Cell;
use std::rc::{Rc, Weak};
use crate::models::{Bounds, Location, RouteRequest, RouteStatus, RouteSummary};
use crate::state::ReactiveState;
use super::traits::{DirectionsResponse, DirectionsService, MapCanvas};

pub const ROUTE_ERROR_MESSAGE: &str = "Could not calculate route. Please try different locations.";

/// Estado visible de la tarjeta del mapa
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteViewState {
    pub loading: bool,
    pub error: Option<String>,
    pub summary: Option<RouteSummary>,
    /// Ya hay una ruta dibujada en el mapa
    pub has_rendered_route: bool,
}

pub struct RouteDisplay<D, M>
where
    D: DirectionsService,
    M: MapCanvas<Directions = D::Payload>,
{
    inner: Rc<RouteInner<D, M>>,
}

struct RouteInner<D, M> {
    directions: D,
    canvas: M,
    state: ReactiveState<RouteViewState>,
    generation: Cell<u64>,
    on_summary: Box<dyn Fn(RouteSummary)>,
}

impl<D, M> RouteDisplay<D, M>
where
    D: DirectionsService + 'static,
    M: MapCanvas<Directions = D::Payload> + 'static,
{
    pub fn new<F>(directions: D, canvas: M, state: ReactiveState<RouteViewState>, on_summary: F) -> Self
    where
        F: Fn(RouteSummary) + 'static,
    {
        Self {
            inner: Rc::new(RouteInner {
                directions,
                canvas,
                state,
                generation: Cell::new(0),
                on_summary: Box::new(on_summary),
            }),
        }
    }

    pub fn state(&self) -> ReactiveState<RouteViewState> {
        self.inner.state.clone()
    }

    pub fn canvas(&self) -> &M {
        &self.inner.canvas
    }

    /// Centra el mapa (p.ej. en la recogida mientras llega la ruta)
    pub fn center_on(&self, location: Location, zoom: f64) {
        self.inner.canvas.set_center(location, zoom);
    }

    /// Pide la ruta si hay origen y destino. Devuelve si se despachó la petición;
    /// sin alguno de los dos no se hace nada y el render anterior se conserva.
    pub fn show_route(&self, origin: Option<Location>, destination: Option<Location>) -> bool {
        let (Some(origin), Some(destination)) = (origin, destination) else {
            log::debug!("🛣️ [ROUTE] Falta origen o destino, sin petición");
            return false;
        };

        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);

        self.inner.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        log::info!(
            "🛣️ [ROUTE] Petición #{}: ({}, {}) → ({}, {})",
            generation,
            origin.lat,
            origin.lng,
            destination.lat,
            destination.lng
        );

        let weak: Weak<RouteInner<D, M>> = Rc::downgrade(&self.inner);
        self.inner.directions.route(
            &RouteRequest::driving(origin, destination),
            Box::new(move |status, response| {
                if let Some(inner) = weak.upgrade() {
                    inner.complete(generation, origin, destination, status, response);
                }
            }),
        );
        true
    }
}

impl<D, M> RouteInner<D, M>
where
    D: DirectionsService,
    M: MapCanvas<Directions = D::Payload>,
{
    fn complete(
        &self,
        generation: u64,
        origin: Location,
        destination: Location,
        status: RouteStatus,
        response: Option<DirectionsResponse<D::Payload>>,
    ) {
        if generation != self.generation.get() {
            log::debug!(
                "⏭️ [ROUTE] Respuesta #{} obsoleta (actual #{}), descartada",
                generation,
                self.generation.get()
            );
            return;
        }

        let response = match (status.is_ok(), response) {
            (true, Some(response)) => response,
            (_, _) => {
                log::error!("❌ [ROUTE] Directions request failed: {}", status);
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(ROUTE_ERROR_MESSAGE.to_string());
                });
                return;
            }
        };

        self.canvas.set_directions(&response.payload);

        let summary = response.result.summary();
        if let Some(summary) = &summary {
            log::info!("📏 [ROUTE] Distancia: {}", summary.distance);
            (self.on_summary)(summary.clone());
        }

        if let Some(bounds) = Bounds::from_points([origin, destination]) {
            self.canvas.fit_bounds(&bounds);
        }

        self.state.update(|s| {
            s.loading = false;
            s.error = None;
            s.has_rendered_route = true;
            if summary.is_some() {
                s.summary = summary;
            }
        });
    }
}
