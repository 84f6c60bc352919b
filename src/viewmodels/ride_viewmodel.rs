// ============================================================================
// RIDE VIEWMODEL - Lógica de la tarjeta "Plan Your Ride"
// ============================================================================
// Sin DOM ni SDK: recibe selecciones de los bindings de dirección y dispara
// la ruta a través de un trigger inyectado por la app.
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use crate::models::{AddressSelection, Location, RouteSummary};
use crate::state::{ReactiveState, RideState};

pub const MISSING_SELECTION_MESSAGE: &str = "Please select both pickup and dropoff locations";

type RouteTrigger = Box<dyn Fn(Location, Location)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// Falta recogida o destino resueltos
    MissingSelection,
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::MissingSelection => write!(f, "{}", MISSING_SELECTION_MESSAGE),
        }
    }
}

impl std::error::Error for PlannerError {}

/// ViewModel del planificador de viaje
pub struct RidePlannerViewModel {
    ride: ReactiveState<RideState>,
    route_trigger: RefCell<Option<RouteTrigger>>,
}

impl RidePlannerViewModel {
    pub fn new(ride: ReactiveState<RideState>) -> Self {
        Self {
            ride,
            route_trigger: RefCell::new(None),
        }
    }

    pub fn state(&self) -> ReactiveState<RideState> {
        self.ride.clone()
    }

    /// Instala la acción que pide la ruta (normalmente un RouteDisplay)
    pub fn set_route_trigger<F>(&self, trigger: F)
    where
        F: Fn(Location, Location) + 'static,
    {
        *self.route_trigger.borrow_mut() = Some(Box::new(trigger));
    }

    pub fn select_pickup(&self, selection: AddressSelection) {
        log::info!("📍 [RIDE] Recogida: {}", selection.display);
        self.ride.update(|s| {
            s.pickup_text = selection.display.clone();
            s.pickup = Some(selection);
            s.notice = None;
        });
        self.trigger_route_if_ready();
    }

    pub fn select_dropoff(&self, selection: AddressSelection) {
        log::info!("🏁 [RIDE] Destino: {}", selection.display);
        self.ride.update(|s| {
            s.dropoff_text = selection.display.clone();
            s.dropoff = Some(selection);
            s.notice = None;
        });
        self.trigger_route_if_ready();
    }

    /// Texto escrito a mano; la selección anterior se conserva
    pub fn set_pickup_text(&self, text: String) {
        self.ride.update(|s| s.pickup_text = text);
    }

    pub fn set_dropoff_text(&self, text: String) {
        self.ride.update(|s| s.dropoff_text = text);
    }

    pub fn can_show_route(&self) -> bool {
        self.ride.with(RideState::can_show_route)
    }

    pub fn has_route(&self) -> bool {
        self.ride.with(RideState::has_route)
    }

    /// Botón "Show Route": solo valida, la ruta ya se pidió al seleccionar
    pub fn request_show_route(&self) -> Result<(), PlannerError> {
        if !self.has_route() {
            log::warn!("⚠️ [RIDE] {}", MISSING_SELECTION_MESSAGE);
            self.ride
                .update(|s| s.notice = Some(MISSING_SELECTION_MESSAGE.to_string()));
            return Err(PlannerError::MissingSelection);
        }

        if self.ride.with(|s| s.notice.is_some()) {
            self.ride.update(|s| s.notice = None);
        }
        Ok(())
    }

    /// Resumen recibido del RouteDisplay
    pub fn set_summary(&self, summary: RouteSummary) {
        self.ride.update(|s| s.summary = Some(summary));
    }

    fn trigger_route_if_ready(&self) {
        let locations = self
            .ride
            .with(|s| s.pickup_location().zip(s.dropoff_location()));

        if let Some((origin, destination)) = locations {
            match self.route_trigger.borrow().as_ref() {
                Some(trigger) => trigger(origin, destination),
                None => log::debug!("🛣️ [RIDE] Sin trigger de ruta todavía"),
            }
        }
    }
}
