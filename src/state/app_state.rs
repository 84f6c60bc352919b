// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use crate::maps::{LoadError, RouteViewState};
use crate::state::{ReactiveState, RideState};

/// Pantalla a mostrar según el bootstrap del SDK
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BootState {
    #[default]
    Loading,
    Ready,
    Failed(LoadError),
}

/// Estado global de la aplicación (clones comparten todo)
#[derive(Clone, Default)]
pub struct AppState {
    pub boot: ReactiveState<BootState>,
    pub ride: ReactiveState<RideState>,
    pub route: ReactiveState<RouteViewState>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        Self::default()
    }

    /// Suelta los subscribers de todos los estados (desmontaje)
    pub fn clear_subscribers(&self) {
        self.boot.clear_subscribers();
        self.ride.clear_subscribers();
        self.route.clear_subscribers();
    }

    /// Resultado de la readiness gate
    pub fn set_boot_outcome(&self, outcome: Result<(), LoadError>) {
        let next = match outcome {
            Ok(()) => BootState::Ready,
            Err(e) => BootState::Failed(e),
        };
        if self.boot.with(|current| *current != next) {
            self.boot.set(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn boot_outcome_notifies_once_per_change() {
        let state = AppState::new();
        let renders = Rc::new(Cell::new(0));
        {
            let renders = renders.clone();
            state.boot.subscribe(move || renders.set(renders.get() + 1));
        }

        state.set_boot_outcome(Err(LoadError::MissingApiKey));
        state.set_boot_outcome(Err(LoadError::MissingApiKey));

        assert_eq!(renders.get(), 1);
        assert_eq!(state.boot.get(), BootState::Failed(LoadError::MissingApiKey));
    }

    #[test]
    fn cleared_state_no_longer_renders() {
        let state = AppState::new();
        let renders = Rc::new(Cell::new(0));
        {
            let captured = state.clone();
            let renders = renders.clone();
            state.boot.subscribe(move || {
                let _ = captured.ride.get();
                renders.set(renders.get() + 1);
            });
        }

        state.clear_subscribers();
        state.set_boot_outcome(Ok(()));

        assert_eq!(renders.get(), 0);
        assert_eq!(Rc::strong_count(&renders), 1);
        assert_eq!(state.boot.get(), BootState::Ready);
    }
}
