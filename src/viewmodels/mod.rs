pub mod ride_viewmodel;

pub use ride_viewmodel::{PlannerError, RidePlannerViewModel, MISSING_SELECTION_MESSAGE};
