// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod ride_state;
pub mod app_state;

pub use reactivity::*;
pub use ride_state::*;
pub use app_state::*;
