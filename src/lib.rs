// ============================================================================
// RIDENOW - PLANIFICADOR DE VIAJES (RUST PURO + WASM)
// ============================================================================
// - Config: variables de entorno en tiempo de compilación
// - Maps: readiness gate del SDK, bindings de autocompletado y de rutas
// - State: State Management con Rc<RefCell> + notificaciones
// - ViewModels: lógica de la tarjeta de viaje (sin DOM)
// - Views / DOM: renderizado y actualizaciones incrementales (solo wasm32)
// ============================================================================

pub mod config;
pub mod models;
pub mod maps;
pub mod state;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;
#[cfg(target_arch = "wasm32")]
mod utils;
#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use wasm_entry::*;

#[cfg(target_arch = "wasm32")]
mod wasm_entry {
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;
    use crate::app::App;
    use crate::config::CONFIG;

    // Variable estática global para mantener la instancia de App
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        let level = if CONFIG.is_logging_enabled() {
            log::Level::Debug
        } else {
            log::Level::Warn
        };
        wasm_logger::init(Config::new(level));
        log::info!("🚀 RideNow - Rust Puro + WASM");

        let app = App::new()?;
        app.start()?;

        APP.with(|app_cell| {
            *app_cell.borrow_mut() = Some(app);
        });
        Ok(())
    }

    /// Re-render completo (llamable desde JavaScript)
    #[wasm_bindgen]
    pub fn rerender_app() {
        APP.with(|app_cell| {
            if let Some(app) = app_cell.borrow().as_ref() {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            } else {
                log::warn!("⚠️ [RERENDER] App no está inicializada");
            }
        });
    }

    /// Desmonta la app: libera listeners, bindings y el script del SDK
    #[wasm_bindgen]
    pub fn unmount_app() {
        let app = APP.with(|app_cell| app_cell.borrow_mut().take());
        drop(app);
    }
}
