// ============================================================================
// SCREENS - Pantallas de carga y de error del SDK
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::maps::LoadError;

/// Spinner mientras la readiness gate no se resuelve
pub fn render_loading_screen() -> Result<Element, JsValue> {
    let spinner = ElementBuilder::new("div")?.class("spinner").build();
    let text = ElementBuilder::new("p")?
        .class("loading-text")
        .text("Loading Google Maps...")
        .build();

    Ok(ElementBuilder::new("div")?
        .class("loading-screen")
        .attr("role", "status")?
        .child(spinner)?
        .child(text)?
        .build())
}

/// Error terminal de carga (sin reintento automático)
pub fn render_error_screen(error: &LoadError) -> Result<Element, JsValue> {
    log::error!("❌ [SCREEN] {}", error);

    let title = ElementBuilder::new("h2")?
        .class("alert-title")
        .text("Error Loading Maps")
        .build();
    let message = ElementBuilder::new("p")?
        .id("load-error-message")?
        .class("alert-description")
        .text(error.message())
        .build();

    let hint_title = ElementBuilder::new("p")?
        .class("hint-title")
        .text("🔑 Add your Google Maps API Key")
        .build();
    let hint_text = ElementBuilder::new("p")?
        .class("hint-text")
        .text(error.hint())
        .build();
    let hint = ElementBuilder::new("div")?
        .class("alert-hint")
        .child(hint_title)?
        .child(hint_text)?
        .build();

    let alert = ElementBuilder::new("div")?
        .class("alert alert-destructive")
        .attr("role", "alert")?
        .children([title, message, hint])?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("error-screen")
        .child(alert)?
        .build())
}
