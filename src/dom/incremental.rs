// ============================================================================
// INCREMENTAL DOM UPDATES - Actualización incremental del DOM
// ============================================================================
// Solo actualiza los nodos que dependen del estado, sin re-renderizar la vista
// ============================================================================

use wasm_bindgen::prelude::*;
use crate::dom::{get_element_by_id, set_hidden, set_text_content, toggle_attribute};
use crate::maps::RouteViewState;
use crate::state::RideState;

/// Badge de distancia/duración, botón, aviso y visibilidad mapa/instrucciones
pub fn update_ride_incremental(ride: &RideState) -> Result<(), JsValue> {
    if let Some(badge) = get_element_by_id("distance-badge") {
        match ride.distance_badge() {
            Some(distance) => {
                set_text_content(&badge, distance);
                set_hidden(&badge, false)?;
            }
            None => set_hidden(&badge, true)?,
        }
    }

    if let Some(badge) = get_element_by_id("duration-badge") {
        match ride.duration_badge() {
            Some(duration) => {
                set_text_content(&badge, duration);
                set_hidden(&badge, false)?;
            }
            None => set_hidden(&badge, true)?,
        }
    }

    if let Some(button) = get_element_by_id("show-route-btn") {
        toggle_attribute(&button, "disabled", !ride.can_show_route())?;
    }

    if let Some(notice) = get_element_by_id("planner-notice") {
        match &ride.notice {
            Some(text) => {
                set_text_content(&notice, text);
                set_hidden(&notice, false)?;
            }
            None => set_hidden(&notice, true)?,
        }
    }

    let has_route = ride.has_route();
    if let Some(map_section) = get_element_by_id("map-section") {
        set_hidden(&map_section, !has_route)?;
    }
    if let Some(instructions) = get_element_by_id("route-instructions") {
        set_hidden(&instructions, has_route)?;
    }

    Ok(())
}

/// Overlay "Calculating route..." y alerta de error de la tarjeta del mapa
pub fn update_route_incremental(route: &RouteViewState) -> Result<(), JsValue> {
    if let Some(overlay) = get_element_by_id("route-loading") {
        set_hidden(&overlay, !route.loading)?;
    }

    if let Some(alert) = get_element_by_id("route-error") {
        match &route.error {
            Some(message) => {
                if let Some(text) = get_element_by_id("route-error-message") {
                    set_text_content(&text, message);
                }
                set_hidden(&alert, false)?;
            }
            None => set_hidden(&alert, true)?,
        }
    }

    Ok(())
}
