// ============================================================================
// PLANNER VIEW - Cabecera, tarjeta "Plan Your Ride", mapa e instrucciones
// ============================================================================
// Solo estructura: listeners y bindings los monta la app sobre estos IDs.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::AutocompleteWidget;
use crate::dom::ElementBuilder;

pub const PICKUP_INPUT_ID: &str = "from";
pub const DROPOFF_INPUT_ID: &str = "to";
pub const PICKUP_FIELD_ID: &str = "from-field";
pub const DROPOFF_FIELD_ID: &str = "to-field";
pub const PICKUP_PLACEHOLDER: &str = "Enter pickup address...";
pub const DROPOFF_PLACEHOLDER: &str = "Enter dropoff address...";
pub const SHOW_ROUTE_BUTTON_ID: &str = "show-route-btn";
pub const MAP_CONTAINER_ID: &str = "map";

/// Vista completa del planificador
pub fn render_planner(widget: AutocompleteWidget) -> Result<Element, JsValue> {
    let main = ElementBuilder::new("main")?
        .class("app-main")
        .children([
            render_planner_card(widget)?,
            render_map_card()?,
            render_instructions_card()?,
        ])?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("planner-screen")
        .child(render_header()?)?
        .child(main)?
        .build())
}

fn render_header() -> Result<Element, JsValue> {
    let logo = ElementBuilder::new("div")?.class("logo").text("🧭").build();
    let title = ElementBuilder::new("h1")?.text("RideNow").build();
    let subtitle = ElementBuilder::new("p")?
        .class("subtitle")
        .text("Smart ride planning")
        .build();
    let brand = ElementBuilder::new("div")?
        .class("brand")
        .child(title)?
        .child(subtitle)?
        .build();

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .child(logo)?
        .child(brand)?
        .build())
}

fn render_planner_card(widget: AutocompleteWidget) -> Result<Element, JsValue> {
    let title = ElementBuilder::new("h2")?.text("Plan Your Ride").build();
    let description = ElementBuilder::new("p")?
        .class("card-description")
        .text("Enter your pickup and dropoff locations to see the route")
        .build();
    let distance = ElementBuilder::new("span")?
        .id("distance-badge")?
        .class("badge hidden")
        .build();
    let duration = ElementBuilder::new("span")?
        .id("duration-badge")?
        .class("badge badge-secondary hidden")
        .build();
    let badges = ElementBuilder::new("div")?
        .class("badges")
        .child(distance)?
        .child(duration)?
        .build();
    let header = ElementBuilder::new("div")?
        .class("card-header")
        .children([title, description, badges])?
        .build();

    let pickup = render_address_field(
        widget,
        "Pickup Location",
        "📍",
        PICKUP_INPUT_ID,
        PICKUP_FIELD_ID,
        PICKUP_PLACEHOLDER,
    )?;
    let dropoff = render_address_field(
        widget,
        "Dropoff Location",
        "🏁",
        DROPOFF_INPUT_ID,
        DROPOFF_FIELD_ID,
        DROPOFF_PLACEHOLDER,
    )?;
    let inputs = ElementBuilder::new("div")?
        .class("input-grid")
        .child(pickup)?
        .child(dropoff)?
        .build();

    let button = ElementBuilder::new("button")?
        .id(SHOW_ROUTE_BUTTON_ID)?
        .class("btn btn-primary")
        .attr("type", "button")?
        .attr("disabled", "")?
        .text("Show Route →")
        .build();
    let notice = ElementBuilder::new("p")?
        .id("planner-notice")?
        .class("planner-notice hidden")
        .attr("role", "alert")?
        .build();

    let content = ElementBuilder::new("div")?
        .class("card-content")
        .children([inputs, button, notice])?
        .build();

    Ok(ElementBuilder::new("section")?
        .class("card planner-card")
        .child(header)?
        .child(content)?
        .build())
}

/// Campo de dirección: `<input>` para el widget legacy, contenedor vacío
/// para `<gmp-place-autocomplete>` (lo monta ElementField)
fn render_address_field(
    widget: AutocompleteWidget,
    label: &str,
    icon: &str,
    input_id: &str,
    field_id: &str,
    placeholder: &str,
) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?
        .attr("for", input_id)?
        .text(label)
        .build();
    let icon = ElementBuilder::new("span")?.class("input-icon").text(icon).build();

    let control = match widget {
        AutocompleteWidget::Legacy => ElementBuilder::new("input")?
            .id(input_id)?
            .class("address-input")
            .attr("type", "text")?
            .attr("placeholder", placeholder)?
            .attr("autocomplete", "off")?
            .build(),
        AutocompleteWidget::Element => ElementBuilder::new("div")?
            .id(field_id)?
            .class("address-element")
            .build(),
    };

    let wrapper = ElementBuilder::new("div")?
        .class("input-wrapper")
        .child(icon)?
        .child(control)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("field-group")
        .child(label)?
        .child(wrapper)?
        .build())
}

fn render_map_card() -> Result<Element, JsValue> {
    let spinner = ElementBuilder::new("div")?.class("spinner").build();
    let loading_text = ElementBuilder::new("p")?.text("Calculating route...").build();
    let overlay = ElementBuilder::new("div")?
        .id("route-loading")?
        .class("loading-overlay hidden")
        .child(spinner)?
        .child(loading_text)?
        .build();

    let canvas = ElementBuilder::new("div")?
        .id(MAP_CONTAINER_ID)?
        .class("map-canvas")
        .build();

    let error_text = ElementBuilder::new("p")?.id("route-error-message")?.build();
    let error = ElementBuilder::new("div")?
        .id("route-error")?
        .class("alert alert-destructive map-alert hidden")
        .attr("role", "alert")?
        .child(error_text)?
        .build();

    let wrapper = ElementBuilder::new("div")?
        .class("map-wrapper")
        .children([canvas, overlay, error])?
        .build();

    Ok(ElementBuilder::new("section")?
        .id("map-section")?
        .class("card map-card hidden")
        .child(wrapper)?
        .build())
}

fn render_instructions_card() -> Result<Element, JsValue> {
    let icon = ElementBuilder::new("div")?.class("instructions-icon").text("🗺️").build();
    let title = ElementBuilder::new("h3")?.text("Ready to Plan Your Ride?").build();
    let text = ElementBuilder::new("p")?
        .text("Enter your pickup and dropoff locations above to see the best route and estimated distance.")
        .build();

    Ok(ElementBuilder::new("section")?
        .id("route-instructions")?
        .class("card instructions-card")
        .children([icon, title, text])?
        .build())
}
