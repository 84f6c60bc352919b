// ============================================================================
// GOOGLE MAPS FFI - Foreign Function Interface para el SDK de JavaScript
// ============================================================================
// Solo declaraciones de tipos/funciones JS - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlInputElement};

#[wasm_bindgen]
extern "C" {
    /// `google.maps.Map`
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    #[derive(Debug, Clone)]
    pub type GoogleMap;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Map")]
    pub fn new(container: &HtmlElement, options: &JsValue) -> GoogleMap;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &GoogleMap, bounds: &LatLngBounds);

    #[wasm_bindgen(method, js_name = setCenter)]
    pub fn set_center(this: &GoogleMap, center: &JsValue);

    #[wasm_bindgen(method, js_name = setZoom)]
    pub fn set_zoom(this: &GoogleMap, zoom: f64);

    /// `google.maps.LatLngBounds`
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    #[derive(Debug, Clone)]
    pub type LatLngBounds;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    pub fn new() -> LatLngBounds;

    #[wasm_bindgen(method)]
    pub fn extend(this: &LatLngBounds, point: &JsValue) -> LatLngBounds;

    /// `google.maps.DirectionsService`
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = DirectionsService)]
    #[derive(Debug, Clone)]
    pub type JsDirectionsService;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "DirectionsService")]
    pub fn new() -> JsDirectionsService;

    #[wasm_bindgen(method)]
    pub fn route(this: &JsDirectionsService, request: &JsValue, callback: &js_sys::Function);

    /// `google.maps.DirectionsRenderer`
    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    #[derive(Debug, Clone)]
    pub type DirectionsRenderer;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"])]
    pub fn new(options: &JsValue) -> DirectionsRenderer;

    #[wasm_bindgen(method, js_name = setDirections)]
    pub fn set_directions(this: &DirectionsRenderer, directions: &JsValue);

    /// `google.maps.places.Autocomplete`
    #[wasm_bindgen(js_namespace = ["google", "maps", "places"])]
    #[derive(Debug, Clone)]
    pub type Autocomplete;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps", "places"])]
    pub fn new(input: &HtmlInputElement, options: &JsValue) -> Autocomplete;

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &Autocomplete, event: &str, handler: &js_sys::Function) -> JsValue;

    #[wasm_bindgen(method, js_name = getPlace)]
    pub fn get_place(this: &Autocomplete) -> JsValue;

    /// `google.maps.event.clearInstanceListeners`
    #[wasm_bindgen(js_namespace = ["google", "maps", "event"], js_name = clearInstanceListeners)]
    pub fn clear_instance_listeners(instance: &JsValue);
}
