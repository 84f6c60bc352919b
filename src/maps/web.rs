// ============================================================================
// WEB MAPS - Implementación de los traits sobre el SDK JS de Google Maps
// ============================================================================

use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlInputElement, HtmlScriptElement};
use crate::config::AppConfig;
use crate::dom::{self, EventListener};
use crate::models::{
    AutocompleteOptions, Bounds, DirectionsLeg, DirectionsResult, DirectionsRoute, ElementPlace,
    Location, PlaceGeometry, PlaceResult, RouteRequest, RouteStatus, TextValue,
};
use crate::utils::google_maps_ffi as ffi;
use super::listener::ListenerGuard;
use super::options::{DirectionsRendererOptions, MapOptions};
use super::traits::{
    AddressField, DirectionsResponse, DirectionsService, MapCanvas, MapError, PlacesService,
    RouteCallback, Scheduler, ScriptHost,
};

fn js_error(context: &str, err: JsValue) -> MapError {
    MapError::Js(format!("{}: {:?}", context, err))
}

/// Lee `obj[key]` ignorando errores (undefined si no existe)
fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn present(value: &JsValue) -> bool {
    !value.is_undefined() && !value.is_null()
}

fn get_string(obj: &JsValue, key: &str) -> Option<String> {
    get(obj, key).as_string()
}

/// `LatLng` (con métodos `lat()`/`lng()`) o `LatLngLiteral` (`{lat, lng}`)
fn location_from_js(value: &JsValue) -> Option<Location> {
    if !present(value) {
        return None;
    }
    let coordinate = |key: &str| -> Option<f64> {
        let field = get(value, key);
        match field.dyn_ref::<Function>() {
            Some(getter) => getter.call0(value).ok()?.as_f64(),
            None => field.as_f64(),
        }
    };
    Some(Location::new(coordinate("lat")?, coordinate("lng")?))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, MapError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| MapError::Js(e.to_string()))
}

// ----------------------------------------------------------------------------
// Script host + timers
// ----------------------------------------------------------------------------

/// `<script>` insertado; los closures viven mientras el handle exista
pub struct InsertedScript {
    element: HtmlScriptElement,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

/// `document.head` del navegador
#[derive(Clone, Default)]
pub struct WebScriptHost;

impl ScriptHost for WebScriptHost {
    type Script = InsertedScript;

    fn namespace_present(&self) -> bool {
        self.capability_present(&["google", "maps"])
    }

    fn capability_present(&self, path: &[&str]) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let mut current: JsValue = window.into();
        for segment in path {
            current = get(&current, segment);
            if !present(&current) {
                return false;
            }
        }
        true
    }

    fn insert_script(
        &self,
        src: &str,
        on_load: Box<dyn FnOnce()>,
        on_error: Box<dyn FnOnce()>,
    ) -> Result<InsertedScript, MapError> {
        let document = dom::document().ok_or_else(|| MapError::MissingElement("document".to_string()))?;
        let head = document
            .head()
            .ok_or_else(|| MapError::MissingElement("head".to_string()))?;

        let element: HtmlScriptElement = document
            .create_element("script")
            .map_err(|e| js_error("create script", e))?
            .dyn_into()
            .map_err(|_| MapError::Js("script element cast".to_string()))?;
        element.set_src(src);
        element.set_async(true);
        element.set_defer(true);

        let on_load: Closure<dyn FnMut()> = Closure::once(on_load);
        let on_error: Closure<dyn FnMut()> = Closure::once(on_error);
        element.set_onload(Some(on_load.as_ref().unchecked_ref()));
        element.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        head.append_child(&element)
            .map_err(|e| js_error("append script", e))?;

        Ok(InsertedScript {
            element,
            _on_load: on_load,
            _on_error: on_error,
        })
    }

    fn remove_script(&self, script: &InsertedScript) {
        script.element.set_onload(None);
        script.element.set_onerror(None);
        if let Some(parent) = script.element.parent_node() {
            let _ = parent.remove_child(&script.element);
        }
    }
}

/// Temporizadores con gloo-timers
#[derive(Clone, Default)]
pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}

pub type WebMapsLoader = super::loader::MapsLoader<WebScriptHost, TimerScheduler>;

// ----------------------------------------------------------------------------
// Autocompletado
// ----------------------------------------------------------------------------

/// `<input>` sobre el que se monta `google.maps.places.Autocomplete`
#[derive(Clone)]
pub struct InputField(pub HtmlInputElement);

impl AddressField for InputField {
    fn set_text(&self, text: &str) {
        self.0.set_value(text);
    }
}

/// Autocompletado legacy (`place_changed` + `getPlace()`)
#[derive(Clone, Default)]
pub struct LegacyPlaces;

impl LegacyPlaces {
    fn place_from_js(place: &JsValue) -> PlaceResult {
        let geometry = get(place, "geometry");
        PlaceResult {
            formatted_address: get_string(place, "formatted_address"),
            name: get_string(place, "name"),
            place_id: get_string(place, "place_id"),
            geometry: location_from_js(&get(&geometry, "location"))
                .map(|location| PlaceGeometry { location }),
        }
    }
}

impl PlacesService for LegacyPlaces {
    type Field = InputField;

    fn attach_autocomplete(
        &self,
        field: &InputField,
        options: &AutocompleteOptions,
        mut on_place_changed: Box<dyn FnMut(PlaceResult)>,
    ) -> Result<ListenerGuard, MapError> {
        let autocomplete = ffi::Autocomplete::new(&field.0, &to_js(options)?);

        let source = autocomplete.clone();
        let handler = Closure::wrap(Box::new(move || {
            let place = source.get_place();
            if present(&place) {
                on_place_changed(Self::place_from_js(&place));
            }
        }) as Box<dyn FnMut()>);
        autocomplete.add_listener("place_changed", handler.as_ref().unchecked_ref());

        let label = field.0.id();
        Ok(ListenerGuard::new(format!("autocomplete #{}", label), move || {
            ffi::clear_instance_listeners(&autocomplete);
            drop(handler);
        }))
    }
}

/// `<gmp-place-autocomplete>` montado dentro de un contenedor
#[derive(Clone)]
pub struct ElementField {
    container: HtmlElement,
    element: HtmlElement,
}

impl ElementField {
    /// Crea el elemento y lo coloca en `container` (vaciándolo antes)
    pub fn mount(container: HtmlElement, id: &str, placeholder: &str) -> Result<Self, JsValue> {
        let element: HtmlElement = dom::create_element("gmp-place-autocomplete")?.dyn_into()?;
        element.set_id(id);
        element.set_attribute("placeholder", placeholder)?;
        element.set_attribute("types", "geocode")?;
        element.set_class_name("address-input");

        container.set_inner_html("");
        container.append_child(&element)?;
        Ok(Self { container, element })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Texto actual del elemento
    pub fn text(&self) -> String {
        get_string(&self.element, "value").unwrap_or_default()
    }
}

impl AddressField for ElementField {
    fn set_text(&self, text: &str) {
        if self.text() != text {
            let _ = Reflect::set(&self.element, &JsValue::from_str("value"), &JsValue::from_str(text));
        }
    }
}

/// PlaceAutocompleteElement (evento `gmp-placeselect` con `event.place`)
#[derive(Clone, Default)]
pub struct ElementPlaces;

impl ElementPlaces {
    fn place_from_event(event: &Event) -> Option<PlaceResult> {
        let place = get(event, "place");
        if !present(&place) {
            return None;
        }
        let element_place = ElementPlace {
            id: get_string(&place, "id"),
            formatted_address: get_string(&place, "formattedAddress"),
            display_name: get_string(&place, "displayName"),
            location: location_from_js(&get(&place, "location")),
        };
        Some(element_place.into())
    }
}

impl PlacesService for ElementPlaces {
    type Field = ElementField;

    fn attach_autocomplete(
        &self,
        field: &ElementField,
        _options: &AutocompleteOptions,
        mut on_place_changed: Box<dyn FnMut(PlaceResult)>,
    ) -> Result<ListenerGuard, MapError> {
        // types=geocode ya va como atributo; el elemento no acepta `fields`
        let listener = EventListener::new(field.element(), "gmp-placeselect", move |event: Event| {
            if let Some(place) = Self::place_from_event(&event) {
                on_place_changed(place);
            }
        })
        .map_err(|e| js_error("gmp-placeselect listener", e))?;

        let container = field.container.clone();
        Ok(ListenerGuard::new(format!("place element #{}", field.element.id()), move || {
            drop(listener);
            container.set_inner_html("");
        }))
    }
}

// ----------------------------------------------------------------------------
// Rutas + mapa
// ----------------------------------------------------------------------------

/// `google.maps.DirectionsService`
#[derive(Clone)]
pub struct WebDirections {
    service: ffi::JsDirectionsService,
}

impl WebDirections {
    pub fn new() -> Self {
        Self {
            service: ffi::JsDirectionsService::new(),
        }
    }

    fn result_from_js(result: &JsValue) -> DirectionsResult {
        match serde_wasm_bindgen::from_value::<DirectionsResult>(result.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Respaldo: solo el primer tramo de la primera ruta
                log::warn!("⚠️ [DIRECTIONS] No se pudo leer el resultado completo: {}", e);
                let leg = get(&get(&get(result, "routes"), "0"), "legs");
                let leg = get(&leg, "0");
                let text_value = |key: &str| {
                    let obj = get(&leg, key);
                    get_string(&obj, "text").map(|text| TextValue {
                        text,
                        value: get(&obj, "value").as_f64().unwrap_or_default(),
                    })
                };
                let legs = if present(&leg) {
                    vec![DirectionsLeg {
                        distance: text_value("distance"),
                        duration: text_value("duration"),
                    }]
                } else {
                    Vec::new()
                };
                DirectionsResult {
                    routes: vec![DirectionsRoute { legs }],
                }
            }
        }
    }
}

impl Default for WebDirections {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionsService for WebDirections {
    type Payload = JsValue;

    fn route(&self, request: &RouteRequest, done: RouteCallback<JsValue>) {
        let request_js = match to_js(request) {
            Ok(value) => value,
            Err(e) => {
                log::error!("❌ [DIRECTIONS] Petición no serializable: {}", e);
                done(RouteStatus::InvalidRequest, None);
                return;
            }
        };

        let callback = Closure::once_into_js(move |result: JsValue, status: JsValue| {
            let status = RouteStatus::from(status.as_string().unwrap_or_default().as_str());
            let response = (status.is_ok() && present(&result)).then(|| DirectionsResponse {
                result: Self::result_from_js(&result),
                payload: result,
            });
            done(status, response);
        });

        self.service.route(&request_js, callback.unchecked_ref());
    }
}

/// Mapa + DirectionsRenderer creados una vez sobre el contenedor
pub struct WebMapCanvas {
    map: ffi::GoogleMap,
    renderer: ffi::DirectionsRenderer,
}

impl WebMapCanvas {
    pub fn create(container: &HtmlElement, config: &AppConfig) -> Result<Self, MapError> {
        let map = ffi::GoogleMap::new(container, &to_js(&MapOptions::from_config(config))?);

        let renderer_options = to_js(&DirectionsRendererOptions::from_config(config))?;
        Reflect::set(&renderer_options, &JsValue::from_str("map"), &map)
            .map_err(|e| js_error("renderer options", e))?;
        let renderer = ffi::DirectionsRenderer::new(&renderer_options);

        log::info!("🗺️ [MAP] Mapa creado");
        Ok(Self { map, renderer })
    }
}

impl MapCanvas for WebMapCanvas {
    type Directions = JsValue;

    fn set_directions(&self, directions: &JsValue) {
        self.renderer.set_directions(directions);
    }

    fn fit_bounds(&self, bounds: &Bounds) {
        let lat_lng_bounds = ffi::LatLngBounds::new();
        for corner in [bounds.south_west, bounds.north_east] {
            match to_js(&corner) {
                Ok(point) => {
                    lat_lng_bounds.extend(&point);
                }
                Err(e) => log::warn!("⚠️ [MAP] Esquina no serializable: {}", e),
            }
        }
        self.map.fit_bounds(&lat_lng_bounds);
    }

    fn set_center(&self, center: Location, zoom: f64) {
        match to_js(&center) {
            Ok(point) => {
                self.map.set_center(&point);
                self.map.set_zoom(zoom);
            }
            Err(e) => log::warn!("⚠️ [MAP] Centro no serializable: {}", e),
        }
    }
}

pub type WebRouteDisplay = super::directions::RouteDisplay<WebDirections, WebMapCanvas>;
