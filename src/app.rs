// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Bootstrap: pantalla de carga → readiness gate → planificador o error.
// El planificador montado es dueño de sus listeners y bindings; al desmontar
// se liberan todos y el loader retira el <script> del SDK.
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};
use crate::config::{AutocompleteWidget, CONFIG};
use crate::dom::{
    self, append_child, get_element_by_id, on_click, on_input_value, update_ride_incremental,
    update_route_incremental, EventListener,
};
use crate::maps::web::{
    ElementField, ElementPlaces, InputField, LegacyPlaces, TimerScheduler, WebDirections,
    WebMapCanvas, WebMapsLoader, WebRouteDisplay, WebScriptHost,
};
use crate::maps::{AddressInputBinding, MapError, PlacesService, RouteDisplay};
use crate::models::{AddressSelection, Location};
use crate::state::{AppState, BootState};
use crate::viewmodels::RidePlannerViewModel;
use crate::views::{self, planner};

type PlannerSlot = Rc<RefCell<Option<MountedPlanner>>>;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
    loader: WebMapsLoader,
    planner: PlannerSlot,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let loader = WebMapsLoader::new(
            WebScriptHost,
            TimerScheduler,
            CONFIG.readiness,
            CONFIG.autocomplete_widget.capability_path(),
        );

        Ok(Self {
            state: AppState::new(),
            root,
            loader,
            planner: Rc::new(RefCell::new(None)),
        })
    }

    /// Primer render + arranque de la carga del SDK
    pub fn start(&self) -> Result<(), JsValue> {
        {
            let state = self.state.clone();
            let root = self.root.clone();
            let planner = self.planner.clone();
            self.state.boot.subscribe(move || {
                if let Err(e) = render_screen(&state, &root, &planner) {
                    log::error!("❌ [APP] Error renderizando: {:?}", e);
                }
            });
        }

        self.render()?;

        let state = self.state.clone();
        self.loader
            .ensure_loaded(CONFIG.api_key())
            .subscribe(move |outcome| state.set_boot_outcome(outcome));
        Ok(())
    }

    /// Render completo según el estado de arranque
    pub fn render(&self) -> Result<(), JsValue> {
        render_screen(&self.state, &self.root, &self.planner)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        log::info!("🧹 [APP] Desmontando aplicación");
        self.planner.borrow_mut().take();
        self.state.clear_subscribers();
        self.root.set_inner_html("");
        self.loader.teardown();
    }
}

fn render_screen(state: &AppState, root: &Element, planner: &PlannerSlot) -> Result<(), JsValue> {
    match state.boot.get() {
        BootState::Loading => {
            root.set_inner_html("");
            append_child(root, &views::render_loading_screen()?)
        }
        BootState::Failed(error) => {
            planner.borrow_mut().take();
            root.set_inner_html("");
            append_child(root, &views::render_error_screen(&error)?)
        }
        BootState::Ready => {
            if planner.borrow().is_some() {
                return Ok(());
            }
            let mounted = MountedPlanner::mount(state, root)?;
            *planner.borrow_mut() = Some(mounted);
            Ok(())
        }
    }
}

/// Planificador montado: vive mientras la vista esté en pantalla
struct MountedPlanner {
    _viewmodel: Rc<RidePlannerViewModel>,
    bindings: Vec<AddressInputBinding>,
    _listeners: Vec<EventListener>,
    _route: Rc<RefCell<Option<WebRouteDisplay>>>,
}

impl MountedPlanner {
    fn mount(state: &AppState, root: &Element) -> Result<Self, JsValue> {
        log::info!("🧭 [APP] Montando planificador ({:?})", CONFIG.autocomplete_widget);

        root.set_inner_html("");
        append_child(root, &views::render_planner(CONFIG.autocomplete_widget)?)?;

        let viewmodel = Rc::new(RidePlannerViewModel::new(state.ride.clone()));
        let mut listeners = Vec::new();

        let bindings = match CONFIG.autocomplete_widget {
            AutocompleteWidget::Legacy => {
                let pickup = dom::require_input(planner::PICKUP_INPUT_ID)?;
                let dropoff = dom::require_input(planner::DROPOFF_INPUT_ID)?;

                let weak = Rc::downgrade(&viewmodel);
                listeners.push(on_input_value(&pickup, move |text| {
                    if let Some(vm) = weak.upgrade() {
                        vm.set_pickup_text(text);
                    }
                })?);
                let weak = Rc::downgrade(&viewmodel);
                listeners.push(on_input_value(&dropoff, move |text| {
                    if let Some(vm) = weak.upgrade() {
                        vm.set_dropoff_text(text);
                    }
                })?);

                vec![
                    bind_address(&LegacyPlaces, &InputField(pickup), "pickup", &viewmodel, RidePlannerViewModel::select_pickup)?,
                    bind_address(&LegacyPlaces, &InputField(dropoff), "dropoff", &viewmodel, RidePlannerViewModel::select_dropoff)?,
                ]
            }
            AutocompleteWidget::Element => {
                let pickup = mount_element_field(
                    planner::PICKUP_FIELD_ID,
                    planner::PICKUP_INPUT_ID,
                    planner::PICKUP_PLACEHOLDER,
                )?;
                let dropoff = mount_element_field(
                    planner::DROPOFF_FIELD_ID,
                    planner::DROPOFF_INPUT_ID,
                    planner::DROPOFF_PLACEHOLDER,
                )?;

                listeners.push(element_text_listener(&pickup, &viewmodel, RidePlannerViewModel::set_pickup_text)?);
                listeners.push(element_text_listener(&dropoff, &viewmodel, RidePlannerViewModel::set_dropoff_text)?);

                vec![
                    bind_address(&ElementPlaces, &pickup, "pickup", &viewmodel, RidePlannerViewModel::select_pickup)?,
                    bind_address(&ElementPlaces, &dropoff, "dropoff", &viewmodel, RidePlannerViewModel::select_dropoff)?,
                ]
            }
        };

        {
            let button = dom::require_element(planner::SHOW_ROUTE_BUTTON_ID)?;
            let weak = Rc::downgrade(&viewmodel);
            listeners.push(on_click(&button, move || {
                if let Some(vm) = weak.upgrade() {
                    if let Err(e) = vm.request_show_route() {
                        log::debug!("🛣️ [APP] Show Route ignorado: {}", e);
                    }
                }
            })?);
        }

        let route = Rc::new(RefCell::new(None));
        install_route_trigger(state, &viewmodel, &route);

        {
            let ride = state.ride.clone();
            state.ride.subscribe(move || {
                if let Err(e) = ride.with(update_ride_incremental) {
                    log::error!("❌ [APP] Error actualizando planificador: {:?}", e);
                }
            });
            let route_state = state.route.clone();
            state.route.subscribe(move || {
                if let Err(e) = route_state.with(update_route_incremental) {
                    log::error!("❌ [APP] Error actualizando mapa: {:?}", e);
                }
            });
        }
        state.ride.with(update_ride_incremental)?;
        state.route.with(update_route_incremental)?;

        Ok(Self {
            _viewmodel: viewmodel,
            bindings,
            _listeners: listeners,
            _route: route,
        })
    }
}

impl Drop for MountedPlanner {
    fn drop(&mut self) {
        log::info!("🧹 [APP] Liberando {} listeners del planificador", self._listeners.len());
        for binding in std::mem::take(&mut self.bindings) {
            binding.detach();
        }
    }
}

fn map_error(e: MapError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Monta el autocompletado y reenvía la selección al viewmodel (sin ciclo)
fn bind_address<P>(
    places: &P,
    field: &P::Field,
    label: &str,
    viewmodel: &Rc<RidePlannerViewModel>,
    select: fn(&RidePlannerViewModel, AddressSelection),
) -> Result<AddressInputBinding, JsValue>
where
    P: PlacesService,
{
    let weak: Weak<RidePlannerViewModel> = Rc::downgrade(viewmodel);
    AddressInputBinding::attach(places, field, label, move |selection| {
        if let Some(vm) = weak.upgrade() {
            select(&vm, selection);
        }
    })
    .map_err(map_error)
}

fn mount_element_field(container_id: &str, id: &str, placeholder: &str) -> Result<ElementField, JsValue> {
    let container: HtmlElement = dom::as_html_element(&dom::require_element(container_id)?)?;
    ElementField::mount(container, id, placeholder)
}

fn element_text_listener(
    field: &ElementField,
    viewmodel: &Rc<RidePlannerViewModel>,
    set_text: fn(&RidePlannerViewModel, String),
) -> Result<EventListener, JsValue> {
    let source = field.clone();
    let weak = Rc::downgrade(viewmodel);
    EventListener::new(field.element(), "input", move |_event| {
        if let Some(vm) = weak.upgrade() {
            set_text(&vm, source.text());
        }
    })
}

/// El mapa se crea la primera vez que hay origen y destino
fn install_route_trigger(
    state: &AppState,
    viewmodel: &Rc<RidePlannerViewModel>,
    route: &Rc<RefCell<Option<WebRouteDisplay>>>,
) {
    let route_state = state.route.clone();
    let slot = Rc::downgrade(route);
    let weak_vm = Rc::downgrade(viewmodel);

    viewmodel.set_route_trigger(move |origin: Location, destination: Location| {
        let Some(slot) = slot.upgrade() else {
            return;
        };

        if slot.borrow().is_none() {
            match create_route_display(&route_state, weak_vm.clone()) {
                Ok(display) => {
                    display.center_on(origin, CONFIG.map_config.default_zoom);
                    *slot.borrow_mut() = Some(display);
                }
                Err(e) => {
                    log::error!("❌ [APP] No se pudo crear el mapa: {:?}", e);
                    return;
                }
            }
        }

        if let Some(display) = slot.borrow().as_ref() {
            display.show_route(Some(origin), Some(destination));
        }
    });
}

fn create_route_display(
    route_state: &crate::state::ReactiveState<crate::maps::RouteViewState>,
    viewmodel: Weak<RidePlannerViewModel>,
) -> Result<WebRouteDisplay, JsValue> {
    let container = dom::as_html_element(&dom::require_element(planner::MAP_CONTAINER_ID)?)?;
    let canvas = WebMapCanvas::create(&container, &CONFIG).map_err(map_error)?;

    Ok(RouteDisplay::new(
        WebDirections::new(),
        canvas,
        route_state.clone(),
        move |summary| {
            if let Some(vm) = viewmodel.upgrade() {
                vm.set_summary(summary);
            }
        },
    ))
}
