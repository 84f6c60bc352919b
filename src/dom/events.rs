// ============================================================================
// EVENT HANDLING - Listeners con alcance
// ============================================================================
// Un EventListener guarda su Closure y se desregistra en Drop: quien monta
// la vista es dueño de sus listeners y los libera al desmontar.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlInputElement};

pub struct EventListener {
    target: EventTarget,
    event_type: String,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Crear event listener genérico
    pub fn new<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type: event_type.to_string(),
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event_type, self.closure.as_ref().unchecked_ref());
    }
}

/// Click handler con alcance
pub fn on_click<F>(target: &EventTarget, mut handler: F) -> Result<EventListener, JsValue>
where
    F: FnMut() + 'static,
{
    EventListener::new(target, "click", move |event: Event| {
        event.prevent_default();
        handler();
    })
}

/// Input handler con alcance: recibe el valor actual del `<input>`
pub fn on_input_value<F>(input: &HtmlInputElement, mut handler: F) -> Result<EventListener, JsValue>
where
    F: FnMut(String) + 'static,
{
    let source = input.clone();
    EventListener::new(input, "input", move |_event: Event| handler(source.value()))
}
