// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Elemento por ID que debe existir (error JS si falta)
pub fn require_element(id: &str) -> Result<Element, JsValue> {
    get_element_by_id(id).ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))
}

/// Input por ID
pub fn require_input(id: &str) -> Result<HtmlInputElement, JsValue> {
    require_element(id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an <input>", id)))
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Establecer class name (reemplaza todas las clases)
pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

/// Mostrar/ocultar con la clase `hidden`
pub fn set_hidden(element: &Element, hidden: bool) -> Result<(), JsValue> {
    if hidden {
        add_class(element, "hidden")
    } else {
        remove_class(element, "hidden")
    }
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Remover atributo
pub fn remove_attribute(element: &Element, name: &str) -> Result<(), JsValue> {
    element.remove_attribute(name)
}

/// Atributo booleano (`disabled`, `hidden`...)
pub fn toggle_attribute(element: &Element, name: &str, on: bool) -> Result<(), JsValue> {
    if on {
        set_attribute(element, name, "")
    } else {
        remove_attribute(element, name)
    }
}

/// Cast a HtmlElement (contenedores del mapa, foco...)
pub fn as_html_element(element: &Element) -> Result<HtmlElement, JsValue> {
    element
        .dyn_ref::<HtmlElement>()
        .cloned()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlElement"))
}
