// ============================================================================
// ADDRESS INPUT BINDING - Autocompletado del SDK → callback del llamador
// ============================================================================
// Adaptador puro: no guarda ubicación. Traduce `place_changed` en una
// AddressSelection y actualiza el texto del campo.
// ============================================================================

use crate::models::{AddressSelection, AutocompleteOptions, PlaceResult};
use super::listener::ListenerGuard;
use super::traits::{AddressField, MapError, PlacesService};

/// Binding montado; al soltarse libera los listeners del objeto de autocompletado
#[derive(Debug)]
pub struct AddressInputBinding {
    label: String,
    _listeners: ListenerGuard,
}

impl AddressInputBinding {
    /// Monta el autocompletado (solo `geocode`, campos mínimos) sobre `field`
    pub fn attach<P, F>(
        places: &P,
        field: &P::Field,
        label: &str,
        on_selected: F,
    ) -> Result<Self, MapError>
    where
        P: PlacesService,
        F: Fn(AddressSelection) + 'static,
    {
        let field_for_events = field.clone();
        let event_label = label.to_string();

        let on_place_changed = move |place: PlaceResult| {
            handle_place_changed(&event_label, &place, &field_for_events, &on_selected);
        };

        let listeners = places.attach_autocomplete(
            field,
            &AutocompleteOptions::default(),
            Box::new(on_place_changed),
        )?;

        log::info!("📍 [AUTOCOMPLETE] Autocompletado montado en {}", label);
        Ok(Self {
            label: label.to_string(),
            _listeners: listeners,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Unmount explícito
    pub fn detach(self) {
        log::info!("🔌 [AUTOCOMPLETE] Desmontando {}", self.label);
    }
}

/// Sin geometría la selección se ignora: ni callback ni cambio de texto
fn handle_place_changed<Fd, F>(label: &str, place: &PlaceResult, field: &Fd, on_selected: &F)
where
    Fd: AddressField,
    F: Fn(AddressSelection),
{
    let Some(selection) = AddressSelection::from_place(place) else {
        log::debug!(
            "🤷 [AUTOCOMPLETE] {}: lugar sin geometría, ignorado: {}",
            label,
            serde_json::to_string(place).unwrap_or_default()
        );
        return;
    };

    log::info!(
        "📍 [AUTOCOMPLETE] {}: {} ({}, {})",
        label,
        selection.display,
        selection.location.lat,
        selection.location.lng
    );
    let display = selection.display.clone();
    on_selected(selection);
    field.set_text(&display);
}
