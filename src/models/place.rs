use serde::{Deserialize, Serialize};
use super::Location;

/// Subconjunto del `PlaceResult` de Google que leen los bindings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceGeometry {
    pub location: Location,
}

impl PlaceResult {
    /// Texto a mostrar en el input: dirección formateada, si no el nombre
    pub fn display_text(&self) -> String {
        self.formatted_address
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref())
            .unwrap_or("")
            .to_string()
    }

    pub fn location(&self) -> Option<Location> {
        self.geometry.map(|g| g.location)
    }
}

/// Lugar en el formato nuevo (`PlaceAutocompleteElement`, evento `gmp-placeselect`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPlace {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl From<ElementPlace> for PlaceResult {
    /// Conversión al formato legacy para reutilizar las mismas reglas de selección
    fn from(place: ElementPlace) -> Self {
        let formatted_address = place
            .formatted_address
            .filter(|s| !s.is_empty())
            .or_else(|| place.display_name.clone());

        Self {
            formatted_address,
            name: place.display_name,
            place_id: place.id,
            geometry: place.location.map(|location| PlaceGeometry { location }),
        }
    }
}

/// Selección aceptada: texto + coordenadas (nunca parcial)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSelection {
    pub display: String,
    pub location: Location,
}

impl AddressSelection {
    /// None cuando el lugar no trae geometría (la selección se ignora)
    pub fn from_place(place: &PlaceResult) -> Option<Self> {
        let location = place.location().filter(Location::is_valid)?;
        Some(Self {
            display: place.display_text(),
            location,
        })
    }
}

/// Opciones con las que se construye el autocompletado del SDK
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutocompleteOptions {
    pub types: Vec<String>,
    pub fields: Vec<String>,
}

impl Default for AutocompleteOptions {
    fn default() -> Self {
        Self {
            types: vec!["geocode".to_string()],
            fields: vec![
                "formatted_address".to_string(),
                "geometry".to_string(),
                "name".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(formatted: Option<&str>, name: Option<&str>, location: Option<Location>) -> PlaceResult {
        PlaceResult {
            formatted_address: formatted.map(str::to_string),
            name: name.map(str::to_string),
            place_id: None,
            geometry: location.map(|location| PlaceGeometry { location }),
        }
    }

    #[test]
    fn selection_requires_geometry() {
        let without = place(Some("123 Main St"), None, None);
        assert_eq!(AddressSelection::from_place(&without), None);

        let with = place(Some("123 Main St"), None, Some(Location::new(40.0, -74.0)));
        let selection = AddressSelection::from_place(&with).unwrap();
        assert_eq!(selection.display, "123 Main St");
        assert_eq!(selection.location, Location::new(40.0, -74.0));
    }

    #[test]
    fn selection_rejects_non_finite_coordinates() {
        let nan = place(Some("Nowhere"), None, Some(Location::new(f64::NAN, -74.0)));
        assert_eq!(AddressSelection::from_place(&nan), None);

        let out_of_range = place(Some("Nowhere"), None, Some(Location::new(40.0, 200.0)));
        assert_eq!(AddressSelection::from_place(&out_of_range), None);
    }

    #[test]
    fn display_text_falls_back_to_name_then_empty() {
        let location = Some(Location::new(1.0, 2.0));
        assert_eq!(place(None, Some("Central Park"), location).display_text(), "Central Park");
        assert_eq!(place(Some(""), Some("Central Park"), location).display_text(), "Central Park");
        assert_eq!(place(None, None, location).display_text(), "");
    }

    #[test]
    fn element_place_converts_to_legacy_shape() {
        let converted: PlaceResult = ElementPlace {
            id: Some("abc".to_string()),
            formatted_address: None,
            display_name: Some("456 Oak Ave".to_string()),
            location: Some(Location::new(40.1, -74.1)),
        }
        .into();

        assert_eq!(converted.formatted_address.as_deref(), Some("456 Oak Ave"));
        assert_eq!(converted.name.as_deref(), Some("456 Oak Ave"));
        assert_eq!(converted.place_id.as_deref(), Some("abc"));
        assert_eq!(converted.location(), Some(Location::new(40.1, -74.1)));

        let no_location: PlaceResult = ElementPlace {
            display_name: Some("Nowhere".to_string()),
            ..Default::default()
        }
        .into();
        assert!(no_location.geometry.is_none());
    }

    #[test]
    fn options_request_only_needed_fields() {
        let json = serde_json::to_value(AutocompleteOptions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "types": ["geocode"],
                "fields": ["formatted_address", "geometry", "name"],
            })
        );
    }
}
