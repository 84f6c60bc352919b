use serde::{Deserialize, Serialize};

/// Par latitud/longitud resuelto por el SDK de mapas.
/// Serializa como `LatLngLiteral` (`{ lat, lng }`) para pasarlo tal cual a Google Maps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Coordenadas finitas y dentro de rango
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Rectángulo suroeste / noreste que contiene un conjunto de ubicaciones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Location,
    pub north_east: Location,
}

impl Bounds {
    /// Bounds degenerado (un solo punto)
    pub fn around(point: Location) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Amplía el rectángulo para incluir `point`
    pub fn extend(mut self, point: Location) -> Self {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
        self
    }

    /// Bounds mínimo que contiene todos los puntos (None si no hay puntos)
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::around(first), Self::extend))
    }

    pub fn contains(&self, point: &Location) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_every_point() {
        let pickup = Location::new(40.0, -74.0);
        let dropoff = Location::new(40.1, -74.1);
        let bounds = Bounds::from_points([pickup, dropoff]).unwrap();

        assert!(bounds.contains(&pickup));
        assert!(bounds.contains(&dropoff));
        assert_eq!(bounds.south_west, Location::new(40.0, -74.1));
        assert_eq!(bounds.north_east, Location::new(40.1, -74.0));
        assert!(!bounds.contains(&Location::new(41.0, -74.05)));
    }

    #[test]
    fn no_points_no_bounds() {
        assert_eq!(Bounds::from_points(Vec::new()), None);
    }

    #[test]
    fn out_of_range_coordinates_are_invalid() {
        assert!(Location::new(40.7128, -74.006).is_valid());
        assert!(!Location::new(91.0, 0.0).is_valid());
        assert!(!Location::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn serializes_as_lat_lng_literal() {
        let json = serde_json::to_string(&Location::new(40.0, -74.0)).unwrap();
        assert_eq!(json, r#"{"lat":40.0,"lng":-74.0}"#);
    }
}
