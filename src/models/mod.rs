pub mod location;
pub mod place;
pub mod route;

pub use location::{Bounds, Location};
pub use place::{AddressSelection, AutocompleteOptions, ElementPlace, PlaceGeometry, PlaceResult};
pub use route::{
    DirectionsLeg, DirectionsResult, DirectionsRoute, RouteRequest, RouteStatus, RouteSummary,
    TextValue, TravelMode,
};
