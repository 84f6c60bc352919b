// Implementaciones falsas de los servicios de rutas para tests nativos

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Bounds, DirectionsResult, Location, RouteRequest, RouteStatus};
use super::traits::{DirectionsResponse, DirectionsService, MapCanvas, RouteCallback};

/// Servicio falso: encola peticiones y deja que el test responda
#[derive(Clone, Default)]
pub(crate) struct FakeDirections {
    pub requests: Rc<RefCell<Vec<(RouteRequest, RouteCallback<&'static str>)>>>,
}

impl FakeDirections {
    pub fn respond(&self, index: usize, status: &str, payload: &'static str, distance: &str) {
        let (_, done) = self.requests.borrow_mut().remove(index);
        let result: DirectionsResult = serde_json::from_value(serde_json::json!({
            "routes": [ { "legs": [ {
                "distance": { "text": distance, "value": 13358 },
                "duration": { "text": "21 mins", "value": 1260 }
            } ] } ]
        }))
        .unwrap();
        let status = RouteStatus::from(status);
        let response = status.is_ok().then(|| DirectionsResponse { result, payload });
        done(status, response);
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl DirectionsService for FakeDirections {
    type Payload = &'static str;

    fn route(&self, request: &RouteRequest, done: RouteCallback<&'static str>) {
        self.requests.borrow_mut().push((request.clone(), done));
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeCanvas {
    pub rendered: Rc<RefCell<Vec<&'static str>>>,
    pub bounds: Rc<RefCell<Option<Bounds>>>,
    pub centers: Rc<RefCell<Vec<Location>>>,
}

impl MapCanvas for FakeCanvas {
    type Directions = &'static str;

    fn set_directions(&self, directions: &&'static str) {
        self.rendered.borrow_mut().push(*directions);
    }

    fn fit_bounds(&self, bounds: &Bounds) {
        *self.bounds.borrow_mut() = Some(*bounds);
    }

    fn set_center(&self, center: Location, _zoom: f64) {
        self.centers.borrow_mut().push(center);
    }
}
