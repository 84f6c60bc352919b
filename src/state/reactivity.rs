// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Estado reactivo con sistema de notificaciones.
/// Los clones comparten valor y subscribers.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl<T> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Leer el valor sin clonarlo
    pub fn with<R, F>(&self, reader: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Elimina todos los subscribers (rompe los ciclos de closures que
    /// capturan un clon del propio estado)
    pub fn clear_subscribers(&self) {
        let removed: Vec<Callback> = self.subscribers.borrow_mut().drain(..).collect();
        drop(removed);
    }

    /// Notificar a todos los subscribers (pueden leer el estado o suscribir otros)
    fn notify(&self) {
        let subscribers: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(0u32);
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            state.subscribe(move || hits.set(hits.get() + 1));
        }

        let other = state.clone();
        other.set(5);
        other.update(|v| *v += 1);

        assert_eq!(state.get(), 6);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn clearing_subscribers_releases_captured_clones() {
        let state = ReactiveState::new(0u32);
        let hits = Rc::new(Cell::new(0));
        {
            let reader = state.clone();
            let hits = hits.clone();
            state.subscribe(move || hits.set(reader.get()));
        }
        assert_eq!(Rc::strong_count(&hits), 2);

        state.clear_subscribers();
        assert_eq!(Rc::strong_count(&hits), 1);

        state.set(7);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn subscriber_can_read_during_notify() {
        let state = ReactiveState::new(String::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let reader = state.clone();
            let seen = seen.clone();
            state.subscribe(move || seen.borrow_mut().push(reader.get()));
        }
        state.set("a".to_string());
        state.update(|s| s.push('b'));
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "ab".to_string()]);
    }
}
