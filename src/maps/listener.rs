/// Registro de listeners con liberación garantizada.
/// Al soltarse (unmount normal, error o early return) ejecuta su release una sola vez.
#[must_use = "soltar el guard libera los listeners inmediatamente"]
pub struct ListenerGuard {
    label: String,
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    pub fn new<F>(label: impl Into<String>, release: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            label: label.into(),
            release: Some(Box::new(release)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Liberación explícita (equivale a drop)
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            log::debug!("🔌 [LISTENER] Liberando listeners de {}", self.label);
            release();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("label", &self.label)
            .field("released", &self.release.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn releases_exactly_once() {
        let count = Rc::new(Cell::new(0));
        let guard = {
            let count = count.clone();
            ListenerGuard::new("pickup", move || count.set(count.get() + 1))
        };
        assert_eq!(count.get(), 0);
        guard.release();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn releases_on_early_exit() {
        let count = Rc::new(Cell::new(0));

        let attempt = |fail: bool| -> Result<ListenerGuard, String> {
            let count = count.clone();
            let guard = ListenerGuard::new("dropoff", move || count.set(count.get() + 1));
            if fail {
                return Err("mount failed".to_string());
            }
            Ok(guard)
        };

        assert!(attempt(true).is_err());
        assert_eq!(count.get(), 1);

        let kept = attempt(false).unwrap();
        assert_eq!(count.get(), 1);
        drop(kept);
        assert_eq!(count.get(), 2);
    }
}
