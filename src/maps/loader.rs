// ============================================================================
// MAPS LOADER - Inyección única del SDK + readiness gate
// ============================================================================
// Una instancia por proceso (creada en el bootstrap y compartida por
// referencia). Llamar a `ensure_loaded` N veces inserta como mucho un script.
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use crate::config::ReadinessConfig;
use super::readiness::{LoadError, ReadinessPhase, ReadinessSignal};
use super::traits::{Scheduler, ScriptHost};

const SCRIPT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// URL del SDK con la librería `places` y carga asíncrona
pub fn script_url(api_key: &str) -> String {
    format!(
        "{}?key={}&libraries=places&loading=async",
        SCRIPT_BASE_URL,
        urlencoding::encode(api_key.trim())
    )
}

/// Handle compartido del loader
pub struct MapsLoader<H: ScriptHost, S: Scheduler> {
    inner: Rc<LoaderInner<H, S>>,
}

impl<H: ScriptHost, S: Scheduler> Clone for MapsLoader<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct LoaderInner<H: ScriptHost, S: Scheduler> {
    host: H,
    scheduler: S,
    readiness: ReadinessConfig,
    capability_path: &'static [&'static str],
    phase: RefCell<ReadinessPhase>,
    script: RefCell<Option<H::Script>>,
    signal: ReadinessSignal,
}

impl<H: ScriptHost + 'static, S: Scheduler + 'static> MapsLoader<H, S> {
    pub fn new(
        host: H,
        scheduler: S,
        readiness: ReadinessConfig,
        capability_path: &'static [&'static str],
    ) -> Self {
        Self {
            inner: Rc::new(LoaderInner {
                host,
                scheduler,
                readiness,
                capability_path,
                phase: RefCell::new(ReadinessPhase::Unloaded),
                script: RefCell::new(None),
                signal: ReadinessSignal::new(),
            }),
        }
    }

    pub fn phase(&self) -> ReadinessPhase {
        self.inner.phase.borrow().clone()
    }

    /// Señal compartida (la misma en cada llamada)
    pub fn signal(&self) -> ReadinessSignal {
        self.inner.signal.clone()
    }

    /// Asegura que el SDK está cargado. Idempotente: a partir de la primera
    /// llamada solo devuelve la señal existente.
    pub fn ensure_loaded(&self, api_key: &str) -> ReadinessSignal {
        let inner = &self.inner;

        if *inner.phase.borrow() != ReadinessPhase::Unloaded {
            log::debug!("🗺️ [LOADER] Carga ya iniciada ({:?}), reutilizando señal", inner.phase.borrow());
            return self.signal();
        }

        if api_key.trim().is_empty() {
            log::error!("❌ [LOADER] Falta la API key de Google Maps");
            LoaderInner::fail(inner, LoadError::MissingApiKey);
            return self.signal();
        }

        if inner.host.namespace_present() {
            log::info!("♻️ [LOADER] google.maps ya presente, no se inserta script");
            LoaderInner::script_loaded(inner);
            return self.signal();
        }

        inner.set_phase(ReadinessPhase::ScriptPending);
        log::info!("📥 [LOADER] Insertando script de Google Maps...");

        let on_load = {
            let weak = Rc::downgrade(inner);
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    log::info!("✅ [LOADER] Script cargado");
                    LoaderInner::script_loaded(&inner);
                }
            }) as Box<dyn FnOnce()>
        };
        let on_error = {
            let weak = Rc::downgrade(inner);
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    log::error!("❌ [LOADER] Error de red cargando el script de Google Maps");
                    LoaderInner::fail(&inner, LoadError::ScriptFailed);
                }
            }) as Box<dyn FnOnce()>
        };

        match inner.host.insert_script(&script_url(api_key), on_load, on_error) {
            Ok(script) => {
                *inner.script.borrow_mut() = Some(script);
            }
            Err(e) => {
                log::error!("❌ [LOADER] No se pudo insertar el script: {}", e);
                LoaderInner::fail(inner, LoadError::ScriptInsertFailed(e.to_string()));
            }
        }

        self.signal()
    }

    /// Retira el script insertado si sigue adjunto (best effort; `google.maps` persiste)
    pub fn teardown(&self) {
        self.inner.remove_script();
    }
}

impl<H: ScriptHost, S: Scheduler> LoaderInner<H, S> {
    fn set_phase(&self, phase: ReadinessPhase) {
        *self.phase.borrow_mut() = phase;
    }

    fn remove_script(&self) {
        if let Some(script) = self.script.borrow_mut().take() {
            log::debug!("🧹 [LOADER] Retirando script de Google Maps");
            self.host.remove_script(&script);
        }
    }
}

impl<H: ScriptHost + 'static, S: Scheduler + 'static> LoaderInner<H, S> {
    fn fail(inner: &Rc<Self>, error: LoadError) {
        if inner.phase.borrow().is_terminal() {
            return;
        }
        inner.set_phase(ReadinessPhase::Failed(error.clone()));
        inner.signal.resolve(Err(error));
    }

    fn script_loaded(inner: &Rc<Self>) {
        if !matches!(
            *inner.phase.borrow(),
            ReadinessPhase::Unloaded | ReadinessPhase::ScriptPending
        ) {
            return;
        }
        inner.set_phase(ReadinessPhase::ScriptLoaded);
        Self::poll_capability(Rc::downgrade(inner), 0);
    }

    /// El evento `load` llega antes de que los sub-namespaces estén poblados:
    /// sondeo a intervalo fijo con tope de intentos.
    fn poll_capability(weak: Weak<Self>, attempt: u32) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if *inner.phase.borrow() != ReadinessPhase::ScriptLoaded {
            return;
        }

        if inner.host.capability_present(inner.capability_path) {
            log::info!(
                "✅ [LOADER] {} disponible (intento {})",
                inner.capability_path.join("."),
                attempt + 1
            );
            inner.set_phase(ReadinessPhase::CapabilityReady);
            inner.signal.resolve(Ok(()));
            return;
        }

        let attempts = attempt + 1;
        if attempts >= inner.readiness.max_attempts {
            log::error!(
                "⏱️ [LOADER] {} no apareció tras {} intentos",
                inner.capability_path.join("."),
                attempts
            );
            Self::fail(&inner, LoadError::CapabilityTimeout { attempts });
            return;
        }

        let next = weak.clone();
        inner.scheduler.schedule(
            inner.readiness.poll_interval_ms,
            Box::new(move || Self::poll_capability(next, attempts)),
        );
    }
}

impl<H: ScriptHost, S: Scheduler> Drop for LoaderInner<H, S> {
    fn drop(&mut self) {
        self.remove_script();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;

    const CAPABILITY: &[&str] = &["google", "maps", "places", "Autocomplete"];

    type Pending = Option<(Box<dyn FnOnce()>, Box<dyn FnOnce()>)>;

    /// Documento falso: cuenta inserciones y guarda los callbacks del script
    #[derive(Clone, Default)]
    struct FakeHost {
        namespace: Rc<Cell<bool>>,
        capability: Rc<Cell<bool>>,
        insertions: Rc<Cell<usize>>,
        removals: Rc<Cell<usize>>,
        last_src: Rc<RefCell<Option<String>>>,
        pending: Rc<RefCell<Pending>>,
        refuse_insert: Rc<Cell<bool>>,
    }

    impl FakeHost {
        fn fire_load(&self) {
            let (on_load, _) = self.pending.borrow_mut().take().expect("no script pending");
            self.namespace.set(true);
            on_load();
        }

        fn fire_error(&self) {
            let (_, on_error) = self.pending.borrow_mut().take().expect("no script pending");
            on_error();
        }
    }

    impl ScriptHost for FakeHost {
        type Script = usize;

        fn namespace_present(&self) -> bool {
            self.namespace.get()
        }

        fn capability_present(&self, path: &[&str]) -> bool {
            assert_eq!(path, CAPABILITY);
            self.capability.get()
        }

        fn insert_script(
            &self,
            src: &str,
            on_load: Box<dyn FnOnce()>,
            on_error: Box<dyn FnOnce()>,
        ) -> Result<usize, crate::maps::MapError> {
            if self.refuse_insert.get() {
                return Err(crate::maps::MapError::MissingElement("head".to_string()));
            }
            self.insertions.set(self.insertions.get() + 1);
            *self.last_src.borrow_mut() = Some(src.to_string());
            *self.pending.borrow_mut() = Some((on_load, on_error));
            Ok(self.insertions.get())
        }

        fn remove_script(&self, _script: &usize) {
            self.removals.set(self.removals.get() + 1);
        }
    }

    /// Planificador manual: las tareas se ejecutan cuando el test lo decide
    #[derive(Clone, Default)]
    struct ManualScheduler {
        tasks: Rc<RefCell<VecDeque<(u32, Box<dyn FnOnce()>)>>>,
    }

    impl ManualScheduler {
        fn run_next(&self) -> Option<u32> {
            let (delay, task) = self.tasks.borrow_mut().pop_front()?;
            task();
            Some(delay)
        }

        fn pending(&self) -> usize {
            self.tasks.borrow().len()
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.tasks.borrow_mut().push_back((delay_ms, task));
        }
    }

    fn loader(host: &FakeHost, scheduler: &ManualScheduler, max_attempts: u32) -> MapsLoader<FakeHost, ManualScheduler> {
        MapsLoader::new(
            host.clone(),
            scheduler.clone(),
            ReadinessConfig {
                poll_interval_ms: 100,
                max_attempts,
            },
            CAPABILITY,
        )
    }

    fn record(signal: &ReadinessSignal) -> Rc<RefCell<Vec<Result<(), LoadError>>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in = seen.clone();
        signal.subscribe(move |outcome| seen_in.borrow_mut().push(outcome));
        seen
    }

    #[test]
    fn missing_key_fails_without_inserting() {
        let host = FakeHost::default();
        let scheduler = ManualScheduler::default();
        let loader = loader(&host, &scheduler, 10);

        let seen = record(&loader.ensure_loaded("   "));

        assert_eq!(host.insertions.get(), 0);
        assert_eq!(loader.phase(), ReadinessPhase::Failed(LoadError::MissingApiKey));
        assert_eq!(*seen.borrow(), vec![Err(LoadError::MissingApiKey)]);
    }

    #[test]
    fn loads_once_then_waits_for_capability() {
        let host = FakeHost::default();
        let scheduler = ManualScheduler::default();
        let loader = loader(&host, &scheduler, 10);

        let seen = record(&loader.ensure_loaded("valid"));
        // Llamadas concurrentes mientras el script está en vuelo
        loader.ensure_loaded("valid");
        loader.clone().ensure_loaded("valid");

        assert_eq!(host.insertions.get(), 1);
        assert_eq!(
            host.last_src.borrow().as_deref(),
            Some("https://maps.googleapis.com/maps/api/js?key=valid&libraries=places&loading=async")
        );
        assert_eq!(loader.phase(), ReadinessPhase::ScriptPending);

        host.fire_load();
        assert_eq!(loader.phase(), ReadinessPhase::ScriptLoaded);
        assert!(seen.borrow().is_empty());

        // Dos sondeos sin la capacidad, luego aparece
        assert_eq!(scheduler.run_next(), Some(100));
        assert_eq!(loader.phase(), ReadinessPhase::ScriptLoaded);
        host.capability.set(true);
        scheduler.run_next();

        assert_eq!(loader.phase(), ReadinessPhase::CapabilityReady);
        assert_eq!(*seen.borrow(), vec![Ok(())]);
        assert_eq!(scheduler.pending(), 0);

        loader.ensure_loaded("valid");
        assert_eq!(host.insertions.get(), 1);
    }

    #[test]
    fn namespace_already_present_skips_insertion() {
        let host = FakeHost::default();
        host.namespace.set(true);
        host.capability.set(true);
        let scheduler = ManualScheduler::default();

        for _ in 0..3 {
            let loader = loader(&host, &scheduler, 10);
            let seen = record(&loader.ensure_loaded("valid"));
            assert_eq!(*seen.borrow(), vec![Ok(())]);
        }

        assert_eq!(host.insertions.get(), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn network_failure_is_terminal() {
        let host = FakeHost::default();
        let scheduler = ManualScheduler::default();
        let loader = loader(&host, &scheduler, 10);

        let seen = record(&loader.ensure_loaded("bad-key"));
        host.fire_error();

        assert_eq!(loader.phase(), ReadinessPhase::Failed(LoadError::ScriptFailed));
        assert_eq!(*seen.borrow(), vec![Err(LoadError::ScriptFailed)]);

        // Sin reintento automático
        loader.ensure_loaded("bad-key");
        assert_eq!(host.insertions.get(), 1);
    }

    #[test]
    fn insert_failure_reports_error() {
        let host = FakeHost::default();
        host.refuse_insert.set(true);
        let scheduler = ManualScheduler::default();
        let loader = loader(&host, &scheduler, 10);

        let seen = record(&loader.ensure_loaded("valid"));
        assert!(matches!(seen.borrow()[0], Err(LoadError::ScriptInsertFailed(_))));
    }

    #[test]
    fn capability_poll_is_capped() {
        let host = FakeHost::default();
        let scheduler = ManualScheduler::default();
        let loader = loader(&host, &scheduler, 3);

        let seen = record(&loader.ensure_loaded("valid"));
        host.fire_load();
        while scheduler.run_next().is_some() {}

        assert_eq!(
            loader.phase(),
            ReadinessPhase::Failed(LoadError::CapabilityTimeout { attempts: 3 })
        );
        assert_eq!(*seen.borrow(), vec![Err(LoadError::CapabilityTimeout { attempts: 3 })]);
    }

    #[test]
    fn teardown_removes_inserted_script_once() {
        let host = FakeHost::default();
        let scheduler = ManualScheduler::default();
        let loader = loader(&host, &scheduler, 10);

        loader.ensure_loaded("valid");
        loader.teardown();
        drop(loader);
        assert_eq!(host.removals.get(), 1);

        // Sin script insertado no hay nada que retirar
        host.namespace.set(true);
        let other = super::MapsLoader::new(
            host.clone(),
            scheduler.clone(),
            ReadinessConfig::default(),
            CAPABILITY,
        );
        other.ensure_loaded("valid");
        drop(other);
        assert_eq!(host.removals.get(), 1);
    }

    #[test]
    fn key_is_url_encoded() {
        assert_eq!(
            script_url(" a b&c "),
            "https://maps.googleapis.com/maps/api/js?key=a%20b%26c&libraries=places&loading=async"
        );
        assert_eq!(
            script_url("clé/1"),
            "https://maps.googleapis.com/maps/api/js?key=cl%C3%A9%2F1&libraries=places&loading=async"
        );
    }
}
