// ============================================================================
// READINESS - Estado de carga del SDK + señal única de disponibilidad
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Fases del bootstrap del SDK.
/// `Unloaded → ScriptPending → ScriptLoaded → CapabilityReady`;
/// `Failed` alcanzable desde cualquier fase previa a `CapabilityReady`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadinessPhase {
    Unloaded,
    /// Script insertado, esperando su evento `load`
    ScriptPending,
    /// Namespace disponible, sondeando la capacidad anidada
    ScriptLoaded,
    CapabilityReady,
    Failed(LoadError),
}

impl ReadinessPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReadinessPhase::CapabilityReady | ReadinessPhase::Failed(_))
    }
}

/// Errores de configuración y de carga (terminales para esta carga de página)
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    MissingApiKey,
    ScriptFailed,
    ScriptInsertFailed(String),
    CapabilityTimeout { attempts: u32 },
}

impl LoadError {
    /// Mensaje para el usuario
    pub fn message(&self) -> &'static str {
        match self {
            LoadError::MissingApiKey => "Google Maps API key is missing",
            LoadError::ScriptFailed | LoadError::ScriptInsertFailed(_) => {
                "Failed to load Google Maps. Please check your API key and internet connection."
            }
            LoadError::CapabilityTimeout { .. } => {
                "Google Maps loaded, but address search never became available. Please reload the page."
            }
        }
    }

    /// Pista de remediación mostrada bajo el mensaje
    pub fn hint(&self) -> &'static str {
        match self {
            LoadError::MissingApiKey | LoadError::ScriptFailed | LoadError::ScriptInsertFailed(_) => {
                "Add your Google Maps API Key: set GOOGLE_MAPS_API_KEY in .env and rebuild."
            }
            LoadError::CapabilityTimeout { .. } => {
                "Make sure the Places API is enabled for your Google Maps API key."
            }
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::ScriptInsertFailed(detail) => write!(f, "{} ({})", self.message(), detail),
            LoadError::CapabilityTimeout { attempts } => {
                write!(f, "{} ({} attempts)", self.message(), attempts)
            }
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for LoadError {}

pub type ReadinessOutcome = Result<(), LoadError>;

type Subscriber = Box<dyn FnOnce(ReadinessOutcome)>;

/// Señal de disponibilidad: se resuelve una única vez y todos los
/// componentes se suscriben en lugar de sondear cada uno por su cuenta.
#[derive(Clone, Default)]
pub struct ReadinessSignal {
    inner: Rc<SignalInner>,
}

#[derive(Default)]
struct SignalInner {
    outcome: RefCell<Option<ReadinessOutcome>>,
    subscribers: RefCell<Vec<Subscriber>>,
}

impl ReadinessSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resultado si ya se resolvió
    pub fn outcome(&self) -> Option<ReadinessOutcome> {
        self.inner.outcome.borrow().clone()
    }

    /// Se invoca una vez con el resultado; inmediatamente si ya está resuelta
    pub fn subscribe<F>(&self, callback: F)
    where
        F: FnOnce(ReadinessOutcome) + 'static,
    {
        let settled = self.outcome();
        match settled {
            Some(outcome) => callback(outcome),
            None => self.inner.subscribers.borrow_mut().push(Box::new(callback)),
        }
    }

    /// Resuelve la señal. Solo cuenta la primera resolución.
    pub(crate) fn resolve(&self, outcome: ReadinessOutcome) -> bool {
        {
            let mut slot = self.inner.outcome.borrow_mut();
            if slot.is_some() {
                return false;
            }
            *slot = Some(outcome.clone());
        }

        // Sacar la lista antes de notificar: un subscriber puede suscribir otro
        let subscribers = std::mem::take(&mut *self.inner.subscribers.borrow_mut());
        for subscriber in subscribers {
            subscriber(outcome.clone());
        }
        true
    }
}
