use crate::builtins;
use crate::config::Config;
use crate::error::{LogicError, LogicResult};
use crate::registry::Registry;
use log::{debug, info};
use serde_json::{json, Value};
use spin::Mutex;

/// A logic session: one registry behind a lock, plus its configuration.
///
/// Sessions are independent; several may coexist in one process.
pub struct Logic {
    state: Mutex<Option<Registry>>,
    config: Config,
}

impl Default for Logic {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// The boxed form of an error.
pub fn error_value(error: &LogicError) -> Value {
    json!({
        "error": error.to_string(),
        "code": error.code().as_i32(),
    })
}

impl Logic {
    pub fn new(config: Config) -> Self {
        Self {
            state: Mutex::new(None),
            config,
        }
    }

    /// Create the registry with its seeded axioms. Does nothing if the
    /// session is already initialized.
    pub fn init(&self) {
        let mut state = self.state.lock();
        if state.is_none() {
            info!("logic system initialized");
            *state = Some(Registry::default());
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Release the registry. Later calls fail until `init` runs again.
    pub fn cleanup(&self) {
        if self.state.lock().take().is_some() {
            info!("logic system released");
        }
    }

    /// Run `f` against the registry, holding the lock throughout.
    pub fn with_registry<T, F>(&self, f: F) -> LogicResult<T>
    where
        F: FnOnce(&mut Registry) -> LogicResult<T>,
    {
        let mut state = self.state.lock();
        let registry = state.as_mut().ok_or(LogicError::NotInitialized)?;
        f(registry)
    }

    pub fn try_call(&self, call: &str, args: &[Value]) -> LogicResult<Value> {
        let builtin = builtins::lookup(call)
            .ok_or_else(|| LogicError::UnknownCall(call.to_owned()))?;
        debug!("{}({} arguments)", call, args.len());
        self.with_registry(|registry| builtin(registry, &self.config, args))
    }

    /// Call a builtin by name, folding any error into a boxed error value.
    pub fn call(&self, call: &str, args: &[Value]) -> Value {
        self.try_call(call, args)
            .unwrap_or_else(|error| error_value(&error))
    }
}
