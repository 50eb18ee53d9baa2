//! Application container with start/stop hooks.
//!
//! Components are constructed explicitly and registered with
//! [`App::provide`]; anything that needs to run when the application starts
//! or stops appends a [`Hook`]. Start hooks run in registration order, stop
//! hooks in reverse, and a failed start unwinds the hooks that already ran.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
type HookFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send>>;
type HookFn = Box<dyn FnOnce() -> HookFuture + Send>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("no component of type {0} was provided")]
    Missing(&'static str),
    #[error("start hook {hook:?} failed")]
    StartFailed {
        hook: String,
        #[source]
        source: BoxError,
    },
    #[error("stop hook {hook:?} failed")]
    StopFailed {
        hook: String,
        #[source]
        source: BoxError,
    },
}

pub struct Hook {
    name: String,
    on_start: Option<HookFn>,
    on_stop: Option<HookFn>,
}

impl Hook {
    pub fn new(name: impl Into<String>) -> Self {
        Hook {
            name: name.into(),
            on_start: None,
            on_stop: None,
        }
    }

    pub fn on_start<F, Fut>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.on_start = Some(Box::new(move || Box::pin(f())));
        self
    }

    pub fn on_stop<F, Fut>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.on_stop = Some(Box::new(move || Box::pin(f())));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Default)]
pub struct App {
    components: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    hooks: Vec<Hook>,
    /// Number of hooks, from the front, whose start has completed.
    started: usize,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component, replacing any earlier one of the same type.
    pub fn provide<T: Send + Sync + 'static>(&mut self, component: T) -> Arc<T> {
        let component = Arc::new(component);
        self.components
            .insert(TypeId::of::<T>(), component.clone() as Arc<dyn Any + Send + Sync>);
        component
    }

    /// Builds a component from ones already provided, then registers it.
    pub fn provide_with<T, F>(&mut self, build: F) -> Result<Arc<T>, LifecycleError>
    where
        T: Send + Sync + 'static,
        F: FnOnce(&App) -> Result<T, LifecycleError>,
    {
        let component = build(self)?;
        Ok(self.provide(component))
    }

    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, LifecycleError> {
        self.components
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|c| c.downcast::<T>().ok())
            .ok_or(LifecycleError::Missing(type_name::<T>()))
    }

    pub fn append(&mut self, hook: Hook) {
        self.hooks.push(hook);
    }

    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(Hook::name).collect()
    }

    /// Runs start hooks in order. On failure the hooks that already started
    /// are stopped in reverse before the error is returned.
    pub async fn start(&mut self) -> Result<(), LifecycleError> {
        while self.started < self.hooks.len() {
            let hook = &mut self.hooks[self.started];
            tracing::debug!(hook = %hook.name, "starting");
            if let Some(start) = hook.on_start.take() {
                if let Err(source) = start().await {
                    let hook = hook.name.clone();
                    tracing::error!(%hook, error = %source, "start hook failed, rolling back");
                    if let Err(stop_err) = self.stop().await {
                        tracing::error!(error = %stop_err, "rollback incomplete");
                    }
                    return Err(LifecycleError::StartFailed { hook, source });
                }
            }
            self.started += 1;
        }
        Ok(())
    }

    /// Runs stop hooks of started components in reverse order. Every hook
    /// runs even if an earlier one fails; the first failure is returned.
    pub async fn stop(&mut self) -> Result<(), LifecycleError> {
        let mut first_error = None;
        while self.started > 0 {
            self.started -= 1;
            let hook = &mut self.hooks[self.started];
            tracing::debug!(hook = %hook.name, "stopping");
            if let Some(stop) = hook.on_stop.take() {
                if let Err(source) = stop().await {
                    tracing::error!(hook = %hook.name, error = %source, "stop hook failed");
                    first_error.get_or_insert(LifecycleError::StopFailed {
                        hook: hook.name.clone(),
                        source,
                    });
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Starts, waits for `shutdown`, then stops.
    pub async fn run<S>(mut self, shutdown: S) -> Result<(), LifecycleError>
    where
        S: Future<Output = ()>,
    {
        self.start().await?;
        tracing::info!("application started");
        shutdown.await;
        tracing::info!("application stopping");
        self.stop().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recording(log: &Log, name: &str) -> Hook {
        let start_log = log.clone();
        let stop_log = log.clone();
        let start_name = format!("start {}", name);
        let stop_name = format!("stop {}", name);
        Hook::new(name)
            .on_start(move || async move {
                start_log.lock().unwrap().push(start_name);
                Ok::<(), BoxError>(())
            })
            .on_stop(move || async move {
                stop_log.lock().unwrap().push(stop_name);
                Ok::<(), BoxError>(())
            })
    }

    #[tokio::test]
    async fn test_hooks_run_in_order_and_reverse() {
        let log: Log = Arc::default();
        let mut app = App::new();
        app.append(recording(&log, "db"));
        app.append(recording(&log, "http"));
        assert_eq!(app.hook_names(), vec!["db", "http"]);

        app.run(async {}).await.unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["start db", "start http", "stop http", "stop db"]
        );
    }

    #[tokio::test]
    async fn test_failed_start_rolls_back() {
        let log: Log = Arc::default();
        let mut app = App::new();
        app.append(recording(&log, "db"));
        app.append(
            Hook::new("broken").on_start(|| async { Err::<(), BoxError>("port in use".into()) }),
        );
        app.append(recording(&log, "never"));

        let err = app.start().await.unwrap_err();
        assert!(matches!(err, LifecycleError::StartFailed { ref hook, .. } if hook == "broken"));
        assert_eq!(*log.lock().unwrap(), vec!["start db", "stop db"]);
    }

    #[tokio::test]
    async fn test_stop_runs_every_hook() {
        let log: Log = Arc::default();
        let mut app = App::new();
        app.append(recording(&log, "db"));
        app.append(
            Hook::new("flaky").on_stop(|| async { Err::<(), BoxError>("flush failed".into()) }),
        );

        app.start().await.unwrap();
        let err = app.stop().await.unwrap_err();
        assert!(matches!(err, LifecycleError::StopFailed { .. }));
        assert_eq!(*log.lock().unwrap(), vec!["start db", "stop db"]);
    }

    #[test]
    fn test_provide_and_resolve() {
        struct Greeting(String);
        struct Greeter {
            greeting: Arc<Greeting>,
        }

        let mut app = App::new();
        assert!(matches!(
            app.resolve::<Greeting>(),
            Err(LifecycleError::Missing(_))
        ));

        app.provide(Greeting("hello".to_string()));
        let greeter = app
            .provide_with(|app| {
                Ok(Greeter {
                    greeting: app.resolve::<Greeting>()?,
                })
            })
            .unwrap();
        assert_eq!(greeter.greeting.0, "hello");
        assert!(Arc::ptr_eq(&app.resolve::<Greeter>().unwrap(), &greeter));
    }
}
