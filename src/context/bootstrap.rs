//! Application entry points.

use std::sync::Arc;

use async_trait::async_trait;

use super::Context;
use crate::creator::Entity;
use crate::error::{BoxError, DiError, DiResult};
use crate::key::Key;

/// Root object of an application, run once its graph is built.
#[async_trait]
pub trait Program: Send + Sync {
    /// Runs the application.
    async fn run(&self) -> Result<(), BoxError>;
}

impl Context {
    /// Resolves `P` and runs it.
    ///
    /// Resolution errors are returned as they are; an error returned by
    /// [`Program::run`] becomes [`DiError::ProgramFailed`].
    pub async fn bootstrap<P>(&mut self) -> DiResult<()>
    where
        P: Entity,
        P::Output: Program,
    {
        let program = self.resolve::<P>().await?;
        let key = Key::of::<P>();
        let name = self.name();

        tracing::info!(context = self.id, %name, program = %key, "Running program");

        match program.run().await {
            Ok(()) => {
                tracing::info!(context = self.id, %name, program = %key, "Program finished");
                Ok(())
            }
            Err(source) => {
                tracing::error!(
                    context = self.id,
                    %name,
                    program = %key,
                    error = %source,
                    "Program failed"
                );
                Err(DiError::ProgramFailed {
                    program: key.name().to_string(),
                    source: Arc::from(source),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Dependencies;
    use std::fmt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use tracing::field::{Field, Visit};
    use tracing::{span, Event, Metadata, Subscriber};

    static RAN: AtomicBool = AtomicBool::new(false);

    struct Hello;

    #[async_trait]
    impl Entity for Hello {
        type Output = Hello;

        async fn construct(_: Dependencies) -> Result<Arc<Hello>, BoxError> {
            Ok(Arc::new(Hello))
        }
    }

    #[async_trait]
    impl Program for Hello {
        async fn run(&self) -> Result<(), BoxError> {
            RAN.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Broken;

    #[async_trait]
    impl Entity for Broken {
        type Output = Broken;

        async fn construct(_: Dependencies) -> Result<Arc<Broken>, BoxError> {
            Ok(Arc::new(Broken))
        }
    }

    #[async_trait]
    impl Program for Broken {
        async fn run(&self) -> Result<(), BoxError> {
            Err("port already in use".into())
        }
    }

    #[tokio::test]
    async fn bootstrap_runs_program() {
        let mut context = Context::new();
        context.register::<Hello>().unwrap();
        context.bootstrap::<Hello>().await.unwrap();
        assert!(RAN.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn failing_run_is_wrapped() {
        let mut context = Context::new();
        context.register::<Broken>().unwrap();

        match context.bootstrap::<Broken>().await {
            Err(DiError::ProgramFailed { program, source }) => {
                assert!(program.contains("Broken"));
                assert_eq!(source.to_string(), "port already in use");
            }
            other => panic!("Expected ProgramFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unregistered_program_fails_to_resolve() {
        let mut context = Context::new();
        assert!(matches!(
            context.bootstrap::<Hello>().await,
            Err(DiError::MissingCreator(_))
        ));
    }

    /// Records the `context` field of every event, if it was logged as a number.
    #[derive(Default, Clone)]
    struct ContextIds {
        events: Arc<Mutex<Vec<(String, Option<u64>)>>>,
    }

    struct ContextField(Option<u64>);

    impl Visit for ContextField {
        fn record_u64(&mut self, field: &Field, value: u64) {
            if field.name() == "context" {
                self.0 = Some(value);
            }
        }

        fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
    }

    impl Subscriber for ContextIds {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }

        fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

        fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

        fn event(&self, event: &Event<'_>) {
            let mut field = ContextField(None);
            event.record(&mut field);
            let target = event.metadata().target().to_string();
            self.events.lock().unwrap().push((target, field.0));
        }

        fn enter(&self, _span: &span::Id) {}

        fn exit(&self, _span: &span::Id) {}
    }

    #[tokio::test(flavor = "current_thread")]
    async fn bootstrap_events_carry_context_id() {
        let recorder = ContextIds::default();
        let _guard = tracing::subscriber::set_default(recorder.clone());

        let mut context = Context::with_options(crate::ContextOptions::default().with_name("cli"));
        context.register::<Broken>().unwrap();
        let _ = context.bootstrap::<Broken>().await;

        let events = recorder.events.lock().unwrap();
        let ours: Vec<_> = events.iter().filter(|(target, _)| target.starts_with("tokenwire")).collect();
        assert!(ours.len() >= 3);
        assert!(ours.iter().all(|(_, id)| *id == Some(context.id())));
    }
}
