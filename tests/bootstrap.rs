use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokenwire::{BoxError, Context, Dependencies, DiError, Entity, Program, TracingObserver};

static OUTPUT: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Config {
    greeting: &'static str,
}

struct TestConfig;

struct App {
    config: Arc<Config>,
}

#[async_trait]
impl Entity for Config {
    type Output = Config;

    async fn construct(_: Dependencies) -> Result<Arc<Config>, BoxError> {
        Ok(Arc::new(Config { greeting: "hello" }))
    }
}

#[async_trait]
impl Entity for TestConfig {
    type Output = Config;

    async fn construct(_: Dependencies) -> Result<Arc<Config>, BoxError> {
        Ok(Arc::new(Config { greeting: "hello from tests" }))
    }
}

#[async_trait]
impl Entity for App {
    type Output = App;

    async fn construct(dependencies: Dependencies) -> Result<Arc<App>, BoxError> {
        Ok(Arc::new(App {
            config: dependencies.get(0)?,
        }))
    }
}

#[async_trait]
impl Program for App {
    async fn run(&self) -> Result<(), BoxError> {
        if self.config.greeting.is_empty() {
            return Err("nothing to say".into());
        }
        OUTPUT.lock().unwrap().push(self.config.greeting.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_bootstrap_with_replacement() {
    let mut context = Context::new();
    context
        .add_observer(Arc::new(TracingObserver::default()))
        .register::<Config>()
        .unwrap()
        .register::<App>()
        .unwrap()
        .inject::<App, Config>(0)
        .unwrap()
        .replace::<Config, TestConfig>()
        .unwrap();

    context.bootstrap::<App>().await.unwrap();

    assert_eq!(*OUTPUT.lock().unwrap(), vec!["hello from tests"]);
}

#[tokio::test]
async fn test_bootstrap_surfaces_resolution_errors() {
    let mut context = Context::new();
    context.register::<App>().unwrap().inject::<App, Config>(0).unwrap();

    match context.bootstrap::<App>().await {
        Err(DiError::MissingCreator(name)) => assert!(name.ends_with("Config")),
        other => panic!("Expected MissingCreator, got {:?}", other),
    }
}
