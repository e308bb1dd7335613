use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use millrace::{AsyncEither, Either};

#[derive(Clone, Debug, PartialEq)]
struct Event {
    id: u32,
    name: String,
    public: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum AppError {
    NotFound(u32),
    Denied,
    Internal,
}

#[derive(Clone)]
struct Registry {
    events: Vec<Event>,
}

impl Registry {
    fn sample() -> Self {
        Registry {
            events: vec![
                Event {
                    id: 1,
                    name: "squadron meeting".to_string(),
                    public: true,
                },
                Event {
                    id: 2,
                    name: "staff planning".to_string(),
                    public: false,
                },
            ],
        }
    }

    fn fetch(&self, id: u32) -> AsyncEither<AppError, Event> {
        let found = self.events.iter().find(|e| e.id == id).cloned();
        AsyncEither::from_either(
            found.ok_or(AppError::NotFound(id)).into(),
            AppError::Internal,
        )
    }
}

#[tokio::test]
async fn test_fetch_filter_transform_pipeline() {
    let registry = Registry::sample();

    let name = registry
        .fetch(1)
        .filter(|event| event.public, AppError::Denied)
        .map(|event| event.name.to_uppercase())
        .join()
        .await;

    assert_eq!(name, Either::right("SQUADRON MEETING".to_string()));
}

#[tokio::test]
async fn test_private_event_is_denied_before_transform() {
    let registry = Registry::sample();
    let transformed = Arc::new(AtomicU32::new(0));
    let probe = transformed.clone();

    let outcome = registry
        .fetch(2)
        .filter(|event| event.public, AppError::Denied)
        .map(move |event| {
            probe.fetch_add(1, Ordering::SeqCst);
            event.name
        })
        .join()
        .await;

    assert_eq!(outcome, Either::left(AppError::Denied));
    assert_eq!(transformed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_event_short_circuits_whole_chain() {
    let registry = Registry::sample();
    let registry_for_chain = registry.clone();
    let invoked = Arc::new(AtomicU32::new(0));
    let probe = invoked.clone();

    let outcome = registry
        .fetch(99)
        .flat_map(move |event| {
            probe.fetch_add(1, Ordering::SeqCst);
            registry_for_chain.fetch(event.id)
        })
        .map(|event| event.name)
        .join()
        .await;

    assert_eq!(outcome, Either::left(AppError::NotFound(99)));
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_terminal_calls_memoize_the_fetch() {
    let fetches = Arc::new(AtomicU32::new(0));
    let probe = fetches.clone();

    let pipeline = AsyncEither::from_future(
        async move {
            probe.fetch_add(1, Ordering::SeqCst);
            Either::<AppError, _>::right(7u32)
        },
        AppError::Internal,
    )
    .map(|n| n * 6);

    assert_eq!(pipeline.join().await, Either::right(42));
    assert_eq!(pipeline.join().await, Either::right(42));
    assert_eq!(pipeline.full_join().await, Ok(42));
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_full_join_reports_unfiltered_left() {
    let registry = Registry::sample();

    let err = registry.fetch(99).full_join().await.unwrap_err();
    assert_eq!(err.left, AppError::NotFound(99));
}

#[tokio::test]
async fn test_panicking_collaborator_becomes_default_left() {
    let registry = Registry::sample();

    let outcome = registry
        .fetch(1)
        .map(|_event| -> String { panic!("corrupt record") })
        .join()
        .await;

    assert_eq!(outcome, Either::left(AppError::Internal));
}

#[tokio::test]
async fn test_tap_side_effects_run_once_for_right_only() {
    let registry = Registry::sample();
    let audits = Arc::new(AtomicU32::new(0));

    let ok_probe = audits.clone();
    let ok = registry
        .fetch(1)
        .tap(move |_| {
            ok_probe.fetch_add(1, Ordering::SeqCst);
        })
        .join()
        .await;
    assert!(ok.is_right());

    let missing_probe = audits.clone();
    let missing = registry
        .fetch(99)
        .tap(move |_| {
            missing_probe.fetch_add(1, Ordering::SeqCst);
        })
        .join()
        .await;
    assert!(missing.is_left());

    assert_eq!(audits.load(Ordering::SeqCst), 1);
}
