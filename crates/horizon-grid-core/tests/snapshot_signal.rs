//! Integration tests for snapshots published through signals.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;

use horizon_grid_core::{Signal, SignalError, Snapshot, SnapshotCell};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_subscriber_sees_every_publication() {
    setup();
    let cell = SnapshotCell::new(0u32);
    let last_seen = Arc::new(AtomicU64::new(0));

    let seen = last_seen.clone();
    cell.changed().connect(move |snapshot: &Snapshot<u32>| {
        seen.store(snapshot.generation(), Ordering::SeqCst);
    });

    for _ in 0..3 {
        let snapshot = cell.publish(7);
        assert_eq!(last_seen.load(Ordering::SeqCst), snapshot.generation());
    }
}

#[test]
fn test_failed_update_publishes_nothing() {
    setup();
    let cell = SnapshotCell::new(vec![1]);
    let emissions = Arc::new(AtomicUsize::new(0));

    let counter = emissions.clone();
    cell.changed().connect(move |_: &Snapshot<Vec<i32>>| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let before = cell.current();
    let result = cell.update(|values: &mut Vec<i32>| {
        values.push(2);
        Err("rejected")
    });
    assert_eq!(result.unwrap_err(), "rejected");
    assert_eq!(cell.current(), before);
    assert_eq!(*cell.current(), vec![1]);
    assert_eq!(emissions.load(Ordering::SeqCst), 0);

    cell.update::<(), _>(|values| {
        values.push(2);
        Ok(())
    })
    .unwrap();
    assert_eq!(*cell.current(), vec![1, 2]);
    assert_eq!(emissions.load(Ordering::SeqCst), 1);
}

#[test]
fn test_scoped_connection_outlives_nothing() {
    setup();
    let signal: Arc<Signal<Snapshot<String>>> = Arc::new(Signal::new());
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let guard = signal.connect_scoped(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let id = guard.id();

    signal.emit(Snapshot::new("a".to_string()));
    drop(guard);
    signal.emit(Snapshot::new("b".to_string()));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(signal.try_disconnect(id), Err(SignalError::InvalidConnection));
}

#[test]
fn test_publications_from_many_threads_have_unique_identities() {
    setup();
    let cell = Arc::new(SnapshotCell::new(0usize));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let cell = cell.clone();
            thread::spawn(move || (0..25).map(|_| cell.publish(i).generation()).collect::<Vec<_>>())
        })
        .collect();

    let mut generations: Vec<u64> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    generations.sort_unstable();
    generations.dedup();
    assert_eq!(generations.len(), 100);
}
