use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::broadcast::error::RecvError;

use fleetres::engine::{overlaps, Engine, EngineError};
use fleetres::model::{Category, Event, Ms, Reservation, DAY, HOUR};
use fleetres::notify::NotifyHub;

// ── Test infrastructure ──────────────────────────────────────

fn now() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as Ms
}

fn fresh_engine() -> (Arc<Engine>, Arc<NotifyHub>) {
    let notify = Arc::new(NotifyHub::new());
    (Arc::new(Engine::new(notify.clone())), notify)
}

async fn reserve(engine: &Engine, start: Ms, end: Ms, category: Category) -> Option<Reservation> {
    engine
        .request_reservation(start, end, category)
        .await
        .expect("valid request")
}

// ── Scenarios ────────────────────────────────────────────────

#[tokio::test]
async fn sedan_scenario_fill_then_later_window() {
    let (engine, _) = fresh_engine();
    engine.add_unit_of(Category::Sedan).await;
    let t = now();

    let first = reserve(&engine, t + HOUR, t + 3 * DAY, Category::Sedan).await;
    assert!(first.is_some());
    assert_eq!(engine.reservations().await.len(), 1);

    let second = reserve(&engine, t + HOUR, t + 3 * DAY, Category::Sedan).await;
    assert!(second.is_none());
    assert_eq!(engine.reservations().await.len(), 1);

    let third = reserve(&engine, t + 4 * DAY, t + 7 * DAY, Category::Sedan).await;
    assert!(third.is_some());
    assert_eq!(engine.reservations().await.len(), 2);
}

#[tokio::test]
async fn sedan_scenario_staggered_overlap() {
    let (engine, _) = fresh_engine();
    engine.add_unit_of(Category::Sedan).await;
    let t = now();

    let first = reserve(&engine, t + HOUR, t + 3 * DAY + HOUR, Category::Sedan).await;
    let second = reserve(&engine, t + DAY + HOUR, t + 4 * DAY + HOUR, Category::Sedan).await;
    assert!(first.is_some());
    assert!(second.is_none());
}

#[tokio::test]
async fn validation_failures_leave_state_untouched() {
    let (engine, _) = fresh_engine();
    engine.add_units_of(Category::Suv, 2).await;
    let t = now();

    let cases: Vec<Result<Option<Reservation>, EngineError>> = vec![
        engine.request_reservation(t - 2 * DAY, t + DAY, Category::Suv).await,
        engine.request_reservation(t + HOUR, t + HOUR, Category::Suv).await,
        engine.request_reservation_days(t + HOUR, -2, Category::Suv).await,
    ];
    assert!(matches!(cases[0], Err(EngineError::PastStart { .. })));
    assert!(matches!(cases[1], Err(EngineError::DegenerateInterval(_))));
    assert!(matches!(cases[2], Err(EngineError::NonPositiveDuration(-2))));

    assert!(engine.reservations().await.is_empty());
    assert_eq!(engine.units_of(Category::Suv).await.len(), 2);
}

#[tokio::test]
async fn overlap_predicate_is_public() {
    let t = now();
    assert!(!overlaps(t, t + DAY, t + DAY, t + 2 * DAY));
    assert!(overlaps(t, t + 2 * DAY, t + DAY, t + 3 * DAY));
}

#[tokio::test]
async fn identity_survives_edits() {
    let (engine, _) = fresh_engine();
    let units = engine.add_units_of(Category::Van, 2).await;
    let t = now() + HOUR;
    let res = reserve(&engine, t, t + DAY, Category::Van).await.unwrap();
    let id = res.id();

    let other = units[1];
    let edited = engine
        .edit_reservation(id, |r| {
            r.set_unit(other);
            r.set_start(t + 5 * DAY);
            r.set_end(t + 6 * DAY);
        })
        .await
        .unwrap();
    assert_eq!(edited, res);

    // the edit lands in the ledger under the same id
    let stored = engine.reservations().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id(), id);
    assert_eq!(stored[0].unit(), other);
    assert_eq!(stored[0].start(), t + 5 * DAY);
    assert_eq!(stored[0].end(), t + 6 * DAY);
}

#[tokio::test]
async fn moving_only_booking_reopens_its_window() {
    let (engine, _) = fresh_engine();
    engine.add_unit_of(Category::Sedan).await;
    let t = now() + HOUR;
    let res = reserve(&engine, t, t + DAY, Category::Sedan).await.unwrap();
    assert!(reserve(&engine, t, t + DAY, Category::Sedan).await.is_none());

    engine
        .edit_reservation(res.id(), |r| {
            r.set_start(t + 10 * DAY);
            r.set_end(t + 11 * DAY);
        })
        .await
        .unwrap();

    assert!(reserve(&engine, t, t + DAY, Category::Sedan).await.is_some());
    assert_eq!(engine.reservations().await.len(), 2);
}

#[tokio::test]
async fn default_removal_leaves_stale_reservations() {
    let (engine, _) = fresh_engine();
    let unit = engine.add_unit_of(Category::Sedan).await;
    let t = now() + HOUR;
    reserve(&engine, t, t + DAY, Category::Sedan).await.unwrap();

    assert_eq!(engine.remove_units(&[unit]).await, 1);
    assert!(engine.units_of(Category::Sedan).await.is_empty());
    assert_eq!(engine.reservations_for(&unit).await.len(), 1);

    // nothing left to book
    assert!(reserve(&engine, t, t + DAY, Category::Sedan).await.is_none());
}

// ── Concurrency ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_requests_fill_each_unit_once() {
    let (engine, _) = fresh_engine();
    let units = engine.add_units_of(Category::Suv, 5).await;
    let t = now() + HOUR;

    let tasks = (0..64).map(|_| {
        let engine = engine.clone();
        tokio::spawn(async move { reserve(&engine, t, t + 2 * DAY, Category::Suv).await })
    });
    let granted: Vec<Reservation> = join_all(tasks)
        .await
        .into_iter()
        .filter_map(|r| r.unwrap())
        .collect();

    assert_eq!(granted.len(), units.len());
    let mut assigned: Vec<_> = granted.iter().map(|r| r.unit().id()).collect();
    assigned.sort();
    assigned.dedup();
    assert_eq!(assigned.len(), units.len());

    // no two ledger entries on the same unit overlap
    let ledger = engine.reservations().await;
    for (i, a) in ledger.iter().enumerate() {
        for b in &ledger[i + 1..] {
            if a.unit() == b.unit() {
                assert!(!a.span().overlaps(&b.span()));
            }
        }
    }
}

// ── Change feed ──────────────────────────────────────────────

#[tokio::test]
async fn subscriber_sees_only_its_category() {
    let (engine, notify) = fresh_engine();
    let mut vans = notify.subscribe(Category::Van);

    engine.add_unit_of(Category::Sedan).await;
    let van = engine.add_unit_of(Category::Van).await;
    let t = now() + HOUR;
    reserve(&engine, t, t + DAY, Category::Sedan).await.unwrap();
    let booked = reserve(&engine, t, t + DAY, Category::Van).await.unwrap();

    let first = tokio::time::timeout(Duration::from_secs(1), vans.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first, Event::UnitAdded { unit: van });
    let second = tokio::time::timeout(Duration::from_secs(1), vans.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second, Event::ReservationCreated { reservation: booked });

    drop(engine);
    drop(notify);
    assert!(matches!(vans.recv().await, Err(RecvError::Closed)));
}
