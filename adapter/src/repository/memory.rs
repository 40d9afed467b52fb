use std::{
    collections::{hash_map::Entry, BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use kernel::model::{
    booking::BookingEntry,
    id::{ResourceId, TimeSlotId},
    reservation::{
        event::CreateReservation, BookingDate, BookingTriple, Reservation, SLOT_ALREADY_BOOKED,
    },
    resource::Resource,
    time_slot::TimeSlot,
};
use kernel::repository::{
    catalog::CatalogRepository, health::HealthCheckRepository, reservation::ReservationRepository,
};
use shared::error::{AppError, AppResult};
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    resources: BTreeMap<ResourceId, Resource>,
    time_slots: HashMap<TimeSlotId, TimeSlot>,
    reservations: HashMap<BookingTriple, Reservation>,
}

/// プロセス内で完結するストア。
///
/// 予約の書き込みはすべて 1 つの書き込みロックの下で行うため、
/// 同じ枠に対する同時予約は必ず 1 件だけが成功する。
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn find_all_resources(&self) -> AppResult<Vec<Resource>> {
        let state = self.state.read().await;
        Ok(state.resources.values().cloned().collect())
    }

    async fn find_all_time_slots(&self) -> AppResult<Vec<TimeSlot>> {
        let state = self.state.read().await;
        let mut slots: Vec<TimeSlot> = state.time_slots.values().cloned().collect();
        slots.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.time_slot_id.cmp(&b.time_slot_id))
        });
        Ok(slots)
    }

    async fn ensure_seeded(
        &self,
        resources: &[Resource],
        time_slots: &[TimeSlot],
    ) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let mut inserted = 0;
        for resource in resources {
            if !state.resources.contains_key(&resource.resource_id) {
                state
                    .resources
                    .insert(resource.resource_id.clone(), resource.clone());
                inserted += 1;
            }
        }
        for slot in time_slots {
            if !state.time_slots.contains_key(&slot.time_slot_id) {
                state
                    .time_slots
                    .insert(slot.time_slot_id.clone(), slot.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut state = self.state.write().await;
        match state.reservations.entry(event.triple()) {
            Entry::Occupied(_) => Err(AppError::Conflict(SLOT_ALREADY_BOOKED.into())),
            Entry::Vacant(vacant) => {
                let reservation = event.into_reservation(Utc::now());
                vacant.insert(reservation.clone());
                Ok(reservation)
            }
        }
    }

    async fn find_by_triple(&self, triple: &BookingTriple) -> AppResult<Option<Reservation>> {
        let state = self.state.read().await;
        Ok(state.reservations.get(triple).cloned())
    }

    async fn find_by_date(&self, date: BookingDate) -> AppResult<Vec<Reservation>> {
        let state = self.state.read().await;
        let mut reservations: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|r| r.date == date)
            .cloned()
            .collect();
        reservations.sort_by_key(|r| r.created_at);
        Ok(reservations)
    }

    async fn find_booking_history(&self) -> AppResult<Vec<BookingEntry>> {
        let state = self.state.read().await;
        let mut reservations: Vec<&Reservation> = state.reservations.values().collect();
        reservations.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(reservations
            .into_iter()
            .map(|r| {
                BookingEntry::new(
                    r.date,
                    state.time_slots.get(&r.time_slot_id).map(TimeSlot::range),
                    state.resources.get(&r.resource_id).map(|c| c.name.clone()),
                    r.user_name.clone(),
                )
            })
            .collect())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let deleted = state.reservations.len() as u64;
        state.reservations.clear();
        Ok(deleted)
    }
}

#[async_trait]
impl HealthCheckRepository for InMemoryStore {
    async fn check_db(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::catalog::Catalog;

    async fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        let catalog = Catalog::studio();
        store
            .ensure_seeded(&catalog.resources, &catalog.time_slots)
            .await
            .unwrap();
        store
    }

    fn event(date: &str, slot: &str, resource: &str, user: &str) -> CreateReservation {
        CreateReservation::new(
            BookingDate::parse(date).unwrap(),
            slot.into(),
            resource.into(),
            user.into(),
            String::new(),
        )
    }

    #[tokio::test]
    async fn seeding_is_idempotent_and_never_overwrites() {
        let store = InMemoryStore::new();
        let catalog = Catalog::studio();

        let first = store
            .ensure_seeded(&catalog.resources, &catalog.time_slots)
            .await
            .unwrap();
        assert_eq!(first, 9);

        let renamed = vec![Resource::new("c1".into(), "Renamed".into())];
        let second = store
            .ensure_seeded(&renamed, &catalog.time_slots)
            .await
            .unwrap();
        assert_eq!(second, 0);

        assert_eq!(store.find_all_resources().await.unwrap(), catalog.resources);
        assert_eq!(
            store.find_all_time_slots().await.unwrap(),
            catalog.time_slots
        );
    }

    #[tokio::test]
    async fn same_triple_cannot_be_booked_twice() {
        let store = seeded_store().await;

        let alice = store
            .create(event("2024-01-01", "t1", "c1", "Alice"))
            .await
            .unwrap();
        assert!(alice.reference.starts_with("PAY-"));

        let bob = store.create(event("2024-01-01", "t1", "c1", "Bob")).await;
        assert!(matches!(bob, Err(AppError::Conflict(msg)) if msg == SLOT_ALREADY_BOOKED));

        let history = store.find_booking_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_name, "Alice");
        assert_eq!(
            history[0].resource_name.as_deref(),
            Some("Reformer Studio A")
        );
        assert_eq!(
            history[0].time_range.map(|r| r.to_string()).as_deref(),
            Some("07:00 - 08:00")
        );
    }

    #[tokio::test]
    async fn differing_in_any_component_is_not_a_conflict() {
        let store = seeded_store().await;
        store
            .create(event("2024-01-01", "t1", "c1", "Alice"))
            .await
            .unwrap();

        for (date, slot, resource) in [
            ("2024-01-02", "t1", "c1"),
            ("2024-01-01", "t2", "c1"),
            ("2024-01-01", "t1", "c2"),
        ] {
            store
                .create(event(date, slot, resource, "Bob"))
                .await
                .unwrap();
        }

        let date = BookingDate::parse("2024-01-01").unwrap();
        assert_eq!(store.find_by_date(date).await.unwrap().len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_bookings_admit_exactly_one() {
        let store = seeded_store().await;

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(event("2024-01-01", "t4", "c3", &format!("User{i}")))
                        .await
                })
            })
            .collect();

        let mut succeeded = 0;
        let mut conflicted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(AppError::Conflict(_)) => conflicted += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(succeeded, 1);
        assert_eq!(conflicted, 31);

        let date = BookingDate::parse("2024-01-01").unwrap();
        assert_eq!(store.find_by_date(date).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn history_is_newest_date_first_and_left_joined() {
        let store = seeded_store().await;
        store
            .create(event("2024-01-01", "t1", "c1", "Alice"))
            .await
            .unwrap();
        store
            .create(event("2024-03-01", "t99", "c99", "Carol"))
            .await
            .unwrap();
        store
            .create(event("2024-02-01", "t2", "c2", "Bob"))
            .await
            .unwrap();

        let history = store.find_booking_history().await.unwrap();
        let names: Vec<_> = history.iter().map(|e| e.user_name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
        assert_eq!(history[0].time_range, None);
        assert_eq!(history[0].resource_name, None);
    }

    #[tokio::test]
    async fn delete_all_frees_every_slot() {
        let store = seeded_store().await;
        let created = store
            .create(event("2024-01-01", "t1", "c1", "Alice"))
            .await
            .unwrap();

        assert_eq!(store.delete_all().await.unwrap(), 1);
        assert!(store.find_booking_history().await.unwrap().is_empty());
        assert!(store
            .find_by_triple(&created.triple())
            .await
            .unwrap()
            .is_none());

        store
            .create(event("2024-01-01", "t1", "c1", "Bob"))
            .await
            .unwrap();
    }
}
