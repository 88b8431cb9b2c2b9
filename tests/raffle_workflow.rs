//! End-to-end raffle flows through the service: draws exclude prior winners,
//! department filters narrow the pool, exports land on disk, and clearing
//! reopens the whole roster.

use std::collections::HashSet;
use std::fs;

use contest_raffle::report::{EXPORT_FILE_NAME, EXPORT_HEADERS};
use contest_raffle::{
    Contestant, Department, InMemoryWinnerStore, Raffle, Roster, SqliteWinnerStore, StoreError,
    Winner, WinnerStore,
};
use tempfile::tempdir;

fn small_roster() -> Roster {
    Roster::new(vec![
        Contestant::new("A", Department::IndiaMessaging, "SA"),
        Contestant::new("B", Department::IndiaMessaging, "SB"),
        Contestant::new("C", Department::Apac, "SC"),
        Contestant::new("D", Department::InternationalMessaging, "SD"),
        Contestant::new("E", Department::Apac, "SE"),
    ])
}

fn raffle() -> Raffle<InMemoryWinnerStore> {
    Raffle::new(small_roster(), InMemoryWinnerStore::new())
}

// =============================================================================
// SECTION 1: DRAWING
// =============================================================================

mod drawing {
    use super::*;

    #[test]
    fn draw_records_each_winner() {
        let raffle = raffle();
        let drawn = raffle.draw(3, None).unwrap();

        assert_eq!(drawn.len(), 3);
        assert_eq!(raffle.winners(), drawn);
    }

    #[test]
    fn repeated_draws_never_pick_the_same_name() {
        let raffle = raffle();
        raffle.draw(2, None).unwrap();
        raffle.draw(2, None).unwrap();
        raffle.draw(2, None).unwrap();

        let names: Vec<String> = raffle.winners().into_iter().map(|w| w.name).collect();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(names.len(), 5);
        assert_eq!(unique.len(), 5);
        assert!(raffle.eligible(None).is_empty());
    }

    #[test]
    fn exhausted_pool_draws_nothing() {
        let raffle = raffle();
        raffle.draw(10, None).unwrap();

        assert!(raffle.draw(1, None).unwrap().is_empty());
        assert_eq!(raffle.winners().len(), 5);
    }

    #[test]
    fn zero_count_draws_nothing() {
        let raffle = raffle();
        assert!(raffle.draw(0, None).unwrap().is_empty());
        assert!(raffle.winners().is_empty());
    }

    #[test]
    fn empty_roster_draws_nothing() {
        let raffle = Raffle::new(Roster::new(Vec::new()), InMemoryWinnerStore::new());
        assert!(raffle.draw(3, None).unwrap().is_empty());
    }

    #[test]
    fn department_draw_stays_inside_department() {
        let raffle = raffle();
        let drawn = raffle.draw(5, Some(Department::Apac)).unwrap();

        assert_eq!(drawn.len(), 2);
        assert!(drawn.iter().all(|w| w.department == Department::Apac));
        assert_eq!(raffle.eligible(Some(Department::Apac)).len(), 0);
        assert_eq!(raffle.eligible(None).len(), 3);
    }

    #[test]
    fn prior_winner_by_name_is_excluded_even_from_another_department() {
        let raffle = raffle();
        raffle
            .store()
            .add(&Contestant::new("C", Department::IndiaMessaging, "other"))
            .unwrap();

        let drawn = raffle.draw(5, Some(Department::Apac)).unwrap();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].name, "E");
    }

    #[test]
    fn malformed_store_behaves_like_no_winners() {
        let raffle = Raffle::new(
            small_roster(),
            InMemoryWinnerStore::with_document("{broken"),
        );
        assert_eq!(raffle.eligible(None).len(), 5);

        let drawn = raffle.draw(1, None).unwrap();
        assert_eq!(raffle.winners(), drawn);
    }
}

// =============================================================================
// SECTION 2: FAILED WRITES
// =============================================================================

mod failed_writes {
    use super::*;

    /// Store that refuses any write which would take it past `capacity`
    /// winners, without writing anything.
    struct CappedStore {
        inner: InMemoryWinnerStore,
        capacity: usize,
    }

    impl CappedStore {
        fn new(capacity: usize) -> Self {
            Self {
                inner: InMemoryWinnerStore::new(),
                capacity,
            }
        }

        fn full() -> StoreError {
            StoreError::Encode(serde_json::from_str::<u8>("full").unwrap_err())
        }
    }

    impl WinnerStore for CappedStore {
        fn list(&self) -> Vec<Winner> {
            self.inner.list()
        }

        fn add(&self, contestant: &Contestant) -> Result<Winner, StoreError> {
            if self.inner.list().len() >= self.capacity {
                return Err(Self::full());
            }
            self.inner.add(contestant)
        }

        fn add_all(&self, contestants: &[Contestant]) -> Result<Vec<Winner>, StoreError> {
            if self.inner.list().len() + contestants.len() > self.capacity {
                return Err(Self::full());
            }
            self.inner.add_all(contestants)
        }

        fn clear(&self) -> Result<(), StoreError> {
            self.inner.clear()
        }
    }

    #[test]
    fn failed_draw_records_no_winners() {
        let raffle = Raffle::new(small_roster(), CappedStore::new(1));

        assert!(raffle.draw(3, None).is_err());
        assert!(raffle.winners().is_empty());
        assert_eq!(raffle.eligible(None).len(), 5);
    }

    #[test]
    fn failed_draw_keeps_earlier_winners() {
        let raffle = Raffle::new(small_roster(), CappedStore::new(2));
        let first = raffle.draw(1, None).unwrap();

        assert!(raffle.draw(2, None).is_err());
        assert_eq!(raffle.winners(), first);

        let second = raffle.draw(1, None).unwrap();
        assert_eq!(raffle.winners().len(), 2);
        assert_ne!(first[0].name, second[0].name);
    }
}

// =============================================================================
// SECTION 3: CLEARING AND OVERVIEW
// =============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn clear_reopens_the_full_roster() {
        let raffle = raffle();
        raffle.draw(4, None).unwrap();
        raffle.clear().unwrap();

        assert!(raffle.winners().is_empty());
        assert_eq!(raffle.eligible(None).len(), 5);
    }

    #[test]
    fn overview_tracks_draws() {
        let raffle = raffle();
        raffle.draw(5, Some(Department::IndiaMessaging)).unwrap();

        let overview = raffle.overview();
        assert_eq!(overview.total_contestants, 5);
        assert_eq!(overview.total_winners, 2);
        assert_eq!(overview.remaining_pool, 3);
        assert_eq!(overview.win_rate_percent, 40);
    }

    #[test]
    fn sqlite_backed_raffle_keeps_winners_between_sessions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raffle.sqlite");

        let first_session = Raffle::new(small_roster(), SqliteWinnerStore::open(&path).unwrap());
        let drawn = first_session.draw(2, None).unwrap();
        drop(first_session);

        let second_session = Raffle::new(small_roster(), SqliteWinnerStore::open(&path).unwrap());
        assert_eq!(second_session.winners(), drawn);
        assert_eq!(second_session.eligible(None).len(), 3);
    }
}

// =============================================================================
// SECTION 4: EXPORT
// =============================================================================

mod export {
    use super::*;

    #[test]
    fn export_writes_header_and_one_row_per_winner() {
        let dir = tempdir().unwrap();
        let raffle = raffle();
        let winners = raffle.draw(3, None).unwrap();

        let path = raffle.export(dir.path(), &winners).unwrap();
        assert_eq!(path, dir.path().join(EXPORT_FILE_NAME));

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], EXPORT_HEADERS.join(","));
        assert_eq!(lines.len(), 4);
        for (line, winner) in lines[1..].iter().zip(&winners) {
            assert!(line.starts_with(&format!("{},{},{},", winner.name, winner.department, winner.supervisor)));
        }
    }

    #[test]
    fn export_of_no_winners_is_header_only() {
        let dir = tempdir().unwrap();
        let path = raffle().export(dir.path(), &[]).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents.trim_end(), "Name,Department,Supervisor,Draw Date");
    }
}
