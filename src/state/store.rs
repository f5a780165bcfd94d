use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use rand::Rng;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::PlanReport;
use crate::planner::constants::{DEFAULT_STORE_CAPACITY, TOKEN_MAX, TOKEN_MIN};

#[derive(Debug, Default)]
struct StoreInner {
    reports: HashMap<String, PlanReport>,
    /// Tokens in insertion order, oldest first.
    order: VecDeque<String>,
}

/// Plan reports keyed by opaque 10-digit tokens.
///
/// Entries live until `capacity` newer plans have been stored; the oldest
/// entry is then evicted. Safe to share between threads.
#[derive(Debug)]
pub struct ResultStore {
    capacity: usize,
    inner: Mutex<StoreInner>,
}

impl ResultStore {
    /// Create a store holding at most `capacity` reports (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(StoreInner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // Entries are inserted and removed whole; a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store a report under a fresh token and return the token.
    pub fn insert(&self, report: PlanReport) -> String {
        self.insert_with_rng(report, &mut rand::thread_rng())
    }

    /// Like [`insert`](Self::insert) with an explicit random source.
    pub fn insert_with_rng<R: Rng + ?Sized>(&self, report: PlanReport, rng: &mut R) -> String {
        let mut inner = self.lock();

        let token = loop {
            let candidate = rng.gen_range(TOKEN_MIN..TOKEN_MAX).to_string();
            if !inner.reports.contains_key(&candidate) {
                break candidate;
            }
        };

        while inner.order.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.reports.remove(&oldest);
                debug!("Evicted plan {}", oldest);
            }
        }

        inner.reports.insert(token.clone(), report);
        inner.order.push_back(token.clone());
        debug!("Stored plan {} ({} held)", token, inner.order.len());
        token
    }

    /// Fetch a copy of the report stored under `token`.
    pub fn get(&self, token: &str) -> Result<PlanReport> {
        self.lock()
            .reports
            .get(token)
            .cloned()
            .ok_or_else(|| PlannerError::SessionExpired(token.to_string()))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.lock().reports.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.lock().reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use std::thread;

    use crate::models::MacroTargets;

    fn report(target_kcal: u32) -> PlanReport {
        PlanReport {
            tdee: 2000,
            target_kcal,
            days: 1,
            meals_per_day: 2,
            macros: MacroTargets::default(),
            plan: vec![],
            grocery: Default::default(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = ResultStore::default();
        let token = store.insert(report(1500));

        assert_eq!(token.len(), 10);
        assert!(token.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(store.get(&token).unwrap().target_kcal, 1500);
        // Retrievable more than once.
        assert!(store.get(&token).is_ok());
    }

    #[test]
    fn test_unknown_token_is_session_expired() {
        let store = ResultStore::default();
        assert!(matches!(
            store.get("0000000000"),
            Err(PlannerError::SessionExpired(_))
        ));
    }

    #[test]
    fn test_evicts_oldest() {
        let store = ResultStore::new(2);
        let mut rng = StdRng::seed_from_u64(5);
        let first = store.insert_with_rng(report(1), &mut rng);
        let second = store.insert_with_rng(report(2), &mut rng);
        let third = store.insert_with_rng(report(3), &mut rng);

        assert_eq!(store.len(), 2);
        assert!(!store.contains(&first));
        assert!(store.contains(&second));
        assert_eq!(store.get(&third).unwrap().target_kcal, 3);
    }

    #[test]
    fn test_concurrent_inserts_unique_tokens() {
        let store = Arc::new(ResultStore::new(1000));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..50)
                        .map(|i| store.insert(report(t * 100 + i)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut tokens: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        tokens.sort();
        tokens.dedup();

        assert_eq!(tokens.len(), 200);
        assert_eq!(store.len(), 200);
    }
}
