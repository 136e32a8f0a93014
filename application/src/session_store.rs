//! In-memory session store
//!
//! Sessions live only as long as the process. Each one sits behind its own
//! mutex so turns on the same session are serialized while turns on
//! different sessions proceed in parallel. The map itself is guarded by a
//! `std::sync::RwLock` that is never held across an `.await`.
//!
//! A request that spans an `.await` (a turn followed by story generation)
//! holds a [`SessionLease`]. Expiry never evicts a leased session.

use crate::ports::clock::{Clock, SystemClock};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError,
};
use story_chat_domain::{Session, SessionId};
use tracing::debug;
use uuid::Uuid;

/// Shared handle to one session
pub type SessionHandle = Arc<Mutex<Session>>;

struct StoreEntry {
    created_at: DateTime<Utc>,
    session: SessionHandle,
    leases: Arc<AtomicUsize>,
}

impl StoreEntry {
    fn new(created_at: DateTime<Utc>, session: Session) -> Self {
        Self {
            created_at,
            session: Arc::new(Mutex::new(session)),
            leases: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Leased, or locked by a turn in progress
    fn is_busy(&self) -> bool {
        self.leases.load(Ordering::Acquire) > 0
            || matches!(self.session.try_lock(), Err(TryLockError::WouldBlock))
    }

    fn lease(&self) -> SessionLease {
        self.leases.fetch_add(1, Ordering::AcqRel);
        SessionLease {
            session: Arc::clone(&self.session),
            leases: Arc::clone(&self.leases),
        }
    }
}

/// A session checked out for the length of one request.
///
/// Taken while the store map is locked, so a concurrent sweep either runs
/// first (and the lookup misses) or sees the lease and keeps the entry.
pub struct SessionLease {
    session: SessionHandle,
    leases: Arc<AtomicUsize>,
}

impl SessionLease {
    pub fn handle(&self) -> &SessionHandle {
        &self.session
    }

    /// Lock the session, recovering from a poisoned mutex
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.leases.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Keyed store of live sessions with TTL-based expiry
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, StoreEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, StoreEntry>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, StoreEntry>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, entry: &StoreEntry, now: DateTime<Utc>) -> bool {
        now - entry.created_at > self.ttl
    }

    /// Open a new session at the greeting state, already leased
    pub fn create_leased(&self) -> SessionLease {
        let id = SessionId::new(Uuid::new_v4().to_string());
        let created_at = self.clock.now();
        let entry = StoreEntry::new(created_at, Session::new(id.clone(), created_at));
        let lease = entry.lease();

        self.write().insert(id.clone(), entry);
        debug!("Created session {}", id);
        lease
    }

    /// Open a new session at the greeting state
    pub fn create(&self) -> SessionHandle {
        Arc::clone(self.create_leased().handle())
    }

    /// Check out a live session.
    ///
    /// An expired session is reported absent and evicted, unless it is
    /// leased or a turn is still running on it.
    pub fn lease(&self, id: &SessionId) -> Option<SessionLease> {
        let now = self.clock.now();
        {
            let sessions = self.read();
            let entry = sessions.get(id)?;
            if !self.is_expired(entry, now) {
                return Some(entry.lease());
            }
        }

        let mut sessions = self.write();
        if let Some(entry) = sessions.get(id)
            && self.is_expired(entry, now)
            && !entry.is_busy()
        {
            sessions.remove(id);
            debug!("Evicted expired session {}", id);
        }
        None
    }

    /// Look up a live session (see [`lease`](Self::lease) for expiry)
    pub fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.lease(id).map(|lease| Arc::clone(lease.handle()))
    }

    /// Evict every expired session that is not in use; returns how many went
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now) || entry.is_busy());
        let removed = before - sessions.len();
        if removed > 0 {
            debug!("Swept {} expired session(s)", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::ManualClock;
    use story_chat_domain::ConversationState;

    fn store_with_clock() -> (SessionStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = SessionStore::with_clock(Duration::hours(24), clock.clone());
        (store, clock)
    }

    fn id_of(handle: &SessionHandle) -> SessionId {
        handle.lock().unwrap().id().clone()
    }

    #[test]
    fn test_create_starts_at_greeting() {
        let (store, _) = store_with_clock();
        let handle = store.create();
        let session = handle.lock().unwrap();
        assert_eq!(session.state(), ConversationState::Greeting);
        assert!(session.params().missing().len() == 5);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let (store, _) = store_with_clock();
        let a = id_of(&store.create());
        let b = id_of(&store.create());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_returns_same_session() {
        let (store, _) = store_with_clock();
        let handle = store.create();
        let id = id_of(&handle);
        let fetched = store.get(&id).unwrap();
        assert!(Arc::ptr_eq(&handle, &fetched));
    }

    #[test]
    fn test_get_unknown_is_absent() {
        let (store, _) = store_with_clock();
        assert!(store.get(&SessionId::from("missing")).is_none());
    }

    #[test]
    fn test_get_evicts_expired() {
        let (store, clock) = store_with_clock();
        let id = id_of(&store.create());

        clock.advance(Duration::hours(24));
        assert!(store.get(&id).is_some(), "exactly TTL old is still live");

        clock.advance(Duration::seconds(1));
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_sweep_counts_expired() {
        let (store, clock) = store_with_clock();
        store.create();
        store.create();
        clock.advance(Duration::hours(12));
        let fresh = id_of(&store.create());

        clock.advance(Duration::hours(13));
        assert_eq!(store.sweep(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(&fresh).is_some());
        assert_eq!(store.sweep(), 0);
    }

    #[test]
    fn test_sweep_skips_session_mid_turn() {
        let (store, clock) = store_with_clock();
        let handle = store.create();
        let id = id_of(&handle);
        clock.advance(Duration::hours(25));

        let guard = handle.lock().unwrap();
        assert_eq!(store.sweep(), 0);
        assert!(store.get(&id).is_none());
        assert_eq!(store.len(), 1);
        drop(guard);

        assert_eq!(store.sweep(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_lease_pins_expired_session() {
        let (store, clock) = store_with_clock();
        let lease = store.create_leased();
        let id = lease.lock().id().clone();
        clock.advance(Duration::hours(25));

        assert_eq!(store.sweep(), 0);
        assert!(store.get(&id).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(lease.lock().state(), ConversationState::Greeting);

        drop(lease);
        assert_eq!(store.sweep(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_dropped_leases_release_session() {
        let (store, clock) = store_with_clock();
        let id = id_of(&store.create());
        let first = store.lease(&id).unwrap();
        let second = store.lease(&id).unwrap();
        assert!(Arc::ptr_eq(first.handle(), second.handle()));
        clock.advance(Duration::hours(25));

        drop(first);
        assert_eq!(store.sweep(), 0);
        drop(second);
        assert_eq!(store.sweep(), 1);
    }

    #[test]
    fn test_concurrent_creates() {
        let (store, _) = store_with_clock();
        let store = Arc::new(store);
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.create();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(store.len(), 200);
    }
}
