//! Authoritative snapshot store.
//!
//! Players do not write state directly. They submit an intent together with
//! the version of the snapshot they acted on; the store applies it only if
//! that version is still current (compare-and-swap), then publishes the new
//! snapshot to every subscriber. A stale submission is refused and nothing
//! is written, so two racing intents can never clobber each other.
//!
//! ## Example
//!
//! ```
//! use faction_durak::core::Intent;
//! use faction_durak::rules::DurakEngine;
//! use faction_durak::store::{StateStore, StoreError};
//!
//! let store = StateStore::new(DurakEngine::standard());
//! let updates = store.subscribe();
//!
//! let start = Intent::StartGame { players: vec!["Ann".into(), "Bo".into()], seed: Some(1) };
//! let snapshot = store.submit(0, &start).unwrap();
//! assert_eq!(snapshot.version, 1);
//! assert_eq!(updates.recv().unwrap().version, 1);
//!
//! // Acting on version 0 again is refused.
//! assert!(matches!(store.submit(0, &start), Err(StoreError::VersionConflict { .. })));
//! ```

use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::{GameError, GameState, Intent};
use crate::rules::RulesEngine;

/// A published state with its version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u64,
    pub state: GameState,
}

impl Snapshot {
    /// Encode for a transport.
    pub fn encode(&self) -> Result<Vec<u8>, StoreError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Why a submission was not written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stale version {expected}, store is at {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    #[error("no game has been started")]
    NotStarted,

    #[error(transparent)]
    Rejected(#[from] GameError),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

#[derive(Default)]
struct Inner {
    current: Option<Arc<Snapshot>>,
    subscribers: Vec<mpsc::Sender<Arc<Snapshot>>>,
}

impl Inner {
    fn version(&self) -> u64 {
        self.current.as_ref().map_or(0, |s| s.version)
    }
}

/// Serializes every intent for one table through a single writer.
pub struct StateStore<E> {
    engine: E,
    inner: Mutex<Inner>,
}

impl<E: RulesEngine> StateStore<E> {
    /// An empty store. Version 0 means no game yet.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Current version; 0 before the first game starts.
    pub fn version(&self) -> u64 {
        self.lock().version()
    }

    /// Latest snapshot, if a game has started.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.lock().current.clone()
    }

    /// Receive every snapshot published from now on. The current snapshot,
    /// if any, is delivered first.
    pub fn subscribe(&self) -> mpsc::Receiver<Arc<Snapshot>> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.lock();
        if let Some(current) = &inner.current {
            // The receiver is still in scope, so this cannot fail.
            let _ = tx.send(Arc::clone(current));
        }
        inner.subscribers.push(tx);
        rx
    }

    /// Apply `intent` if the store is still at `expected_version`.
    ///
    /// `StartGame` is accepted on an empty store; every other intent needs a
    /// running game.
    pub fn submit(
        &self,
        expected_version: u64,
        intent: &Intent,
    ) -> Result<Arc<Snapshot>, StoreError> {
        let mut inner = self.lock();
        let actual = inner.version();
        if expected_version != actual {
            debug!(expected_version, actual, intent = intent.name(), "stale submission");
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }

        let state = match (&inner.current, intent) {
            (Some(current), _) => self.engine.apply_intent(&current.state, intent)?,
            (None, Intent::StartGame { players, seed }) => {
                self.engine.start_game(players, *seed)?
            }
            (None, _) => return Err(StoreError::NotStarted),
        };

        let snapshot = Arc::new(Snapshot {
            version: actual + 1,
            state,
        });
        inner.current = Some(Arc::clone(&snapshot));
        inner
            .subscribers
            .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
        info!(
            version = snapshot.version,
            intent = intent.name(),
            subscribers = inner.subscribers.len(),
            "snapshot published"
        );
        Ok(snapshot)
    }
}
