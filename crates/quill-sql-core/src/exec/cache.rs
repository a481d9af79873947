//! Reuse of compiled statement handles.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use super::{Connection, PreparedStatement};
use crate::error::Result;

/// Key under which a compiled statement is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The rendered SQL text itself.
    Sql(String),
    /// A caller-chosen identifier. The SQL is only rendered when the
    /// statement has to be compiled.
    Id(u32),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sql(sql) => f.write_str(sql),
            Self::Id(id) => write!(f, "#{id}"),
        }
    }
}

/// Entries are also split by whether the handle reports generated keys.
type Slot = (CacheKey, bool);

/// Map from [`CacheKey`] to compiled statement handles.
///
/// Each cache is an ordinary value: executors borrow the one they are given,
/// and handles compiled through one cache are never seen by another.
///
/// A cached handle is reused until the backend reports it closed, in which
/// case it is compiled again and replaced. Concurrent callers racing on the
/// same key may each compile a handle, but only one is kept and every caller
/// gets that one back. Handles are shared behind a mutex so that binding and
/// executing a handle is exclusive.
pub struct StatementCache<S> {
    entries: RwLock<HashMap<Slot, Arc<Mutex<S>>>>,
}

impl<S> Default for StatementCache<S> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<S> fmt::Debug for StatementCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementCache")
            .field("len", &self.len())
            .finish()
    }
}

impl<S> StatementCache<S> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<S: PreparedStatement> StatementCache<S> {
    /// Returns the live handle cached under `key`, compiling one through
    /// `connection` when there is none or the cached one is closed.
    ///
    /// `render` produces the SQL to compile and is only called on a miss.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Connection::prepare`].
    pub fn get_or_prepare<C, F>(
        &self,
        connection: &C,
        key: CacheKey,
        generated_keys: bool,
        render: F,
    ) -> Result<Arc<Mutex<S>>>
    where
        C: Connection<Statement = S> + ?Sized,
        F: FnOnce() -> String,
    {
        let slot = (key, generated_keys);
        let cached = self.entries.read().get(&slot).cloned();

        let stale = match cached {
            Some(handle) => {
                if !handle.lock().is_closed() {
                    debug!(key = %slot.0, "reusing cached statement");
                    return Ok(handle);
                }
                true
            }
            None => false,
        };

        let sql = render();
        if stale {
            debug!(key = %slot.0, sql = %sql, "recreating statement since cached one is closed");
        } else {
            debug!(key = %slot.0, sql = %sql, "first creation of statement");
        }
        let fresh = Arc::new(Mutex::new(connection.prepare(&sql, generated_keys)?));

        let mut entries = self.entries.write();
        match entries.entry(slot) {
            Entry::Occupied(mut occupied) => {
                // A handle busy on another thread is live.
                let live = match occupied.get().try_lock() {
                    Some(statement) => !statement.is_closed(),
                    None => true,
                };
                if live {
                    debug!(key = %occupied.key().0, "statement cached concurrently, discarding ours");
                    return Ok(Arc::clone(occupied.get()));
                }
                occupied.insert(Arc::clone(&fresh));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::clone(&fresh));
            }
        }
        Ok(fresh)
    }
}
