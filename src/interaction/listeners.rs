use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

/// Identity of one chart instance inside a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartId(u64);

impl ChartId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart-{}", self.0)
    }
}

/// Window-level events a chart can listen to outside its own surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalEvent {
    PointerMove,
    PointerUp,
}

#[derive(Debug)]
struct ListenerEntry {
    owner: ChartId,
    events: SmallVec<[GlobalEvent; 2]>,
}

#[derive(Debug, Default)]
struct ListenerTable {
    next_key: u64,
    next_chart: u64,
    entries: IndexMap<u64, ListenerEntry>,
}

/// Table of window-level listeners, shared by every chart of one host.
///
/// Hosts route window events to the owners listed here; entries disappear
/// when their [`ListenerGuard`] is dropped.
#[derive(Debug, Clone, Default)]
pub struct GlobalListenerRegistry {
    table: Rc<RefCell<ListenerTable>>,
}

impl GlobalListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_chart_id(&self) -> ChartId {
        let mut table = self.table.borrow_mut();
        table.next_chart += 1;
        ChartId(table.next_chart)
    }

    pub fn install(&self, owner: ChartId, events: &[GlobalEvent]) -> ListenerGuard {
        let mut table = self.table.borrow_mut();
        table.next_key += 1;
        let key = table.next_key;
        table.entries.insert(
            key,
            ListenerEntry {
                owner,
                events: events.iter().copied().collect(),
            },
        );
        debug!(%owner, key, events = ?events, "global listener installed");
        ListenerGuard {
            table: Rc::downgrade(&self.table),
            key,
            owner,
        }
    }

    /// Owners listening to `event`, in installation order.
    #[must_use]
    pub fn owners_for(&self, event: GlobalEvent) -> Vec<ChartId> {
        self.table
            .borrow()
            .entries
            .values()
            .filter(|entry| entry.events.contains(&event))
            .map(|entry| entry.owner)
            .collect()
    }

    #[must_use]
    pub fn is_installed(&self, owner: ChartId) -> bool {
        self.table
            .borrow()
            .entries
            .values()
            .any(|entry| entry.owner == owner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps one registry entry alive; dropping it removes the entry.
#[must_use = "dropping the guard removes the listener immediately"]
#[derive(Debug)]
pub struct ListenerGuard {
    table: Weak<RefCell<ListenerTable>>,
    key: u64,
    owner: ChartId,
}

impl ListenerGuard {
    #[must_use]
    pub fn owner(&self) -> ChartId {
        self.owner
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        match table.try_borrow_mut() {
            Ok(mut table) => {
                table.entries.shift_remove(&self.key);
                debug!(owner = %self.owner, key = self.key, "global listener removed");
            }
            Err(_) => warn!(
                owner = %self.owner,
                key = self.key,
                "listener table busy, entry not removed"
            ),
        }
    }
}
