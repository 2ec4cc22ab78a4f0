use crate::gameroom::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tokio::sync::broadcast;

/// One hosted room: the game state behind its own lock, plus the fan-out
/// channel every member session subscribes to. Events cross the channel
/// pre-serialized so fan-out never re-encodes per member.
pub struct Site {
    pub room: Mutex<Room>,
    pub events: broadcast::Sender<String>,
}

impl Site {
    fn open() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            room: Mutex::new(Room::new()),
            events,
        }
    }

    /// fan an event out to every subscribed member.
    /// a send error only means nobody is listening right now
    pub fn publish(&self, event: &Event) {
        let _ = self.events.send(event.json());
    }
}

/// Manages active rooms and their lifecycles. Rooms are created lazily
/// on first access under caller-supplied identifiers and evicted once
/// emptied or idle. Each room carries its own lock; the registry lock
/// only ever guards the map, preserving cross-room concurrency.
pub struct Lobby {
    rooms: RwLock<HashMap<String, Arc<Site>>>,
    count: AtomicU64,
}

impl Default for Lobby {
    fn default() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            count: AtomicU64::new(1),
        }
    }
}

impl Lobby {
    /// next opaque connection handle
    pub fn connection(&self) -> ConnectionId {
        self.count.fetch_add(1, Ordering::Relaxed)
    }

    /// Fetch a room, dealing a fresh one on first access.
    pub async fn get_or_create(&self, id: &str) -> Arc<Site> {
        if let Some(site) = self.rooms.read().await.get(id) {
            return site.clone();
        }
        self.rooms
            .write()
            .await
            .entry(id.to_string())
            .or_insert_with(|| {
                log::info!("opened room {}", id);
                Arc::new(Site::open())
            })
            .clone()
    }

    /// Close a room once its roster empties. The caller's handle must
    /// still be the registered one; a successor room that took over the
    /// identifier in the meantime is left alone.
    pub async fn remove(&self, id: &str, site: &Arc<Site>) {
        let mut rooms = self.rooms.write().await;
        if rooms.get(id).is_some_and(|current| Arc::ptr_eq(current, site)) {
            rooms.remove(id);
            log::info!("closed room {}", id);
        }
    }

    /// Confirm a just-joined site is still the registered room for this
    /// identifier, re-inserting it when an eviction raced the join.
    /// Returns false when a successor room owns the identifier, in which
    /// case the join must be redone against the successor.
    pub async fn settle(&self, id: &str, site: &Arc<Site>) -> bool {
        let mut rooms = self.rooms.write().await;
        match rooms.get(id) {
            Some(current) => Arc::ptr_eq(current, site),
            None => {
                rooms.insert(id.to_string(), site.clone());
                true
            }
        }
    }

    pub async fn occupancy(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Evict rooms observed with an empty roster or past the idle
    /// threshold. Roster emptiness is re-checked under the map write
    /// lock; a join that slips between its site lookup and its seat is
    /// healed afterwards by `settle`.
    pub async fn sweep(&self) {
        self.sweep_older_than(crate::IDLE_TIMEOUT).await
    }

    /// threshold-parameterized sweep so tests can tighten the idle window
    pub(crate) async fn sweep_older_than(&self, idle: std::time::Duration) {
        let mut rooms = self.rooms.write().await;
        let mut doomed = Vec::new();
        for (id, site) in rooms.iter() {
            let room = site.room.lock().await;
            if room.roster_is_empty() || room.idle_for() >= idle {
                doomed.push(id.clone());
            }
        }
        for id in doomed {
            rooms.remove(&id);
            log::info!("evicted room {}", id);
        }
    }

    /// Periodic eviction task, spawned once at server start.
    pub async fn patrol(self: Arc<Self>) {
        loop {
            tokio::time::sleep(crate::SWEEP_INTERVAL).await;
            self.sweep().await;
        }
    }
}
