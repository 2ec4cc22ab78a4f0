use super::*;
use crate::gameroom::*;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;
use tokio::sync::broadcast;

/// Best-effort per-connection gate on set attempts. A request inside
/// the window is refused before any room state is touched, never
/// queued; a request that passes opens a fresh window.
pub struct Throttle {
    window: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn open(&mut self) -> bool {
        if self.last.is_some_and(|t| t.elapsed() < self.window) {
            false
        } else {
            self.last = Some(Instant::now());
            true
        }
    }
}

/// Per-connection bridge between one WebSocket and the lobby. Forwards
/// room broadcasts to the socket, parses inbound requests, enforces the
/// attempt cooldown, and translates Room outcomes into events.
///
/// Unicast events (misses, hints, validation errors) go straight down
/// this socket; everything else is published through the room's channel
/// so every member, this connection included, observes the same stream.
pub struct Session {
    id: ConnectionId,
    lobby: Arc<Lobby>,
    seat: Option<Seat>,
    throttle: Throttle,
}

struct Seat {
    room_id: String,
    site: Arc<Site>,
}

impl Session {
    pub fn new(id: ConnectionId, lobby: Arc<Lobby>) -> Self {
        Self {
            id,
            lobby,
            seat: None,
            throttle: Throttle::new(crate::ATTEMPT_COOLDOWN),
        }
    }

    /// Run the bridge until the socket closes, then unseat the player.
    /// Each inbound request runs to completion, broadcasts included,
    /// before the next is dequeued.
    pub async fn run(mut self, mut ws: actix_ws::Session, mut stream: actix_ws::MessageStream) {
        use futures::StreamExt;
        log::info!("connection {} opened", self.id);
        // the placeholder feed keeps the select arm alive until a join
        // subscribes to a real room
        let (keepalive, mut feed) = broadcast::channel::<String>(1);
        'sesh: loop {
            tokio::select! {
                biased;
                msg = feed.recv() => match msg {
                    Ok(json) => if ws.text(json).await.is_err() { break 'sesh },
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        log::warn!("connection {} lagged {} events", self.id, n);
                        continue 'sesh;
                    }
                    Err(broadcast::error::RecvError::Closed) => break 'sesh,
                },
                msg = stream.next() => match msg {
                    Some(Ok(actix_ws::Message::Text(text))) => {
                        match serde_json::from_str::<Request>(&text) {
                            Ok(Request::Join { room, name }) => {
                                if let Some(fresh) = self.join(&room, &name, &mut ws).await {
                                    feed = fresh;
                                }
                            }
                            Ok(Request::Select { ids }) => self.select(&ids, &mut ws).await,
                            Ok(Request::Hint) => self.hint(&mut ws).await,
                            Ok(Request::Leave) => {
                                self.depart().await;
                                feed = keepalive.subscribe();
                            }
                            Err(e) => {
                                self.complain(&mut ws, format!("malformed request: {}", e)).await;
                            }
                        }
                    }
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                    Some(Err(_)) => break 'sesh,
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
            }
        }
        self.depart().await;
        log::info!("connection {} closed", self.id);
    }
}

impl Session {
    /// Seat this connection in a room, dealing the room on first join.
    /// Returns a fresh event feed when the seat moved to a new room.
    async fn join(
        &mut self,
        room_id: &str,
        name: &str,
        ws: &mut actix_ws::Session,
    ) -> Option<broadcast::Receiver<String>> {
        let name = match valid_room_id(room_id).and_then(|_| valid_name(name)) {
            Ok(name) => name.to_string(),
            Err(message) => {
                self.complain(ws, message).await;
                return None;
            }
        };
        if let Some(seat) = self.seat.as_ref().filter(|s| s.room_id == room_id) {
            // idempotent re-join: refresh the snapshot, keep the feed
            let site = seat.site.clone();
            let state = site.room.lock().await.join(self.id, &name);
            site.publish(&Event::State(state));
            return None;
        }
        self.depart().await;
        let (site, feed, state) = loop {
            let site = self.lobby.get_or_create(room_id).await;
            let feed = site.events.subscribe();
            let state = site.room.lock().await.join(self.id, &name);
            // an eviction sweep can race the gap between the site lookup
            // and the seat; settle re-anchors the room in the registry or
            // reports that a successor took the identifier over
            if self.lobby.settle(room_id, &site).await {
                break (site, feed, state);
            }
            site.room.lock().await.leave(self.id);
        };
        site.publish(&Event::State(state));
        self.seat = Some(Seat {
            room_id: room_id.to_string(),
            site,
        });
        Some(feed)
    }

    /// Judge a selection. The cooldown gate runs before any room state
    /// is touched; throttled requests are refused, never queued.
    async fn select(&mut self, ids: &[u8], ws: &mut actix_ws::Session) {
        if !self.throttle.open() {
            let refusal = Event::Error {
                kind: ErrorKind::RateLimited,
                message: String::from("too many attempts, slow down"),
            };
            Self::unicast(ws, &refusal).await;
            return;
        }
        let Some(site) = self.seat.as_ref().map(|s| s.site.clone()) else {
            self.complain(ws, String::from("join a room first")).await;
            return;
        };
        let picks = match valid_selection(ids) {
            Ok(picks) => picks,
            Err(message) => {
                self.complain(ws, message).await;
                return;
            }
        };
        let mut room = site.room.lock().await;
        match room.attempt_set(self.id, picks) {
            Attempt::Matched(m) => {
                let state = room.snapshot();
                drop(room);
                site.publish(&Event::SetFound {
                    finder: m.finder,
                    name: m.name,
                    cards: m.cards,
                });
                site.publish(&Event::State(state));
                if m.added > 0 {
                    site.publish(&Event::CardsAdded { count: m.added });
                }
                if let Some(over) = m.over {
                    site.publish(&Event::GameOver {
                        winner: over.winner,
                        stats: over.stats,
                    });
                }
            }
            Attempt::Missed => {
                drop(room);
                Self::unicast(ws, &Event::InvalidSet).await;
            }
            Attempt::Rejected { message } => {
                drop(room);
                self.complain(ws, message).await;
            }
        }
    }

    /// One random valid triple, ids only, straight back to the requester.
    async fn hint(&mut self, ws: &mut actix_ws::Session) {
        let Some(site) = self.seat.as_ref().map(|s| s.site.clone()) else {
            self.complain(ws, String::from("join a room first")).await;
            return;
        };
        let hint = site.room.lock().await.request_hint();
        let event = match hint {
            Some(ids) => Event::Hint {
                ids: ids.to_vec(),
                message: None,
            },
            None => Event::Hint {
                ids: Vec::new(),
                message: Some(String::from("no sets on the current board")),
            },
        };
        Self::unicast(ws, &event).await;
    }

    /// Unseat from the current room, notifying the remainder or closing
    /// the room when this was the last player.
    async fn depart(&mut self) {
        let Some(seat) = self.seat.take() else { return };
        let departure = seat.site.room.lock().await.leave(self.id);
        if let Some(gone) = departure {
            if gone.remaining == 0 {
                self.lobby.remove(&seat.room_id, &seat.site).await;
            } else {
                seat.site.publish(&Event::PlayerLeft {
                    id: gone.id,
                    name: gone.name,
                    remaining: gone.remaining,
                });
            }
        }
    }

    async fn complain(&self, ws: &mut actix_ws::Session, message: String) {
        let error = Event::Error {
            kind: ErrorKind::Validation,
            message,
        };
        Self::unicast(ws, &error).await;
    }

    async fn unicast(ws: &mut actix_ws::Session, event: &Event) {
        ws.text(event.json())
            .await
            .map_err(|_| log::debug!("unicast to a closing socket"))
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_refuses_inside_the_window() {
        let mut throttle = Throttle::new(Duration::from_millis(20));
        assert!(throttle.open());
        assert!(!throttle.open());
        std::thread::sleep(Duration::from_millis(25));
        assert!(throttle.open());
    }

    #[test]
    fn each_pass_opens_a_fresh_window() {
        let mut throttle = Throttle::new(Duration::from_millis(30));
        assert!(throttle.open());
        std::thread::sleep(Duration::from_millis(20));
        // refusals do not extend the window
        assert!(!throttle.open());
        std::thread::sleep(Duration::from_millis(15));
        assert!(throttle.open());
        assert!(!throttle.open());
    }
}
