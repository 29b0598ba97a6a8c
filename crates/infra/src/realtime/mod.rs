use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use sehat_saathi_domain::ID;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// A serialized event ready to be written to a live connection
pub type Frame = String;
pub type FrameSender = UnboundedSender<Frame>;
pub type FrameReceiver = UnboundedReceiver<Frame>;

/// Creates the pipe between a `RoomRegistry` and one live connection
pub fn connection_channel() -> (FrameSender, FrameReceiver) {
    unbounded()
}

/// Named groups of live connections which can be addressed as one
/// publish target.
///
/// Nothing is persisted, a publish to a room without members is dropped.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<String, HashMap<ID, FrameSender>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds the connection to the room. Joining a room twice is a no-op,
    /// returns whether the connection was not already a member.
    pub fn join(&self, room: &str, connection_id: &ID, sender: FrameSender) -> bool {
        let mut rooms = self.rooms.lock().unwrap();
        let members = rooms.entry(room.to_string()).or_default();
        if members.contains_key(connection_id) {
            return false;
        }
        members.insert(connection_id.clone(), sender);
        true
    }

    /// Removes the connection from every room it has joined
    pub fn leave_all(&self, connection_id: &ID) {
        let mut rooms = self.rooms.lock().unwrap();
        rooms.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
    }

    /// Sends the frame to every current member of the room and returns
    /// how many connections accepted it. Members whose connection is gone
    /// are pruned.
    pub fn publish(&self, room: &str, frame: &str) -> usize {
        let mut rooms = self.rooms.lock().unwrap();
        let members = match rooms.get_mut(room) {
            Some(members) => members,
            None => {
                debug!("No live connections in room: {}, dropping event", room);
                return 0;
            }
        };

        let mut delivered = 0;
        members.retain(|connection_id, sender| match sender.unbounded_send(frame.to_string()) {
            Ok(_) => {
                delivered += 1;
                true
            }
            Err(_) => {
                debug!("Connection: {} is closed, removing it from room: {}", connection_id, room);
                false
            }
        });
        if members.is_empty() {
            rooms.remove(room);
        }

        delivered
    }

    pub fn member_count(&self, room: &str) -> usize {
        let rooms = self.rooms.lock().unwrap();
        rooms.get(room).map(|members| members.len()).unwrap_or(0)
    }
}

/// The two independent connection registries of the service: one room per
/// user for private notifications and one room per patient for the
/// caregivers watching that patient.
#[derive(Clone, Default)]
pub struct Realtime {
    pub users: Arc<RoomRegistry>,
    pub patients: Arc<RoomRegistry>,
}

impl Realtime {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn user_room(user_id: &ID) -> String {
        user_id.as_string()
    }

    pub fn patient_room(patient_id: &ID) -> String {
        format!("patient:{}", patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn publishes_to_every_member_of_a_room() {
        let registry = RoomRegistry::new();
        let (conn1, conn2, conn3) = (ID::new(), ID::new(), ID::new());
        let (tx1, mut rx1) = connection_channel();
        let (tx2, mut rx2) = connection_channel();
        let (tx3, mut rx3) = connection_channel();

        assert!(registry.join("a", &conn1, tx1.clone()));
        assert!(!registry.join("a", &conn1, tx1));
        assert!(registry.join("a", &conn2, tx2));
        assert!(registry.join("b", &conn3, tx3));
        assert_eq!(registry.member_count("a"), 2);

        assert_eq!(registry.publish("a", "hello"), 2);
        assert_eq!(rx1.next().await.unwrap(), "hello");
        assert_eq!(rx2.next().await.unwrap(), "hello");
        assert!(rx3.try_next().is_err());
    }

    #[test]
    fn drops_events_for_empty_rooms() {
        let registry = RoomRegistry::new();
        assert_eq!(registry.publish("nobody", "hello"), 0);
    }

    #[test]
    fn prunes_closed_connections_and_leaves_on_disconnect() {
        let registry = RoomRegistry::new();
        let (conn1, conn2) = (ID::new(), ID::new());
        let (tx1, rx1) = connection_channel();
        let (tx2, _rx2) = connection_channel();
        registry.join("a", &conn1, tx1);
        registry.join("a", &conn2, tx2.clone());
        registry.join("b", &conn2, tx2);

        drop(rx1);
        assert_eq!(registry.publish("a", "hello"), 1);
        assert_eq!(registry.member_count("a"), 1);

        registry.leave_all(&conn2);
        assert_eq!(registry.member_count("a"), 0);
        assert_eq!(registry.member_count("b"), 0);
    }

    #[test]
    fn patient_and_user_rooms_are_separate_namespaces() {
        let id = ID::new();
        assert_ne!(Realtime::user_room(&id), Realtime::patient_room(&id));
        let realtime = Realtime::new();
        let (tx, _rx) = connection_channel();
        realtime.users.join(&Realtime::user_room(&id), &ID::new(), tx);
        assert_eq!(realtime.patients.publish(&Realtime::user_room(&id), "x"), 0);
    }
}
