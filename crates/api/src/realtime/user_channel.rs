use super::{Channel, Connection};
use sehat_saathi_api_structs::{ClientMessage, ServerMessage};
use sehat_saathi_infra::{Realtime, RoomRegistry, SehatContext};
use tracing::{info, warn};

/// Private notification rooms, one per user
pub struct UserChannel;

#[async_trait::async_trait(?Send)]
impl Channel for UserChannel {
    const NAME: &'static str = "user";

    fn registry(realtime: &Realtime) -> &RoomRegistry {
        &realtime.users
    }

    async fn handle(
        connection: &Connection,
        ctx: &SehatContext,
        msg: ClientMessage,
    ) -> Option<ServerMessage> {
        match msg {
            ClientMessage::JoinCheck(user_id) => {
                if user_id != connection.user.id {
                    warn!(
                        "User {} tried to join the room of user {}",
                        connection.user.id, user_id
                    );
                    return Some(ServerMessage::Error(
                        "Not allowed to join the room of another user".into(),
                    ));
                }
                let room = Realtime::user_room(&user_id);
                if Self::registry(&ctx.realtime).join(&room, &connection.id, connection.sender.clone())
                {
                    info!("User {} joined room: {}", user_id, room);
                }
                None
            }
            _ => Some(ServerMessage::Error(
                "Event not supported on this channel".into(),
            )),
        }
    }
}
