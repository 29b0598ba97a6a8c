mod caregiver_channel;
mod socket;
mod user_channel;

use crate::{error::SehatError, shared::auth::protect_socket_route};
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use caregiver_channel::CaregiverChannel;
use sehat_saathi_api_structs::{ClientMessage, ServerMessage};
use sehat_saathi_domain::{User, ID};
use sehat_saathi_infra::{connection_channel, FrameSender, Realtime, RoomRegistry, SehatContext};
use socket::RoomSocket;
use tracing::{info, warn};
use user_channel::UserChannel;

/// An authenticated websocket connection
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ID,
    pub user: User,
    pub sender: FrameSender,
}

/// The events a websocket namespace understands and the room registry
/// its connections join
#[async_trait::async_trait(?Send)]
pub trait Channel: Unpin + 'static {
    const NAME: &'static str;

    fn registry(realtime: &Realtime) -> &RoomRegistry;

    /// Handles one client frame, the returned message is sent back to
    /// the client
    async fn handle(
        connection: &Connection,
        ctx: &SehatContext,
        msg: ClientMessage,
    ) -> Option<ServerMessage>;
}

async fn socket_controller<C: Channel>(
    http_req: HttpRequest,
    stream: web::Payload,
    ctx: web::Data<SehatContext>,
) -> Result<HttpResponse, SehatError> {
    let user = protect_socket_route(&http_req, &ctx).await?;

    let (sender, receiver) = connection_channel();
    let connection = Connection {
        id: ID::new(),
        user,
        sender,
    };
    info!(
        "User {} connected to the {} channel as {}",
        connection.user.id,
        C::NAME,
        connection.id
    );
    let socket = RoomSocket::<C>::new(connection, receiver, ctx.get_ref().clone());

    ws::start(socket, &http_req, stream).map_err(|e| {
        warn!("Unable to start websocket: {:?}", e);
        SehatError::BadClientData("Expected a websocket upgrade request".into())
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(socket_controller::<UserChannel>));
    cfg.route(
        "/ws/caregivers",
        web::get().to(socket_controller::<CaregiverChannel>),
    );
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;
    use sehat_saathi_infra::FrameReceiver;

    pub fn connection(user: &User) -> (Connection, FrameReceiver) {
        let (sender, receiver) = connection_channel();
        let connection = Connection {
            id: ID::new(),
            user: user.clone(),
            sender,
        };
        (connection, receiver)
    }
}
