use super::{Channel, Connection};
use actix::prelude::*;
use actix_web_actors::ws;
use sehat_saathi_api_structs::{ClientMessage, ServerMessage};
use sehat_saathi_infra::{Frame, FrameReceiver, SehatContext};
use std::{
    marker::PhantomData,
    time::{Duration, Instant},
};
use tracing::debug;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Websocket actor bridging one client and the rooms it has joined.
///
/// Frames published to the rooms arrive through the connection receiver and
/// are written to the client as text. The actor keeps the sender half alive
/// through its `Connection` so the receiver only ends with the actor.
pub struct RoomSocket<C: Channel> {
    connection: Connection,
    receiver: Option<FrameReceiver>,
    app: SehatContext,
    last_heartbeat: Instant,
    _channel: PhantomData<C>,
}

impl<C: Channel> RoomSocket<C> {
    pub fn new(connection: Connection, receiver: FrameReceiver, app: SehatContext) -> Self {
        Self {
            connection,
            receiver: Some(receiver),
            app,
            last_heartbeat: Instant::now(),
            _channel: PhantomData,
        }
    }

    fn heartbeat(&self, ctx: &mut <Self as Actor>::Context) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.last_heartbeat) > CLIENT_TIMEOUT {
                debug!("Connection {} timed out", act.connection.id);
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn on_text(&mut self, text: &str, ctx: &mut <Self as Actor>::Context) {
        let msg = match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => msg,
            Err(e) => {
                debug!("Malformed frame from {}: {:?}", self.connection.id, e);
                ctx.text(ServerMessage::Error("Malformed message".into()).to_frame());
                return;
            }
        };

        let connection = self.connection.clone();
        let app = self.app.clone();
        let fut = async move { C::handle(&connection, &app, msg).await };
        ctx.spawn(fut.into_actor(self).map(|reply, _, ctx| {
            if let Some(reply) = reply {
                ctx.text(reply.to_frame());
            }
        }));
    }
}

impl<C: Channel> Actor for RoomSocket<C> {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        if let Some(receiver) = self.receiver.take() {
            ctx.add_stream(receiver);
        }
        self.heartbeat(ctx);
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        debug!(
            "Connection {} left the {} channel",
            self.connection.id,
            C::NAME
        );
        C::registry(&self.app.realtime).leave_all(&self.connection.id);
    }
}

impl<C: Channel> StreamHandler<Frame> for RoomSocket<C> {
    fn handle(&mut self, frame: Frame, ctx: &mut Self::Context) {
        ctx.text(frame);
    }
}

impl<C: Channel> StreamHandler<Result<ws::Message, ws::ProtocolError>> for RoomSocket<C> {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                debug!("Protocol error on {}: {:?}", self.connection.id, e);
                ctx.stop();
                return;
            }
        };
        match msg {
            ws::Message::Ping(msg) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&msg);
            }
            ws::Message::Pong(_) => self.last_heartbeat = Instant::now(),
            ws::Message::Text(text) => self.on_text(&text, ctx),
            ws::Message::Binary(_) => {
                ctx.text(ServerMessage::Error("Only text frames are supported".into()).to_frame())
            }
            ws::Message::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            ws::Message::Continuation(_) => ctx.stop(),
            ws::Message::Nop => (),
        }
    }
}
