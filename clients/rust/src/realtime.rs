use futures::{
    channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender},
    SinkExt, StreamExt,
};
use sehat_saathi_api_structs::{ClientMessage, ServerMessage};
use std::time::Duration;
use tokio::{sync::watch, time::sleep};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, warn};

/// Lifecycle and payload events of a websocket channel
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connecting,
    Connected,
    Disconnected,
    Message(ServerMessage),
}

/// Sends frames on a running channel and closes it. Dropping the handle
/// also closes the channel.
pub struct ChannelHandle {
    outgoing: UnboundedSender<ClientMessage>,
    shutdown: watch::Sender<bool>,
}

impl ChannelHandle {
    /// Queues the message for the current connection. Messages sent while
    /// disconnected are written after the next reconnect.
    pub fn send(&self, msg: ClientMessage) -> bool {
        self.outgoing.unbounded_send(msg).is_ok()
    }

    pub fn close(&self) {
        let _ = self.shutdown.send(true);
    }
}

pub struct ChannelOptions {
    /// Full websocket url including the `token` query parameter
    pub url: String,
    /// Frames written on every (re)connect before anything else
    pub on_connect: Vec<ClientMessage>,
    pub reconnect_delay: Duration,
}

fn to_text(msg: &ClientMessage) -> Message {
    Message::Text(serde_json::to_string(msg).unwrap_or_default())
}

/// Opens a channel that keeps reconnecting until it is closed. The
/// `on_connect` frames are replayed on every connect so room memberships
/// survive a dropped transport.
pub fn open_channel(options: ChannelOptions) -> (ChannelHandle, UnboundedReceiver<ChannelEvent>) {
    let (events, events_receiver) = unbounded();
    let (outgoing, mut outgoing_receiver) = unbounded::<ClientMessage>();
    let (shutdown, mut stopped) = watch::channel(false);

    tokio::spawn(async move {
        loop {
            if *stopped.borrow() {
                break;
            }
            let _ = events.unbounded_send(ChannelEvent::Connecting);
            match connect_async(options.url.as_str()).await {
                Ok((stream, _)) => {
                    let (mut write, mut read) = stream.split();
                    let _ = events.unbounded_send(ChannelEvent::Connected);

                    let mut open = true;
                    for msg in &options.on_connect {
                        if write.send(to_text(msg)).await.is_err() {
                            open = false;
                            break;
                        }
                    }
                    while open {
                        tokio::select! {
                            frame = read.next() => match frame {
                                Some(Ok(Message::Text(text))) => {
                                    match serde_json::from_str::<ServerMessage>(&text) {
                                        Ok(msg) => {
                                            let _ = events.unbounded_send(ChannelEvent::Message(msg));
                                        }
                                        Err(e) => debug!("Ignoring unknown frame: {:?}", e),
                                    }
                                }
                                Some(Ok(Message::Close(_))) | None => open = false,
                                Some(Ok(_)) => {}
                                Some(Err(e)) => {
                                    warn!("Channel transport error: {:?}", e);
                                    open = false;
                                }
                            },
                            msg = outgoing_receiver.next() => match msg {
                                Some(msg) => {
                                    if write.send(to_text(&msg)).await.is_err() {
                                        open = false;
                                    }
                                }
                                None => {
                                    let _ = write.send(Message::Close(None)).await;
                                    open = false;
                                }
                            },
                            _ = stopped.changed() => {
                                let _ = write.send(Message::Close(None)).await;
                                open = false;
                            }
                        }
                    }
                    let _ = events.unbounded_send(ChannelEvent::Disconnected);
                }
                Err(e) => {
                    warn!("Unable to connect to {}: {:?}", options.url, e);
                    let _ = events.unbounded_send(ChannelEvent::Disconnected);
                }
            }

            // A close during the connection already consumed the change
            if *stopped.borrow() {
                break;
            }
            tokio::select! {
                _ = sleep(options.reconnect_delay) => {}
                _ = stopped.changed() => break,
            }
        }
        debug!("Channel closed");
    });

    (ChannelHandle { outgoing, shutdown }, events_receiver)
}

/// Converts the http address of the server to the websocket url of
/// the given path
pub(crate) fn socket_url(address: &str, path: &str, token: Option<&str>) -> String {
    let address = if let Some(rest) = address.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = address.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        address.to_string()
    };
    match token {
        Some(token) => format!("{}/{}?token={}", address, path, token),
        None => format!("{}/{}", address, path),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sehat_saathi_domain::ID;
    use tokio::{net::TcpListener, time::timeout};
    use tokio_tungstenite::accept_async;

    async fn next_event(events: &mut UnboundedReceiver<ChannelEvent>) -> Option<ChannelEvent> {
        timeout(Duration::from_secs(5), events.next())
            .await
            .expect("Expected a channel event in time")
    }

    async fn listen() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        (listener, url)
    }

    #[tokio::test]
    async fn replays_join_frames_on_every_connect() {
        let (listener, url) = listen().await;
        let user_id = ID::new();
        let join = serde_json::to_string(&ClientMessage::JoinCheck(user_id.clone())).unwrap();

        let server = tokio::spawn(async move {
            let mut joins = Vec::new();
            for _ in 0..2 {
                let (stream, _) = listener.accept().await.unwrap();
                let mut socket = accept_async(stream).await.unwrap();
                if let Some(Ok(Message::Text(text))) = socket.next().await {
                    joins.push(text);
                }
                // Dropping the socket ends the connection without a close frame
            }
            joins
        });

        let (handle, mut events) = open_channel(ChannelOptions {
            url,
            on_connect: vec![ClientMessage::JoinCheck(user_id)],
            reconnect_delay: Duration::from_millis(50),
        });

        let mut connects = 0;
        while connects < 2 {
            if next_event(&mut events).await == Some(ChannelEvent::Connected) {
                connects += 1;
            }
        }
        let joins = timeout(Duration::from_secs(5), server).await.unwrap().unwrap();
        assert_eq!(joins, vec![join.clone(), join]);
        handle.close();
    }

    #[tokio::test]
    async fn close_stops_a_live_channel_without_waiting_for_reconnect() {
        let (listener, url) = listen().await;
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut socket = accept_async(stream).await.unwrap();
            while let Some(Ok(_)) = socket.next().await {}
        });

        let (handle, mut events) = open_channel(ChannelOptions {
            url,
            on_connect: vec![],
            reconnect_delay: Duration::from_secs(60),
        });
        assert_eq!(next_event(&mut events).await, Some(ChannelEvent::Connecting));
        assert_eq!(next_event(&mut events).await, Some(ChannelEvent::Connected));

        handle.close();
        assert_eq!(next_event(&mut events).await, Some(ChannelEvent::Disconnected));
        // The event stream ends once the channel task is done
        assert_eq!(next_event(&mut events).await, None);
    }

    #[test]
    fn builds_socket_urls() {
        assert_eq!(
            socket_url("http://localhost:5000", "ws", Some("abc")),
            "ws://localhost:5000/ws?token=abc"
        );
        assert_eq!(
            socket_url("https://api.example.com", "ws/caregivers", None),
            "wss://api.example.com/ws/caregivers"
        );
    }
}
