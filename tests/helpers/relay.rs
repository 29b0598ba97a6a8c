use std::sync::Arc;
use tokio::{
    io::copy_bidirectional,
    net::{TcpListener, TcpStream},
    sync::Notify,
};

/// TCP relay in front of a running app. Cutting it drops every open
/// connection without the client closing it, new connections are relayed
/// as before.
pub struct Relay {
    pub address: String,
    cut: Arc<Notify>,
}

impl Relay {
    pub async fn start(app_address: &str) -> Self {
        let target = app_address
            .trim_start_matches("http://")
            .replace("localhost", "127.0.0.1");
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Expected to bind relay");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Expected relay address")
        );
        let cut = Arc::new(Notify::new());

        let connection_cut = cut.clone();
        tokio::spawn(async move {
            while let Ok((mut inbound, _)) = listener.accept().await {
                let target = target.clone();
                let cut = connection_cut.clone();
                tokio::spawn(async move {
                    let mut outbound = match TcpStream::connect(&target).await {
                        Ok(stream) => stream,
                        Err(_) => return,
                    };
                    tokio::select! {
                        _ = copy_bidirectional(&mut inbound, &mut outbound) => {}
                        _ = cut.notified() => {}
                    }
                });
            }
        });

        Self { address, cut }
    }

    /// Drops the connections that are currently open
    pub fn cut_connections(&self) {
        self.cut.notify_waiters();
    }
}
