mod config;
mod realtime;
mod repos;
mod system;

pub use config::Config;
pub use realtime::{connection_channel, Frame, FrameReceiver, FrameSender, Realtime, RoomRegistry};
pub use repos::{DeleteResult, Repos};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct SehatContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Live websocket connections grouped by room
    pub realtime: Realtime,
}

struct ContextParams {
    pub mongodb_connection_string: String,
    pub mongodb_db_name: String,
}

impl SehatContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            realtime: Realtime::default(),
        }
    }

    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_mongodb(
            &params.mongodb_connection_string,
            &params.mongodb_db_name,
        )
        .await?;
        Ok(Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            realtime: Realtime::default(),
        })
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<SehatContext> {
    const MONGODB_CONNECTION_STRING: &str = "MONGODB_CONNECTION_STRING";
    const MONGODB_NAME: &str = "MONGODB_NAME";

    let inmemory_requested = std::env::args().any(|arg| arg == "inmemory");
    let mongodb_connection_string_var = std::env::var(MONGODB_CONNECTION_STRING);
    let mongodb_db_name = std::env::var(MONGODB_NAME);

    match (inmemory_requested, mongodb_connection_string_var, mongodb_db_name) {
        (false, Ok(mongodb_connection_string), Ok(mongodb_db_name)) => {
            info!("{} and {} env vars was provided. Going to use mongodb.", MONGODB_CONNECTION_STRING, MONGODB_NAME);
            SehatContext::create(ContextParams {
                mongodb_connection_string,
                mongodb_db_name,
            })
            .await
        }
        (true, _, _) => {
            info!("Inmemory infra requested. Going to use inmemory repositories.");
            Ok(SehatContext::create_inmemory())
        }
        _ => {
            warn!("{} and {} env vars was not provided. Going to use inmemory infra, nothing will be persisted across restarts.", MONGODB_CONNECTION_STRING, MONGODB_NAME);
            Ok(SehatContext::create_inmemory())
        }
    }
}
