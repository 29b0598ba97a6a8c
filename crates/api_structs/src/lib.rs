mod caregiver;
mod notification;
mod realtime;
mod reminder;
mod status;
mod sync;

pub mod dtos {
    pub use crate::caregiver::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::caregiver::api::*;
pub use crate::notification::api::*;
pub use crate::realtime::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::sync::api::*;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement returned by endpoints without a resource to return
#[derive(Debug, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
