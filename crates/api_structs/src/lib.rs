mod notification;
mod reminders;
mod status;

pub use crate::notification::api::*;
pub use crate::reminders::api::*;
pub use crate::status::api::*;
