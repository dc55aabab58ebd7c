mod booking;
mod customer;
mod notification;
mod status;
mod template;
mod tenant;

pub mod dtos {
    pub use crate::booking::dtos::*;
    pub use crate::customer::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::template::dtos::*;
    pub use crate::tenant::dtos::*;
}

pub use crate::booking::api::*;
pub use crate::customer::api::*;
pub use crate::notification::api::*;
pub use crate::status::api::*;
pub use crate::template::api::*;
pub use crate::tenant::api::*;
