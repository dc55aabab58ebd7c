mod booking;
mod channel;
mod customer;
mod job;
mod money;
mod phone;
pub mod render;
mod shared;
mod template;
mod tenant;
mod trigger;

pub use booking::Booking;
pub use channel::Channel;
pub use customer::Customer;
pub use job::{JobStatus, NotificationJob};
pub use money::format_minor_units;
pub use phone::normalize_phone;
pub use render::{render, unsupported_placeholders, RenderContext, SUPPORTED_PLACEHOLDERS};
pub use shared::entity::{Entity, ID};
pub use template::MessageTemplate;
pub use tenant::{Tenant, TenantSettings};
pub use trigger::{ScheduleKind, Trigger};
