use mailhorn_domain::{Booking, Trigger};
use mailhorn_infra::MailhornContext;
use tracing::warn;

use crate::notification::emit_notifications::EmitNotificationsUseCase;
use crate::shared::usecase::execute;

/// Fans a fresh booking out into notification jobs, one emission per
/// booking lifecycle trigger. Emission failures never fail the
/// booking itself.
pub struct EmitNotificationsOnBookingCreated;

impl EmitNotificationsOnBookingCreated {
    pub(crate) async fn emit_for_booking(&self, booking: &Booking, ctx: &MailhornContext) {
        let triggers = [
            Trigger::BookingCreated,
            Trigger::ReminderUpcoming,
            Trigger::ReminderImminent,
        ];
        for trigger in triggers {
            let usecase = EmitNotificationsUseCase {
                tenant_id: booking.tenant_id.clone(),
                booking_id: booking.id.clone(),
                trigger,
                amount_cents: None,
            };
            if let Err(e) = execute(usecase, ctx).await {
                warn!(
                    "Unable to emit {} notifications for booking: {}. Error: {:?}",
                    trigger.as_str(),
                    booking.id,
                    e
                );
            }
        }
    }
}
