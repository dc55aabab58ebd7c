use actix_web::{web, HttpResponse};
use mailhorn_api_structs::emit_notifications::*;
use mailhorn_domain::{
    normalize_phone, render, Channel, Customer, JobStatus, NotificationJob, RenderContext,
    ScheduleKind, Trigger, ID,
};
use mailhorn_infra::MailhornContext;
use tracing::warn;

use crate::error::MailhornError;
use crate::shared::usecase::{execute, UseCase};

pub async fn emit_notifications_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<MailhornContext>,
) -> Result<HttpResponse, MailhornError> {
    let usecase = EmitNotificationsUseCase {
        tenant_id: body.0.tenant_id,
        booking_id: body.0.booking_id,
        trigger: body.0.trigger,
        amount_cents: body.0.amount_cents,
    };

    execute(usecase, &ctx)
        .await
        .map(|jobs| HttpResponse::Ok().json(APIResponse::new(jobs)))
        .map_err(MailhornError::from)
}

/// Turns one booking event into pending notification jobs, one per
/// channel the customer is reachable on. Re-running the same emission
/// is a no-op thanks to the job store dedup key.
#[derive(Debug)]
pub(crate) struct EmitNotificationsUseCase {
    pub tenant_id: ID,
    pub booking_id: ID,
    pub trigger: Trigger,
    pub amount_cents: Option<i64>,
}

#[derive(Debug)]
pub(crate) enum UseCaseError {
    TenantNotFound(ID),
    BookingNotFound(ID),
    CustomerNotFound(ID),
}

impl From<UseCaseError> for MailhornError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TenantNotFound(tenant_id) => {
                Self::NotFound(format!("The tenant with id: {}, was not found.", tenant_id))
            }
            UseCaseError::BookingNotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
            UseCaseError::CustomerNotFound(customer_id) => Self::NotFound(format!(
                "The customer with id: {}, was not found.",
                customer_id
            )),
        }
    }
}

fn recipient_for(channel: Channel, customer: &Customer, default_country_code: &str) -> Option<String> {
    match channel {
        Channel::Email => customer.email.clone(),
        // The store does not guarantee E.164, the provider contract
        // does, so normalize here and skip the channel on garbage
        Channel::Sms => customer
            .phone
            .as_deref()
            .and_then(|raw| normalize_phone(raw, default_country_code)),
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for EmitNotificationsUseCase {
    type Response = Vec<NotificationJob>;

    type Error = UseCaseError;

    const NAME: &'static str = "EmitNotifications";

    async fn execute(&mut self, ctx: &MailhornContext) -> Result<Self::Response, Self::Error> {
        let tenant = ctx
            .repos
            .tenants
            .find(&self.tenant_id)
            .await
            .ok_or_else(|| UseCaseError::TenantNotFound(self.tenant_id.clone()))?;
        if !tenant.settings.notifications_enabled {
            return Ok(Vec::new());
        }

        let booking = ctx
            .repos
            .bookings
            .find(&self.booking_id)
            .await
            .filter(|b| b.tenant_id == self.tenant_id)
            .ok_or_else(|| UseCaseError::BookingNotFound(self.booking_id.clone()))?;
        let customer = ctx
            .repos
            .customers
            .find(&booking.customer_id)
            .await
            .ok_or_else(|| UseCaseError::CustomerNotFound(booking.customer_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let render_ctx = RenderContext::from_parts(
            &tenant,
            &customer,
            &booking,
            &ctx.config.portal_base_url,
            self.amount_cents,
        );

        let mut created_jobs = Vec::new();
        for channel in Channel::all() {
            // A tenant opts a channel in simply by authoring a
            // template for it
            let template = match ctx
                .repos
                .templates
                .find_effective(&self.tenant_id, self.trigger, channel)
                .await
            {
                Some(template) => template,
                None => continue,
            };
            let recipient = match recipient_for(channel, &customer, &ctx.config.default_country_code)
            {
                Some(recipient) => recipient,
                None => continue,
            };

            let scheduled_at = match self.trigger.schedule_kind() {
                ScheduleKind::Immediate => now,
                ScheduleKind::BeforeAppointment { offset_millis } => {
                    let at = booking.start_ts - offset_millis;
                    if at >= now {
                        at
                    } else if booking.start_ts > now {
                        // Booked inside the reminder window: send the
                        // reminder right away instead of in the past
                        now
                    } else {
                        // Appointment already started, a reminder
                        // would only confuse the customer
                        continue;
                    }
                }
            };

            let job = NotificationJob {
                id: Default::default(),
                tenant_id: self.tenant_id.clone(),
                booking_id: self.booking_id.clone(),
                template_id: template.id.clone(),
                trigger: self.trigger,
                channel,
                status: JobStatus::Pending,
                recipient,
                subject: template.subject.as_deref().map(|s| render(s, &render_ctx)),
                body: render(&template.body, &render_ctx),
                scheduled_at,
                attempts: 0,
                max_attempts: ctx.config.max_delivery_attempts,
                last_error: None,
                provider_message_id: None,
                created: now,
                updated: now,
            };

            match ctx.repos.jobs.insert(&job).await {
                Ok(true) => created_jobs.push(job),
                Ok(false) => {} // already emitted, keep the original job
                Err(e) => {
                    // One channel failing to persist must not block
                    // the other channel of the same emission
                    warn!(
                        "Unable to persist {} notification job for booking: {}. Error: {:?}",
                        channel.as_str(),
                        self.booking_id,
                        e
                    );
                }
            }
        }

        Ok(created_jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailhorn_domain::{Booking, MessageTemplate, Tenant};
    use mailhorn_infra::{setup_context_inmemory_with, FakeSys, MailhornContext};
    use std::sync::Arc;

    const HOUR: i64 = 60 * 60 * 1000;

    struct Setup {
        ctx: MailhornContext,
        tenant: Tenant,
        booking: Booking,
    }

    async fn setup(now: i64, start_ts: i64) -> Setup {
        let ctx = setup_context_inmemory_with(Arc::new(FakeSys::new(now)));

        let tenant = Tenant::new("Glow Salon");
        ctx.repos.tenants.insert(&tenant).await.unwrap();

        let mut customer = Customer::new(tenant.id.clone(), "Ann");
        customer.email = Some("ann@example.com".into());
        customer.phone = Some("+15550100".into());
        ctx.repos.customers.insert(&customer).await.unwrap();

        let booking = Booking {
            id: Default::default(),
            tenant_id: tenant.id.clone(),
            customer_id: customer.id.clone(),
            service_name: "Haircut".into(),
            service_duration_min: 45,
            service_price_cents: 3500,
            staff_name: Some("Maya".into()),
            start_ts,
            end_ts: start_ts + 45 * 60 * 1000,
            reference: Booking::generate_reference(),
            created: now,
            updated: now,
        };
        ctx.repos.bookings.insert(&booking).await.unwrap();

        Setup {
            ctx,
            tenant,
            booking,
        }
    }

    async fn add_template(
        ctx: &MailhornContext,
        tenant_id: &ID,
        trigger: Trigger,
        channel: Channel,
    ) {
        let template = MessageTemplate::new(
            tenant_id.clone(),
            trigger,
            channel,
            "Template",
            "Hi ${customer.name}, your ${service.name} ref ${booking.ref}",
            0,
        );
        ctx.repos.templates.insert(&template).await.unwrap();
    }

    fn emit(s: &Setup, trigger: Trigger) -> EmitNotificationsUseCase {
        EmitNotificationsUseCase {
            tenant_id: s.tenant.id.clone(),
            booking_id: s.booking.id.clone(),
            trigger,
            amount_cents: None,
        }
    }

    #[actix_web::test]
    async fn emitting_twice_creates_jobs_once() {
        let s = setup(1000, 100 * HOUR).await;
        add_template(&s.ctx, &s.tenant.id, Trigger::BookingCreated, Channel::Email).await;
        add_template(&s.ctx, &s.tenant.id, Trigger::BookingCreated, Channel::Sms).await;

        let jobs = execute(emit(&s, Trigger::BookingCreated), &s.ctx)
            .await
            .unwrap();
        assert_eq!(jobs.len(), 2);

        let jobs = execute(emit(&s, Trigger::BookingCreated), &s.ctx)
            .await
            .unwrap();
        assert!(jobs.is_empty());
        assert_eq!(s.ctx.repos.jobs.find_by_booking(&s.booking.id).await.len(), 2);
    }

    #[actix_web::test]
    async fn channels_without_template_or_recipient_are_skipped() {
        let s = setup(1000, 100 * HOUR).await;
        // Only an email template exists, so no sms job even though
        // the customer has a phone number
        add_template(&s.ctx, &s.tenant.id, Trigger::BookingCreated, Channel::Email).await;
        let jobs = execute(emit(&s, Trigger::BookingCreated), &s.ctx)
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].channel, Channel::Email);
        assert_eq!(jobs[0].recipient, "ann@example.com");

        // Customer without an email gets no email job
        add_template(&s.ctx, &s.tenant.id, Trigger::BookingConfirmed, Channel::Email).await;
        let mut no_email = Customer::new(s.tenant.id.clone(), "Bo");
        no_email.phone = Some("+15550101".into());
        s.ctx.repos.customers.insert(&no_email).await.unwrap();
        let mut booking = s.booking.clone();
        booking.id = ID::new();
        booking.customer_id = no_email.id.clone();
        s.ctx.repos.bookings.insert(&booking).await.unwrap();

        let usecase = EmitNotificationsUseCase {
            tenant_id: s.tenant.id.clone(),
            booking_id: booking.id.clone(),
            trigger: Trigger::BookingConfirmed,
            amount_cents: None,
        };
        let jobs = execute(usecase, &s.ctx).await.unwrap();
        assert!(jobs.is_empty());
    }

    #[actix_web::test]
    async fn sms_recipient_is_normalized_to_e164() {
        let s = setup(1000, 100 * HOUR).await;
        add_template(&s.ctx, &s.tenant.id, Trigger::BookingCreated, Channel::Sms).await;

        // Stored unnormalized, as if it never went through the API
        let mut customer = Customer::new(s.tenant.id.clone(), "Cleo");
        customer.phone = Some("(212) 555-0100".into());
        s.ctx.repos.customers.insert(&customer).await.unwrap();
        let mut booking = s.booking.clone();
        booking.id = ID::new();
        booking.customer_id = customer.id.clone();
        s.ctx.repos.bookings.insert(&booking).await.unwrap();

        let usecase = EmitNotificationsUseCase {
            tenant_id: s.tenant.id.clone(),
            booking_id: booking.id.clone(),
            trigger: Trigger::BookingCreated,
            amount_cents: None,
        };
        let jobs = execute(usecase, &s.ctx).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].recipient, "+12125550100");
    }

    #[actix_web::test]
    async fn garbled_phone_number_skips_the_sms_channel() {
        let s = setup(1000, 100 * HOUR).await;
        add_template(&s.ctx, &s.tenant.id, Trigger::BookingCreated, Channel::Sms).await;

        let mut customer = Customer::new(s.tenant.id.clone(), "Dan");
        customer.phone = Some("555-0100 ext 4".into());
        s.ctx.repos.customers.insert(&customer).await.unwrap();
        let mut booking = s.booking.clone();
        booking.id = ID::new();
        booking.customer_id = customer.id.clone();
        s.ctx.repos.bookings.insert(&booking).await.unwrap();

        let usecase = EmitNotificationsUseCase {
            tenant_id: s.tenant.id.clone(),
            booking_id: booking.id.clone(),
            trigger: Trigger::BookingCreated,
            amount_cents: None,
        };
        let jobs = execute(usecase, &s.ctx).await.unwrap();
        assert!(jobs.is_empty());
        assert!(s.ctx.repos.jobs.find_by_booking(&booking.id).await.is_empty());
    }

    #[actix_web::test]
    async fn unreachable_customer_yields_no_jobs() {
        let s = setup(1000, 100 * HOUR).await;
        // Both channels have effective templates, the customer has
        // neither an email nor a phone number
        add_template(&s.ctx, &s.tenant.id, Trigger::BookingCreated, Channel::Email).await;
        add_template(&s.ctx, &s.tenant.id, Trigger::BookingCreated, Channel::Sms).await;

        let customer = Customer::new(s.tenant.id.clone(), "Eve");
        s.ctx.repos.customers.insert(&customer).await.unwrap();
        let mut booking = s.booking.clone();
        booking.id = ID::new();
        booking.customer_id = customer.id.clone();
        s.ctx.repos.bookings.insert(&booking).await.unwrap();

        let usecase = EmitNotificationsUseCase {
            tenant_id: s.tenant.id.clone(),
            booking_id: booking.id.clone(),
            trigger: Trigger::BookingCreated,
            amount_cents: None,
        };
        let jobs = execute(usecase, &s.ctx).await.unwrap();
        assert!(jobs.is_empty());
        assert!(s.ctx.repos.jobs.find_by_booking(&booking.id).await.is_empty());
    }

    #[actix_web::test]
    async fn disabled_tenant_emits_nothing() {
        let s = setup(1000, 100 * HOUR).await;
        let mut tenant = s.tenant.clone();
        tenant.settings.notifications_enabled = false;
        s.ctx.repos.tenants.save(&tenant).await.unwrap();
        add_template(&s.ctx, &tenant.id, Trigger::BookingCreated, Channel::Email).await;

        let jobs = execute(emit(&s, Trigger::BookingCreated), &s.ctx)
            .await
            .unwrap();
        assert!(jobs.is_empty());
        assert!(s.ctx.repos.jobs.find_by_booking(&s.booking.id).await.is_empty());
    }

    #[actix_web::test]
    async fn reminders_are_scheduled_before_the_appointment() {
        let now = 1000;
        let start_ts = now + 100 * HOUR;
        let s = setup(now, start_ts).await;
        add_template(&s.ctx, &s.tenant.id, Trigger::ReminderUpcoming, Channel::Email).await;

        let jobs = execute(emit(&s, Trigger::ReminderUpcoming), &s.ctx)
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].scheduled_at, start_ts - 24 * HOUR);
    }

    #[actix_web::test]
    async fn late_booking_reminder_is_clamped_to_now() {
        let now = 1000 * HOUR;
        // Booked 2 hours before the appointment: the 24h reminder
        // window is already in the past
        let start_ts = now + 2 * HOUR;
        let s = setup(now, start_ts).await;
        add_template(&s.ctx, &s.tenant.id, Trigger::ReminderUpcoming, Channel::Email).await;

        let jobs = execute(emit(&s, Trigger::ReminderUpcoming), &s.ctx)
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].scheduled_at, now);
    }

    #[actix_web::test]
    async fn reminder_for_started_appointment_is_skipped() {
        let now = 1000 * HOUR;
        let start_ts = now - HOUR;
        let s = setup(now, start_ts).await;
        add_template(&s.ctx, &s.tenant.id, Trigger::ReminderImminent, Channel::Email).await;

        let jobs = execute(emit(&s, Trigger::ReminderImminent), &s.ctx)
            .await
            .unwrap();
        assert!(jobs.is_empty());
    }

    #[actix_web::test]
    async fn amount_is_rendered_for_payment_triggers() {
        let s = setup(1000, 100 * HOUR).await;
        let template = MessageTemplate::new(
            s.tenant.id.clone(),
            Trigger::FeeCharged,
            Channel::Email,
            "Fee",
            "We charged ${amount} for ${service.name}",
            0,
        );
        s.ctx.repos.templates.insert(&template).await.unwrap();

        let usecase = EmitNotificationsUseCase {
            tenant_id: s.tenant.id.clone(),
            booking_id: s.booking.id.clone(),
            trigger: Trigger::FeeCharged,
            amount_cents: Some(1250),
        };
        let jobs = execute(usecase, &s.ctx).await.unwrap();
        assert_eq!(jobs[0].body, "We charged $12.50 for Haircut");
    }
}
