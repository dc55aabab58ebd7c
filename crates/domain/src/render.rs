use crate::booking::Booking;
use crate::customer::Customer;
use crate::money::format_minor_units;
use crate::tenant::Tenant;
use chrono::TimeZone;
use chrono_tz::Tz;

/// Every placeholder token the renderer understands. Tokens are
/// written in templates as `${token}`.
pub const SUPPORTED_PLACEHOLDERS: [&str; 15] = [
    "customer.name",
    "customer.email",
    "customer.phone",
    "service.name",
    "service.duration",
    "service.price",
    "staff.name",
    "booking.time",
    "booking.date",
    "booking.ref",
    "booking.url",
    "business.name",
    "business.email",
    "business.phone",
    "amount",
];

/// Ephemeral bundle of everything a template can reference. Assembled
/// at emission time from the booking and its related records, never
/// persisted.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub service_name: String,
    pub service_duration_min: i64,
    pub service_price_cents: i64,
    /// Tenant currency, used for `${service.price}` and `${amount}`
    pub currency: String,
    pub staff_name: Option<String>,
    /// Appointment start in millis since epoch, UTC
    pub start_ts: i64,
    /// Tenant timezone used to format `${booking.time}` / `${booking.date}`
    pub timezone: Tz,
    pub business_name: String,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub reference: String,
    pub booking_url: String,
    /// Amount for payment flavoured triggers (fee, refund, failure)
    pub amount_cents: Option<i64>,
}

impl RenderContext {
    pub fn from_parts(
        tenant: &Tenant,
        customer: &Customer,
        booking: &Booking,
        portal_base_url: &str,
        amount_cents: Option<i64>,
    ) -> Self {
        let booking_url = format!(
            "{}/b/{}",
            portal_base_url.trim_end_matches('/'),
            booking.reference
        );
        Self {
            customer_name: customer.name.clone(),
            customer_email: customer.email.clone(),
            customer_phone: customer.phone.clone(),
            service_name: booking.service_name.clone(),
            service_duration_min: booking.service_duration_min,
            service_price_cents: booking.service_price_cents,
            currency: tenant.currency.clone(),
            staff_name: booking.staff_name.clone(),
            start_ts: booking.start_ts,
            timezone: tenant.timezone,
            business_name: tenant.name.clone(),
            business_email: tenant.contact_email.clone(),
            business_phone: tenant.contact_phone.clone(),
            reference: booking.reference.clone(),
            booking_url,
            amount_cents,
        }
    }

    /// Resolves a placeholder token. `Some` for supported tokens (an
    /// absent optional value resolves to the empty string), `None` for
    /// tokens the renderer does not know about.
    fn resolve(&self, token: &str) -> Option<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        match token {
            "customer.name" => Some(self.customer_name.clone()),
            "customer.email" => Some(opt(&self.customer_email)),
            "customer.phone" => Some(opt(&self.customer_phone)),
            "service.name" => Some(self.service_name.clone()),
            "service.duration" => Some(format!("{} min", self.service_duration_min)),
            "service.price" => Some(format_minor_units(self.service_price_cents, &self.currency)),
            "staff.name" => Some(opt(&self.staff_name)),
            "booking.time" => Some(self.format_start("%-I:%M %p")),
            "booking.date" => Some(self.format_start("%A, %B %-d, %Y")),
            "booking.ref" => Some(self.reference.clone()),
            "booking.url" => Some(self.booking_url.clone()),
            "business.name" => Some(self.business_name.clone()),
            "business.email" => Some(opt(&self.business_email)),
            "business.phone" => Some(opt(&self.business_phone)),
            "amount" => Some(
                self.amount_cents
                    .map(|cents| format_minor_units(cents, &self.currency))
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    fn format_start(&self, fmt: &str) -> String {
        match self.timezone.timestamp_millis_opt(self.start_ts) {
            chrono::LocalResult::Single(dt) => dt.format(fmt).to_string(),
            _ => String::new(),
        }
    }
}

/// Renders a template body against a context.
///
/// Recognized `${...}` tokens are substituted, unknown tokens are left
/// verbatim so that a stale or misspelled placeholder is visible to
/// operators in the delivered message instead of disappearing
/// silently. An unterminated `${` is also copied through as is.
pub fn render(body: &str, ctx: &RenderContext) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let token = &after[..end];
                match ctx.resolve(token) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Returns the syntactically well formed placeholder tokens in `body`
/// that the renderer does not support, deduplicated and in order of
/// first appearance. Used by template authoring tooling to warn about
/// tokens that would be delivered verbatim.
pub fn unsupported_placeholders(body: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let token = &after[..end];
                if is_well_formed(token)
                    && !SUPPORTED_PLACEHOLDERS.contains(&token)
                    && !found.iter().any(|t| t == token)
                {
                    found.push(token.to_string());
                }
                rest = &after[end + 1..];
            }
            None => break,
        }
    }

    found
}

fn is_well_formed(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::entity::ID;
    use chrono_tz::America::New_York;

    fn sample_context() -> RenderContext {
        // 2026-08-28 19:00:00 UTC == 3:00 PM America/New_York
        let start_ts = New_York
            .with_ymd_and_hms(2026, 8, 28, 15, 0, 0)
            .unwrap()
            .timestamp_millis();
        RenderContext {
            customer_name: "Ann".into(),
            customer_email: Some("ann@example.com".into()),
            customer_phone: Some("+15551234567".into()),
            service_name: "Haircut".into(),
            service_duration_min: 45,
            service_price_cents: 3500,
            currency: "USD".into(),
            staff_name: Some("Maya".into()),
            start_ts,
            timezone: New_York,
            business_name: "Bangs & Fringes".into(),
            business_email: Some("hello@bangs.example".into()),
            business_phone: Some("+15550001111".into()),
            reference: "BK-7F2K9QXA".into(),
            booking_url: "https://book.example.com/b/BK-7F2K9QXA".into(),
            amount_cents: Some(1250),
        }
    }

    #[test]
    fn it_renders_the_booking_confirmation_example() {
        let ctx = sample_context();
        let rendered = render(
            "Hi ${customer.name}, your ${service.name} is at ${booking.time}.",
            &ctx,
        );
        assert_eq!(rendered, "Hi Ann, your Haircut is at 3:00 PM.");
    }

    #[test]
    fn every_supported_placeholder_renders_to_something() {
        let ctx = sample_context();
        for token in SUPPORTED_PLACEHOLDERS {
            let body = format!("${{{}}}", token);
            let rendered = render(&body, &ctx);
            assert!(
                !rendered.contains("${"),
                "token {} was not substituted: {}",
                token,
                rendered
            );
        }
    }

    #[test]
    fn it_leaves_unknown_tokens_verbatim() {
        let ctx = sample_context();
        assert_eq!(
            render("Hello ${wat.is.this} and ${customer.name}", &ctx),
            "Hello ${wat.is.this} and Ann"
        );
    }

    #[test]
    fn it_copies_unterminated_tokens_through() {
        let ctx = sample_context();
        assert_eq!(render("Hello ${customer.name", &ctx), "Hello ${customer.name");
    }

    #[test]
    fn absent_optional_fields_render_as_empty_string() {
        let mut ctx = sample_context();
        ctx.staff_name = None;
        ctx.amount_cents = None;
        assert_eq!(render("with ${staff.name}!", &ctx), "with !");
        assert_eq!(render("charged ${amount}", &ctx), "charged ");
    }

    #[test]
    fn it_formats_money_dates_and_urls() {
        let ctx = sample_context();
        assert_eq!(render("${service.price}", &ctx), "$35.00");
        assert_eq!(render("${amount}", &ctx), "$12.50");
        assert_eq!(render("${booking.date}", &ctx), "Friday, August 28, 2026");
        assert_eq!(
            render("${booking.url}", &ctx),
            "https://book.example.com/b/BK-7F2K9QXA"
        );
    }

    #[test]
    fn it_formats_times_in_the_tenant_timezone() {
        let mut ctx = sample_context();
        ctx.timezone = chrono_tz::UTC;
        // Same instant, different wall clock
        assert_eq!(render("${booking.time}", &ctx), "7:00 PM");
    }

    #[test]
    fn it_builds_context_from_domain_records() {
        let tenant = Tenant::new("Bangs & Fringes");
        let mut customer = Customer::new(tenant.id.clone(), "Ann");
        customer.email = Some("ann@example.com".into());
        let booking = Booking {
            id: ID::new(),
            tenant_id: tenant.id.clone(),
            customer_id: customer.id.clone(),
            service_name: "Haircut".into(),
            service_duration_min: 45,
            service_price_cents: 3500,
            staff_name: None,
            start_ts: 0,
            end_ts: 45 * 60 * 1000,
            reference: "BK-AAAA1111".into(),
            created: 0,
            updated: 0,
        };

        let ctx = RenderContext::from_parts(
            &tenant,
            &customer,
            &booking,
            "https://book.example.com/",
            None,
        );
        assert_eq!(ctx.booking_url, "https://book.example.com/b/BK-AAAA1111");
        assert_eq!(ctx.currency, "USD");
        assert_eq!(ctx.customer_name, "Ann");
    }

    #[test]
    fn it_reports_unsupported_placeholders() {
        let body = "Hi ${customer.name} ${wat} ${also.wat} ${wat} ${not a token} ${}";
        assert_eq!(
            unsupported_placeholders(body),
            vec!["wat".to_string(), "also.wat".to_string()]
        );
        assert!(unsupported_placeholders("no tokens here").is_empty());
    }
}
