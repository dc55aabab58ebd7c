/// Formats an amount of minor units (cents) as a customer facing
/// decimal string. Currencies with a well known symbol get the symbol
/// prefixed, everything else falls back to `12.50 XXX`.
pub fn format_minor_units(amount_cents: i64, currency: &str) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    let major = abs / 100;
    let minor = abs % 100;

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}.{:02}", sign, symbol, major, minor),
        None => format!("{}{}.{:02} {}", sign, major, minor, currency),
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}
