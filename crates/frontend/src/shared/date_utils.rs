/// Date, time and money formatting for tables and detail pages
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an API timestamp as `DD/MM/YYYY HH:MM`.
///
/// Accepts RFC 3339 (`2024-03-15T14:02:26.123Z`) and the `2024-03-15 14:02:26`
/// form; anything else is returned unchanged.
pub fn format_datetime(datetime_str: &str) -> String {
    let value = datetime_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    format_date(value)
}

/// Format the date part as `DD/MM/YYYY`
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.trim().get(..10).unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// `"—"` for missing values
pub fn format_optional_datetime(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => format_datetime(v),
        None => "—".to_string(),
    }
}

/// `1234.5, "EUR"` → `"1,234.50 EUR"`
pub fn format_money(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let formatted = format!("{}{}.{:02}", sign, grouped, cents % 100);
    if currency.is_empty() {
        formatted
    } else {
        format!("{} {}", formatted, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15/03/2024 14:02");
        assert_eq!(format_datetime("2024-12-31 23:59:59"), "31/12/2024 23:59");
        assert_eq!(format_datetime("2024-12-31T23:59:59.000000"), "31/12/2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_optional_datetime(Some(" ")), "—");
        assert_eq!(format_optional_datetime(None), "—");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.5, "EUR"), "1,234.50 EUR");
        assert_eq!(format_money(99.9, ""), "99.90");
        assert_eq!(format_money(-0.5, "EUR"), "-0.50 EUR");
        assert_eq!(format_money(1_000_000.0, "USD"), "1,000,000.00 USD");
        assert_eq!(format_money(0.0, "EUR"), "0.00 EUR");
    }
}
