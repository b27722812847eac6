//! Reminder text and `wa.me` deep links for expiring memberships.
//!
//! Everything here is pure formatting: no clock reads, no I/O. Callers supply
//! the day delta they computed for the membership.

use crate::utils::phone::digits_only;
use chrono::NaiveDate;

const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Render a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Which wording a reminder uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    Expired,
    ExpiresToday,
    ExpiresIn(i64),
}

impl ReminderKind {
    pub fn from_days(days_until_expiry: i64) -> Self {
        if days_until_expiry < 0 {
            ReminderKind::Expired
        } else if days_until_expiry == 0 {
            ReminderKind::ExpiresToday
        } else {
            ReminderKind::ExpiresIn(days_until_expiry)
        }
    }
}

pub fn build_message(
    client_name: &str,
    service_name: &str,
    expiration_date: NaiveDate,
    days_until_expiry: i64,
) -> String {
    let date = format_date(expiration_date);
    match ReminderKind::from_days(days_until_expiry) {
        ReminderKind::Expired => format!(
            "Hola {client_name},\n\n⚠️ Su membresía de *{service_name}* ha vencido el {date}.\n\n\
             Por favor, contacte con nosotros para renovar su servicio.\n\n\
             ¡Gracias por su preferencia! 😊"
        ),
        ReminderKind::ExpiresToday => format!(
            "Hola {client_name},\n\n🔔 Su membresía de *{service_name}* vence HOY ({date}).\n\n\
             Renueve ahora para no perder el servicio.\n\n¡Gracias! 😊"
        ),
        ReminderKind::ExpiresIn(days) => format!(
            "Hola {client_name},\n\n🔔 Su membresía de *{service_name}* vencerá en {days} día(s) ({date}).\n\n\
             Renueve a tiempo para mantener activo su servicio.\n\n\
             ¡Gracias por su preferencia! 😊"
        ),
    }
}

/// `https://wa.me/<digits>?text=<percent-encoded message>`
pub fn whatsapp_url(phone: &str, message: &str) -> String {
    format!(
        "{WHATSAPP_BASE_URL}{}?text={}",
        digits_only(phone),
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reminder_kind_branches() {
        assert_eq!(ReminderKind::from_days(-3), ReminderKind::Expired);
        assert_eq!(ReminderKind::from_days(0), ReminderKind::ExpiresToday);
        assert_eq!(ReminderKind::from_days(5), ReminderKind::ExpiresIn(5));
    }

    #[test]
    fn test_expired_message() {
        let msg = build_message("Ana", "Netflix", date(2025, 3, 7), -3);
        assert!(msg.starts_with("Hola Ana,"));
        assert!(msg.contains("*Netflix* ha vencido el 07/03/2025."));
    }

    #[test]
    fn test_today_message() {
        let msg = build_message("Ana", "Netflix", date(2025, 3, 10), 0);
        assert!(msg.contains("vence HOY (10/03/2025)"));
    }

    #[test]
    fn test_upcoming_message() {
        let msg = build_message("Ana", "Spotify", date(2025, 12, 1), 5);
        assert!(msg.contains("*Spotify* vencerá en 5 día(s) (01/12/2025)"));
    }

    #[test]
    fn test_format_date_pads() {
        assert_eq!(format_date(date(2024, 1, 2)), "02/01/2024");
    }

    #[test]
    fn test_whatsapp_url() {
        let url = whatsapp_url("+1 (555) 123-4567", "Hola Ana,\n¡Gracias!");
        assert_eq!(
            url,
            "https://wa.me/15551234567?text=Hola%20Ana%2C%0A%C2%A1Gracias%21"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_message("Luis", "HBO", date(2025, 5, 5), 2);
        let b = build_message("Luis", "HBO", date(2025, 5, 5), 2);
        assert_eq!(a, b);
    }
}
