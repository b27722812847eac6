pub mod csv_export;
pub mod dates;
pub mod finance;
pub mod phone;
pub mod whatsapp;

pub use csv_export::{export_filename, render_csv};
pub use dates::{days_until, parse_date, require_date, today};
pub use finance::profit_margin;
pub use phone::digits_only;
pub use whatsapp::{build_message, format_date, whatsapp_url};
