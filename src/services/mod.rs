pub mod membership_service;
pub mod membership_update;
pub mod notification_service;
pub mod recharge_service;
pub mod report_service;

#[cfg(test)]
pub(crate) mod testing;

pub use membership_service::*;
pub use membership_update::{UpdatePlan, build_update_plan};
pub use notification_service::*;
pub use recharge_service::*;
pub use report_service::{CsvReport, ReportService, resolve_period};
