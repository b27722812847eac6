pub mod memberships;
pub mod notifications_log;
pub mod recharges;

pub use memberships as membership_entity;
pub use memberships::MembershipStatus;
pub use notifications_log as notification_log_entity;
pub use notifications_log::NotificationStatus;
pub use recharges as recharge_entity;
