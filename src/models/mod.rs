pub mod common;
pub mod membership;
pub mod notification;
pub mod recharge;
pub mod report;

pub use common::*;
pub use membership::*;
pub use notification::*;
pub use recharge::*;
pub use report::*;
