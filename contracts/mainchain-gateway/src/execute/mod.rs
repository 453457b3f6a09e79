//! Execute handlers for the mainchain gateway.
//!
//! - `deposit` - native, CW20, CW721 and bulk deposits
//! - `withdraw` - quorum-signed withdrawals
//! - `admin` - pause, unpause, admin and registry changes

mod admin;
mod deposit;
mod withdraw;

pub use admin::*;
pub use deposit::*;
pub use withdraw::*;
