pub mod error;
pub mod feature_flags;

// Access control
pub mod role;
pub mod account;

// Society domain modules
pub mod amenity;
pub mod committee;
pub mod common;
pub mod complaint;
pub mod dashboard;
pub mod expense;
pub mod export;
pub mod finance;
pub mod notice;
pub mod notification;
pub mod quotation;
pub mod resident;
pub mod security;

pub use error::*;
pub use feature_flags::*;

pub use account::*;
pub use role::*;

pub use amenity::*;
pub use committee::*;
pub use common::*;
pub use complaint::*;
pub use dashboard::*;
pub use expense::*;
pub use export::*;
pub use finance::*;
pub use notice::*;
pub use notification::*;
pub use quotation::*;
pub use resident::*;
pub use security::*;
