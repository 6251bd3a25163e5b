#[cfg(feature = "server")]
pub(crate) mod auth;

mod session;
pub use session::*;

mod residents;
pub use residents::*;

mod finance;
pub use finance::*;

mod expenses;
pub use expenses::*;

mod quotations;
pub use quotations::*;

mod complaints;
pub use complaints::*;

mod amenities;
pub use amenities::*;

mod notices;
pub use notices::*;

mod security;
pub use security::*;

mod dashboard;
pub use dashboard::*;
