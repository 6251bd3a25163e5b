//! Gate and patrol pages for the security desk.

mod incidents;
mod patrols;
mod vehicles;
mod visitors;

pub use incidents::Incidents;
pub use patrols::Patrols;
pub use vehicles::Vehicles;
pub use visitors::VisitorLog;
