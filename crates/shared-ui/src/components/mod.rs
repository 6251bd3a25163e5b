pub mod avatar;
pub mod button;
pub mod card;
pub mod data_table;
pub mod field;
pub mod kpi_card;
pub mod modal;
pub mod page_header;
pub mod progress;
pub mod segmented;
pub mod sidebar;
pub mod status_badge;
pub mod switch;
pub mod toast;

pub use avatar::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use field::*;
pub use kpi_card::*;
pub use modal::*;
pub use page_header::*;
pub use progress::*;
pub use segmented::*;
pub use sidebar::*;
pub use status_badge::*;
pub use switch::*;
pub use toast::*;
