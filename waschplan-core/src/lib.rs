pub mod conflict;
pub mod ids;
pub mod mieter;
pub mod plan;
pub mod repository;
pub mod table;
pub mod termin;

pub use conflict::is_booked;
pub use mieter::Mieter;
pub use plan::{PlanError, PlanManager};
pub use table::{paginate, sort_rows, SortKey, SortOrder, TerminRow};
pub use termin::{Termin, TerminStatus};
