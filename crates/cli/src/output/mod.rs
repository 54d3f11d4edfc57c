//! Output formatting.

mod detail;
mod table;

pub use detail::format_plan_detail;
pub use table::format_capacity_table;
