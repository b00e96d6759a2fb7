mod details;
mod list;
mod span_detail;
mod span_tree;
mod waterfall;

pub use details::TraceDetailsPage;
pub use list::{TraceList, TracesTable};
