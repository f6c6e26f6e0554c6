pub mod rfq_view;
pub mod takeoff_line;
pub mod wbs_node;

pub use rfq_view::*;
pub use takeoff_line::*;
pub use wbs_node::*;
