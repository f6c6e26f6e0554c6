pub mod rfq_queries;
pub mod scale_queries;
pub mod takeoff_queries;
pub mod wbs_queries;

pub use rfq_queries::*;
pub use scale_queries::*;
pub use takeoff_queries::*;
pub use wbs_queries::*;
