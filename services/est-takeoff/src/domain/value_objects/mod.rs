pub mod geometry;
pub mod ids;
pub mod rfq_number;
pub mod scale_ref;

pub use geometry::*;
pub use ids::*;
pub use rfq_number::*;
pub use scale_ref::*;
