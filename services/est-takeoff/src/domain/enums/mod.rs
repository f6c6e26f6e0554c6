pub mod measurement_kind;
pub mod rfq_status;
pub mod scale_family;

pub use measurement_kind::*;
pub use rfq_status::*;
pub use scale_family::*;
