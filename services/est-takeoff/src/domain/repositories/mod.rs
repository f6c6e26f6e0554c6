pub mod drawing_repository;
pub mod material_repository;
pub mod project_repository;
pub mod rfq_repository;
pub mod scale_repository;
pub mod takeoff_repository;
pub mod wbs_repository;

pub use drawing_repository::*;
pub use material_repository::*;
pub use project_repository::*;
pub use rfq_repository::*;
pub use scale_repository::*;
pub use takeoff_repository::*;
pub use wbs_repository::*;
