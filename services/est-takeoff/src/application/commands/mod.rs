pub mod rfq_commands;
pub mod scale_commands;
pub mod takeoff_commands;
pub mod wbs_commands;

pub use rfq_commands::*;
pub use scale_commands::*;
pub use takeoff_commands::*;
pub use wbs_commands::*;
