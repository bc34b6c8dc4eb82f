mod event;
mod fight;
mod fighter;
mod stats;
mod weight_class;

pub use event::*;
pub use fight::*;
pub use fighter::*;
pub use stats::*;
pub use weight_class::*;
