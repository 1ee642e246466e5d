//! Value records decoded from the downstream catalog API

mod car;
mod category;
mod manufacturer;
mod view;

pub use car::*;
pub use category::*;
pub use manufacturer::*;
pub use view::*;
