//! Command implementations for cars-cli

pub mod cars;
pub mod compare;
pub mod filters;
pub mod list;
pub mod show;

pub use cars::cars;
pub use compare::compare;
pub use filters::filters;
pub use list::list;
pub use show::show;
