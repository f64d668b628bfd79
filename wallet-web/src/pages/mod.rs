//! Page modules

pub mod about;
pub mod atm;

pub use about::AboutPage;
pub use atm::AtmPage;
