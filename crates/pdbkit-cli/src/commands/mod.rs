pub mod clean;
pub mod convert;
pub mod inspect;
pub mod tabular;
