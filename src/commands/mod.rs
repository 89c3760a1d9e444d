pub mod extract;
pub mod inspect;
pub mod status;
