pub mod mail;
pub mod validation;
