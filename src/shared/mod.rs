pub mod constants;
pub mod keys;
pub mod test_helpers;
pub mod types;
pub mod validation;
