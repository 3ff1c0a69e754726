pub mod constants;
pub mod debounce;
pub mod types;
pub mod validation;
