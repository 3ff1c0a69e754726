pub mod auth;
pub mod brands;
pub mod crud;
pub mod islands;
pub mod iups;
pub mod products;
pub mod quotations;
pub mod term_conditions;
pub mod territory;
pub mod tracking;
