pub mod attributes;
pub mod backend;
pub mod error;
pub mod fields;
pub mod form;
pub mod service;
pub mod validators;
