pub mod envelope_builder;
pub mod envelope_opener;
pub mod operator_key_service;
