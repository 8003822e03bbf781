pub mod capture;
pub mod manifest;
