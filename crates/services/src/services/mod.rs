pub mod config;
pub mod officer_form;
pub mod officers;
pub mod shift_filter;
pub mod shifts;
pub mod store;
