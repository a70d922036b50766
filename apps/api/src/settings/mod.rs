// User AI settings: persistence capability and HTTP handlers.
// The record shape lives in models::settings.

pub mod handlers;
pub mod store;
