// Middleware module - contains CORS configuration

pub mod cors;

pub use cors::create_cors_layer;
