/// Middleware modules for the API server
///
/// This module contains custom middleware for:
/// - Security headers
///
/// Request logging comes from tower-http's `TraceLayer`, wired in `app`.

pub mod security;
