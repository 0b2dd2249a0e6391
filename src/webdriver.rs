//! Page inspector backed by a W3C WebDriver server.
//!
//! `WebDriver` is a thin blocking client for the handful of endpoints we
//! need (session, navigate, find, text, attribute, rect, click).
//! `SiteInspector` maps the configured CSS selectors onto the
//! `PageInspector` capability.

mod client;
mod site;

pub use client::*;
pub use site::*;

#[cfg(test)]
mod tests;
