//! HTML rendering for the public pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).
//! Each page renderer takes the site name, the requested language, and the
//! already-fetched content, and returns a complete document.

pub mod components;
pub mod home;
pub mod projects;
pub mod team;
