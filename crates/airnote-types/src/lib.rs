//! Shared data model for airnote air-quality measurements.
//!
//! This crate provides the types shared by the remote access layer
//! (airnote-client), the view-state controllers (airnote-app), and the CLI.
//!
//! # Features
//!
//! - The [`Measurement`] record and its [`GeoPoint`]
//! - CO2 quality bands for the dashboard insight ([`Co2Band`])
//! - Lenient text parsing for form fields ([`parse`])
//!
//! # Example
//!
//! ```
//! use airnote_types::{Co2Band, GeoPoint, Measurement, parse};
//!
//! let mut m = Measurement::new("Office");
//! m.set_point(GeoPoint::new(-23.5505, -46.6333));
//! m.co2_ppm = parse::parse_decimal("812.5");
//!
//! assert!(m.is_persistable());
//! assert_eq!(Co2Band::from_mean_ppm(812.5), Co2Band::Acceptable);
//! ```

pub mod error;
pub mod measurement;
pub mod parse;
pub mod quality;

pub use error::{ParseError, ParseResult};
pub use measurement::{GeoPoint, Measurement};
pub use quality::Co2Band;
