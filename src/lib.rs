//! TagHound library, a portable tracker-tag classification engine.
//!
//! Classifies BLE advertisements emitted by consumer tracking tags
//! (Apple Find My/AirTag, Google Fast Pair and Find My Device, Samsung
//! SmartTag, Xiaomi Anti-Lost) and renders each classified sighting as
//! one structured text record. The whole pipeline lives in this crate
//! with no platform dependencies and is testable on any host with
//! `cargo test`. The ESP32 firmware binary is a thin consumer that
//! provides radio access and the output sink.
//!
//! Per advertisement the pipeline runs the RSSI gate, then evidence
//! decoding with the vendor filter, then record rendering. No state is
//! carried between events; the only shared value is an immutable
//! [`filter::FilterConfig`] built once at startup.

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod classify;
pub mod evidence;
pub mod filter;
pub mod report;
pub mod scanner;
pub mod tables;
