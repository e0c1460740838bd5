//! Core types used throughout the OneRouter SDK

pub mod options;
pub mod prompt;
pub mod response;
pub mod stream;
pub mod tool;
