//! Property test modules

mod codec_tests;
mod engine_tests;
mod ident_tests;
