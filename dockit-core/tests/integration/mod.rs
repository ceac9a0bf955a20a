//! Integration test modules

mod persistence_roundtrip;
