#![allow(dead_code)]

// tests/common/mod.rs

pub mod proptest_prelude;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    meme_clash_test_support::logging::init();
}
