//! Test construction helpers for luahint
//!
//! Provides a small factory for building arena-allocated programs in tests
//! without spelling out every span and slice allocation by hand.

mod factory;

pub use factory::AstFactory;
