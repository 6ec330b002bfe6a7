//! SHL Inliner
//!
//! Flattens a tree of C/C++ headers into one single-header file.
//!
//! ## Modules
//!
//! - `directive` - Line-level `#include`/`#import`/`#pragma once` recognition
//! - `stdlib` - The fixed set of standard library headers
//! - `resolver` - Include target to header file resolution
//! - `inliner` - The recursive traversal session

pub mod directive;
pub mod inliner;
pub mod resolver;
pub mod stdlib;

pub use directive::{classify, include_target, is_pragma_once, Directive};
pub use inliner::{amalgamate, Amalgamation, Inliner, TraceObserver};
pub use resolver::HeaderResolver;
pub use stdlib::is_standard_header;
