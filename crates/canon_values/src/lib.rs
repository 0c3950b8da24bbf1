//! Canon Values - Canonical Instances by Identity Key
//!
//! This crate provides the interning engine behind two object idioms:
//! - Value objects: equal construction arguments always yield the same
//!   instance, so reference equality implies value equality
//! - Enumerations: a fixed, ordered set of lazily defined members,
//!   populated from a build-time manifest of factories
//!
//! # Architecture
//!
//! - **Identity keys**: `IdentityKey::encode` turns an ordered `Value` list
//!   into a deterministic string key
//! - **Handles**: `InstanceRef` abstracts strong and weak retention of a
//!   canonical instance
//! - **Repositories**: `InstanceRepository<T>` maps identity keys to handles
//!   with get-or-create semantics
//! - **Enumerations**: `EnumRegistry<E>` layers one-time discovery on top of
//!   a repository
//! - **Context**: `Canon` owns one repository per type; there is no hidden
//!   process-wide state
//!
//! # Example
//!
//! ```
//! use canon_values::{Canon, Value};
//!
//! #[derive(Debug)]
//! struct Point { x: i64, y: i64 }
//!
//! let cx = Canon::new();
//! let points = cx.repository::<Point>();
//! let a = points.get_or_create(&[Value::Int(1), Value::Int(2)], |_| Point { x: 1, y: 2 });
//! let b = points.get_or_create(&[Value::Int(1), Value::Int(2)], |_| Point { x: 1, y: 2 });
//! assert_eq!(a, b);
//! assert_eq!(a.x + a.y, 3);
//! ```

mod canon;
mod config;
mod enumeration;
mod error;
mod handle;
mod interned;
mod key;
mod repository;
mod serialize;
mod single;
mod value;
mod value_object;

pub use canon::Canon;
pub use canon_macros::enumeration;
pub use config::{CanonConfig, LOG_ENV, RETENTION_ENV};
pub use enumeration::{discover_factories, EnumRegistry, Enumeration, Factory, Member, Variant};
pub use error::{EnumError, ParseRetentionError, ValueError};
pub use handle::{InstanceRef, Retention, StrongRef, WeakRef};
pub use interned::Interned;
pub use key::IdentityKey;
pub use repository::InstanceRepository;
pub use serialize::Serializable;
pub use single::{Single, ValuePolicy};
pub use value::{Args, HandleRef, ObjectRef, Value};
pub use value_object::{display_value_object, ValueObject};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a log subscriber for repository and discovery events.
///
/// The filter comes from `CANON_LOG`, else from `RUST_LOG`; with neither set
/// nothing is installed. A subscriber the host already installed is kept.
/// Later calls do nothing.
///
/// `CANON_LOG=canon_values=trace` shows every repository hit and each
/// factory invoked during discovery.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_from_default_env()) else {
            return;
        };
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init();
        if installed.is_ok() {
            tracing::debug!("canon_values tracing initialized");
        }
    });
}
