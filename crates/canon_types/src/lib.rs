//! Canon Types - Canonical Type Descriptors
//!
//! Names host types and their kinds as canonical values:
//! - `Kind` is an enumeration (`CLASS`, `INTERFACE`, `TRAIT`)
//! - `Type` is a value object keyed by name and kind, so two descriptors
//!   of the same type are the same instance
//! - `ClassType`, `InterfaceType` and `TraitType` are checked views of a
//!   `Type` of one kind
//!
//! The set of known types and their subtype relation come from a
//! [`TypeCatalog`] supplied by the host.
//!
//! ```
//! use canon_types::{ClassType, InterfaceType, TypeCatalog};
//! use canon_values::Canon;
//!
//! let cx = Canon::new();
//! let mut catalog = TypeCatalog::new();
//! catalog
//!     .register_interface(&cx, "Shape", &[])
//!     .register_class(&cx, "Circle", &["Shape"]);
//!
//! let circle = ClassType::from_name(&cx, &catalog, "Circle")?;
//! let shape = InterfaceType::from_name(&cx, &catalog, "Shape")?;
//! assert!(circle.is_subtype_of(&catalog, &shape));
//! assert_eq!(circle.to_string(), "CLASS Circle");
//! # Ok::<(), canon_types::TypeError>(())
//! ```

mod catalog;
mod error;
mod kind;
mod ty;

pub use catalog::TypeCatalog;
pub use error::TypeError;
pub use kind::Kind;
pub use ty::{ClassType, InterfaceType, TraitType, Type};
