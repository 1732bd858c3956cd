//! Geological prior for stochastic 1-D subsurface models.
//!
//! A prior describes lithology [`Class`]es (thickness bounds and resistivity
//! distributions), an ordered list of stratigraphic [`Section`]s (shallowest
//! first, the last one supplying the basal type), an optional
//! [`WaterTableModel`], and the [`DepthGrid`] realizations are rasterized on.
//!
//! # Quick start
//!
//! ```rust
//! use lithos_prior::{Class, PriorConfig, ResistivityPrior, Section};
//!
//! let classes = vec![
//!     Class::new(1, "Clay", 1.0, 8.0, ResistivityPrior::new(20.0, 0.1)),
//!     Class::new(2, "Sand", 2.0, 12.0, ResistivityPrior::new(150.0, 0.2)),
//! ];
//! let sections = vec![
//!     Section::new(vec![1, 2], vec![1.0])
//!         .with_frequency(0.8)
//!         .with_thickness(5.0, 25.0)
//!         .with_layers(1, 4)
//!         .with_repeat(false),
//!     Section::new(vec![2], vec![1.0]),
//! ];
//!
//! let prior = PriorConfig::new(classes, sections, None).unwrap();
//! assert_eq!(prior.overlays().len(), 1);
//! ```

pub mod class;
pub mod config;
pub mod depth;
pub mod error;
pub mod section;
pub mod water;

pub use class::{Class, ClassCode, ResistivityPrior};
pub use config::PriorConfig;
pub use depth::DepthGrid;
pub use error::PriorError;
pub use section::Section;
pub use water::WaterTableModel;
