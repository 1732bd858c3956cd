//! Ensemble generation for lithology and resistivity priors.
//!
//! Runs the layer sampler, the water-table sampler and the resistivity
//! assigner once per realization, gathers the results into an [`Ensemble`]
//! and accumulates run [`Diagnostics`].
//!
//! # Pipeline
//!
//! ```text
//!  master seed ──▶ per-realization StdRng
//!                       │
//!        ┌──────────────┼─────────────────┐
//!        ▼              ▼                 ▼
//!   lithos-layers   water table   lithos-resistivity
//!        └──────────────┼─────────────────┘
//!                       ▼
//!            Ensemble row  +  Diagnostics
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use lithos_prior::{Class, DepthGrid, PriorConfig, ResistivityPrior, Section};
//! use lithos_realize::{RealizeConfig, generate_ensemble};
//!
//! let prior = PriorConfig::new(
//!     vec![
//!         Class::new(1, "Clay", 1.0, 6.0, ResistivityPrior::new(20.0, 0.1)),
//!         Class::new(2, "Sand", 2.0, 10.0, ResistivityPrior::new(150.0, 0.1)),
//!     ],
//!     vec![
//!         Section::new(vec![1, 2], vec![1.0])
//!             .with_thickness(5.0, 15.0)
//!             .with_layers(1, 3),
//!         Section::new(vec![2], vec![1.0]),
//!     ],
//!     None,
//! )
//! .unwrap();
//! let grid = DepthGrid::new(30.0, 1.0).unwrap();
//! let config = RealizeConfig::new(20).with_seed(42);
//!
//! let run = generate_ensemble(&prior, &grid, &config).unwrap();
//! assert_eq!(run.ensemble().n_reals(), 20);
//! assert_eq!(run.report().n_reals(), 20);
//! ```

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod ensemble;
pub mod error;

pub use config::{DEFAULT_SKEW_P_VALUE, RealizeConfig};
pub use diagnostics::{Diagnostics, DiagnosticsReport, SectionReport, uniformity_test};
pub use driver::{EnsembleRun, Realization, generate_ensemble, realize};
pub use ensemble::Ensemble;
pub use lithos_layers::RejectionBudget;
pub use error::RealizeError;
