//! Stochastic layer sequences for 1-D lithology columns.
//!
//! For every realization the overlay sections of a
//! [`PriorConfig`](lithos_prior::PriorConfig) are drawn (activity, total
//! thickness, layer count, layer types and thicknesses), checked against the
//! thickness-tolerance and section-ordering constraints, redrawn until they
//! pass or the try budget is spent, and finally painted onto the depth grid.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//!  │    draw      │────▶│  constraint  │────▶│    raster    │
//!  │ (sections)   │◀────│   (check)    │     │  (paint z)   │
//!  └──────────────┘     └──────────────┘     └──────────────┘
//!          rejection sampler (≤ 1000 tries)
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use lithos_layers::generate_lithology;
//! use lithos_prior::{Class, DepthGrid, PriorConfig, ResistivityPrior, Section};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
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
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let real = generate_lithology(&prior, grid.depths(), &mut rng).unwrap();
//! assert_eq!(real.lithology().len(), grid.len());
//! ```

pub mod categorical;
pub mod constraint;
pub mod draw;
pub mod error;
pub mod generate;
pub mod raster;
pub mod sampler;

pub use constraint::{THICKNESS_TOLERANCE, Violations};
pub use draw::{Layer, LayerSequence};
pub use error::LayerError;
pub use generate::{LithologyRealization, generate_lithology, generate_lithology_with_budget};
pub use raster::{boundaries, rasterize};
pub use sampler::{RejectionBudget, RejectionSampler, SamplerOutcome, SamplerState};
