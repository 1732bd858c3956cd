//! Water-table sampling and resistivity assignment for lithology columns.
//!
//! Given a rasterized lithology column (class codes plus 1-based layer
//! indices), this crate draws a water-table depth and turns the column into a
//! log-normal resistivity profile. Each physical layer shares one value;
//! samples above the water table use the class's unsaturated parameters.
//!
//! # Quick start
//!
//! ```rust
//! use lithos_prior::{Class, PriorConfig, ResistivityPrior, Section, WaterTableModel};
//! use lithos_resistivity::{assign_resistivity, sample_water_table};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let prior = PriorConfig::new(
//!     vec![
//!         Class::new(1, "Clay", 1.0, 6.0, ResistivityPrior::new(20.0, 0.1))
//!             .with_unsaturated(ResistivityPrior::new(40.0, 0.1)),
//!     ],
//!     vec![Section::new(vec![1], vec![1.0])],
//!     Some(WaterTableModel::Uniform { min: 2.0, max: 6.0 }),
//! )
//! .unwrap();
//! let depths = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let o = sample_water_table(prior.water_table(), &mut rng);
//! let res = assign_resistivity(&prior, &[1; 8], &[1; 8], o, &depths, &mut rng).unwrap();
//! assert!(res.iter().all(|&v| v > 0.0));
//! ```

pub mod assign;
pub mod error;
pub mod water;

pub use assign::{SURFACE, assign_resistivity, assign_resistivity_into};
pub use error::ResistivityError;
pub use water::sample_water_table;
