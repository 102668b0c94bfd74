//! Orchestration around the physics kernels
//!
//! - [`session`]: parameter set and running diagnostic totals
//! - [`domain`]: the host seam (cells, particle-in-cell enumeration)
//! - [`lifecycle`]: particle creation hook and per-step update
//! - [`aggregator`]: per-cell volumetric source terms
//! - [`pipeline`]: explicit particle → cell step ordering over a [`CellDomain`]

pub mod aggregator;
pub mod domain;
pub mod lifecycle;
pub mod pipeline;
pub mod session;

pub use aggregator::{aggregate_cell, CellAggregation, CellSourceTerms, SourceEquation, SourceTerm};
pub use domain::{CellDomain, HostDomain, SingleCellView};
pub use lifecycle::{advance_temperature, initialize_particle, update_particle, ParticleUpdate};
pub use pipeline::{ConvectiveCoefficient, PipelineOptions, StepOutput, StepPipeline};
pub use session::{KineticsSession, StepDiagnostics};
