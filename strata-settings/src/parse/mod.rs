//! Text grammars for setting values

pub mod flow_temp;
pub mod matrix;
pub mod number;

pub use flow_temp::{FlowTempGraph, FlowTempPoint};
pub use matrix::FMatrix3x3;
