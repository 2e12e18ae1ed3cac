mod body;
mod region;
mod barnes_hut;
mod simulation;

pub use body::*;
pub use region::*;
pub use barnes_hut::*;
pub use simulation::*;

#[cfg(test)]
mod region_tests;
