pub mod configurations;
pub mod energy;

pub use configurations::{decode, ConfigurationSpace, Configurations};
pub use energy::{bond_sum, energy, magnetization};
