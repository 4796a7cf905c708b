pub mod moments;
pub mod results;

pub use moments::BoltzmannMoments;
pub use results::ExactResult;
