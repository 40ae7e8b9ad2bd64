mod forecast;
mod load;

pub use forecast::{forecast_capacity, CapacityForecast, ClosingProject, RecruiterForecast};
pub use load::{current_load, RecruiterLoad};
