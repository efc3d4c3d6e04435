pub mod costs;
pub mod inputs;
pub mod months;
pub mod projection;
pub mod results;
pub mod scenario;
