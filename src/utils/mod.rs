pub mod errors;
pub mod constants;
pub mod settings;
pub mod math_helpers;

pub use errors::*;
pub use constants::*;
pub use settings::*;
pub use math_helpers::*;
