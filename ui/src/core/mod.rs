//! Pure statistics behind the snapshots: no rendering, no platform calls.

pub mod caption;
pub mod clock;
pub mod format;
pub mod grid;
pub mod life;

pub use caption::Heading;
pub use clock::ClockState;
pub use grid::{CellKind, GridStats};
pub use life::{Expectancy, LifeProfile};
