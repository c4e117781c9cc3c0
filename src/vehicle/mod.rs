pub mod airframe;

pub use airframe::{Airframe, AirframeBuilder};
