mod recommendation;
mod venue;

pub use recommendation::*;
pub use venue::VenueRecord;
