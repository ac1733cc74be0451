/// Opaque object identifier (index of the object in its dataset)
pub type DbId = u32;

/// Distance between two objects
pub type Distance = f64;

/// Extra slots allocated beyond k when a collector is created
pub const DEFAULT_SLACK: usize = 5;
