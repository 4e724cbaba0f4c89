//! Areas and the partitions that maintain them.

pub mod area;
pub mod partition;
pub mod partitions;

pub use area::{Area, Occupants};
pub use partition::{ZonePartition, ZonePartitionBuilder};
pub use partitions::{ZonePartitions, ZonePartitionsBuilder};
