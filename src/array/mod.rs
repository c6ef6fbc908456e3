//! Array administration interface: command rendering, external invocation,
//! status probing, and inventory scanning

pub mod command;
pub mod frame;
pub mod probe;
pub mod runner;
pub mod scan;

pub use command::{ArrayCommand, Raidcom, LOCK_RESOURCE, LOCK_TIMEOUT_SECS};
pub use frame::{command_device_for, serial_for_instance, FrameInfo};
pub use probe::{parse_shared_hosts, PortHost, Prober};
pub use runner::{InqraidPipeline, RaidcomRunner};
pub use scan::{parse_inventory, DeviceScanner, ScanEntry, ScanKind, ScanResult};
