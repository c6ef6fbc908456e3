//! Storage Frame Catalog
//!
//! Site inventory of the storage frames reachable per HORCM instance:
//! the decimal frame serial and the frame's command device. Scan consumers
//! use the serial (in hex form) embedded in a device node string to find
//! which frame a device belongs to.

/// One storage frame entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// HORCM instance number serving this frame
    pub instance: u16,
    /// Decimal frame serial number
    pub serial: u32,
    /// Command device node for the frame
    pub command_device: &'static str,
}

const FRAMES: [FrameInfo; 3] = [
    FrameInfo {
        instance: 5,
        serial: 66673,
        command_device: "c0t60060E801604710000010471000025FFd0s2",
    },
    FrameInfo {
        instance: 6,
        serial: 93133,
        command_device: "c0t60060E80166BCD0000016BCD000026FFd0s2",
    },
    FrameInfo {
        instance: 7,
        serial: 12345,
        command_device: "c0t60060E8016--bogus--a6FFd0s2",
    },
];

/// The decimal serial of the frame served by a HORCM instance.
pub fn serial_for_instance(instance: u16) -> Option<u32> {
    FRAMES
        .iter()
        .find(|frame| frame.instance == instance)
        .map(|frame| frame.serial)
}

/// The command device of the frame a device node belongs to, matched by
/// the serial's hex form appearing inside the node string.
pub fn command_device_for(device: &str) -> Option<&'static str> {
    FRAMES
        .iter()
        .find(|frame| device.contains(&format!("{:X}", frame.serial)))
        .map(|frame| frame.command_device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_lookup() {
        assert_eq!(serial_for_instance(5), Some(66673));
        assert_eq!(serial_for_instance(6), Some(93133));
        assert_eq!(serial_for_instance(9), None);
    }

    #[test]
    fn test_command_device_by_serial_hex() {
        // 93133 = 0x16BCD, present in the node string
        let device = "c0t60060E80166BCD0000016BCD00006DE0d0s2";
        assert_eq!(
            command_device_for(device),
            Some("c0t60060E80166BCD0000016BCD000026FFd0s2")
        );
        assert_eq!(command_device_for("c0t0d0s2"), None);
    }
}
