// Layout Planner
// Addresses of the variable-count blocks (contacts, zones, channels) follow
// from three 16-bit counters at fixed addresses.

use crate::bitwise::{read_u16_le, write_u16_le};
use crate::core::constants::*;
use crate::error::{CodeplugError, Result};
use crate::memmap::MemoryMap;
use std::fmt;

/// The three header counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub zones: usize,
    pub channels: usize,
    pub contacts: usize,
}

fn round_up(value: usize, unit: usize) -> usize {
    value.div_ceil(unit) * unit
}

/// Contact block size: whole KB, and always an odd number of them.
///
/// The device misreads zones placed after an even number of contact KB.
pub fn contact_block_size(contacts: usize) -> usize {
    let size = round_up(contacts * CONTACT_RECORD_SIZE, KB);
    if (size / KB) % 2 == 0 {
        size + KB
    } else {
        size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub counts: Counts,
    pub contact_block_size: usize,
    pub zone_start: usize,
    pub channel_start: usize,
    /// Planned image length, a whole number of transfer blocks
    pub image_size: usize,
}

impl Layout {
    /// Addresses for `counts`, without capacity checks
    pub fn derive(counts: Counts) -> Self {
        let contact_block_size = contact_block_size(counts.contacts);
        let zone_start = round_up(CONTACT_START_ADDR + contact_block_size, KB);
        let channel_start = zone_start + counts.zones * ZONE_RECORD_SIZE;
        let image_size = round_up(channel_start + counts.channels * CHANNEL_RECORD_SIZE, BLOCK_SIZE);
        Self {
            counts,
            contact_block_size,
            zone_start,
            channel_start,
            image_size,
        }
    }

    /// Plan an image for `counts`, failing when the counters or the
    /// transfer block budget would overflow
    pub fn plan(counts: Counts) -> Result<Self> {
        for (what, count) in [
            ("Zones", counts.zones),
            ("Channels", counts.channels),
            ("Contacts", counts.contacts),
        ] {
            if count > u16::MAX as usize {
                return Err(CodeplugError::CapacityExceeded {
                    what: what.to_string(),
                    count,
                    max: u16::MAX as usize,
                });
            }
        }
        let layout = Self::derive(counts);
        let blocks = layout.image_size / BLOCK_SIZE;
        if blocks > MAX_BLOCKS {
            return Err(CodeplugError::CapacityExceeded {
                what: "Codeplug blocks".to_string(),
                count: blocks,
                max: MAX_BLOCKS,
            });
        }
        Ok(layout)
    }

    pub fn read_counts(image: &MemoryMap) -> Result<Counts> {
        let counter = |addr: usize| -> Result<usize> {
            Ok(usize::from(read_u16_le(image.get(addr, Some(2))?)?))
        };
        Ok(Counts {
            zones: counter(ZONE_COUNT_ADDR)?,
            channels: counter(CHANNEL_COUNT_ADDR)?,
            contacts: counter(CONTACT_COUNT_ADDR)?,
        })
    }

    /// Layout described by an image's own counters
    pub fn from_image(image: &MemoryMap) -> Result<Self> {
        Ok(Self::derive(Self::read_counts(image)?))
    }

    pub fn write_counts(&self, image: &mut MemoryMap) -> Result<()> {
        for (addr, count) in [
            (ZONE_COUNT_ADDR, self.counts.zones),
            (CHANNEL_COUNT_ADDR, self.counts.channels),
            (CONTACT_COUNT_ADDR, self.counts.contacts),
        ] {
            let count = u16::try_from(count).map_err(|_| CodeplugError::CapacityExceeded {
                what: "Counter".to_string(),
                count,
                max: u16::MAX as usize,
            })?;
            image.set_bytes(addr, &write_u16_le(count))?;
        }
        Ok(())
    }

    pub fn contact_address(&self, index: usize) -> usize {
        CONTACT_START_ADDR + index * CONTACT_RECORD_SIZE
    }

    pub fn zone_address(&self, index: usize) -> usize {
        self.zone_start + index * ZONE_RECORD_SIZE
    }

    /// 1-based channel slot of each zone, counted in 32-byte records from
    /// the zone block start, given the zones' channel counts in order
    pub fn zone_channel_slots(&self, channel_counts: &[usize]) -> Vec<usize> {
        let mut next = self.counts.zones + 1;
        channel_counts
            .iter()
            .map(|count| {
                let slot = next;
                next += count;
                slot
            })
            .collect()
    }

    /// Image address of a zone's channel slot.
    ///
    /// Slot 0 and slots inside the zone table do not address channels.
    pub fn channel_slot_address(&self, slot: usize) -> Result<usize> {
        if slot <= self.counts.zones {
            return Err(CodeplugError::RegionConflict(format!(
                "channel slot {} lies inside the zone table of {} records",
                slot, self.counts.zones
            )));
        }
        Ok(self.zone_start + (slot - 1) * CHANNEL_RECORD_SIZE)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} contacts at {:#x} ({} bytes), {} zones at {:#x}, {} channels at {:#x}, image {} bytes",
            self.counts.contacts,
            CONTACT_START_ADDR,
            self.contact_block_size,
            self.counts.zones,
            self.zone_start,
            self.counts.channels,
            self.channel_start,
            self.image_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_block_parity() {
        // 128 contacts fill exactly 2 KB, so a third is added
        assert_eq!(contact_block_size(128), 3 * KB);
        // 64 contacts fill 1 KB, already odd
        assert_eq!(contact_block_size(64), KB);
        assert_eq!(contact_block_size(65), 3 * KB);
        assert_eq!(contact_block_size(0), KB);
        assert_eq!(contact_block_size(1), KB);
        assert_eq!(contact_block_size(200), 5 * KB);
    }

    #[test]
    fn test_zone_start_reflects_parity() {
        let layout = Layout::derive(Counts {
            contacts: 128,
            ..Counts::default()
        });
        assert_eq!(layout.zone_start, CONTACT_START_ADDR + 3 * KB);
        assert_eq!(layout.zone_start % KB, 0);
    }

    #[test]
    fn test_plan_addresses() {
        let layout = Layout::plan(Counts {
            zones: 3,
            channels: 10,
            contacts: 5,
        })
        .unwrap();
        assert_eq!(layout.zone_start, 0x1B800);
        assert_eq!(layout.channel_start, 0x1B800 + 3 * 32);
        assert_eq!(layout.image_size % BLOCK_SIZE, 0);
        assert!(layout.image_size >= layout.channel_start + 10 * 32);
        assert!(CONTACT_START_ADDR < layout.zone_start);
        assert!(layout.zone_start < layout.channel_start);
    }

    #[test]
    fn test_ordering_holds_for_many_counts() {
        for contacts in [0, 1, 63, 64, 65, 128, 500, 1000] {
            for zones in [0, 1, 20] {
                let layout = Layout::derive(Counts {
                    zones,
                    channels: zones * 4,
                    contacts,
                });
                assert!(layout.contact_address(contacts) <= layout.zone_start);
                assert!(layout.zone_start <= layout.channel_start);
                assert_eq!(layout.image_size % BLOCK_SIZE, 0);
            }
        }
    }

    #[test]
    fn test_capacity() {
        let too_many = Counts {
            zones: 1,
            channels: 13_000,
            contacts: 0,
        };
        assert!(matches!(
            Layout::plan(too_many),
            Err(CodeplugError::CapacityExceeded { max: 255, .. })
        ));
        let overflow = Counts {
            contacts: 70_000,
            ..Counts::default()
        };
        assert!(matches!(
            Layout::plan(overflow),
            Err(CodeplugError::CapacityExceeded { max: 65535, .. })
        ));
    }

    #[test]
    fn test_counts_round_trip_through_image() {
        let layout = Layout::plan(Counts {
            zones: 2,
            channels: 7,
            contacts: 300,
        })
        .unwrap();
        let mut image = MemoryMap::new_with_size(layout.image_size);
        layout.write_counts(&mut image).unwrap();
        assert_eq!(image.get(ZONE_COUNT_ADDR, Some(2)).unwrap(), &[2, 0]);
        assert_eq!(Layout::from_image(&image).unwrap(), layout);
    }

    #[test]
    fn test_zone_channel_slots() {
        let layout = Layout::derive(Counts {
            zones: 3,
            channels: 6,
            contacts: 0,
        });
        assert_eq!(layout.zone_channel_slots(&[2, 0, 4]), vec![4, 6, 6]);
        assert_eq!(layout.channel_slot_address(4).unwrap(), layout.channel_start);
        assert_eq!(
            layout.channel_slot_address(6).unwrap(),
            layout.channel_start + 2 * CHANNEL_RECORD_SIZE
        );
        assert!(matches!(
            layout.channel_slot_address(0),
            Err(CodeplugError::RegionConflict(_))
        ));
        assert!(layout.channel_slot_address(3).is_err());
    }

    #[test]
    fn test_short_image() {
        let image = MemoryMap::new_with_size(0x1000);
        assert!(matches!(
            Layout::from_image(&image),
            Err(CodeplugError::Truncated { .. })
        ));
    }
}
