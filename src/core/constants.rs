// Protocol constants for the RT73 codeplug image
// Fixed by the radio firmware: addresses, record widths and tone tables must
// match the device bit for bit.

/// Transfer unit of the serial protocol; images are a multiple of this
pub const BLOCK_SIZE: usize = 2048;

/// Largest block count the upload header can carry
pub const MAX_BLOCKS: usize = 0xFF;

/// Alignment unit of the contact and zone blocks
pub const KB: usize = 1024;

// Record sizes (bytes)
pub const CHANNEL_RECORD_SIZE: usize = 32;
pub const ZONE_RECORD_SIZE: usize = 32;
pub const CONTACT_RECORD_SIZE: usize = 16;
pub const MESSAGE_RECORD_SIZE: usize = 40;
pub const RX_GROUP_RECORD_SIZE: usize = 210;
pub const SCAN_LIST_RECORD_SIZE: usize = 216;
pub const APRS_DMR_RECORD_SIZE: usize = 8;

// 16-bit little-endian counters
pub const ZONE_COUNT_ADDR: usize = 0x138F;
pub const CHANNEL_COUNT_ADDR: usize = 0x1391;
pub const CONTACT_COUNT_ADDR: usize = 0x1393;

// Fixed block addresses
pub const CONTACT_START_ADDR: usize = 0x1B400;
pub const RX_GROUP_START_ADDR: usize = 0xE6BF;
pub const SCAN_LIST_START_ADDR: usize = 0x13CF;
pub const APRS_DMR_START_ADDR: usize = 0xE4B;

pub const SCAN_LIST_COUNT: usize = 250;
pub const SCAN_LIST_PAIRS_OFFSET: usize = 0x10;
pub const SCAN_LIST_PAIRS: usize = 50;

pub const RX_GROUP_COUNT: usize = 250;
pub const RX_GROUP_MEMBERS_OFFSET: usize = 0x0A;
pub const RX_GROUP_MEMBERS: usize = 100;

pub const APRS_DMR_COUNT: usize = 8;

// Quick messages live in two blocks, the second below the first
pub const MESSAGE_BLOCK_1_ADDR: usize = 0xFAE;
pub const MESSAGE_BLOCK_1_COUNT: usize = 15;
pub const MESSAGE_BLOCK_2_ADDR: usize = 0x12B;
pub const MESSAGE_BLOCK_2_COUNT: usize = 85;
pub const MAX_MESSAGES: usize = MESSAGE_BLOCK_1_COUNT + MESSAGE_BLOCK_2_COUNT;

// Ham contact/group databases, uploaded separately from the codeplug
pub const HAM_ID_WIDTH: usize = 3;
pub const HAM_GROUP_RECORD_SIZE: usize = 16;
/// 300,000 contacts of 128 bytes
pub const MAX_HAM_CONTACT_BLOCKS: usize = 0x493E;
/// About 30,000 groups
pub const MAX_HAM_GROUP_BLOCKS: usize = 0xEB;

// Zone record internals, generated at assemble time
pub const ZONE_CHANNEL_SLOT_OFFSET: usize = 0x0D;
pub const ZONE_CHANNEL_COUNT_OFFSET: usize = 0x0F;

/// 51 CTCSS tones, in tenths of a hertz
pub const CTCSS_TONES: [u16; 51] = [
    625, 670, 693, 719, 744, 770, 797, 825, 854, 885, 915, 948, 974, 1000, 1035, 1072, 1109, 1148,
    1188, 1230, 1273, 1318, 1365, 1413, 1462, 1514, 1567, 1598, 1622, 1655, 1679, 1713, 1738, 1773,
    1799, 1835, 1862, 1899, 1928, 1966, 1995, 2035, 2065, 2107, 2181, 2257, 2291, 2336, 2418, 2503,
    2541,
];

/// 108 DCS codes, written as their octal digits
pub const DCS_CODES: [u16; 108] = [
    17, 23, 25, 26, 31, 32, 36, 43, 47, 50, 51, 53, 54, 65, 71, 72, 73, 74, 114, 115, 116, 122, 125,
    131, 132, 134, 143, 145, 152, 155, 156, 162, 165, 172, 174, 205, 212, 223, 225, 226, 243, 244,
    245, 246, 251, 252, 255, 261, 263, 265, 266, 271, 274, 306, 311, 315, 325, 331, 332, 343, 346,
    351, 356, 364, 365, 371, 411, 412, 413, 423, 431, 432, 445, 446, 452, 454, 455, 462, 464, 465,
    466, 503, 506, 516, 523, 526, 532, 546, 565, 606, 612, 624, 627, 631, 632, 645, 646, 654, 662,
    664, 703, 712, 723, 731, 732, 734, 743, 754,
];

/// Position of a CTCSS frequency (tenths of a hertz) in the table
pub fn ctcss_index(decihertz: u16) -> Option<usize> {
    CTCSS_TONES.iter().position(|&t| t == decihertz)
}

/// Position of a DCS code in the table
pub fn dcs_index(code: u16) -> Option<usize> {
    DCS_CODES.iter().position(|&c| c == code)
}

/// Address of logical quick-message slot `index`
pub fn message_address(index: usize) -> Option<usize> {
    if index < MESSAGE_BLOCK_1_COUNT {
        Some(MESSAGE_BLOCK_1_ADDR + index * MESSAGE_RECORD_SIZE)
    } else if index < MAX_MESSAGES {
        Some(MESSAGE_BLOCK_2_ADDR + (index - MESSAGE_BLOCK_1_COUNT) * MESSAGE_RECORD_SIZE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_sorted_and_unique() {
        assert!(CTCSS_TONES.windows(2).all(|w| w[0] < w[1]));
        assert!(DCS_CODES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(CTCSS_TONES[0], 625);
        assert_eq!(DCS_CODES[0], 17);
        assert_eq!(DCS_CODES[DCS_CODES.len() - 1], 754);
    }

    #[test]
    fn test_table_lookup() {
        assert_eq!(ctcss_index(885), Some(9));
        assert_eq!(ctcss_index(886), None);
        assert_eq!(dcs_index(23), Some(1));
        assert_eq!(dcs_index(24), None);
    }

    #[test]
    fn test_message_split_addresses() {
        assert_eq!(message_address(0), Some(0xFAE));
        assert_eq!(message_address(14), Some(0xFAE + 14 * 40));
        assert_eq!(message_address(15), Some(0x12B));
        assert_ne!(message_address(14), message_address(15));
        assert_eq!(message_address(99), Some(APRS_DMR_START_ADDR));
        assert_eq!(message_address(100), None);
    }

    #[test]
    fn test_fixed_regions_do_not_collide() {
        let scan_end = SCAN_LIST_START_ADDR + SCAN_LIST_COUNT * SCAN_LIST_RECORD_SIZE;
        let rx_end = RX_GROUP_START_ADDR + RX_GROUP_COUNT * RX_GROUP_RECORD_SIZE;
        assert!(scan_end <= RX_GROUP_START_ADDR);
        assert!(rx_end <= CONTACT_START_ADDR);
        assert!(APRS_DMR_START_ADDR + APRS_DMR_COUNT * APRS_DMR_RECORD_SIZE <= 0xE8B);
    }
}
