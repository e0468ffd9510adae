// RT73 schema tables
// Singleton sections use absolute image addresses; collection records use
// offsets from the record start.

use crate::schema::{def, EnumTable, Field, FieldDef, Transform};

macro_rules! on_off {
    ($mask:expr) => {
        &[(0x00, "Off"), ($mask, "On")]
    };
}

macro_rules! toggle {
    ($mask:expr) => {
        &[(0x00, "OFF"), ($mask, "ON")]
    };
}

pub const BUTTON_IDS: EnumTable = &[
    (0x00, "UNDEFINED"),
    (0x01, "HI_LO_POWER"),
    (0x02, "BACKLIGHT_TOGGLE"),
    (0x03, "KEYLOCK_TOGGLE"),
    (0x04, "VOX"),
    (0x05, "ZONE_SWITCH"),
    (0x06, "SCAN"),
    (0x07, "SCAN_MODE_TOGGLE"),
    (0x08, "RPTR_TALKAROUND"),
    (0x09, "EMERGENCY_ALARM"),
    (0x0A, "ENCRYPTION_TOGGLE"),
    (0x0B, "CONTACTS"),
    (0x0C, "SMS"),
    (0x0D, "RADIO_REVIVE"),
    (0x0E, "RADIO_DETECTION"),
    (0x0F, "RADIO_KILL"),
    (0x10, "REMOTE_MONITOR"),
    (0x11, "MONITOR"),
    (0x12, "PERMANENT_MONITOR"),
    (0x13, "TONEBURST_1750HZ"),
    (0x1B, "GPS_TOGGLE"),
    (0x28, "MENU"),
    (0x31, "DTMF_TOGGLE"),
    (0x34, "ROAM_TOGGLE"),
    (0x37, "UP"),
    (0x38, "DOWN"),
    (0x39, "BACK"),
    (0x3A, "DQT_QT"),
    (0x3B, "A_B_TOGGLE"),
    (0x3C, "VOL"),
    (0x3D, "VFO"),
    (0x3E, "PROMISCUOUS_MODE"),
    (0x3F, "DUAL_WATCH_TOGGLE"),
];

pub const DEVICE_INFO: &[FieldDef] = &[
    def("Factory Number", Field::text(0x00, 16)),
    def("Serial Number", Field::text(0x10, 16)),
    def("Model Number", Field::text(0x20, 16)),
    def("FW Version", Field::text(0x30, 31)),
    def("Frequency range", Field::text(0x50, 16)),
    def("Update date", Field::text(0x60, 16)),
    def("Firmware ID", Field::text(0x70, 16)),
];

pub const BASIC_PARAMETERS: &[FieldDef] = &[
    def("Radio name", Field::text(0x80, 10)),
    def("DMR ID", Field::number(0x90, 3)),
    def("Language", Field::bitmask(0x95, 0x10, &[(0x00, "Chinese"), (0x10, "English")])),
    def("TimeoutTimer", Field::number(0x134F, 1)),
    def("Busy channel lockout", Field::bitmask(0xA6, 0x80, on_off!(0x80))),
    def("VOX", Field::bitmask(0xA6, 0x40, on_off!(0x40))),
    def("VOX sensitivity", Field::masked_with(0xA6, 0x0F, Transform::affine(1, 1))),
    def("Scan mode", Field::bitmask(0x137D, 0x03, &[(0x00, "CO"), (0x01, "TO"), (0x02, "SE")])),
    def(
        "End tone types",
        Field::bitmask(0x1381, 0x03, &[(0x00, "55Hz"), (0x01, "120'"), (0x02, "180"), (0x03, "240")]),
    ),
    def("Squelch A level", Field::masked(0x93, 0x0F)),
    def("Squelch B level", Field::masked_with(0x93, 0xF0, Transform::Shift(4))),
    def("Backlight", Field::bitmask(0x95, 0x28, &[(0x00, "Off"), (0x08, "On"), (0x20, "Auto")])),
    def(
        "Keylock",
        Field::bitmask(0x95, 0x44, &[(0x00, "Off"), (0x04, "Auto"), (0x40, "Manual"), (0x44, "Manual & Auto")]),
    ),
    def("Roaming", Field::bitmask(0x137B, 0x01, on_off!(0x01))),
    def(
        "Roaming mode",
        Field::bitmask(0x1375, 0x03, &[(0x00, "Auto"), (0x01, "Manual"), (0x02, "Strong RSSI Priority")]),
    ),
    def("RSSI set", Field::masked_with(0x1376, 0xFF, Transform::affine(-1, -90))),
    def("Connect check timer", Field::masked(0x1377, 0xFF)),
    def("Repeater check timer", Field::masked(0x1378, 0xFF)),
    def("Connect timer", Field::masked_with(0x1379, 0x09, Transform::affine(1, 1))),
    def(
        "Record set",
        Field::bitmask(0x1380, 0x03, &[(0x00, "None"), (0x01, "TX"), (0x02, "RX"), (0x03, "TX/RX")]),
    ),
];

pub const COMMON_MENU_PARAMETERS: &[FieldDef] = &[
    def("Contact list", Field::bitmask(0xAE, 0x01, on_off!(0x01))),
    def("New contact", Field::bitmask(0xAE, 0x02, on_off!(0x02))),
    def("Manual dial", Field::bitmask(0xAE, 0x04, on_off!(0x04))),
    def("Ham contacts", Field::bitmask(0xAE, 0x08, on_off!(0x08))),
    def("Ham groups", Field::bitmask(0xAE, 0x10, on_off!(0x10))),
    def("Radio check", Field::bitmask(0xBA, 0x01, on_off!(0x01))),
    def("Call alert", Field::bitmask(0xBA, 0x02, on_off!(0x02))),
    def("Radio monitor", Field::bitmask(0xBA, 0x04, on_off!(0x04))),
    def("Radio disable", Field::bitmask(0xBA, 0x08, on_off!(0x08))),
    def("Radio enable", Field::bitmask(0xBA, 0x10, on_off!(0x10))),
    def("SMS write", Field::bitmask(0xAF, 0x01, on_off!(0x01))),
    def("SMS quick msg", Field::bitmask(0xAF, 0x02, on_off!(0x02))),
    def("SMS inbox", Field::bitmask(0xAF, 0x04, on_off!(0x04))),
    def("SMS outbox", Field::bitmask(0xAF, 0x08, on_off!(0x08))),
    def("SMS drafts", Field::bitmask(0xAF, 0x10, on_off!(0x10))),
    def("Call log outgoing", Field::bitmask(0xB0, 0x01, on_off!(0x01))),
    def("Call log received", Field::bitmask(0xB0, 0x02, on_off!(0x02))),
    def("Call log missed", Field::bitmask(0xB0, 0x04, on_off!(0x04))),
    def("Scan on/off", Field::bitmask(0xB1, 0x01, on_off!(0x01))),
    def("Scan list", Field::bitmask(0xB1, 0x02, on_off!(0x02))),
    def("Scan mode", Field::bitmask(0xB1, 0x04, on_off!(0x04))),
    def("Roam on/off", Field::bitmask(0xB1, 0x08, on_off!(0x08))),
    // Shares byte 0x10 with the device serial number
    def("Scan running on/off", Field::bitmask(0x10, 0x10, on_off!(0x10))),
    def("Zone list on/off", Field::bitmask(0xB2, 0x01, on_off!(0x01))),
    def("Language", Field::bitmask(0xB3, 0x01, on_off!(0x01))),
    def("Keylock", Field::bitmask(0xB3, 0x02, on_off!(0x02))),
    def("Backlight", Field::bitmask(0xB3, 0x04, on_off!(0x04))),
    def("LEDs", Field::bitmask(0xB3, 0x08, on_off!(0x08))),
    def("Display mode", Field::bitmask(0xB3, 0x10, on_off!(0x10))),
    def("Vox", Field::bitmask(0xB3, 0x20, on_off!(0x20))),
    def("Channel sw", Field::bitmask(0xB3, 0x40, on_off!(0x40))),
    def("Factory reset", Field::bitmask(0xB3, 0x80, on_off!(0x80))),
    def("Local repeat", Field::bitmask(0xBC, 0x01, on_off!(0x01))),
    def("ToT", Field::bitmask(0xB5, 0x01, on_off!(0x01))),
    def("Power set", Field::bitmask(0xB5, 0x02, on_off!(0x02))),
    def("Repeat set", Field::bitmask(0xB5, 0x04, on_off!(0x04))),
    def("Sleep mode", Field::bitmask(0xB5, 0x08, on_off!(0x08))),
    def("Squelch level", Field::bitmask(0xB5, 0x10, on_off!(0x10))),
    def("Wide/Narrow band", Field::bitmask(0xB5, 0x20, on_off!(0x20))),
    def("Busy channel lockout", Field::bitmask(0xB5, 0x40, on_off!(0x40))),
    def("Signalling", Field::bitmask(0xB5, 0x80, on_off!(0x80))),
    def("End tone types", Field::bitmask(0xBD, 0x01, on_off!(0x01))),
    def("Enc level", Field::bitmask(0xB4, 0x01, on_off!(0x01))),
    def("Profiles", Field::bitmask(0xB6, 0x01, on_off!(0x01))),
    def("Keytone", Field::bitmask(0xB6, 0x02, on_off!(0x02))),
    def("Power tone", Field::bitmask(0xB6, 0x04, on_off!(0x04))),
    def("Msg tone", Field::bitmask(0xB6, 0x08, on_off!(0x08))),
    def("Private call tone", Field::bitmask(0xB6, 0x10, on_off!(0x10))),
    def("Group call tone", Field::bitmask(0xB6, 0x20, on_off!(0x20))),
    def("Call tone", Field::bitmask(0xB6, 0x40, on_off!(0x40))),
    def("Power on tone", Field::bitmask(0xB6, 0x80, on_off!(0x80))),
    def("GPS", Field::bitmask(0xB7, 0x01, on_off!(0x01))),
    def("Torch", Field::bitmask(0xB7, 0x02, on_off!(0x02))),
    def("FM radio", Field::bitmask(0xB7, 0x04, on_off!(0x04))),
    def("Time", Field::bitmask(0xB7, 0x08, on_off!(0x08))),
    def("DTMF", Field::bitmask(0xB7, 0x10, on_off!(0x10))),
    def("Speaker handmic", Field::bitmask(0xB7, 0x20, on_off!(0x20))),
    def("APRS", Field::bitmask(0xB7, 0x40, on_off!(0x40))),
    def("Record set", Field::bitmask(0xB8, 0x01, on_off!(0x01))),
    def("Record list", Field::bitmask(0xB8, 0x02, on_off!(0x02))),
    def("Record clear", Field::bitmask(0xB8, 0x04, on_off!(0x04))),
    def("Record space", Field::bitmask(0xB8, 0x08, on_off!(0x08))),
    def("Radio ID", Field::bitmask(0xB9, 0x01, on_off!(0x01))),
    def("RX group list", Field::bitmask(0xB9, 0x02, on_off!(0x02))),
    def("Channel contact", Field::bitmask(0xB9, 0x04, on_off!(0x04))),
    def("Version", Field::bitmask(0xB9, 0x08, on_off!(0x08))),
    def("VFO", Field::bitmask(0xBB, 0x01, on_off!(0x01))),
];

pub const PROMPT_TONE: &[FieldDef] = &[
    def("Profiles", Field::bitmask(0xA7, 0x01, &[(0x00, "Standard"), (0x01, "Silent")])),
    def("SMS Prompt", Field::masked(0xA8, 0x0F)),
    def("Private call Tone", Field::masked(0xA9, 0x05)),
    def("Group call Tone", Field::masked(0xAA, 0x05)),
    def("Key tone", Field::bitmask(0xAB, 0x80, on_off!(0x80))),
    def("Key tone vol", Field::masked(0xAB, 0x0F)),
    def("Low bat alert tone", Field::bitmask(0xAC, 0x80, on_off!(0x80))),
    def("Low bat alert vol", Field::masked(0xAC, 0x0F)),
    def("Call hang up", Field::bitmask(0x12D8, 0x01, &[(0x00, "Silent"), (0x01, "Prompt Tone")])),
    def("Boot ringtone", Field::bitmask(0x95, 0x02, on_off!(0x02))),
    // Both prompts are stored in the same nibble
    def("Roaming restart prompt", Field::masked(0x1383, 0x0F)),
    def("Repeater selected prompt", Field::masked(0x1383, 0x0F)),
];

pub const INDICATORS: &[FieldDef] = &[
    def("All", Field::bitmask(0xAD, 0x10, on_off!(0x10))),
    def("Tx", Field::bitmask(0xAD, 0x08, on_off!(0x08))),
    def("Rx", Field::bitmask(0xAD, 0x04, on_off!(0x04))),
    def("Scanning", Field::bitmask(0xAD, 0x02, on_off!(0x02))),
    def("Low battery", Field::bitmask(0xAD, 0x01, on_off!(0x01))),
];

pub const PRESET_BUTTONS: &[FieldDef] = &[
    def(
        "LongPressDuration",
        Field::bitmask(
            0xC1,
            0xFF,
            &[
                (0x00, "0.5"),
                (0x01, "1.0"),
                (0x02, "1.5"),
                (0x03, "2.0"),
                (0x04, "2.5"),
                (0x05, "3.0"),
                (0x06, "3.5"),
                (0x07, "4.0"),
                (0x08, "4.5"),
                (0x09, "5.0"),
            ],
        ),
    ),
    def("P1 LongPress", Field::bitmask(0xC2, 0xFF, BUTTON_IDS)),
    def("P1 ShortPress", Field::bitmask(0xC3, 0xFF, BUTTON_IDS)),
    def("P2 LongPress", Field::bitmask(0xC4, 0xFF, BUTTON_IDS)),
    def("P2 ShortPress", Field::bitmask(0xC5, 0xFF, BUTTON_IDS)),
    def("P3 LongPress", Field::bitmask(0xC6, 0xFF, BUTTON_IDS)),
    def("P3 ShortPress", Field::bitmask(0xC7, 0xFF, BUTTON_IDS)),
    def("P4 LongPress", Field::bitmask(0xC8, 0xFF, BUTTON_IDS)),
    def("P4 ShortPress", Field::bitmask(0xC9, 0xFF, BUTTON_IDS)),
    def("P5 LongPress", Field::bitmask(0xCA, 0xFF, BUTTON_IDS)),
    def("P5 ShortPress", Field::bitmask(0xCB, 0xFF, BUTTON_IDS)),
    def("P6 LongPress", Field::bitmask(0xCC, 0xFF, BUTTON_IDS)),
    def("P6 ShortPress", Field::bitmask(0xCD, 0xFF, BUTTON_IDS)),
    def("P7 LongPress", Field::bitmask(0x1385, 0xFF, BUTTON_IDS)),
    def("P7 ShortPress", Field::bitmask(0x1386, 0xFF, BUTTON_IDS)),
];

pub const MIC_GAIN: &[FieldDef] = &[
    def("Mic gain 1", Field::bitmask(0xA4, 0x80, on_off!(0x80))),
    def("Mic gain 1 setting", Field::masked_with(0xA4, 0x07, Transform::scale(4))),
    def("Mic gain 2", Field::bitmask(0xA5, 0x80, on_off!(0x80))),
    def("Mic gain 2 setting", Field::masked(0xA5, 0x1F)),
];

pub const DMR_SERVICE: &[FieldDef] = &[
    def("Remote monitor duration", Field::masked_with(0xFAC, 0xFF, Transform::affine(10, 10))),
    def("Remote monitor decode", Field::bitmask(0xFAD, 0x80, on_off!(0x80))),
    def("Remote kill decode", Field::bitmask(0xFAD, 0x40, on_off!(0x40))),
    def("Radio detection decode", Field::bitmask(0xFAD, 0x20, on_off!(0x20))),
    def("Radio revive decode", Field::bitmask(0xFAD, 0x10, on_off!(0x10))),
    def("Call alert", Field::bitmask(0xFAD, 0x08, on_off!(0x08))),
    def("Group call hang time", Field::masked_with(0x1350, 0x0F, Transform::scale(500))),
    def("Private call hang time", Field::masked_with(0x1351, 0x0F, Transform::scale(500))),
    def("Import delay", Field::masked_with(0x1370, 0xFF, Transform::scale(10))),
    def("DTMF duration (on-time)", Field::masked_with(0x1371, 0xFF, Transform::scale(10))),
    def("DTMF duration (off-time)", Field::masked_with(0x1372, 0xFF, Transform::scale(10))),
    def("DTMF volume (local)", Field::masked(0x1373, 0x0F)),
    def("DTMF On/off", Field::bitmask(0x1363, 0x01, on_off!(0x01))),
    def("GPS On/off", Field::bitmask(0x137A, 0x01, on_off!(0x01))),
    def("GPS Interval", Field::masked(0x1353, 0xFF)),
    // 0xFFFF in both selects the current channel
    def("GPS Channel group ID", Field::number(0x1354, 2)),
    def("GPS Channel channel ID", Field::number(0x1356, 2)),
];

pub const APRS: &[FieldDef] = &[
    def("Manual TX interval", Field::number(0xE8B, 1)),
    def("Auto TX interval", Field::masked_with(0xE8C, 0xFF, Transform::scale(30))),
    def(
        "Beacon",
        Field::bitmask(0xE8E, 0x01, &[(0x00, "FIXED_LOCATION"), (0x01, "GPS_LOCATION")]),
    ),
    def("LatNS", Field::bitmask(0xE8F, 0x01, &[(0x00, "North"), (0x01, "South")])),
    // Degrees, minutes and seconds as decimal digits: 5606470 is 56 06 470
    def("Lat Degrees", Field::number(0xE91, 4)),
    def("LongEW", Field::bitmask(0xE90, 0x01, &[(0x00, "East"), (0x01, "West")])),
    def("Long Degrees", Field::number(0xE95, 4)),
    def("AX25 TX Freq", Field::number(0xE99, 4)),
    def("AX25 TX Power", Field::bitmask(0xEA1, 0x01, &[(0x00, "LOW"), (0x01, "HIGH")])),
    // Packed tone word, resolved separately
    def("AX25 QT/DQT", Field::number(0xE9D, 2)),
    def("AX25 APRS Tone", Field::bitmask(0xEA2, 0x01, toggle!(0x01))),
    def("AX25 TX Delay", Field::masked_with(0xE9F, 0xFF, Transform::scale(20))),
    def("AX25 Prewave time", Field::masked_with(0xEA0, 0xFF, Transform::scale(10))),
    def("AX25 Your Callsign", Field::text(0xEAB, 6)),
    def("AX25 Your SSID", Field::number(0xEA4, 1)),
    def("AX25 Dest Callsign", Field::text(0xEA5, 6)),
    def("AX25 Dest SSID", Field::number(0xEA3, 1)),
    // ASCII codes of the symbol
    def("AX25 APRS Symbol Table", Field::number(0xEB1, 1)),
    def("AX25 APRS Map Icon", Field::number(0xEB2, 1)),
    def("AX25 APRS Signal Path", Field::text(0xEB3, 20)),
    def("AX25 Your Sending Text", Field::text(0xEC7, 61)),
];

pub const APRS_DMR_CHANNEL: &[FieldDef] = &[
    def("Zone ID", Field::number(0x00, 2)),
    def("Channel ID", Field::number(0x02, 2)),
    def("Call Type", Field::bitmask(0x07, 0x04, &[(0x00, "PRIVATE"), (0x04, "GROUP")])),
    def("PTT", Field::bitmask(0x07, 0x08, toggle!(0x08))),
    def(
        "Report Slot",
        Field::bitmask(0x07, 0x03, &[(0x00, "CURRENT"), (0x01, "TS1"), (0x02, "TS2")]),
    ),
    def("APRS TG", Field::number(0x04, 3)),
];

pub const CONTACT: &[FieldDef] = &[
    def("ID", Field::number(0x00, 2)),
    def("Name", Field::text(0x03, 10)),
    def("DMR ID", Field::number(0x0D, 3)),
    def(
        "Type",
        Field::bitmask(
            0x02,
            0xFF,
            &[
                (0x04, "Group"),
                (0x05, "Private"),
                (0x06, "All Call"),
                (0x07, "No-Address Call"),
                (0x08, "RawData"),
                (0x09, "Define Data"),
                (0x0A, "SPDATA"),
            ],
        ),
    ),
];

pub const SCAN_LIST: &[FieldDef] = &[
    def("Name", Field::text(0x00, 10)),
    def("Talkback", Field::bitmask(0x0B, 0x20, on_off!(0x20))),
    def(
        "Scan TX Mode",
        Field::bitmask(
            0x0B,
            0x0F,
            &[(0x00, "Current Channel"), (0x04, "Last Operated Channel"), (0x08, "Appointed Channel")],
        ),
    ),
    def("Appointed channel group ID", Field::number(0x0C, 2)),
    def("Appointed channel channel ID", Field::number(0x0E, 2)),
];

pub const RX_GROUP: &[FieldDef] = &[def("Name", Field::text(0x00, 10))];

pub const ZONE: &[FieldDef] = &[
    def("ID", Field::number(0x00, 2)),
    def("Name", Field::text(0x03, 10)),
];

/// Generated at assemble time, never part of the document
pub const ZONE_CHANNELS: &[FieldDef] = &[
    def("Channel slot", Field::number(0x0D, 2)),
    def("Channel count", Field::number(0x0F, 2)),
];

pub const CHANNEL: &[FieldDef] = &[
    def("ID", Field::number(0x00, 2)),
    def(
        "Type",
        Field::bitmask(
            0x14,
            0xC0,
            &[(0x00, "ANALOG"), (0x40, "DIGITAL"), (0x80, "D_A_TX_A"), (0xC0, "D_A_TX_D")],
        ),
    ),
    def("Name", Field::text(0x02, 10)),
    def("Rx Freq", Field::number(0x0C, 4)),
    def("Tx Freq", Field::number(0x10, 4)),
    def("Tx Power", Field::bitmask(0x14, 0x20, &[(0x00, "LOW"), (0x20, "HIGH")])),
    def("Rx only", Field::bitmask(0x19, 0x10, toggle!(0x10))),
    def("Alarm", Field::bitmask(0x14, 0x08, toggle!(0x08))),
    def("Prompt", Field::bitmask(0x14, 0x04, toggle!(0x04))),
    def("PCT", Field::bitmask(0x14, 0x02, &[(0x00, "PATCS"), (0x02, "OACSU")])),
    def("TS Rx", Field::bitmask(0x14, 0x01, &[(0x00, "TS1"), (0x01, "TS2")])),
    def("TS Tx", Field::bitmask(0x1D, 0x02, &[(0x00, "TS1"), (0x02, "TS2")])),
    def("RX CC", Field::masked(0x15, 0x0F)),
    def("TX CC", Field::masked_with(0x1D, 0xF0, Transform::Shift(4))),
    def("MSG Type", Field::bitmask(0x15, 0x10, &[(0x00, "UNCONFIRMED"), (0x10, "CONFIRMED")])),
    def(
        "TX Policy",
        Field::bitmask(0x15, 0xC0, &[(0x00, "IMPOLITE"), (0x40, "POLITE_TO_CC"), (0x80, "POLITE_TO_ALL")]),
    ),
    def("Group call list", Field::number(0x17, 1)),
    def("Scan List ID", Field::number(0x18, 1)),
    // Only the low byte of the contact index is mapped
    def("Default Contact ID", Field::number(0x1E, 1)),
    def(
        "EAS",
        Field::bitmask(0x19, 0x0F, &[(0x00, "OFF"), (0x01, "A1"), (0x02, "A2"), (0x03, "A3"), (0x04, "A4")]),
    ),
    def("Bandwidth", Field::bitmask(0x14, 0x10, &[(0x00, "12.5KHz"), (0x10, "25KHz")])),
    def(
        "Tone Type Tx",
        Field::bitmask(0x1A, 0x0C, &[(0x00, "OFF"), (0x04, "CTCSS"), (0x08, "DCS"), (0x0C, "DCS Invert")]),
    ),
    def("Tone Tx", Field::number(0x1C, 1)),
    def(
        "Tone Type Rx",
        Field::bitmask(0x1A, 0x03, &[(0x00, "OFF"), (0x01, "CTCSS"), (0x02, "DCS"), (0x03, "DCS Invert")]),
    ),
    def("Tone Rx", Field::number(0x1B, 1)),
    def("APRS Channel", Field::masked_with(0x1F, 0xF0, Transform::Shift(4))),
];

/// Forced-on timeslot flags; a clear bit means forced on
pub const TIMESLOT_FLAGS: &[FieldDef] = &[
    def("TS Rx ON", Field::bitmask(0x1D, 0x01, &[(0x00, "ON"), (0x01, "OFF")])),
    def("TS Tx ON", Field::bitmask(0x1D, 0x04, &[(0x00, "ON"), (0x04, "OFF")])),
];
