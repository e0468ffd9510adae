// Label sets used by the RT73 schema tables
// The strings are the document spelling; raw bit patterns live in `schemas`.

use crate::core::ToneKind;
use crate::label_enum;

label_enum! {
    pub enum OnOff {
        Off => "Off",
        On => "On",
    }
}

label_enum! {
    /// Upper-case spelling used by channel and APRS records
    pub enum Toggle {
        Off => "OFF",
        On => "ON",
    }
}

label_enum! {
    pub enum Language {
        Chinese => "Chinese",
        English => "English",
    }
}

label_enum! {
    pub enum ScanMode {
        CarrierOperated => "CO",
        TimeOperated => "TO",
        Search => "SE",
    }
}

label_enum! {
    pub enum EndTone {
        Hz55 => "55Hz",
        Deg120 => "120'",
        Deg180 => "180",
        Deg240 => "240",
    }
}

label_enum! {
    pub enum Backlight {
        Off => "Off",
        On => "On",
        Auto => "Auto",
    }
}

label_enum! {
    pub enum Keylock {
        Off => "Off",
        Auto => "Auto",
        Manual => "Manual",
        ManualAndAuto => "Manual & Auto",
    }
}

label_enum! {
    pub enum RoamingMode {
        Auto => "Auto",
        Manual => "Manual",
        StrongRssi => "Strong RSSI Priority",
    }
}

label_enum! {
    pub enum RecordSet {
        None => "None",
        Tx => "TX",
        Rx => "RX",
        TxRx => "TX/RX",
    }
}

label_enum! {
    pub enum Profile {
        Standard => "Standard",
        Silent => "Silent",
    }
}

label_enum! {
    pub enum CallHangUp {
        Silent => "Silent",
        PromptTone => "Prompt Tone",
    }
}

label_enum! {
    /// Seconds a preset key must be held
    pub enum LongPressDuration {
        S0_5 => "0.5",
        S1_0 => "1.0",
        S1_5 => "1.5",
        S2_0 => "2.0",
        S2_5 => "2.5",
        S3_0 => "3.0",
        S3_5 => "3.5",
        S4_0 => "4.0",
        S4_5 => "4.5",
        S5_0 => "5.0",
    }
}

label_enum! {
    pub enum ButtonFunction {
        Undefined => "UNDEFINED",
        HiLoPower => "HI_LO_POWER",
        BacklightToggle => "BACKLIGHT_TOGGLE",
        KeylockToggle => "KEYLOCK_TOGGLE",
        Vox => "VOX",
        ZoneSwitch => "ZONE_SWITCH",
        Scan => "SCAN",
        ScanModeToggle => "SCAN_MODE_TOGGLE",
        RepeaterTalkaround => "RPTR_TALKAROUND",
        EmergencyAlarm => "EMERGENCY_ALARM",
        EncryptionToggle => "ENCRYPTION_TOGGLE",
        Contacts => "CONTACTS",
        Sms => "SMS",
        RadioRevive => "RADIO_REVIVE",
        RadioDetection => "RADIO_DETECTION",
        RadioKill => "RADIO_KILL",
        RemoteMonitor => "REMOTE_MONITOR",
        Monitor => "MONITOR",
        PermanentMonitor => "PERMANENT_MONITOR",
        Toneburst1750 => "TONEBURST_1750HZ",
        GpsToggle => "GPS_TOGGLE",
        Menu => "MENU",
        DtmfToggle => "DTMF_TOGGLE",
        RoamToggle => "ROAM_TOGGLE",
        Up => "UP",
        Down => "DOWN",
        Back => "BACK",
        DqtQt => "DQT_QT",
        ABToggle => "A_B_TOGGLE",
        Vol => "VOL",
        Vfo => "VFO",
        PromiscuousMode => "PROMISCUOUS_MODE",
        DualWatchToggle => "DUAL_WATCH_TOGGLE",
    }
}

label_enum! {
    pub enum Beacon {
        FixedLocation => "FIXED_LOCATION",
        GpsLocation => "GPS_LOCATION",
    }
}

label_enum! {
    pub enum LatNS {
        North => "North",
        South => "South",
    }
}

label_enum! {
    pub enum LongEW {
        East => "East",
        West => "West",
    }
}

label_enum! {
    pub enum PowerLevel {
        Low => "LOW",
        High => "HIGH",
    }
}

label_enum! {
    pub enum CallType {
        Private => "PRIVATE",
        Group => "GROUP",
    }
}

label_enum! {
    pub enum ReportSlot {
        Current => "CURRENT",
        Ts1 => "TS1",
        Ts2 => "TS2",
    }
}

label_enum! {
    pub enum ContactType {
        Group => "Group",
        Private => "Private",
        AllCall => "All Call",
        NoAddressCall => "No-Address Call",
        RawData => "RawData",
        DefineData => "Define Data",
        SpData => "SPDATA",
    }
}

label_enum! {
    pub enum ScanTxMode {
        CurrentChannel => "Current Channel",
        LastOperated => "Last Operated Channel",
        Appointed => "Appointed Channel",
    }
}

label_enum! {
    pub enum ChannelType {
        Analog => "ANALOG",
        Digital => "DIGITAL",
        MixedTxAnalog => "D_A_TX_A",
        MixedTxDigital => "D_A_TX_D",
    }
}

label_enum! {
    pub enum Pct {
        Patcs => "PATCS",
        Oacsu => "OACSU",
    }
}

label_enum! {
    /// `On` is only representable on simplex channels
    pub enum Timeslot {
        Ts1 => "TS1",
        Ts2 => "TS2",
        On => "ON",
    }
}

label_enum! {
    pub enum MsgType {
        Unconfirmed => "UNCONFIRMED",
        Confirmed => "CONFIRMED",
    }
}

label_enum! {
    pub enum TxPolicy {
        Impolite => "IMPOLITE",
        PoliteToCc => "POLITE_TO_CC",
        PoliteToAll => "POLITE_TO_ALL",
    }
}

label_enum! {
    pub enum Eas {
        Off => "OFF",
        A1 => "A1",
        A2 => "A2",
        A3 => "A3",
        A4 => "A4",
    }
}

label_enum! {
    pub enum Bandwidth {
        Narrow => "12.5KHz",
        Wide => "25KHz",
    }
}

label_enum! {
    pub enum ToneType {
        Off => "OFF",
        Ctcss => "CTCSS",
        Dcs => "DCS",
        DcsInvert => "DCS Invert",
    }
}

impl ToneType {
    pub fn kind(&self) -> Option<ToneKind> {
        match self {
            ToneType::Off => Some(ToneKind::Off),
            ToneType::Ctcss => Some(ToneKind::Ctcss),
            ToneType::Dcs => Some(ToneKind::Dcs),
            ToneType::DcsInvert => Some(ToneKind::DcsInverted),
            ToneType::Unrecognized(_) => None,
        }
    }
}

impl From<ToneKind> for ToneType {
    fn from(kind: ToneKind) -> Self {
        match kind {
            ToneKind::Off => ToneType::Off,
            ToneKind::Ctcss => ToneType::Ctcss,
            ToneKind::Dcs => ToneType::Dcs,
            ToneKind::DcsInverted => ToneType::DcsInvert,
        }
    }
}
