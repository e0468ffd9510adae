// Strongly typed codeplug document
// Section structs are keyed by the same names as the schema tables, so the
// JSON form reads like the radio's own menus.

use super::labels::*;
use crate::core::Tone;
use crate::error::Result;
use crate::record_struct;
use serde::{Deserialize, Serialize};

record_struct! {
    pub struct DeviceInfo {
        "Factory Number" => factory_number: String,
        "Serial Number" => serial_number: String,
        "Model Number" => model_number: String,
        "FW Version" => fw_version: String,
        "Frequency range" => frequency_range: String,
        "Update date" => update_date: String,
        "Firmware ID" => firmware_id: String,
    }
}

record_struct! {
    pub struct BasicParameters {
        "Radio name" => radio_name: String,
        "DMR ID" => dmr_id: u32,
        "Language" => language: Language,
        "TimeoutTimer" => timeout_timer: u8,
        "Busy channel lockout" => busy_channel_lockout: OnOff,
        "VOX" => vox: OnOff,
        "VOX sensitivity" => vox_sensitivity: u8,
        "Scan mode" => scan_mode: ScanMode,
        "End tone types" => end_tone: EndTone,
        "Squelch A level" => squelch_a: u8,
        "Squelch B level" => squelch_b: u8,
        "Backlight" => backlight: Backlight,
        "Keylock" => keylock: Keylock,
        "Roaming" => roaming: OnOff,
        "Roaming mode" => roaming_mode: RoamingMode,
        "RSSI set" => rssi_set: i16,
        "Connect check timer" => connect_check_timer: u8,
        "Repeater check timer" => repeater_check_timer: u8,
        "Connect timer" => connect_timer: u8,
        "Record set" => record_set: RecordSet,
    }
}

record_struct! {
    /// Which entries the radio's menu shows
    pub struct CommonMenuParameters {
        "Contact list" => contact_list: OnOff,
        "New contact" => new_contact: OnOff,
        "Manual dial" => manual_dial: OnOff,
        "Ham contacts" => ham_contacts: OnOff,
        "Ham groups" => ham_groups: OnOff,
        "Radio check" => radio_check: OnOff,
        "Call alert" => call_alert: OnOff,
        "Radio monitor" => radio_monitor: OnOff,
        "Radio disable" => radio_disable: OnOff,
        "Radio enable" => radio_enable: OnOff,
        "SMS write" => sms_write: OnOff,
        "SMS quick msg" => sms_quick_msg: OnOff,
        "SMS inbox" => sms_inbox: OnOff,
        "SMS outbox" => sms_outbox: OnOff,
        "SMS drafts" => sms_drafts: OnOff,
        "Call log outgoing" => call_log_outgoing: OnOff,
        "Call log received" => call_log_received: OnOff,
        "Call log missed" => call_log_missed: OnOff,
        "Scan on/off" => scan: OnOff,
        "Scan list" => scan_list: OnOff,
        "Scan mode" => scan_mode: OnOff,
        "Roam on/off" => roam: OnOff,
        "Scan running on/off" => scan_running: OnOff,
        "Zone list on/off" => zone_list: OnOff,
        "Language" => language: OnOff,
        "Keylock" => keylock: OnOff,
        "Backlight" => backlight: OnOff,
        "LEDs" => leds: OnOff,
        "Display mode" => display_mode: OnOff,
        "Vox" => vox: OnOff,
        "Channel sw" => channel_switch: OnOff,
        "Factory reset" => factory_reset: OnOff,
        "Local repeat" => local_repeat: OnOff,
        "ToT" => tot: OnOff,
        "Power set" => power_set: OnOff,
        "Repeat set" => repeat_set: OnOff,
        "Sleep mode" => sleep_mode: OnOff,
        "Squelch level" => squelch_level: OnOff,
        "Wide/Narrow band" => bandwidth: OnOff,
        "Busy channel lockout" => busy_channel_lockout: OnOff,
        "Signalling" => signalling: OnOff,
        "End tone types" => end_tone: OnOff,
        "Enc level" => enc_level: OnOff,
        "Profiles" => profiles: OnOff,
        "Keytone" => keytone: OnOff,
        "Power tone" => power_tone: OnOff,
        "Msg tone" => msg_tone: OnOff,
        "Private call tone" => private_call_tone: OnOff,
        "Group call tone" => group_call_tone: OnOff,
        "Call tone" => call_tone: OnOff,
        "Power on tone" => power_on_tone: OnOff,
        "GPS" => gps: OnOff,
        "Torch" => torch: OnOff,
        "FM radio" => fm_radio: OnOff,
        "Time" => time: OnOff,
        "DTMF" => dtmf: OnOff,
        "Speaker handmic" => speaker_handmic: OnOff,
        "APRS" => aprs: OnOff,
        "Record set" => record_set: OnOff,
        "Record list" => record_list: OnOff,
        "Record clear" => record_clear: OnOff,
        "Record space" => record_space: OnOff,
        "Radio ID" => radio_id: OnOff,
        "RX group list" => rx_group_list: OnOff,
        "Channel contact" => channel_contact: OnOff,
        "Version" => version: OnOff,
        "VFO" => vfo: OnOff,
    }
}

record_struct! {
    pub struct PromptTone {
        "Profiles" => profile: Profile,
        "SMS Prompt" => sms_prompt: u8,
        "Private call Tone" => private_call_tone: u8,
        "Group call Tone" => group_call_tone: u8,
        "Key tone" => key_tone: OnOff,
        "Key tone vol" => key_tone_vol: u8,
        "Low bat alert tone" => low_bat_alert_tone: OnOff,
        "Low bat alert vol" => low_bat_alert_vol: u8,
        "Call hang up" => call_hang_up: CallHangUp,
        "Boot ringtone" => boot_ringtone: OnOff,
        "Roaming restart prompt" => roaming_restart_prompt: u8,
        "Repeater selected prompt" => repeater_selected_prompt: u8,
    }
}

record_struct! {
    pub struct Indicators {
        "All" => all: OnOff,
        "Tx" => tx: OnOff,
        "Rx" => rx: OnOff,
        "Scanning" => scanning: OnOff,
        "Low battery" => low_battery: OnOff,
    }
}

record_struct! {
    pub struct PresetButtons {
        "LongPressDuration" => long_press_duration: LongPressDuration,
        "P1 LongPress" => p1_long: ButtonFunction,
        "P1 ShortPress" => p1_short: ButtonFunction,
        "P2 LongPress" => p2_long: ButtonFunction,
        "P2 ShortPress" => p2_short: ButtonFunction,
        "P3 LongPress" => p3_long: ButtonFunction,
        "P3 ShortPress" => p3_short: ButtonFunction,
        "P4 LongPress" => p4_long: ButtonFunction,
        "P4 ShortPress" => p4_short: ButtonFunction,
        "P5 LongPress" => p5_long: ButtonFunction,
        "P5 ShortPress" => p5_short: ButtonFunction,
        "P6 LongPress" => p6_long: ButtonFunction,
        "P6 ShortPress" => p6_short: ButtonFunction,
        "P7 LongPress" => p7_long: ButtonFunction,
        "P7 ShortPress" => p7_short: ButtonFunction,
    }
}

record_struct! {
    pub struct MicGain {
        "Mic gain 1" => mic_gain_1: OnOff,
        "Mic gain 1 setting" => mic_gain_1_setting: u8,
        "Mic gain 2" => mic_gain_2: OnOff,
        "Mic gain 2 setting" => mic_gain_2_setting: u8,
    }
}

record_struct! {
    pub struct DmrService {
        "Remote monitor duration" => remote_monitor_duration: u16,
        "Remote monitor decode" => remote_monitor_decode: OnOff,
        "Remote kill decode" => remote_kill_decode: OnOff,
        "Radio detection decode" => radio_detection_decode: OnOff,
        "Radio revive decode" => radio_revive_decode: OnOff,
        "Call alert" => call_alert: OnOff,
        "Group call hang time" => group_call_hang_time: u16,
        "Private call hang time" => private_call_hang_time: u16,
        "Import delay" => import_delay: u16,
        "DTMF duration (on-time)" => dtmf_on_time: u16,
        "DTMF duration (off-time)" => dtmf_off_time: u16,
        "DTMF volume (local)" => dtmf_volume: u8,
        "DTMF On/off" => dtmf: OnOff,
        "GPS On/off" => gps: OnOff,
        "GPS Interval" => gps_interval: u8,
        "GPS Channel group ID" => gps_channel_group: u16,
        "GPS Channel channel ID" => gps_channel: u16,
    }
}

record_struct! {
    /// Digital channel used for APRS reports
    pub struct AprsDmrChannel {
        "Zone ID" => zone_id: u16,
        "Channel ID" => channel_id: u16,
        "Call Type" => call_type: CallType,
        "PTT" => ptt: Toggle,
        "Report Slot" => report_slot: ReportSlot,
        "APRS TG" => talkgroup: u32,
    }
}

record_struct! {
    pub struct Aprs {
        "Manual TX interval" => manual_tx_interval: u8,
        "Auto TX interval" => auto_tx_interval: u16,
        "Beacon" => beacon: Beacon,
        "LatNS" => lat_ns: LatNS,
        "Lat Degrees" => latitude: u32,
        "LongEW" => long_ew: LongEW,
        "Long Degrees" => longitude: u32,
        "AX25 TX Freq" => tx_freq: u32,
        "AX25 TX Power" => tx_power: PowerLevel,
        "AX25 QT/DQT" => tone: Tone,
        "AX25 APRS Tone" => aprs_tone: Toggle,
        "AX25 TX Delay" => tx_delay: u16,
        "AX25 Prewave time" => prewave_time: u16,
        "AX25 Your Callsign" => callsign: String,
        "AX25 Your SSID" => ssid: u8,
        "AX25 Dest Callsign" => dest_callsign: String,
        "AX25 Dest SSID" => dest_ssid: u8,
        "AX25 APRS Symbol Table" => symbol_table: u8,
        "AX25 APRS Map Icon" => map_icon: u8,
        "AX25 APRS Signal Path" => signal_path: String,
        "AX25 Your Sending Text" => sending_text: String,
    }
    nested {
        #[serde(rename = "DMR channels")]
        dmr_channels: Vec<AprsDmrChannel>,
    }
}

record_struct! {
    pub struct Contact {
        "ID" => id: u16,
        "Name" => name: String,
        "DMR ID" => dmr_id: u32,
        "Type" => contact_type: ContactType,
    }
}

/// One (zone, channel) entry of a scan list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanMember {
    #[serde(rename = "Group")]
    pub group: u16,
    #[serde(rename = "Channel")]
    pub channel: u16,
}

record_struct! {
    pub struct ScanList {
        "Name" => name: String,
        "Talkback" => talkback: OnOff,
        "Scan TX Mode" => tx_mode: ScanTxMode,
        "Appointed channel group ID" => appointed_group: u16,
        "Appointed channel channel ID" => appointed_channel: u16,
    }
    nested {
        #[serde(rename = "Selected channels")]
        members: Vec<ScanMember>,
    }
}

record_struct! {
    pub struct RxGroup {
        "Name" => name: String,
    }
    nested {
        #[serde(rename = "Contacts")]
        contacts: Vec<u16>,
    }
}

record_struct! {
    /// Channel as seen after tone and timeslot resolution
    pub struct Channel {
        "ID" => id: u16,
        "Type" => channel_type: ChannelType,
        "Name" => name: String,
        "Rx Freq" => rx_freq: u32,
        "Tx Freq" => tx_freq: u32,
        "Tx Power" => tx_power: PowerLevel,
        "Rx only" => rx_only: Toggle,
        "Alarm" => alarm: Toggle,
        "Prompt" => prompt: Toggle,
        "PCT" => pct: Pct,
        "TS Rx" => ts_rx: Timeslot,
        "TS Tx" => ts_tx: Timeslot,
        "RX CC" => rx_cc: u8,
        "TX CC" => tx_cc: u8,
        "MSG Type" => msg_type: MsgType,
        "TX Policy" => tx_policy: TxPolicy,
        "Group call list" => group_call_list: u8,
        "Scan List ID" => scan_list: u8,
        "Default Contact ID" => default_contact: u8,
        "EAS" => eas: Eas,
        "Bandwidth" => bandwidth: Bandwidth,
        "Tone Tx" => tone_tx: Tone,
        "Tone Rx" => tone_rx: Tone,
        "APRS Channel" => aprs_channel: u8,
    }
}

impl Channel {
    pub fn is_simplex(&self) -> bool {
        self.rx_freq == self.tx_freq
    }
}

record_struct! {
    pub struct Zone {
        "ID" => id: u16,
        "Name" => name: String,
    }
    nested {
        #[serde(rename = "Channels")]
        channels: Vec<Channel>,
    }
}

/// The whole decoded codeplug
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Codeplug {
    #[serde(rename = "Device info")]
    pub device_info: DeviceInfo,
    #[serde(rename = "Basic parameters")]
    pub basic: BasicParameters,
    #[serde(rename = "Common menu parameters")]
    pub common_menu: CommonMenuParameters,
    #[serde(rename = "Prompt Tone")]
    pub prompt_tone: PromptTone,
    #[serde(rename = "Indicators")]
    pub indicators: Indicators,
    #[serde(rename = "Preset buttons")]
    pub buttons: PresetButtons,
    #[serde(rename = "Mic gain")]
    pub mic_gain: MicGain,
    #[serde(rename = "APRS")]
    pub aprs: Aprs,
    #[serde(rename = "DMR Service")]
    pub dmr_service: DmrService,
    #[serde(rename = "Quick messages")]
    pub messages: Vec<String>,
    #[serde(rename = "Contacts")]
    pub contacts: Vec<Contact>,
    #[serde(rename = "Scan lists")]
    pub scan_lists: Vec<ScanList>,
    #[serde(rename = "RX groups")]
    pub rx_groups: Vec<RxGroup>,
    #[serde(rename = "Zones")]
    pub zones: Vec<Zone>,
}

impl Codeplug {
    /// Document of a factory-blank image: no contacts, zones or channels.
    ///
    /// `Default` gives zeroed numbers, some of which (VOX sensitivity, RSSI)
    /// have no stored form; start new documents from this instead.
    pub fn blank() -> Result<Self> {
        let layout = super::Layout::plan(super::Counts::default())?;
        let image = vec![0u8; layout.image_size];
        let mut diag = crate::diagnostics::Diagnostics::new(crate::diagnostics::Verbosity::Quiet);
        super::disassemble(&image, &mut diag)
    }

    pub fn channel_count(&self) -> usize {
        self.zones.iter().map(|z| z.channels.len()).sum()
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.zones.iter().flat_map(|z| z.channels.iter())
    }
}
