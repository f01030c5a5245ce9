use crate::error::Result;
use crate::p18::parser::{parse_int, parse_list, slice, Token};
use crate::p18::registry::QueryCommand;
use crate::p18::types::*;
use crate::p18::validator;
use crate::print::{Format, Item, Printable};

use enum_dispatch::enum_dispatch;
use log::{trace, warn};
use serde_json::Value as Json;

/// Selectable value lists keep at most this many entries.
pub const MAX_SELECTABLE_VALUES: usize = 32;

/// Longest identifier kept from a series number or parallel serial number.
pub const MAX_SERIAL_LEN: usize = 31;

const CPU_VERSION_LEN: usize = 5;

// {{{ field layouts
type Store<T> = fn(&mut T, &Token<'_>);

/// Where one positional token of a list response goes.
pub struct Field<T> {
    /// Documented width; a different width is logged, not rejected.
    pub width: usize,
    pub store: Store<T>,
}

/// Decoding rules of one comma separated response.
pub struct ListLayout<T: 'static> {
    pub name: &'static str,
    /// Number of tokens the device sends, `None` for open ended lists.
    pub expected: Option<usize>,
    pub fields: &'static [Field<T>],
    /// Receives tokens past the end of `fields`.
    pub rest: Option<Store<T>>,
}

macro_rules! fields {
    ($record:ty { $($width:literal => |$m:ident, $t:ident| $store:expr,)+ }) => {
        &[$(
            Field {
                width: $width,
                store: |$m: &mut $record, $t: &Token<'_>| {
                    $store;
                },
            },
        )+]
    };
}

/// Decodes `payload` into a fresh record following `layout`.
///
/// Never fails: missing tokens leave their fields at the default value.
pub fn decode_list<T: Default + 'static>(payload: &str, layout: &ListLayout<T>) -> T {
    let mut record = T::default();

    parse_list(payload, layout.expected, |token| match layout.fields.get(token.index) {
        Some(field) => {
            token.expect_width(layout.name, field.width);
            (field.store)(&mut record, &token);
        }
        None => {
            if let Some(rest) = layout.rest {
                rest(&mut record, &token);
            }
        }
    });

    record
} // }}}

// {{{ records
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProtocolId {
    pub id: i32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CurrentTime {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TotalGenerated {
    pub kwh: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct YearGenerated {
    pub kwh: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MonthGenerated {
    pub kwh: i64,
}

/// Unlike the other energy figures, the daily one is in Wh.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DayGenerated {
    pub wh: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SeriesNumber {
    pub length: i32,
    pub id: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CpuVersion {
    pub main_cpu_version: String,
    pub slave1_cpu_version: String,
    pub slave2_cpu_version: String,
}

/// Nameplate ratings and current settings.
///
/// Voltages, currents and frequencies are in tenths unless noted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RatedInformation {
    pub ac_input_rating_voltage: i32,
    pub ac_input_rating_current: i32,
    pub ac_output_rating_voltage: i32,
    pub ac_output_rating_freq: i32,
    pub ac_output_rating_current: i32,
    /// VA
    pub ac_output_rating_apparent_power: i32,
    /// W
    pub ac_output_rating_active_power: i32,
    pub battery_rating_voltage: i32,
    pub battery_recharge_voltage: i32,
    pub battery_redischarge_voltage: i32,
    pub battery_under_voltage: i32,
    pub battery_bulk_voltage: i32,
    pub battery_float_voltage: i32,
    pub battery_type: BatteryType,
    /// A
    pub max_ac_charging_current: i32,
    /// A
    pub max_charging_current: i32,
    pub input_voltage_range: InputVoltageRange,
    pub output_source_priority: OutputSourcePriority,
    pub charger_source_priority: ChargerSourcePriority,
    pub parallel_max_num: i32,
    pub machine_type: MachineType,
    pub topology: Topology,
    pub output_model_setting: OutputModelSetting,
    pub solar_power_priority: SolarPowerPriority,
    pub mppt: String,
}

/// Live readings. Voltages and frequencies are in tenths, temperatures
/// in °C, powers in W or VA.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GeneralStatus {
    pub grid_voltage: i32,
    pub grid_freq: i32,
    pub ac_output_voltage: i32,
    pub ac_output_freq: i32,
    pub ac_output_apparent_power: i32,
    pub ac_output_active_power: i32,
    pub output_load_percent: i32,
    pub battery_voltage: i32,
    pub battery_voltage_scc: i32,
    pub battery_voltage_scc2: i32,
    pub battery_discharge_current: i32,
    pub battery_charging_current: i32,
    pub battery_capacity: i32,
    pub inverter_heat_sink_temp: i32,
    pub mppt1_charger_temp: i32,
    pub mppt2_charger_temp: i32,
    pub pv1_input_power: i32,
    pub pv2_input_power: i32,
    pub pv1_input_voltage: i32,
    pub pv2_input_voltage: i32,
    pub settings_values_changed: bool,
    pub mppt1_charger_status: MpptChargerStatus,
    pub mppt2_charger_status: MpptChargerStatus,
    pub load_connected: bool,
    pub battery_power_direction: BatteryPowerDirection,
    pub dc_ac_power_direction: DcAcPowerDirection,
    pub line_power_direction: LinePowerDirection,
    pub local_parallel_id: i32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WorkingModeStatus {
    pub mode: WorkingMode,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FaultsWarnings {
    pub fault_code: i32,
    pub line_fail: bool,
    pub output_circuit_short: bool,
    pub inverter_over_temperature: bool,
    pub fan_lock: bool,
    pub battery_voltage_high: bool,
    pub battery_low: bool,
    pub battery_under: bool,
    pub over_load: bool,
    pub eeprom_fail: bool,
    pub power_limit: bool,
    pub pv1_voltage_high: bool,
    pub pv2_voltage_high: bool,
    pub mppt1_overload_warning: bool,
    pub mppt2_overload_warning: bool,
    pub battery_too_low_to_charge_for_scc1: bool,
    pub battery_too_low_to_charge_for_scc2: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FlagsStatuses {
    pub buzzer: bool,
    pub overload_bypass: bool,
    pub lcd_escape_to_default_page_after_1min_timeout: bool,
    pub overload_restart: bool,
    pub over_temp_restart: bool,
    pub backlight_on: bool,
    pub alarm_on_primary_source_interrupt: bool,
    pub fault_code_record: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Defaults {
    pub ac_output_voltage: i32,
    pub ac_output_freq: i32,
    pub ac_input_voltage_range: InputVoltageRange,
    pub battery_under_voltage: i32,
    pub charging_float_voltage: i32,
    pub charging_bulk_voltage: i32,
    pub battery_recharge_voltage: i32,
    pub battery_redischarge_voltage: i32,
    pub max_charging_current: i32,
    pub max_ac_charging_current: i32,
    pub battery_type: BatteryType,
    pub output_source_priority: OutputSourcePriority,
    pub charger_source_priority: ChargerSourcePriority,
    pub solar_power_priority: SolarPowerPriority,
    pub machine_type: MachineType,
    pub output_model_setting: OutputModelSetting,
    pub flag_buzzer: bool,
    pub flag_overload_restart: bool,
    pub flag_over_temp_restart: bool,
    pub flag_backlight_on: bool,
    pub flag_alarm_on_primary_source_interrupt: bool,
    pub flag_fault_code_record: bool,
    pub flag_overload_bypass: bool,
    pub flag_lcd_escape_to_default_page_after_1min_timeout: bool,
}

/// Amp values the device accepts for a charging current setting.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectableValues {
    pub amps: Vec<i32>,
}

impl SelectableValues {
    fn push(&mut self, token: &Token<'_>) {
        if self.amps.len() >= MAX_SELECTABLE_VALUES {
            warn!(
                "item {} ignored, only {} values are kept",
                token.index, MAX_SELECTABLE_VALUES
            );
            return;
        }
        self.amps.push(token.int());
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MaxChargingCurrentSelectableValues(pub SelectableValues);

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MaxAcChargingCurrentSelectableValues(pub SelectableValues);

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParallelRatedInformation {
    pub parallel_id_connection_status: ParallelConnectionStatus,
    pub serial_number_valid_length: i32,
    pub serial_number: String,
    pub charger_source_priority: ChargerSourcePriority,
    pub max_charging_current: i32,
    pub max_ac_charging_current: i32,
    pub output_model_setting: OutputModelSetting,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParallelGeneralStatus {
    pub parallel_id_connection_status: ParallelConnectionStatus,
    pub work_mode: WorkingMode,
    pub fault_code: i32,
    pub grid_voltage: i32,
    pub grid_freq: i32,
    pub ac_output_voltage: i32,
    pub ac_output_freq: i32,
    pub ac_output_apparent_power: i32,
    pub ac_output_active_power: i32,
    pub total_ac_output_apparent_power: i32,
    pub total_ac_output_active_power: i32,
    pub output_load_percent: i32,
    pub total_output_load_percent: i32,
    pub battery_voltage: i32,
    pub battery_discharge_current: i32,
    pub battery_charging_current: i32,
    pub total_battery_charging_current: i32,
    pub battery_capacity: i32,
    pub pv1_input_power: i32,
    pub pv2_input_power: i32,
    pub pv1_input_voltage: i32,
    pub pv2_input_voltage: i32,
    pub mppt1_charger_status: MpptChargerStatus,
    pub mppt2_charger_status: MpptChargerStatus,
    pub load_connected: bool,
    pub battery_power_direction: BatteryPowerDirection,
    pub dc_ac_power_direction: DcAcPowerDirection,
    pub line_power_direction: LinePowerDirection,
    /// °C; not every firmware sends it.
    pub max_temp: i32,
}

/// A daily window given as start and end `hh:mm`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TimeBucket {
    pub start_hour: i32,
    pub start_minute: i32,
    pub end_hour: i32,
    pub end_minute: i32,
}

impl TimeBucket {
    fn hour(token: &Token<'_>) -> i32 {
        parse_int(slice(token.value, 0, 2)) as i32
    }

    fn minute(token: &Token<'_>) -> i32 {
        parse_int(slice(token.value, 2, 2)) as i32
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AcChargeTimeBucket(pub TimeBucket);

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AcSupplyLoadTimeBucket(pub TimeBucket);
// }}}

// {{{ list layouts
const CPU_VERSION: ListLayout<CpuVersion> = ListLayout {
    name: "cpu_version",
    expected: Some(3),
    fields: fields!(CpuVersion {
        5 => |m, t| m.main_cpu_version = t.string(CPU_VERSION_LEN),
        5 => |m, t| m.slave1_cpu_version = t.string(CPU_VERSION_LEN),
        5 => |m, t| m.slave2_cpu_version = t.string(CPU_VERSION_LEN),
    }),
    rest: None,
};

const RATED_INFORMATION: ListLayout<RatedInformation> = ListLayout {
    name: "rated_information",
    expected: Some(25),
    fields: fields!(RatedInformation {
        4 => |m, t| m.ac_input_rating_voltage = t.int(),
        3 => |m, t| m.ac_input_rating_current = t.int(),
        4 => |m, t| m.ac_output_rating_voltage = t.int(),
        3 => |m, t| m.ac_output_rating_freq = t.int(),
        3 => |m, t| m.ac_output_rating_current = t.int(),
        4 => |m, t| m.ac_output_rating_apparent_power = t.int(),
        4 => |m, t| m.ac_output_rating_active_power = t.int(),
        3 => |m, t| m.battery_rating_voltage = t.int(),
        3 => |m, t| m.battery_recharge_voltage = t.int(),
        3 => |m, t| m.battery_redischarge_voltage = t.int(),
        3 => |m, t| m.battery_under_voltage = t.int(),
        3 => |m, t| m.battery_bulk_voltage = t.int(),
        3 => |m, t| m.battery_float_voltage = t.int(),
        1 => |m, t| m.battery_type = BatteryType::from_value(t.long()),
        2 => |m, t| m.max_ac_charging_current = t.int(),
        3 => |m, t| m.max_charging_current = t.int(),
        1 => |m, t| m.input_voltage_range = InputVoltageRange::from_value(t.long()),
        1 => |m, t| m.output_source_priority = OutputSourcePriority::from_value(t.long()),
        1 => |m, t| m.charger_source_priority = ChargerSourcePriority::from_value(t.long()),
        1 => |m, t| m.parallel_max_num = t.int(),
        1 => |m, t| m.machine_type = MachineType::from_value(t.long()),
        1 => |m, t| m.topology = Topology::from_value(t.long()),
        1 => |m, t| m.output_model_setting = OutputModelSetting::from_value(t.long()),
        1 => |m, t| m.solar_power_priority = SolarPowerPriority::from_value(t.long()),
        1 => |m, t| m.mppt = t.string(1),
    }),
    rest: None,
};

const GENERAL_STATUS: ListLayout<GeneralStatus> = ListLayout {
    name: "general_status",
    expected: Some(28),
    fields: fields!(GeneralStatus {
        4 => |m, t| m.grid_voltage = t.int(),
        3 => |m, t| m.grid_freq = t.int(),
        4 => |m, t| m.ac_output_voltage = t.int(),
        3 => |m, t| m.ac_output_freq = t.int(),
        4 => |m, t| m.ac_output_apparent_power = t.int(),
        4 => |m, t| m.ac_output_active_power = t.int(),
        3 => |m, t| m.output_load_percent = t.int(),
        3 => |m, t| m.battery_voltage = t.int(),
        3 => |m, t| m.battery_voltage_scc = t.int(),
        3 => |m, t| m.battery_voltage_scc2 = t.int(),
        3 => |m, t| m.battery_discharge_current = t.int(),
        3 => |m, t| m.battery_charging_current = t.int(),
        3 => |m, t| m.battery_capacity = t.int(),
        3 => |m, t| m.inverter_heat_sink_temp = t.int(),
        3 => |m, t| m.mppt1_charger_temp = t.int(),
        3 => |m, t| m.mppt2_charger_temp = t.int(),
        4 => |m, t| m.pv1_input_power = t.int(),
        4 => |m, t| m.pv2_input_power = t.int(),
        4 => |m, t| m.pv1_input_voltage = t.int(),
        4 => |m, t| m.pv2_input_voltage = t.int(),
        1 => |m, t| m.settings_values_changed = t.is_one(),
        1 => |m, t| m.mppt1_charger_status = MpptChargerStatus::from_value(t.long()),
        1 => |m, t| m.mppt2_charger_status = MpptChargerStatus::from_value(t.long()),
        1 => |m, t| m.load_connected = t.is_one(),
        1 => |m, t| m.battery_power_direction = BatteryPowerDirection::from_value(t.long()),
        1 => |m, t| m.dc_ac_power_direction = DcAcPowerDirection::from_value(t.long()),
        1 => |m, t| m.line_power_direction = LinePowerDirection::from_value(t.long()),
        1 => |m, t| m.local_parallel_id = t.int(),
    }),
    rest: None,
};

const FAULTS_WARNINGS: ListLayout<FaultsWarnings> = ListLayout {
    name: "faults_warnings",
    expected: Some(17),
    fields: fields!(FaultsWarnings {
        2 => |m, t| m.fault_code = t.int(),
        1 => |m, t| m.line_fail = t.is_positive(),
        1 => |m, t| m.output_circuit_short = t.is_positive(),
        1 => |m, t| m.inverter_over_temperature = t.is_positive(),
        1 => |m, t| m.fan_lock = t.is_positive(),
        1 => |m, t| m.battery_voltage_high = t.is_positive(),
        1 => |m, t| m.battery_low = t.is_positive(),
        1 => |m, t| m.battery_under = t.is_positive(),
        1 => |m, t| m.over_load = t.is_positive(),
        1 => |m, t| m.eeprom_fail = t.is_positive(),
        1 => |m, t| m.power_limit = t.is_positive(),
        1 => |m, t| m.pv1_voltage_high = t.is_positive(),
        1 => |m, t| m.pv2_voltage_high = t.is_positive(),
        1 => |m, t| m.mppt1_overload_warning = t.is_positive(),
        1 => |m, t| m.mppt2_overload_warning = t.is_positive(),
        1 => |m, t| m.battery_too_low_to_charge_for_scc1 = t.is_positive(),
        1 => |m, t| m.battery_too_low_to_charge_for_scc2 = t.is_positive(),
    }),
    rest: None,
};

const FLAGS_STATUSES: ListLayout<FlagsStatuses> = ListLayout {
    name: "flags_statuses",
    expected: Some(9),
    fields: fields!(FlagsStatuses {
        1 => |m, t| m.buzzer = t.is_positive(),
        1 => |m, t| m.overload_bypass = t.is_positive(),
        1 => |m, t| m.lcd_escape_to_default_page_after_1min_timeout = t.is_positive(),
        1 => |m, t| m.overload_restart = t.is_positive(),
        1 => |m, t| m.over_temp_restart = t.is_positive(),
        1 => |m, t| m.backlight_on = t.is_positive(),
        1 => |m, t| m.alarm_on_primary_source_interrupt = t.is_positive(),
        1 => |m, t| m.fault_code_record = t.is_positive(),
        // reserved
        1 => |_m, _t| (),
    }),
    rest: None,
};

const DEFAULTS: ListLayout<Defaults> = ListLayout {
    name: "defaults",
    expected: Some(24),
    fields: fields!(Defaults {
        4 => |m, t| m.ac_output_voltage = t.int(),
        3 => |m, t| m.ac_output_freq = t.int(),
        1 => |m, t| m.ac_input_voltage_range = InputVoltageRange::from_value(t.long()),
        3 => |m, t| m.battery_under_voltage = t.int(),
        3 => |m, t| m.charging_float_voltage = t.int(),
        3 => |m, t| m.charging_bulk_voltage = t.int(),
        3 => |m, t| m.battery_recharge_voltage = t.int(),
        3 => |m, t| m.battery_redischarge_voltage = t.int(),
        3 => |m, t| m.max_charging_current = t.int(),
        2 => |m, t| m.max_ac_charging_current = t.int(),
        1 => |m, t| m.battery_type = BatteryType::from_value(t.long()),
        1 => |m, t| m.output_source_priority = OutputSourcePriority::from_value(t.long()),
        1 => |m, t| m.charger_source_priority = ChargerSourcePriority::from_value(t.long()),
        1 => |m, t| m.solar_power_priority = SolarPowerPriority::from_value(t.long()),
        1 => |m, t| m.machine_type = MachineType::from_value(t.long()),
        1 => |m, t| m.output_model_setting = OutputModelSetting::from_value(t.long()),
        1 => |m, t| m.flag_buzzer = t.is_positive(),
        1 => |m, t| m.flag_overload_restart = t.is_positive(),
        1 => |m, t| m.flag_over_temp_restart = t.is_positive(),
        1 => |m, t| m.flag_backlight_on = t.is_positive(),
        1 => |m, t| m.flag_alarm_on_primary_source_interrupt = t.is_positive(),
        1 => |m, t| m.flag_fault_code_record = t.is_positive(),
        1 => |m, t| m.flag_overload_bypass = t.is_positive(),
        1 => |m, t| m.flag_lcd_escape_to_default_page_after_1min_timeout = t.is_positive(),
    }),
    rest: None,
};

const SELECTABLE_VALUES: ListLayout<SelectableValues> = ListLayout {
    name: "selectable_values",
    expected: None,
    fields: &[],
    rest: Some(|m: &mut SelectableValues, t: &Token<'_>| m.push(t)),
};

const PARALLEL_RATED_INFORMATION: ListLayout<ParallelRatedInformation> = ListLayout {
    name: "parallel_rated_information",
    expected: Some(7),
    fields: fields!(ParallelRatedInformation {
        1 => |m, t| m.parallel_id_connection_status = ParallelConnectionStatus::from_value(t.long()),
        2 => |m, t| m.serial_number_valid_length = t.int(),
        20 => |m, t| {
            let valid = usize::try_from(m.serial_number_valid_length).unwrap_or(0);
            m.serial_number = t.string(valid.min(MAX_SERIAL_LEN))
        },
        1 => |m, t| m.charger_source_priority = ChargerSourcePriority::from_value(t.long()),
        3 => |m, t| m.max_charging_current = t.int(),
        2 => |m, t| m.max_ac_charging_current = t.int(),
        1 => |m, t| m.output_model_setting = OutputModelSetting::from_value(t.long()),
    }),
    rest: None,
};

const PARALLEL_GENERAL_STATUS: ListLayout<ParallelGeneralStatus> = ListLayout {
    name: "parallel_general_status",
    expected: Some(29),
    fields: fields!(ParallelGeneralStatus {
        1 => |m, t| m.parallel_id_connection_status = ParallelConnectionStatus::from_value(t.long()),
        1 => |m, t| m.work_mode = WorkingMode::from_value(t.long()),
        2 => |m, t| m.fault_code = t.int(),
        4 => |m, t| m.grid_voltage = t.int(),
        3 => |m, t| m.grid_freq = t.int(),
        4 => |m, t| m.ac_output_voltage = t.int(),
        3 => |m, t| m.ac_output_freq = t.int(),
        4 => |m, t| m.ac_output_apparent_power = t.int(),
        4 => |m, t| m.ac_output_active_power = t.int(),
        5 => |m, t| m.total_ac_output_apparent_power = t.int(),
        5 => |m, t| m.total_ac_output_active_power = t.int(),
        3 => |m, t| m.output_load_percent = t.int(),
        3 => |m, t| m.total_output_load_percent = t.int(),
        3 => |m, t| m.battery_voltage = t.int(),
        3 => |m, t| m.battery_discharge_current = t.int(),
        3 => |m, t| m.battery_charging_current = t.int(),
        3 => |m, t| m.total_battery_charging_current = t.int(),
        3 => |m, t| m.battery_capacity = t.int(),
        4 => |m, t| m.pv1_input_power = t.int(),
        4 => |m, t| m.pv2_input_power = t.int(),
        4 => |m, t| m.pv1_input_voltage = t.int(),
        4 => |m, t| m.pv2_input_voltage = t.int(),
        1 => |m, t| m.mppt1_charger_status = MpptChargerStatus::from_value(t.long()),
        1 => |m, t| m.mppt2_charger_status = MpptChargerStatus::from_value(t.long()),
        1 => |m, t| m.load_connected = t.is_one(),
        1 => |m, t| m.battery_power_direction = BatteryPowerDirection::from_value(t.long()),
        1 => |m, t| m.dc_ac_power_direction = DcAcPowerDirection::from_value(t.long()),
        1 => |m, t| m.line_power_direction = LinePowerDirection::from_value(t.long()),
        3 => |m, t| m.max_temp = t.int(),
    }),
    rest: None,
};

const TIME_BUCKET: ListLayout<TimeBucket> = ListLayout {
    name: "time_bucket",
    expected: Some(2),
    fields: fields!(TimeBucket {
        4 => |m, t| {
            m.start_hour = TimeBucket::hour(t);
            m.start_minute = TimeBucket::minute(t)
        },
        4 => |m, t| {
            m.end_hour = TimeBucket::hour(t);
            m.end_minute = TimeBucket::minute(t)
        },
    }),
    rest: None,
};
// }}}

// {{{ Response
/// A decoded query response.
#[enum_dispatch(Printable)]
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    ProtocolId(ProtocolId),
    CurrentTime(CurrentTime),
    TotalGenerated(TotalGenerated),
    YearGenerated(YearGenerated),
    MonthGenerated(MonthGenerated),
    DayGenerated(DayGenerated),
    SeriesNumber(SeriesNumber),
    CpuVersion(CpuVersion),
    RatedInformation(RatedInformation),
    GeneralStatus(GeneralStatus),
    WorkingMode(WorkingModeStatus),
    FaultsWarnings(FaultsWarnings),
    FlagsStatuses(FlagsStatuses),
    Defaults(Defaults),
    MaxChargingCurrentSelectableValues(MaxChargingCurrentSelectableValues),
    MaxAcChargingCurrentSelectableValues(MaxAcChargingCurrentSelectableValues),
    ParallelRatedInformation(ParallelRatedInformation),
    ParallelGeneralStatus(ParallelGeneralStatus),
    AcChargeTimeBucket(AcChargeTimeBucket),
    AcSupplyLoadTimeBucket(AcSupplyLoadTimeBucket),
}

/// Decodes the payload of a response to `query`.
///
/// Decoding is best effort and never fails; framing problems are caught
/// earlier by [`validator::validate_query`].
pub fn decode(query: QueryCommand, payload: &str) -> Response {
    trace!("decoding {:?} from {:?}", query, payload);

    match query {
        QueryCommand::ProtocolId => Response::ProtocolId(ProtocolId {
            id: leading(payload, 0, 2),
        }),
        QueryCommand::CurrentTime => Response::CurrentTime(CurrentTime {
            year: leading(payload, 0, 4),
            month: leading(payload, 4, 2),
            day: leading(payload, 6, 2),
            hour: leading(payload, 8, 2),
            minute: leading(payload, 10, 2),
            second: leading(payload, 12, 2),
        }),
        QueryCommand::TotalGenerated => Response::TotalGenerated(TotalGenerated {
            kwh: generated(payload),
        }),
        QueryCommand::YearGenerated => Response::YearGenerated(YearGenerated {
            kwh: generated(payload),
        }),
        QueryCommand::MonthGenerated => Response::MonthGenerated(MonthGenerated {
            kwh: generated(payload),
        }),
        QueryCommand::DayGenerated => Response::DayGenerated(DayGenerated {
            wh: generated(payload),
        }),
        QueryCommand::SeriesNumber => {
            let length = leading(payload, 0, 2);
            let id_len = usize::try_from(length).unwrap_or(0).min(MAX_SERIAL_LEN);
            Response::SeriesNumber(SeriesNumber {
                length,
                id: slice(payload, 2, id_len).to_string(),
            })
        }
        QueryCommand::CpuVersion => Response::CpuVersion(decode_list(payload, &CPU_VERSION)),
        QueryCommand::RatedInformation => {
            Response::RatedInformation(decode_list(payload, &RATED_INFORMATION))
        }
        QueryCommand::GeneralStatus => {
            Response::GeneralStatus(decode_list(payload, &GENERAL_STATUS))
        }
        QueryCommand::WorkingMode => Response::WorkingMode(WorkingModeStatus {
            mode: WorkingMode::from_value(i64::from(leading(payload, 0, 2))),
        }),
        QueryCommand::FaultsWarnings => {
            Response::FaultsWarnings(decode_list(payload, &FAULTS_WARNINGS))
        }
        QueryCommand::FlagsStatuses => {
            Response::FlagsStatuses(decode_list(payload, &FLAGS_STATUSES))
        }
        QueryCommand::Defaults => Response::Defaults(decode_list(payload, &DEFAULTS)),
        QueryCommand::MaxChargingCurrentSelectableValues => {
            Response::MaxChargingCurrentSelectableValues(MaxChargingCurrentSelectableValues(
                decode_list(payload, &SELECTABLE_VALUES),
            ))
        }
        QueryCommand::MaxAcChargingCurrentSelectableValues => {
            Response::MaxAcChargingCurrentSelectableValues(MaxAcChargingCurrentSelectableValues(
                decode_list(payload, &SELECTABLE_VALUES),
            ))
        }
        QueryCommand::ParallelRatedInformation => {
            Response::ParallelRatedInformation(decode_list(payload, &PARALLEL_RATED_INFORMATION))
        }
        QueryCommand::ParallelGeneralStatus => {
            Response::ParallelGeneralStatus(decode_list(payload, &PARALLEL_GENERAL_STATUS))
        }
        QueryCommand::AcChargeTimeBucket => {
            Response::AcChargeTimeBucket(AcChargeTimeBucket(decode_list(payload, &TIME_BUCKET)))
        }
        QueryCommand::AcSupplyLoadTimeBucket => Response::AcSupplyLoadTimeBucket(
            AcSupplyLoadTimeBucket(decode_list(payload, &TIME_BUCKET)),
        ),
    }
}

/// Validates a raw query response frame and decodes its payload.
///
/// `size` is the number of bytes the frame took on the wire.
pub fn decode_frame(query: QueryCommand, buf: &[u8], size: usize) -> Result<Response> {
    let range = validator::validate_query(buf, size)?;
    let payload = validator::payload(buf, range);
    Ok(decode(query, &payload))
} // }}}

fn leading(payload: &str, start: usize, len: usize) -> i32 {
    let n = parse_int(slice(payload, start, len));
    n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn generated(payload: &str) -> i64 {
    parse_int(slice(payload, 0, 8))
}
