use crate::p18::messages::*;
use crate::p18::registry::QueryCommand;
use crate::p18::types::FaultCodeString;

use enum_dispatch::enum_dispatch;
use serde::Deserialize;
use serde_json::{json, Map, Value as Json};

// {{{ Format
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// Aligned `Title: value unit` lines
    #[default]
    Table,
    /// `key value unit` lines for scripts
    ParsableTable,
    Json,
    /// JSON with `[value, "unit"]` pairs
    #[serde(rename = "json-w-units")]
    #[value(name = "json-w-units")]
    JsonWithUnits,
}

impl Format {
    pub fn is_json(self) -> bool {
        matches!(self, Format::Json | Format::JsonWithUnits)
    }

    pub fn is_table(self) -> bool {
        !self.is_json()
    }
} // }}}

// {{{ Unit
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Unit {
    V,
    A,
    Wh,
    KWh,
    VA,
    Hz,
    Percentage,
    Celsius,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::V => " V",
            Unit::A => " A",
            Unit::Wh => " Wh",
            Unit::KWh => " kWh",
            Unit::VA => " VA",
            Unit::Hz => " Hz",
            Unit::Percentage => "%",
            Unit::Celsius => " °C",
        }
    }
} // }}}

// {{{ Value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A reading and the number of decimals to show.
    Double(f64, usize),
    Long(i64),
    /// Yes/No
    Bool(bool),
    /// Enabled/Disabled
    Flag(bool),
    Str(String),
}

impl Value {
    /// A reading sent in tenths.
    pub fn tenths(raw: i32) -> Self {
        Value::Double(f64::from(raw) / 10.0, 1)
    }

    pub fn long(raw: impl Into<i64>) -> Self {
        Value::Long(raw.into())
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    fn text(&self, parsable: bool) -> String {
        match self {
            Value::Double(v, precision) => format!("{:.*}", precision, v),
            Value::Long(v) => v.to_string(),
            Value::Str(s) if parsable && s.find(' ').is_some_and(|pos| pos > 0) => {
                format!("\"{}\"", s)
            }
            Value::Str(s) => s.clone(),
            Value::Bool(b) => (if *b { "Yes" } else { "No" }).to_string(),
            Value::Flag(b) => (if *b { "Enabled" } else { "Disabled" }).to_string(),
        }
    }

    fn json(&self) -> Json {
        match self {
            Value::Double(v, precision) => {
                let scale = 10f64.powi(*precision as i32);
                json!((v * scale).round() / scale)
            }
            Value::Long(v) => json!(v),
            Value::Bool(b) | Value::Flag(b) => json!(b),
            Value::Str(s) => json!(s),
        }
    }
} // }}}

// {{{ Item
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub key: &'static str,
    pub title: &'static str,
    pub value: Value,
    pub unit: Option<Unit>,
}

impl Item {
    pub fn new(key: &'static str, title: &'static str, value: Value) -> Self {
        Self {
            key,
            title,
            value,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }
} // }}}

// {{{ rendering
pub fn render_items(items: &[Item], format: Format) -> String {
    match format {
        Format::Table => render_table(items, false),
        Format::ParsableTable => render_table(items, true),
        Format::Json => items_to_json(items, false).to_string(),
        Format::JsonWithUnits => items_to_json(items, true).to_string(),
    }
}

fn render_table(items: &[Item], parsable: bool) -> String {
    let width = items
        .iter()
        .map(|item| item.title.chars().count() + 1)
        .max()
        .unwrap_or(0);

    items
        .iter()
        .map(|item| {
            let value = item.value.text(parsable);
            let mut line = if parsable {
                format!("{} {}", item.key, value)
            } else {
                format!("{:<width$} {}", format!("{}:", item.title), value, width = width)
            };

            if let Some(unit) = item.unit {
                let label = unit.label();
                if parsable && !label.starts_with(' ') {
                    line.push(' ');
                }
                line.push_str(label);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn items_to_json(items: &[Item], with_units: bool) -> Json {
    let mut object = Map::new();
    for item in items {
        let value = match item.unit {
            Some(unit) if with_units => json!([item.value.json(), unit.label().trim_start()]),
            _ => item.value.json(),
        };
        object.insert(item.key.to_string(), value);
    }
    Json::Object(object)
}

/// Outcome line of a set command.
pub fn render_set_result(success: bool, format: Format) -> String {
    match (format.is_json(), success) {
        (false, true) => "OK".to_string(),
        (false, false) => "Failure".to_string(),
        (true, true) => json!({ "ok": 1 }).to_string(),
        (true, false) => json!({ "error": "failure" }).to_string(),
    }
}

/// Error report on stdout; only JSON consumers get one.
pub fn render_error(message: &str, format: Format) -> Option<String> {
    format
        .is_json()
        .then(|| json!({ "error": message }).to_string())
}

/// Several query results at once, as produced by `dump`.
pub fn render_dump(results: &[(QueryCommand, Response)], format: Format) -> String {
    if format.is_json() {
        let with_units = format == Format::JsonWithUnits;
        let object: Map<String, Json> = results
            .iter()
            .map(|(query, response)| (query.name().to_string(), response.to_json(with_units)))
            .collect();
        return Json::Object(object).to_string();
    }

    results
        .iter()
        .map(|(query, response)| format!("[{}]\n{}", query.name(), response.render(format)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_list(amps: &[i32], format: Format) -> String {
    if format.is_json() {
        json!(amps).to_string()
    } else {
        amps.iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
} // }}}

// {{{ Printable
/// Anything that can be shown as a list of labelled items.
#[enum_dispatch]
pub trait Printable {
    fn items(&self) -> Vec<Item>;

    fn render(&self, format: Format) -> String {
        render_items(&self.items(), format)
    }

    fn to_json(&self, with_units: bool) -> Json {
        items_to_json(&self.items(), with_units)
    }
}

fn fault_code(code: i32) -> Value {
    Value::str(FaultCodeString::from_value(i64::from(code)))
}

fn time_of_day(hour: i32, minute: i32) -> Value {
    Value::Str(format!("{:02}:{:02}", hour, minute))
}

fn connection(connected: bool) -> Value {
    Value::str(if connected { "Connected" } else { "Disconnected" })
}

impl Printable for ProtocolId {
    fn items(&self) -> Vec<Item> {
        vec![Item::new("id", "Protocol ID", Value::long(self.id))]
    }
}

impl Printable for CurrentTime {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("year", "Year", Value::long(self.year)),
            Item::new("month", "Month", Value::long(self.month)),
            Item::new("day", "Day", Value::long(self.day)),
            Item::new("hour", "Hour", Value::long(self.hour)),
            Item::new("minute", "Minute", Value::long(self.minute)),
            Item::new("second", "Second", Value::long(self.second)),
        ]
    }
}

impl Printable for TotalGenerated {
    fn items(&self) -> Vec<Item> {
        vec![Item::new("kwh", "kWh", Value::long(self.kwh))]
    }
}

impl Printable for YearGenerated {
    fn items(&self) -> Vec<Item> {
        vec![Item::new("kwh", "kWh", Value::long(self.kwh))]
    }
}

impl Printable for MonthGenerated {
    fn items(&self) -> Vec<Item> {
        vec![Item::new("kwh", "kWh", Value::long(self.kwh))]
    }
}

impl Printable for DayGenerated {
    fn items(&self) -> Vec<Item> {
        vec![Item::new("wh", "Wh", Value::long(self.wh))]
    }
}

impl Printable for SeriesNumber {
    fn items(&self) -> Vec<Item> {
        vec![Item::new("sn", "Series number", Value::str(&self.id))]
    }
}

impl Printable for CpuVersion {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("main_v", "Main CPU version", Value::str(&self.main_cpu_version)),
            Item::new("slave1_v", "Slave 1 CPU version", Value::str(&self.slave1_cpu_version)),
            Item::new("slave2_v", "Slave 2 CPU version", Value::str(&self.slave2_cpu_version)),
        ]
    }
}

impl Printable for RatedInformation {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("ac_input_rating_voltage", "AC input rating voltage", Value::tenths(self.ac_input_rating_voltage)).with_unit(Unit::V),
            Item::new("ac_input_rating_current", "AC input rating current", Value::tenths(self.ac_input_rating_current)).with_unit(Unit::A),
            Item::new("ac_output_rating_voltage", "AC output rating voltage", Value::tenths(self.ac_output_rating_voltage)).with_unit(Unit::V),
            Item::new("ac_output_rating_freq", "AC output rating frequency", Value::tenths(self.ac_output_rating_freq)).with_unit(Unit::Hz),
            Item::new("ac_output_rating_current", "AC output rating current", Value::tenths(self.ac_output_rating_current)).with_unit(Unit::A),
            Item::new("ac_output_rating_apparent_power", "AC output rating apparent power", Value::long(self.ac_output_rating_apparent_power)).with_unit(Unit::VA),
            Item::new("ac_output_rating_active_power", "AC output rating active power", Value::long(self.ac_output_rating_active_power)).with_unit(Unit::Wh),
            Item::new("battery_rating_voltage", "Battery rating voltage", Value::tenths(self.battery_rating_voltage)).with_unit(Unit::V),
            Item::new("battery_recharge_voltage", "Battery re-charge voltage", Value::tenths(self.battery_recharge_voltage)).with_unit(Unit::V),
            Item::new("battery_redischarge_voltage", "Battery re-discharge voltage", Value::tenths(self.battery_redischarge_voltage)).with_unit(Unit::V),
            Item::new("battery_under_voltage", "Battery under voltage", Value::tenths(self.battery_under_voltage)).with_unit(Unit::V),
            Item::new("battery_bulk_voltage", "Battery bulk voltage", Value::tenths(self.battery_bulk_voltage)).with_unit(Unit::V),
            Item::new("battery_float_voltage", "Battery float voltage", Value::tenths(self.battery_float_voltage)).with_unit(Unit::V),
            Item::new("battery_type", "Battery type", Value::str(self.battery_type.label())),
            Item::new("max_charging_current", "Max charging current", Value::long(self.max_charging_current)).with_unit(Unit::A),
            Item::new("max_ac_charging_current", "Max AC charging current", Value::long(self.max_ac_charging_current)).with_unit(Unit::A),
            Item::new("input_voltage_range", "Input voltage range", Value::str(self.input_voltage_range.label())),
            Item::new("output_source_priority", "Output source priority", Value::str(self.output_source_priority.label())),
            Item::new("charger_source_priority", "Charger source priority", Value::str(self.charger_source_priority.label())),
            Item::new("parallel_max_num", "Parallel max num", Value::long(self.parallel_max_num)),
            Item::new("machine_type", "Machine type", Value::str(self.machine_type.label())),
            Item::new("topology", "Topology", Value::str(self.topology.label())),
            Item::new("output_model_setting", "Output model setting", Value::str(self.output_model_setting.label())),
            Item::new("solar_power_priority", "Solar power priority", Value::str(self.solar_power_priority.label())),
            Item::new("mppt", "MPPT string", Value::str(&self.mppt)),
        ]
    }
}

impl Printable for GeneralStatus {
    fn items(&self) -> Vec<Item> {
        let changed = if self.settings_values_changed {
            "Something changed"
        } else {
            "Nothing changed"
        };

        vec![
            Item::new("grid_voltage", "Grid voltage", Value::tenths(self.grid_voltage)).with_unit(Unit::V),
            Item::new("grid_freq", "Grid frequency", Value::tenths(self.grid_freq)).with_unit(Unit::Hz),
            Item::new("ac_output_voltage", "AC output voltage", Value::tenths(self.ac_output_voltage)).with_unit(Unit::V),
            Item::new("ac_output_freq", "AC output frequency", Value::tenths(self.ac_output_freq)).with_unit(Unit::Hz),
            Item::new("ac_output_apparent_power", "AC output apparent power", Value::long(self.ac_output_apparent_power)).with_unit(Unit::VA),
            Item::new("ac_output_active_power", "AC output active power", Value::long(self.ac_output_active_power)).with_unit(Unit::Wh),
            Item::new("output_load_percent", "Output load percent", Value::long(self.output_load_percent)).with_unit(Unit::Percentage),
            Item::new("battery_voltage", "Battery voltage", Value::tenths(self.battery_voltage)).with_unit(Unit::V),
            Item::new("battery_voltage_scc", "Battery voltage from SCC", Value::tenths(self.battery_voltage_scc)).with_unit(Unit::V),
            Item::new("battery_voltage_scc2", "Battery voltage from SCC2", Value::tenths(self.battery_voltage_scc2)).with_unit(Unit::V),
            Item::new("battery_discharge_current", "Battery discharge current", Value::long(self.battery_discharge_current)).with_unit(Unit::A),
            Item::new("battery_charging_current", "Battery charging current", Value::long(self.battery_charging_current)).with_unit(Unit::A),
            Item::new("battery_capacity", "Battery capacity", Value::long(self.battery_capacity)).with_unit(Unit::Percentage),
            Item::new("inverter_heat_sink_temp", "Inverter heat sink temperature", Value::long(self.inverter_heat_sink_temp)).with_unit(Unit::Celsius),
            Item::new("mppt1_charger_temp", "MPPT1 charger temperature", Value::long(self.mppt1_charger_temp)).with_unit(Unit::Celsius),
            Item::new("mppt2_charger_temp", "MPPT2 charger temperature", Value::long(self.mppt2_charger_temp)).with_unit(Unit::Celsius),
            Item::new("pv1_input_power", "PV1 Input power", Value::Double(f64::from(self.pv1_input_power), 2)).with_unit(Unit::Wh),
            Item::new("pv2_input_power", "PV2 Input power", Value::Double(f64::from(self.pv2_input_power), 2)).with_unit(Unit::Wh),
            Item::new("pv1_input_voltage", "PV1 Input voltage", Value::tenths(self.pv1_input_voltage)).with_unit(Unit::V),
            Item::new("pv2_input_voltage", "PV2 Input voltage", Value::tenths(self.pv2_input_voltage)).with_unit(Unit::V),
            Item::new("settings_values_changed", "Setting value configuration state", Value::str(changed)),
            Item::new("mppt1_charger_status", "MPPT1 charger status", Value::str(self.mppt1_charger_status.label())),
            Item::new("mppt2_charger_status", "MPPT2 charger status", Value::str(self.mppt2_charger_status.label())),
            Item::new("load_connected", "Load connection", connection(self.load_connected)),
            Item::new("battery_power_direction", "Battery power direction", Value::str(self.battery_power_direction.label())),
            Item::new("dc_ac_power_direction", "DC/AC power direction", Value::str(self.dc_ac_power_direction.label())),
            Item::new("line_power_direction", "Line power direction", Value::str(self.line_power_direction.label())),
            Item::new("local_parallel_id", "Local parallel ID", Value::long(self.local_parallel_id)),
        ]
    }
}

impl Printable for WorkingModeStatus {
    fn items(&self) -> Vec<Item> {
        vec![Item::new("mode", "Working mode", Value::str(self.mode.label()))]
    }
}

impl Printable for FaultsWarnings {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("fault_code", "Fault code", fault_code(self.fault_code)),
            Item::new("line_fail", "Line fail", Value::Bool(self.line_fail)),
            Item::new("output_circuit_short", "Output circuit short", Value::Bool(self.output_circuit_short)),
            Item::new("inverter_over_temperature", "Inverter over temperature", Value::Bool(self.inverter_over_temperature)),
            Item::new("fan_lock", "Fan lock", Value::Bool(self.fan_lock)),
            Item::new("battery_voltage_high", "Battery voltage high", Value::Bool(self.battery_voltage_high)),
            Item::new("battery_low", "Battery low", Value::Bool(self.battery_low)),
            Item::new("battery_under", "Battery under", Value::Bool(self.battery_under)),
            Item::new("over_load", "Over load", Value::Bool(self.over_load)),
            Item::new("eeprom_fail", "EEPROM fail", Value::Bool(self.eeprom_fail)),
            Item::new("power_limit", "Power limit", Value::Bool(self.power_limit)),
            Item::new("pv1_voltage_high", "PV1 voltage high", Value::Bool(self.pv1_voltage_high)),
            Item::new("pv2_voltage_high", "PV2 voltage high", Value::Bool(self.pv2_voltage_high)),
            Item::new("mppt1_overload_warning", "MPPT1 overload warning", Value::Bool(self.mppt1_overload_warning)),
            Item::new("mppt2_overload_warning", "MPPT2 overload warning", Value::Bool(self.mppt2_overload_warning)),
            Item::new("battery_too_low_to_charge_for_scc1", "Battery too low to charge for SCC1", Value::Bool(self.battery_too_low_to_charge_for_scc1)),
            Item::new("battery_too_low_to_charge_for_scc2", "Battery too low to charge for SCC2", Value::Bool(self.battery_too_low_to_charge_for_scc2)),
        ]
    }
}

impl Printable for FlagsStatuses {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("buzzer", "Buzzer", Value::Flag(self.buzzer)),
            Item::new("overload_bypass", "Overload bypass function", Value::Flag(self.overload_bypass)),
            Item::new("lcd_escape_to_default_page_after_1min_timeout", "Escape to default page after 1min timeout", Value::Flag(self.lcd_escape_to_default_page_after_1min_timeout)),
            Item::new("overload_restart", "Overload restart", Value::Flag(self.overload_restart)),
            Item::new("over_temp_restart", "Over temperature restart", Value::Flag(self.over_temp_restart)),
            Item::new("backlight_on", "Backlight on", Value::Flag(self.backlight_on)),
            Item::new("alarm_on_primary_source_interrupt", "Alarm on when primary source interrupt", Value::Flag(self.alarm_on_primary_source_interrupt)),
            Item::new("fault_code_record", "Fault code record", Value::Flag(self.fault_code_record)),
        ]
    }
}

impl Printable for Defaults {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("ac_output_voltage", "AC output voltage", Value::tenths(self.ac_output_voltage)).with_unit(Unit::V),
            Item::new("ac_output_freq", "AC output frequency", Value::tenths(self.ac_output_freq)).with_unit(Unit::Hz),
            Item::new("ac_input_voltage_range", "AC input voltage range", Value::str(self.ac_input_voltage_range.label())),
            Item::new("battery_under_voltage", "Battery under voltage", Value::tenths(self.battery_under_voltage)).with_unit(Unit::V),
            Item::new("battery_bulk_voltage", "Charging bulk voltage", Value::tenths(self.charging_bulk_voltage)).with_unit(Unit::V),
            Item::new("battery_float_voltage", "Charging float voltage", Value::tenths(self.charging_float_voltage)).with_unit(Unit::V),
            Item::new("battery_recharge_voltage", "Battery re-charge voltage", Value::tenths(self.battery_recharge_voltage)).with_unit(Unit::V),
            Item::new("battery_redischarge_voltage", "Battery re-discharge voltage", Value::tenths(self.battery_redischarge_voltage)).with_unit(Unit::V),
            Item::new("max_ac_charging_current", "Max AC charging current", Value::long(self.max_ac_charging_current)).with_unit(Unit::A),
            Item::new("max_charging_current", "Max charging current", Value::long(self.max_charging_current)).with_unit(Unit::A),
            Item::new("battery_type", "Battery type", Value::str(self.battery_type.label())),
            Item::new("output_source_priority", "Output source priority", Value::str(self.output_source_priority.label())),
            Item::new("charger_source_priority", "Charger source priority", Value::str(self.charger_source_priority.label())),
            Item::new("solar_power_priority", "Solar power priority", Value::str(self.solar_power_priority.label())),
            Item::new("machine_type", "Machine type", Value::str(self.machine_type.label())),
            Item::new("output_model_setting", "Output model setting", Value::str(self.output_model_setting.label())),
            Item::new("buzzer_flag", "Buzzer flag", Value::Flag(self.flag_buzzer)),
            Item::new("overload_bypass_flag", "Overload bypass function flag", Value::Flag(self.flag_overload_bypass)),
            Item::new("lcd_escape_to_default_page_after_1min_timeout_flag", "Escape to default page after 1min timeout flag", Value::Flag(self.flag_lcd_escape_to_default_page_after_1min_timeout)),
            Item::new("overload_restart_flag", "Overload restart flag", Value::Flag(self.flag_overload_restart)),
            Item::new("over_temp_restart_flag", "Over temperature restart flag", Value::Flag(self.flag_over_temp_restart)),
            Item::new("backlight_on_flag", "Backlight on flag", Value::Flag(self.flag_backlight_on)),
            Item::new("alarm_on_primary_source_interrupt_flag", "Alarm on when primary source interrupt flag", Value::Flag(self.flag_alarm_on_primary_source_interrupt)),
            Item::new("fault_code_record_flag", "Fault code record flag", Value::Flag(self.flag_fault_code_record)),
        ]
    }
}

// selectable values print as a bare list rather than keyed items
impl Printable for SelectableValues {
    fn items(&self) -> Vec<Item> {
        self.amps
            .iter()
            .map(|&a| Item::new("amps", "Amps", Value::long(a)).with_unit(Unit::A))
            .collect()
    }

    fn render(&self, format: Format) -> String {
        render_list(&self.amps, format)
    }

    fn to_json(&self, _with_units: bool) -> Json {
        json!(self.amps)
    }
}

impl Printable for MaxChargingCurrentSelectableValues {
    fn items(&self) -> Vec<Item> {
        self.0.items()
    }

    fn render(&self, format: Format) -> String {
        self.0.render(format)
    }

    fn to_json(&self, with_units: bool) -> Json {
        self.0.to_json(with_units)
    }
}

impl Printable for MaxAcChargingCurrentSelectableValues {
    fn items(&self) -> Vec<Item> {
        self.0.items()
    }

    fn render(&self, format: Format) -> String {
        self.0.render(format)
    }

    fn to_json(&self, with_units: bool) -> Json {
        self.0.to_json(with_units)
    }
}

impl Printable for ParallelRatedInformation {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("parallel_id_connection_status", "Parallel ID connection status", Value::str(self.parallel_id_connection_status.label())),
            Item::new("serial_number", "Serial number", Value::str(&self.serial_number)),
            Item::new("charger_source_priority", "Charger source priority", Value::str(self.charger_source_priority.label())),
            Item::new("max_charging_current", "Max charging current", Value::long(self.max_charging_current)).with_unit(Unit::A),
            Item::new("max_ac_charging_current", "Max AC charging current", Value::long(self.max_ac_charging_current)).with_unit(Unit::A),
            Item::new("output_model_setting", "Output model setting", Value::str(self.output_model_setting.label())),
        ]
    }
}

impl Printable for ParallelGeneralStatus {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("parallel_id_connection_status", "Parallel ID connection status", Value::str(self.parallel_id_connection_status.label())),
            Item::new("mode", "Working mode", Value::str(self.work_mode.label())),
            Item::new("fault_code", "Fault code", fault_code(self.fault_code)),
            Item::new("grid_voltage", "Grid voltage", Value::tenths(self.grid_voltage)).with_unit(Unit::V),
            Item::new("grid_freq", "Grid frequency", Value::tenths(self.grid_freq)).with_unit(Unit::Hz),
            Item::new("ac_output_voltage", "AC output voltage", Value::tenths(self.ac_output_voltage)).with_unit(Unit::V),
            Item::new("ac_output_freq", "AC output frequency", Value::tenths(self.ac_output_freq)).with_unit(Unit::Hz),
            Item::new("ac_output_apparent_power", "AC output apparent power", Value::long(self.ac_output_apparent_power)).with_unit(Unit::VA),
            Item::new("ac_output_active_power", "AC output active power", Value::long(self.ac_output_active_power)).with_unit(Unit::Wh),
            Item::new("total_ac_output_apparent_power", "Total AC output apparent power", Value::long(self.total_ac_output_apparent_power)).with_unit(Unit::VA),
            Item::new("total_ac_output_active_power", "Total AC output active power", Value::long(self.total_ac_output_active_power)).with_unit(Unit::Wh),
            Item::new("output_load_percent", "Output load percent", Value::long(self.output_load_percent)).with_unit(Unit::Percentage),
            Item::new("total_output_load_percent", "Total output load percent", Value::long(self.total_output_load_percent)).with_unit(Unit::Percentage),
            Item::new("battery_voltage", "Battery voltage", Value::tenths(self.battery_voltage)).with_unit(Unit::V),
            Item::new("battery_discharge_current", "Battery discharge current", Value::long(self.battery_discharge_current)).with_unit(Unit::A),
            Item::new("battery_charging_current", "Battery charging current", Value::long(self.battery_charging_current)).with_unit(Unit::A),
            Item::new("total_battery_charging_current", "Total battery charging current", Value::long(self.total_battery_charging_current)).with_unit(Unit::A),
            Item::new("battery_capacity", "Battery capacity", Value::long(self.battery_capacity)).with_unit(Unit::Percentage),
            Item::new("pv1_input_power", "PV1 Input power", Value::Double(f64::from(self.pv1_input_power), 2)).with_unit(Unit::Wh),
            Item::new("pv2_input_power", "PV2 Input power", Value::Double(f64::from(self.pv2_input_power), 2)).with_unit(Unit::Wh),
            Item::new("pv1_input_voltage", "PV1 Input voltage", Value::tenths(self.pv1_input_voltage)).with_unit(Unit::V),
            Item::new("pv2_input_voltage", "PV2 Input voltage", Value::tenths(self.pv2_input_voltage)).with_unit(Unit::V),
            Item::new("mppt1_charger_status", "MPPT1 charger status", Value::str(self.mppt1_charger_status.label())),
            Item::new("mppt2_charger_status", "MPPT2 charger status", Value::str(self.mppt2_charger_status.label())),
            Item::new("load_connected", "Load connection", connection(self.load_connected)),
            Item::new("battery_power_direction", "Battery power direction", Value::str(self.battery_power_direction.label())),
            Item::new("dc_ac_power_direction", "DC/AC power direction", Value::str(self.dc_ac_power_direction.label())),
            Item::new("line_power_direction", "Line power direction", Value::str(self.line_power_direction.label())),
            Item::new("max_temp", "Max. temperature", Value::long(self.max_temp)),
        ]
    }
}

impl Printable for TimeBucket {
    fn items(&self) -> Vec<Item> {
        vec![
            Item::new("start_time", "Start time", time_of_day(self.start_hour, self.start_minute)),
            Item::new("end_time", "End time", time_of_day(self.end_hour, self.end_minute)),
        ]
    }
}

impl Printable for AcChargeTimeBucket {
    fn items(&self) -> Vec<Item> {
        self.0.items()
    }
}

impl Printable for AcSupplyLoadTimeBucket {
    fn items(&self) -> Vec<Item> {
        self.0.items()
    }
} // }}}
