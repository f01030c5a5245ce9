use crate::p18::registry::{QueryCommand, SetCommand};
use crate::p18::types::{
    index_digit, BatteryType, ChargerSourcePriority, Flag, InputVoltageRange, OutputModelSetting,
    OutputSourcePriority, SolarPowerPriority,
};
use crate::p18;
use crate::utils::Utils;
use crate::validation;

use anyhow::{bail, Result};

/// One action per invocation.
#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Execute an arbitrary command and print the response as is
    Raw { command: String },
    /// Run every query that takes no arguments
    Dump,

    /// Protocol ID
    GetProtocolId,
    /// Current date and time
    GetDateTime,
    /// Total generated energy
    GetTotalGenerated,
    /// Energy generated in a year
    GetYearGenerated { year: String },
    /// Energy generated in a month
    GetMonthGenerated { year: String, month: String },
    /// Energy generated in a day
    GetDayGenerated {
        year: String,
        month: String,
        day: String,
    },
    /// Series number
    GetSeriesNumber,
    /// CPU versions
    GetCpuVersion,
    /// Rated information
    GetRatedInformation,
    /// General status
    GetGeneralStatus,
    /// Working mode
    GetWorkingMode,
    /// Fault and warning status
    GetFaultsWarnings,
    /// Enable/disable flags status
    GetFlags,
    /// Default values of changeable parameters
    GetDefaults,
    /// Selectable values of max charging current
    GetMaxChargingCurrentSelectableValues,
    /// Selectable values of max AC charging current
    GetMaxAcChargingCurrentSelectableValues,
    /// Parallel system rated information of one unit
    GetParallelRatedInformation { id: String },
    /// Parallel system status of one unit
    GetParallelGeneralStatus { id: String },
    /// AC charge time bucket
    GetAcChargeTimeBucket,
    /// AC supply load time bucket
    GetAcSupplyLoadTimeBucket,

    /// Let the machine supply the loads (0 or 1)
    SetLoadsSupply { state: String },
    /// Enable or disable a flag: BUZZ, OLBP, LCDE, OLRS, OTRS, BLON, ALRM, FTCR or MTYP
    SetFlag { flag: String, state: String },
    /// Reset changeable parameters to their defaults
    SetDefaults,
    /// Battery max charging current of one unit
    SetBatteryMaxChargingCurrent { id: String, amps: String },
    /// Battery max AC charging current of one unit
    SetBatteryMaxAcChargingCurrent { id: String, amps: String },
    /// AC output frequency (50 or 60)
    SetAcOutputFreq { freq: String },
    /// Battery max charging voltage, constant and float (48.0 to 58.4)
    SetBatteryMaxChargingVoltage { cv: String, fv: String },
    /// AC output rated voltage (202, 208, 220, 230 or 240)
    SetAcOutputRatedVoltage { voltage: String },
    /// Output source priority: SUB or SBU
    SetOutputSourcePriority { priority: String },
    /// Battery re-charge and re-discharge voltage when utility is available
    SetBatteryChargingThresholds { cv: String, dv: String },
    /// Charging source priority of one unit: SF, SU or S
    SetChargingSourcePriority { id: String, priority: String },
    /// Solar power priority: BLU or LBU
    SetSolarPowerPriority { priority: String },
    /// AC input voltage range: APPLIANCE or UPS
    SetAcInputVoltageRange { range: String },
    /// Battery type: AGM, FLOODED or USER
    SetBatteryType { battery_type: String },
    /// Output model of one unit: SM, P, P1, P2 or P3
    SetOutputModel { id: String, model: String },
    /// Battery cut-off voltage (40.0 to 48.0)
    SetBatteryCutoffVoltage { voltage: String },
    /// Solar configuration id
    SetSolarConfiguration { id: String },
    /// Clear all recorded generated energy
    ClearGeneratedData,
    /// Set date and time, YYYY MM DD hh mm ss; the local time if omitted
    SetDateTime { values: Vec<String> },
    /// AC charge time bucket, start and end as hh:mm
    SetAcChargeTimeBucket { start: String, end: String },
    /// AC supply load time bucket, start and end as hh:mm
    SetAcSupplyLoadTimeBucket { start: String, end: String },
}

/// What has to be sent once the command line is validated.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Request {
    Raw(String),
    Dump,
    Execute {
        command: p18::Command,
        args: Vec<String>,
    },
}

impl Request {
    fn query(query: QueryCommand, args: &[&str]) -> Self {
        Self::execute(query.into(), args)
    }

    fn set(set: SetCommand, args: &[&str]) -> Self {
        Self::execute(set.into(), args)
    }

    fn execute(command: p18::Command, args: &[&str]) -> Self {
        Request::Execute {
            command,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Command string to send, for anything other than `dump`.
    pub fn wire_command(&self) -> Result<Option<String>> {
        Ok(match self {
            Request::Raw(command) => Some(command.clone()),
            Request::Dump => None,
            Request::Execute { command, args } => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                Some(p18::builder::build_command(*command, &args)?)
            }
        })
    }
}

impl Command {
    /// Validates the arguments and resolves choices to what goes on the wire.
    pub fn to_request(&self) -> Result<Request> {
        use Command::*;
        use QueryCommand as Q;
        use SetCommand as S;

        let request = match self {
            Raw { command } => {
                validation::raw_command(command)?;
                Request::Raw(command.clone())
            }
            Dump => Request::Dump,

            GetProtocolId => Request::query(Q::ProtocolId, &[]),
            GetDateTime => Request::query(Q::CurrentTime, &[]),
            GetTotalGenerated => Request::query(Q::TotalGenerated, &[]),
            GetYearGenerated { year } => {
                validation::year(year)?;
                Request::query(Q::YearGenerated, &[year])
            }
            GetMonthGenerated { year, month } => {
                validation::year(year)?;
                validation::month(month)?;
                Request::query(Q::MonthGenerated, &[year, month])
            }
            GetDayGenerated { year, month, day } => {
                validation::date(year, month, day)?;
                Request::query(Q::DayGenerated, &[year, month, day])
            }
            GetSeriesNumber => Request::query(Q::SeriesNumber, &[]),
            GetCpuVersion => Request::query(Q::CpuVersion, &[]),
            GetRatedInformation => Request::query(Q::RatedInformation, &[]),
            GetGeneralStatus => Request::query(Q::GeneralStatus, &[]),
            GetWorkingMode => Request::query(Q::WorkingMode, &[]),
            GetFaultsWarnings => Request::query(Q::FaultsWarnings, &[]),
            GetFlags => Request::query(Q::FlagsStatuses, &[]),
            GetDefaults => Request::query(Q::Defaults, &[]),
            GetMaxChargingCurrentSelectableValues => {
                Request::query(Q::MaxChargingCurrentSelectableValues, &[])
            }
            GetMaxAcChargingCurrentSelectableValues => {
                Request::query(Q::MaxAcChargingCurrentSelectableValues, &[])
            }
            GetParallelRatedInformation { id } => {
                validation::parallel_id(id)?;
                Request::query(Q::ParallelRatedInformation, &[id])
            }
            GetParallelGeneralStatus { id } => {
                validation::parallel_id(id)?;
                Request::query(Q::ParallelGeneralStatus, &[id])
            }
            GetAcChargeTimeBucket => Request::query(Q::AcChargeTimeBucket, &[]),
            GetAcSupplyLoadTimeBucket => Request::query(Q::AcSupplyLoadTimeBucket, &[]),

            SetLoadsSupply { state } => {
                validation::zero_or_one(state, "argument")?;
                Request::set(S::Loads, &[state])
            }
            SetFlag { flag, state } => {
                let flag: Flag = flag.parse()?;
                validation::zero_or_one(state, "flag state")?;
                Request::set(S::Flag, &[flag.key, state])
            }
            SetDefaults => Request::set(S::Defaults, &[]),
            SetBatteryMaxChargingCurrent { id, amps } => {
                validation::parallel_id(id)?;
                validation::amps(amps)?;
                Request::set(S::BatteryMaxChargeCurrent, &[id, amps])
            }
            SetBatteryMaxAcChargingCurrent { id, amps } => {
                validation::parallel_id(id)?;
                validation::amps(amps)?;
                Request::set(S::BatteryMaxAcChargeCurrent, &[id, amps])
            }
            SetAcOutputFreq { freq } => {
                validation::frequency(freq)?;
                Request::set(S::AcOutputFreq, &[freq])
            }
            SetBatteryMaxChargingVoltage { cv, fv } => {
                validation::float_in_range(cv, validation::CHARGE_VOLTAGE_RANGE, "CV")?;
                validation::float_in_range(fv, validation::CHARGE_VOLTAGE_RANGE, "FV")?;
                Request::set(S::BatteryMaxChargeVoltage, &[cv, fv])
            }
            SetAcOutputRatedVoltage { voltage } => {
                validation::rated_voltage(voltage)?;
                Request::set(S::AcOutputRatedVoltage, &[voltage])
            }
            SetOutputSourcePriority { priority } => {
                let priority: OutputSourcePriority = priority.parse()?;
                Request::set(S::OutputSourcePriority, &[&index_digit(priority)])
            }
            SetBatteryChargingThresholds { cv, dv } => {
                validation::recharge_voltage(cv)?;
                validation::redischarge_voltage(dv)?;
                Request::set(S::BatteryChargingThresholds, &[cv, dv])
            }
            SetChargingSourcePriority { id, priority } => {
                validation::parallel_id(id)?;
                let priority: ChargerSourcePriority = priority.parse()?;
                Request::set(S::ChargingSourcePriority, &[id, &index_digit(priority)])
            }
            SetSolarPowerPriority { priority } => {
                let priority: SolarPowerPriority = priority.parse()?;
                Request::set(S::SolarPowerPriority, &[&index_digit(priority)])
            }
            SetAcInputVoltageRange { range } => {
                let range: InputVoltageRange = range.parse()?;
                Request::set(S::AcInputVoltageRange, &[&index_digit(range)])
            }
            SetBatteryType { battery_type } => {
                let battery_type: BatteryType = battery_type.parse()?;
                Request::set(S::BatteryType, &[&index_digit(battery_type)])
            }
            SetOutputModel { id, model } => {
                validation::parallel_id(id)?;
                let model: OutputModelSetting = model.parse()?;
                Request::set(S::OutputModel, &[id, &index_digit(model)])
            }
            SetBatteryCutoffVoltage { voltage } => {
                validation::float_in_range(voltage, validation::CUTOFF_VOLTAGE_RANGE, "voltage")?;
                Request::set(S::BatteryCutoffVoltage, &[voltage])
            }
            SetSolarConfiguration { id } => {
                validation::solar_id(id)?;
                Request::set(S::SolarConfig, &[id])
            }
            ClearGeneratedData => Request::set(S::ClearGenerated, &[]),
            SetDateTime { values } => {
                let values = match values.len() {
                    0 => Utils::local_date_time().to_vec(),
                    6 => values.clone(),
                    n => bail!("set-date-time takes 0 or 6 arguments, {} given", n),
                };
                validation::date(&values[0], &values[1], &values[2])?;
                validation::time(&values[3], &values[4], &values[5])?;
                let args: Vec<&str> = values.iter().map(String::as_str).collect();
                Request::set(S::DateTime, &args)
            }
            SetAcChargeTimeBucket { start, end } => {
                validation::time_of_day(start, "start time")?;
                validation::time_of_day(end, "end time")?;
                Request::set(S::AcChargeTimeBucket, &[start, end])
            }
            SetAcSupplyLoadTimeBucket { start, end } => {
                validation::time_of_day(start, "start time")?;
                validation::time_of_day(end, "end time")?;
                Request::set(S::AcSupplyLoadTimeBucket, &[start, end])
            }
        };

        Ok(request)
    }
}
