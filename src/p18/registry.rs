use crate::error::{Error, Result};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

/// First identifier of the query range.
pub const QUERY_OFFSET: u16 = 1000;
/// First identifier of the set range.
pub const SET_OFFSET: u16 = 1100;

const QUERY_MNEMONICS: [&str; 20] = [
    "PI",      // protocol id
    "T",       // current time
    "ET",      // total generated energy
    "EY",      // year generated energy
    "EM",      // month generated energy
    "ED",      // day generated energy
    "ID",      // series number
    "VFW",     // cpu version
    "PIRI",    // rated information
    "GS",      // general status
    "MOD",     // working mode
    "FWS",     // fault and warning status
    "FLAG",    // enable/disable flag statuses
    "DI",      // defaults of changeable parameters
    "MCHGCR",  // max charging current selectable values
    "MUCHGCR", // max AC charging current selectable values
    "PRI",     // parallel rated information
    "PGS",     // parallel general status
    "ACCT",    // AC charge time bucket
    "ACLT",    // AC supply load time bucket
];

const SET_MNEMONICS: [&str; 21] = [
    "LON",    // machine supplies power to the loads
    "P",      // enable/disable flags
    "PF",     // reset changeable parameters
    "MCHGC",  // battery max charge current
    "MUCHGC", // battery max AC charge current
    "F",      // AC output frequency, F50 or F60
    "MCHGV",  // battery max charge voltage
    "V",      // AC output rated voltage
    "POP",    // output source priority
    "BUCD",   // battery re-charge/re-discharge voltage with utility
    "PCP",    // charging source priority
    "PSP",    // solar power priority
    "PGR",    // AC input voltage range
    "PBT",    // battery type
    "POPM",   // output model
    "PSDV",   // battery cut-off voltage
    "ID",     // solar configuration
    "CLE",    // clear generated energy
    "DAT",    // date and time
    "ACCT",   // AC charge time bucket
    "ACLT",   // AC supply load time bucket
];

// {{{ QueryCommand
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum QueryCommand {
    ProtocolId = 1000,
    CurrentTime = 1001,
    TotalGenerated = 1002,
    YearGenerated = 1003,
    MonthGenerated = 1004,
    DayGenerated = 1005,
    SeriesNumber = 1006,
    CpuVersion = 1007,
    RatedInformation = 1008,
    GeneralStatus = 1009,
    WorkingMode = 1010,
    FaultsWarnings = 1011,
    FlagsStatuses = 1012,
    Defaults = 1013,
    MaxChargingCurrentSelectableValues = 1014,
    MaxAcChargingCurrentSelectableValues = 1015,
    ParallelRatedInformation = 1016,
    ParallelGeneralStatus = 1017,
    AcChargeTimeBucket = 1018,
    AcSupplyLoadTimeBucket = 1019,
}

impl QueryCommand {
    pub const ALL: [QueryCommand; 20] = [
        Self::ProtocolId,
        Self::CurrentTime,
        Self::TotalGenerated,
        Self::YearGenerated,
        Self::MonthGenerated,
        Self::DayGenerated,
        Self::SeriesNumber,
        Self::CpuVersion,
        Self::RatedInformation,
        Self::GeneralStatus,
        Self::WorkingMode,
        Self::FaultsWarnings,
        Self::FlagsStatuses,
        Self::Defaults,
        Self::MaxChargingCurrentSelectableValues,
        Self::MaxAcChargingCurrentSelectableValues,
        Self::ParallelRatedInformation,
        Self::ParallelGeneralStatus,
        Self::AcChargeTimeBucket,
        Self::AcSupplyLoadTimeBucket,
    ];

    pub fn id(self) -> u16 {
        self.into()
    }

    pub fn mnemonic(self) -> &'static str {
        QUERY_MNEMONICS[usize::from(self.id() - QUERY_OFFSET)]
    }

    /// Snake-case name, used as a key when several results are combined.
    pub fn name(self) -> &'static str {
        use QueryCommand::*;
        match self {
            ProtocolId => "protocol_id",
            CurrentTime => "current_time",
            TotalGenerated => "total_generated",
            YearGenerated => "year_generated",
            MonthGenerated => "month_generated",
            DayGenerated => "day_generated",
            SeriesNumber => "series_number",
            CpuVersion => "cpu_version",
            RatedInformation => "rated_information",
            GeneralStatus => "general_status",
            WorkingMode => "working_mode",
            FaultsWarnings => "faults_warnings",
            FlagsStatuses => "flags_statuses",
            Defaults => "defaults",
            MaxChargingCurrentSelectableValues => "max_charging_current_selectable_values",
            MaxAcChargingCurrentSelectableValues => "max_ac_charging_current_selectable_values",
            ParallelRatedInformation => "parallel_rated_information",
            ParallelGeneralStatus => "parallel_general_status",
            AcChargeTimeBucket => "ac_charge_time_bucket",
            AcSupplyLoadTimeBucket => "ac_supply_load_time_bucket",
        }
    }

    /// Whether the query is sent without any payload.
    pub fn takes_arguments(self) -> bool {
        use QueryCommand::*;
        matches!(
            self,
            YearGenerated
                | MonthGenerated
                | DayGenerated
                | ParallelRatedInformation
                | ParallelGeneralStatus
        )
    }
} // }}}

// {{{ SetCommand
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum SetCommand {
    Loads = 1100,
    Flag = 1101,
    Defaults = 1102,
    BatteryMaxChargeCurrent = 1103,
    BatteryMaxAcChargeCurrent = 1104,
    AcOutputFreq = 1105,
    BatteryMaxChargeVoltage = 1106,
    AcOutputRatedVoltage = 1107,
    OutputSourcePriority = 1108,
    BatteryChargingThresholds = 1109,
    ChargingSourcePriority = 1110,
    SolarPowerPriority = 1111,
    AcInputVoltageRange = 1112,
    BatteryType = 1113,
    OutputModel = 1114,
    BatteryCutoffVoltage = 1115,
    SolarConfig = 1116,
    ClearGenerated = 1117,
    DateTime = 1118,
    AcChargeTimeBucket = 1119,
    AcSupplyLoadTimeBucket = 1120,
}

impl SetCommand {
    pub fn id(self) -> u16 {
        self.into()
    }

    pub fn mnemonic(self) -> &'static str {
        SET_MNEMONICS[usize::from(self.id() - SET_OFFSET)]
    }
} // }}}

// {{{ Command
/// A command identifier resolved to its direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Command {
    Query(QueryCommand),
    Set(SetCommand),
}

impl Command {
    pub fn id(self) -> u16 {
        match self {
            Command::Query(q) => q.id(),
            Command::Set(s) => s.id(),
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Command::Query(q) => q.mnemonic(),
            Command::Set(s) => s.mnemonic(),
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, Command::Set(_))
    }

    /// Frame mode character: `P` for queries, `S` for sets.
    pub fn mode(self) -> u8 {
        if self.is_set() {
            b'S'
        } else {
            b'P'
        }
    }
}

impl TryFrom<u16> for Command {
    type Error = Error;

    fn try_from(id: u16) -> Result<Self> {
        if id >= SET_OFFSET {
            SetCommand::try_from(id)
                .map(Command::Set)
                .map_err(|_| Error::InvalidCommand(id))
        } else {
            QueryCommand::try_from(id)
                .map(Command::Query)
                .map_err(|_| Error::InvalidCommand(id))
        }
    }
}

impl From<QueryCommand> for Command {
    fn from(q: QueryCommand) -> Self {
        Command::Query(q)
    }
}

impl From<SetCommand> for Command {
    fn from(s: SetCommand) -> Self {
        Command::Set(s)
    }
} // }}}

/// Mnemonic of the command with identifier `id`.
///
/// Identifiers at or above [`SET_OFFSET`] index the set table, everything
/// else the query table; an index outside its table is an invalid command.
pub fn lookup(id: u16) -> Result<&'static str> {
    let (table, offset): (&[&'static str], u16) = if id >= SET_OFFSET {
        (&SET_MNEMONICS, SET_OFFSET)
    } else {
        (&QUERY_MNEMONICS, QUERY_OFFSET)
    };

    id.checked_sub(offset)
        .and_then(|index| table.get(usize::from(index)))
        .copied()
        .ok_or(Error::InvalidCommand(id))
}
