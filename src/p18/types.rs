use crate::error::{Error, Result};

use num_enum::{FromPrimitive, IntoPrimitive};
use std::str::FromStr;

pub const UNKNOWN: &str = "Unknown";

/// Declares a numeric protocol enum.
///
/// Values the device reports outside the documented set are kept in the
/// `Unknown` variant instead of failing the decode.
macro_rules! protocol_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident = $value:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, FromPrimitive, IntoPrimitive)]
        #[repr(i64)]
        pub enum $name {
            $($variant = $value,)+
            #[num_enum(catch_all)]
            Unknown(i64),
        }

        impl $name {
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unknown(_) => UNKNOWN,
                }
            }

            /// Builds the enum from a decoded integer field, keeping
            /// undocumented values as they were reported.
            pub fn from_value(value: i64) -> Self {
                Self::from(value)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::from(0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

protocol_enum!(BatteryType {
    Agm = 0 => "AGM",
    Flooded = 1 => "Flooded",
    User = 2 => "User",
});

protocol_enum!(InputVoltageRange {
    Appliance = 0 => "Appliance",
    Ups = 1 => "UPS",
});

protocol_enum!(OutputSourcePriority {
    SolarUtilityBattery = 0 => "Solar-Utility-Battery",
    SolarBatteryUtility = 1 => "Solar-Battery-Utility",
});

protocol_enum!(ChargerSourcePriority {
    SolarFirst = 0 => "Solar-First",
    SolarAndUtility = 1 => "Solar-and-Utility",
    SolarOnly = 2 => "Solar-Only",
});

protocol_enum!(MachineType {
    OffGridTie = 0 => "Off-Grid-Tie",
    GridTie = 1 => "Grid-Tie",
});

protocol_enum!(Topology {
    Transformerless = 0 => "Transformerless",
    Transformer = 1 => "Transformer",
});

protocol_enum!(OutputModelSetting {
    SingleModule = 0 => "Single module",
    ParallelOutput = 1 => "Parallel output",
    Phase1Of3PhaseOutput = 2 => "Phase 1 of three phase output",
    Phase2Of3PhaseOutput = 3 => "Phase 2 of three phase output",
    Phase3Of3PhaseOutput = 4 => "Phase 3 of three phase",
});

protocol_enum!(SolarPowerPriority {
    BatteryLoadUtility = 0 => "Battery-Load-Utility",
    LoadBatteryUtility = 1 => "Load-Battery-Utility",
});

protocol_enum!(MpptChargerStatus {
    Abnormal = 0 => "Abnormal",
    NotCharging = 1 => "Not charging",
    Charging = 2 => "Charging",
});

protocol_enum!(BatteryPowerDirection {
    DoNothing = 0 => "Do nothing",
    Charge = 1 => "Charge",
    Discharge = 2 => "Discharge",
});

protocol_enum!(DcAcPowerDirection {
    DoNothing = 0 => "Do nothing",
    AcDc = 1 => "AC/DC",
    DcAc = 2 => "DC/AC",
});

protocol_enum!(LinePowerDirection {
    DoNothing = 0 => "Do nothing",
    Input = 1 => "Input",
    Output = 2 => "Output",
});

protocol_enum!(WorkingMode {
    PowerOn = 0 => "Power on mode",
    Standby = 1 => "Standby mode",
    Bypass = 2 => "Bypass mode",
    Battery = 3 => "Battery mode",
    Fault = 4 => "Fault mode",
    Hybrid = 5 => "Hybrid mode",
});

protocol_enum!(ParallelConnectionStatus {
    NonExistent = 0 => "Non-existent",
    Existent = 1 => "Existent",
});

// {{{ command line choices
/// Resolves `value` to its position in `choices`.
///
/// The position is the value the inverter expects for that setting.
pub fn resolve_choice<T: From<i64>>(value: &str, choices: &[&str]) -> Result<T> {
    choices
        .iter()
        .position(|choice| *choice == value)
        .and_then(|index| i64::try_from(index).ok())
        .map(T::from)
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} is not one of {}",
                value,
                choices.join(", ")
            ))
        })
}

/// Single ASCII digit for an enum value, as written into set commands.
pub fn index_digit<T: Into<i64>>(value: T) -> String {
    value.into().to_string()
}

impl OutputSourcePriority {
    pub const CHOICES: [&'static str; 2] = ["SUB", "SBU"];
}

impl FromStr for OutputSourcePriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve_choice(s, &Self::CHOICES)
    }
}

impl ChargerSourcePriority {
    pub const CHOICES: [&'static str; 3] = ["SF", "SU", "S"];
}

impl FromStr for ChargerSourcePriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve_choice(s, &Self::CHOICES)
    }
}

impl SolarPowerPriority {
    pub const CHOICES: [&'static str; 2] = ["BLU", "LBU"];
}

impl FromStr for SolarPowerPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve_choice(s, &Self::CHOICES)
    }
}

impl InputVoltageRange {
    pub const CHOICES: [&'static str; 2] = ["APPLIANCE", "UPS"];
}

impl FromStr for InputVoltageRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve_choice(s, &Self::CHOICES)
    }
}

impl BatteryType {
    pub const CHOICES: [&'static str; 3] = ["AGM", "FLOODED", "USER"];
}

impl FromStr for BatteryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve_choice(s, &Self::CHOICES)
    }
}

impl OutputModelSetting {
    pub const CHOICES: [&'static str; 5] = ["SM", "P", "P1", "P2", "P3"];
}

impl FromStr for OutputModelSetting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve_choice(s, &Self::CHOICES)
    }
} // }}}

// {{{ Flag
/// A switchable inverter feature, toggled with the `P` set command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Flag {
    /// Name accepted on the command line.
    pub key: &'static str,
    /// Letter the inverter uses for the flag.
    pub code: char,
    pub title: &'static str,
}

pub const FLAGS: [Flag; 9] = [
    Flag { key: "BUZZ", code: 'A', title: "Silence buzzer or open buzzer" },
    Flag { key: "OLBP", code: 'B', title: "Overload bypass function" },
    Flag { key: "LCDE", code: 'C', title: "LCD display escape to default page after 1min timeout" },
    Flag { key: "OLRS", code: 'D', title: "Overload restart" },
    Flag { key: "OTRS", code: 'E', title: "Overload temperature restart" },
    Flag { key: "BLON", code: 'F', title: "Backlight on" },
    Flag { key: "ALRM", code: 'G', title: "Alarm on primary source interrupt" },
    Flag { key: "FTCR", code: 'H', title: "Fault code record" },
    Flag { key: "MTYP", code: 'I', title: "Machine type (1=Grid-Tie, 0=Off-Grid-Tie)" },
];

impl Flag {
    pub fn by_key(key: &str) -> Option<&'static Flag> {
        FLAGS.iter().find(|flag| flag.key == key)
    }
}

impl FromStr for Flag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Flag::by_key(s)
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("invalid flag {}", s)))
    }
} // }}}

// {{{ allowed values
pub const AC_OUTPUT_RATED_VOLTAGES: [u16; 5] = [202, 208, 220, 230, 240];

pub const RECHARGE_VOLTAGES_12V: [&str; 8] = ["11", "11.3", "11.5", "11.8", "12", "12.3", "12.5", "12.8"];
pub const RECHARGE_VOLTAGES_24V: [&str; 8] = ["22", "22.5", "23", "23.5", "24", "24.5", "25", "25.5"];
pub const RECHARGE_VOLTAGES_48V: [&str; 8] = ["44", "45", "46", "47", "48", "49", "50", "51"];

pub const REDISCHARGE_VOLTAGES_12V: [&str; 12] = [
    "0", "12", "12.3", "12.5", "12.8", "13", "13.3", "13.5", "13.8", "14", "14.3", "14.5",
];
pub const REDISCHARGE_VOLTAGES_24V: [&str; 12] = [
    "0", "24", "24.5", "25", "25.5", "26", "26.5", "27", "27.5", "28", "28.5", "29",
];
pub const REDISCHARGE_VOLTAGES_48V: [&str; 12] = [
    "0", "48", "49", "50", "51", "52", "53", "54", "55", "56", "57", "58",
]; // }}}

// {{{ FaultCodeString
pub struct FaultCodeString;
impl FaultCodeString {
    pub fn from_value(code: i64) -> &'static str {
        match code {
            1 => "Fan is locked",
            2 => "Over temperature",
            3 => "Battery voltage is too high",
            4 => "Battery voltage is too low",
            5 => "Output short circuited or Over temperature",
            6 => "Output voltage is too high",
            7 => "Over load time out",
            8 => "Bus voltage is too high",
            9 => "Bus soft start failed",
            11 => "Main relay failed",
            51 => "Over current inverter",
            52 => "Bus soft start failed",
            53 => "Inverter soft start failed",
            54 => "Self-test failed",
            55 => "Over DC voltage on output of inverter",
            56 => "Battery connection is open",
            57 => "Current sensor failed",
            58 => "Output voltage is too low",
            60 => "Inverter negative power",
            71 => "Parallel version different",
            72 => "Output circuit failed",
            80 => "CAN communication failed",
            81 => "Parallel host line lost",
            82 => "Parallel synchronized signal lost",
            83 => "Parallel battery voltage detect different",
            84 => "Parallel Line voltage or frequency detect different",
            85 => "Parallel Line input current unbalanced",
            86 => "Parallel output setting different",

            _ => UNKNOWN,
        }
    }
} // }}}
