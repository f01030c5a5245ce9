use crate::error::{Error, Result};
use crate::p18::registry::{Command, QueryCommand, SetCommand};
use crate::p18::types::Flag;

use log::trace;

/// Width of the length field that follows the mode character.
pub const LENGTH_FIELD: usize = 3;

/// Room a solar configuration id is padded to.
pub const SOLAR_ID_WIDTH: usize = 20;

// {{{ Argument
/// How a single command line value is rendered into a command payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Argument {
    /// Copied as given.
    Raw,
    /// Integer without padding.
    Number,
    /// Integer, zero padded to the given width.
    Int(usize),
    /// Integer times ten, zero padded to the given width.
    IntTimesTen(usize),
    /// Decimal times ten and rounded, zero padded to the given width.
    Decimal(usize),
    /// First character only: parallel machine id or enum index digit.
    Char,
    /// Four digit year written as two digits counted from 2000.
    Year2000,
    /// `hh:mm` packed as `hhmm`.
    Time,
    /// Flag name and 0/1 state, written as `E<code>` or `D<code>`.
    FlagToggle,
    /// Two digit length, the id, then '0' padding up to 20 characters.
    SolarId,
}

impl Argument {
    /// How many command line values the argument consumes.
    pub fn arity(self) -> usize {
        match self {
            Argument::FlagToggle => 2,
            _ => 1,
        }
    }

    fn encode(self, values: &[&str]) -> Result<String> {
        let value = values[0];
        let encoded = match self {
            Argument::Raw => value.to_string(),
            Argument::Number => int(value)?.to_string(),
            Argument::Int(width) => format!("{:0width$}", int(value)?, width = width),
            Argument::IntTimesTen(width) => {
                let scaled = int(value)?
                    .checked_mul(10)
                    .ok_or_else(|| out_of_range(value))?;
                format!("{:0width$}", scaled, width = width)
            }
            Argument::Decimal(width) => {
                format!("{:0width$}", tenths(value)?, width = width)
            }
            Argument::Char => value
                .chars()
                .next()
                .map(String::from)
                .ok_or_else(|| Error::InvalidArgument("empty argument".to_string()))?,
            Argument::Year2000 => {
                let year = int(value)?
                    .checked_sub(2000)
                    .ok_or_else(|| out_of_range(value))?;
                format!("{:02}", year)
            }
            Argument::Time => {
                let (hour, minute) = value
                    .split_once(':')
                    .ok_or_else(|| Error::InvalidArgument(format!("{} is not hh:mm", value)))?;
                format!("{:02}{:02}", int(hour)?, int(minute)?)
            }
            Argument::FlagToggle => {
                // accept both the printable name and the bare code letter
                let code = Flag::by_key(value)
                    .map(|flag| flag.code.to_string())
                    .unwrap_or_else(|| value.to_string());
                let toggle = if values[1].starts_with('1') { 'E' } else { 'D' };
                format!("{}{}", toggle, code)
            }
            Argument::SolarId => {
                let mut id = format!("{:02}{}", value.len(), value);
                while id.len() < SOLAR_ID_WIDTH + 2 {
                    id.push('0');
                }
                id
            }
        };

        Ok(encoded)
    }
} // }}}

// {{{ ArgumentShape
/// Ordered argument encodings of one command and the separator between them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArgumentShape {
    pub arguments: &'static [Argument],
    pub separator: &'static str,
}

impl ArgumentShape {
    const NONE: Self = Self::joined(&[]);

    const fn joined(arguments: &'static [Argument]) -> Self {
        Self {
            arguments,
            separator: "",
        }
    }

    const fn comma(arguments: &'static [Argument]) -> Self {
        Self {
            arguments,
            separator: ",",
        }
    }

    /// Number of command line values the shape consumes.
    pub fn arity(&self) -> usize {
        self.arguments.iter().map(|a| a.arity()).sum()
    }

    pub fn encode(&self, args: &[&str]) -> Result<String> {
        if args.len() < self.arity() {
            return Err(Error::InvalidArgument(format!(
                "{} arguments required, {} given",
                self.arity(),
                args.len()
            )));
        }

        let mut rest = args;
        let mut parts = Vec::with_capacity(self.arguments.len());
        for argument in self.arguments {
            let (values, tail) = rest.split_at(argument.arity());
            parts.push(argument.encode(values)?);
            rest = tail;
        }

        Ok(parts.join(self.separator))
    }
}

impl Command {
    pub fn argument_shape(self) -> ArgumentShape {
        use Argument::*;

        match self {
            Command::Query(query) => match query {
                QueryCommand::YearGenerated => ArgumentShape::joined(&[Raw]),
                QueryCommand::MonthGenerated => ArgumentShape::joined(&[Raw, Int(2)]),
                QueryCommand::DayGenerated => ArgumentShape::joined(&[Raw, Int(2), Int(2)]),
                QueryCommand::ParallelRatedInformation | QueryCommand::ParallelGeneralStatus => {
                    ArgumentShape::joined(&[Number])
                }
                _ => ArgumentShape::NONE,
            },
            Command::Set(set) => match set {
                SetCommand::Loads => ArgumentShape::joined(&[Raw]),
                SetCommand::Flag => ArgumentShape::joined(&[FlagToggle]),
                SetCommand::BatteryMaxChargeCurrent | SetCommand::BatteryMaxAcChargeCurrent => {
                    ArgumentShape::comma(&[Char, Int(3)])
                }
                SetCommand::AcOutputFreq => ArgumentShape::joined(&[Int(2)]),
                SetCommand::BatteryMaxChargeVoltage | SetCommand::BatteryChargingThresholds => {
                    ArgumentShape::comma(&[Decimal(3), Decimal(3)])
                }
                SetCommand::AcOutputRatedVoltage => ArgumentShape::joined(&[IntTimesTen(4)]),
                SetCommand::OutputSourcePriority
                | SetCommand::SolarPowerPriority
                | SetCommand::AcInputVoltageRange
                | SetCommand::BatteryType => ArgumentShape::joined(&[Char]),
                SetCommand::ChargingSourcePriority | SetCommand::OutputModel => {
                    ArgumentShape::comma(&[Char, Char])
                }
                SetCommand::BatteryCutoffVoltage => ArgumentShape::joined(&[Decimal(3)]),
                SetCommand::SolarConfig => ArgumentShape::joined(&[SolarId]),
                SetCommand::DateTime => ArgumentShape::joined(&[
                    Year2000,
                    Int(2),
                    Int(2),
                    Int(2),
                    Int(2),
                    Int(2),
                ]),
                SetCommand::AcChargeTimeBucket | SetCommand::AcSupplyLoadTimeBucket => {
                    ArgumentShape::comma(&[Time, Time])
                }
                SetCommand::Defaults | SetCommand::ClearGenerated => ArgumentShape::NONE,
            },
        }
    }
} // }}}

/// Builds the wire command for identifier `id`.
///
/// The frame is `^`, the mode, a three digit length, the mnemonic and the
/// encoded arguments. The length counts every byte from the length field
/// itself to the end of the frame.
pub fn build(id: u16, args: &[&str]) -> Result<String> {
    let command = Command::try_from(id)?;
    build_command(command, args)
}

pub fn build_command(command: Command, args: &[&str]) -> Result<String> {
    let payload = command.argument_shape().encode(args)?;
    let length = LENGTH_FIELD + command.mnemonic().len() + payload.len();
    if length > 999 {
        return Err(Error::InvalidArgument(format!(
            "command of {} bytes does not fit the length field",
            length
        )));
    }

    let frame = format!(
        "^{}{:03}{}{}",
        char::from(command.mode()),
        length,
        command.mnemonic(),
        payload
    );
    trace!("built {:?} for {:?}", frame, command);

    Ok(frame)
}

fn int(value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{} is not an integer", value)))
}

fn out_of_range(value: &str) -> Error {
    Error::InvalidArgument(format!("{} is out of range", value))
}

fn tenths(value: &str) -> Result<i64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{} is not a number", value)))?;
    Ok((parsed * 10.0).round() as i64)
}
