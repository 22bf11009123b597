use crate::domain::money::Denomination;
use crate::error::{Result, VendingError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Select,
    Insert,
    Cancel,
    Return,
    Balance,
}

/// A raw row of a session script.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub action: Action,
    #[serde(default)]
    pub value: Option<String>,
}

/// One customer action at the machine.
#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    Select(String),
    /// Only legal denominations get this far; anything else is rejected while parsing.
    Insert(Denomination),
    Cancel,
    Return,
    Balance,
}

impl TryFrom<CommandRecord> for Command {
    type Error = VendingError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let value = record.value.filter(|v| !v.is_empty());
        match (record.action, value) {
            (Action::Select, Some(code)) => Ok(Command::Select(code)),
            (Action::Insert, Some(coin)) => coin.parse().map(Command::Insert),
            (Action::Select | Action::Insert, None) => Err(VendingError::ValidationError(
                format!("{:?} needs a value", record.action),
            )),
            (Action::Cancel, _) => Ok(Command::Cancel),
            (Action::Return, _) => Ok(Command::Return),
            (Action::Balance, _) => Ok(Command::Balance),
        }
    }
}

/// Reads a session script (`action, value`) from a CSV source.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    /// Returns an iterator over the script's commands; a bad row yields an
    /// error without ending the stream.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| Command::try_from(result?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "action, value\nselect, A1\ninsert, 0.50\nbalance,\nreturn,\ncancel,";
        let commands: Vec<Command> = CommandReader::new(data.as_bytes())
            .commands()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            commands,
            vec![
                Command::Select("A1".to_string()),
                Command::Insert(Denomination::FiftyPence),
                Command::Balance,
                Command::Return,
                Command::Cancel,
            ]
        );
    }

    #[test]
    fn test_insert_rejects_illegal_coin() {
        let data = "action, value\ninsert, 0.30\ninsert, 2.00";
        let results: Vec<Result<Command>> =
            CommandReader::new(data.as_bytes()).commands().collect();

        assert!(matches!(results[0], Err(VendingError::ValidationError(_))));
        assert_eq!(
            results[1].as_ref().unwrap(),
            &Command::Insert(Denomination::TwoPounds)
        );
    }

    #[test]
    fn test_insert_rejects_oversized_value() {
        let data = "action, value\ninsert, 1000000000000000000000000000\ninsert, 0.10";
        let results: Vec<Result<Command>> =
            CommandReader::new(data.as_bytes()).commands().collect();

        assert!(matches!(results[0], Err(VendingError::ValidationError(_))));
        assert_eq!(
            results[1].as_ref().unwrap(),
            &Command::Insert(Denomination::TenPence)
        );
    }

    #[test]
    fn test_missing_value() {
        let data = "action, value\nselect,";
        let results: Vec<Result<Command>> =
            CommandReader::new(data.as_bytes()).commands().collect();
        assert!(matches!(results[0], Err(VendingError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_action() {
        let data = "action, value\ndance, A1";
        let results: Vec<Result<Command>> =
            CommandReader::new(data.as_bytes()).commands().collect();
        assert!(matches!(results[0], Err(VendingError::CsvError(_))));
    }
}
