//! Command definitions
//!
//! A verb plus its parameters, and the router that runs it.

use crate::connection::Connection;
use crate::error::Result;
use crate::record::Record;

/// A parsed, validated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset every slot to free
    Create,

    /// Fetch one record
    Get { id: usize },

    /// Fill a free slot
    Set {
        id: usize,
        name: String,
        email: String,
    },

    /// Free a slot
    Delete { id: usize },

    /// All occupied records
    List,
}

impl Command {
    /// Verb name, for error reporting
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create => "create",
            Command::Get { .. } => "get",
            Command::Set { .. } => "set",
            Command::Delete { .. } => "delete",
            Command::List => "list",
        }
    }

    /// True if the command changes the store and should be persisted
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Create | Command::Set { .. } | Command::Delete { .. }
        )
    }
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing to render
    None,

    /// One record (get)
    Record(Record),

    /// Occupied records in id order (list)
    Records(Vec<Record>),
}

/// Execute a command
///
/// Routes commands to the verb functions. Does not persist.
pub fn execute(conn: &mut Connection, command: Command) -> Result<Output> {
    match command {
        Command::Create => {
            super::create(conn);
            Ok(Output::None)
        }
        Command::Get { id } => super::get(conn, id).cloned().map(Output::Record),
        Command::Set { id, name, email } => {
            super::set(conn, id, &name, &email)?;
            Ok(Output::None)
        }
        Command::Delete { id } => {
            super::delete(conn, id)?;
            Ok(Output::None)
        }
        Command::List => Ok(Output::Records(super::list(conn).cloned().collect())),
    }
}
