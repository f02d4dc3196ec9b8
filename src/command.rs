use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use ulid::Ulid;

use crate::engine::{Engine, EngineError};
use crate::limits::MAX_BATCH_SIZE;
use crate::model::*;

/// One line of driver input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    AddUnits { category: Category, count: usize },
    RemoveUnit { id: Ulid },
    Reserve { category: Category, start: Ms, end: Ms },
    ReserveDays { category: Category, start: Ms, days: i64 },
    MoveReservation { id: Ulid, start: Ms, end: Ms },
    Units { category: Category },
    Reservations,
}

#[derive(Debug)]
pub enum CommandError {
    Parse(serde_json::Error),
    Engine(EngineError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Parse(e) => write!(f, "invalid command: {e}"),
            CommandError::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<EngineError> for CommandError {
    fn from(e: EngineError) -> Self {
        CommandError::Engine(e)
    }
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    serde_json::from_str(line).map_err(CommandError::Parse)
}

/// Run a command and render its result as a JSON value.
pub async fn execute(
    engine: &Engine,
    cmd: Command,
    cascade_removal: bool,
) -> Result<Value, CommandError> {
    let value = match cmd {
        Command::AddUnits { category, count } => {
            if count > MAX_BATCH_SIZE {
                return Err(EngineError::LimitExceeded("batch too large").into());
            }
            let units = engine.add_units_of(category, count).await;
            json!({ "added": units })
        }
        Command::RemoveUnit { id } => {
            let purged = engine.remove_unit_by_id(id, cascade_removal).await?;
            json!({ "removed": id, "purged": purged })
        }
        Command::Reserve { category, start, end } => {
            let res = engine.request_reservation(start, end, category).await?;
            json!({ "reservation": res })
        }
        Command::ReserveDays { category, start, days } => {
            let res = engine.request_reservation_days(start, days, category).await?;
            json!({ "reservation": res })
        }
        Command::MoveReservation { id, start, end } => {
            if end < start {
                return Err(EngineError::InvalidRange { start, end }.into());
            }
            let res = engine
                .edit_reservation(id, |r| {
                    r.set_start(start);
                    r.set_end(end);
                })
                .await?;
            json!({ "reservation": res })
        }
        Command::Units { category } => json!({ "units": engine.units_of(category).await }),
        Command::Reservations => json!({ "reservations": engine.reservations().await }),
    };
    Ok(value)
}

/// Parse + execute one input line. Errors come back as `{"error": ...}`.
pub async fn handle_line(engine: &Engine, line: &str, cascade_removal: bool) -> Value {
    let result = match parse(line) {
        Ok(cmd) => execute(engine, cmd, cascade_removal).await,
        Err(e) => Err(e),
    };
    result.unwrap_or_else(|e| json!({ "error": e.to_string() }))
}
