//! Session commands typed at the prompt.

use crm_core::Direction;
use shared::domain::LeadId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Board,
    Stats,
    Add,
    Broadcast,
    Move { lead_id: LeadId, direction: Direction },
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  board                  show the pipeline by stage
  stats                  totals, conversion and active leads
  add                    create a lead
  broadcast              create a broadcast
  move <id> next|prev    move a lead one stage
  help                   this text
  quit                   leave the session";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".to_string());
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "board" | "b" => Command::Board,
        "stats" | "s" => Command::Stats,
        "add" | "a" => Command::Add,
        "broadcast" | "bc" => Command::Broadcast,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "move" | "m" => {
            let id = parts
                .next()
                .ok_or_else(|| "usage: move <id> next|prev".to_string())?;
            let lead_id = id
                .parse::<i64>()
                .map(LeadId)
                .map_err(|_| format!("invalid lead id '{id}'"))?;
            let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
                Some("next" | "forward" | "+") => Direction::Forward,
                Some("prev" | "back" | "backward" | "-") => Direction::Backward,
                _ => return Err("usage: move <id> next|prev".to_string()),
            };
            Command::Move { lead_id, direction }
        }
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };

    if parts.next().is_some() && !matches!(command, Command::Move { .. }) {
        return Err(format!("'{head}' takes no arguments"));
    }
    Ok(command)
}
