//! Line-driven live session
//!
//! Each line edits one input (`price=`, `surface=`, `rooms=`, `mode=`,
//! `city=`) or runs a command (`show`, `export [path]`, `help`, `quit`).
//! Every change goes through the orchestrator, so typing several edits in a
//! row triggers a single simulation once the debounce window has elapsed.

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use rentsim_core::model::{OperatingMode, RoomType, SimulationInputs};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::display::render_view;
use crate::orchestrator::SimulationHandle;
use crate::report::{ReportExporter, TextReportExporter};

pub const HELP: &str = "\
Commands:
  price=<euros>       purchase price (50 000 to 1 000 000)
  surface=<m2>        surface (10 to 200)
  rooms=<studio|t2|t3|t4>
  mode=<long|short>   long-term lease or short-term rental
  city=<name>         empty to reset
  show                print the current result
  export [path]       write the report
  help                this message
  quit
";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),

    #[error("invalid value {value:?} for {field}")]
    InvalidValue { field: &'static str, value: String },
}

/// A single edit of the simulation inputs
#[derive(Debug, Clone, PartialEq)]
pub enum InputChange {
    Price(f64),
    Surface(f64),
    Rooms(RoomType),
    Mode(OperatingMode),
    City(String),
}

impl InputChange {
    pub fn apply(self, inputs: &mut SimulationInputs) {
        match self {
            InputChange::Price(price) => inputs.price = price,
            InputChange::Surface(surface) => inputs.surface = surface,
            InputChange::Rooms(room_type) => inputs.room_type = room_type,
            InputChange::Mode(mode) => inputs.operating_mode = mode,
            InputChange::City(city) => inputs.city = city,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WatchCommand {
    Set(InputChange),
    Show,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

/// Parse an amount such as `250000`, `250 000`, `250_000 €` or `250k`.
fn parse_amount(field: &'static str, value: &str) -> Result<f64, ParseCommandError> {
    let invalid = || ParseCommandError::InvalidValue {
        field,
        value: value.to_string(),
    };

    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '€')
        .collect::<String>()
        .replace(',', ".")
        .to_lowercase();
    let (digits, factor) = match cleaned.strip_suffix('k') {
        Some(digits) => (digits, 1_000.0),
        None => (cleaned.as_str(), 1.0),
    };

    let amount: f64 = digits.parse().map_err(|_| invalid())?;
    if !amount.is_finite() {
        return Err(invalid());
    }
    Ok(amount * factor)
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<WatchCommand>, ParseCommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some((key, value)) = line.split_once('=') {
        let value = value.trim();
        let change = match key.trim().to_lowercase().as_str() {
            "price" => InputChange::Price(parse_amount("price", value)?),
            "surface" => InputChange::Surface(parse_amount("surface", value)?),
            "rooms" => InputChange::Rooms(RoomType::from_str(value).map_err(|_| {
                ParseCommandError::InvalidValue {
                    field: "rooms",
                    value: value.to_string(),
                }
            })?),
            "mode" => InputChange::Mode(OperatingMode::from_str(value).map_err(|_| {
                ParseCommandError::InvalidValue {
                    field: "mode",
                    value: value.to_string(),
                }
            })?),
            "city" => InputChange::City(value.to_string()),
            _ => return Err(ParseCommandError::Unknown(line.to_string())),
        };
        return Ok(Some(WatchCommand::Set(change)));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let command = match command.to_lowercase().as_str() {
        "show" => WatchCommand::Show,
        "export" => WatchCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "?" => WatchCommand::Help,
        "quit" | "exit" | "q" => WatchCommand::Quit,
        _ => return Err(ParseCommandError::Unknown(line.to_string())),
    };
    Ok(Some(command))
}

/// Run a live session until `quit` or end of input.
///
/// Every published view is written to `out` as it changes.
pub async fn run_watch<R, W>(
    handle: &SimulationHandle,
    exporter: &dyn ReportExporter,
    mut inputs: SimulationInputs,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut views = handle.subscribe();
    handle.update(inputs.clone());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(WatchCommand::Quit)) => break,
                    Ok(Some(WatchCommand::Set(change))) => {
                        tracing::debug!(?change, "Input changed");
                        change.apply(&mut inputs);
                        handle.update(inputs.clone());
                    }
                    Ok(Some(WatchCommand::Show)) => {
                        write!(out, "{}", render_view(&handle.current()))?;
                    }
                    Ok(Some(WatchCommand::Export(path))) => {
                        let view = handle.current();
                        let exported = match path {
                            Some(path) => TextReportExporter::to_file(path).export_view(&view),
                            None => exporter.export_view(&view),
                        };
                        match exported {
                            Ok(path) => writeln!(out, "Report written to {}", path.display())?,
                            Err(e) => writeln!(out, "Cannot export: {e}")?,
                        }
                    }
                    Ok(Some(WatchCommand::Help)) => out.write_all(HELP.as_bytes())?,
                    Err(e) => writeln!(out, "{e}")?,
                }
                out.flush()?;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                write!(out, "{}", render_view(&view))?;
                out.flush()?;
            }
        }
    }

    handle.dispose();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::tempdir;
    use tokio::io::{AsyncWriteExt, BufReader};

    use super::*;
    use crate::source::LocalMarketData;

    #[test]
    fn test_parse_input_changes() {
        assert_eq!(
            parse_line("price=250 000").unwrap(),
            Some(WatchCommand::Set(InputChange::Price(250_000.0)))
        );
        assert_eq!(
            parse_line("price = 180k").unwrap(),
            Some(WatchCommand::Set(InputChange::Price(180_000.0)))
        );
        assert_eq!(
            parse_line("surface=42,5").unwrap(),
            Some(WatchCommand::Set(InputChange::Surface(42.5)))
        );
        assert_eq!(
            parse_line("rooms=T3").unwrap(),
            Some(WatchCommand::Set(InputChange::Rooms(RoomType::T3)))
        );
        assert_eq!(
            parse_line("mode=short").unwrap(),
            Some(WatchCommand::Set(InputChange::Mode(OperatingMode::ShortTerm)))
        );
        assert_eq!(
            parse_line("city=Saint-Denis").unwrap(),
            Some(WatchCommand::Set(InputChange::City("Saint-Denis".to_string())))
        );
        assert_eq!(
            parse_line("city=").unwrap(),
            Some(WatchCommand::Set(InputChange::City(String::new())))
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("show").unwrap(), Some(WatchCommand::Show));
        assert_eq!(parse_line("QUIT").unwrap(), Some(WatchCommand::Quit));
        assert_eq!(parse_line("export").unwrap(), Some(WatchCommand::Export(None)));
        assert_eq!(
            parse_line("export  out/report.txt ").unwrap(),
            Some(WatchCommand::Export(Some(PathBuf::from("out/report.txt"))))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_line("rooms=t7"),
            Err(ParseCommandError::InvalidValue { field: "rooms", .. })
        ));
        assert!(matches!(
            parse_line("price=cheap"),
            Err(ParseCommandError::InvalidValue { field: "price", .. })
        ));
        assert!(matches!(
            parse_line("colour=blue"),
            Err(ParseCommandError::Unknown(_))
        ));
        assert!(matches!(
            parse_line("dance"),
            Err(ParseCommandError::Unknown(_))
        ));
    }

    #[test]
    fn test_apply_change() {
        let mut inputs = SimulationInputs::default();
        InputChange::City("Pantin".to_string()).apply(&mut inputs);
        InputChange::Rooms(RoomType::Studio).apply(&mut inputs);
        assert_eq!(inputs.city, "Pantin");
        assert_eq!(inputs.room_type, RoomType::Studio);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_prints_results_and_exports() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("report.txt");
        let handle = SimulationHandle::spawn(
            Arc::new(LocalMarketData::with_latency(Duration::from_millis(100))),
            Duration::from_millis(500),
        );
        let exporter = TextReportExporter::in_directory(dir.path());

        let (mut writer, reader) = tokio::io::duplex(1024);
        let script = format!(
            "city=Vincennes\nexport {}\nrooms=t9\nquit\n",
            report.display()
        );
        tokio::spawn(async move {
            for line in script.lines() {
                tokio::time::sleep(Duration::from_secs(2)).await;
                writer.write_all(format!("{line}\n").as_bytes()).await.unwrap();
            }
        });

        let mut out = Vec::new();
        run_watch(
            &handle,
            &exporter,
            SimulationInputs::default(),
            BufReader::new(reader),
            &mut out,
        )
        .await
        .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Fetching market data for Paris..."));
        assert!(out.contains("Paris · 200 000 €"));
        assert!(out.contains("Vincennes · 200 000 €"));
        assert!(out.contains("[MeilleursAgents (live)]"));
        assert!(out.contains(&format!("Report written to {}", report.display())));
        assert!(out.contains("invalid value \"t9\" for rooms"));
        assert!(std::fs::read_to_string(&report).unwrap().contains("Vincennes"));
    }
}
