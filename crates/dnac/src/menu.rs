//! Interactive numbered menu.
//!
//! Reads choices line by line from any `BufRead`, so the loop runs the same
//! over a terminal or a pipe. Operation failures are printed and the loop
//! keeps going; only choice 4 or end of input leaves it.

use std::io::{BufRead, Write};

use dnac_api::DnacClient;

use crate::cli::GlobalOpts;
use crate::commands::{auth, devices, interfaces};
use crate::error::CliError;
use crate::output;

const BANNER: &str = "Automation Network Config Tool";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Authenticate,
    ShowDevices,
    ShowInterfaces,
    Finish,
}

impl MenuChoice {
    const ALL: [Self; 4] = [
        Self::Authenticate,
        Self::ShowDevices,
        Self::ShowInterfaces,
        Self::Finish,
    ];

    /// Parse a menu selection, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Authenticate),
            "2" => Some(Self::ShowDevices),
            "3" => Some(Self::ShowInterfaces),
            "4" => Some(Self::Finish),
            _ => None,
        }
    }

    fn number(self) -> u8 {
        match self {
            Self::Authenticate => 1,
            Self::ShowDevices => 2,
            Self::ShowInterfaces => 3,
            Self::Finish => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Authenticate => "Authenticate",
            Self::ShowDevices => "Show network devices",
            Self::ShowInterfaces => "Show device interfaces",
            Self::Finish => "Finish",
        }
    }
}

/// Run the menu until the user finishes or input runs out.
pub async fn run_menu<R: BufRead, W: Write>(
    client: &mut DnacClient,
    global: &GlobalOpts,
    mut input: R,
    mut out: W,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let rule = "*".repeat(50);
    writeln!(out, "\n{rule}\n{BANNER}\n{rule}")?;

    loop {
        writeln!(out, "\nMain Menu:")?;
        for choice in MenuChoice::ALL {
            writeln!(out, "  {}. {}", choice.number(), choice.label())?;
        }
        write!(out, "\nWhat do you want to do? (1-4): ")?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(out)?;
            tracing::debug!("input closed, leaving menu");
            return Ok(());
        };

        let result = match MenuChoice::parse(&line) {
            Some(MenuChoice::Authenticate) => auth::authenticate(client, global).await,
            Some(MenuChoice::ShowDevices) => devices::list(client, global).await,
            Some(MenuChoice::ShowInterfaces) => {
                write!(out, "Enter device IP address: ")?;
                out.flush()?;
                match read_line(&mut input)? {
                    Some(ip) => interfaces::list(client, ip.trim(), global).await,
                    None => return Ok(()),
                }
            }
            Some(MenuChoice::Finish) => {
                writeln!(out, "Finish this tool")?;
                return Ok(());
            }
            None => {
                writeln!(out, "Invalid option. Try again.")?;
                continue;
            }
        };

        match result {
            Ok(text) => writeln!(out, "{text}")?,
            Err(err) => {
                tracing::debug!(error = %err, "menu operation failed");
                writeln!(out, "{}", output::failure(&err.message_with_causes(), color))?;
            }
        }
    }
}

/// One line without its terminator, or `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>, CliError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}
