//! Interactive client ID resolution

use std::io::{self, BufRead, Write};

use anyhow::Result;

use rp_core::ClientId;

/// Pick the client ID from the command line, then the config file, then
/// the build-time default
///
/// Returns `None` when none of them is set and the user has to be asked.
pub fn resolve_client_id(cli: Option<&str>, config: Option<&str>) -> Option<ClientId> {
    cli.into_iter()
        .chain(config)
        .map(ClientId::new)
        .find(|id| !id.is_empty())
        .or_else(ClientId::build_time_default)
}

const CLIENT_ID_STEPS: [&str; 4] = [
    "Go to https://discord.com/developers/applications",
    "Click 'New Application' and give it a name",
    "Copy the 'Application ID' from the General Information page",
    "Enter it in the prompt below",
];

/// Ask for the client ID on stdin
pub fn prompt_client_id() -> Result<ClientId> {
    prompt_client_id_from(&mut io::stdin().lock(), &mut io::stdout())
}

pub fn prompt_client_id_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<ClientId> {
    writeln!(output, "No client ID found in DISCORD_CLIENT_ID, --client-id or the config file.")?;
    writeln!(output)?;
    writeln!(output, "To get a client ID:")?;
    for (step, text) in CLIENT_ID_STEPS.iter().enumerate() {
        writeln!(output, "{}. {}", step + 1, text)?;
    }
    writeln!(output)?;
    write!(output, "Enter your application's client ID: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let id = ClientId::new(line);
    if id.is_empty() {
        anyhow::bail!("Client ID cannot be empty");
    }

    Ok(id)
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is no
pub fn confirm(question: &str) -> Result<bool> {
    confirm_from(question, &mut io::stdin().lock(), &mut io::stdout())
}

pub fn confirm_from<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "{} (y/N): ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
