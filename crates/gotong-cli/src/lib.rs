// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod output;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use gotong_core::{resolve_gotong_config_path, ConfigPathScope, ExitCode, Locale, MachineError};
use gotong_model::CampaignId;
use serde_json::json;
use std::process::ExitCode as ProcessExitCode;

use crate::output::{emit_error, CliError, OutputMode};

const GOTONG_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "gotong", version)]
#[command(about = "GotongChain operations CLI")]
#[command(help_template = GOTONG_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  GOTONG_CONTRACT_ADDRESS  Deployed crowdfunding contract\n  GOTONG_RPC_URL           JSON-RPC endpoint for reads\n  GOTONG_WALLET_URL        Signing provider for writes\n  GOTONG_LOG_LEVEL         Log verbosity override"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    trace: bool,
    /// Message language (`id` or `en`).
    #[arg(long, global = true)]
    locale: Option<Locale>,
    /// Account used for writes instead of asking the wallet provider.
    #[arg(long, global = true)]
    account: Option<String>,
    #[arg(long = "print-config-paths", default_value_t = false)]
    print_config_paths: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    Campaigns {
        #[command(subcommand)]
        command: CampaignsCommand,
    },
    /// Platform totals over every campaign.
    Stats,
    /// Resolve a web path to the page it renders.
    Open { path: String },
}

#[derive(Subcommand)]
enum CampaignsCommand {
    List,
    Show {
        id: CampaignId,
    },
    Create {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Target in ether.
        #[arg(long, default_value = "")]
        target: String,
        /// `YYYY-MM-DD` or an RFC 3339 timestamp.
        #[arg(long, default_value = "")]
        deadline: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    Donate {
        id: CampaignId,
        /// Amount in ether.
        #[arg(long, default_value = "")]
        amount: String,
    },
}

#[derive(Clone, Copy)]
pub(crate) struct LogFlags {
    pub quiet: bool,
    pub verbose: u8,
    pub trace: bool,
}

#[must_use]
pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.code()),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code.code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError::usage("invalid command line arguments")
                    .with_detail("error", &err.to_string()));
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    if cli.print_config_paths {
        emit_config_paths(output_mode.json).map_err(CliError::internal)?;
        return Ok(());
    }

    let command = cli.command.ok_or_else(|| CliError {
        exit_code: ExitCode::Usage,
        machine: MachineError::new("usage_error", "missing command; see --help"),
    })?;
    let ctx = commands::Context {
        output: output_mode,
        log: LogFlags {
            quiet: cli.quiet,
            verbose: cli.verbose,
            trace: cli.trace,
        },
        locale: cli.locale,
        account: cli.account,
    };

    match command {
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
        Commands::Open { path } => commands::open_route(&ctx, &path),
        Commands::Stats => commands::stats(&ctx),
        Commands::Campaigns { command } => match command {
            CampaignsCommand::List => commands::list_campaigns(&ctx),
            CampaignsCommand::Show { id } => commands::show_campaign(&ctx, id),
            CampaignsCommand::Create {
                title,
                description,
                target,
                deadline,
                image,
            } => commands::create_campaign(
                &ctx,
                gotong_model::CreateCampaignForm {
                    title,
                    description,
                    target,
                    deadline,
                    image,
                },
            ),
            CampaignsCommand::Donate { id, amount } => {
                commands::donate_to_campaign(&ctx, id, &amount)
            }
        },
    }
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

fn emit_config_paths(machine_json: bool) -> Result<(), String> {
    let payload = json!({
        "workspace_config": resolve_gotong_config_path(ConfigPathScope::Workspace),
        "user_config": resolve_gotong_config_path(ConfigPathScope::User),
    });
    let text = if machine_json {
        serde_json::to_string(&payload)
    } else {
        serde_json::to_string_pretty(&payload)
    }
    .map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommands() {
        let cli = Cli::try_parse_from([
            "gotong", "campaigns", "donate", "2", "--amount", "0.5", "--json", "--locale", "en",
        ])
        .expect("parse");
        assert!(cli.json);
        assert_eq!(cli.locale, Some(Locale::En));
        match cli.command {
            Some(Commands::Campaigns {
                command: CampaignsCommand::Donate { id, amount },
            }) => {
                assert_eq!(id, CampaignId::new(2));
                assert_eq!(amount, "0.5");
            }
            _ => panic!("expected donate command"),
        }
    }

    #[test]
    fn non_numeric_campaign_id_is_a_parse_error() {
        assert!(Cli::try_parse_from(["gotong", "campaigns", "show", "abc"]).is_err());
        assert!(Cli::try_parse_from(["gotong", "campaigns", "show", "-1"]).is_err());
    }
}
