mod cli;
mod render;
mod views;

use std::{process::ExitCode, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, ClientEvent, LinkChoice, PortfolioClient, Router, ViewScope,
};
use shared::domain::InitiativeId;
use tokio::sync::broadcast::{error::TryRecvError, Receiver};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Command, WizardArgs},
    views::{ViewResult, WizardRequest},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            render::banner(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` when the view failed and its banner has been printed.
async fn run(cli: Cli) -> Result<bool> {
    let mut settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(url) = cli.api_url {
        settings.api_base_url = url;
    }
    let client = PortfolioClient::from_settings(&settings)
        .map_err(|err| anyhow::anyhow!(err.display_message()))
        .context("failed to build API client")?;

    let location = cli.command.location();
    debug!(view = %location, "console: opening view");
    let mut router = Router::starting_at(location);
    let mut events = client.subscribe_events();

    // Read before the view starts so a bad path is reported like any other
    // argument error.
    let wizard_request = match &cli.command {
        Command::Wizard(args) => Some(wizard_request(args)?),
        _ => None,
    };

    let mut scope = ViewScope::new("console");
    let task = scope.spawn(dispatch(client.clone(), cli.command, wizard_request));
    let outcome = tokio::select! {
        result = task.join() => result,
        _ = tokio::signal::ctrl_c() => {
            scope.cancel_all();
            println!();
            render::banner("Cancelled");
            return Ok(false);
        }
    };

    let ok = match outcome {
        Ok(Some(navigation)) => {
            router.navigate(navigation);
            true
        }
        Ok(None) => true,
        Err(err) => {
            warn!(error = %err, "console: view failed");
            render::banner(&err.display_message());
            false
        }
    };

    drain_events(&mut events, &mut router);
    Ok(ok)
}

fn wizard_request(args: &WizardArgs) -> Result<WizardRequest> {
    let problem = match (&args.problem, &args.problem_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read problem statement '{}'", path.display()))?,
        (None, None) => bail!("provide a problem statement or --problem-file"),
    };
    let choice = if let Some(id) = args.select {
        Some(LinkChoice::Selected(InitiativeId(id)))
    } else if args.no_match {
        Some(LinkChoice::NoMatch)
    } else if args.skip {
        Some(LinkChoice::Skip)
    } else {
        None
    };
    Ok(WizardRequest {
        problem,
        pattern: args.pattern.clone(),
        target: args.initiative.map(InitiativeId),
        recommend: args.recommend,
        choice,
    })
}

async fn dispatch(
    client: Arc<PortfolioClient>,
    command: Command,
    wizard: Option<WizardRequest>,
) -> ViewResult {
    match command {
        Command::Login { username, password } => views::login(client, username, password).await,
        Command::Logout => views::logout(client).await,
        Command::Whoami => views::whoami(client).await,
        Command::Initiatives(cmd) => views::initiatives(client, cmd).await,
        Command::Balance => views::balance(client).await,
        Command::Roadmap => views::roadmap(client).await,
        Command::Wizard(_) => match wizard {
            Some(request) => views::wizard(client, request).await,
            None => Ok(None),
        },
        Command::Business(cmd) => views::business(client, cmd).await,
        Command::Datasets(cmd) => views::datasets(client, cmd).await,
        Command::Prep(cmd) => views::prep(client, cmd).await,
        Command::Models(cmd) => views::models(client, cmd).await,
        Command::Deployments(cmd) => views::deployments(client, cmd).await,
        Command::Monitoring(cmd) => views::monitoring(client, cmd).await,
        Command::Benefits(cmd) => views::benefits(client, cmd).await,
        Command::Reports(cmd) => views::reports(client, cmd).await,
        Command::Analytics(cmd) => views::analytics(client, cmd).await,
    }
}

/// Reports what happened in the background while the view ran.
fn drain_events(events: &mut Receiver<ClientEvent>, router: &mut Router) {
    loop {
        let event = match events.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Lagged(skipped)) => {
                debug!(skipped, "console: missed events");
                continue;
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        };
        match &event {
            ClientEvent::AssistCompleted { kind } => println!("({} complete)", kind.label()),
            ClientEvent::Error(message) => render::banner(message),
            ClientEvent::Unauthorized => {
                if router.handle_event(&event) {
                    render::banner(&format!(
                        "Session expired. Sign in again with `portfolio login` (then return to {}).",
                        next_of(router)
                    ));
                }
            }
            ClientEvent::LoggedIn | ClientEvent::LoggedOut => {
                router.handle_event(&event);
            }
        }
    }
}

fn next_of(router: &Router) -> String {
    router
        .current()
        .query_param("next")
        .unwrap_or_else(|| "/dashboard".to_string())
}
