#[macro_use]
extern crate prettytable;

use anyhow::{Context, Result};
use clap::{ArgGroup, Command, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use clap_verbosity_flag::Verbosity;
use console::style;
use glmr::gitlab::merge_request::{CreateMergeRequest, MergeRequest, StateEvent, UpdateMergeRequest};
use glmr::gitlab::merge_request_query::{MergeRequestsQuery, StateFilter};
use glmr::gitlab::project::ProjectId;
use std::io;
use std::path::PathBuf;
use tracing_log::AsTrace;

mod repo;
mod settings;
mod table;

use crate::repo::Repo;
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "glmr", author, version, about, long_about = None)] // Read from `Cargo.toml`
struct Cli {
    // If provided, outputs the completion file for given shell
    #[arg(long = "generate", value_enum)]
    generator: Option<Shell>,
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    workdir: Option<PathBuf>,
    /// numeric id or `namespace/project`, the `origin` remote of workdir is used by default.
    #[arg(short, long, global = true, env = "GLMR_PROJECT")]
    project: Option<String>,
    #[command(flatten)]
    verbose: Verbosity,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ArgState {
    Opened,
    Closed,
    Merged,
    Locked,
    All,
}

impl From<ArgState> for StateFilter {
    fn from(v: ArgState) -> Self {
        match v {
            ArgState::Opened => StateFilter::Opened,
            ArgState::Closed => StateFilter::Closed,
            ArgState::Merged => StateFilter::Merged,
            ArgState::Locked => StateFilter::Locked,
            ArgState::All => StateFilter::All,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command()]
    List {
        /// across every project visible to the token, --project is ignored
        #[arg(short, long)]
        all_projects: bool,
        #[arg(short, long, value_enum, default_value_t = ArgState::Opened)]
        state: ArgState,
        #[arg(long)]
        author: Option<String>,
        #[arg(short, long = "label")]
        labels: Vec<String>,
        #[arg(long)]
        source_branch: Option<String>,
        #[arg(long)]
        target_branch: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },

    #[command()]
    Show { iid: u64 },

    #[command()]
    Create {
        /// current branch by default
        #[arg(long)]
        source: Option<String>,
        /// project's default branch by default
        #[arg(long)]
        target: Option<String>,
        /// summary of the last commit by default
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long = "label")]
        labels: Vec<String>,
        #[arg(long)]
        remove_source_branch: bool,
        #[arg(long)]
        squash: bool,
    },

    #[command(group(ArgGroup::new("state_event").args(["close", "reopen"])))]
    Update {
        iid: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        close: bool,
        #[arg(long)]
        reopen: bool,
        /// replaces all labels
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },

    #[command()]
    Accept {
        iid: u64,
        #[arg(short, long)]
        message: String,
    },

    #[command()]
    Delete { iid: u64 },
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn resolve_project(project: Option<String>, repo: &Result<Repo>) -> Result<ProjectId> {
    if let Some(project) = project {
        return Ok(ProjectId::from(project));
    }

    let repo = repo.as_ref().map_err(|e| anyhow::anyhow!("{e:#}"))
        .context("No --project given and workdir is not a git repository")?;

    repo.project_path(None).map(ProjectId::from)
}

fn print_merge_request(mr: &MergeRequest) {
    println!(
        "{} {} {}",
        style(mr.reference()).bold(),
        mr.title,
        style(format!("[{}]", mr.state)).dim(),
    );
    println!("{} → {}", mr.source_branch, mr.target_branch);
    println!("{}", style(&mr.web_url).blue().underlined());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.log_level_filter().as_trace())
        .with_writer(io::stderr)
        .init();

    if let Some(generator) = cli.generator {
        let mut cmd = Cli::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);

        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Settings::new().context("Cannot load settings")?;
    let client = glmr::Client::new(&config.gitlab)?;
    let repo = Repo::new(cli.workdir.as_deref());

    match command {
        Commands::List {
            all_projects,
            state,
            author,
            labels,
            source_branch,
            target_branch,
            search,
            limit,
        } => {
            let options = MergeRequestsQuery {
                state: Some(state.into()),
                author_username: author,
                labels,
                source_branch,
                target_branch,
                search,
                ..Default::default()
            };

            let mut mrs = if all_projects {
                client.merge_requests().list_all(options).await?
            } else {
                let project = resolve_project(cli.project, &repo)?;
                client.merge_requests().list(project, options).await?
            };

            if let Some(limit) = limit {
                mrs.truncate(limit);
            }

            table::merge_requests(&mrs).printstd();
        }

        Commands::Show { iid } => {
            let project = resolve_project(cli.project, &repo)?;
            let mr = client.merge_requests().get(project, iid).await?;

            print_merge_request(&mr);
            if let Some(description) = mr.description.as_deref().filter(|d| !d.is_empty()) {
                println!("\n{description}");
            }
        }

        Commands::Create {
            source,
            target,
            title,
            description,
            labels,
            remove_source_branch,
            squash,
        } => {
            let project = resolve_project(cli.project, &repo)?;

            let source = match source {
                Some(source) => source,
                None => repo.as_ref().map_err(|e| anyhow::anyhow!("{e:#}"))?.current_branch()?,
            };
            let title = match title {
                Some(title) => title,
                None => repo.as_ref().map_err(|e| anyhow::anyhow!("{e:#}"))?.head_summary()?,
            };
            let target = match target {
                Some(target) => target,
                None => client
                    .projects()
                    .get(project.clone())
                    .await?
                    .default_branch
                    .context("Project has no default branch, pass --target")?,
            };

            let mut request = CreateMergeRequest::new(project, source, target, title);
            request.description = description;
            request.labels = Some(labels).filter(|l| !l.is_empty());
            request.remove_source_branch = remove_source_branch.then_some(true);
            request.squash = squash.then_some(true);

            let mr = client.merge_requests().create(&request).await?;

            print_merge_request(&mr);
        }

        Commands::Update {
            iid,
            title,
            description,
            target,
            close,
            reopen,
            labels,
        } => {
            let project = resolve_project(cli.project, &repo)?;

            let mut request = UpdateMergeRequest::new(project, iid);
            request.title = title;
            request.description = description;
            request.target_branch = target;
            request.labels = Some(labels).filter(|l| !l.is_empty());
            request.state_event = match (close, reopen) {
                (true, _) => Some(StateEvent::Close),
                (_, true) => Some(StateEvent::Reopen),
                _ => None,
            };

            if request.is_empty() {
                anyhow::bail!("Nothing to update");
            }

            let mr = client.merge_requests().update(&request).await?;

            print_merge_request(&mr);
        }

        Commands::Accept { iid, message } => {
            let project = resolve_project(cli.project, &repo)?;
            let mr = client.merge_requests().accept(project, iid, &message).await?;

            print_merge_request(&mr);
            println!("{}", style("✔ merged!").green().italic());
        }

        Commands::Delete { iid } => {
            let project = resolve_project(cli.project, &repo)?;
            client.merge_requests().delete(project, iid).await?;

            println!("{}", style(format!("✔ !{iid} deleted")).green().italic());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
