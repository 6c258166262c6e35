use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use storymaker_client::{GraphQuery, OutlineRequest, StoryStructure, StudioClient};
use storymaker_config::{ConfigFile, ResolvedConfig, StudioConfig};
use storymaker_flow::{RunResult, project};
use storymaker_studio::dashboard::{
  render_config, render_flow, render_graph, render_health, render_outline, render_qa, render_run,
};
use storymaker_studio::{
  FlowRunner, FlowState, HealthRow, OutlineView, QaView, TracingNotifier, WorldGraph,
};

/// StoryMaker - terminal studio for the StoryMaker service mesh
#[derive(Parser)]
#[command(name = "storymaker")]
#[command(version, about, long_about = None)]
struct Cli {
  /// JSON file overriding the environment configuration
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Print machine-readable JSON instead of text panels
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the story flow for a premise
  Run {
    #[arg(long)]
    premise: String,
  },

  /// Project a saved orchestration response (stdin if no file)
  Project { file: Option<PathBuf> },

  /// Check the health of every service
  Health,

  /// Run a QA check on a draft
  Qa {
    #[command(subcommand)]
    check: QaCheck,
  },

  /// Ask the narrative service for an outline
  Outline {
    #[arg(long)]
    premise: String,

    #[arg(long, default_value = "default")]
    world_id: String,

    /// Story structure the beats follow
    #[arg(long, value_enum, default_value = "hero_journey")]
    mode: Structure,
  },

  /// Summarize the world entity graph
  Graph {
    #[arg(long)]
    world_id: Option<String>,

    /// Free-text entity search
    #[arg(long)]
    q: Option<String>,
  },

  /// Print the number of recorded proofs
  Proofs,

  /// Print the resolved configuration
  Config,
}

#[derive(Subcommand)]
enum QaCheck {
  /// Cliché budget of a draft
  TropeBudget(DraftArgs),

  /// Setups and their payoffs
  PromisePayoff(DraftArgs),

  /// Both checks, run concurrently
  All(DraftArgs),
}

impl QaCheck {
  fn source(&self) -> &DraftArgs {
    match self {
      QaCheck::TropeBudget(source) | QaCheck::PromisePayoff(source) | QaCheck::All(source) => {
        source
      }
    }
  }
}

/// Where a QA check gets its draft.
#[derive(Args)]
struct DraftArgs {
  /// Draft text (stdin if absent)
  #[arg(long, conflicts_with = "from_outline")]
  draft: Option<String>,

  /// Use the beats of a fresh outline of --premise as the draft
  #[arg(long, requires = "premise")]
  from_outline: bool,

  #[arg(long, requires = "from_outline")]
  premise: Option<String>,

  #[arg(long, default_value = "default")]
  world_id: String,

  /// Story structure of the outline
  #[arg(long, value_enum, default_value = "hero_journey")]
  mode: Structure,
}

/// Story structures accepted by the narrative service.
#[derive(Clone, Copy, ValueEnum)]
enum Structure {
  #[value(name = "hero_journey")]
  HeroJourney,
  #[value(name = "harmon_8")]
  Harmon8,
  #[value(name = "kishotenketsu")]
  Kishotenketsu,
}

impl From<Structure> for StoryStructure {
  fn from(structure: Structure) -> Self {
    match structure {
      Structure::HeroJourney => StoryStructure::HeroJourney,
      Structure::Harmon8 => StoryStructure::Harmon8,
      Structure::Kishotenketsu => StoryStructure::Kishotenketsu,
    }
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storymaker=info")),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  let resolved = load_config(cli.config.as_deref())?;

  let Some(command) = cli.command else {
    println!("storymaker - use --help to see available commands");
    return Ok(());
  };

  match command {
    Commands::Project { file } => project_saved(file, cli.json),
    Commands::Config => {
      if cli.json {
        print_json(&resolved.config)
      } else {
        println!("{}", render_config(&resolved.config, &resolved.missing));
        Ok(())
      }
    }
    command => {
      let client = StudioClient::new(resolved.config).context("failed to create client")?;
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(async { run_command(command, client, cli.json).await })
    }
  }
}

fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
  let mut resolved = StudioConfig::from_env().context("invalid environment configuration")?;

  if let Some(path) = path {
    let file = ConfigFile::load(path)
      .with_context(|| format!("failed to load config file: {}", path.display()))?;
    resolved
      .config
      .apply_file(file)
      .with_context(|| format!("invalid config file: {}", path.display()))?;
  }

  Ok(resolved)
}

async fn run_command(command: Commands, client: StudioClient, json: bool) -> Result<()> {
  match command {
    Commands::Run { premise } => {
      let mut runner = FlowRunner::with_notifier(TracingNotifier);
      runner.run(&client, &premise).await?;

      match runner.state() {
        FlowState::Failed { error, .. } => {
          if !json {
            println!("{}", render_flow(runner.state()));
          }
          bail!("flow run failed: {}", error)
        }
        FlowState::Completed { projection, .. } if json => print_json(projection),
        state => {
          println!("{}", render_flow(state));
          Ok(())
        }
      }
    }

    Commands::Health => {
      let row = HealthRow::new(client.health_all().await);
      if json {
        print_json(&row.reports)?;
      } else {
        println!("{}", render_health(&row));
      }
      Ok(())
    }

    Commands::Qa { check } => {
      let draft = resolve_draft(&client, check.source()).await?;
      let view = match check {
        QaCheck::TropeBudget(_) => {
          let envelope = client
            .trope_budget(&draft)
            .await
            .context("trope budget check failed")?;
          QaView::from_envelopes(Some(&envelope), None)
        }
        QaCheck::PromisePayoff(_) => {
          let envelope = client
            .promise_payoff(&draft)
            .await
            .context("promise/payoff check failed")?;
          QaView::from_envelopes(None, Some(&envelope))
        }
        QaCheck::All(_) => QaView::run_checks(&client, &draft).await,
      };

      if json {
        print_json(&view)
      } else {
        println!("{}", render_qa(&view));
        Ok(())
      }
    }

    Commands::Outline {
      premise,
      world_id,
      mode,
    } => {
      let view = fetch_outline(&client, premise, world_id, mode).await?;
      if json {
        print_json(&view)
      } else {
        println!("{}", render_outline(&view));
        Ok(())
      }
    }

    Commands::Graph { world_id, q } => {
      let document = client
        .world_graph(&GraphQuery { world_id, q })
        .await
        .context("failed to fetch world graph")?;
      let graph = WorldGraph::new(&document);

      if json {
        print_json(&graph)
      } else {
        println!("{}", render_graph(&graph));
        Ok(())
      }
    }

    Commands::Proofs => {
      match client.proofs_count().await {
        Some(count) if json => print_json(&serde_json::json!({ "count": count }))?,
        Some(count) => println!("{}", count),
        None if json => print_json(&serde_json::json!({ "count": null }))?,
        None => println!("-"),
      }
      Ok(())
    }

    Commands::Project { .. } | Commands::Config => Ok(()),
  }
}

fn project_saved(file: Option<PathBuf>, json: bool) -> Result<()> {
  let body = match &file {
    Some(path) => std::fs::read_to_string(path)
      .with_context(|| format!("failed to read response file: {}", path.display()))?,
    None => read_stdin()?,
  };

  let result = RunResult::from_json(&body).context("failed to parse orchestration response")?;
  let projection = project(&result);

  if json {
    print_json(&projection)
  } else {
    println!("{}", render_run(&result, &projection));
    Ok(())
  }
}

async fn fetch_outline(
  client: &StudioClient,
  premise: String,
  world_id: String,
  mode: Structure,
) -> Result<OutlineView> {
  let request = OutlineRequest {
    world_id,
    premise,
    mode: mode.into(),
  };
  let envelope = client
    .narrative_outline(&request)
    .await
    .context("outline request failed")?;

  if let Some(error) = &envelope.error {
    bail!("outline failed: {}", error.message);
  }
  Ok(OutlineView::from_envelope(&envelope))
}

async fn resolve_draft(client: &StudioClient, source: &DraftArgs) -> Result<String> {
  if !source.from_outline {
    return draft_text(source.draft.clone());
  }

  let premise = source
    .premise
    .clone()
    .context("--from-outline needs --premise")?;
  let view = fetch_outline(client, premise, source.world_id.clone(), source.mode).await?;
  let draft = view.draft();
  if draft.trim().is_empty() {
    bail!("outline has no beat text to check");
  }
  Ok(draft)
}

fn draft_text(draft: Option<String>) -> Result<String> {
  let draft = match draft {
    Some(draft) => draft,
    None => read_stdin()?,
  };
  if draft.trim().is_empty() {
    bail!("draft must not be empty");
  }
  Ok(draft)
}

fn read_stdin() -> Result<String> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    bail!("nothing to read: pass a value or pipe it on stdin");
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read stdin")?;
  Ok(input)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
