use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use regatta_client::{
    BackendClient, ClientConfig, ResultsSource, SnapshotFile, fetch_report, render::render_grid,
};
use standings::{
    LowPoint, PointsTable, RankDirection, Regatta, ResultsBatch, ScoringSystem, Team, TeamId,
    dto::regatta::{CreateRegattaRequest, UpdateRegattaRequest},
    dto::snapshot::RegattaSnapshot,
    dto::team::TeamRequest,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "regatta")]
#[command(about = "Regatta standings and results tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the regatta backend API
    #[arg(long, env = "REGATTA_API_URL", global = true)]
    api_url: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ranked standings for a regatta
    Standings {
        regatta_id: String,

        /// Read teams and results from a JSON snapshot instead of the backend
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Record one race's finishing positions, given as TEAM=POSITION
    Submit {
        regatta_id: String,

        #[arg(short, long)]
        race: u32,

        #[arg(required = true, value_parser = parse_placing)]
        placings: Vec<(String, u32)>,

        /// Validate and print the request without sending it
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Save a regatta's teams and results to a JSON snapshot
    Export { regatta_id: String, output: PathBuf },
    /// List, create, update or delete regattas
    Regatta {
        #[command(subcommand)]
        command: RegattaCommand,
    },
    /// Manage a regatta's roster
    Team {
        #[command(subcommand)]
        command: TeamCommand,
    },
    /// Show the backend dashboard counters
    Dashboard,
}

#[derive(Subcommand)]
enum RegattaCommand {
    /// List regattas known to the backend
    List {
        /// Only show regattas in this state
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
    },
    /// Show one regatta
    Show { regatta_id: String },
    /// Create a regatta; the backend schedules it
    Create {
        #[arg(long)]
        name: String,

        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,

        #[arg(long, default_value = "")]
        location: String,
    },
    /// Change fields of a regatta; fields not given keep their current value
    Update {
        regatta_id: String,

        #[command(flatten)]
        changes: RegattaChanges,
    },
    /// Delete a regatta
    Delete {
        regatta_id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TeamCommand {
    /// List a regatta's teams
    List { regatta_id: String },
    /// Add a team to a regatta
    Add { regatta_id: String, name: String },
    /// Rename a team, given by id or name
    Rename {
        regatta_id: String,
        team: String,
        new_name: String,
    },
    /// Remove a team that has no recorded results
    Remove { regatta_id: String, team: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StatusFilter {
    Active,
    Scheduled,
}

impl StatusFilter {
    fn matches(self, regatta: &Regatta) -> bool {
        match self {
            StatusFilter::Active => regatta.is_active(),
            StatusFilter::Scheduled => regatta.is_scheduled(),
        }
    }
}

#[derive(Args, Default)]
struct RegattaChanges {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    start: Option<NaiveDate>,

    #[arg(long)]
    end: Option<NaiveDate>,

    #[arg(long)]
    location: Option<String>,

    /// e.g. SCHEDULED or active
    #[arg(long)]
    status: Option<String>,
}

impl RegattaChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.location.is_none()
            && self.status.is_none()
    }

    fn apply(self, current: Regatta) -> UpdateRegattaRequest {
        let mut request = UpdateRegattaRequest::from(current);
        if let Some(name) = self.name {
            request.name = name;
        }
        if let Some(start) = self.start {
            request.start_date = start;
        }
        if let Some(end) = self.end {
            request.end_date = end;
        }
        if let Some(location) = self.location {
            request.location = location;
        }
        if let Some(status) = self.status {
            request.status = status;
        }
        request
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ScoringKind {
    LowPoint,
    Table,
}

#[derive(Args)]
struct ScoringArgs {
    #[arg(long, value_enum, default_value = "low-point")]
    scoring: ScoringKind,

    /// Points for 1st, 2nd, ... place when using --scoring table
    #[arg(long, value_delimiter = ',')]
    table: Vec<i64>,

    /// Points for places beyond the table (default 0)
    #[arg(long)]
    fallback: Option<i64>,

    /// Rank the highest total first
    #[arg(long)]
    high_is_better: bool,
}

impl ScoringArgs {
    fn build(&self) -> anyhow::Result<Box<dyn ScoringSystem>> {
        match self.scoring {
            ScoringKind::LowPoint => {
                if !self.table.is_empty() {
                    bail!("--table only applies to --scoring table");
                }
                if self.fallback.is_some() {
                    bail!("--fallback only applies to --scoring table");
                }
                if self.high_is_better {
                    bail!("--high-is-better only applies to --scoring table");
                }
                Ok(Box::new(LowPoint))
            }
            ScoringKind::Table => {
                if self.table.is_empty() {
                    bail!("--scoring table requires --table, e.g. --table 10,6,4");
                }
                let direction = if self.high_is_better {
                    RankDirection::Descending
                } else {
                    RankDirection::Ascending
                };
                Ok(Box::new(PointsTable::new(
                    self.table.clone(),
                    self.fallback.unwrap_or(0),
                    direction,
                )))
            }
        }
    }
}

fn parse_placing(value: &str) -> Result<(String, u32), String> {
    let (team, position) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected TEAM=POSITION, got '{}'", value))?;
    let team = team.trim();
    if team.is_empty() {
        return Err(format!("missing team in '{}'", value));
    }
    let position = position
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("position must be a whole number in '{}'", value))?;
    Ok((team.to_string(), position))
}

fn describe_regatta(regatta: &Regatta) -> String {
    let days = regatta.duration_days();
    let mut line = format!(
        "{}  {}  {} to {} ({} day{})  {}",
        regatta.id,
        regatta.name,
        regatta.start_date,
        regatta.end_date,
        days,
        if days == 1 { "" } else { "s" },
        regatta.location
    );
    if !regatta.status.is_empty() {
        line.push_str("  ");
        line.push_str(&regatta.status);
    }
    line
}

/// Matches a team by id first, then by name ignoring case.
fn resolve_team(teams: &[Team], key: &str) -> Option<TeamId> {
    teams
        .iter()
        .find(|t| t.id.as_str() == key)
        .or_else(|| teams.iter().find(|t| t.name.eq_ignore_ascii_case(key)))
        .map(|t| t.id.clone())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "regatta={},regatta_client={},standings={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env().context("Failed to load client configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }

    match cli.command {
        Commands::Standings {
            regatta_id,
            snapshot,
            json,
            scoring,
        } => {
            let scoring = scoring.build()?;
            let source: Box<dyn ResultsSource> = match snapshot {
                Some(path) => Box::new(SnapshotFile::new(path)),
                None => Box::new(BackendClient::new(&config)?),
            };
            handle_standings(source.as_ref(), &regatta_id, scoring.as_ref(), json).await?;
        }
        Commands::Submit {
            regatta_id,
            race,
            placings,
            dry_run,
            scoring,
        } => {
            let scoring = scoring.build()?;
            let client = BackendClient::new(&config)?;
            handle_submit(&client, &regatta_id, race, placings, scoring.as_ref(), dry_run).await?;
        }
        Commands::Export { regatta_id, output } => {
            let client = BackendClient::new(&config)?;
            let snapshot = client
                .snapshot(&regatta_id)
                .await
                .context("Failed to fetch regatta")?;
            let file = SnapshotFile::new(output);
            file.write(&snapshot)
                .await
                .with_context(|| format!("Failed to write {}", file.path().display()))?;
            tracing::info!("Exported to: {}", file.path().display());
        }
        Commands::Regatta { command } => {
            let client = BackendClient::new(&config)?;
            handle_regatta(&client, command).await?;
        }
        Commands::Team { command } => {
            let client = BackendClient::new(&config)?;
            handle_team(&client, command).await?;
        }
        Commands::Dashboard => {
            let client = BackendClient::new(&config)?;
            let stats = client
                .dashboard_stats()
                .await
                .context("Failed to load dashboard stats")?;
            println!("Active regattas:  {}", stats.active_regattas);
            println!("Total teams:      {}", stats.total_teams);
            println!("Races completed:  {}", stats.races_completed);
            println!("Upcoming races:   {}", stats.upcoming_races);
        }
    }

    Ok(())
}

async fn handle_standings(
    source: &dyn ResultsSource,
    regatta_id: &str,
    scoring: &dyn ScoringSystem,
    json: bool,
) -> anyhow::Result<()> {
    let report = fetch_report(source, regatta_id, scoring)
        .await
        .with_context(|| format!("Failed to compute standings for regatta {}", regatta_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_grid(&report.grid));
    }

    Ok(())
}

async fn handle_submit(
    client: &BackendClient,
    regatta_id: &str,
    race: u32,
    placings: Vec<(String, u32)>,
    scoring: &dyn ScoringSystem,
    dry_run: bool,
) -> anyhow::Result<()> {
    let RegattaSnapshot { teams, results } = client
        .snapshot(regatta_id)
        .await
        .context("Failed to fetch current results")?;

    let mut positions = Vec::with_capacity(placings.len());
    for (key, position) in placings {
        let Some(team_id) = resolve_team(&teams, &key) else {
            bail!("No team '{}' in regatta {}", key, regatta_id);
        };
        positions.push((team_id, position));
    }

    let batch = ResultsBatch::from_positions(race, positions, scoring)?;
    if let Err(err) = batch.check_against(&teams, &results) {
        if err.is_conflict() {
            bail!(
                "{}; race {} already has results and they cannot be overwritten",
                err,
                batch.race_number()
            );
        }
        return Err(err.into());
    }

    let request = batch.into_request()?.for_regatta(regatta_id);
    if let Err(reason) = request.validate_race_numbers() {
        bail!(reason);
    }

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    client
        .submit_results(regatta_id, &request)
        .await
        .context("Failed to submit results")?;
    tracing::info!(
        "✓ Recorded {} results for race {} of regatta {}",
        request.results.len(),
        race,
        regatta_id
    );

    Ok(())
}

async fn handle_regatta(client: &BackendClient, command: RegattaCommand) -> anyhow::Result<()> {
    match command {
        RegattaCommand::List { status } => {
            let mut regattas = client
                .list_regattas()
                .await
                .context("Failed to list regattas")?;

            // the list endpoint leaves status out, so filtering needs the details
            if let Some(filter) = status {
                let mut detailed = Vec::with_capacity(regattas.len());
                for regatta in &regattas {
                    let regatta = client
                        .get_regatta(&regatta.id)
                        .await
                        .with_context(|| format!("Failed to load regatta {}", regatta.id))?;
                    if filter.matches(&regatta) {
                        detailed.push(regatta);
                    }
                }
                regattas = detailed;
            }

            if regattas.is_empty() {
                println!("No regattas found");
            }
            for regatta in &regattas {
                println!("{}", describe_regatta(regatta));
            }
        }
        RegattaCommand::Show { regatta_id } => {
            let regatta = client
                .get_regatta(&regatta_id)
                .await
                .with_context(|| format!("Failed to load regatta {}", regatta_id))?;
            println!("{}", describe_regatta(&regatta));
        }
        RegattaCommand::Create {
            name,
            start,
            end,
            location,
        } => {
            let request = CreateRegattaRequest {
                name,
                start_date: start,
                end_date: end,
                location,
            };
            let regatta = client
                .create_regatta(&request)
                .await
                .context("Failed to create regatta")?;
            tracing::info!("✓ Created regatta {}", regatta.id);
            println!("{}", describe_regatta(&regatta));
        }
        RegattaCommand::Update {
            regatta_id,
            changes,
        } => {
            if changes.is_empty() {
                bail!("Nothing to update; pass at least one field to change");
            }
            let current = client
                .get_regatta(&regatta_id)
                .await
                .with_context(|| format!("Failed to load regatta {}", regatta_id))?;
            let request = changes.apply(current);
            let regatta = client
                .update_regatta(&regatta_id, &request)
                .await
                .context("Failed to update regatta")?;
            tracing::info!("✓ Updated regatta {}", regatta_id);
            println!("{}", describe_regatta(&regatta));
        }
        RegattaCommand::Delete { regatta_id, yes } => {
            if !yes {
                bail!("Deleting regatta {} cannot be undone; re-run with --yes", regatta_id);
            }
            client
                .delete_regatta(&regatta_id)
                .await
                .context("Failed to delete regatta")?;
            tracing::info!("✓ Deleted regatta {}", regatta_id);
        }
    }

    Ok(())
}

async fn handle_team(client: &BackendClient, command: TeamCommand) -> anyhow::Result<()> {
    match command {
        TeamCommand::List { regatta_id } => {
            let teams = client
                .list_teams(&regatta_id)
                .await
                .context("Failed to list teams")?;
            if teams.is_empty() {
                println!("No teams in regatta {}", regatta_id);
            }
            for team in teams {
                println!("{}  {}", team.id, team.name);
            }
        }
        TeamCommand::Add { regatta_id, name } => {
            let team = client
                .create_team(&regatta_id, &TeamRequest::new(name))
                .await
                .context("Failed to add team")?;
            tracing::info!("✓ Added team {} ({})", team.name, team.id);
        }
        TeamCommand::Rename {
            regatta_id,
            team,
            new_name,
        } => {
            let teams = client
                .list_teams(&regatta_id)
                .await
                .context("Failed to list teams")?;
            let Some(team_id) = resolve_team(&teams, &team) else {
                bail!("No team '{}' in regatta {}", team, regatta_id);
            };
            let team = client
                .update_team(&regatta_id, &team_id, &TeamRequest::new(new_name))
                .await
                .context("Failed to rename team")?;
            tracing::info!("✓ Renamed team {} to {}", team_id, team.name);
        }
        TeamCommand::Remove { regatta_id, team } => {
            let RegattaSnapshot { teams, results } = client
                .snapshot(&regatta_id)
                .await
                .context("Failed to fetch current results")?;
            let Some(team_id) = resolve_team(&teams, &team) else {
                bail!("No team '{}' in regatta {}", team, regatta_id);
            };
            // the backend keeps a removed team's results, which would then
            // reference a team that no longer exists
            let recorded = results.iter().filter(|r| r.team_id == team_id).count();
            if recorded > 0 {
                bail!(
                    "Team {} has {} recorded results and cannot be removed",
                    team_id,
                    recorded
                );
            }
            client
                .delete_team(&regatta_id, &team_id)
                .await
                .context("Failed to remove team")?;
            tracing::info!("✓ Removed team {} from regatta {}", team_id, regatta_id);
        }
    }

    Ok(())
}
