//! A command-line front end for the album lottery.
//! Every command reads a JSON snapshot of a club, as exported by the club
//! application, and never modifies it.

#[macro_use]
extern crate log;

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::{rngs::StdRng, SeedableRng};

use album_roulette::{
    config::Config,
    duplicate::check_admission,
    logging,
    lottery::{DrawKind, Lottery, LotteryOutcome, Ticket},
    model::{ClubSnapshot, UserId},
    personal_ranking, Error,
};

const PROGRAM_NAME: &str = "roulette-cli";

const ABOUT_TEXT: &str = "Pick the next album for a listening club.

EXIT CODES:
     0: Success.
   255: Ran successfully, but there was no result: no candidates, or the
        proposed album is already a candidate.
 Other: Error.";

const SNAPSHOT_PATH: &str = "SNAPSHOT_PATH";
const SNAPSHOT_PATH_HELP: &str = "The path to a JSON snapshot of the club's candidates and votes";

const CONFIG: &str = "config";
const VERBOSE: &str = "verbose";
const SEED: &str = "seed";
const LABEL: &str = "LABEL";
const SECONDARY: &str = "secondary";
const PRIMARY_LABEL: &str = "PRIMARY";
const SECONDARY_LABEL: &str = "SECONDARY";
const USER: &str = "USER";

/// The snapshot argument shared by every subcommand.
fn snapshot_arg() -> Arg {
    Arg::new(SNAPSHOT_PATH)
        .help(SNAPSHOT_PATH_HELP)
        .action(ArgAction::Set)
        .required(true)
}

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .arg(
            Arg::new(CONFIG)
                .long(CONFIG)
                .help("Config file to use instead of Roulette.toml")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new(VERBOSE)
                .short('v')
                .long(VERBOSE)
                .help("Log debugging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("draw")
                .about("Draw the next album")
                .arg(snapshot_arg())
                .arg(
                    Arg::new(SEED)
                        .long(SEED)
                        .help("Seed for a reproducible draw")
                        .action(ArgAction::Set)
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("odds")
                .about("Show every candidate's tickets and chance of being drawn")
                .arg(snapshot_arg()),
        )
        .subcommand(
            Command::new("suggest")
                .about("List existing labels similar to a new one")
                .arg(snapshot_arg())
                .arg(
                    Arg::new(LABEL)
                        .help("The label being typed")
                        .action(ArgAction::Set)
                        .required(true),
                )
                .arg(
                    Arg::new(SECONDARY)
                        .long(SECONDARY)
                        .help("Compare against artists rather than titles")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check a proposed album for duplicates")
                .arg(snapshot_arg())
                .arg(
                    Arg::new(PRIMARY_LABEL)
                        .help("Album title")
                        .action(ArgAction::Set)
                        .required(true),
                )
                .arg(
                    Arg::new(SECONDARY_LABEL)
                        .help("Album artist")
                        .action(ArgAction::Set)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("rank")
                .about("Show the candidates in one participant's order of preference")
                .arg(snapshot_arg())
                .arg(
                    Arg::new(USER)
                        .help("The participant's user ID")
                        .action(ArgAction::Set)
                        .required(true),
                ),
        )
}

/// What a command has to say.
#[derive(Debug, Eq, PartialEq)]
enum Report {
    /// The command produced a result.
    Found(Vec<String>),
    /// The command ran, but there was nothing to report.
    Nothing(Vec<String>),
}

/// Load the config named on the command line, or the default one.
fn load_config(args: &ArgMatches) -> Result<Config, Error> {
    match args.get_one::<PathBuf>(CONFIG) {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn load_snapshot(args: &ArgMatches) -> Result<ClubSnapshot, Error> {
    // Required argument is guaranteed to be present.
    let path: &String = args.get_one(SNAPSHOT_PATH).unwrap();
    ClubSnapshot::load(path)
}

fn draw(config: &Config, args: &ArgMatches) -> Result<Report, Error> {
    let snapshot = load_snapshot(args)?;
    let candidates = snapshot.active_candidates();
    let tallies = snapshot.effective_tallies();
    let lottery = Lottery::new(config.ticket_rules());

    let seed = args.get_one::<u64>(SEED).copied().or(config.seed());
    let outcome = match seed {
        Some(seed) => {
            info!("Drawing with seed {seed}");
            lottery.draw(&candidates, &tallies, &mut StdRng::seed_from_u64(seed))
        }
        None => lottery.draw(&candidates, &tallies, &mut rand::thread_rng()),
    };

    let pick = match outcome {
        LotteryOutcome::Picked(pick) => pick,
        LotteryOutcome::NoCandidates => {
            return Ok(Report::Nothing(vec!["No candidates available.".to_string()]))
        }
    };
    let candidate = candidates
        .iter()
        .find(|candidate| candidate.id == pick.candidate_id)
        .ok_or_else(|| Error::NotFound(format!("candidate {}", pick.candidate_id)))?;
    let note = match pick.kind {
        DrawKind::Singleton => " (the only eligible candidate)",
        DrawKind::Weighted => "",
        DrawKind::VetoFallback => " (everything was vetoed, so picked at random)",
    };
    Ok(Report::Found(vec![format!("Picked: {candidate}{note}")]))
}

fn odds(config: &Config, args: &ArgMatches) -> Result<Report, Error> {
    let snapshot = load_snapshot(args)?;
    let candidates = snapshot.active_candidates();
    let tallies = snapshot.effective_tallies();
    let pool = Lottery::new(config.ticket_rules()).pool(&candidates, &tallies);
    if pool.is_empty() {
        return Ok(Report::Nothing(vec!["No candidates available.".to_string()]));
    }

    let lines = pool
        .entries()
        .iter()
        .zip(pool.odds())
        .map(|(entry, (_, chance))| {
            let tickets = match entry.ticket {
                Ticket::Vetoed => "vetoed".to_string(),
                Ticket::Weight(1) => "1 ticket".to_string(),
                Ticket::Weight(weight) => format!("{weight} tickets"),
            };
            format!("{}: {tickets}, {:.2}%", entry.candidate, chance * 100.0)
        })
        .collect();
    Ok(Report::Found(lines))
}

fn suggest(config: &Config, args: &ArgMatches) -> Result<Report, Error> {
    let snapshot = load_snapshot(args)?;
    let label: &String = args.get_one(LABEL).unwrap();
    let candidates = snapshot.active_candidates();
    let existing: Vec<&str> = if args.get_flag(SECONDARY) {
        candidates.iter().map(|c| c.secondary_label.as_str()).collect()
    } else {
        candidates.iter().map(|c| c.primary_label.as_str()).collect()
    };

    let matches = config.suggestion_rules().suggest(label, &existing);
    if matches.is_empty() {
        return Ok(Report::Found(vec!["No similar labels.".to_string()]));
    }
    Ok(Report::Found(
        matches
            .into_iter()
            .map(|m| format!("{} (distance {})", m.label, m.distance))
            .collect(),
    ))
}

fn check(config: &Config, args: &ArgMatches) -> Result<Report, Error> {
    let snapshot = load_snapshot(args)?;
    let primary: &String = args.get_one(PRIMARY_LABEL).unwrap();
    let secondary: &String = args.get_one(SECONDARY_LABEL).unwrap();
    let check = check_admission(
        primary,
        secondary,
        &snapshot.candidates,
        &config.suggestion_rules(),
    );

    if let Some(id) = &check.exact_duplicate {
        let existing = snapshot
            .candidates
            .iter()
            .find(|candidate| &candidate.id == id)
            .ok_or_else(|| Error::NotFound(format!("candidate {id}")))?;
        return Ok(Report::Nothing(vec![format!("Already proposed: {existing}")]));
    }

    let mut lines = vec!["No exact duplicate.".to_string()];
    if !check.needs_confirmation() {
        lines.push("Nothing similar either.".to_string());
    }
    for m in &check.similar_primary {
        lines.push(format!("Similar title: {} (distance {})", m.label, m.distance));
    }
    for m in &check.similar_secondary {
        lines.push(format!("Similar artist: {} (distance {})", m.label, m.distance));
    }
    Ok(Report::Found(lines))
}

fn rank(args: &ArgMatches) -> Result<Report, Error> {
    let snapshot = load_snapshot(args)?;
    let user: &String = args.get_one(USER).unwrap();
    let user = UserId::from(user.as_str());
    if !snapshot.has_voter(&user) {
        warn!("{user} has not voted on anything");
    }

    let votes = snapshot.user_votes(&user);
    let ranked = personal_ranking(&snapshot.candidates, &votes);
    if ranked.is_empty() {
        return Ok(Report::Nothing(vec!["No candidates available.".to_string()]));
    }
    Ok(Report::Found(
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| {
                let preference = votes
                    .get(&candidate.id)
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "not voted".to_string());
                format!("{}. {candidate} ({preference})", i + 1)
            })
            .collect(),
    ))
}

/// Run the chosen subcommand.
fn execute(config: &Config, args: &ArgMatches) -> Result<Report, Error> {
    match args.subcommand() {
        Some(("draw", sub)) => draw(config, sub),
        Some(("odds", sub)) => odds(config, sub),
        Some(("suggest", sub)) => suggest(config, sub),
        Some(("check", sub)) => check(config, sub),
        Some(("rank", sub)) => rank(sub),
        // A subcommand is required, so clap has already rejected anything else.
        _ => unreachable!(),
    }
}

/// Run the chosen subcommand, report the result, and return the exit code.
fn run(config: &Config, args: &ArgMatches) -> u8 {
    match execute(config, args) {
        Ok(Report::Found(lines)) => {
            for line in lines {
                println!("{line}");
            }
            0
        }
        Ok(Report::Nothing(lines)) => {
            for line in lines {
                println!("{line}");
            }
            255
        }
        Err(Error::Io(err)) => {
            println!("IO error: {err}");
            1
        }
        Err(err) => {
            println!("{err}");
            1
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            println!("{err}");
            std::process::exit(1)
        }
    };
    if let Err(err) = logging::init(config.log_config(), args.get_flag(VERBOSE)) {
        eprintln!("{err}");
    }

    let exit_code = run(&config, &args);
    std::process::exit(exit_code.into())
}
