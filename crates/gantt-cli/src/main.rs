use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use gantt_engine::{
    filter_rows, read_raw_data, transform, FilterConfig, FilterOptions, GanttConfig, OptionKind,
};
use gantt_fixtures::{MockConfig, MockGenerator};
use gantt_model::lenient;
use gantt_model::{PersonRole, RawData, SpaceType, ViewType};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn build_cli() -> Command {
    Command::new("gantt")
        .version(gantt_engine::VERSION)
        .about("Person-grouped Gantt timelines from iteration and requirement records")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("render")
                .about("Transform records and print the filtered rows")
                .arg(
                    Arg::new("data")
                        .long("data")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Raw record file (JSON)"),
                )
                .arg(config_arg())
                .arg(view_arg())
                .arg(
                    Arg::new("project")
                        .long("project")
                        .help("Keep rows whose text contains this"),
                )
                .arg(
                    Arg::new("iteration")
                        .long("iteration")
                        .help("Keep item rows whose text contains this"),
                )
                .arg(
                    Arg::new("person-type")
                        .long("person-type")
                        .value_parser(value_parser!(PersonRole))
                        .help("Keep rows with this person role"),
                )
                .arg(
                    Arg::new("person")
                        .long("person")
                        .help("Keep rows owned by this person id"),
                )
                .arg(
                    Arg::new("space-type")
                        .long("space-type")
                        .value_parser(lenient::parse_optional_space_type)
                        .help("Keep rows allowed in this space (project, product, team)"),
                )
                .arg(
                    Arg::new("department")
                        .long("department")
                        .help("Department (accepted, does not narrow rows)"),
                )
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("generate")
                .about("Print seeded mock records")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("persons")
                        .long("persons")
                        .default_value("8")
                        .value_parser(value_parser!(usize))
                        .help("Number of persons"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .default_value("2024")
                        .value_parser(value_parser!(i32))
                        .help("Calendar year of the generated dates"),
                )
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("options")
                .about("Print one filter option list")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(value_parser!(OptionKind))
                        .help("departments, projects, spaceTypes, iterations, personTypes or persons"),
                )
                .arg(
                    Arg::new("data")
                        .long("data")
                        .value_parser(value_parser!(PathBuf))
                        .help("Raw record file used to collect persons and iterations"),
                )
                .arg(config_arg())
                .arg(view_arg())
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Case-insensitive label substring"),
                )
                .arg(pretty_arg()),
        )
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("Chart configuration (JSON, or YAML by .yml/.yaml extension)")
}

fn view_arg() -> Arg {
    Arg::new("view")
        .long("view")
        .value_parser(value_parser!(ViewType))
        .help("iteration or requirement; overrides the configuration")
}

fn pretty_arg() -> Arg {
    Arg::new("pretty")
        .long("pretty")
        .action(ArgAction::SetTrue)
        .help("Pretty-print JSON output")
}

fn init_tracing(verbosity: u8, json: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(args: &ArgMatches) -> Result<GanttConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => GanttConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => GanttConfig::default(),
    };
    if let Some(view) = args.get_one::<ViewType>("view") {
        config.view_type = *view;
    }
    Ok(config)
}

fn load_data(path: &Path) -> Result<RawData> {
    read_raw_data(path).with_context(|| format!("failed to read records {}", path.display()))
}

fn filters_from_args(args: &ArgMatches) -> FilterConfig {
    let text = |name: &str| args.get_one::<String>(name).cloned();
    FilterConfig {
        department: text("department"),
        project: text("project"),
        space_type: args
            .get_one::<Option<SpaceType>>("space-type")
            .copied()
            .flatten(),
        iteration: text("iteration"),
        person_type: args.get_one::<PersonRole>("person-type").cloned(),
        person: text("person"),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("failed to serialize output")
}

fn render(args: &ArgMatches) -> Result<String> {
    let mut config = load_config(args)?;
    config.filters.merge(&filters_from_args(args));

    let data = args
        .get_one::<PathBuf>("data")
        .context("--data is required")
        .and_then(|path| load_data(path))?;

    let output = transform(config.view_type, &data, &config.transform_options());
    let rows = filter_rows(&output.rows, &config.filters);
    tracing::info!(
        "Rendered {} of {} rows ({} groups, {} diagnostics)",
        rows.len(),
        output.rows.len(),
        output.group_count(),
        output.diagnostics.len()
    );

    to_json(rows.as_ref(), args.get_flag("pretty"))
}

fn generate(args: &ArgMatches) -> Result<String> {
    let defaults = MockConfig::default();
    let config = MockConfig::default()
        .with_seed(args.get_one::<u64>("seed").copied().unwrap_or(defaults.seed))
        .with_persons(args.get_one::<usize>("persons").copied().unwrap_or(defaults.persons))
        .with_year(args.get_one::<i32>("year").copied().unwrap_or(defaults.year));

    let data = MockGenerator::new(config).generate();
    tracing::info!(
        "Generated {} iterations, {} requirements",
        data.iterations.len(),
        data.requirements.len()
    );
    to_json(&data, args.get_flag("pretty"))
}

fn options(args: &ArgMatches) -> Result<String> {
    let kind = *args
        .get_one::<OptionKind>("kind")
        .context("--kind is required")?;

    let mut catalogue = FilterOptions::defaults();
    if let Some(path) = args.get_one::<PathBuf>("data") {
        let config = load_config(args)?;
        let data = load_data(path)?;
        let output = transform(config.view_type, &data, &config.transform_options());
        catalogue.populate_from_rows(&output.rows);
    }

    let search = args.get_one::<String>("search").map_or("", String::as_str);
    let list = catalogue.search(kind, search);
    tracing::debug!("{} options match '{}'", list.len(), search);
    to_json(&list, args.get_flag("pretty"))
}

fn run(matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("render", args)) => render(args),
        Some(("generate", args)) => generate(args),
        Some(("options", args)) => options(args),
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    }
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_count("verbose"), matches.get_flag("json-logs"));

    let output = run(&matches)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantt_model::GanttRow;
    use std::io::Write;

    fn run_with(args: &[&str]) -> Result<String> {
        let matches = build_cli().try_get_matches_from(args)?;
        run(&matches)
    }

    fn data_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json = serde_json::to_string(&gantt_fixtures::simple_data()).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn render_applies_cli_filters() {
        let data = data_file();
        let path = data.path().to_str().unwrap();

        let out = run_with(&["gantt", "render", "--data", path, "--person", "person-2"]).unwrap();
        let rows: Vec<GanttRow> = serde_json::from_str(&out).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["person_person-2", "iter-3"]);
    }

    #[test]
    fn render_requirement_view_from_config() {
        let data = data_file();
        let mut config = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(config, "viewType: requirement\nfilters:\n  spaceType: team").unwrap();

        let out = run_with(&[
            "gantt",
            "render",
            "--data",
            data.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
        ])
        .unwrap();
        let rows: Vec<GanttRow> = serde_json::from_str(&out).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["task-1", "task-2", "task-3"]);
    }

    #[test]
    fn render_missing_data_file() {
        let err = run_with(&["gantt", "render", "--data", "/no/such/file.json"]).unwrap_err();
        assert!(err.to_string().contains("failed to read records"));
    }

    #[test]
    fn render_rejects_unknown_space_type() {
        let result = run_with(&["gantt", "render", "--data", "x.json", "--space-type", "galaxy"]);
        assert!(result.is_err());
    }

    #[test]
    fn render_blank_space_type_is_no_filter() {
        let data = data_file();
        let path = data.path().to_str().unwrap();

        let all = run_with(&["gantt", "render", "--data", path]).unwrap();
        let blank = run_with(&["gantt", "render", "--data", path, "--space-type", ""]).unwrap();
        assert_eq!(all, blank);
    }

    #[test]
    fn generate_is_seeded() {
        let a = run_with(&["gantt", "generate", "--seed", "3", "--persons", "2"]).unwrap();
        let b = run_with(&["gantt", "generate", "--seed", "3", "--persons", "2"]).unwrap();
        assert_eq!(a, b);

        let data: RawData = serde_json::from_str(&a).unwrap();
        assert!(data
            .iterations
            .iter()
            .all(|i| i.person_id == "person-1" || i.person_id == "person-2"));
    }

    #[test]
    fn options_collects_persons_from_data() {
        let data = data_file();
        let out = run_with(&[
            "gantt",
            "options",
            "--kind",
            "persons",
            "--data",
            data.path().to_str().unwrap(),
        ])
        .unwrap();
        let list: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["value"], "person-1");
        assert_eq!(list[0]["count"], 2);
    }

    #[test]
    fn options_searches_static_lists() {
        let out = run_with(&["gantt", "options", "--kind", "departments", "--search", "q"]).unwrap();
        let list: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["value"], "qa");
    }
}
