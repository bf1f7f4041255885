// Rust Data Filter Engine - Main executable
// Author: Gabriel Demetrios Lafis

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::{info, warn};

use rust_data_filter_engine::{
    data::{coerce_str, load_file, save_file, RecordSet, Value},
    processing::{
        add_field, compute_statistics, filter, remove_field, Collation, FilterOperator,
        FilterPredicate, RankOrder, SortCriterion, Sorter,
    },
    utils::{init_logging, Config},
};

fn cli() -> Command<'static> {
    let input = || {
        Arg::new("input")
            .value_name("INPUT")
            .help("Input file (.csv, .json, .yaml, .xml)")
            .required(true)
    };
    let output = || {
        Arg::new("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Write the result to FILE instead of previewing it")
            .takes_value(true)
    };

    Command::new("Rust Data Filter Engine")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Filter, sort and summarize tabular records")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enables debug logging"),
        )
        .subcommand(
            Command::new("show")
                .about("Preview the first records")
                .arg(input())
                .arg(
                    Arg::new("rows")
                        .short('n')
                        .long("rows")
                        .value_name("N")
                        .help("Number of records to show")
                        .takes_value(true),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Per-field statistics and type distribution")
                .arg(input())
                .arg(Arg::new("json").long("json").help("Print the report as JSON")),
        )
        .subcommand(
            Command::new("filter")
                .about("Keep the records matching a predicate")
                .arg(input())
                .arg(
                    Arg::new("field")
                        .long("field")
                        .value_name("FIELD")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::new("op")
                        .long("op")
                        .value_name("OP")
                        .help("eq, ne, gt, lt, ge, le, contains, starts_with")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::new("value")
                        .long("value")
                        .value_name("VALUE")
                        .required(true)
                        .takes_value(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("allow-empty")
                        .long("allow-empty")
                        .help("Write an empty result instead of keeping the input"),
                )
                .arg(output()),
        )
        .subcommand(
            Command::new("sort")
                .about("Sort records by one or more fields")
                .arg(input())
                .arg(
                    Arg::new("by")
                        .long("by")
                        .value_name("FIELD[:asc|:desc]")
                        .help("Sort criterion, repeat for secondary keys")
                        .required(true)
                        .takes_value(true)
                        .multiple_occurrences(true),
                )
                .arg(
                    Arg::new("locale")
                        .long("locale")
                        .value_name("TAG")
                        .help("Collate text for a locale, e.g. fr_FR")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("fixed-rank")
                        .long("fixed-rank")
                        .help("Keep absent values last in descending sorts"),
                )
                .arg(output()),
        )
        .subcommand(
            Command::new("fields")
                .about("Add or remove a field")
                .arg(input())
                .arg(
                    Arg::new("add")
                        .long("add")
                        .value_name("NAME")
                        .takes_value(true)
                        .conflicts_with("remove"),
                )
                .arg(
                    Arg::new("default")
                        .long("default")
                        .value_name("VALUE")
                        .help("Value of the added field")
                        .takes_value(true)
                        .requires("add"),
                )
                .arg(
                    Arg::new("remove")
                        .long("remove")
                        .value_name("NAME")
                        .takes_value(true),
                )
                .arg(output()),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between file formats")
                .arg(input())
                .arg(
                    Arg::new("target")
                        .value_name("OUTPUT")
                        .required(true),
                ),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Load configuration
    let mut config = match matches.value_of("config") {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if matches.is_present("verbose") {
        config.logging.level = "debug".to_string();
    }

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter(), config.logging.color) {
        eprintln!("Error initializing logger: {}", err);
    }

    match matches.subcommand() {
        Some(("show", sub)) => run_show(sub, &config),
        Some(("stats", sub)) => run_stats(sub),
        Some(("filter", sub)) => run_filter(sub, &config),
        Some(("sort", sub)) => run_sort(sub, &config),
        Some(("fields", sub)) => run_fields(sub, &config),
        Some(("convert", sub)) => run_convert(sub),
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
            Ok(())
        }
    }
}

fn load_input(matches: &ArgMatches) -> Result<RecordSet> {
    let path = matches.value_of("input").context("missing input file")?;
    load_file(path).with_context(|| format!("failed to load {}", path))
}

/// Save to `--output` when given, otherwise print a preview
fn emit(matches: &ArgMatches, config: &Config, result: &RecordSet) -> Result<()> {
    match matches.value_of("output") {
        Some(path) => {
            save_file(path, result).with_context(|| format!("failed to save {}", path))?;
            println!("{} record(s) written to {}", result.len(), path);
        }
        None => println!("{}", result.preview(config.display.preview_rows)),
    }
    Ok(())
}

fn run_show(matches: &ArgMatches, config: &Config) -> Result<()> {
    let records = load_input(matches)?;
    let rows = match matches.value_of("rows") {
        Some(rows) => rows
            .parse::<usize>()
            .with_context(|| format!("invalid row count '{}'", rows))?,
        None => config.display.preview_rows,
    };

    println!("{}", records.preview(rows));
    Ok(())
}

fn run_stats(matches: &ArgMatches) -> Result<()> {
    let records = load_input(matches)?;
    let report = compute_statistics(&records);

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn run_filter(matches: &ArgMatches, config: &Config) -> Result<()> {
    let records = load_input(matches)?;
    let field = matches.value_of("field").context("missing --field")?;
    let operator: FilterOperator = matches.value_of("op").context("missing --op")?.parse()?;
    let target = matches.value_of("value").context("missing --value")?;

    let predicate = FilterPredicate::new(field, operator, target);
    let result = filter(&records, &predicate)?;

    if result.is_empty() && !matches.is_present("allow-empty") {
        warn!("No record matches '{}'", predicate);
        println!("No record matches '{}'; the data is left unchanged.", predicate);
        return Ok(());
    }

    info!("{} of {} record(s) kept", result.len(), records.len());
    emit(matches, config, &result)
}

fn run_sort(matches: &ArgMatches, config: &Config) -> Result<()> {
    let records = load_input(matches)?;
    let criteria = matches
        .values_of("by")
        .context("missing --by")?
        .map(str::parse::<SortCriterion>)
        .collect::<Result<Vec<_>, _>>()?;

    let mut options = config.sort_options();
    if let Some(locale) = matches.value_of("locale") {
        options.collation = Collation::locale(locale);
    }
    if matches.is_present("fixed-rank") {
        options.rank_order = RankOrder::Fixed;
    }

    let sorter = Sorter::new(&options);
    if let Some(reason) = sorter.collation_fallback() {
        println!("Note: {}", reason);
    }

    let result = sorter.sort_multi(&records, &criteria)?;
    emit(matches, config, &result)
}

fn run_fields(matches: &ArgMatches, config: &Config) -> Result<()> {
    let records = load_input(matches)?;

    let result = match (matches.value_of("add"), matches.value_of("remove")) {
        (Some(name), None) => {
            let default = matches.value_of("default").map_or(Value::Absent, coerce_str);
            add_field(&records, name, default)?
        }
        (None, Some(name)) => remove_field(&records, name)?,
        _ => bail!("one of --add or --remove is required"),
    };

    println!("Fields: {}", result.field_catalog().join(", "));
    emit(matches, config, &result)
}

fn run_convert(matches: &ArgMatches) -> Result<()> {
    let records = load_input(matches)?;
    let target = matches.value_of("target").context("missing output file")?;

    save_file(target, &records).with_context(|| format!("failed to save {}", target))?;
    println!("{} record(s) written to {}", records.len(), target);
    Ok(())
}
