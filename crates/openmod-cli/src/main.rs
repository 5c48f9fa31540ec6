use clap::{value_parser, Arg, Command, ValueHint};
use openmod_cli::input::Input;
use openmod_cli::runner::Runner;
use rayon::ThreadPoolBuilder;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("OPENMOD_LOG", "error,openmod=info"))
        .init();

    let matches = Command::new("openmod")
        .version(clap::crate_version!())
        .about("Summarize precursor mass differences from open-modification searches")
        .arg(
            Arg::new("parameters")
                .short('p')
                .long("parameters")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("Path to configuration parameters (JSON file)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("mztab_paths")
                .num_args(1..)
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Paths to mzTab files to process. Overrides mzTab files listed in the \
                     configuration file.",
                )
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_directory")
                .short('o')
                .long("output_directory")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Path where results will be written. \
                     Overrides the directory specified in the configuration file.",
                )
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("tol-mass")
                .long("tol-mass")
                .value_parser(value_parser!(f64))
                .help("Maximum mass difference between a PSM and the seed of its group")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("tol-mode")
                .long("tol-mode")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help(
                    "Unit of `--tol-mass`: `absolute` (alias `Da`) or `relative-ppm` \
                     (alias `ppm`). Any other value places all PSMs in a single group",
                )
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("score-column")
                .long("score-column")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .help("mzTab PSM column used to rank matches (default = search_engine_score[1])")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("skip-unreadable")
                .long("skip-unreadable")
                .action(clap::ArgAction::SetTrue)
                .help("Skip mzTab files that cannot be read instead of failing"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .action(clap::ArgAction::SetTrue)
                .help("Write an HTML report"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_parser(value_parser!(u16).range(1..))
                .help("Number of files to read in parallel (default = # of CPUs)")
                .value_hint(ValueHint::Other),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let threads = matches
        .get_one::<u16>("threads")
        .copied()
        .map(usize::from)
        .unwrap_or_else(num_cpus::get);

    ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;

    let input = Input::from_arguments(matches)?;
    let runner = input.build().map(Runner::new)?;
    runner.run()?;

    Ok(())
}
