extern crate clap;
extern crate curvedit;

mod commands;
mod evaluate;

use clap::*;
use commands::*;
use curvedit::geom::SolveOptions;

use std::fs::File;
use std::io::{stdout, Write};
use std::process;
use std::result::Result;

fn curve_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(Arg::with_name("POINTS")
            .value_name("X,Y")
            .help("Control point positions, in any order")
            .takes_value(true)
            .multiple(true)
            .required(true)
            .allow_hyphen_values(true)
        )
        .arg(Arg::with_name("HANDLES")
            .long("handles")
            .value_name("LX,LY,RX,RY")
            .help("Handles relative to each point, one value per point in the order the points are given")
            .takes_value(true)
            .multiple(true)
            .number_of_values(1)
            .allow_hyphen_values(true)
        )
        .arg(Arg::with_name("SYMMETRIC")
            .short("s")
            .long("symmetric")
            .help("Makes the handles of every point symmetric")
        )
        .arg(Arg::with_name("TOLERANCE")
            .short("t")
            .long("tolerance")
            .help("Sets the tolerance of the x to parameter lookup (1e-10 by default)")
            .value_name("TOLERANCE")
            .takes_value(true)
        )
        .arg(Arg::with_name("MAX_ITERATIONS")
            .long("max-iterations")
            .help("Sets the maximum number of newton iterations (20 by default)")
            .value_name("COUNT")
            .takes_value(true)
        )
}

fn main() {
    env_logger::init();

    let matches = App::new("Curvedit command-line interface")
        .version("0.1")
        .author("Nicolas Silva <nical@fastmail.com>")
        .about("Evaluates piecewise cubic curves")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(curve_args(SubCommand::with_name("sample")
            .about("Evaluates the curve at evenly spaced x coordinates")
            .arg(Arg::with_name("COUNT")
                .short("c")
                .long("count")
                .help("Sets the number of samples (11 by default)")
                .value_name("COUNT")
                .takes_value(true)
            )
            .arg(Arg::with_name("DISPLAY")
                .short("d")
                .long("display")
                .help("Also prints the samples mapped onto a WIDTHxHEIGHT display rectangle")
                .value_name("WIDTHxHEIGHT")
                .takes_value(true)
            )
        ))
        .subcommand(curve_args(SubCommand::with_name("value")
            .about("Evaluates the curve at the given x coordinates")
            .arg(Arg::with_name("X")
                .short("x")
                .help("An x coordinate to evaluate the curve at")
                .value_name("X")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .required(true)
                .allow_hyphen_values(true)
            )
        ))
        .subcommand(curve_args(SubCommand::with_name("bounds")
            .about("Prints the bounding range of the control points")
        ))
        .arg(Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true)
            .required(false)
        )
        .get_matches();

    let mut output: Box<dyn Write> = Box::new(stdout());

    if let Some(output_file) = matches.value_of("OUTPUT") {
        match File::create(output_file) {
            Ok(file) => {
                output = Box::new(file);
            }
            Err(e) => {
                eprintln!("Cannot create file {}: {}", output_file, e);
                process::exit(1);
            }
        }
    }

    let result = match matches.subcommand() {
        ("sample", Some(sample_matches)) => run_sample(sample_matches, &mut *output),
        ("value", Some(value_matches)) => run_value(value_matches, &mut *output),
        ("bounds", Some(bounds_matches)) => run_bounds(bounds_matches, &mut *output),
        _ => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run_sample(matches: &ArgMatches, output: &mut dyn Write) -> Result<(), CliError> {
    let count = match matches.value_of("COUNT") {
        Some(count) => count.parse().map_err(|_| CliError::Parse {
            what: "sample count",
            input: count.to_string(),
        })?,
        None => 11,
    };
    let display = match matches.value_of("DISPLAY") {
        Some(size) => Some(parse_size(size)?),
        None => None,
    };

    let cmd = SampleCmd {
        curve: get_curve(matches)?,
        count,
        display,
    };

    evaluate::sample(cmd, output)
}

fn run_value(matches: &ArgMatches, output: &mut dyn Write) -> Result<(), CliError> {
    let x = matches
        .values_of("X")
        .into_iter()
        .flatten()
        .map(parse_number)
        .collect::<Result<Vec<f64>, CliError>>()?;

    let cmd = ValueCmd {
        curve: get_curve(matches)?,
        x,
    };

    evaluate::value(cmd, output)
}

fn run_bounds(matches: &ArgMatches, output: &mut dyn Write) -> Result<(), CliError> {
    let cmd = BoundsCmd {
        curve: get_curve(matches)?,
    };

    evaluate::bounds(cmd, output)
}

fn get_curve(matches: &ArgMatches) -> Result<CurveArgs, CliError> {
    let points = matches
        .values_of("POINTS")
        .into_iter()
        .flatten()
        .map(parse_point)
        .collect::<Result<Vec<_>, CliError>>()?;

    let handles = match matches.values_of("HANDLES") {
        Some(values) => Some(values.map(parse_handles).collect::<Result<Vec<_>, CliError>>()?),
        None => None,
    };

    Ok(CurveArgs {
        points,
        handles,
        symmetric: matches.is_present("SYMMETRIC"),
        options: get_solve_options(matches)?,
    })
}

fn get_solve_options(matches: &ArgMatches) -> Result<SolveOptions<f64>, CliError> {
    let mut options = SolveOptions::default();
    if let Some(tolerance) = matches.value_of("TOLERANCE") {
        options = options.with_tolerance(parse_number(tolerance)?);
    }
    if let Some(max) = matches.value_of("MAX_ITERATIONS") {
        let max = max.parse().map_err(|_| CliError::Parse {
            what: "iteration count",
            input: max.to_string(),
        })?;
        options = options.with_max_iterations(max);
    }

    Ok(options)
}
