use crate::commands::{BoundsCmd, CliError, SampleCmd, ValueCmd};

use curvedit::math::{point, Box2D, ViewTransform};

use log::{info, warn};

use std::io::Write;

pub fn sample(cmd: SampleCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let curve = cmd.curve.build()?;
    let samples = curve.sample(cmd.count)?;

    info!("{} samples over {} control points", samples.len(), curve.len());

    let view = match cmd.display {
        Some((width, height)) => {
            // y points down on screens.
            let display = Box2D::new(point(0.0, height), point(width, 0.0));
            let view = ViewTransform::fit_range(&curve.bounding_range(), &display);
            if !view.is_invertible() {
                warn!("The view transform is not invertible, the curve is flat on one axis");
            }
            Some(view)
        }
        None => None,
    };

    for p in &samples {
        match &view {
            Some(view) => {
                let d = view.to_display_point(*p);
                writeln!(output, "{} {} {} {}", p.x, p.y, d.x, d.y)?;
            }
            None => {
                writeln!(output, "{} {}", p.x, p.y)?;
            }
        }
    }

    Ok(())
}

pub fn value(cmd: ValueCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let curve = cmd.curve.build()?;
    for x in &cmd.x {
        writeln!(output, "{}", curve.value_at(*x)?)?;
    }

    Ok(())
}

pub fn bounds(cmd: BoundsCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let curve = cmd.curve.build()?;
    let range = curve.bounding_range();
    writeln!(
        output,
        "{} {} {} {}",
        range.min.x, range.min.y, range.max.x, range.max.y
    )?;

    Ok(())
}

#[cfg(test)]
use crate::commands::CurveArgs;
#[cfg(test)]
use curvedit::geom::SolveOptions;

#[cfg(test)]
fn default_curve() -> CurveArgs {
    CurveArgs {
        points: vec![point(0.0, 0.0), point(1.0, 1.0)],
        handles: None,
        symmetric: false,
        options: SolveOptions::default(),
    }
}

#[cfg(test)]
fn run<F: FnOnce(&mut dyn Write) -> Result<(), CliError>>(f: F) -> String {
    let mut buffer: Vec<u8> = Vec::new();
    f(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn sample_command() {
    let out = run(|output| {
        sample(
            SampleCmd {
                curve: default_curve(),
                count: 3,
                display: None,
            },
            output,
        )
    });
    assert_eq!(out, "0 0\n0.5 0.5\n1 1\n");

    let out = run(|output| {
        sample(
            SampleCmd {
                curve: default_curve(),
                count: 2,
                display: Some((100.0, 50.0)),
            },
            output,
        )
    });
    assert_eq!(out, "0 0 0 50\n1 1 100 0\n");
}

#[test]
fn value_command() {
    let out = run(|output| {
        value(
            ValueCmd {
                curve: default_curve(),
                x: vec![-1.0, 0.5, 2.0],
            },
            output,
        )
    });
    assert_eq!(out, "0\n0.5\n1\n");
}

#[test]
fn bounds_command() {
    let mut curve = default_curve();
    curve.points.push(point(-2.0, 3.0));
    let out = run(|output| bounds(BoundsCmd { curve }, output));
    assert_eq!(out, "-2 0 1 3\n");
}
