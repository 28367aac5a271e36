use curvedit::editor::{Curve, EditError, PointId, Side};
use curvedit::geom::SolveOptions;
use curvedit::math::{point, vector, Point, Vector};

use thiserror::Error;

use std::io;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Could not parse {what} {input:?}.")]
    Parse { what: &'static str, input: String },
    #[error("Expected {expected} handle pairs, got {got}.")]
    HandleCount { expected: usize, got: usize },
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The curve described on the command line.
pub struct CurveArgs {
    pub points: Vec<Point>,
    /// One `(left, right)` pair per point, in the order the points were given.
    pub handles: Option<Vec<(Vector, Vector)>>,
    pub symmetric: bool,
    pub options: SolveOptions<f64>,
}

impl CurveArgs {
    pub fn build(&self) -> Result<Curve, CliError> {
        if let Some(handles) = &self.handles {
            if handles.len() != self.points.len() {
                return Err(CliError::HandleCount {
                    expected: self.points.len(),
                    got: handles.len(),
                });
            }
        }

        // `from_positions` gives `PointId(i)` to the point built from `points[i]`.
        let mut curve = Curve::from_positions(&self.points)?;
        curve.set_solve_options(self.options);

        for idx in 0..self.points.len() {
            let id = PointId::from_usize(idx);
            if let Some(handles) = &self.handles {
                let (left, right) = handles[idx];
                curve.set_handle(id, Side::Left, left)?;
                curve.set_handle(id, Side::Right, right)?;
            }
            if self.symmetric {
                curve.set_symmetric(id, true)?;
            }
        }

        Ok(curve)
    }
}

pub struct SampleCmd {
    pub curve: CurveArgs,
    pub count: usize,
    /// Width and height of the display rectangle to map the samples into.
    pub display: Option<(f64, f64)>,
}

pub struct ValueCmd {
    pub curve: CurveArgs,
    pub x: Vec<f64>,
}

pub struct BoundsCmd {
    pub curve: CurveArgs,
}

pub fn parse_number(src: &str) -> Result<f64, CliError> {
    src.trim().parse().map_err(|_| CliError::Parse {
        what: "number",
        input: src.to_string(),
    })
}

fn parse_numbers(src: &str, what: &'static str, count: usize) -> Result<Vec<f64>, CliError> {
    let numbers = src
        .split(',')
        .map(parse_number)
        .collect::<Result<Vec<f64>, CliError>>()
        .map_err(|_| CliError::Parse { what, input: src.to_string() })?;

    if numbers.len() != count {
        return Err(CliError::Parse { what, input: src.to_string() });
    }

    Ok(numbers)
}

/// Parses `x,y`.
pub fn parse_point(src: &str) -> Result<Point, CliError> {
    let n = parse_numbers(src, "point", 2)?;
    Ok(point(n[0], n[1]))
}

/// Parses `lx,ly,rx,ry`, both handles relative to their point.
pub fn parse_handles(src: &str) -> Result<(Vector, Vector), CliError> {
    let n = parse_numbers(src, "handles", 4)?;
    Ok((vector(n[0], n[1]), vector(n[2], n[3])))
}

/// Parses `WIDTHxHEIGHT`.
pub fn parse_size(src: &str) -> Result<(f64, f64), CliError> {
    let err = || CliError::Parse {
        what: "size",
        input: src.to_string(),
    };
    let mut parts = src.split('x');
    let w = parts.next().ok_or_else(err)?;
    let h = parts.next().ok_or_else(err)?;
    if parts.next().is_some() {
        return Err(err());
    }

    Ok((
        parse_number(w).map_err(|_| err())?,
        parse_number(h).map_err(|_| err())?,
    ))
}

#[cfg(test)]
fn curve_args(points: &[(f64, f64)]) -> CurveArgs {
    CurveArgs {
        points: points.iter().map(|&(x, y)| point(x, y)).collect(),
        handles: None,
        symmetric: false,
        options: SolveOptions::default(),
    }
}

#[test]
fn parse_values() {
    assert_eq!(parse_point("0.5,-2").unwrap(), point(0.5, -2.0));
    assert_eq!(parse_point(" 1 , 2 ").unwrap(), point(1.0, 2.0));
    assert!(parse_point("1").is_err());
    assert!(parse_point("1,2,3").is_err());
    assert!(parse_point("a,2").is_err());

    assert_eq!(
        parse_handles("-0.1,0,0.2,0.5").unwrap(),
        (vector(-0.1, 0.0), vector(0.2, 0.5))
    );
    assert!(parse_handles("0,0").is_err());

    assert_eq!(parse_size("800x600").unwrap(), (800.0, 600.0));
    assert!(parse_size("800").is_err());
    assert!(parse_size("1x2x3").is_err());
}

#[test]
fn build_curve() {
    let mut args = curve_args(&[(1.0, 1.0), (0.0, 0.0), (0.5, 0.25)]);
    args.handles = Some(vec![
        (vector(-0.1, 0.0), vector(0.1, 0.0)),
        (vector(-0.2, 0.0), vector(0.2, 0.0)),
        (vector(-0.3, 0.0), vector(0.3, 0.0)),
    ]);

    let curve = args.build().unwrap();
    let xs: Vec<f64> = curve.points().iter().map(|p| p.x()).collect();
    assert_eq!(xs, [0.0, 0.5, 1.0]);
    assert_eq!(curve.points()[0].right_handle(), vector(0.2, 0.0));
    assert_eq!(curve.points()[1].left_handle(), vector(-0.3, 0.0));

    args.handles = Some(vec![(vector(0.0, 0.0), vector(0.0, 0.0))]);
    assert!(matches!(
        args.build(),
        Err(CliError::HandleCount { expected: 3, got: 1 })
    ));

    assert!(curve_args(&[(0.0, 0.0)]).build().is_err());
}
