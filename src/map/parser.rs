use std::mem;
use std::str::FromStr;

use regex::Regex;

use crate::map::{Brush, Plane, Point3};
use crate::report::{Diagnostic, Reporter};

lazy_static! {
    /// `( x y z ) ( x y z ) ( x y z ) TEXTURE ...`. Anything after the texture, such as texture
    /// offsets, rotation, and scale, is ignored.
    static ref PLANE_LINE: Regex = Regex::new(concat!(
        r"^\(\s*([-+0-9.eE]+)\s+([-+0-9.eE]+)\s+([-+0-9.eE]+)\s*\)",
        r"\s*\(\s*([-+0-9.eE]+)\s+([-+0-9.eE]+)\s+([-+0-9.eE]+)\s*\)",
        r"\s*\(\s*([-+0-9.eE]+)\s+([-+0-9.eE]+)\s+([-+0-9.eE]+)\s*\)",
        r"\s*(\S+)",
    ))
    .unwrap();
}

/// Where the parser is in the brace structure of a map file. Entities sit at the top level and
/// brushes sit one level down inside entities. There is no deeper nesting.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseState {
    AtTopLevel,
    InsideEntity,
    /// Collecting the planes of one brush.
    InsideBrush { planes: Vec<Plane> },
}

impl Default for ParseState {
    fn default() -> Self {
        Self::AtTopLevel
    }
}

impl ParseState {
    /// Consumes one line and returns the next state. Completed brushes are appended to `brushes`.
    pub fn advance(
        self,
        line: &str,
        line_number: usize,
        brushes: &mut Vec<Brush>,
        reporter: &mut dyn Reporter,
    ) -> Self {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            return self;
        }

        match (self, line) {
            (Self::AtTopLevel, "{") => Self::InsideEntity,
            (Self::InsideEntity, "{") => Self::InsideBrush { planes: Vec::new() },
            (Self::InsideEntity, "}") => Self::AtTopLevel,

            (Self::InsideBrush { planes }, "}") => {
                if !planes.is_empty() {
                    brushes.push(Brush::new(planes));
                }
                Self::InsideEntity
            }

            (Self::InsideBrush { mut planes }, line) => {
                match parse_plane(line) {
                    Some(Ok(plane)) => planes.push(plane),
                    Some(Err(desc)) => reporter.report(Diagnostic::warning(format!(
                        "line {}: {}; plane skipped",
                        line_number, desc
                    ))),
                    // Patch and brush primitive syntax, or anything else we don't model.
                    None if line == "{" => reporter.report(Diagnostic::warning(format!(
                        "line {}: nested block inside a brush ignored",
                        line_number
                    ))),
                    None => {}
                }
                Self::InsideBrush { planes }
            }

            (Self::AtTopLevel, "}") => {
                reporter.report(Diagnostic::warning(format!(
                    "line {}: unmatched closing brace",
                    line_number
                )));
                Self::AtTopLevel
            }

            // Entity key/value pairs and top-level junk.
            (state, _) => state,
        }
    }

    /// Ends the input. A brush left open by a truncated file is kept if it has any planes.
    pub fn finish(self, brushes: &mut Vec<Brush>, reporter: &mut dyn Reporter) {
        match self {
            Self::AtTopLevel => {}
            Self::InsideEntity => {
                reporter.report(Diagnostic::warning("unexpected end of file inside an entity"))
            }
            Self::InsideBrush { planes } => {
                reporter.report(Diagnostic::warning(format!(
                    "unexpected end of file inside a brush; keeping its {} planes",
                    planes.len()
                )));
                if !planes.is_empty() {
                    brushes.push(Brush::new(planes));
                }
            }
        }
    }
}

/// Parses every line of `text` and returns the finished brushes in source order.
pub fn parse_brushes(text: &str, reporter: &mut dyn Reporter) -> Vec<Brush> {
    let mut brushes = Vec::new();
    let mut state = ParseState::default();

    for (index, line) in text.lines().enumerate() {
        state = mem::take(&mut state).advance(line, index + 1, &mut brushes, reporter);
    }
    state.finish(&mut brushes, reporter);

    brushes
}

/// Returns `None` if `line` isn't a plane, or an error description if it looks like one but a
/// coordinate isn't a number.
fn parse_plane(line: &str) -> Option<Result<Plane, String>> {
    let captures = PLANE_LINE.captures(line)?;

    let mut coords = [0.0; 9];
    for (i, coord) in coords.iter_mut().enumerate() {
        let text = &captures[i + 1];
        *coord = match f64::from_str(text) {
            Ok(value) => value,
            Err(_) => return Some(Err(format!("malformed number {:?}", text))),
        };
    }

    let point = |i: usize| Point3::new(coords[i * 3], coords[i * 3 + 1], coords[i * 3 + 2]);

    Some(Ok(Plane {
        points: [point(0), point(1), point(2)],
        texture: captures[10].to_lowercase(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;

    fn advance(state: ParseState, line: &str) -> (ParseState, Vec<Brush>) {
        let mut brushes = Vec::new();
        let state = state.advance(line, 1, &mut brushes, &mut Vec::new());
        (state, brushes)
    }

    #[test]
    fn transitions() {
        assert_eq!(advance(ParseState::AtTopLevel, "{").0, ParseState::InsideEntity);
        assert_eq!(
            advance(ParseState::InsideEntity, " { ").0,
            ParseState::InsideBrush { planes: vec![] }
        );
        assert_eq!(advance(ParseState::InsideEntity, "}").0, ParseState::AtTopLevel);
        assert_eq!(
            advance(ParseState::InsideEntity, r#""classname" "worldspawn""#).0,
            ParseState::InsideEntity
        );
        assert_eq!(
            advance(ParseState::InsideEntity, "( 0 0 0 ) ( 0 1 0 ) ( 0 0 1 ) wall").0,
            ParseState::InsideEntity
        );
    }

    #[test]
    fn plane_lines() {
        let (state, _) = advance(
            ParseState::InsideBrush { planes: vec![] },
            "( 1 -2 3.5 ) ( 0 1 0 ) ( +0 0 1e1 ) *LAVA1 [ 1 0 0 0 ] [ 0 -1 0 0 ] 0 1 1",
        );
        let planes = match state {
            ParseState::InsideBrush { planes } => planes,
            other => panic!("{:?}", other),
        };

        assert_eq!(planes.len(), 1);
        assert_eq!(planes[0].texture, "*lava1");
        assert_eq!(
            planes[0].points,
            [
                Point3::new(1.0, -2.0, 3.5),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 10.0),
            ]
        );
    }

    #[test]
    fn closing_brush() {
        let plane = parse_plane("( 0 0 0 ) ( 0 1 0 ) ( 0 0 1 ) wall").unwrap().unwrap();

        let (state, brushes) = advance(ParseState::InsideBrush { planes: vec![plane] }, "}");
        assert_eq!(state, ParseState::InsideEntity);
        assert_eq!(brushes.len(), 1);

        let (state, brushes) = advance(ParseState::InsideBrush { planes: vec![] }, "}");
        assert_eq!(state, ParseState::InsideEntity);
        assert!(brushes.is_empty());
    }

    #[test]
    fn skipped_lines() {
        let state = ParseState::InsideBrush { planes: vec![] };
        assert_eq!(advance(state.clone(), "").0, state);
        assert_eq!(advance(state.clone(), "   // ( 0 0 0 )").0, state);
        assert_eq!(advance(state.clone(), "brushDef").0, state);
    }

    #[test]
    fn malformed_number() {
        let mut diagnostics = Vec::new();
        let state = ParseState::InsideBrush { planes: vec![] }.advance(
            "( 0 0 0 ) ( 0 0 1.2.3 ) ( 1 0 0 ) stone",
            7,
            &mut Vec::new(),
            &mut diagnostics,
        );

        assert_eq!(state, ParseState::InsideBrush { planes: vec![] });
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.starts_with("line 7: malformed number \"1.2.3\""));
    }

    #[test]
    fn unterminated() {
        let mut diagnostics = Vec::new();
        let brushes = parse_brushes(
            "{\n{\n( 0 0 0 ) ( 0 1 0 ) ( 0 0 1 ) a\n",
            &mut diagnostics,
        );

        assert_eq!(brushes.len(), 1);
        assert_matches!(&diagnostics[..], [d] if d.severity == Severity::Warning);
    }

    #[test]
    fn stray_brace() {
        let mut diagnostics = Vec::new();
        let brushes = parse_brushes("}\n{\n}\n", &mut diagnostics);

        assert!(brushes.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }
}
