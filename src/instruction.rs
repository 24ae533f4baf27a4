//! The textual instruction format, one instruction per line:
//!
//! ```text
//! <on|off> x=<lo>..<hi>,y=<lo>..<hi>,z=<lo>..<hi>
//! ```

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};

use crate::cuboid::Cuboid;
use crate::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Op {
    On,
    Off,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub cuboid: Cuboid,
}

impl Instruction {
    /// Restrict this instruction to `bounds`; `None` if its cuboid lies
    /// wholly outside.
    pub fn clip(&self, bounds: &Cuboid) -> Option<Instruction> {
        self.cuboid.intersect(bounds).map(|cuboid| Instruction {
            op: self.op,
            cuboid,
        })
    }
}

fn i64_parser(input: &str) -> IResult<&str, i64> {
    map_res(
        recognize(tuple((opt(char('-')), digit1))),
        FromStr::from_str,
    )(input)
}

fn parse_range(input: &str) -> IResult<&str, (i64, i64)> {
    separated_pair(i64_parser, tag(".."), i64_parser)(input)
}

type RawRanges = ((i64, i64), (i64, i64), (i64, i64));

fn parse_ranges(input: &str) -> IResult<&str, RawRanges> {
    tuple((
        delimited(tag("x="), parse_range, tag(",")),
        delimited(tag("y="), parse_range, tag(",")),
        preceded(tag("z="), parse_range),
    ))(input)
}

fn parse_op(input: &str) -> IResult<&str, Op> {
    alt((map(tag("on"), |_| Op::On), map(tag("off"), |_| Op::Off)))(input)
}

fn parse_line(input: &str) -> IResult<&str, (Op, RawRanges)> {
    separated_pair(parse_op, char(' '), parse_ranges)(input)
}

impl Instruction {
    /// `line_no` is 1-based and only labels the error.  Grammar errors
    /// are `Error::Parse`; a syntactically valid line with an inverted
    /// range is `Error::InvalidRegion`.
    pub fn from_line(line_no: usize, line: &str) -> Result<Instruction, Error> {
        match parse_line(line) {
            Ok(("", (op, (x, y, z)))) => Ok(Instruction {
                op,
                cuboid: Cuboid::new(x, y, z)?,
            }),
            Ok((trailing, _)) => Err(Error::Parse {
                line_no,
                line: line.to_string(),
                reason: format!("unexpected trailing junk: '{}'", trailing),
            }),
            Err(e) => Err(Error::Parse {
                line_no,
                line: line.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Parse a whole input document.  The first bad line aborts the parse;
/// nothing is skipped or repaired.
pub fn parse_instructions(input: &str) -> Result<Vec<Instruction>, Error> {
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| Instruction::from_line(idx + 1, line))
        .collect()
}

#[cfg(test)]
use crate::cuboid::cube;

#[test]
fn test_parse_instruction() {
    assert_eq!(
        Instruction::from_line(1, "on x=-54112..-39298,y=-85059..-49293,z=-27449..7877"),
        Ok(Instruction {
            op: Op::On,
            cuboid: cube((-54112, -39298), (-85059, -49293), (-27449, 7877)),
        })
    );
    assert_eq!(
        Instruction::from_line(1, "off x=9..11,y=9..11,z=9..11"),
        Ok(Instruction {
            op: Op::Off,
            cuboid: cube((9, 11), (9, 11), (9, 11)),
        })
    );
}

#[test]
fn test_parse_rejects_malformed_line() {
    assert!(matches!(
        Instruction::from_line(3, "on x=1..2,y=3..4"),
        Err(Error::Parse { line_no: 3, .. })
    ));
    assert!(matches!(
        Instruction::from_line(1, "on x=1..2,y=3..4,z=5..6 extra"),
        Err(Error::Parse { line_no: 1, .. })
    ));
    assert!(matches!(
        Instruction::from_line(1, "toggle x=1..2,y=3..4,z=5..6"),
        Err(Error::Parse { .. })
    ));
}

#[test]
fn test_parse_rejects_inverted_range() {
    assert_eq!(
        Instruction::from_line(1, "on x=1..2,y=4..3,z=5..6"),
        Err(Error::InvalidRegion {
            axis: 'y',
            lo: 4,
            hi: 3
        })
    );
}

#[test]
fn test_parse_instructions() {
    let input = "on x=10..12,y=10..12,z=10..12\noff x=9..11,y=9..11,z=9..11\n";
    let instructions = parse_instructions(input).expect("input should parse");
    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0].op, Op::On);
    assert_eq!(instructions[1].op, Op::Off);

    let bad = "on x=10..12,y=10..12,z=10..12\nnonsense\n";
    assert!(matches!(
        parse_instructions(bad),
        Err(Error::Parse { line_no: 2, .. })
    ));
}

#[test]
fn test_clip() {
    let bounds = cube((-50, 50), (-50, 50), (-50, 50));
    let inst = Instruction::from_line(1, "on x=-60..-40,y=0..10,z=45..70").unwrap();
    assert_eq!(
        inst.clip(&bounds),
        Some(Instruction {
            op: Op::On,
            cuboid: cube((-50, -40), (0, 10), (45, 50)),
        })
    );
    let outside = Instruction::from_line(1, "on x=60..70,y=0..10,z=0..10").unwrap();
    assert_eq!(outside.clip(&bounds), None);
}
