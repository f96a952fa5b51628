/// Wavefront OBJ reader for vertex and face records
use nom::{
    branch::alt,
    bytes::complete::{take_till, take_till1},
    character::complete::{char, i64 as index, space0, space1},
    combinator::{eof, opt, peek, verify},
    multi::many1,
    number::complete::float,
    sequence::{pair, preceded, terminated},
    IResult,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::{Polygon, Vertex};
use crate::mesh::Mesh;

/// One line of an OBJ file
#[derive(Debug, PartialEq)]
enum Record<'a> {
    Vertex(Vertex),
    /// Raw one-based (or negative, relative) vertex references.
    Face(Vec<i64>),
    /// Any other record kind: normals, texture coordinates, groups, ...
    Ignored(&'a str),
    Blank,
}

/// Parse the OBJ file at `path`.
pub fn parse(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mesh = parse_reader(BufReader::new(file)).map_err(|e| match e {
        Error::Io { source, .. } => Error::io(path, source),
        other => other,
    })?;
    log::debug!(
        "parsed {}: {} vertices, {} polygons",
        path.display(),
        mesh.vertex_count(),
        mesh.polygon_count()
    );
    Ok(mesh)
}

/// Parse OBJ records from any buffered reader, line by line.
///
/// Face indices are resolved against the vertices read so far, so negative
/// indices count back from the most recent vertex record.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut mesh = Mesh::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io("<reader>", e))?;
        read_line(&mut mesh, number + 1, &line)?;
    }
    Ok(mesh)
}

/// Parse OBJ records held in memory.
pub fn parse_str(input: &str) -> Result<Mesh> {
    parse_reader(input.as_bytes())
}

/// Replace `mesh` with the contents of `path`, normalized for display.
///
/// On failure `mesh` is left as it was.
pub fn load_mesh(mesh: &mut Mesh, path: impl AsRef<Path>) -> Result<()> {
    let mut loaded = parse(path)?;
    loaded.normalize();
    *mesh = loaded;
    Ok(())
}

fn read_line(mesh: &mut Mesh, number: usize, line: &str) -> Result<()> {
    let record = match parse_record(line) {
        Ok((_, record)) => record,
        Err(e) => return Err(Error::parse(number, describe(line, e))),
    };

    match record {
        Record::Vertex(vertex) => mesh.add_vertex(vertex),
        Record::Face(references) => {
            let count = mesh.vertex_count();
            let indices = references
                .into_iter()
                .map(|reference| resolve_index(reference, count))
                .collect::<Result<Vec<_>>>()?;
            mesh.add_polygon(Polygon::new(indices))?;
        }
        Record::Ignored(kind) => log::trace!("line {number}: skipping '{kind}' record"),
        Record::Blank => {}
    }
    Ok(())
}

/// Turn a one-based or negative OBJ reference into a zero-based index.
fn resolve_index(reference: i64, vertex_count: usize) -> Result<u32> {
    let count = vertex_count as i64;
    let one_based = if reference < 0 {
        reference + count + 1
    } else {
        reference
    };
    let zero_based = one_based - 1;
    if zero_based < 0 || zero_based >= count {
        return Err(Error::IndexOutOfRange {
            index: zero_based,
            len: vertex_count,
        });
    }
    u32::try_from(zero_based).map_err(|_| Error::IndexOutOfRange {
        index: zero_based,
        len: vertex_count,
    })
}

fn describe(line: &str, err: nom::Err<nom::error::Error<&str>>) -> String {
    let keyword = line.split_whitespace().next().unwrap_or_default();
    let what = match keyword {
        "v" => "vertex record needs three numeric coordinates",
        "f" => "face record needs integer vertex references",
        _ => "malformed record",
    };
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) if !e.input.is_empty() => {
            format!("{what} (at '{}')", e.input.trim())
        }
        _ => what.to_string(),
    }
}

fn parse_record(line: &str) -> IResult<&str, Record<'_>> {
    let (rest, keyword) = opt(preceded(space0, take_till1(|c: char| c.is_whitespace())))(line)?;
    match keyword {
        None => Ok((rest, Record::Blank)),
        Some("v") => {
            let (rest, (x, y, z)) = parse_vector3(rest)?;
            Ok((rest, Record::Vertex(Vertex::new(x, y, z))))
        }
        Some("f") => {
            let (rest, references) = parse_face(rest)?;
            Ok((rest, Record::Face(references)))
        }
        Some(kind) => Ok((rest, Record::Ignored(kind))),
    }
}

/// Three finite coordinates; trailing fields such as `w` or vertex colors are ignored.
fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, x) = parse_coordinate(input)?;
    let (input, y) = parse_coordinate(input)?;
    let (input, z) = parse_coordinate(input)?;
    Ok((input, (x, y, z)))
}

fn parse_coordinate(input: &str) -> IResult<&str, f32> {
    preceded(
        space1,
        terminated(
            verify(float, |v: &f32| v.is_finite()),
            peek(alt((space1, eof))),
        ),
    )(input)
}

fn parse_face(input: &str) -> IResult<&str, Vec<i64>> {
    terminated(many1(preceded(space1, parse_reference)), pair(space0, eof))(input)
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`; only the vertex part is kept.
fn parse_reference(input: &str) -> IResult<&str, i64> {
    terminated(
        index,
        opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))),
    )(input)
}
