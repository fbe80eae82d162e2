//! Reader and writer for a plain-text subset of the Wavefront OBJ format.
//!
//! Supports:
//! - Vertex positions (`v x y z`)
//! - Vertex positions with an RGB color (`v x y z r g b`)
//! - Faces as lists of 1-based vertex indices (`f i j k ...`)
//!
//! Malformed lines are logged and skipped. Other statements (`vn`, `vt`,
//! comments, groups) are ignored.

use crate::error::ObjError;
use glam::DVec3;
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// RGB vertex color.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// A polygon given by vertex indices, 1-based as stored in the file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Face {
    pub indices: Vec<usize>,
}

/// Positions, optional per-vertex colors and faces of a mesh file.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ObjMesh {
    pub positions: Vec<DVec3>,
    pub colors: Vec<Color>,
    pub faces: Vec<Face>,
}

impl ObjMesh {
    /// Reads a mesh from a file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ObjError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ObjError> {
        let mut mesh = Self::default();
        for (number, line) in reader.lines().enumerate() {
            mesh.parse_line(&line?, number + 1);
        }
        Ok(mesh)
    }

    /// Parses mesh text held in memory.
    pub fn parse(text: &str) -> Self {
        let mut mesh = Self::default();
        for (number, line) in text.lines().enumerate() {
            mesh.parse_line(line, number + 1);
        }
        mesh
    }

    /// True if every position has a color.
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty() && self.colors.len() == self.positions.len()
    }

    fn parse_line(&mut self, line: &str, number: usize) {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return;
        };

        match keyword {
            "v" | "V" => {
                let values: Result<Vec<f64>, _> = tokens.map(str::parse::<f64>).collect();
                match values.as_deref() {
                    Ok([x, y, z]) => self.positions.push(DVec3::new(*x, *y, *z)),
                    Ok([x, y, z, r, g, b]) => {
                        self.positions.push(DVec3::new(*x, *y, *z));
                        self.colors.push(Color::new(*r, *g, *b));
                    }
                    _ => warn!("Ill formed vertex on line {}: {}", number, line.trim()),
                }
            }
            "f" | "F" => {
                let indices: Result<Vec<usize>, _> = tokens
                    .map(|token| token.split('/').next().unwrap_or(token).parse::<usize>())
                    .collect();
                match indices {
                    // Indices are 1-based, 0 refers to no vertex.
                    Ok(indices) if !indices.is_empty() && !indices.contains(&0) => self.faces.push(Face { indices }),
                    _ => warn!("Ill formed face on line {}: {}", number, line.trim()),
                }
            }
            _ => {}
        }
    }

    /// Writes the mesh to a file, replacing any existing content.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), ObjError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes positions (with colors if there is one per position) and faces.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), ObjError> {
        if self.colors.len() == self.positions.len() {
            for (p, c) in self.positions.iter().zip(&self.colors) {
                writeln!(writer, "v {} {} {} {} {} {}", p.x, p.y, p.z, c.r, c.g, c.b)?;
            }
        } else {
            if !self.colors.is_empty() {
                warn!(
                    "Can't export colors, {} colors for {} vertices",
                    self.colors.len(),
                    self.positions.len()
                );
            }
            for p in &self.positions {
                writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
            }
        }

        for face in &self.faces {
            write!(writer, "f ")?;
            for index in &face.indices {
                write!(writer, "{} ", index)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}
