// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Trimetric Team

//! Gmsh MSH 4.1 (ASCII) reader
//!
//! Only the surface triangles are kept: elements of type 2 inside entity
//! blocks of dimension 2. Nodes are read from every block, then the nodes the
//! triangles reference are renumbered to `0..n` in ascending tag order.
//! Unreferenced nodes are dropped, so `#V` counts only the nodes some
//! triangle uses, even when a 2-D node block carries extra surface nodes.

use super::error::{LoadResult, MeshLoadError};
use crate::geometry::Mesh;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// 3-node triangle
const ELEMENT_TRIANGLE: usize = 2;

pub fn load_msh<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshLoadError::from_open(e, path))?;
    let mesh = parse_msh(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "loaded MSH"
    );
    Ok(mesh)
}

/// Non-empty trimmed lines with a cursor
struct Lines {
    lines: Vec<String>,
    pos: usize,
}

impl Lines {
    fn next(&mut self) -> LoadResult<&str> {
        let line = self
            .lines
            .get(self.pos)
            .ok_or_else(|| MeshLoadError::invalid_content("unexpected end of MSH file"))?;
        self.pos += 1;
        Ok(line.as_str())
    }

    fn is_done(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Parse the next line as whitespace-separated integers
    fn numbers(&mut self) -> LoadResult<Vec<usize>> {
        self.next()?
            .split_whitespace()
            .map(|t| t.parse::<usize>().map_err(MeshLoadError::from))
            .collect()
    }

    fn expect(&mut self, marker: &str) -> LoadResult<()> {
        let line = self.next()?;
        if line == marker {
            Ok(())
        } else {
            Err(MeshLoadError::invalid_content(format!(
                "expected {marker}, found '{line}'"
            )))
        }
    }

    fn skip_section(&mut self, name: &str) -> LoadResult<()> {
        let end = format!("$End{name}");
        while self.next()? != end {}
        Ok(())
    }
}

fn field(values: &[usize], index: usize, what: &str) -> LoadResult<usize> {
    values
        .get(index)
        .copied()
        .ok_or_else(|| MeshLoadError::invalid_content(format!("missing {what}")))
}

pub fn parse_msh<R: BufRead>(reader: R) -> LoadResult<Mesh> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    let mut lines = Lines { lines, pos: 0 };

    let mut seen_format = false;
    let mut nodes: HashMap<usize, [f64; 3]> = HashMap::new();
    let mut triangles: Vec<[usize; 3]> = Vec::new();

    while !lines.is_done() {
        let header = lines.next()?.to_string();
        match header.as_str() {
            "$MeshFormat" => {
                read_format(&mut lines)?;
                seen_format = true;
            }
            "$Nodes" => read_nodes(&mut lines, &mut nodes)?,
            "$Elements" => read_elements(&mut lines, &mut triangles)?,
            other => match other.strip_prefix('$') {
                Some(name) => lines.skip_section(name)?,
                None => {
                    return Err(MeshLoadError::invalid_content(format!(
                        "unexpected line outside a section: '{other}'"
                    )))
                }
            },
        }
    }

    if !seen_format {
        return Err(MeshLoadError::invalid_content("missing $MeshFormat section"));
    }

    // Renumber referenced node tags to 0..n in ascending tag order
    let used: BTreeSet<usize> = triangles.iter().flatten().copied().collect();
    let mut index_of = HashMap::with_capacity(used.len());
    let mut positions = Vec::with_capacity(used.len());
    for (index, tag) in used.into_iter().enumerate() {
        let position = nodes
            .get(&tag)
            .ok_or_else(|| MeshLoadError::invalid_content(format!("element references unknown node {tag}")))?;
        positions.push(*position);
        index_of.insert(tag, index);
    }

    let faces: Vec<[usize; 3]> = triangles
        .iter()
        .map(|t| t.map(|tag| index_of[&tag]))
        .collect();

    Ok(Mesh::from_rows(&positions, &faces))
}

fn read_format(lines: &mut Lines) -> LoadResult<()> {
    let line = lines.next()?.to_string();
    let mut fields = line.split_whitespace();
    let version = fields.next().unwrap_or_default();
    let file_type = fields.next().unwrap_or_default();
    if version != "4.1" {
        return Err(MeshLoadError::invalid_content(format!(
            "unsupported MSH version {version}, expected 4.1"
        )));
    }
    if file_type != "0" {
        return Err(MeshLoadError::invalid_content("binary MSH is not supported"));
    }
    lines.expect("$EndMeshFormat")
}

fn read_nodes(lines: &mut Lines, nodes: &mut HashMap<usize, [f64; 3]>) -> LoadResult<()> {
    let summary = lines.numbers()?;
    let num_blocks = field(&summary, 0, "node block count")?;
    nodes.reserve(field(&summary, 1, "node count")?);

    for _ in 0..num_blocks {
        let block = lines.numbers()?;
        let count = field(&block, 3, "nodes in block")?;

        let mut tags = Vec::with_capacity(count);
        for _ in 0..count {
            tags.push(field(&lines.numbers()?, 0, "node tag")?);
        }
        for tag in tags {
            let line = lines.next()?;
            let mut coords = [0.0; 3];
            let mut values = line.split_whitespace();
            for coord in &mut coords {
                let token = values
                    .next()
                    .ok_or_else(|| MeshLoadError::invalid_content(format!("node {tag} needs three coordinates")))?;
                *coord = token.parse()?;
            }
            nodes.insert(tag, coords);
        }
    }
    lines.expect("$EndNodes")
}

fn read_elements(lines: &mut Lines, triangles: &mut Vec<[usize; 3]>) -> LoadResult<()> {
    let summary = lines.numbers()?;
    let num_blocks = field(&summary, 0, "element block count")?;

    for _ in 0..num_blocks {
        let block = lines.numbers()?;
        let dim = field(&block, 0, "entity dimension")?;
        let element_type = field(&block, 2, "element type")?;
        let count = field(&block, 3, "elements in block")?;
        let keep = dim == 2 && element_type == ELEMENT_TRIANGLE;

        for _ in 0..count {
            if !keep {
                lines.next()?;
                continue;
            }
            let element = lines.numbers()?;
            triangles.push([
                field(&element, 1, "triangle node")?,
                field(&element, 2, "triangle node")?,
                field(&element, 3, "triangle node")?,
            ]);
        }
    }
    lines.expect("$EndElements")
}
