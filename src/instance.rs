//! Module for parsing and representing TSP road-network instances.
//!
//! An instance file lists the number of cities and roads on its first line
//! (`<cities>,<roads>`), followed by one `<cityA>,<cityB>,<km>` line per road.
//! Roads are bidirectional, so the distance matrix is symmetric.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Largest city count the dense matrix is built for
pub const MAX_CITIES: usize = 10_000;

/// A bidirectional road between two cities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint (1-indexed)
    pub city_a: usize,
    /// Second endpoint (1-indexed)
    pub city_b: usize,
    /// Road length in km
    pub distance: f64,
}

impl Edge {
    pub fn new(city_a: usize, city_b: usize, distance: f64) -> Self {
        Edge { city_a, city_b, distance }
    }
}

/// Dense pairwise distance table indexed by city id.
///
/// Row and column 0 are unused so that city ids can index directly.
/// Pairs without a road keep a distance of 0.0; `has_edge` tells them apart
/// from genuine zero-length roads.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    num_cities: usize,
    distances: Vec<Vec<f64>>,
    connected: Vec<Vec<bool>>,
}

impl DistanceMatrix {
    /// Build the symmetric matrix for cities `1..=num_cities`.
    ///
    /// Duplicate roads overwrite earlier ones. Self-loops are skipped so the
    /// diagonal stays at zero.
    pub fn from_edges(edges: &[Edge], num_cities: usize) -> Result<Self> {
        if num_cities > MAX_CITIES {
            return Err(TspError::Configuration(format!(
                "{} cities exceed the supported maximum of {}",
                num_cities, MAX_CITIES
            )));
        }
        let size = num_cities + 1;
        let mut distances = vec![vec![0.0; size]; size];
        let mut connected = vec![vec![false; size]; size];

        for edge in edges {
            for city in [edge.city_a, edge.city_b] {
                if city == 0 || city > num_cities {
                    return Err(TspError::InvalidCityReference { city, num_cities });
                }
            }

            if edge.city_a == edge.city_b {
                log::debug!("Ignoring self-loop on city {}", edge.city_a);
                continue;
            }

            distances[edge.city_a][edge.city_b] = edge.distance;
            distances[edge.city_b][edge.city_a] = edge.distance;
            connected[edge.city_a][edge.city_b] = true;
            connected[edge.city_b][edge.city_a] = true;
        }

        Ok(DistanceMatrix { num_cities, distances, connected })
    }

    /// Get the distance between two cities
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances[a][b]
    }

    /// Whether a road was declared between the two cities
    #[inline]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.connected[a][b]
    }

    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Number of unordered city pairs with no road
    pub fn missing_pairs(&self) -> usize {
        let mut missing = 0;
        for a in 1..=self.num_cities {
            for b in a + 1..=self.num_cities {
                if !self.connected[a][b] {
                    missing += 1;
                }
            }
        }
        missing
    }

    pub fn is_symmetric(&self) -> bool {
        (1..=self.num_cities).all(|a| {
            (1..=self.num_cities).all(|b| self.distances[a][b] == self.distances[b][a])
        })
    }
}

/// A complete TSP instance: the road list plus its precomputed matrix
#[derive(Debug, Clone)]
pub struct TspInstance {
    /// Name of the instance (file stem when loaded from disk)
    pub name: String,
    /// Number of cities, numbered `1..=num_cities`
    pub num_cities: usize,
    /// Roads as read from the input
    pub edges: Vec<Edge>,
    /// Precomputed distance matrix
    pub distance_matrix: DistanceMatrix,
}

impl TspInstance {
    /// Build an instance from already-parsed roads
    pub fn new(name: impl Into<String>, num_cities: usize, edges: Vec<Edge>) -> Result<Self> {
        let distance_matrix = DistanceMatrix::from_edges(&edges, num_cities)?;
        Ok(TspInstance {
            name: name.into(),
            num_cities,
            edges,
            distance_matrix,
        })
    }

    /// Parse an instance from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "instance".to_string());

        Self::from_reader(BufReader::new(file), name)
    }

    /// Parse an instance held in memory
    pub fn parse_str(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes(), "inline")
    }

    /// Parse an instance from any buffered reader.
    ///
    /// Blank lines are skipped. The number of road lines must match the
    /// count declared in the header.
    pub fn from_reader<R: BufRead>(reader: R, name: impl Into<String>) -> Result<Self> {
        let mut header: Option<(usize, usize)> = None;
        let mut edges = Vec::new();
        let mut last_line = 0;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            last_line = line_no;
            let line = line.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => TspError::malformed(line_no, "line is not valid UTF-8"),
                _ => TspError::Io(e),
            })?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();

            match header {
                None => {
                    if fields.len() != 2 {
                        return Err(TspError::malformed(
                            line_no,
                            format!("expected '<cities>,<roads>', found {} field(s)", fields.len()),
                        ));
                    }
                    let num_cities = parse_count(fields[0], line_no, "city count")?;
                    let num_edges = parse_count(fields[1], line_no, "road count")?;
                    if num_cities > MAX_CITIES {
                        return Err(TspError::malformed(
                            line_no,
                            format!("city count {} exceeds the maximum of {}", num_cities, MAX_CITIES),
                        ));
                    }
                    header = Some((num_cities, num_edges));
                    // The road count is untrusted until the lines are read.
                    edges.reserve(num_edges.min(1024));
                }
                Some((_, num_edges)) => {
                    if edges.len() == num_edges {
                        return Err(TspError::malformed(
                            line_no,
                            format!("more road lines than the {} declared", num_edges),
                        ));
                    }
                    edges.push(parse_edge(&fields, line_no)?);
                }
            }
        }

        let (num_cities, num_edges) = header
            .ok_or_else(|| TspError::malformed(1, "missing '<cities>,<roads>' header"))?;

        if edges.len() != num_edges {
            return Err(TspError::malformed(
                last_line,
                format!("declared {} road(s) but found {}", num_edges, edges.len()),
            ));
        }

        log::debug!("Parsed {} cities and {} roads", num_cities, edges.len());

        Self::new(name, num_cities, edges)
    }

    /// Get statistics about the instance
    pub fn statistics(&self) -> InstanceStatistics {
        let lengths: Vec<f64> = self.edges.iter()
            .filter(|e| e.city_a != e.city_b)
            .map(|e| e.distance)
            .collect();

        let total_pairs = self.num_cities * self.num_cities.saturating_sub(1) / 2;
        let missing_pairs = self.distance_matrix.missing_pairs();
        let density = if total_pairs > 0 {
            (total_pairs - missing_pairs) as f64 / total_pairs as f64
        } else {
            0.0
        };

        let avg_distance = if lengths.is_empty() {
            0.0
        } else {
            lengths.iter().sum::<f64>() / lengths.len() as f64
        };
        let min_distance = lengths.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_distance = lengths.iter().cloned().fold(0.0, f64::max);

        InstanceStatistics {
            name: self.name.clone(),
            num_cities: self.num_cities,
            num_edges: self.edges.len(),
            missing_pairs,
            density,
            avg_distance,
            min_distance: if lengths.is_empty() { 0.0 } else { min_distance },
            max_distance,
        }
    }
}

fn parse_count(field: &str, line: usize, what: &str) -> Result<usize> {
    field
        .parse()
        .map_err(|_| TspError::malformed(line, format!("invalid {}: '{}'", what, field)))
}

fn parse_edge(fields: &[&str], line: usize) -> Result<Edge> {
    if fields.len() != 3 {
        return Err(TspError::malformed(
            line,
            format!("expected '<cityA>,<cityB>,<km>', found {} field(s)", fields.len()),
        ));
    }

    let city_a = parse_count(fields[0], line, "city id")?;
    let city_b = parse_count(fields[1], line, "city id")?;
    let distance: f64 = fields[2]
        .parse()
        .map_err(|_| TspError::malformed(line, format!("invalid distance: '{}'", fields[2])))?;

    if !distance.is_finite() {
        return Err(TspError::malformed(line, format!("distance must be finite, got {}", distance)));
    }
    if distance < 0.0 {
        return Err(TspError::malformed(line, format!("distance must be non-negative, got {}", distance)));
    }

    Ok(Edge::new(city_a, city_b, distance))
}

/// Statistics about a TSP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatistics {
    pub name: String,
    pub num_cities: usize,
    pub num_edges: usize,
    pub missing_pairs: usize,
    pub density: f64,
    pub avg_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Cities: {}", self.num_cities)?;
        writeln!(f, "  Roads: {}", self.num_edges)?;
        writeln!(f, "  Unconnected pairs: {}", self.missing_pairs)?;
        writeln!(f, "  Density: {:.2}%", self.density * 100.0)?;
        writeln!(f, "  Avg road length: {:.2}", self.avg_distance)?;
        writeln!(f, "  Min road length: {:.2}", self.min_distance)?;
        writeln!(f, "  Max road length: {:.2}", self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_CITIES: &str = "4,6\n1,2,10\n2,3,15\n3,4,20\n4,1,25\n1,3,35\n2,4,30\n";

    #[test]
    fn test_parse_instance() {
        let instance = TspInstance::parse_str(FOUR_CITIES).unwrap();

        assert_eq!(instance.num_cities, 4);
        assert_eq!(instance.edges.len(), 6);
        assert_eq!(instance.edges[4], Edge::new(1, 3, 35.0));
        assert_eq!(instance.distance_matrix.distance(3, 1), 35.0);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_blank_lines() {
        let text = "3, 2\n\n 1 , 2 , 4.5 \n2,3,1\n\n";
        let instance = TspInstance::parse_str(text).unwrap();

        assert_eq!(instance.num_cities, 3);
        assert!((instance.distance_matrix.distance(2, 1) - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_parse_rejects_short_edge_list() {
        let err = TspInstance::parse_str("3,3\n1,2,4\n2,3,1\n").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { .. }));
    }

    #[test]
    fn test_parse_rejects_extra_edge_lines() {
        let err = TspInstance::parse_str("3,1\n1,2,4\n2,3,1\n").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { line: 3, .. }));
    }

    #[test]
    fn test_parse_rejects_oversized_header_counts() {
        let err = TspInstance::parse_str("2,18446744073709551615\n1,2,3\n").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { .. }));

        let text = format!("{},1\n1,2,3\n", usize::MAX);
        let err = TspInstance::parse_str(&text).unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { line: 1, .. }));

        let text = format!("{},1\n1,2,3\n", MAX_CITIES + 1);
        let err = TspInstance::parse_str(&text).unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_matrix_rejects_too_many_cities() {
        let err = DistanceMatrix::from_edges(&[], usize::MAX).unwrap_err();
        assert!(matches!(err, TspError::Configuration(_)));
    }

    #[test]
    fn test_parse_rejects_negative_distance() {
        let err = TspInstance::parse_str("3,2\n1,2,4\n2,3,-1\n").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { line: 3, .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let bytes: &[u8] = b"3,1\n1,2,\xff\n";
        let err = TspInstance::from_reader(bytes, "bytes").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_non_numeric_fields() {
        let err = TspInstance::parse_str("3,1\n1,two,4\n").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { line: 2, .. }));

        let err = TspInstance::parse_str("3,1\n1,2,NaN\n").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { line: 2, .. }));

        let err = TspInstance::parse_str("three,1\n1,2,4\n").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let err = TspInstance::parse_str("\n\n").unwrap_err();
        assert!(matches!(err, TspError::MalformedInput { .. }));
    }

    #[test]
    fn test_invalid_city_reference() {
        let err = TspInstance::parse_str("3,1\n1,4,2\n").unwrap_err();
        assert!(matches!(err, TspError::InvalidCityReference { city: 4, num_cities: 3 }));

        let err = DistanceMatrix::from_edges(&[Edge::new(0, 1, 1.0)], 3).unwrap_err();
        assert!(matches!(err, TspError::InvalidCityReference { city: 0, .. }));
    }

    #[test]
    fn test_matrix_symmetry() {
        let instance = TspInstance::parse_str(FOUR_CITIES).unwrap();
        let matrix = &instance.distance_matrix;

        assert!(matrix.is_symmetric());
        for edge in &instance.edges {
            assert_eq!(
                matrix.distance(edge.city_a, edge.city_b),
                matrix.distance(edge.city_b, edge.city_a)
            );
        }
        for city in 1..=4 {
            assert_eq!(matrix.distance(city, city), 0.0);
        }
    }

    #[test]
    fn test_duplicate_edge_last_write_wins() {
        let edges = vec![Edge::new(1, 2, 5.0), Edge::new(2, 1, 8.0)];
        let matrix = DistanceMatrix::from_edges(&edges, 2).unwrap();

        assert_eq!(matrix.distance(1, 2), 8.0);
        assert_eq!(matrix.distance(2, 1), 8.0);
    }

    #[test]
    fn test_self_loop_keeps_zero_diagonal() {
        let edges = vec![Edge::new(2, 2, 9.0), Edge::new(1, 2, 3.0)];
        let matrix = DistanceMatrix::from_edges(&edges, 2).unwrap();

        assert_eq!(matrix.distance(2, 2), 0.0);
        assert!(!matrix.has_edge(2, 2));
    }

    #[test]
    fn test_missing_pairs() {
        let edges = vec![Edge::new(1, 2, 3.0), Edge::new(2, 3, 0.0)];
        let matrix = DistanceMatrix::from_edges(&edges, 3).unwrap();

        assert_eq!(matrix.missing_pairs(), 1);
        assert!(matrix.has_edge(3, 2));
        assert!(!matrix.has_edge(1, 3));
        // a zero-length road and a missing one read the same distance
        assert_eq!(matrix.distance(2, 3), matrix.distance(1, 3));
    }

    #[test]
    fn test_statistics() {
        let instance = TspInstance::parse_str(FOUR_CITIES).unwrap();
        let stats = instance.statistics();

        assert_eq!(stats.num_cities, 4);
        assert_eq!(stats.num_edges, 6);
        assert_eq!(stats.missing_pairs, 0);
        assert!((stats.density - 1.0).abs() < 1e-10);
        assert!((stats.avg_distance - 22.5).abs() < 1e-10);
        assert_eq!(stats.min_distance, 10.0);
        assert_eq!(stats.max_distance, 35.0);
        assert!(stats.to_string().contains("Cities: 4"));
    }
}
