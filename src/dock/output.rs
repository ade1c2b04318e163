//! Pose extraction from AutoDock Vina output PDBQT files.
//!
//! Only the minimum needed to recover docked coordinate sets and their
//! binding energies is parsed: `MODEL`/`ENDMDL` framing, the
//! `REMARK VINA RESULT` record, and the fixed-column coordinates of
//! `ATOM`/`HETATM` records. Everything else in the file is ignored.

use super::error::Error;

/// A single docked conformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    /// Atom coordinates in file order, in angstroms.
    pub coords: Vec<[f64; 3]>,
    /// Predicted binding free energy in kcal/mol.
    pub energy: f64,
}

/// Parses all models from Vina output PDBQT text, best pose first.
pub(crate) fn parse_poses(text: &str) -> Result<Vec<Pose>, Error> {
    let mut poses = Vec::new();
    let mut coords: Vec<[f64; 3]> = Vec::new();
    let mut energy: Option<f64> = None;
    let mut in_model = false;

    for (line_no, line) in text.lines().enumerate() {
        if line.starts_with("MODEL") {
            in_model = true;
            coords.clear();
            energy = None;
        } else if line.starts_with("ENDMDL") {
            let energy = energy.ok_or_else(|| {
                Error::MalformedOutput(format!(
                    "model ending at line {} has no 'REMARK VINA RESULT' record",
                    line_no + 1
                ))
            })?;
            poses.push(Pose {
                coords: std::mem::take(&mut coords),
                energy,
            });
            in_model = false;
        } else if in_model && line.starts_with("REMARK VINA RESULT") {
            // REMARK VINA RESULT:    -7.8      0.000      0.000
            let value = line
                .split_whitespace()
                .nth(3)
                .and_then(|tok| tok.parse::<f64>().ok())
                .ok_or_else(|| {
                    Error::MalformedOutput(format!(
                        "unreadable energy in result record at line {}",
                        line_no + 1
                    ))
                })?;
            energy = Some(value);
        } else if in_model && (line.starts_with("ATOM") || line.starts_with("HETATM")) {
            coords.push(parse_coords(line, line_no)?);
        }
    }

    if poses.is_empty() {
        return Err(Error::MalformedOutput(
            "no MODEL records found".to_string(),
        ));
    }
    Ok(poses)
}

/// Reads the fixed-column x/y/z fields of an ATOM or HETATM record
/// (columns 31-38, 39-46, 47-54 in PDB numbering).
fn parse_coords(line: &str, line_no: usize) -> Result<[f64; 3], Error> {
    let field = |range: std::ops::Range<usize>| -> Result<f64, Error> {
        line.get(range.clone())
            .map(str::trim)
            .and_then(|tok| tok.parse::<f64>().ok())
            .ok_or_else(|| {
                Error::MalformedOutput(format!(
                    "unreadable coordinate in columns {}-{} at line {}",
                    range.start + 1,
                    range.end,
                    line_no + 1
                ))
            })
    };
    Ok([field(30..38)?, field(38..46)?, field(46..54)?])
}
