// Matrix Market ingest.
//
// The accepted dialect is the coordinate one: any number of `%`/`%%`
// comment lines, one `rows cols nnz` dimensions line, then `row col value`
// entry lines with 1-based indices.  Duplicate coordinates are
// last-write-wins, so a trailing explicit zero erases the earlier value.

use crate::error::MatrixError;
use crate::matrix::{Matrix, SquareMatrix};
use crate::scalar::ScalarT;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

impl<T> Matrix<T>
where
    T: ScalarT + FromStr,
{
    /// Load the matrix from a Matrix Market file.
    ///
    /// The matrix is resized to the shape of the dimensions line, dropping
    /// all previous content, and ends up in uncompressed state.
    pub fn read_matrix_market<P: AsRef<Path>>(&mut self, path: P) -> Result<(), MatrixError> {
        let (rows, cols, entries) = parse_market::<T>(path.as_ref())?;
        self.resize_and_clear(rows, cols);
        for (r, c, v) in entries {
            self.set(r, c, v)?;
        }
        Ok(())
    }
}

impl<T> SquareMatrix<T>
where
    T: ScalarT + FromStr,
{
    /// Load the matrix from a Matrix Market file, which must describe a
    /// square matrix.
    pub fn read_matrix_market<P: AsRef<Path>>(&mut self, path: P) -> Result<(), MatrixError> {
        let (rows, cols, entries) = parse_market::<T>(path.as_ref())?;
        if rows != cols {
            return Err(MatrixError::ShapeMismatch {
                lhs: (rows, cols),
                rhs: (rows, rows),
            });
        }
        self.resize_and_clear(rows);
        for (r, c, v) in entries {
            self.set(r, c, v)?;
        }
        Ok(())
    }
}

type Triplets<T> = (usize, usize, Vec<(usize, usize, T)>);

fn parse_market<T>(path: &Path) -> Result<Triplets<T>, MatrixError>
where
    T: ScalarT + FromStr,
{
    let io_err = |source| MatrixError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let reader = BufReader::new(file);

    let mut dims = None;
    let mut entries = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        let lineno = lineno + 1;
        let text = line.trim();

        // banner and comment lines, and stray blanks
        if text.is_empty() || text.starts_with('%') {
            continue;
        }
        let fields: Vec<&str> = text.split_whitespace().collect();

        match dims {
            None => {
                if fields.len() != 3 {
                    return Err(MatrixError::Parse {
                        line: lineno,
                        reason: "dimensions line must hold rows, cols and nnz".into(),
                    });
                }
                let rows = parse_count(fields[0], lineno)?;
                let cols = parse_count(fields[1], lineno)?;
                let nnz = parse_count(fields[2], lineno)?;
                entries.reserve(nnz);
                dims = Some((rows, cols));
            }
            Some(_) => {
                if fields.len() != 3 {
                    return Err(MatrixError::Parse {
                        line: lineno,
                        reason: "entry line must hold row, col and value".into(),
                    });
                }
                let row = parse_coordinate(fields[0], lineno)?;
                let col = parse_coordinate(fields[1], lineno)?;
                let v = fields[2].parse::<T>().map_err(|_| MatrixError::Parse {
                    line: lineno,
                    reason: format!("malformed value `{}`", fields[2]),
                })?;
                entries.push((row - 1, col - 1, v));
            }
        }
    }

    let (rows, cols) = dims.ok_or_else(|| MatrixError::Parse {
        line: 0,
        reason: "file ends before the dimensions line".into(),
    })?;
    Ok((rows, cols, entries))
}

fn parse_count(field: &str, line: usize) -> Result<usize, MatrixError> {
    field.parse::<usize>().map_err(|_| MatrixError::Parse {
        line,
        reason: format!("malformed integer `{field}`"),
    })
}

fn parse_coordinate(field: &str, line: usize) -> Result<usize, MatrixError> {
    let idx = parse_count(field, line)?;
    if idx == 0 {
        return Err(MatrixError::Parse {
            line,
            reason: "matrix market indices are 1-based".into(),
        });
    }
    Ok(idx)
}
