use std::fmt;
use std::ops::Index;

use rand::Rng;

use crate::error::{Error, Result};

/// Dense row-major matrix of `f64`.
///
/// Dimensions are positive and fixed for the lifetime of the value. Binary
/// operations check shapes up front and return [`Error::DimensionMismatch`]
/// without touching either operand; only [`Matrix::add`], [`Matrix::add_scalar`]
/// and [`Matrix::randomize`] mutate the receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix. Both dimensions must be positive.
    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyShape { rows, cols });
        }
        Ok(Matrix::filled(rows, cols))
    }

    // Callers guarantee positive dimensions.
    fn filled(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Builds a matrix from rows of equal, non-zero length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyShape { rows, cols });
        }
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(Error::DimensionMismatch {
                op: "from_data",
                left: (1, cols),
                right: (1, bad.len()),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Column vector `(values.len(), 1)`.
    pub fn from_array(values: &[f64]) -> Result<Matrix> {
        if values.is_empty() {
            return Err(Error::EmptyShape { rows: 0, cols: 1 });
        }
        Ok(Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        })
    }

    /// Flattens row-major.
    pub fn to_array(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Half-width of the Xavier/Glorot uniform range: `sqrt(6 / (rows + cols))`.
    pub fn xavier_limit(&self) -> f64 {
        (6.0 / (self.rows + self.cols) as f64).sqrt()
    }

    /// Xavier/Glorot uniform initialization in place.
    ///
    /// Every entry becomes `(u * 2 - 1) * L` with `u` drawn from `[0, 1)` and
    /// `L = sqrt(6 / (rows + cols))`, so entries land in `[-L, L)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let limit = self.xavier_limit();
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x = (rng.gen::<f64>() * 2.0 - 1.0) * limit;
            }
        }
    }

    /// Elementwise `self += other`; shapes must match exactly.
    pub fn add(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape("add", other)?;
        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (x, y) in row.iter_mut().zip(other_row) {
                *x += y;
            }
        }
        Ok(())
    }

    /// Adds `k` to every entry.
    pub fn add_scalar(&mut self, k: f64) {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x += k;
            }
        }
    }

    /// Matrix product; requires `self.cols == rhs.rows`.
    pub fn dot(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("dot", rhs));
        }

        let mut res = Matrix::filled(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::filled(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Elementwise `self - rhs`.
    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape("subtract", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Elementwise (Hadamard) product.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix> {
        self.check_same_shape("hadamard", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a * b))
    }

    pub fn scale(&self, k: f64) -> Matrix {
        self.map(|x, _, _| x * k)
    }

    /// New matrix with `f(value, row, col)` applied to every entry.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64, usize, usize) -> f64,
    {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, row)| row.iter().enumerate().map(|(j, &x)| f(x, i, j)).collect())
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    fn zip_with<F>(&self, rhs: &Matrix, f: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(a, b)| a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect())
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    fn check_same_shape(&self, op: &'static str, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(self.mismatch(op, other));
        }
        Ok(())
    }

    fn mismatch(&self, op: &'static str, other: &Matrix) -> Error {
        Error::DimensionMismatch {
            op,
            left: self.shape(),
            right: other.shape(),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

/// Rows printed to three decimals between `=` rules.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "==".repeat(20);
        writeln!(f, "{rule}")?;
        for row in &self.data {
            let line: Vec<String> = row.iter().map(|x| format!("{x:.3}")).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        write!(f, "{rule}")
    }
}
