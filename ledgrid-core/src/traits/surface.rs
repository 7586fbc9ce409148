//! Drawing surface trait for LED matrices

use crate::error::Error;

/// A rectangle of individually addressable LEDs
///
/// Coordinates are `(row, col)` with `(0, 0)` in the top-left corner.
pub trait LedSurface {
    /// Total LED rows
    fn rows(&self) -> usize;

    /// Total LED columns
    fn columns(&self) -> usize;

    /// Read one LED
    fn get_led(&self, row: usize, col: usize) -> Result<bool, Error>;

    /// Write one LED
    fn set_led(&mut self, row: usize, col: usize, on: bool) -> Result<(), Error>;
}

/// Helper trait for drawing shapes on top of `set_led`
///
/// Shapes use `(x, y)` = `(col, row)` and are clipped to the surface.
pub trait LedSurfaceExt: LedSurface {
    /// Set a single point; points outside the surface are skipped
    fn point(&mut self, x: i32, y: i32, on: bool) -> Result<(), Error> {
        let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
            return Ok(());
        };
        if row >= self.rows() || col >= self.columns() {
            return Ok(());
        }
        self.set_led(row, col, on)
    }

    /// Draw a line between two points, endpoints included
    ///
    /// Each step along the major axis lights the pixel nearest to the
    /// ideal line. Only steps that land on the surface are visited, so the
    /// cost is bounded by the surface size for any `i32` endpoints.
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) -> Result<(), Error> {
        let (x0, y0) = (i64::from(x0), i64::from(y0));
        let (dx, dy) = (i64::from(x1) - x0, i64::from(y1) - y0);
        let columns = i64::try_from(self.columns()).unwrap_or(i64::MAX);
        let rows = i64::try_from(self.rows()).unwrap_or(i64::MAX);

        if dx.abs() >= dy.abs() {
            walk_line((x0, y0), (dx, dy), (columns, rows), |col, row| {
                self.set_led(row, col, on)
            })
        } else {
            walk_line((y0, x0), (dy, dx), (rows, columns), |row, col| {
                self.set_led(row, col, on)
            })
        }
    }

    /// Turn every LED of the surface off
    fn clear_all(&mut self) -> Result<(), Error> {
        for row in 0..self.rows() {
            for col in 0..self.columns() {
                self.set_led(row, col, false)?;
            }
        }
        Ok(())
    }
}

// Blanket implementation for all LedSurface types
impl<T: LedSurface + ?Sized> LedSurfaceExt for T {}

/// Walk a line along its major axis `a`, minor axis `b`
///
/// `delta.0` must dominate: `|delta.0| >= |delta.1|`. Steps whose major
/// coordinate lies outside `0..limit.0` are skipped without being visited.
fn walk_line<F>(
    start: (i64, i64),
    delta: (i64, i64),
    limit: (i64, i64),
    mut plot: F,
) -> Result<(), Error>
where
    F: FnMut(usize, usize) -> Result<(), Error>,
{
    let (a0, b0) = start;
    let (da, db) = delta;
    let (a_limit, b_limit) = limit;
    let steps = da.abs();
    let dir = da.signum();

    // Step range that keeps the major coordinate on the surface
    let last = a_limit.saturating_sub(1);
    let (t_lo, t_hi) = if dir >= 0 {
        (a0.saturating_neg(), last.saturating_sub(a0))
    } else {
        (a0.saturating_sub(last), a0)
    };
    let (t_lo, t_hi) = (t_lo.max(0), t_hi.min(steps));

    let mut t = t_lo;
    while t <= t_hi {
        let a = a0 + dir * t;
        let b = b0 + nearest_offset(db, t, steps);
        if (0..b_limit).contains(&b) {
            if let (Ok(a), Ok(b)) = (usize::try_from(a), usize::try_from(b)) {
                plot(a, b)?;
            }
        }
        t += 1;
    }
    Ok(())
}

/// `round(db * t / steps)`, halves away from zero; zero when `steps == 0`
fn nearest_offset(db: i64, t: i64, steps: i64) -> i64 {
    if steps == 0 {
        return 0;
    }
    let num = i128::from(db) * i128::from(t);
    let den = i128::from(steps);
    let rounded = (2 * num + num.signum() * den) / (2 * den);
    // |rounded| <= |db|, which fits
    rounded as i64
}
