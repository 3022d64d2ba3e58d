use std::io::Write;

use anyhow::Result;
use nalgebra::{Matrix3, Vector3};

use super::{ComparisonFrame, FrameRenderer, PlaybackSummary, QuaternionSource, ViewConfig};

// Axis bounds are fixed at [-1, 1]; a little margin keeps arrow tips inside.
const VIEW_EXTENT: f64 = 1.25;
const AXIS_GLYPHS: [(char, char); 3] = [('x', 'X'), ('y', 'Y'), ('z', 'Z')];
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Orthographic camera looking at the origin from `elevation`/`azimuth`.
#[derive(Debug, Clone, Copy)]
struct Camera {
    right: Vector3<f64>,
    up: Vector3<f64>,
}

impl Camera {
    fn new(elevation_deg: f64, azimuth_deg: f64) -> Self {
        let (sin_e, cos_e) = elevation_deg.to_radians().sin_cos();
        let (sin_a, cos_a) = azimuth_deg.to_radians().sin_cos();
        Self {
            right: Vector3::new(-sin_a, cos_a, 0.0),
            up: Vector3::new(-sin_e * cos_a, -sin_e * sin_a, cos_e),
        }
    }

    fn project(&self, point: &Vector3<f64>) -> (f64, f64) {
        (point.dot(&self.right), point.dot(&self.up))
    }
}

struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; width]; height],
        }
    }

    fn cell(&self, (u, v): (f64, f64)) -> Option<(usize, usize)> {
        let column = (u / VIEW_EXTENT + 1.0) / 2.0 * (self.width - 1) as f64;
        let row = (1.0 - v / VIEW_EXTENT) / 2.0 * (self.height - 1) as f64;
        let (column, row) = (column.round(), row.round());
        if column < 0.0 || row < 0.0 || !column.is_finite() || !row.is_finite() {
            return None;
        }
        let (column, row) = (column as usize, row as usize);
        (column < self.width && row < self.height).then_some((column, row))
    }

    fn plot(&mut self, point: (f64, f64), glyph: char) {
        if let Some((column, row)) = self.cell(point) {
            self.cells[row][column] = glyph;
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), glyph: char) {
        let steps = 2 * self.width.max(self.height);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(
                (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t),
                glyph,
            );
        }
    }

    fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.iter().map(|row| row.iter().collect())
    }
}

/// Draws the matrix panel and the quaternion panel side by side in a
/// terminal, redrawing in place for every frame.
pub struct AsciiRenderer<W: Write> {
    out: W,
    camera: Camera,
    view: ViewConfig,
    clear_screen: bool,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, view: ViewConfig) -> Self {
        Self {
            out,
            camera: Camera::new(view.elevation_deg, view.azimuth_deg),
            view,
            clear_screen: true,
        }
    }

    /// Appends frames instead of clearing the screen, for logs and tests.
    pub fn without_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_panel(&self, basis: &Matrix3<f64>) -> Canvas {
        let mut canvas = Canvas::new(self.view.panel_width.max(3), self.view.panel_height.max(3));
        let origin = self.camera.project(&Vector3::zeros());

        // fixed world axes, so a flipped frame shows up as a jump
        for axis in 0..3 {
            let mut end = Vector3::zeros();
            end[axis] = 1.0;
            canvas.line(self.camera.project(&-end), self.camera.project(&end), '·');
        }

        for (axis, (body, tip)) in AXIS_GLYPHS.iter().enumerate() {
            let end = self.camera.project(&basis.column(axis).into_owned());
            canvas.line(origin, end, *body);
            canvas.plot(end, *tip);
        }
        canvas.plot(origin, '+');
        canvas
    }
}

fn centered(text: &str, width: usize) -> String {
    format!("{:^width$}", text, width = width)
}

impl<W: Write> FrameRenderer for AsciiRenderer<W> {
    fn render(&mut self, frame: &ComparisonFrame) -> Result<()> {
        let matrix_panel = self.draw_panel(&frame.matrix);
        let quaternion_panel = self.draw_panel(&frame.quaternion_matrix);
        let width = matrix_panel.width;

        if self.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        writeln!(
            self.out,
            "{} │ {}",
            centered(&format!("Mat[{}]", frame.row), width),
            centered(&format!("Quat[{}]", frame.row), width)
        )?;
        for (left, right) in matrix_panel.lines().zip(quaternion_panel.lines()) {
            writeln!(self.out, "{} │ {}", left, right)?;
        }

        let q = &frame.quaternion;
        let source = match frame.quaternion_source {
            QuaternionSource::Stored => "stored",
            QuaternionSource::Computed => "computed",
        };
        writeln!(
            self.out,
            "roll {:8.2}°  pitch {:8.2}°  yaw {:8.2}°",
            frame.euler.roll, frame.euler.pitch, frame.euler.yaw
        )?;
        writeln!(
            self.out,
            "q = ({:+.4}, {:+.4}, {:+.4}, {:+.4}) {}  error {:.2e}{}",
            q.w,
            q.i,
            q.j,
            q.k,
            source,
            frame.error,
            if frame.flipped { "  FLIP" } else { "" }
        )?;
        writeln!(self.out, "press Enter or Ctrl-C to stop")?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, summary: &PlaybackSummary) -> Result<()> {
        writeln!(
            self.out,
            "{} frames, {} flips, max error {:.2e}",
            summary.frames_rendered, summary.flips, summary.max_error
        )?;
        self.out.flush()?;
        Ok(())
    }
}
