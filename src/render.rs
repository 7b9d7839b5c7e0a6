use crate::Dimension;
use crate::driver::Renderer;
use crate::error::RenderError;
use crate::grid::CellView;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// A text canvas that draws a grid of cells with unicode braille, 2x4 pixels per character.
///
/// Each cell is a `cell_size x cell_size` square of pixels. With gridlines on, every cell is
/// surrounded by a one pixel line, so a grid `n` cells across is `(cell_size + 1) * n + 1` pixels
/// wide.
pub struct Canvas {
    /// The pixel buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Dot patterns, one per braille character of the framebuffer
    cp: Vec<u8>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,

    columns: Dimension,
    rows: Dimension,
    cell_size: usize,
    gridlines: bool,
}

impl Canvas {
    /// A canvas for a `columns x rows` grid.
    pub fn for_grid(
        columns: Dimension,
        rows: Dimension,
        cell_size: usize,
        gridlines: bool,
    ) -> Self {
        let pitch = cell_size + gridlines as usize;
        let border = gridlines as usize;

        let w = pitch * columns as usize + border;
        let h = pitch * rows as usize + border;

        // For each braille character we need 3 bytes, and each line ends with a 1 byte newline.
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self {
            cb: vec![false; w * h],
            fb,
            cp: vec![0; bw * bh],
            w,
            h,
            columns,
            rows,
            cell_size,
            gridlines,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turns on a single pixel
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        let i = self.xy_from(x, y);

        self.cb[i] = true;
    }

    /// Turns on a square of `s x s` pixels with its top left corner at `(x, y)`
    pub fn draw_square(&mut self, x: usize, y: usize, s: usize) {
        assert!(x + s <= self.w, "x is out of bounds");
        assert!(y + s <= self.h, "y is out of bounds");

        for dy in 0..s {
            let i = self.xy_from(x, y + dy);
            self.cb[i..i + s].fill(true);
        }
    }

    /// Draw the lines separating cells. Does nothing when gridlines are off.
    pub fn draw_grid(&mut self) {
        if !self.gridlines {
            return;
        }

        let pitch = self.cell_size + 1;

        // vertical lines
        for i in 0..=self.columns as usize {
            let x = i * pitch;

            for y in 0..self.h {
                self.draw_pixel(x, y);
            }
        }

        // horizontal lines
        for j in 0..=self.rows as usize {
            let i = self.xy_from(0, j * pitch);
            self.cb[i..i + self.w].fill(true);
        }
    }

    /// Fill in every live cell of `cells`.
    pub fn draw_cells(&mut self, cells: CellView<'_>) -> Result<(), RenderError> {
        if cells.width() != self.columns || cells.height() != self.rows {
            return Err(RenderError::GridMismatch {
                expected_width: self.columns,
                expected_height: self.rows,
                width: cells.width(),
                height: cells.height(),
            });
        }

        let pitch = self.cell_size + self.gridlines as usize;
        let border = self.gridlines as usize;

        for (row, line) in cells.rows().enumerate() {
            for (column, cell) in line.iter().enumerate() {
                if cell.is_alive() {
                    let (x, y) = (column * pitch + border, row * pitch + border);
                    self.draw_square(x, y, self.cell_size);
                }
            }
        }

        Ok(())
    }

    /// Reset the pixel buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Turn the pixel buffer into braille text, one line per 4 rows of pixels.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new dot patterns
        self.cp.fill(0);

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                self.cp[(y / 4) * bw + (x / 2)] |= Self::get_hex_value(x, y);
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &dots) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(braille(dots));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u8 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

impl Renderer for Canvas {
    type Error = RenderError;

    /// Redraw the whole canvas for a new generation. Call [`Canvas::render`] to get the text.
    fn draw(&mut self, cells: CellView<'_>) -> Result<(), Self::Error> {
        self.reset();
        self.draw_grid();
        self.draw_cells(cells)
    }
}

fn braille(dots: u8) -> char {
    // every codepoint in U+2800..=U+28FF is a braille pattern
    char::from_u32(BRAILLE_EMPTY + dots as u32).unwrap_or(' ')
}
