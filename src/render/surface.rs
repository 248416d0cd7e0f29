/// An RGB color for the pixel surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A rendering surface addressed in pixel coordinates.
///
/// The simulation's render step only needs fill operations; presenting the
/// surface on an actual display is someone else's job.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Set the color used by subsequent fills.
    fn set_fill_color(&mut self, color: Rgb);

    /// Fill a rectangle with the current fill color, clipped to the surface.
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32);

    /// Fill the whole surface with the current fill color.
    fn fill_background(&mut self) {
        self.fill_rect(0, 0, self.width(), self.height());
    }
}

/// An owned RGB framebuffer backing the game's render step.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    fill_color: Rgb,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let black = Rgb::new(0, 0, 0);
        Self {
            width,
            height,
            fill_color: black,
            pixels: vec![black; (width * height) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[(y * self.width + x) as usize]
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x = x.min(self.width);
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y.min(self.height)..y_end {
            let start = (row * self.width + x) as usize;
            let end = (row * self.width + x_end) as usize;
            self.pixels[start..end].fill(self.fill_color);
        }
    }
}
