use crate::color::Rgba;

/// How a drawing operation combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Composite {
    #[default]
    SourceOver,
    /// Erase the destination in proportion to the source alpha.
    DestinationOut,
    /// Additive blending.
    Lighter,
}

/// Immediate-mode 2D drawing surface.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn set_composite(&mut self, composite: Composite);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn stroke(&mut self, color: Rgba, line_width: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
}

/// Raster surface backed by premultiplied RGBA pixels.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 4]>,
    composite: Composite,
    path: Vec<Vec<(f32, f32)>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width * height],
            composite: Composite::default(),
            path: Vec::new(),
        }
    }

    /// Reallocates the raster. Previous content is discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, [0.0; 4]);
        self.path.clear();
    }

    pub fn columns(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.height
    }

    /// Premultiplied RGBA of one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        self.pixels[y * self.width + x]
    }

    /// Pixel composited over an opaque background, as 8-bit RGB.
    pub fn shade(&self, x: usize, y: usize, bg: (u8, u8, u8)) -> (u8, u8, u8) {
        let [r, g, b, a] = self.pixel(x, y);
        let over = |c: f32, bg: u8| {
            let v = c + bg as f32 / 255.0 * (1.0 - a);
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        (over(r, bg.0), over(g, bg.1), over(b, bg.2))
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let dst = &mut self.pixels[y as usize * self.width + x as usize];
        let a = color.a;
        let src = [color.r * a, color.g * a, color.b * a, a];

        match self.composite {
            Composite::SourceOver => {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = s + *d * (1.0 - a);
                }
            }
            Composite::DestinationOut => {
                for d in dst.iter_mut() {
                    *d *= 1.0 - a;
                }
            }
            Composite::Lighter => {
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = (*d + s).min(1.0);
                }
            }
        }
    }

    fn plot_segment(&mut self, (x0, y0): (f32, f32), (x1, y1): (f32, f32), color: Rgba, width: f32) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let radius = ((width - 1.0) / 2.0).max(0.0).round() as i64;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let px = (x0 + dx * t).floor() as i64;
            let py = (y0 + dy * t).floor() as i64;
            for oy in -radius..=radius {
                for ox in -radius..=radius {
                    self.blend(px + ox, py + oy, color);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn set_composite(&mut self, composite: Composite) {
        self.composite = composite;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.path.push(vec![(x, y)]);
        }
    }

    fn line_to(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        match self.path.last_mut() {
            Some(sub) => sub.push((x, y)),
            // A lone line_to starts a subpath, like a canvas does
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn stroke(&mut self, color: Rgba, line_width: f32) {
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            for pair in sub.windows(2) {
                self.plot_segment(pair[0], pair[1], color, line_width);
            }
        }
        self.path = path;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let x0 = x.max(0.0).floor() as i64;
        let y0 = y.max(0.0).floor() as i64;
        let x1 = (x + w).min(self.width as f32).ceil() as i64;
        let y1 = (y + h).min(self.height as f32).ceil() as i64;

        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }
}
