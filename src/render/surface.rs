use crate::effects::blend::{BlendMode, blend_pixel};
use crate::foundation::core::{Color, PixelRect};
use crate::foundation::error::{FiguraError, FiguraResult};

/// Storage layout of a [`Surface`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Straight-alpha RGBA8, 4 bytes per pixel.
    #[default]
    Rgba8,
    /// 8-bit luma without alpha. Writes store the luma of the color.
    Gray8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::Gray8 => 1,
        }
    }
}

/// Surface declaration: dimensions + pixel format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceDesc {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: PixelFormat,
}

impl SurfaceDesc {
    /// RGBA8 surface of the given size.
    pub const fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Rgba8,
        }
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(self.format.bytes_per_pixel())
    }
}

/// Owned pixel buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surface {
    desc: SurfaceDesc,
    data: Vec<u8>,
}

impl Surface {
    /// Transparent RGBA8 surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_desc(SurfaceDesc::rgba8(width, height))
    }

    /// Zeroed surface for `desc`.
    pub fn with_desc(desc: SurfaceDesc) -> Self {
        Self {
            desc,
            data: vec![0; desc.byte_len()],
        }
    }

    /// Wrap an RGBA8 buffer. The length must be `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> FiguraResult<Self> {
        let desc = SurfaceDesc::rgba8(width, height);
        if data.len() != desc.byte_len() {
            return Err(FiguraError::validation(format!(
                "rgba8 buffer of {} bytes does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self { desc, data })
    }

    /// Copy an `image` buffer.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        Self {
            desc: SurfaceDesc::rgba8(img.width(), img.height()),
            data: img.as_raw().clone(),
        }
    }

    /// Convert to an `image` buffer (gray surfaces expand to opaque RGBA).
    pub fn to_rgba_image(&self) -> FiguraResult<image::RgbaImage> {
        let data = match self.desc.format {
            PixelFormat::Rgba8 => self.data.clone(),
            PixelFormat::Gray8 => self.data.iter().flat_map(|&l| [l, l, l, 255]).collect(),
        };
        image::RgbaImage::from_raw(self.desc.width, self.desc.height, data)
            .ok_or_else(|| FiguraError::render("surface buffer does not match its size"))
    }

    /// Declaration of this surface.
    pub fn desc(&self) -> SurfaceDesc {
        self.desc
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.desc.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.desc.height
    }

    /// Pixel format.
    pub fn format(&self) -> PixelFormat {
        self.desc.format
    }

    /// Whole surface as a rectangle at the origin.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.desc.width as i32, self.desc.height as i32)
    }

    /// Raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reset every byte to zero (transparent for RGBA8).
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.desc.width || y as u32 >= self.desc.height {
            return None;
        }
        let i = y as usize * self.desc.width as usize + x as usize;
        Some(i * self.desc.format.bytes_per_pixel())
    }

    /// Pixel at `(x, y)`; transparent outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        let Some(i) = self.index(x, y) else {
            return Color::TRANSPARENT;
        };
        match self.desc.format {
            PixelFormat::Rgba8 => Color::rgba(
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ),
            PixelFormat::Gray8 => {
                let l = self.data[i];
                Color::rgb(l, l, l)
            }
        }
    }

    /// Write `(x, y)`; ignored outside the surface.
    pub fn set_pixel(&mut self, x: i32, y: i32, c: Color) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        match self.desc.format {
            PixelFormat::Rgba8 => self.data[i..i + 4].copy_from_slice(&c.to_array()),
            PixelFormat::Gray8 => self.data[i] = c.luma(),
        }
    }

    /// Composite `c` onto `(x, y)` with `mode`.
    pub fn blend(&mut self, x: i32, y: i32, c: Color, mode: BlendMode) {
        if self.index(x, y).is_none() {
            return;
        }
        let out = blend_pixel(self.pixel(x, y), c, mode);
        self.set_pixel(x, y, out);
    }

    /// Fill the whole surface with `c`.
    pub fn fill(&mut self, c: Color) {
        self.fill_rect(self.bounds(), c);
    }

    /// Overwrite the pixels of `rect` (clipped) with `c`.
    pub fn fill_rect(&mut self, rect: PixelRect, c: Color) {
        let r = rect.intersect(self.bounds());
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                self.set_pixel(x, y, c);
            }
        }
    }

    /// Copy `rect` (clipped) into a new surface of the same format.
    pub fn copy_region(&self, rect: PixelRect) -> Surface {
        let r = rect.intersect(self.bounds());
        let mut out = Surface::with_desc(SurfaceDesc {
            width: r.w.max(0) as u32,
            height: r.h.max(0) as u32,
            format: self.desc.format,
        });
        for y in 0..r.h {
            for x in 0..r.w {
                out.set_pixel(x, y, self.pixel(r.x + x, r.y + y));
            }
        }
        out
    }

    /// Composite `src` with its origin at `(dx, dy)` using `mode`.
    pub fn draw(&mut self, src: &Surface, dx: i32, dy: i32, mode: BlendMode) {
        let dst = PixelRect::new(dx, dy, src.width() as i32, src.height() as i32)
            .intersect(self.bounds());
        for y in dst.y..dst.bottom() {
            for x in dst.x..dst.right() {
                let s = src.pixel(x - dx, y - dy);
                if mode == BlendMode::Replace {
                    self.set_pixel(x, y, s);
                } else {
                    self.blend(x, y, s, mode);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
