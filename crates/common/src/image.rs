use aphrodite_math::Vector4;

/// Number of mip levels below the base level for a `width x height` texture,
/// `ceil(log2(max(width, height)))`. A 1x1 (or empty) image has none.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let size = width.max(height);
    if size <= 1 {
        0
    } else {
        u32::BITS - (size - 1).leading_zeros()
    }
}

/// Tightly packed RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgba8Image {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Converts a normalized color to RGBA8, clamping each channel to `[0, 1]`.
pub fn to_rgba8(color: Vector4) -> [u8; 4] {
    color
        .to_f32_array()
        .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

impl Rgba8Image {
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// 2x2 checkerboard with `light` on the diagonal.
    pub fn checkerboard(light: Vector4, dark: Vector4) -> Self {
        let (light, dark) = (to_rgba8(light), to_rgba8(dark));
        Self::from_fn(2, 2, |x, y| if (x + y) % 2 == 0 { light } else { dark })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Bytes per row as uploaded to the GPU.
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// Half-size copy using a 2x2 box filter. Each dimension halves and
    /// bottoms out at 1; odd edges reuse the last row or column.
    pub fn downsample(&self) -> Self {
        let width = (self.width >> 1).max(1);
        let height = (self.height >> 1).max(1);
        let max_x = self.width.saturating_sub(1);
        let max_y = self.height.saturating_sub(1);
        Self::from_fn(width, height, |x, y| {
            let (x0, y0) = ((x * 2).min(max_x), (y * 2).min(max_y));
            let (x1, y1) = ((x * 2 + 1).min(max_x), (y * 2 + 1).min(max_y));
            let taps = [
                self.pixel(x0, y0),
                self.pixel(x1, y0),
                self.pixel(x0, y1),
                self.pixel(x1, y1),
            ];
            std::array::from_fn(|c| {
                let sum: u32 = taps.iter().map(|t| u32::from(t[c])).sum();
                ((sum + 2) / 4) as u8
            })
        })
    }

    /// The base image followed by every mip level down to 1x1.
    pub fn mip_chain(self) -> Vec<Self> {
        let levels = mip_level_count(self.width, self.height) as usize;
        let mut chain = Vec::with_capacity(levels + 1);
        chain.push(self);
        for _ in 0..levels {
            if let Some(next) = chain.last().map(Self::downsample) {
                chain.push(next);
            }
        }
        chain
    }
}
