use std::ops::{Index, IndexMut, Range};

/// A row-major 2D buffer of `T`, used both as color buffer and as depth buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedTexture<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> OwnedTexture<T> {
    pub fn new(width: usize, height: usize, value: T) -> Self {
        OwnedTexture {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> OwnedTexture<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The whole texture as a single band.
    pub fn as_band_mut(&mut self) -> BandMut<'_, T> {
        BandMut {
            y_offset: 0,
            width: self.width,
            data: &mut self.data,
        }
    }

    /// Splits the texture into disjoint horizontal bands of `rows_per_band` rows each (the last one may be shorter),
    /// top to bottom.
    pub fn bands_mut(&mut self, rows_per_band: usize) -> Vec<BandMut<'_, T>> {
        let width = self.width;
        let rows_per_band = rows_per_band.max(1);
        self.data
            .chunks_mut((width * rows_per_band).max(1))
            .enumerate()
            .map(|(i, data)| BandMut {
                y_offset: i * rows_per_band,
                width,
                data,
            })
            .collect()
    }
}

impl OwnedTexture<[u8; 4]> {
    /// The raw RGBA bytes, in the layout `image::RgbaImage` expects.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.data.concat()
    }
}

impl<T> Index<(usize, usize)> for OwnedTexture<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.width && y < self.height, "out of bounds");
        &self.data[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for OwnedTexture<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(x < self.width && y < self.height, "out of bounds");
        &mut self.data[y * self.width + x]
    }
}

/// A mutable view over some consecutive rows of a texture. Rows are addressed with the coordinates of the whole
/// texture, so drawing code doesn't need to know which band it's drawing into.
#[derive(Debug)]
pub struct BandMut<'a, T> {
    y_offset: usize,
    width: usize,
    data: &'a mut [T],
}

impl<'a, T> BandMut<'a, T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    /// The rows of the texture covered by this band.
    pub fn rows(&self) -> Range<i32> {
        let start = self.y_offset as i32;
        start..start + self.height() as i32
    }

    /// Row `y` of the texture, if it belongs to this band.
    #[inline(always)]
    pub fn row_mut(&mut self, y: i32) -> Option<&mut [T]> {
        if !self.rows().contains(&y) {
            return None;
        }
        let start = (y as usize - self.y_offset) * self.width;
        Some(&mut self.data[start..start + self.width])
    }
}
