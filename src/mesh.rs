use glam::{UVec2, Vec2};
use std::fmt;

/// Two triangles per quad: (i, i+1, i+2) and (i+1, i+2, i+3).
const QUAD_CORNER_ORDER: [usize; 6] = [0, 1, 2, 1, 2, 3];

/// Mesh construction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// The mesh would need more vertices than the widest supported
    /// index type (u32) can address. No partial mesh is produced.
    CapacityOverflow,
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::CapacityOverflow => {
                write!(f, "slice mesh needs more vertices than a 32-bit index can address")
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Index buffer at the narrowest width that fits the vertex count
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    pub fn len(&self) -> usize {
        match self {
            IndexData::U8(v) => v.len(),
            IndexData::U16(v) => v.len(),
            IndexData::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact element-wise reversal, same width
    pub fn reversed(&self) -> IndexData {
        match self {
            IndexData::U8(v) => IndexData::U8(v.iter().rev().copied().collect()),
            IndexData::U16(v) => IndexData::U16(v.iter().rev().copied().collect()),
            IndexData::U32(v) => IndexData::U32(v.iter().rev().copied().collect()),
        }
    }

    /// All index values widened to u32, in order
    pub fn widened(&self) -> Vec<u32> {
        match self {
            IndexData::U8(v) => v.iter().map(|&i| u32::from(i)).collect(),
            IndexData::U16(v) => v.iter().map(|&i| u32::from(i)).collect(),
            IndexData::U32(v) => v.clone(),
        }
    }

    pub fn width_label(&self) -> &'static str {
        match self {
            IndexData::U8(_) => "u8",
            IndexData::U16(_) => "u16",
            IndexData::U32(_) => "u32",
        }
    }

    fn build(slice_count: usize) -> Result<IndexData, MeshError> {
        let vert_count = slice_count
            .checked_mul(4)
            .ok_or(MeshError::CapacityOverflow)?;

        // Narrowest width whose max value represents vert_count - 1
        if vert_count <= u8::MAX as usize + 1 {
            Ok(IndexData::U8(quad_indices(slice_count, |i| i as u8)))
        } else if vert_count <= u16::MAX as usize + 1 {
            Ok(IndexData::U16(quad_indices(slice_count, |i| i as u16)))
        } else if vert_count as u128 <= u32::MAX as u128 + 1 {
            Ok(IndexData::U32(quad_indices(slice_count, |i| i as u32)))
        } else {
            Err(MeshError::CapacityOverflow)
        }
    }
}

fn quad_indices<T: Copy>(slice_count: usize, cast: impl Fn(usize) -> T) -> Vec<T> {
    let mut indices = Vec::with_capacity(slice_count * 6);
    for quad in 0..slice_count {
        let base = quad * 4;
        for corner in QUAD_CORNER_ORDER {
            indices.push(cast(base + corner));
        }
    }
    indices
}

/// Geometry for one image sliced into a stack of equally sized quads.
///
/// `verts` is allocated here (zeroed, 4 per slice) and rewritten in
/// place every frame by the projection; everything else is immutable
/// after construction.
#[derive(Debug, Clone)]
pub struct SliceMesh {
    pub verts: Vec<Vec2>,
    pub uvs: Vec<Vec2>,
    pub indices: IndexData,
    pub reverse_indices: IndexData,
    /// Emitted quads: grid cells times copies
    pub slice_count: usize,
    /// Distinct grid cells visited in scan order, independent of
    /// copies; sets the vertical layer spacing
    pub cell_count: usize,
    pub slice_size: UVec2,
    pub copies: usize,
}

impl SliceMesh {
    /// Slice `image_size` into a row-major grid of `slice_size` cells,
    /// emitting `copies` identical quads per cell. Cells that do not
    /// fit entirely inside the image are dropped, never padded or
    /// clipped. A zero dimension anywhere yields an empty mesh.
    pub fn build(copies: usize, slice_size: UVec2, image_size: UVec2) -> Result<Self, MeshError> {
        if slice_size.x == 0 || slice_size.y == 0 || image_size.x == 0 || image_size.y == 0 {
            return Ok(Self::empty(slice_size, copies));
        }

        let cols = (image_size.x / slice_size.x) as usize;
        let rows = (image_size.y / slice_size.y) as usize;
        let cell_count = cols
            .checked_mul(rows)
            .ok_or(MeshError::CapacityOverflow)?;
        let slice_count = cell_count
            .checked_mul(copies)
            .ok_or(MeshError::CapacityOverflow)?;

        // Fail before any buffer is written
        let indices = IndexData::build(slice_count)?;
        let reverse_indices = indices.reversed();

        let image_scale = image_size.as_vec2();
        let mut uvs = Vec::with_capacity(slice_count * 4);

        // Cell origins come from multiplication, not a running sum: an
        // additive cursor can overflow u32 for near-full-range images
        for row in 0..rows as u32 {
            for col in 0..cols as u32 {
                let corner = UVec2::new(col * slice_size.x, row * slice_size.y).as_vec2();
                for _ in 0..copies {
                    uvs.push(corner / image_scale);
                    uvs.push((corner + Vec2::new(slice_size.x as f32, 0.0)) / image_scale);
                    uvs.push((corner + Vec2::new(0.0, slice_size.y as f32)) / image_scale);
                    uvs.push((corner + slice_size.as_vec2()) / image_scale);
                }
            }
        }

        log::info!(
            "sliced {}x{} into {} cells ({} quads, {} indices)",
            image_size.x,
            image_size.y,
            cell_count,
            slice_count,
            indices.width_label(),
        );

        Ok(Self {
            verts: vec![Vec2::ZERO; uvs.len()],
            uvs,
            indices,
            reverse_indices,
            slice_count,
            cell_count,
            slice_size,
            copies,
        })
    }

    fn empty(slice_size: UVec2, copies: usize) -> Self {
        Self {
            verts: Vec::new(),
            uvs: Vec::new(),
            indices: IndexData::U8(Vec::new()),
            reverse_indices: IndexData::U8(Vec::new()),
            slice_count: 0,
            cell_count: 0,
            slice_size,
            copies,
        }
    }

}
