use glam::{UVec2, Vec2};
use slicer::mesh::{IndexData, MeshError, SliceMesh};

/// slice_count = floor(W/w) * floor(H/h) * copies, cell_count ignores copies
#[test]
fn test_counts_follow_grid_formula() {
    for (image, slice, copies) in [
        ((100u32, 100u32), (30u32, 30u32), 1usize),
        ((100, 100), (10, 10), 1),
        ((640, 480), (64, 48), 2),
        ((33, 17), (8, 8), 3),
        ((7, 7), (8, 8), 1),
    ] {
        let mesh = SliceMesh::build(
            copies,
            UVec2::new(slice.0, slice.1),
            UVec2::new(image.0, image.1),
        )
        .unwrap();

        let cells = (image.0 / slice.0) as usize * (image.1 / slice.1) as usize;
        assert_eq!(
            mesh.cell_count, cells,
            "cell count for {:?} sliced by {:?}",
            image, slice
        );
        assert_eq!(
            mesh.slice_count,
            cells * copies,
            "slice count for {:?} sliced by {:?} x{}",
            image,
            slice,
            copies
        );
    }
}

/// |verts| = |uvs| = 4n and |indices| = |reverse| = 6n, always
#[test]
fn test_buffer_length_invariants() {
    let mesh = SliceMesh::build(2, UVec2::new(16, 16), UVec2::new(100, 70)).unwrap();
    assert_eq!(mesh.verts.len(), 4 * mesh.slice_count);
    assert_eq!(mesh.uvs.len(), 4 * mesh.slice_count);
    assert_eq!(mesh.indices.len(), 6 * mesh.slice_count);
    assert_eq!(mesh.reverse_indices.len(), 6 * mesh.slice_count);
}

/// The worked example from the grid policy: a 100x100 image with 30x30
/// slices drops the trailing 10 pixel margin on each axis
#[test]
fn test_trailing_margin_dropped() {
    let mesh = SliceMesh::build(1, UVec2::new(30, 30), UVec2::new(100, 100)).unwrap();
    assert_eq!(mesh.cell_count, 9);
    assert_eq!(mesh.slice_count, 9);

    // No UV may reach past the last full cell (90 / 100)
    for uv in &mesh.uvs {
        assert!(uv.x <= 0.9 + f32::EPSILON && uv.y <= 0.9 + f32::EPSILON, "uv {uv} out of range");
    }
}

/// For the cell at grid origin (x, y) the four corners are
/// (x, y)/image, (x+w, y)/image, (x, y+h)/image, (x+w, y+h)/image
#[test]
fn test_uv_corner_formula() {
    let image = UVec2::new(120, 90);
    let slice = UVec2::new(40, 30);
    let mesh = SliceMesh::build(1, slice, image).unwrap();

    let cols = (image.x / slice.x) as usize;
    for cell in 0..mesh.cell_count {
        let x = (cell % cols) as f32 * slice.x as f32;
        let y = (cell / cols) as f32 * slice.y as f32;
        let scale = Vec2::new(image.x as f32, image.y as f32);
        let base = cell * 4;

        assert_eq!(mesh.uvs[base], Vec2::new(x, y) / scale);
        assert_eq!(mesh.uvs[base + 1], Vec2::new(x + slice.x as f32, y) / scale);
        assert_eq!(mesh.uvs[base + 2], Vec2::new(x, y + slice.y as f32) / scale);
        assert_eq!(
            mesh.uvs[base + 3],
            Vec2::new(x + slice.x as f32, y + slice.y as f32) / scale
        );
    }
}

/// Triangles are (i, i+1, i+2) and (i+1, i+2, i+3) per quad
#[test]
fn test_triangle_index_pattern() {
    let mesh = SliceMesh::build(1, UVec2::new(10, 10), UVec2::new(20, 10)).unwrap();
    assert_eq!(
        mesh.indices.widened(),
        vec![0, 1, 2, 1, 2, 3, 4, 5, 6, 5, 6, 7]
    );
}

#[test]
fn test_every_index_addresses_the_vertex_buffer() {
    let mesh = SliceMesh::build(3, UVec2::new(9, 9), UVec2::new(100, 100)).unwrap();
    for index in mesh.indices.widened() {
        assert!(
            (index as usize) < mesh.verts.len(),
            "index {} out of bounds for {} vertices",
            index,
            mesh.verts.len()
        );
    }
}

#[test]
fn test_reverse_buffer_is_elementwise_reversal() {
    let mesh = SliceMesh::build(2, UVec2::new(13, 7), UVec2::new(100, 60)).unwrap();
    let mut expected = mesh.indices.widened();
    expected.reverse();
    assert_eq!(mesh.reverse_indices.widened(), expected);
}

/// A full-image slice yields one cell, so slice_count equals copies
#[test]
fn test_full_image_slice_is_one_cell_per_copy() {
    for copies in [1, 2, 5] {
        let mesh = SliceMesh::build(copies, UVec2::new(256, 256), UVec2::new(256, 256)).unwrap();
        assert_eq!(mesh.cell_count, 1);
        assert_eq!(mesh.slice_count, copies);
    }
}

/// Oversized slices and zero dimensions degenerate to an empty mesh,
/// never an error
#[test]
fn test_degenerate_configurations_yield_empty_mesh() {
    let oversize = SliceMesh::build(1, UVec2::new(200, 200), UVec2::new(100, 100)).unwrap();
    assert_eq!(oversize.slice_count, 0);
    assert!(oversize.verts.is_empty());
    assert!(oversize.indices.is_empty());
    assert!(oversize.reverse_indices.is_empty());

    let zero = SliceMesh::build(1, UVec2::new(0, 0), UVec2::new(100, 100)).unwrap();
    assert_eq!(zero.slice_count, 0);
}

/// Dimensions near the top of the u32 range must slice cleanly; a cell
/// scan that sums origins instead of multiplying them wraps here and
/// admits rows past the grid
#[test]
fn test_near_maximum_dimensions_slice_cleanly() {
    let mesh = SliceMesh::build(
        1,
        UVec2::new(1, 3_000_000_000),
        UVec2::new(1, 4_000_000_000),
    )
    .unwrap();

    // Only one 3e9-tall slice fits; the 1e9 remainder is dropped
    assert_eq!(mesh.cell_count, 1);
    assert_eq!(mesh.slice_count, 1);
    assert_eq!(mesh.uvs.len(), 4);
    assert_eq!(mesh.uvs[0], Vec2::new(0.0, 0.0));
    assert_eq!(mesh.uvs[3], Vec2::new(1.0, 0.75));

    let wide = SliceMesh::build(1, UVec2::new(3_000_000_000, 1), UVec2::new(4_000_000_000, 1))
        .unwrap();
    assert_eq!(wide.cell_count, 1);
    assert_eq!(wide.uvs.len(), 4);
}

/// More vertices than u32 can index must fail fast, with no partial mesh
#[test]
fn test_capacity_overflow_is_reported() {
    // (2^30 + 1) quads of a single pixel need 2^32 + 4 vertex indices
    let copies = (1usize << 30) + 1;
    let result = SliceMesh::build(copies, UVec2::new(1, 1), UVec2::new(1, 1));
    assert_eq!(result.unwrap_err(), MeshError::CapacityOverflow);
}

/// The index width is the narrowest that can hold 4 * slice_count - 1
#[test]
fn test_narrowest_index_width_is_chosen() {
    let small = SliceMesh::build(64, UVec2::new(1, 1), UVec2::new(1, 1)).unwrap();
    assert!(
        matches!(small.indices, IndexData::U8(_)),
        "256 vertices still fit u8, got {}",
        small.indices.width_label()
    );

    let medium = SliceMesh::build(65, UVec2::new(1, 1), UVec2::new(1, 1)).unwrap();
    assert!(matches!(medium.indices, IndexData::U16(_)));

    let wide = SliceMesh::build(16385, UVec2::new(1, 1), UVec2::new(1, 1)).unwrap();
    assert!(matches!(wide.indices, IndexData::U32(_)));

    // Reverse buffer keeps the same width
    assert!(matches!(wide.reverse_indices, IndexData::U32(_)));
}
