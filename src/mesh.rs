//! Cloth mesh generation: a pinned, cross-braced grid of Verlet particles.

use crate::config::ClothConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::link::{Link, LinkKind};
use crate::particle::Particle;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Largest row or column count a mesh may have.
pub const MAX_GRID_SIDE: usize = 1000;

/// A user-drawn segment that sets the placement, size and angle of a mesh.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<F: Float> {
    pub start: Vec2<F>,
    pub end: Vec2<F>,
}

impl<F: Float> Segment<F> {
    pub fn new(start: Vec2<F>, end: Vec2<F>) -> Self {
        Segment { start, end }
    }

    pub fn length(&self) -> F {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Vec2<F> {
        self.start.midpoint(self.end)
    }

    pub fn angle(&self) -> F {
        (self.end - self.start).angle()
    }
}

/// Grid dimensions and placement of a mesh.
///
/// `anchor` is where the center of the top row ends up; the grid hangs
/// from it along +y before `angle` rotates it about the anchor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout<F: Float> {
    pub cols: usize,
    pub rows: usize,
    pub spacing: F,
    pub anchor: Vec2<F>,
    pub angle: F,
}

impl<F: Float> Layout<F> {
    /// Square grid spanning `segment`, centered on its midpoint and aligned with it.
    pub fn directed(spacing: F, segment: &Segment<F>) -> Self {
        let side = (segment.length() / spacing).floor().to_count().max(2);
        Layout {
            cols: side,
            rows: side,
            spacing,
            anchor: segment.midpoint(),
            angle: segment.angle(),
        }
    }

    /// Fixed footprint centered in the viewport, no rotation.
    pub fn centered(spacing: F, viewport: Vec2<F>, config: &ClothConfig<F>) -> Self {
        let cols = (config.footprint.x / spacing).floor().to_count().max(2);
        let rows = (config.footprint.y / spacing).floor().to_count().max(2);
        let total_height = F::from_f32((rows - 1) as f32) * spacing;
        let top = (viewport.y * F::half() - total_height * F::half()).max(config.top_margin);
        Layout {
            cols,
            rows,
            spacing,
            anchor: Vec2::new(viewport.x * F::half(), top),
            angle: F::zero(),
        }
    }
}

/// One cloth instance: particles, links and the layout that produced them.
///
/// Particle at (col, row) has index `row * cols + col`. Row 0 is pinned for
/// the lifetime of the mesh.
#[derive(Clone, Debug)]
pub struct Mesh<F: Float> {
    particles: AllocVec<Particle<F>>,
    links: AllocVec<Link<F>>,
    layout: Layout<F>,
    segment: Option<Segment<F>>,
}

impl<F: Float> Mesh<F> {
    /// Build a mesh for `density`, spanning `segment` when one is drawn and
    /// falling back to the default footprint centered in `viewport` otherwise.
    pub fn generate(
        density: F,
        segment: Option<Segment<F>>,
        viewport: Vec2<F>,
        config: &ClothConfig<F>,
    ) -> Result<Self, ClothError> {
        let spacing = config.spacing_for(density);
        if !density.is_finite() || !(spacing > F::zero()) {
            return Err(ClothError::InvalidDensity { density: density.to_f32() });
        }

        let layout = match &segment {
            Some(seg) => {
                if !seg.start.is_finite() || !seg.end.is_finite() {
                    return Err(ClothError::InvalidSegment);
                }
                Layout::directed(spacing, seg)
            }
            None => Layout::centered(spacing, viewport, config),
        };

        let mut mesh = Self::from_layout(layout, config)?;
        mesh.segment = segment;
        log::debug!(
            "generated {}x{} mesh (spacing {:?}, {} links) at {:?}",
            layout.cols,
            layout.rows,
            spacing,
            mesh.links.len(),
            layout.anchor,
        );
        Ok(mesh)
    }

    /// Build the particle grid and links for an explicit layout.
    ///
    /// Creates horizontal and vertical links at `spacing`, plus both diagonals
    /// of every cell at `spacing * sqrt(2)` so shear is resisted.
    pub fn from_layout(layout: Layout<F>, config: &ClothConfig<F>) -> Result<Self, ClothError> {
        let Layout { cols, rows, spacing, anchor, angle } = layout;
        if cols < 2 || rows < 2 || cols > MAX_GRID_SIDE || rows > MAX_GRID_SIDE {
            return Err(ClothError::InvalidGridDimensions { cols, rows });
        }

        let mut particles = AllocVec::with_capacity(cols * rows);
        let left = -(F::from_f32((cols - 1) as f32) * spacing) * F::half();
        for row in 0..rows {
            for col in 0..cols {
                let x = left + F::from_f32(col as f32) * spacing;
                let y = F::from_f32(row as f32) * spacing;
                particles.push(Particle::new(Vec2::new(x, y), config.particle_mass));
            }
        }

        let stiffness = config.link_stiffness;
        let diag_length = (spacing * spacing + spacing * spacing).sqrt();
        let mut links = AllocVec::with_capacity(Self::expected_link_count(cols, rows));

        // Structural: horizontal
        for row in 0..rows {
            for col in 0..(cols - 1) {
                let a = row * cols + col;
                links.push(Link::new(a, a + 1, spacing, stiffness, LinkKind::Horizontal));
            }
        }

        // Structural: vertical
        for row in 0..(rows - 1) {
            for col in 0..cols {
                let a = row * cols + col;
                links.push(Link::new(a, a + cols, spacing, stiffness, LinkKind::Vertical));
            }
        }

        // Cross braces
        for row in 0..(rows - 1) {
            for col in 0..(cols - 1) {
                let tl = row * cols + col;
                let tr = tl + 1;
                let bl = tl + cols;
                let br = bl + 1;
                links.push(Link::new(tl, br, diag_length, stiffness, LinkKind::Brace));
                links.push(Link::new(tr, bl, diag_length, stiffness, LinkKind::Brace));
            }
        }

        let mut mesh = Mesh { particles, links, layout, segment: None };
        mesh.translate(anchor);
        if angle != F::zero() {
            mesh.rotate(anchor, angle);
        }
        mesh.pin_top_row();
        Ok(mesh)
    }

    /// Number of links a freshly generated `cols` x `rows` mesh has.
    pub fn expected_link_count(cols: usize, rows: usize) -> usize {
        if cols == 0 || rows == 0 {
            return 0;
        }
        rows * (cols - 1) + cols * (rows - 1) + 2 * (rows - 1) * (cols - 1)
    }

    fn pin_top_row(&mut self) {
        for p in self.particles.iter_mut().take(self.layout.cols) {
            p.pin();
        }
    }

    fn translate(&mut self, delta: Vec2<F>) {
        for p in self.particles.iter_mut() {
            p.place(p.pos + delta);
        }
    }

    fn rotate(&mut self, center: Vec2<F>, angle: F) {
        for p in self.particles.iter_mut() {
            p.place(p.pos.rotate_about(center, angle));
        }
    }

    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.layout.cols + col
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle<F>] {
        &mut self.particles
    }

    pub fn links(&self) -> &[Link<F>] {
        &self.links
    }

    /// Particles for mutation alongside the links that relax them.
    pub fn split_mut(&mut self) -> (&mut [Particle<F>], &[Link<F>]) {
        (&mut self.particles, &self.links)
    }

    /// Remove the link at `index`, moving the last link into its slot.
    pub fn remove_link(&mut self, index: usize) -> Link<F> {
        self.links.swap_remove(index)
    }

    pub fn position_at(&self, col: usize, row: usize) -> Vec2<F> {
        self.particles[self.index(col, row)].pos
    }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    pub fn pinned_count(&self) -> usize {
        self.particles.iter().filter(|p| p.pinned).count()
    }

    pub fn layout(&self) -> &Layout<F> {
        &self.layout
    }

    pub fn segment(&self) -> Option<Segment<F>> {
        self.segment
    }

    pub fn cols(&self) -> usize {
        self.layout.cols
    }

    pub fn rows(&self) -> usize {
        self.layout.rows
    }

    pub fn spacing(&self) -> F {
        self.layout.spacing
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn viewport() -> Vec2<f32> {
        Vec2::new(1000.0, 800.0)
    }

    #[test]
    fn correct_particle_count() {
        let mesh = Mesh::generate(35.0f32, None, viewport(), &ClothConfig::new()).unwrap();
        assert_eq!(mesh.particle_count(), mesh.cols() * mesh.rows());
    }

    #[test]
    fn cross_braced_link_count() {
        // Horizontal: (4-1)*3 = 9
        // Vertical: 4*(3-1) = 8
        // Braces: (4-1)*(3-1)*2 = 12
        assert_eq!(Mesh::<f32>::expected_link_count(4, 3), 29);
    }

    #[test]
    fn density_at_spacing_base_is_rejected() {
        let err = Mesh::generate(60.0f32, None, viewport(), &ClothConfig::new()).unwrap_err();
        assert_eq!(err, ClothError::InvalidDensity { density: 60.0 });
    }

    #[test]
    fn non_finite_segment_is_rejected() {
        let seg = Segment::new(Vec2::new(0.0f32, 0.0), Vec2::new(f32::NAN, 0.0));
        let err = Mesh::generate(35.0, Some(seg), viewport(), &ClothConfig::new()).unwrap_err();
        assert_eq!(err, ClothError::InvalidSegment);
    }

    #[test]
    fn oversized_segment_is_rejected() {
        let seg = Segment::new(Vec2::new(0.0f32, 0.0), Vec2::new(1.0e7, 0.0));
        let err = Mesh::generate(35.0, Some(seg), viewport(), &ClothConfig::new()).unwrap_err();
        assert!(matches!(err, ClothError::InvalidGridDimensions { .. }));
    }

    #[test]
    fn rotated_mesh_keeps_spacing() {
        let seg = Segment::new(Vec2::new(0.0f64, 0.0), Vec2::new(0.0, 250.0));
        let mesh = Mesh::generate(35.0, Some(seg), Vec2::new(1000.0, 800.0), &ClothConfig::new())
            .unwrap();
        for link in mesh.links() {
            assert_relative_eq!(link.length(mesh.particles()), link.rest_length, epsilon = 1e-9);
        }
        // Top row runs along the drawn segment.
        let first = mesh.position_at(0, 0);
        let last = mesh.position_at(mesh.cols() - 1, 0);
        assert_relative_eq!(first.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(last.x, 0.0, epsilon = 1e-9);
    }
}
