//! Renderer-agnostic description of one frame.
//!
//! The host paints this however it likes (canvas, wgpu, terminal). Colors
//! default to the classic palette: green links turning orange, then red,
//! as they approach their breaking distance.

use crate::float::Float;
use crate::mesh::Segment;
use crate::strain::StrainLevel;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Pack as `0xRRGGBBAA`.
    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    pub safe: Color,
    pub warning: Color,
    pub critical: Color,
    pub guide_line: Color,
    pub guide_points: Color,
    pub probe: Color,
    pub probe_ghost_fill: Color,
    pub probe_solid_stroke: Color,
}

impl Palette {
    pub fn link(&self, level: StrainLevel) -> Color {
        match level {
            StrainLevel::Safe => self.safe,
            StrainLevel::Warning => self.warning,
            StrainLevel::Critical => self.critical,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            safe: Color::rgb(0x2e, 0xcc, 0x71),
            warning: Color::rgb(0xff, 0xaa, 0x33),
            critical: Color::rgb(0xff, 0x33, 0x33),
            guide_line: Color::rgb(0xff, 0xff, 0xff),
            guide_points: Color::rgb(0xff, 0xc1, 0x07),
            probe: Color::rgb(0x21, 0x96, 0xf3),
            probe_ghost_fill: Color::rgba(0x21, 0x96, 0xf3, 77),
            probe_solid_stroke: Color::rgb(0xff, 0xff, 0xff),
        }
    }
}

/// One link, ready to stroke.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinkSegment<F: Float> {
    pub a: Vec2<F>,
    pub b: Vec2<F>,
    pub level: StrainLevel,
    pub color: Color,
}

/// The probe circle. A ghost probe is translucent with a glow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeShape<F: Float> {
    pub center: Vec2<F>,
    pub radius: F,
    pub solid: bool,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: F,
    /// Blur radius of the glow; zero for solid probes.
    pub glow: F,
}

/// Dashed guide from the drag start to the pointer, with dots at both ends.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawGuide<F: Float> {
    pub segment: Segment<F>,
    pub line: Color,
    pub line_width: F,
    /// Dash and gap length.
    pub dash: (F, F),
    pub points: Color,
    pub point_radius: F,
}

/// Everything drawn on top of the background for one frame, back to front:
/// guide, probe, then links.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame<F: Float> {
    pub guide: Option<DrawGuide<F>>,
    pub probe: Option<ProbeShape<F>>,
    pub links: AllocVec<LinkSegment<F>>,
}

impl<F: Float> RenderFrame<F> {
    /// Number of links at each strain level: (safe, warning, critical).
    pub fn level_counts(&self) -> (usize, usize, usize) {
        self.links.iter().fold((0, 0, 0), |(s, w, c), l| match l.level {
            StrainLevel::Safe => (s + 1, w, c),
            StrainLevel::Warning => (s, w + 1, c),
            StrainLevel::Critical => (s, w, c + 1),
        })
    }
}

impl<F: Float> ProbeShape<F> {
    pub fn new(center: Vec2<F>, radius: F, solid: bool, palette: &Palette) -> Self {
        if solid {
            ProbeShape {
                center,
                radius,
                solid,
                fill: palette.probe,
                stroke: palette.probe_solid_stroke,
                stroke_width: F::two(),
                glow: F::zero(),
            }
        } else {
            ProbeShape {
                center,
                radius,
                solid,
                fill: palette.probe_ghost_fill,
                stroke: palette.probe,
                stroke_width: F::two(),
                glow: F::from_f32(20.0),
            }
        }
    }
}

impl<F: Float> DrawGuide<F> {
    pub fn new(segment: Segment<F>, palette: &Palette) -> Self {
        DrawGuide {
            segment,
            line: palette.guide_line,
            line_width: F::two(),
            dash: (F::from_f32(5.0), F::from_f32(5.0)),
            points: palette.guide_points,
            point_radius: F::from_f32(4.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_levels() {
        let palette = Palette::default();
        assert_eq!(palette.link(StrainLevel::Critical).to_u32(), 0xff3333ff);
        assert_eq!(palette.link(StrainLevel::Warning).to_u32(), 0xffaa33ff);
        assert_eq!(palette.link(StrainLevel::Safe).to_u32(), 0x2ecc71ff);
    }

    #[test]
    fn ghost_probe_glows() {
        let palette = Palette::default();
        let ghost = ProbeShape::new(Vec2::new(0.0f32, 0.0), 30.0, false, &palette);
        let solid = ProbeShape::new(Vec2::new(0.0f32, 0.0), 30.0, true, &palette);
        assert!(ghost.glow > 0.0);
        assert_eq!(solid.glow, 0.0);
        assert_eq!(solid.fill, palette.probe);
    }
}
