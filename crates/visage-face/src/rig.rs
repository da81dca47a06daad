//! Face rig - scene declaration and node mapping
//!
//! `FaceRig::build` declares the full face hierarchy once. `FaceNodes` is the
//! explicit mapping from stable roles (left pupil, pulse ring, accent dot 3,
//! ...) to scene node ids; animation goes through it exclusively.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use visage_core::{AvatarState, Color, Palette, VisageResult};
use visage_scene::{Geometry, Material, NodeId, SceneGraph, Transform};

use crate::motion::pulse_style;

/// Palette slot an ornament is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteRole {
    Primary,
    Secondary,
    Tertiary,
}

impl PaletteRole {
    pub fn pick(self, palette: &Palette) -> Color {
        match self {
            PaletteRole::Primary => palette.primary,
            PaletteRole::Secondary => palette.secondary,
            PaletteRole::Tertiary => palette.tertiary,
        }
    }
}

/// Accent dot positions (x, y)
pub const ACCENT_POSITIONS: [(f32, f32); 6] = [
    (-0.9, 0.7),
    (0.9, 0.7),
    (-1.0, -0.5),
    (1.0, -0.5),
    (-0.7, -0.9),
    (0.7, -0.9),
];

/// Accent dot colors cycle through the three theme slots
pub const ACCENT_ROLES: [PaletteRole; 6] = [
    PaletteRole::Primary,
    PaletteRole::Secondary,
    PaletteRole::Tertiary,
    PaletteRole::Primary,
    PaletteRole::Secondary,
    PaletteRole::Tertiary,
];

/// Opacity accent dots start with before the first frame
pub const ACCENT_INITIAL_OPACITY: f32 = 0.3;

fn socket_gray() -> Color {
    Color::from_rgb8(0xF0, 0xF0, 0xF0)
}

fn cavity_dark() -> Color {
    Color::from_rgb8(0x1A, 0x1A, 0x1A)
}

fn glow_red() -> Color {
    Color::from_rgb8(0x3D, 0x0A, 0x0A)
}

/// Nodes of one eye
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeNodes {
    pub group: NodeId,
    pub socket: NodeId,
    /// Vertical scale carries the blink
    pub pupil: NodeId,
    pub highlight: NodeId,
}

/// Nodes of the mouth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthNodes {
    pub group: NodeId,
    pub lips: NodeId,
    /// Vertical scale carries the speech animation
    pub cavity: NodeId,
    /// Shown only while speaking
    pub glow: NodeId,
}

/// Stable mapping from face roles to scene nodes
#[derive(Debug, Clone, PartialEq)]
pub struct FaceNodes {
    /// Whole-face group (head sway)
    pub head: NodeId,
    pub face_disc: NodeId,
    pub border_ring: NodeId,
    pub inner_ring: NodeId,
    pub outer_ring: NodeId,
    pub pulse_ring: NodeId,
    pub left_eye: EyeNodes,
    pub right_eye: EyeNodes,
    pub mouth: MouthNodes,
    pub circuit: Vec<(NodeId, PaletteRole)>,
    pub accents: [NodeId; 6],
}

impl FaceNodes {
    pub fn pupils(&self) -> [NodeId; 2] {
        [self.left_eye.pupil, self.right_eye.pupil]
    }
}

/// Scene graph plus its node mapping
#[derive(Debug, Clone)]
pub struct FaceRig {
    pub graph: SceneGraph,
    pub nodes: FaceNodes,
}

impl FaceRig {
    /// Declare the face for a palette and initial state
    pub fn build(palette: &Palette, state: AvatarState) -> VisageResult<Self> {
        let mut graph = SceneGraph::new();
        let head = graph.add_group(graph.root(), "head", Transform::IDENTITY)?;

        let face_disc = graph.add_mesh(
            head,
            "face_disc",
            Geometry::circle(1.5, 64),
            Material::standard(palette.off_white).metalness(0.1).roughness(0.3),
            Transform::IDENTITY,
        )?;
        let border_ring = graph.add_mesh(
            head,
            "border_ring",
            Geometry::ring(1.45, 1.55, 64),
            Material::standard(palette.primary).metalness(0.5).roughness(0.2),
            Transform::at(0.0, 0.0, 0.01),
        )?;
        let inner_ring = graph.add_mesh(
            head,
            "inner_ring",
            Geometry::ring(1.6, 1.65, 64),
            Material::standard(palette.ring_inner)
                .metalness(0.3)
                .roughness(0.4)
                .translucent(0.8),
            Transform::at(0.0, 0.0, 0.02),
        )?;
        let outer_ring = graph.add_mesh(
            head,
            "outer_ring",
            Geometry::ring(1.75, 1.78, 32),
            Material::standard(palette.ring_outer)
                .metalness(0.4)
                .roughness(0.3)
                .translucent(0.6),
            Transform::at(0.0, 0.0, 0.02),
        )?;
        let (pulse_color, pulse_opacity) = pulse_style(state, palette);
        let pulse_ring = graph.add_mesh(
            head,
            "pulse_ring",
            Geometry::ring(1.85, 1.95, 64),
            Material::basic(pulse_color).translucent(pulse_opacity),
            Transform::at(0.0, 0.0, -0.01),
        )?;

        let left_eye = build_eye(&mut graph, head, "left", -0.45, palette)?;
        let right_eye = build_eye(&mut graph, head, "right", 0.45, palette)?;
        let mouth = build_mouth(&mut graph, head, palette, state)?;
        let circuit = build_circuit(&mut graph, head, palette)?;

        let accent_group = graph.add_group(head, "accents", Transform::at(0.0, 0.0, 0.04))?;
        let mut accents = [NodeId::ROOT; 6];
        for (i, ((x, y), role)) in ACCENT_POSITIONS.iter().zip(ACCENT_ROLES).enumerate() {
            accents[i] = graph.add_mesh(
                accent_group,
                &format!("accent_{}", i),
                Geometry::circle(0.03, 16),
                Material::basic(role.pick(palette)).translucent(ACCENT_INITIAL_OPACITY),
                Transform::at(*x, *y, 0.0),
            )?;
        }

        Ok(FaceRig {
            graph,
            nodes: FaceNodes {
                head,
                face_disc,
                border_ring,
                inner_ring,
                outer_ring,
                pulse_ring,
                left_eye,
                right_eye,
                mouth,
                circuit,
                accents,
            },
        })
    }

    /// Repaint every palette-derived material in one pass
    pub fn apply_palette(&mut self, palette: &Palette, state: AvatarState) -> VisageResult<()> {
        let n = &self.nodes;
        let g = &mut self.graph;

        g.material_mut(n.face_disc)?.color = palette.off_white;
        g.material_mut(n.border_ring)?.color = palette.primary;
        g.material_mut(n.inner_ring)?.color = palette.ring_inner;
        g.material_mut(n.outer_ring)?.color = palette.ring_outer;

        for pupil in n.pupils() {
            let m = g.material_mut(pupil)?;
            m.color = palette.eye;
            m.emissive = Some(palette.eye);
        }
        g.material_mut(n.mouth.lips)?.color = palette.mouth;

        for (id, role) in &n.circuit {
            g.material_mut(*id)?.color = role.pick(palette);
        }
        for (id, role) in n.accents.iter().zip(ACCENT_ROLES) {
            g.material_mut(*id)?.color = role.pick(palette);
        }

        self.apply_state(palette, state)
    }

    /// Apply state-selected colors and visibility
    pub fn apply_state(&mut self, palette: &Palette, state: AvatarState) -> VisageResult<()> {
        let (color, opacity) = pulse_style(state, palette);
        let pulse = self.graph.material_mut(self.nodes.pulse_ring)?;
        pulse.color = color;
        pulse.opacity = opacity;

        self.graph
            .set_visible(self.nodes.mouth.glow, state == AvatarState::Speaking)
    }
}

fn build_eye(
    graph: &mut SceneGraph,
    head: NodeId,
    side: &str,
    x: f32,
    palette: &Palette,
) -> VisageResult<EyeNodes> {
    let group = graph.add_group(head, &format!("{}_eye", side), Transform::at(x, 0.3, 0.1))?;
    let socket = graph.add_mesh(
        group,
        &format!("{}_eye_socket", side),
        Geometry::circle(0.28, 32),
        Material::standard(socket_gray()).metalness(0.1).roughness(0.5),
        Transform::IDENTITY,
    )?;
    let pupil = graph.add_mesh(
        group,
        &format!("{}_eye_pupil", side),
        Geometry::capsule(0.08, 0.15),
        Material::standard(palette.eye)
            .metalness(0.6)
            .roughness(0.2)
            .emissive(palette.eye, 0.3),
        Transform::at(0.0, 0.0, 0.01),
    )?;
    let highlight = graph.add_mesh(
        group,
        &format!("{}_eye_highlight", side),
        Geometry::circle(0.03, 16),
        Material::basic(Color::white()),
        Transform::at(0.05, 0.05, 0.02),
    )?;
    Ok(EyeNodes {
        group,
        socket,
        pupil,
        highlight,
    })
}

fn build_mouth(
    graph: &mut SceneGraph,
    head: NodeId,
    palette: &Palette,
    state: AvatarState,
) -> VisageResult<MouthNodes> {
    let group = graph.add_group(head, "mouth", Transform::at(0.0, -0.4, 0.1))?;
    // Capsules run along local Y; a quarter turn lays the mouth horizontal
    let lips = graph.add_mesh(
        group,
        "mouth_lips",
        Geometry::capsule(0.1, 0.5),
        Material::standard(palette.mouth).metalness(0.5).roughness(0.3),
        Transform::IDENTITY.rotated_z(FRAC_PI_2),
    )?;
    let cavity = graph.add_mesh(
        group,
        "mouth_cavity",
        Geometry::capsule(0.07, 0.4),
        Material::standard(cavity_dark()).metalness(0.1).roughness(0.9),
        Transform::at(0.0, 0.0, 0.01).rotated_z(FRAC_PI_2),
    )?;
    let glow = graph.add_mesh(
        group,
        "mouth_glow",
        Geometry::capsule(0.05, 0.35),
        Material::basic(glow_red()).translucent(0.8),
        Transform::at(0.0, 0.0, -0.02).rotated_z(FRAC_PI_2),
    )?;
    graph.set_visible(glow, state == AvatarState::Speaking)?;
    Ok(MouthNodes {
        group,
        lips,
        cavity,
        glow,
    })
}

fn build_circuit(
    graph: &mut SceneGraph,
    head: NodeId,
    palette: &Palette,
) -> VisageResult<Vec<(NodeId, PaletteRole)>> {
    let group = graph.add_group(head, "circuit", Transform::at(0.0, 0.0, 0.03))?;

    let pieces = [
        ("circuit_left_line", Geometry::cuboid(0.02, 0.5, 0.01), (-1.1, 0.0, FRAC_PI_4), PaletteRole::Primary, 0.4),
        ("circuit_left_dot", Geometry::circle(0.04, 16), (-1.2, 0.3, 0.0), PaletteRole::Secondary, 0.6),
        ("circuit_right_line", Geometry::cuboid(0.02, 0.5, 0.01), (1.1, 0.0, -FRAC_PI_4), PaletteRole::Tertiary, 0.4),
        ("circuit_right_dot", Geometry::circle(0.04, 16), (1.2, 0.3, 0.0), PaletteRole::Primary, 0.6),
        ("circuit_top", Geometry::cuboid(0.6, 0.02, 0.01), (0.0, 1.0, 0.0), PaletteRole::Secondary, 0.3),
        ("circuit_bottom", Geometry::cuboid(0.4, 0.02, 0.01), (0.0, -1.0, 0.0), PaletteRole::Tertiary, 0.3),
    ];

    let mut out = Vec::with_capacity(pieces.len());
    for (name, geometry, (x, y, rot), role, opacity) in pieces {
        let id = graph.add_mesh(
            group,
            name,
            geometry,
            Material::basic(role.pick(palette)).translucent(opacity),
            Transform::at(x, y, 0.0).rotated_z(rot),
        )?;
        out.push((id, role));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_core::ThemeName;
    use visage_scene::MaterialKind;

    #[test]
    fn test_rig_declares_every_part() {
        let palette = Palette::builtin(ThemeName::Ruby);
        let rig = FaceRig::build(&palette, AvatarState::Idle).unwrap();

        // root + head + 5 face meshes + 2×(group+3) eyes + (group+3) mouth
        // + (group+6) circuit + (group+6) accents
        assert_eq!(rig.graph.len(), 2 + 5 + 8 + 4 + 7 + 7);
        assert_eq!(rig.graph.find("pulse_ring"), Some(rig.nodes.pulse_ring));
        assert_eq!(rig.graph.find("accent_5"), Some(rig.nodes.accents[5]));
        assert_eq!(rig.nodes.circuit.len(), 6);
    }

    #[test]
    fn test_initial_materials() {
        let palette = Palette::builtin(ThemeName::Ruby);
        let rig = FaceRig::build(&palette, AvatarState::Idle).unwrap();
        let g = &rig.graph;

        let disc = g.material(rig.nodes.face_disc).unwrap();
        assert_eq!(disc.color, palette.off_white);
        assert_eq!((disc.metalness, disc.roughness), (0.1, 0.3));

        let pulse = g.material(rig.nodes.pulse_ring).unwrap();
        assert_eq!(pulse.kind, MaterialKind::Basic);
        assert_eq!(pulse.opacity, 0.2);

        let pupil = g.material(rig.nodes.left_eye.pupil).unwrap();
        assert_eq!(pupil.emissive, Some(palette.eye));
        assert_eq!(pupil.emissive_intensity, 0.3);

        for dot in rig.nodes.accents {
            assert_eq!(g.material(dot).unwrap().opacity, ACCENT_INITIAL_OPACITY);
        }
        assert!(!g.is_visible(rig.nodes.mouth.glow).unwrap());
    }

    #[test]
    fn test_apply_palette_repaints_everything() {
        let ruby = Palette::builtin(ThemeName::Ruby);
        let spectrum = Palette::builtin(ThemeName::Spectrum);
        let mut rig = FaceRig::build(&ruby, AvatarState::Speaking).unwrap();

        rig.apply_palette(&spectrum, AvatarState::Speaking).unwrap();
        let g = &rig.graph;
        let n = &rig.nodes;

        assert_eq!(g.material(n.border_ring).unwrap().color, spectrum.primary);
        assert_eq!(g.material(n.inner_ring).unwrap().color, spectrum.ring_inner);
        assert_eq!(g.material(n.outer_ring).unwrap().color, spectrum.ring_outer);
        assert_eq!(g.material(n.right_eye.pupil).unwrap().color, spectrum.eye);
        assert_eq!(g.material(n.mouth.lips).unwrap().color, spectrum.mouth);
        assert_eq!(g.material(n.pulse_ring).unwrap().color, spectrum.mouth);
        assert_eq!(g.material(n.accents[2]).unwrap().color, spectrum.tertiary);
        for (id, role) in &n.circuit {
            assert_eq!(g.material(*id).unwrap().color, role.pick(&spectrum));
        }
        assert!(g.is_visible(n.mouth.glow).unwrap());
    }
}
