use reel_core::pattern::float_offset;
use reel_core::{
    Color, Fill, Frame, Interpolation, NodeId, Result, Transform, VisualNode, VisualTree,
};
use serde::{Deserialize, Serialize};

const SCATTER_START: Frame = 30;

/// A sheet of lined exam paper that bobs, then flies apart and fades.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaperSheet {
    pub x: f32,
    pub y: f32,
    /// Resting rotation in degrees.
    pub rotation: f32,
}

/// Where and how a sheet sits at one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetPose {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub opacity: f32,
}

/// Scatter timing shared by every sheet of a stack.
#[derive(Clone, Debug)]
pub struct Scatter {
    progress: Interpolation,
    fade: Interpolation,
}

impl Scatter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            progress: Interpolation::new([30.0, 55.0], [0.0, 1.0])?.clamped(),
            fade: Interpolation::new([35.0, 55.0], [1.0, 0.0])?.clamped(),
        })
    }
}

impl PaperSheet {
    pub const WIDTH: f32 = 160.0;
    pub const HEIGHT: f32 = 220.0;

    pub const fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }

    /// Even sheets drift right and spin clockwise; odd ones go the other way.
    pub fn pose(&self, scatter: &Scatter, index: usize, frame: Frame) -> SheetPose {
        let t = scatter.progress.eval(frame as f32);
        let even = index % 2 == 0;
        let bob = if frame < SCATTER_START {
            float_offset(frame as f32, 0.08, index as f32 * 1.5, 5.0)
        } else {
            0.0
        };

        SheetPose {
            x: self.x + t * if even { 150.0 } else { -150.0 },
            y: self.y + t * 200.0 + bob,
            rotation: self.rotation + t * if even { 45.0 } else { -30.0 },
            opacity: scatter.fade.eval(frame as f32),
        }
    }

    pub fn render_into(
        &self,
        tree: &mut VisualTree,
        parent: NodeId,
        scatter: &Scatter,
        index: usize,
        frame: Frame,
    ) -> NodeId {
        let pose = self.pose(scatter, index, frame);
        let sheet = tree.append(
            parent,
            VisualNode::rect(format!("paper:{index}"), Self::WIDTH, Self::HEIGHT)
                .at(pose.x, pose.y)
                .rounded(6.0)
                .fill(Fill::linear(
                    145.0,
                    [
                        (Color::rgb(0xfa, 0xfa, 0xf9), 0.0),
                        (Color::rgb(0xe7, 0xe5, 0xe4), 1.0),
                    ],
                ))
                .transform(Transform::new().with_rotation(pose.rotation))
                .opacity(pose.opacity),
        );

        let ruled = Self::WIDTH - 36.0;
        for line in 0..8 {
            tree.append(
                sheet,
                VisualNode::rect("rule", ruled, 2.0)
                    .at(18.0, 30.0 + line as f32 * 22.0)
                    .rounded(1.0)
                    .fill(Fill::solid(Color::rgb(0xd4, 0xd4, 0xd4)))
                    .opacity(0.6),
            );
        }
        tree.append(
            sheet,
            VisualNode::rect("margin", 1.5, Self::HEIGHT)
                .at(35.0, 0.0)
                .fill(Fill::solid(Color::rgb(0xfc, 0xa5, 0xa5)))
                .opacity(0.5),
        );
        tree.append(
            sheet,
            VisualNode::rect("header", ruled, 14.0)
                .at(18.0, 8.0)
                .rounded(2.0)
                .fill(Fill::solid(Color::rgb(0xd1, 0xd5, 0xdb)))
                .opacity(0.5),
        );
        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheets_rest_then_scatter_in_alternating_directions() {
        let scatter = Scatter::new().unwrap();
        let sheet = PaperSheet::new(80.0, 500.0, -12.0);

        let resting = sheet.pose(&scatter, 0, 30);
        assert_eq!((resting.x, resting.y, resting.rotation), (80.0, 500.0, -12.0));
        assert_eq!(resting.opacity, 1.0);

        let even = sheet.pose(&scatter, 0, 55);
        assert_eq!((even.x, even.y, even.rotation), (230.0, 700.0, 33.0));
        assert_eq!(even.opacity, 0.0);

        let odd = sheet.pose(&scatter, 1, 100);
        assert_eq!((odd.x, odd.rotation), (-70.0, -42.0));
    }

    #[test]
    fn bob_only_before_scatter() {
        let scatter = Scatter::new().unwrap();
        let sheet = PaperSheet::new(0.0, 0.0, 0.0);
        let moved = (0..30).any(|f| sheet.pose(&scatter, 3, f).y != 0.0);
        assert!(moved);
        for frame in 30..35 {
            assert_eq!(sheet.pose(&scatter, 3, frame).y, (frame - 30) as f32 / 25.0 * 200.0);
        }
    }

    #[test]
    fn renders_ruled_lines_under_sheet() {
        let scatter = Scatter::new().unwrap();
        let mut tree = VisualTree::new(1080, 1920);
        let sheet = PaperSheet::new(320.0, 450.0, 8.0);
        let id = sheet.render_into(&mut tree, VisualTree::ROOT, &scatter, 1, 0);
        assert_eq!(tree.get_node(id).unwrap().children.len(), 10);
    }
}
