use glam::Vec2;

use crate::api::types::Rgb;
use crate::renderer::layer::DrawLayer;

/// One drawing instruction in logical pixels.
/// Alpha is always in (0, 1]; builders drop anything fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface to transparent.
    Clear,
    /// Cover the surface with a translucent rectangle (trail effect).
    Fade { color: Rgb, alpha: f32 },
    /// Radial gradient through `stops`, fading to transparent at `radius`.
    Glow {
        center: Vec2,
        radius: f32,
        stops: Vec<Rgb>,
        alpha: f32,
    },
    /// Filled circle.
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
        alpha: f32,
    },
    /// Filled rectangle rotated about its center.
    Rect {
        center: Vec2,
        half_extents: Vec2,
        rotation: f32,
        color: Rgb,
        alpha: f32,
    },
    /// Filled closed polygon.
    Polygon {
        points: Vec<Vec2>,
        color: Rgb,
        alpha: f32,
    },
    /// Stroked segment with a round cap.
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgb,
        alpha: f32,
    },
}

impl DrawCommand {
    /// The command's opacity; clears count as fully opaque.
    pub fn alpha(&self) -> f32 {
        match self {
            DrawCommand::Clear => 1.0,
            DrawCommand::Fade { alpha, .. }
            | DrawCommand::Glow { alpha, .. }
            | DrawCommand::Circle { alpha, .. }
            | DrawCommand::Rect { alpha, .. }
            | DrawCommand::Polygon { alpha, .. }
            | DrawCommand::Line { alpha, .. } => *alpha,
        }
    }
}

/// Draw commands for one pass, with the index where each layer begins.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    /// (layer, first command index), in the order layers were opened.
    pub layers: Vec<(DrawLayer, usize)>,
    /// Logical surface size the commands were built for.
    pub width: f32,
    pub height: f32,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
            layers: Vec::with_capacity(DrawLayer::COUNT),
            width: 0.0,
            height: 0.0,
        }
    }

    /// Reset for a new pass over a `width` x `height` surface.
    pub fn begin(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.layers.clear();
        self.width = width;
        self.height = height;
    }

    /// Mark the start of `layer`. Subsequent pushes belong to it.
    pub fn open_layer(&mut self, layer: DrawLayer) {
        self.layers.push((layer, self.commands.len()));
    }

    /// Append a command. Fully transparent commands are dropped and alpha is clamped.
    pub fn push(&mut self, mut command: DrawCommand) {
        let alpha = command.alpha();
        if !(alpha > 0.0) {
            return;
        }
        if alpha > 1.0 {
            set_alpha(&mut command, 1.0);
        }
        self.commands.push(command);
    }

    /// Commands belonging to `layer`, empty if the layer was never opened.
    pub fn layer(&self, layer: DrawLayer) -> &[DrawCommand] {
        let Some(pos) = self.layers.iter().position(|(l, _)| *l == layer) else {
            return &[];
        };
        let start = self.layers[pos].1;
        let end = self
            .layers
            .get(pos + 1)
            .map(|(_, i)| *i)
            .unwrap_or(self.commands.len());
        &self.commands[start..end]
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.layers.clear();
    }
}

fn set_alpha(command: &mut DrawCommand, value: f32) {
    match command {
        DrawCommand::Clear => {}
        DrawCommand::Fade { alpha, .. }
        | DrawCommand::Glow { alpha, .. }
        | DrawCommand::Circle { alpha, .. }
        | DrawCommand::Rect { alpha, .. }
        | DrawCommand::Polygon { alpha, .. }
        | DrawCommand::Line { alpha, .. } => *alpha = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(alpha: f32) -> DrawCommand {
        DrawCommand::Circle {
            center: Vec2::ZERO,
            radius: 1.0,
            color: Rgb::WHITE,
            alpha,
        }
    }

    #[test]
    fn transparent_commands_are_dropped() {
        let mut list = DrawList::new();
        list.push(dot(0.0));
        list.push(dot(-0.5));
        list.push(dot(f32::NAN));
        assert!(list.is_empty());
        list.push(dot(0.3));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn alpha_is_clamped() {
        let mut list = DrawList::new();
        list.push(dot(1.7));
        assert_eq!(list.commands[0].alpha(), 1.0);
    }

    #[test]
    fn layer_slices() {
        let mut list = DrawList::new();
        list.begin(100.0, 100.0);
        list.push(DrawCommand::Clear);
        list.open_layer(DrawLayer::Stars);
        list.push(dot(0.5));
        list.push(dot(0.6));
        list.open_layer(DrawLayer::Meteors);
        list.push(dot(0.9));
        assert_eq!(list.layer(DrawLayer::Stars).len(), 2);
        assert_eq!(list.layer(DrawLayer::Meteors).len(), 1);
        assert!(list.layer(DrawLayer::Nebula).is_empty());
        list.begin(50.0, 50.0);
        assert!(list.is_empty());
        assert!(list.layers.is_empty());
    }
}
