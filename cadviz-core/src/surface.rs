/// Draw commands and the surface capability a host provides
use crate::color::Rgb;
use crate::projection::ScreenPoint;

/// Fully opaque alpha
pub const OPAQUE: u8 = 255;

/// One 2D primitive, in submission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Polygon {
        points: Vec<ScreenPoint>,
        color: Rgb,
        alpha: u8,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        color: Rgb,
        thickness: u32,
    },
}

/// Something shapes can draw onto.
///
/// Calls arrive in painter's order and must be composited in that order.
pub trait Surface {
    fn draw_polygon(&mut self, points: &[ScreenPoint], color: Rgb, alpha: u8);

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb, thickness: u32);

    /// Replay a recorded command
    fn submit(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Polygon {
                points,
                color,
                alpha,
            } => self.draw_polygon(points, *color, *alpha),
            DrawCommand::Line {
                from,
                to,
                color,
                thickness,
            } => self.draw_line(*from, *to, *color, *thickness),
        }
    }
}

/// Recording surface
impl Surface for Vec<DrawCommand> {
    fn draw_polygon(&mut self, points: &[ScreenPoint], color: Rgb, alpha: u8) {
        self.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            alpha,
        });
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb, thickness: u32) {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            thickness,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_preserves_order() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        let a = ScreenPoint::new(0, 0);
        let b = ScreenPoint::new(10, 0);
        let c = ScreenPoint::new(10, 10);
        commands.draw_polygon(&[a, b, c], Rgb::GREY, 128);
        commands.draw_line(a, c, Rgb::BLACK, 2);

        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::Polygon { alpha: 128, .. }));
        assert!(matches!(commands[1], DrawCommand::Line { thickness: 2, .. }));

        let mut replayed: Vec<DrawCommand> = Vec::new();
        for command in &commands {
            replayed.submit(command);
        }
        assert_eq!(replayed, commands);
    }
}
