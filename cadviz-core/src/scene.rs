/// Scene composition and the per-frame step/render sequence
use log::trace;

use crate::error::GeometryResult;
use crate::projection::{CameraState, Frame, RenderContext};
use crate::shape::{Axes, AxesParams, Floor, FloorParams, Shape};
use crate::surface::{DrawCommand, Surface};

/// Floor, shapes and axes drawn in that order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    floor: Option<Floor>,
    shapes: Vec<Shape>,
    axes: Option<Axes>,
}

impl Scene {
    /// An empty scene with no floor and no axes
    pub fn new() -> Self {
        Self::default()
    }

    /// Floor of side 50 and axes of length 5 around the origin
    pub fn with_background() -> GeometryResult<Self> {
        Ok(Self::new()
            .with_floor(Floor::new(FloorParams {
                side_length: 50.0,
                ..Default::default()
            })?)
            .with_axes(Axes::new(AxesParams {
                side_length: 5.0,
                ..Default::default()
            })?))
    }

    pub fn with_floor(mut self, floor: Floor) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn with_axes(mut self, axes: Axes) -> Self {
        self.axes = Some(axes);
        self
    }

    pub fn set_floor(&mut self, floor: Option<Floor>) {
        self.floor = floor;
    }

    pub fn set_axes(&mut self, axes: Option<Axes>) {
        self.axes = axes;
    }

    /// Append a shape; later shapes paint over earlier ones
    pub fn add(&mut self, shape: impl Into<Shape>) -> &mut Self {
        self.shapes.push(shape.into());
        self
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn floor(&self) -> Option<&Floor> {
        self.floor.as_ref()
    }

    pub fn axes(&self) -> Option<&Axes> {
        self.axes.as_ref()
    }

    /// Advance every bouncing sphere by one frame.
    ///
    /// Returns the number of floor hits this frame.
    pub fn step(&mut self) -> usize {
        let bounces = self
            .shapes
            .iter_mut()
            .map(Shape::step_physics)
            .filter(|&bounced| bounced)
            .count();
        if bounces > 0 {
            trace!("{bounces} sphere(s) bounced");
        }
        bounces
    }

    /// Draw the whole scene with one rotation matrix shared by every shape
    pub fn render<S: Surface + ?Sized>(
        &self,
        camera: &CameraState,
        context: &RenderContext,
        surface: &mut S,
    ) {
        let frame = Frame::new(camera, context);
        if let Some(floor) = &self.floor {
            floor.render(&frame, surface);
        }
        for shape in &self.shapes {
            shape.render(&frame, surface);
        }
        if let Some(axes) = &self.axes {
            axes.render(&frame, surface);
        }
    }

    /// Record one frame of draw calls
    pub fn draw_commands(&self, camera: &CameraState, context: &RenderContext) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        self.render(camera, context, &mut commands);
        commands
    }
}
