// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotating hero mesh.
//!
//! The mesh spins by a constant step every frame and can be dragged
//! horizontally to add yaw. Colour comes from a `<input type="color">`.
//!
//! Rendering is not done here: [`SceneBackend`] is the opaque capability that
//! owns renderer, scene, camera, geometry, material, mesh and light, and
//! [`MeshAnimator::frame`] only pushes the current rotation and colour into
//! it before asking it to render.
//!
//! Drag is a two-state machine: [`DragState::Idle`] → [`DragState::Dragging`]
//! on pointer-down over the canvas, back to idle on pointer-up anywhere in the
//! window so a drag that leaves the canvas still ends.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Size;

use crate::event::PageEvent;
use crate::trace::{ColorEvent, DragEvent, MeshFrameEvent, TraceSink, tracer_for};

/// An sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// White.
    pub const WHITE: Self = Self::from_u32(0xFF_FF_FF);

    /// Creates a colour from components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a colour from a `0xRRGGBB` value; higher bits are ignored.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "each channel is masked to its low byte by the cast"
    )]
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    /// Returns the colour as `0xRRGGBB`.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parses `#rrggbb` or `#rgb`, the formats a colour input produces.
    pub fn parse_hex(text: &str) -> Result<Self, ColorParseError> {
        let digits = text.trim().strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        let mut nibbles = [0_u8; 6];
        let count = digits.chars().count();
        match count {
            3 | 6 => {}
            n => return Err(ColorParseError::BadLength(n)),
        }
        for (i, c) in digits.chars().enumerate() {
            let v = c.to_digit(16).ok_or(ColorParseError::BadDigit(c))?;
            #[expect(clippy::cast_possible_truncation, reason = "hex digit is < 16")]
            let v = v as u8;
            if count == 3 {
                nibbles[2 * i] = v;
                nibbles[2 * i + 1] = v;
            } else {
                nibbles[i] = v;
            }
        }
        Ok(Self {
            r: (nibbles[0] << 4) | nibbles[1],
            g: (nibbles[2] << 4) | nibbles[3],
            b: (nibbles[4] << 4) | nibbles[5],
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Errors from [`Rgb::parse_hex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    /// The text does not start with `#`.
    MissingHash,
    /// Neither 3 nor 6 digits follow the `#`.
    BadLength(usize),
    /// A character is not a hexadecimal digit.
    BadDigit(char),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "colour must start with '#'"),
            Self::BadLength(n) => write!(f, "colour must have 3 or 6 hex digits, got {n}"),
            Self::BadDigit(c) => write!(f, "invalid hex digit {c:?} in colour"),
        }
    }
}

impl core::error::Error for ColorParseError {}

/// Euler rotation in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    /// Pitch.
    pub x: f64,
    /// Yaw.
    pub y: f64,
}

impl Rotation {
    /// Creates a rotation.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Torus-knot geometry parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusKnot {
    /// Radius of the knot.
    pub radius: f64,
    /// Radius of the tube.
    pub tube: f64,
    /// Segments along the tube.
    pub tubular_segments: u32,
    /// Segments around the tube.
    pub radial_segments: u32,
}

/// Perspective camera parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Near clip plane.
    pub near: f64,
    /// Far clip plane.
    pub far: f64,
    /// Distance from the origin along +z.
    pub distance: f64,
}

/// Point light parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightConfig {
    /// Light colour.
    pub color: Rgb,
    /// Intensity.
    pub intensity: f64,
    /// World position.
    pub position: [f64; 3],
}

/// Everything needed to build and animate the hero mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshConfig {
    /// Geometry.
    pub geometry: TorusKnot,
    /// Camera.
    pub camera: CameraConfig,
    /// Initial surface colour.
    pub color: Rgb,
    /// Material metalness in `[0, 1]`.
    pub metalness: f64,
    /// Material roughness in `[0, 1]`.
    pub roughness: f64,
    /// Single point light.
    pub light: LightConfig,
    /// Rotation added every frame.
    pub spin: Rotation,
    /// Yaw added per pixel of horizontal drag.
    pub drag_sensitivity: f64,
}

impl MeshConfig {
    /// The portfolio hero: a sea-green torus knot.
    #[must_use]
    pub const fn hero() -> Self {
        Self {
            geometry: TorusKnot {
                radius: 0.7,
                tube: 0.25,
                tubular_segments: 100,
                radial_segments: 16,
            },
            camera: CameraConfig {
                fov_degrees: 45.0,
                near: 0.1,
                far: 100.0,
                distance: 3.0,
            },
            color: Rgb::from_u32(0x8F_BC_8F),
            metalness: 0.3,
            roughness: 0.2,
            light: LightConfig {
                color: Rgb::WHITE,
                intensity: 1.0,
                position: [2.0, 2.0, 3.0],
            },
            spin: Rotation::new(0.01, 0.02),
            drag_sensitivity: 0.005,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self::hero()
    }
}

/// Pointer drag state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    /// No button held.
    Idle,
    /// Button held since a press on the canvas.
    Dragging {
        /// Pointer x at the previous step.
        last_x: f64,
    },
}

/// Rotation, colour and drag state of the mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshState {
    rotation: Rotation,
    color: Rgb,
    drag: DragState,
    spin: Rotation,
    sensitivity: f64,
}

impl MeshState {
    /// Creates the initial state for `config`.
    #[must_use]
    pub const fn new(config: &MeshConfig) -> Self {
        Self {
            rotation: Rotation::new(0.0, 0.0),
            color: config.color,
            drag: DragState::Idle,
            spin: config.spin,
            sensitivity: config.drag_sensitivity,
        }
    }

    /// Current rotation.
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Current colour.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Current drag state.
    #[must_use]
    pub const fn drag(&self) -> DragState {
        self.drag
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Advances the constant spin by one frame.
    pub fn frame(&mut self) {
        self.rotation.x += self.spin.x;
        self.rotation.y += self.spin.y;
    }

    /// Starts a drag at `x`.
    pub fn pointer_down(&mut self, x: f64) {
        self.drag = DragState::Dragging { last_x: x };
    }

    /// Moves the pointer to `x`. While dragging, adds
    /// `(x - last_x) × sensitivity` to the yaw and returns the pixel delta.
    pub fn pointer_move(&mut self, x: f64) -> Option<f64> {
        let DragState::Dragging { last_x } = self.drag else {
            return None;
        };
        let delta = x - last_x;
        self.rotation.y += delta * self.sensitivity;
        self.drag = DragState::Dragging { last_x: x };
        Some(delta)
    }

    /// Ends any drag.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Sets the surface colour.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }
}

/// The 3D library as seen by the animator.
pub trait SceneBackend {
    /// Sets the mesh rotation.
    fn set_rotation(&mut self, rotation: Rotation);

    /// Sets the material colour.
    fn set_color(&mut self, color: Rgb);

    /// Resizes the drawing surface and updates the camera aspect.
    fn resize(&mut self, size: Size);

    /// Draws the scene.
    fn render(&mut self);
}

/// Drives a [`SceneBackend`] from pointer, colour and frame events.
pub struct MeshAnimator {
    state: MeshState,
    color_dirty: bool,
    frame_index: u64,
    sink: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for MeshAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshAnimator")
            .field("state", &self.state)
            .field("color_dirty", &self.color_dirty)
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}

impl MeshAnimator {
    /// Creates an animator for `config`. The first frame pushes the colour.
    #[must_use]
    pub fn new(config: &MeshConfig) -> Self {
        Self {
            state: MeshState::new(config),
            color_dirty: true,
            frame_index: 0,
            sink: None,
        }
    }

    /// Routes trace events to `sink`.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    /// Current mesh state.
    #[must_use]
    pub const fn state(&self) -> &MeshState {
        &self.state
    }

    /// Number of frames drawn.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Handles pointer and colour events; everything else is ignored.
    ///
    /// Returns `true` if the event changed the mesh state.
    pub fn handle(&mut self, event: &PageEvent<'_>) -> bool {
        let mut tracer = tracer_for(&mut self.sink);
        match *event {
            PageEvent::PointerDown { x } => {
                self.state.pointer_down(x);
                true
            }
            PageEvent::PointerMove { x } => match self.state.pointer_move(x) {
                Some(delta_x) => {
                    tracer.drag(&DragEvent {
                        delta_x,
                        yaw: self.state.rotation.y,
                    });
                    true
                }
                None => false,
            },
            PageEvent::PointerUp => {
                let was_dragging = self.state.is_dragging();
                self.state.pointer_up();
                was_dragging
            }
            PageEvent::ColorInput(text) => match Rgb::parse_hex(text) {
                Ok(color) => {
                    self.state.set_color(color);
                    self.color_dirty = true;
                    tracer.color(&ColorEvent { color });
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    /// Advances one frame and redraws through `scene`.
    pub fn frame(&mut self, scene: &mut dyn SceneBackend) {
        self.state.frame();
        if self.color_dirty {
            scene.set_color(self.state.color);
            self.color_dirty = false;
        }
        scene.set_rotation(self.state.rotation);
        scene.render();

        let mut tracer = tracer_for(&mut self.sink);
        tracer.mesh_frame(&MeshFrameEvent {
            frame_index: self.frame_index,
            rotation_x: self.state.rotation.x,
            rotation_y: self.state.rotation.y,
        });
        self.frame_index += 1;
    }
}
