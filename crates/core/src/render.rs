//! Read-only view for an external renderer.
//!
//! The core never draws. It hands out world positions, camera-relative
//! screen positions and radii; colours and shapes are the renderer's call.

use glam::Vec2;

use crate::entities::{AiId, FoodId, PeerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawKind {
    Player,
    Ai(AiId),
    Food(FoodId),
    Peer(PeerId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub kind: DrawKind,
    pub world: Vec2,
    pub screen: Vec2,
    pub radius: f32,
}

/// Everything visible this frame, back to front: food, peers, AI, player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderView {
    pub camera_offset: Vec2,
    pub world_size: Vec2,
    pub drawables: Vec<Drawable>,
}

impl RenderView {
    pub fn new(camera_offset: Vec2, world_size: Vec2) -> Self {
        Self {
            camera_offset,
            world_size,
            drawables: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: DrawKind, world: Vec2, radius: f32) {
        self.drawables.push(Drawable {
            kind,
            world,
            screen: world - self.camera_offset,
            radius,
        });
    }

    pub fn player(&self) -> Option<&Drawable> {
        self.drawables.iter().find(|d| d.kind == DrawKind::Player)
    }
}
