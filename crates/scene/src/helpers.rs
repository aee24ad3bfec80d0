use cubestage_common::Color;
use serde::{Deserialize, Serialize};

/// A colored line endpoint. Consecutive pairs form one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: Color,
}

impl LineVertex {
    pub fn new(position: [f32; 3], color: Color) -> Self {
        Self { position, color }
    }
}

/// Reference grid on the XZ plane, centered at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
    pub center_color: Color,
    pub line_color: Color,
}

impl GridHelper {
    pub fn new(size: f32, divisions: u32) -> Self {
        Self {
            size,
            divisions: divisions.max(1),
            center_color: Color::from_hex(0x444444),
            line_color: Color::from_hex(0x888888),
        }
    }

    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let step = self.size / self.divisions as f32;
        let half = self.size / 2.0;
        let center = self.divisions / 2;
        let mut verts = Vec::with_capacity((self.divisions as usize + 1) * 4);

        for i in 0..=self.divisions {
            let k = -half + i as f32 * step;
            let color = if i == center {
                self.center_color
            } else {
                self.line_color
            };
            // Lines along X
            verts.push(LineVertex::new([-half, 0.0, k], color));
            verts.push(LineVertex::new([half, 0.0, k], color));
            // Lines along Z
            verts.push(LineVertex::new([k, 0.0, -half], color));
            verts.push(LineVertex::new([k, 0.0, half], color));
        }
        verts
    }
}

impl Default for GridHelper {
    fn default() -> Self {
        Self::new(10.0, 10)
    }
}

/// Coordinate axes from the origin: X red, Y green, Z blue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesHelper {
    pub size: f32,
}

impl AxesHelper {
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let s = self.size;
        let x = Color::from_hex(0xff0000);
        let y = Color::from_hex(0x00ff00);
        let z = Color::from_hex(0x0000ff);
        vec![
            LineVertex::new([0.0, 0.0, 0.0], x),
            LineVertex::new([s, 0.0, 0.0], x),
            LineVertex::new([0.0, 0.0, 0.0], y),
            LineVertex::new([0.0, s, 0.0], y),
            LineVertex::new([0.0, 0.0, 0.0], z),
            LineVertex::new([0.0, 0.0, s], z),
        ]
    }
}

impl Default for AxesHelper {
    fn default() -> Self {
        Self::new(1.0)
    }
}
