//! Built-in scenes.
//!
//! - [`OrbScene`] - a shaded sphere lit by a circling light
//! - [`GridScene`] - a horizon grid scrolling toward the viewer
//! - [`FrameScene`] - plays a fixed list of frames (loaded from JSON files)
//! - [`FailingScene`] - fails on purpose at a chosen stage

use crate::error::{SceneError, SceneResult};

use super::{SceneModule, SceneSize, SceneView};

/// Shading ramp, darkest first.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

// =============================================================================
// Orb
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct OrbScene {
    /// Radians the light moves per frame.
    pub speed: f32,
}

impl Default for OrbScene {
    fn default() -> Self {
        Self { speed: 0.12 }
    }
}

impl SceneModule for OrbScene {
    fn init(&self, size: SceneSize) -> SceneResult<Box<dyn SceneView>> {
        if size.cols == 0 || size.rows == 0 {
            return Err(SceneError::Init(format!(
                "orb needs a non-empty box, got {}x{}",
                size.cols, size.rows
            )));
        }
        Ok(Box::new(OrbView { speed: self.speed }))
    }

    fn name(&self) -> &str {
        "orb"
    }
}

struct OrbView {
    speed: f32,
}

impl SceneView for OrbView {
    fn draw(&mut self, size: SceneSize, frame: u64) -> SceneResult<Vec<String>> {
        let angle = frame as f32 * self.speed;
        let light = normalize((angle.cos(), -0.6, angle.sin().abs() + 0.4));

        let cx = size.cols as f32 / 2.0;
        let cy = size.rows as f32 / 2.0;
        let radius = (size.rows as f32 / 2.0 - 0.5).min(size.cols as f32 / (2.0 * CELL_ASPECT));
        if radius <= 0.0 {
            return Ok(vec![String::new(); size.rows as usize]);
        }

        let rows = (0..size.rows)
            .map(|y| {
                (0..size.cols)
                    .map(|x| {
                        let nx = (x as f32 + 0.5 - cx) / (radius * CELL_ASPECT);
                        let ny = (y as f32 + 0.5 - cy) / radius;
                        let d = nx * nx + ny * ny;
                        if d > 1.0 {
                            return ' ';
                        }
                        let nz = (1.0 - d).sqrt();
                        let lit = (nx * light.0 + ny * light.1 + nz * light.2).max(0.0);
                        shade(0.15 + 0.85 * lit)
                    })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect();
        Ok(rows)
    }
}

fn normalize(v: (f32, f32, f32)) -> (f32, f32, f32) {
    let len = (v.0 * v.0 + v.1 * v.1 + v.2 * v.2).sqrt();
    (v.0 / len, v.1 / len, v.2 / len)
}

fn shade(intensity: f32) -> char {
    let last = RAMP.len() - 1;
    let i = (intensity.clamp(0.0, 1.0) * last as f32).round() as usize;
    RAMP[i.min(last)] as char
}

// =============================================================================
// Grid
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct GridScene;

impl SceneModule for GridScene {
    fn init(&self, _size: SceneSize) -> SceneResult<Box<dyn SceneView>> {
        Ok(Box::new(GridView))
    }

    fn name(&self) -> &str {
        "grid"
    }
}

struct GridView;

impl SceneView for GridView {
    fn draw(&mut self, size: SceneSize, frame: u64) -> SceneResult<Vec<String>> {
        let horizon = size.rows / 3;
        let cx = size.cols as i32 / 2;

        let rows = (0..size.rows)
            .map(|y| {
                if y < horizon {
                    return String::new();
                }
                if y == horizon {
                    return "─".repeat(size.cols as usize);
                }
                // Depth grows toward the horizon; rows closer to it move slower.
                let depth = (y - horizon) as u64;
                let scrolling = (depth * depth + frame) % 6 == 0;
                (0..size.cols as i32)
                    .map(|x| {
                        let spread = (x - cx) * 4 / (depth as i32 + 1);
                        if spread % 4 == 0 {
                            '│'
                        } else if scrolling {
                            '─'
                        } else {
                            ' '
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(rows)
    }
}

// =============================================================================
// Frame list
// =============================================================================

/// Plays fixed frames in a loop, holding each for `hold` ticks.
#[derive(Debug, Clone)]
pub struct FrameScene {
    pub name: String,
    pub frames: Vec<Vec<String>>,
    pub hold: u64,
}

impl SceneModule for FrameScene {
    fn init(&self, _size: SceneSize) -> SceneResult<Box<dyn SceneView>> {
        if self.frames.is_empty() {
            return Err(SceneError::Init(format!("{} has no frames", self.name)));
        }
        Ok(Box::new(FrameView {
            frames: self.frames.clone(),
            hold: self.hold.max(1),
        }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct FrameView {
    frames: Vec<Vec<String>>,
    hold: u64,
}

impl SceneView for FrameView {
    fn draw(&mut self, _size: SceneSize, frame: u64) -> SceneResult<Vec<String>> {
        let index = (frame / self.hold) as usize % self.frames.len();
        Ok(self.frames[index].clone())
    }
}

// =============================================================================
// Failing
// =============================================================================

/// Where a [`FailingScene`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailStage {
    /// `init` returns an error.
    Init,
    /// `draw` returns an error from frame `after` on.
    Draw { after: u64 },
    /// `draw` panics from frame `after` on.
    Panic { after: u64 },
}

#[derive(Debug, Clone, Copy)]
pub struct FailingScene {
    pub stage: FailStage,
}

impl SceneModule for FailingScene {
    fn init(&self, _size: SceneSize) -> SceneResult<Box<dyn SceneView>> {
        match self.stage {
            FailStage::Init => Err(SceneError::Init("renderer context unavailable".into())),
            stage => Ok(Box::new(FailingView { stage })),
        }
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct FailingView {
    stage: FailStage,
}

impl SceneView for FailingView {
    fn draw(&mut self, size: SceneSize, frame: u64) -> SceneResult<Vec<String>> {
        match self.stage {
            FailStage::Draw { after } if frame >= after => Err(SceneError::Draw {
                frame,
                reason: "lost the drawing surface".into(),
            }),
            FailStage::Panic { after } if frame >= after => {
                panic!("scene panicked on frame {frame}")
            }
            _ => Ok(vec!["~".repeat(size.cols as usize); size.rows as usize]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: SceneSize = SceneSize { cols: 40, rows: 10 };

    #[test]
    fn test_orb_draws_a_disc() {
        let mut view = OrbScene::default().init(SIZE).unwrap();
        let rows = view.draw(SIZE, 3).unwrap();

        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.chars().count() <= 40));
        let middle = &rows[5];
        assert!(!middle.trim().is_empty(), "sphere covers the centre row");
        assert!(rows[0].trim().len() < middle.trim().len());
    }

    #[test]
    fn test_orb_rejects_empty_box() {
        let result = OrbScene::default().init(SceneSize { cols: 0, rows: 4 });
        assert!(matches!(result, Err(SceneError::Init(_))));
    }

    #[test]
    fn test_grid_has_horizon() {
        let mut view = GridScene.init(SIZE).unwrap();
        let rows = view.draw(SIZE, 0).unwrap();
        assert_eq!(rows[3], "─".repeat(40));
    }

    #[test]
    fn test_frame_scene_cycles() {
        let scene = FrameScene {
            name: "blink".into(),
            frames: vec![vec!["a".into()], vec!["b".into()]],
            hold: 2,
        };
        let mut view = scene.init(SIZE).unwrap();
        let seen: Vec<String> = (0..6).map(|f| view.draw(SIZE, f).unwrap()[0].clone()).collect();
        assert_eq!(seen, vec!["a", "a", "b", "b", "a", "a"]);
    }

    #[test]
    fn test_failing_scene_stages() {
        assert!(FailingScene { stage: FailStage::Init }.init(SIZE).is_err());

        let mut view = FailingScene {
            stage: FailStage::Draw { after: 2 },
        }
        .init(SIZE)
        .unwrap();
        assert!(view.draw(SIZE, 1).is_ok());
        assert!(matches!(view.draw(SIZE, 2), Err(SceneError::Draw { frame: 2, .. })));
    }
}
