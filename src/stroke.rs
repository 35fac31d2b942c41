use egui::{Color32, Pos2};

/// A frozen, drawn stroke. Points keep the order they were reported in.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPath {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

/// The single path currently being drawn; append-only until frozen
#[derive(Debug, Clone, PartialEq)]
pub struct MutablePath {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

impl DrawPath {
    pub fn new(color: Color32, width: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            width,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_egui_stroke(&self) -> egui::Stroke {
        egui::Stroke::new(self.width, self.color)
    }
}

impl MutablePath {
    /// Start a path at `start`, tagged with the brush in effect right now
    pub fn begin(start: Pos2, color: Color32, width: f32) -> Self {
        Self {
            points: vec![start],
            color,
            width,
        }
    }

    /// Every reported point is kept: no resampling or deduplication.
    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Snapshot for rendering while the gesture is still running
    pub fn to_path(&self) -> DrawPath {
        DrawPath::new(self.color, self.width, self.points.clone())
    }

    /// Freeze into a [`DrawPath`], or `None` if nothing was recorded
    pub fn freeze(self) -> Option<DrawPath> {
        if self.points.is_empty() {
            None
        } else {
            Some(DrawPath::new(self.color, self.width, self.points))
        }
    }
}
