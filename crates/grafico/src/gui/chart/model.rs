use crate::config::{ChartKind, Config};
use crate::gui::chart::{
    HOLE_RADIUS_FACTOR, LEGEND_BLOCK_X, LEGEND_BLOCK_SIZE, LEGEND_ROW_PITCH, LEGEND_TEXT_WIDTH,
    LEGEND_TEXT_X, LEGEND_TOP_Y, REFERENCE_HEIGHT, REFERENCE_WIDTH, WHEEL_CX, WHEEL_CY,
    WHEEL_RADIUS,
};
use fatia::geom;
use fatia::{Point, Slice, SliceSet};

#[derive(Debug, Clone, Copy)]
pub struct ChartGeometry {
    pub center: Point,
    pub radius: f64,
    pub scale: f64,
}

impl ChartGeometry {
    /// Uniform scale that fits the reference layout into the widget.
    pub fn for_size(width: f64, height: f64) -> Self {
        let scale = (width / REFERENCE_WIDTH)
            .min(height / REFERENCE_HEIGHT)
            .max(f64::EPSILON);
        Self {
            center: Point::new(WHEEL_CX * scale, WHEEL_CY * scale),
            radius: WHEEL_RADIUS * scale,
            scale,
        }
    }

    pub fn hole_radius(&self) -> f64 {
        self.radius * HOLE_RADIUS_FACTOR
    }
}

pub struct ChartState {
    pub set: SliceSet,
    pub kind: ChartKind,
    pub geometry: ChartGeometry,
    pub hover_index: Option<usize>,
}

impl ChartState {
    pub fn new(config: &Config) -> Self {
        let mut state = Self {
            set: SliceSet::new(),
            kind: config.kind,
            geometry: ChartGeometry::for_size(REFERENCE_WIDTH, REFERENCE_HEIGHT),
            hover_index: None,
        };
        state.rebuild(config);
        state
    }

    /// Replaces the whole slice set; there is no in-place editing.
    pub fn rebuild(&mut self, config: &Config) {
        let result = SliceSet::build_from(config.inputs());
        if let Some(err) = &result.rejected {
            log::warn!(
                "config defines more than 100%, keeping the first {} slice(s): {}",
                result.consumed,
                err
            );
        }
        self.set = result.set;
        self.kind = config.kind;
        self.hover_index = None;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.geometry = ChartGeometry::for_size(width, height);
    }

    pub fn update_cursor(&mut self, cursor: Point) -> CursorAction {
        let new_idx = self.slice_at(cursor);
        let changed = self.hover_index != new_idx;
        self.hover_index = new_idx;
        CursorAction::new(changed)
    }

    pub fn hovered(&self) -> Option<&Slice> {
        self.hover_index.and_then(|idx| self.set.get(idx))
    }

    /// Which slice the cursor is on: the wedge itself, or its legend row.
    fn slice_at(&self, cursor: Point) -> Option<usize> {
        self.wheel_hit(cursor).or_else(|| self.legend_hit(cursor))
    }

    fn wheel_hit(&self, cursor: Point) -> Option<usize> {
        let dist = self.geometry.center.distance_to(cursor);
        if dist > self.geometry.radius {
            return None;
        }
        // the hole is a dead zone
        if self.kind == ChartKind::Donut && dist <= self.geometry.hole_radius() {
            return None;
        }
        self.set
            .hit_test(geom::point_to_angle(self.geometry.center, cursor))
    }

    fn legend_hit(&self, cursor: Point) -> Option<usize> {
        let s = self.geometry.scale;

        // Two discrete bands, the color block and the text column; the
        // gutter between them is dead.
        let in_block = cursor.x >= LEGEND_BLOCK_X * s
            && cursor.x <= (LEGEND_BLOCK_X + LEGEND_BLOCK_SIZE) * s;
        let in_text = cursor.x >= LEGEND_TEXT_X * s
            && cursor.x <= (LEGEND_TEXT_X + LEGEND_TEXT_WIDTH) * s;
        if !in_block && !in_text {
            return None;
        }

        (0..self.set.len()).find(|i| {
            let top = (LEGEND_TOP_Y + LEGEND_ROW_PITCH * *i as f64) * s;
            cursor.y >= top && cursor.y <= top + LEGEND_BLOCK_SIZE * s
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CursorAction {
    pub should_redraw: bool,
}

impl CursorAction {
    pub fn new(should_redraw: bool) -> Self {
        Self { should_redraw }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliceEntry;

    fn sample_state(kind: ChartKind) -> ChartState {
        let config = Config {
            title: None,
            kind,
            slices: [("a", 10.0), ("b", 10.0), ("c", 20.0), ("d", 20.0), ("e", 20.0), ("f", 20.0)]
                .into_iter()
                .map(|(label, value)| SliceEntry {
                    value,
                    label: label.to_string(),
                    color: None,
                })
                .collect(),
        };
        // reference size, so center = (300, 300), radius = 250, scale = 1
        ChartState::new(&config)
    }

    #[test]
    fn test_hover_follows_the_cursor() {
        let mut state = sample_state(ChartKind::Pie);

        // 100 px straight down on screen from the center: angle 90°, slice "c".
        let action = state.update_cursor(Point::new(300.0, 400.0));
        assert!(action.should_redraw);
        assert_eq!(state.hover_index, Some(2));
        assert_eq!(state.hovered().unwrap().label.as_ref(), "c");

        // Same slice again: no redraw needed.
        let action = state.update_cursor(Point::new(310.0, 420.0));
        assert!(!action.should_redraw);

        // Outside the wheel and the legend: hover clears.
        let action = state.update_cursor(Point::new(50.0, 580.0));
        assert!(action.should_redraw);
        assert_eq!(state.hover_index, None);
    }

    #[test]
    fn test_donut_hole_is_a_dead_zone() {
        let mut state = sample_state(ChartKind::Donut);

        state.update_cursor(Point::new(310.0, 300.0)); // 10 px out, inside the hole
        assert_eq!(state.hover_index, None);

        state.update_cursor(Point::new(400.0, 300.0)); // past the hole, slice "a"
        assert_eq!(state.hover_index, Some(0));

        // A pie has no hole.
        let mut pie = sample_state(ChartKind::Pie);
        pie.update_cursor(Point::new(310.0, 300.0));
        assert_eq!(pie.hover_index, Some(0));
    }

    #[test]
    fn test_legend_rows_hit_their_slice() {
        let mut state = sample_state(ChartKind::Pie);

        // Third legend row: block at y = 20 + 50 * 2.
        state.update_cursor(Point::new(610.0, 135.0));
        assert_eq!(state.hover_index, Some(2));

        // Text area of the same row counts too.
        state.update_cursor(Point::new(700.0, 135.0));
        assert_eq!(state.hover_index, Some(2));

        // The gutter between the block and the text does not.
        state.update_cursor(Point::new(640.0, 135.0));
        assert_eq!(state.hover_index, None);

        // Between rows: nothing.
        state.update_cursor(Point::new(610.0, 60.0));
        assert_eq!(state.hover_index, None);

        // A row that has no slice behind it: nothing.
        state.update_cursor(Point::new(610.0, 335.0));
        assert_eq!(state.hover_index, None);
    }

    #[test]
    fn test_resize_rescales_the_wheel() {
        let mut state = sample_state(ChartKind::Pie);
        state.resize(500.0, 300.0);

        assert_eq!(state.geometry.scale, 0.5);
        assert_eq!(state.geometry.center, Point::new(150.0, 150.0));
        assert_eq!(state.geometry.radius, 125.0);

        // Hit-testing follows the new geometry.
        state.update_cursor(Point::new(150.0, 200.0));
        assert_eq!(state.hover_index, Some(2));
    }

    #[test]
    fn test_rebuild_clears_hover_and_truncates_overflow() {
        let mut state = sample_state(ChartKind::Pie);
        state.update_cursor(Point::new(400.0, 300.0));
        assert!(state.hover_index.is_some());

        let config = Config {
            title: None,
            kind: ChartKind::Pie,
            slices: vec![
                SliceEntry {
                    value: 60.0,
                    label: "most".to_string(),
                    color: None,
                },
                SliceEntry {
                    value: 60.0,
                    label: "too much".to_string(),
                    color: None,
                },
            ],
        };
        state.rebuild(&config);

        assert_eq!(state.hover_index, None);
        assert_eq!(state.set.len(), 1);
        assert_eq!(state.set.total(), 60.0);
    }
}
