use super::model::{ChartGeometry, ChartState};
use super::{
    HIGHLIGHT_LINE_WIDTH, INFO_HEIGHT, INFO_LINE_HEIGHT, INFO_WIDTH, INFO_X, INFO_Y,
    LEGEND_BLOCK_SIZE, LEGEND_BLOCK_X, LEGEND_FONT_SIZE, LEGEND_ROW_PITCH, LEGEND_TEXT_BASELINE,
    LEGEND_TEXT_X, LEGEND_TOP_Y,
};
use crate::config::ChartKind;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use fatia::Slice;
use palette::Srgba;

struct SliceRenderer<'a> {
    slice: &'a Slice,
    geometry: &'a ChartGeometry,
}

impl<'a> SliceRenderer<'a> {
    fn new(slice: &'a Slice, geometry: &'a ChartGeometry) -> Self {
        Self { slice, geometry }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_wedge(cr)?;
        self.draw_legend_row(cr)
    }

    fn draw_wedge(&self, cr: &Context) -> Result<(), cairo::Error> {
        let (r, g, b) = self.slice.color.components();
        cr.set_source_rgb(r, g, b);
        self.trace_wedge(cr, self.geometry.radius);
        cr.fill()
    }

    /// move-to-center, arc, close: one wedge path at the given radius.
    fn trace_wedge(&self, cr: &Context, radius: f64) {
        let center = self.geometry.center;
        cr.move_to(center.x, center.y);
        cr.arc(
            center.x,
            center.y,
            radius,
            self.slice.start_angle.to_radians(),
            self.slice.end_angle.to_radians(),
        );
        cr.line_to(center.x, center.y);
    }

    fn draw_legend_row(&self, cr: &Context) -> Result<(), cairo::Error> {
        let s = self.geometry.scale;
        let row = self.slice.index as f64;

        let (r, g, b) = self.slice.color.components();
        cr.set_source_rgb(r, g, b);
        cr.rectangle(
            LEGEND_BLOCK_X * s,
            (LEGEND_TOP_Y + LEGEND_ROW_PITCH * row) * s,
            LEGEND_BLOCK_SIZE * s,
            LEGEND_BLOCK_SIZE * s,
        );
        cr.fill()?;

        cr.set_font_size(LEGEND_FONT_SIZE * s);
        cr.move_to(
            LEGEND_TEXT_X * s,
            (LEGEND_TEXT_BASELINE + LEGEND_ROW_PITCH * row) * s,
        );
        cr.show_text(&self.slice.caption())
    }

    fn draw_highlight(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let s = self.geometry.scale;
        let row = self.slice.index as f64;

        set_source(cr, colors.highlight);

        // The wedge again, a hair larger, translucent over the original.
        self.trace_wedge(cr, self.geometry.radius + 1.0);
        cr.fill()?;

        // Outline the legend block and wash over the row text.
        cr.set_line_width(HIGHLIGHT_LINE_WIDTH * s);
        cr.rectangle(
            LEGEND_BLOCK_X * s,
            (LEGEND_TOP_Y + LEGEND_ROW_PITCH * row) * s,
            LEGEND_BLOCK_SIZE * s,
            LEGEND_BLOCK_SIZE * s,
        );
        cr.stroke()?;
        cr.rectangle(
            LEGEND_TEXT_X * s,
            (LEGEND_TOP_Y + LEGEND_ROW_PITCH * row) * s,
            super::LEGEND_TEXT_WIDTH * s,
            LEGEND_BLOCK_SIZE * s,
        );
        cr.fill()
    }
}

pub fn draw(cr: &Context, state: &ChartState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    for slice in state.set.slices() {
        SliceRenderer::new(slice, &state.geometry).draw(cr)?;
    }

    if state.kind == ChartKind::Donut {
        draw_hole(cr, state, colors)?;
    }

    if let Some(slice) = state.hovered() {
        SliceRenderer::new(slice, &state.geometry).draw_highlight(cr, colors)?;
        draw_info_panel(cr, slice, &state.geometry, colors)?;
        if state.kind == ChartKind::Donut {
            draw_hole_caption(cr, slice, &state.geometry, colors)?;
        }
    }

    Ok(())
}

fn draw_hole(cr: &Context, state: &ChartState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.hole);
    cr.arc(
        state.geometry.center.x,
        state.geometry.center.y,
        state.geometry.hole_radius(),
        0.0,
        2.0 * std::f64::consts::PI,
    );
    cr.fill()
}

/// Caption of the hovered slice, centered in the donut hole.
fn draw_hole_caption(
    cr: &Context,
    slice: &Slice,
    geometry: &ChartGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.text);
    cr.set_font_size(LEGEND_FONT_SIZE * geometry.scale);

    let caption = slice.caption();
    if let Ok(ext) = cr.text_extents(&caption) {
        cr.move_to(
            geometry.center.x - ext.width() / 2.0,
            geometry.center.y + ext.height() / 2.0,
        );
        cr.show_text(&caption)?;
    }
    Ok(())
}

fn draw_info_panel(
    cr: &Context,
    slice: &Slice,
    geometry: &ChartGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let s = geometry.scale;

    set_source(cr, colors.panel);
    cr.rectangle(INFO_X * s, INFO_Y * s, INFO_WIDTH * s, INFO_HEIGHT * s);
    cr.fill()?;

    set_source(cr, colors.text);
    cr.set_font_size(LEGEND_FONT_SIZE * s);

    let lines = [
        format!("Label: {}", slice.label),
        format!("Value: {}%", slice.value),
        format!(
            "Angle: {:.1}° to {:.1}°",
            slice.start_angle, slice.end_angle
        ),
    ];
    for (i, line) in lines.iter().enumerate() {
        cr.move_to(
            (INFO_X + 20.0) * s,
            (INFO_Y + INFO_LINE_HEIGHT * (i as f64 + 1.0)) * s,
        );
        cr.show_text(line)?;
    }
    Ok(())
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}
