//! The "life in weeks" poster.

use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Point, Rect, SpreadMode,
    Stroke, Transform,
};

use super::background::{paint_layered_radial_background, paint_plain};
use super::fonts::{FontWeight, TextStyle};
use super::style::{GridBackground, GridStyle};
use super::text::Align;
use super::{new_canvas, solid, RenderContext, RenderError, Snapshot};
use crate::core::caption::weeks_summary;
use crate::core::life::WEEKS_PER_YEAR;
use crate::core::{CellKind, GridStats};

/// Cell size and placement of the week grid on a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub scale: f32,
    pub cell: f32,
    pub gap: f32,
    pub decades: u32,
    pub decade_gap: f32,
    pub rows_per_decade: u32,
    pub width: f32,
    pub height: f32,
    pub start_x: f32,
    pub start_y: f32,
}

impl GridLayout {
    /// Fits `total_years` rows of 52 weeks under the title: no wider than the
    /// title (itself capped at the canvas minus side margins), no taller than
    /// the space left above the bottom reserve, never above `max_scale`.
    pub fn compute(
        style: &GridStyle,
        total_years: u32,
        title_width: f32,
        canvas_width: f32,
        canvas_height: f32,
    ) -> Self {
        let rows = total_years.max(1);
        let columns = WEEKS_PER_YEAR as f32;
        let base_pitch = style.base_cell + style.base_gap;

        let target_width = (canvas_width - style.side_margin).min(title_width).max(0.0);
        let start_y = style.content_top + style.grid_offset;
        let available = canvas_height - start_y - style.bottom_reserve;
        let decades = (rows - 1) / style.rows_per_decade.max(1);
        let decade_space = decades as f32 * style.decade_gap;

        let fit_height = (available - decade_space) / (rows as f32 * base_pitch);
        let fit_width = target_width / (columns * base_pitch - style.base_gap);
        let scale = style.max_scale.min(fit_height).min(fit_width).max(0.0);

        let cell = (style.base_cell * scale).max(style.min_cell);
        let gap = style.base_gap * scale;
        let width = columns * (cell + gap) - gap;
        let height = rows as f32 * (cell + gap) - gap + decade_space;

        Self {
            scale,
            cell,
            gap,
            decades,
            decade_gap: style.decade_gap,
            rows_per_decade: style.rows_per_decade.max(1),
            width,
            height,
            start_x: (canvas_width - width) / 2.0,
            start_y,
        }
    }

    /// Top-left corner of the cell at zero-based `year` row, `week` column.
    pub fn cell_origin(&self, year: u32, week: u32) -> (f32, f32) {
        let pitch = self.cell + self.gap;
        let decade_offset = (year / self.rows_per_decade) as f32 * self.decade_gap;
        (
            self.start_x + week as f32 * pitch,
            self.start_y + year as f32 * pitch + decade_offset,
        )
    }
}

pub fn render_grid(ctx: &RenderContext<'_>, stats: &GridStats) -> Result<Snapshot, RenderError> {
    let style = &ctx.preset.grid;
    let theme = ctx.theme;
    let mut pixmap = new_canvas()?;
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    match style.background {
        GridBackground::Plain => paint_plain(&mut pixmap, theme.white.opaque()),
        GridBackground::Layered { strength } => {
            paint_layered_radial_background(&mut pixmap, theme, strength)
        }
    }

    let title_style = TextStyle::new(FontWeight::SemiBold, style.title_font_px)
        .spacing(style.title_letter_spacing_em)
        .align(Align::Center);
    let title_width = ctx.fonts.measure(&stats.title, title_style);
    let layout = GridLayout::compute(style, stats.total_years, title_width, width, height);

    ctx.fonts.draw_text(
        &mut pixmap,
        &stats.title,
        width / 2.0,
        style.content_top + style.title_baseline_offset,
        title_style,
        theme.text.opaque(),
    );
    ctx.fonts.draw_text(
        &mut pixmap,
        &weeks_summary(stats),
        layout.start_x,
        style.content_top + style.summary_baseline_offset,
        TextStyle::new(FontWeight::Medium, style.summary_font_px)
            .spacing(style.summary_letter_spacing_em),
        theme.text.opaque(),
    );

    let mut filled = PathBuilder::new();
    let mut upcoming = PathBuilder::new();
    let mut beyond = PathBuilder::new();
    for (year, week, kind) in stats.cells() {
        let target = match kind {
            CellKind::Filled => &mut filled,
            CellKind::Upcoming => &mut upcoming,
            CellKind::Beyond => &mut beyond,
            CellKind::Hidden => continue,
        };
        let (x, y) = layout.cell_origin(year, week);
        if let Some(rect) = Rect::from_xywh(x, y, layout.cell, layout.cell) {
            target.push_rect(rect);
        }
    }

    if let Some(path) = filled.finish() {
        let paint =
            filled_paint(ctx, &layout).unwrap_or_else(|| solid(theme.filled_grad_end.opaque()));
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
    let stroke = Stroke {
        width: style.stroke_width,
        ..Stroke::default()
    };
    for (builder, color) in [
        (upcoming, theme.muted.with_alpha(style.upcoming_alpha)),
        (beyond, theme.text.with_alpha(style.beyond_alpha)),
    ] {
        if let Some(path) = builder.finish() {
            pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
        }
    }

    let signature_style = TextStyle::new(FontWeight::Medium, style.signature_font_px);
    let signature_width = ctx.fonts.measure(&ctx.preset.signature, signature_style);
    ctx.fonts.draw_text(
        &mut pixmap,
        &ctx.preset.signature,
        width - style.signature_right - signature_width,
        height - style.signature_bottom,
        signature_style,
        theme.text.opaque(),
    );

    log::debug!(
        "[render] grid snapshot drawn: {} rows at scale {:.3}",
        stats.total_years,
        layout.scale
    );
    Ok(Snapshot::from_pixmap(pixmap))
}

/// One vertical gradient spanning the whole grid, shared by every filled
/// cell.
fn filled_paint(ctx: &RenderContext<'_>, layout: &GridLayout) -> Option<Paint<'static>> {
    let top = Point::from_xy(layout.start_x, layout.start_y);
    let bottom = Point::from_xy(layout.start_x, layout.start_y + layout.height);
    let shader = LinearGradient::new(
        top,
        bottom,
        vec![
            GradientStop::new(0.0, ctx.theme.filled_grad_start.opaque()),
            GradientStop::new(1.0, ctx.theme.filled_grad_end.opaque()),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )?;
    Some(Paint {
        shader,
        anti_alias: true,
        ..Paint::default()
    })
}
