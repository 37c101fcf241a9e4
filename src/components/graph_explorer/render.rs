//! Canvas drawing for the explorer.
//!
//! Runs once per animation frame over read-only state, in passes for
//! correct z-ordering: background (screen space), then links with
//! arrowheads and relation labels, then node circles, rings, and node
//! labels (world space, under the viewport transform). Labels take no part
//! in layout or hit testing; at dense zoom levels they may overlap.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::ExplorerState;
use super::theme::{Color, Theme};

/// Ease emphasis values so transitions start and end softly.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

fn css_rgba(color: Color, alpha: f64) -> String {
	format!(
		"rgba({}, {}, {}, {})",
		color.r,
		color.g,
		color.b,
		color.a * alpha
	)
}

/// Renders the complete frame to the canvas.
pub fn render(
	state: &ExplorerState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.viewport.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.viewport.x, state.viewport.y);
	let _ = ctx.scale(state.viewport.k, state.viewport.k);

	draw_links(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &ExplorerState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_links(
	state: &ExplorerState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let nodes = state.sim.nodes();
	let show_relations = scale.relation_alpha > 0.05;
	if show_relations {
		ctx.set_font(&scale.relation_font);
		ctx.set_text_align("center");
	}

	for link in &state.links {
		let (a, b) = (&nodes[link.source], &nodes[link.target]);
		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		// Geometric mean keeps link emphasis in step with both endpoints.
		let emph = smooth_step(
			(state.emphasis(link.source) * state.emphasis(link.target)).sqrt(),
		);
		let line_alpha = 0.7 + 0.3 * emph;
		let width = scale.link_width * (1.0 + 0.4 * emph);

		ctx.set_stroke_style_str(&css_rgba(theme.link.color, line_alpha));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(a.x + ux * scale.node_radius, a.y + uy * scale.node_radius);
		ctx.line_to(
			b.x - ux * (scale.node_radius + scale.arrow_size),
			b.y - uy * (scale.node_radius + scale.arrow_size),
		);
		ctx.stroke();

		if scale.arrow_alpha > 0.05 {
			let arrow_alpha = scale.arrow_alpha * (0.9 + 0.1 * emph);
			ctx.set_fill_style_str(&css_rgba(theme.link.color, arrow_alpha));
			let (tip_x, tip_y) = (b.x - ux * scale.node_radius, b.y - uy * scale.node_radius);
			let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
			let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}

		if show_relations {
			let relation = &state.data.links[link.index].relation;
			let label_alpha = scale.relation_alpha * (0.8 + 0.2 * emph);
			ctx.set_fill_style_str(&css_rgba(theme.link.label_color, label_alpha));
			let (mx, my) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
			let _ = ctx.fill_text(relation, mx, my - 4.0 / scale.k);
		}
	}
}

fn draw_nodes(
	state: &ExplorerState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let nodes = state.sim.nodes();

	for (i, node) in nodes.iter().enumerate() {
		let color = theme.palette.color(state.data.nodes[i].group);
		let emph = smooth_step(state.emphasis(i));
		let radius = scale.node_radius * (1.0 + 0.25 * emph);

		if theme.node.shaded {
			let gradient = ctx
				.create_radial_gradient(
					node.x - radius * 0.3,
					node.y - radius * 0.3,
					0.0,
					node.x,
					node.y,
					radius,
				)
				.unwrap();
			gradient
				.add_color_stop(0.0, &color.lighten(0.4).to_css())
				.unwrap();
			gradient.add_color_stop(0.7, &color.to_css()).unwrap();
			gradient
				.add_color_stop(1.0, &color.darken(0.2).to_css())
				.unwrap();

			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		} else {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill();
		}

		if state.hovered == Some(i) && emph > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&css_rgba(theme.node.ring_color, 0.8 * emph));
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}

		if state.selected == Some(i) {
			ctx.begin_path();
			let _ = ctx.arc(
				node.x,
				node.y,
				radius + scale.ring_offset * 1.8,
				0.0,
				2.0 * PI,
			);
			ctx.set_stroke_style_str(&theme.node.selection_color.to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}
	}

	// Labels go on top of every circle.
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("start");
	for (i, node) in nodes.iter().enumerate() {
		let emph = smooth_step(state.emphasis(i));
		let radius = scale.node_radius * (1.0 + 0.25 * emph);
		let alpha = 0.85 + 0.15 * emph;
		ctx.set_fill_style_str(&css_rgba(theme.node.label_color, alpha));
		let _ = ctx.fill_text(&state.data.nodes[i].label, node.x + radius + 4.0, node.y + 3.0);
	}
}
