//! Leptos component wrapping the explorer canvas.
//!
//! The component creates an HTML canvas element and wires mouse/wheel events
//! into the pointer controller. One `requestAnimationFrame` loop runs per
//! mounted component: the data signal changing swaps the graph into the
//! existing state rather than spawning a second loop, and teardown cancels
//! the pending frame, detaches the resize listener, and stops the
//! simulation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::ExplorerState;
use super::theme::Theme;
use super::types::{GraphData, Node};

/// Frame delta passed to display smoothing. The simulation itself advances
/// in whole ticks and does not depend on wall time.
const FRAME_DT: f64 = 1.0 / 60.0;

/// Bundles explorer state with its visual configuration.
struct ViewContext {
	state: ExplorerState,
	scale: ScaleConfig,
	theme: Theme,
}

/// Renders an interactive knowledge-graph explorer on a canvas element.
///
/// Pass graph data via the reactive `data` signal; pushing a new value
/// replaces the displayed graph in place. The component sizes itself to its
/// parent container by default; set `fullscreen = true` to fill the viewport
/// and track window resizes. Explicit `width`/`height` override automatic
/// sizing.
///
/// `on_select` fires synchronously with the full node when a click (short
/// press without drag movement) lands on a node.
#[component]
pub fn GraphExplorer(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional, into)] on_select: Option<Callback<Node>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] theme: Option<Theme>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<ViewContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (context_init, animate_init, resize_cb_init, frame_id_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		frame_id.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let data = data.get();

		// Later runs of this effect mean the data signal changed: swap the
		// graph under the already-running animation loop.
		if let Some(ref mut c) = *context_init.borrow_mut() {
			c.state.replace_data(data);
			return;
		}

		let window: Window = web_sys::window().unwrap();
		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		*context_init.borrow_mut() = Some(ViewContext {
			state: ExplorerState::new(data, w, h),
			scale: ScaleConfig::default(),
			theme: theme.clone().unwrap_or_default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window
					.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, frame_id_anim) = (
			context_init.clone(),
			animate_init.clone(),
			frame_id_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(FRAME_DT);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(id) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					frame_id_anim.set(Some(id));
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_id_init.set(Some(id));
			}
		}
	});

	// The cleanup hook demands a Send closure, but on a wasm target it always
	// runs on the one browser thread.
	let cleanup = SendWrapper::new((
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		frame_id.clone(),
	));
	on_cleanup(move || {
		let (context, animate, resize_cb, frame_id) = cleanup.take();
		if let Some(id) = frame_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		// Dropping the closure guarantees no stray frame can fire.
		*animate.borrow_mut() = None;
		if let Some(cb) = resize_cb.borrow_mut().take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		if let Some(ref mut c) = *context.borrow_mut() {
			c.state.stop();
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = canvas_point(&canvas_ref, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_pressed((x, y), ev.time_stamp(), &c.scale);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = canvas_point(&canvas_ref, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_moved((x, y), &c.scale);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let (x, y) = canvas_point(&canvas_ref, &ev);
		let clicked = match *context_mu.borrow_mut() {
			Some(ref mut c) => c.state.pointer_released((x, y), ev.time_stamp()),
			None => None,
		};
		// Dispatch outside the borrow so the callback may query the
		// component again.
		if let (Some(node), Some(cb)) = (clicked, on_select) {
			cb.run(node);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_left();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let (x, y) = canvas_point(&canvas_ref, &ev);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom(factor, (x, y));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-explorer-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

/// Pointer position in canvas-local coordinates.
fn canvas_point(canvas_ref: &NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> (f64, f64) {
	let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}
