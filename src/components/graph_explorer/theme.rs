//! Visual theming for the explorer, including the category palette.

use super::types::Category;

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Closed category-to-color table. Every known [`Category`] has an explicit
/// entry; anything else takes the neutral fallback.
#[derive(Clone, Debug)]
pub struct CategoryPalette {
	pub policy: Color,
	pub organization: Color,
	pub beneficiary: Color,
	pub table: Color,
	pub column: Color,
	/// Neutral gray for categories this palette does not know.
	pub fallback: Color,
}

impl CategoryPalette {
	/// Color for a category.
	pub fn color(&self, category: Category) -> Color {
		match category {
			Category::Policy => self.policy,
			Category::Organization => self.organization,
			Category::Beneficiary => self.beneficiary,
			Category::Table => self.table,
			Category::Column => self.column,
			Category::Unknown => self.fallback,
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Link visual style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Base line and arrowhead color
	pub color: Color,
	/// Relation label color
	pub label_color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether node circles get an inner radial shading
	pub shaded: bool,
	/// Node label color
	pub label_color: Color,
	/// Hover ring color
	pub ring_color: Color,
	/// Selection ring color
	pub selection_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub link: LinkStyle,
	pub node: NodeStyle,
	pub palette: CategoryPalette,
}

impl Theme {
	/// Dark slate theme (default).
	pub fn slate() -> Self {
		Self {
			name: "slate",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			link: LinkStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				label_color: Color::rgba(170, 185, 200, 0.9),
			},
			node: NodeStyle {
				shaded: true,
				label_color: Color::rgba(255, 255, 255, 0.85),
				ring_color: Color::rgb(255, 255, 255),
				selection_color: Color::rgb(255, 214, 130),
			},
			palette: CategoryPalette {
				policy: Color::rgb(94, 129, 172),
				organization: Color::rgb(130, 120, 150),
				beneficiary: Color::rgb(100, 145, 135),
				table: Color::rgb(180, 136, 100),
				column: Color::rgb(100, 148, 160),
				fallback: Color::rgb(128, 128, 128),
			},
		}
	}

	/// Deeper, cooler dark theme.
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(25, 28, 38),
				use_gradient: true,
			},
			link: LinkStyle {
				color: Color::rgba(100, 120, 150, 0.45),
				label_color: Color::rgba(150, 165, 190, 0.9),
			},
			node: NodeStyle {
				shaded: true,
				label_color: Color::rgba(255, 255, 255, 0.85),
				ring_color: Color::rgb(255, 255, 255),
				selection_color: Color::rgb(235, 200, 120),
			},
			palette: CategoryPalette {
				policy: Color::rgb(108, 142, 173),
				organization: Color::rgb(120, 130, 160),
				beneficiary: Color::rgb(105, 140, 145),
				table: Color::rgb(165, 140, 110),
				column: Color::rgb(110, 135, 150),
				fallback: Color::rgb(120, 120, 120),
			},
		}
	}

	/// Light theme for embedding in bright pages.
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(250, 250, 248),
				color_secondary: Color::rgb(242, 242, 238),
				use_gradient: false,
			},
			link: LinkStyle {
				color: Color::rgba(110, 120, 130, 0.6),
				label_color: Color::rgba(90, 100, 110, 0.95),
			},
			node: NodeStyle {
				shaded: false,
				label_color: Color::rgba(40, 45, 50, 0.9),
				ring_color: Color::rgb(60, 65, 70),
				selection_color: Color::rgb(200, 140, 40),
			},
			palette: CategoryPalette {
				policy: Color::rgb(70, 110, 160),
				organization: Color::rgb(120, 100, 150),
				beneficiary: Color::rgb(70, 130, 110),
				table: Color::rgb(175, 120, 70),
				column: Color::rgb(80, 130, 145),
				fallback: Color::rgb(145, 145, 145),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::slate()
	}
}
