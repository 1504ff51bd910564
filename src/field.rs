//! Dot Field Engine for Dot Field RS
//! Pointer-reactive dot grid with bounce-oscillating opacity and a spatial
//! index that keeps pointer queries off the full dot array

use crate::config::FieldConfig;
use crate::events::SurfaceEvent;
use egui::{Color32, Painter, Pos2, Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Per-frame opacity increment range for freshly laid out dots.
const OPACITY_SPEED_MIN: f32 = 0.002;
const OPACITY_SPEED_MAX: f32 = 0.007;

/// Individual dot data
#[derive(Clone, Debug)]
pub struct Dot {
    /// Surface-local position, fixed until the next rebuild.
    pub pos: Pos2,
    pub base_color: [u8; 3],
    pub target_opacity: f32,
    pub current_opacity: f32,
    pub opacity_speed: f32,
    pub base_radius: f32,
    /// Radius for this frame; overwritten by every step.
    pub current_radius: f32,
    /// Opacity for this frame; overwritten by every step.
    pub render_opacity: f32,
}

impl Dot {
    /// Advance the bounce oscillation by one frame.
    ///
    /// On reaching the target or the lower bound the speed flips sign, the
    /// value is clamped back into `[min, max]`, and a fresh target is drawn
    /// so neighboring dots never synchronize.
    fn oscillate<R: Rng>(&mut self, min: f32, max: f32, rng: &mut R) {
        self.current_opacity += self.opacity_speed;
        if self.current_opacity >= self.target_opacity || self.current_opacity <= min {
            self.opacity_speed = -self.opacity_speed;
            self.current_opacity = self.current_opacity.clamp(min, max);
            self.target_opacity = rng.gen_range(min..=max);
        }
    }
}

/// Quadratic falloff: 1 at the pointer, 0 at and beyond `radius`.
fn interaction_factor(dist_sq: f32, radius: f32) -> f32 {
    if radius <= 0.0 || dist_sq >= radius * radius {
        return 0.0;
    }
    let t = 1.0 - dist_sq.sqrt() / radius;
    t * t
}

// ============================================================================
// Spatial Index
// ============================================================================

/// Buckets dot indices by coarse grid cell so a pointer query touches only
/// the cells within the interaction radius.
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_of(&self, pos: Pos2) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    pub fn insert(&mut self, index: usize, pos: Pos2) {
        let cell = self.cell_of(pos);
        self.cells.entry(cell).or_default().push(index);
    }

    pub fn bucket(&self, cell: (i32, i32)) -> &[usize] {
        match self.cells.get(&cell) {
            Some(indices) => indices.as_slice(),
            None => &[],
        }
    }

    /// Indices of every dot whose cell lies within `radius` of `pos`.
    ///
    /// A superset of the dots actually inside the radius; the caller still
    /// does the exact distance check per candidate.
    pub fn query_radius(&self, pos: Pos2, radius: f32) -> HashSet<usize> {
        let mut candidates = HashSet::new();
        let (cell_x, cell_y) = self.cell_of(pos);
        let search_range = (radius / self.cell_size).ceil() as i32;

        for dx in -search_range..=search_range {
            for dy in -search_range..=search_range {
                if let Some(indices) = self.cells.get(&(cell_x + dx, cell_y + dy)) {
                    candidates.extend(indices.iter().copied());
                }
            }
        }
        candidates
    }
}

// ============================================================================
// Dot Field Engine
// ============================================================================

/// One mounted dot field: the dot array, its spatial index, and the pointer
/// and size state the event stream mutates between frames.
///
/// Dots and index are rebuilt together on resize; neither is ever patched
/// incrementally, so they cannot drift apart.
pub struct DotField {
    config: FieldConfig,
    dots: Vec<Dot>,
    grid: SpatialGrid,
    width: f32,
    height: f32,
    pointer: Option<Pos2>,
    rng: StdRng,
}

impl DotField {
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic constructor: identical seed and resize history yield
    /// an identical layout and oscillation schedule.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, rng: StdRng) -> Self {
        let cell_size = config.cell_size();
        Self {
            config,
            dots: Vec::new(),
            grid: SpatialGrid::new(cell_size),
            width: 0.0,
            height: 0.0,
            pointer: None,
            rng,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Swap in a new constant set and rebuild at the current surface size.
    pub fn set_config(&mut self, config: FieldConfig) {
        self.config = config;
        self.rebuild();
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn pointer(&self) -> Option<Pos2> {
        self.pointer
    }

    /// False until the first resize with nonzero dimensions lands.
    pub fn is_active(&self) -> bool {
        !self.dots.is_empty()
    }

    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::PointerMoved { x, y } => {
                self.pointer = Some(Pos2::new(x, y));
            }
            SurfaceEvent::PointerLeft => {
                self.pointer = None;
            }
            SurfaceEvent::Resized { width, height } => {
                // Unchanged dimensions must not disturb oscillation phases.
                if width != self.width || height != self.height {
                    self.width = width;
                    self.height = height;
                    self.rebuild();
                }
            }
        }
    }

    /// Lay out dots on the spacing grid with per-dot jitter and rebuild the
    /// spatial index alongside. A zero-sized surface leaves the field empty.
    fn rebuild(&mut self) {
        self.dots.clear();
        self.grid = SpatialGrid::new(self.config.cell_size());

        let spacing = self.config.spacing;
        if self.width == 0.0 || self.height == 0.0 || spacing <= 0.0 {
            return;
        }

        let cols = (self.width / spacing).ceil() as i32 + 1;
        let rows = (self.height / spacing).ceil() as i32 + 1;
        let jitter = self.config.jitter * spacing;
        let color = self.config.color();
        // An inverted range collapses rather than panicking in gen_range.
        let opacity_min = self.config.opacity_min.min(self.config.opacity_max);
        let opacity_max = self.config.opacity_max.max(self.config.opacity_min);

        for i in 0..cols {
            for j in 0..rows {
                let x = i as f32 * spacing + self.rng.gen::<f32>() * jitter;
                let y = j as f32 * spacing + self.rng.gen::<f32>() * jitter;
                if x > self.width || y > self.height {
                    continue;
                }

                let index = self.dots.len();
                self.grid.insert(index, Pos2::new(x, y));

                let opacity = self.rng.gen_range(opacity_min..=opacity_max);
                self.dots.push(Dot {
                    pos: Pos2::new(x, y),
                    base_color: color,
                    target_opacity: opacity,
                    current_opacity: opacity,
                    opacity_speed: self.rng.gen_range(OPACITY_SPEED_MIN..OPACITY_SPEED_MAX),
                    base_radius: self.config.base_radius,
                    current_radius: self.config.base_radius,
                    render_opacity: opacity,
                });
            }
        }

        log::debug!(
            "field rebuilt: {} dots over {:.0}x{:.0}",
            self.dots.len(),
            self.width,
            self.height
        );
    }

    /// Advance every dot by one frame and compute its render attributes.
    pub fn step(&mut self) {
        if self.dots.is_empty() {
            return;
        }

        let opacity_min = self.config.opacity_min.min(self.config.opacity_max);
        let opacity_max = self.config.opacity_max.max(self.config.opacity_min);

        // Oscillation pass. Sequential: new targets come from the field's
        // owned rng, which keeps seeded runs reproducible.
        for dot in &mut self.dots {
            dot.oscillate(opacity_min, opacity_max, &mut self.rng);
        }

        // Interaction pass. Candidates come from the spatial index; every
        // other dot gets zero interaction this frame without a distance
        // check.
        let pointer = self.pointer;
        let radius = self.config.interaction_radius;
        let candidates = pointer.map(|p| self.grid.query_radius(p, radius));
        let opacity_boost = self.config.opacity_boost;
        let radius_boost = self.config.radius_boost;

        self.dots
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, dot)| {
                let mut factor = 0.0;
                if let (Some(p), Some(candidates)) = (pointer, candidates.as_ref()) {
                    if candidates.contains(&index) {
                        let dx = dot.pos.x - p.x;
                        let dy = dot.pos.y - p.y;
                        factor = interaction_factor(dx * dx + dy * dy, radius);
                    }
                }

                dot.render_opacity = (dot.current_opacity + factor * opacity_boost).min(1.0);
                dot.current_radius = dot.base_radius + factor * radius_boost;
            });
    }

    /// Draw every dot as a filled circle into `rect`. The host paints the
    /// backdrop; this only adds the dots on top.
    pub fn render(&self, painter: &Painter, rect: Rect) {
        for dot in &self.dots {
            let alpha = (dot.render_opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
            if alpha == 0 {
                continue;
            }
            let [r, g, b] = dot.base_color;
            let color = Color32::from_rgba_unmultiplied(r, g, b, alpha);
            let pos = rect.min + Vec2::new(dot.pos.x, dot.pos.y);
            painter.circle_filled(pos, dot.current_radius, color);
        }
    }
}
